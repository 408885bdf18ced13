//! # `#[derive(AnyHash)]`
//!
//! Field naming, visibility, tags, generics, enums and custom encoding
//! hooks as seen through the canonical stream.

use anyhash::{canonical_stream, AnyHash, Record, Visibility};

#[derive(AnyHash)]
pub struct Pair(pub String, pub u8);

#[derive(AnyHash)]
pub struct Wrapper<T> {
    pub inner: T,
}

#[derive(AnyHash)]
pub struct Visibilities {
    pub open: String,
    pub(crate) crate_only: String,
    hidden: String,
}

#[derive(AnyHash)]
pub struct Tagged {
    pub r#type: String,
    #[anyhash = " - "]
    pub padded_exclusion: String,
    #[anyhash = "keep"]
    pub kept: String,
}

#[derive(AnyHash)]
pub enum Color {
    Red,
    Green,
}

#[derive(AnyHash)]
pub enum Payload {
    Text(String),
    Number(u16),
    Empty,
}

#[derive(AnyHash)]
#[anyhash(with = "Stamp::big_endian")]
pub struct Stamp {
    pub seconds: u64,
}

impl Stamp {
    fn big_endian(&self) -> Option<Vec<u8>> {
        Some(self.seconds.to_be_bytes().to_vec())
    }
}

#[derive(AnyHash)]
#[anyhash(with = "Optional::only_when_flagged")]
pub struct Optional {
    pub flagged: bool,
    pub name: String,
}

impl Optional {
    fn only_when_flagged(&self) -> Option<Vec<u8>> {
        self.flagged.then(|| b"custom".to_vec())
    }
}

#[test]
fn tuple_struct_fields_are_numbered() {
    let pair = Pair("x".into(), 1);
    assert_eq!(canonical_stream(&pair).as_bytes(), &[b'0', b'x', b'1', 1][..]);
}

#[test]
fn generic_struct_bounds_type_parameters() {
    let text = Wrapper { inner: "v" };
    let nested = Wrapper { inner: Wrapper { inner: 7u8 } };
    assert_eq!(canonical_stream(&text).as_bytes(), b"innerv");
    assert_eq!(canonical_stream(&nested).as_bytes(), b"innerinner\x07");
}

#[test]
fn only_plain_pub_fields_are_public() {
    let value = Visibilities {
        open: "a".into(),
        crate_only: "b".into(),
        hidden: "c".into(),
    };
    let visibilities: Vec<_> = value
        .fields()
        .iter()
        .map(|field| (field.name, field.visibility))
        .collect();
    assert_eq!(
        visibilities,
        vec![
            ("open", Visibility::Public),
            ("crate_only", Visibility::Private),
            ("hidden", Visibility::Private),
        ]
    );
    assert_eq!(canonical_stream(&value).as_bytes(), b"opena");
}

#[test]
fn private_fields_still_count_for_zero_check() {
    let value = Visibilities {
        open: String::new(),
        crate_only: String::new(),
        hidden: "c".into(),
    };
    assert!(!value.is_zero());
    assert!(canonical_stream(&value).is_empty());
}

#[test]
fn tags_and_raw_identifiers() {
    let value = Tagged {
        r#type: "t".into(),
        padded_exclusion: "gone".into(),
        kept: "k".into(),
    };
    let fields = value.fields();
    assert_eq!(fields[0].name, "type");
    assert_eq!(fields[2].tag, Some("keep"));
    assert_eq!(canonical_stream(&value).as_bytes(), b"keptktypet");
}

#[test]
fn unit_variants_encode_their_name() {
    assert_eq!(canonical_stream(&Color::Red).as_bytes(), b"Red");
    assert_ne!(canonical_stream(&Color::Red), canonical_stream(&Color::Green));
    assert!(!Color::Red.is_zero());
}

#[test]
fn newtype_variants_are_transparent() {
    assert_eq!(canonical_stream(&Payload::Text("hi".into())), canonical_stream("hi"));
    assert_eq!(canonical_stream(&Payload::Number(2)).as_bytes(), &[2, 0][..]);
    assert!(Payload::Number(0).is_zero());
    assert_eq!(canonical_stream(&Payload::Empty).as_bytes(), b"Empty");
}

#[test]
fn custom_hook_replaces_fields() {
    let stamp = Stamp { seconds: 1 };
    assert_eq!(canonical_stream(&stamp).as_bytes(), &[0, 0, 0, 0, 0, 0, 0, 1][..]);
}

#[test]
fn declining_hook_falls_back_to_fields() {
    let declined = Optional {
        flagged: false,
        name: "n".into(),
    };
    let custom = Optional {
        flagged: true,
        name: "n".into(),
    };
    assert_eq!(canonical_stream(&declined).as_bytes(), b"namen");
    assert_eq!(canonical_stream(&custom).as_bytes(), b"custom");
}
