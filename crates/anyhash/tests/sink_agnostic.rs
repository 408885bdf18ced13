//! # Sink Agnosticism
//!
//! The canonical stream is independent of the sink consuming it. Any type
//! implementing `Update` works, including checksums that are not
//! cryptographic digests at all.

use sha2::digest::Update;
use sha2::{Digest, Sha256, Sha512};

use anyhash::{canonical_stream, digest_sha256, digest_sha512, hash_with, AnyHash};

/// CRC-32 (IEEE) as a canonical sink.
#[derive(Default)]
struct Crc32(crc32fast::Hasher);

impl Update for Crc32 {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }
}

/// MD5 from the standalone `md5` crate as a canonical sink.
struct Md5(md5::Context);

impl Update for Md5 {
    fn update(&mut self, data: &[u8]) {
        self.0.consume(data);
    }
}

#[derive(AnyHash)]
pub struct Document {
    pub title: String,
    pub pages: Vec<String>,
    pub revision: u32,
}

fn document() -> Document {
    Document {
        title: "Manual".into(),
        pages: vec!["intro".into(), "".into(), "usage".into()],
        revision: 3,
    }
}

#[test]
fn crc32_sink() {
    let mut crc = Crc32::default();
    hash_with(&mut crc, "You never know, it might be useful");
    assert_eq!(crc.0.finalize().to_be_bytes(), [0xa4, 0x87, 0xf8, 0x1e]);
}

#[test]
fn md5_sink() {
    let mut md5 = Md5(md5::Context::new());
    hash_with(&mut md5, "Hi there");
    assert_eq!(
        format!("{:x}", md5.0.compute()),
        "d9385462d3deff78c352ebb3f941ce12"
    );
}

#[test]
fn captured_stream_reproduces_every_digest() {
    let value = document();
    let stream = canonical_stream(&value);

    assert_eq!(Sha256::digest(stream.as_bytes()).as_slice(), &digest_sha256(&value)[..]);
    assert_eq!(Sha512::digest(stream.as_bytes()).as_slice(), &digest_sha512(&value)[..]);
    assert_eq!(crc32fast::hash(stream.as_bytes()), {
        let mut crc = Crc32::default();
        hash_with(&mut crc, &value);
        crc.0.finalize()
    });
}

#[test]
fn streaming_into_hasher_matches_one_shot() {
    let value = document();
    let mut hasher = Sha256::new();
    hash_with(&mut hasher, &value);
    assert_eq!(hasher.finalize().as_slice(), &digest_sha256(&value)[..]);
}
