//! `AnyHash` for third-party value types that carry their own canonical
//! bytes.
//!
//! - `chrono::DateTime<Tz>`: the UTC instant as `i64` seconds since the
//!   Unix epoch followed by `u32` nanoseconds, both little-endian. The same
//!   instant in different time zones hashes identically. The epoch itself
//!   (chrono's default) is zero.
//! - `uuid::Uuid`: its 16 raw bytes. The nil UUID is zero.

#[cfg(feature = "chrono")]
mod time {
    use chrono::{DateTime, TimeZone};

    use crate::record::{Field, Record};
    use crate::shape::{AnyHash, Shape};

    impl<Tz: TimeZone> AnyHash for DateTime<Tz> {
        fn shape(&self) -> Shape<'_> {
            Shape::Record(self)
        }

        fn is_zero(&self) -> bool {
            self.timestamp() == 0 && self.timestamp_subsec_nanos() == 0
        }
    }

    impl<Tz: TimeZone> Record for DateTime<Tz> {
        fn fields(&self) -> Vec<Field<'_>> {
            Vec::new()
        }

        fn canonical_bytes(&self) -> Option<Vec<u8>> {
            let mut bytes = Vec::with_capacity(12);
            bytes.extend_from_slice(&self.timestamp().to_le_bytes());
            bytes.extend_from_slice(&self.timestamp_subsec_nanos().to_le_bytes());
            Some(bytes)
        }
    }
}

#[cfg(feature = "uuid")]
mod id {
    use uuid::Uuid;

    use crate::record::{Field, Record};
    use crate::shape::{AnyHash, Shape};

    impl AnyHash for Uuid {
        fn shape(&self) -> Shape<'_> {
            Shape::Record(self)
        }

        fn is_zero(&self) -> bool {
            self.is_nil()
        }
    }

    impl Record for Uuid {
        fn fields(&self) -> Vec<Field<'_>> {
            Vec::new()
        }

        fn canonical_bytes(&self) -> Option<Vec<u8>> {
            Some(self.as_bytes().to_vec())
        }
    }
}
