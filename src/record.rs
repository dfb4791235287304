//! Key/value records built from random 128-bit identifiers.
//!
//! Identifiers are version-4 UUIDs reinterpreted as `u128`. Nothing here
//! deduplicates: two draws colliding is left to the odds of 122 random bits.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use uuid::{Builder, Uuid};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub key: u128,
    pub value: u128,
}

/// Where identifiers come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Source {
    /// `Uuid::new_v4()`, backed by the OS random source.
    #[default]
    Os,
    /// Deterministic stream for reproducible fixtures.
    Seeded(u64),
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Os => f.write_str("os"),
            Source::Seeded(seed) => write!(f, "seed={seed}"),
        }
    }
}

/// Stateful identifier generator for a [`Source`].
pub enum IdSource {
    Os,
    Seeded(Box<StdRng>),
}

impl IdSource {
    pub fn new(source: Source) -> Self {
        match source {
            Source::Os => IdSource::Os,
            Source::Seeded(seed) => IdSource::Seeded(Box::new(StdRng::seed_from_u64(seed))),
        }
    }

    /// Draw one identifier.
    pub fn next_id(&mut self) -> u128 {
        let uuid = match self {
            IdSource::Os => Uuid::new_v4(),
            IdSource::Seeded(rng) => {
                let mut bytes = [0u8; 16];
                rng.fill_bytes(&mut bytes);
                // Sets the version and variant bits the same way new_v4 does.
                Builder::from_random_bytes(bytes).into_uuid()
            }
        };
        uuid.as_u128()
    }
}

/// Infinite stream of records. Never yields `None`; callers bound it with
/// `take`.
pub struct Records {
    ids: IdSource,
}

impl Records {
    pub fn new(source: Source) -> Self {
        Records {
            ids: IdSource::new(source),
        }
    }
}

impl Iterator for Records {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        let key = self.ids.next_id();
        let value = self.ids.next_id();
        Some(Record { key, value })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
