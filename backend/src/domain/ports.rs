//! Domain ports.
//!
//! The people endpoints only need to know whether an identifier refers to a
//! known person. Adapters decide where that knowledge lives.

use std::ops::RangeInclusive;

use async_trait::async_trait;

use super::person::PersonId;

/// Identifiers known to [`FixturePersonDirectory`].
pub const FIXTURE_PERSON_IDS: RangeInclusive<u64> = 1..=100;

/// Port answering whether a person exists.
#[async_trait]
pub trait PersonDirectory: Send + Sync {
    /// Return `true` when `id` refers to a known person.
    async fn contains(&self, id: PersonId) -> bool;
}

/// Read-only directory backed by [`FIXTURE_PERSON_IDS`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePersonDirectory;

#[async_trait]
impl PersonDirectory for FixturePersonDirectory {
    async fn contains(&self, id: PersonId) -> bool {
        FIXTURE_PERSON_IDS.contains(&id.get())
    }
}
