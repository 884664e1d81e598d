//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{FixturePersonDirectory, PersonDirectory};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub people: Arc<dyn PersonDirectory>,
}

impl HttpState {
    /// Construct state around a person directory.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use people_api::domain::ports::FixturePersonDirectory;
    /// use people_api::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixturePersonDirectory));
    /// let _people = state.people.clone();
    /// ```
    pub fn new(people: Arc<dyn PersonDirectory>) -> Self {
        Self { people }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(Arc::new(FixturePersonDirectory))
    }
}
