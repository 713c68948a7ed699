//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend
//! only on the domain driving port and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::CatalogueCrud;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub catalogue: Arc<dyn CatalogueCrud>,
}

impl HttpState {
    /// Construct state from a catalogue use-case implementation.
    pub fn new(catalogue: Arc<dyn CatalogueCrud>) -> Self {
        Self { catalogue }
    }
}
