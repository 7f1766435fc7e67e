use medsimplify_core::Simplifier;
use medsimplify_ingest::TextExtractor;

/// Shared application state accessible from all handlers.
///
/// Both members are immutable after startup; no locking is needed.
#[derive(Clone)]
pub struct AppState {
    pub simplifier: Simplifier,
    pub extractor: TextExtractor,
}

impl AppState {
    pub fn new(simplifier: Simplifier, extractor: TextExtractor) -> Self {
        Self {
            simplifier,
            extractor,
        }
    }
}
