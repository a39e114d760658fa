use std::sync::Arc;

use crate::config::Config;
use crate::optimization::optimizer::ResumeOptimizer;
use crate::profile::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable optimizer. Hosted when a Hugging Face token is configured,
    /// local keyword synthesis otherwise.
    pub optimizer: Arc<dyn ResumeOptimizer>,
    /// The single shared mutable resource: the user's profile.
    pub profiles: Arc<dyn ProfileStore>,
}
