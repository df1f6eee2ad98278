//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the startup configuration, the per-browser session store, and
//! the mill prediction table loaded once at boot. Stockpile series are not
//! cached; each request regenerates them from the configured seed.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::series::GeneratorConfig;
use crate::services::mill::PredictionTable;
use crate::services::session::SessionStore;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: SessionStore,
    /// `None` if the prediction table could not be loaded.
    pub predictions: Option<Arc<PredictionTable>>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig, predictions: Option<PredictionTable>) -> Self {
        let sessions = SessionStore::new(config.session_ttl);
        Self { config: Arc::new(config), sessions, predictions: predictions.map(Arc::new) }
    }

    /// Generator settings for the stockpile feed charts.
    #[must_use]
    pub fn generator(&self) -> GeneratorConfig {
        GeneratorConfig::default().with_seed(self.config.series_seed)
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_uses_configured_seed() {
        let config = AppConfig { series_seed: 99, ..AppConfig::default() };
        let state = AppState::new(config, None);
        assert_eq!(state.generator().seed, 99);
        assert_eq!(state.generator().entities.len(), 6);
    }

    #[test]
    fn predictions_are_optional() {
        assert!(test_helpers::test_app_state().predictions.is_none());
        assert!(test_helpers::test_app_state_with_predictions().predictions.is_some());
    }
}
