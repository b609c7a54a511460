//! Application state shared across handlers.

use std::sync::Arc;

use tracing::{info_span, Span};

use scheduler_persistence::SchedulingStore;
use scheduler_recommend::RecommendationAggregator;

use crate::config::ApiConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// Backing store for events, slots, participants and availability.
    pub store: Arc<dyn SchedulingStore>,
    /// Recommendation aggregator over the same store.
    pub aggregator: RecommendationAggregator<dyn SchedulingStore>,
    /// Span handler logs are recorded under.
    pub log: Span,
}

impl AppState {
    /// Creates a new AppState.
    ///
    /// The aggregator logs under a `recommendations` child of `log` and uses
    /// the lookup strategy from `config`.
    pub fn new(config: ApiConfig, store: Arc<dyn SchedulingStore>, log: Span) -> Self {
        let aggregator = RecommendationAggregator::new(Arc::clone(&store))
            .with_strategy(config.lookup_strategy)
            .with_span(info_span!(parent: &log, "recommendations"));

        Self {
            config: Arc::new(config),
            store,
            aggregator,
            log,
        }
    }
}
