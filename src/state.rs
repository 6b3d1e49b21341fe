use std::sync::Arc;

use crate::config::Config;
use crate::delivery::DeliveryClient;
use crate::generation::GenerationClient;

/// Shared capabilities handed to every in-flight update task. The clients are
/// stateless and reentrant; cloning the state is cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub delivery: Arc<dyn DeliveryClient>,
    pub generation: Arc<dyn GenerationClient>,
}

impl AppState {
    pub fn new(
        config: Config,
        delivery: Arc<dyn DeliveryClient>,
        generation: Arc<dyn GenerationClient>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            delivery,
            generation,
        }
    }
}
