use crate::ai::GenerationAdapter;
use crate::config::AppConfig;
use crate::store::JsonStore;

/// Shared application state handed to every request handler.
pub struct AppState {
    pub config: AppConfig,
    pub store: JsonStore,
    pub adapter: Box<dyn GenerationAdapter>,
}
