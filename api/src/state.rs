use std::sync::Arc;

use common::auth::JwtService;
use common::config::Settings;
use common::db::DbPool;
use metrics_exporter_prometheus::PrometheusHandle;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: DbPool,
    pub jwt_service: JwtService,
    pub metrics_handle: PrometheusHandle,
    pub config: Arc<Settings>,
}

impl AppState {
    /// Create a new AppState instance
    pub fn new(db_pool: DbPool, metrics_handle: PrometheusHandle, config: Settings) -> Self {
        let jwt_service = JwtService::new(&config.auth.jwt_secret, config.auth.jwt_expiration_hours);

        Self {
            db_pool,
            jwt_service,
            metrics_handle,
            config: Arc::new(config),
        }
    }
}
