use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::observability::AppMetrics;
use crate::services::catalog::Catalog;
use crate::services::evaluator::MatchEvaluator;
use crate::services::quiz::QuizService;
use crate::services::session::{SessionService, SessionStore, create_session_service};
use std::sync::Arc;
use std::time::Duration;

/// Application state containing all shared services
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<AppConfig>,
    /// Read-only piece catalog
    pub catalog: Arc<Catalog>,
    /// Session lifecycle
    pub session_service: Arc<dyn SessionService>,
    /// Submit/result workflow
    pub quiz_service: Arc<QuizService>,
    /// Client for the image proxy
    pub http_client: reqwest::Client,
    /// Request and quiz counters
    pub metrics: Arc<AppMetrics>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("catalog", &format!("Catalog({} pieces)", self.catalog.len()))
            .field("session_service", &"Arc<dyn SessionService>")
            .field("quiz_service", &"Arc<QuizService>")
            .field("http_client", &"reqwest::Client")
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(config: AppConfig, catalog: Catalog) -> Result<Self> {
        let catalog = Arc::new(catalog);
        let store = Arc::new(SessionStore::new());

        let session_service: Arc<dyn SessionService> = Arc::from(create_session_service(
            store,
            catalog.clone(),
            config.session.clone(),
        ));

        let quiz_service = Arc::new(QuizService::new(
            catalog.clone(),
            MatchEvaluator::new(config.scoring.name_policy),
            session_service.clone(),
        ));

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.images.timeout))
            .build()
            .map_err(|e| AppError::Config(format!("http client: {}", e)))?;

        Ok(Self {
            config: Arc::new(config),
            catalog,
            session_service,
            quiz_service,
            http_client,
            metrics: Arc::new(AppMetrics::default()),
        })
    }

    /// Name of the session cookie
    pub fn cookie_name(&self) -> &str {
        &self.config.session.cookie_name
    }
}
