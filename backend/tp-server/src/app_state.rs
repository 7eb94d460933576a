use crate::{Pages, ServerResult as ServerErrorResult, SessionCookie};

use std::sync::Arc;

use tp_auth::{AuthVerifier, SessionCodec};
use tp_config::Config;
use tp_db::{Database, KeyStore, UserRepository};
use tp_relay::{DeliveryQueue, RegistrationFlow, RelayMetrics, RelayService};

/// Collaborators shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub registration: RegistrationFlow,
    pub relay: RelayService,
    pub store: Arc<dyn KeyStore>,
    pub sessions: Arc<SessionCodec>,
    pub database: Database,
    pub pages: Arc<Pages>,
    pub cookie: SessionCookie,
    pub bot_username: String,
    /// Public base URL without a trailing slash
    pub website_url: String,
    pub webhook_path: String,
}

impl AppState {
    /// Wire the collaborators from validated config.
    ///
    /// The delivery queue's worker must already be running.
    pub fn new(
        config: &Config,
        database: Database,
        queue: DeliveryQueue,
        metrics: RelayMetrics,
    ) -> ServerErrorResult<Self> {
        let store: Arc<dyn KeyStore> = Arc::new(UserRepository::from_database(&database));
        let verifier = Arc::new(AuthVerifier::from_bot_token(&config.telegram.bot_token));
        let sessions = Arc::new(SessionCodec::with_hs256(
            config.session.secret_key.as_bytes(),
            config.session.max_age_secs,
        ));

        let registration = RegistrationFlow::new(
            verifier,
            Arc::clone(&store),
            Arc::clone(&sessions),
            metrics.clone(),
        );
        let relay = RelayService::new(Arc::clone(&store), queue, metrics);

        Ok(Self {
            registration,
            relay,
            store,
            sessions,
            database,
            pages: Arc::new(Pages::new()?),
            cookie: SessionCookie::new(config.session.max_age_secs, config.website.is_https()),
            bot_username: config.telegram.bot_username().to_string(),
            website_url: config.website.base_url().to_string(),
            webhook_path: config.webhook_path(),
        })
    }
}
