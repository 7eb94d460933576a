use std::collections::BTreeMap;
use std::panic::Location;
use std::sync::Arc;

use async_trait::async_trait;
use error_location::ErrorLocation;
use tp_auth::{AuthVerifier, SessionCodec};
use tp_core::{ChatId, SendKey, User};
use tp_db::{Database, DbError, KeyStore, UserRepository};
use tp_relay::{
    DeliveryQueue, DeliveryWorker, OutboundChannel, RegistrationFlow, RelayMetrics, RelayService,
};

pub const BOT_TOKEN: &str = "123456789:ABCDefGHIIklmnOpQrsTUVWXyZ123456789";
pub const SESSION_SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

/// A login assertion for `id` signed with [`BOT_TOKEN`], dated now
pub fn signed_assertion(id: i64, first_name: &str) -> BTreeMap<String, String> {
    let mut assertion = BTreeMap::new();
    assertion.insert("id".to_string(), id.to_string());
    assertion.insert("first_name".to_string(), first_name.to_string());
    assertion.insert(
        "auth_date".to_string(),
        chrono::Utc::now().timestamp().to_string(),
    );

    let hash = AuthVerifier::from_bot_token(BOT_TOKEN)
        .sign(&assertion)
        .unwrap();
    assertion.insert("hash".to_string(), hash);
    assertion
}

/// Registration and relay wired to an in-memory store
pub struct Harness {
    pub database: Database,
    pub store: Arc<UserRepository>,
    pub registration: RegistrationFlow,
    pub relay: RelayService,
    pub worker: DeliveryWorker,
}

impl Harness {
    /// Drop the relay (and its queue handle) and wait for pending deliveries
    pub async fn drain(self) -> usize {
        let Harness { relay, worker, .. } = self;
        drop(relay);
        worker.join().await
    }
}

pub async fn create_harness(channel: Arc<dyn OutboundChannel>) -> Harness {
    let database = Database::in_memory()
        .await
        .expect("Failed to create test database");
    let store = Arc::new(UserRepository::from_database(&database));
    let metrics = RelayMetrics::new();

    let (queue, worker) = DeliveryQueue::start(channel, metrics.clone());
    let registration = RegistrationFlow::new(
        Arc::new(AuthVerifier::from_bot_token(BOT_TOKEN)),
        store.clone(),
        Arc::new(SessionCodec::with_hs256(SESSION_SECRET, 3600)),
        metrics.clone(),
    );
    let relay = RelayService::new(store.clone(), queue, metrics);

    Harness {
        database,
        store,
        registration,
        relay,
        worker,
    }
}

/// Every operation fails as if the disk went away; counts calls
#[derive(Default)]
pub struct FailingStore {
    calls: std::sync::Mutex<usize>,
}

impl FailingStore {
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    #[track_caller]
    fn fail<T>(&self) -> Result<T, DbError> {
        *self.calls.lock().unwrap() += 1;
        Err(DbError::Initialization {
            message: "disk I/O error".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

#[async_trait]
impl KeyStore for FailingStore {
    async fn get_by_id(&self, _id: i64) -> Result<Option<User>, DbError> {
        self.fail()
    }

    async fn get_by_send_key(&self, _key: &str) -> Result<Option<User>, DbError> {
        self.fail()
    }

    async fn create_if_absent(&self, _id: i64, _first_name: &str) -> Result<User, DbError> {
        self.fail()
    }

    async fn assign_destination_and_key(
        &self,
        _id: i64,
        _chat_id: ChatId,
        _key: &SendKey,
    ) -> Result<bool, DbError> {
        self.fail()
    }
}
