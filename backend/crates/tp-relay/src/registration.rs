//! First-time login and first-contact linkage.
//!
//! Login verifies the widget assertion, creates the user if needed and
//! issues a session. Contact from the bot platform links a pending user
//! to a chat and assigns a fresh send key, at most once per user.

use crate::{RelayError, RelayMetrics, Result as RelayErrorResult};

use std::collections::BTreeMap;
use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{debug, info, warn};
use tp_auth::{AuthVerifier, SessionCodec};
use tp_core::{ChatId, SendKey, User};
use tp_db::KeyStore;

/// A verified login: the stored user and a session bound to them
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub session_token: String,
}

/// The platform reported that `user_id` connected the bot from chat `chat_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformContact {
    pub user_id: i64,
    pub chat_id: ChatId,
}

/// What a contact event did. Every variant is a success for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    /// The user was pending and is now linked with this key
    Linked { key: SendKey },
    /// The user already had a key; nothing changed
    AlreadyLinked,
    /// No such user; nothing changed
    UnknownUser,
}

impl ContactOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Linked { .. } => "linked",
            Self::AlreadyLinked => "already_linked",
            Self::UnknownUser => "unknown_user",
        }
    }
}

#[derive(Clone)]
pub struct RegistrationFlow {
    verifier: Arc<AuthVerifier>,
    store: Arc<dyn KeyStore>,
    sessions: Arc<SessionCodec>,
    metrics: RelayMetrics,
}

impl RegistrationFlow {
    pub fn new(
        verifier: Arc<AuthVerifier>,
        store: Arc<dyn KeyStore>,
        sessions: Arc<SessionCodec>,
        metrics: RelayMetrics,
    ) -> Self {
        Self {
            verifier,
            store,
            sessions,
            metrics,
        }
    }

    /// Verify a login assertion, create the user on first login and issue a session.
    ///
    /// Nothing is written unless verification succeeds.
    #[track_caller]
    pub async fn on_login(
        &self,
        assertion: &BTreeMap<String, String>,
    ) -> RelayErrorResult<LoginOutcome> {
        let identity = self.verifier.authenticate(assertion).map_err(|source| {
            warn!("Login rejected: {}", source.reason());
            self.metrics.login_rejected(source.reason());
            RelayError::AuthInvalid {
                source,
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let user = self
            .store
            .create_if_absent(identity.id, &identity.first_name)
            .await?;

        let session_token =
            self.sessions
                .issue(user.id)
                .map_err(|source| RelayError::Session {
                    source,
                    location: ErrorLocation::from(Location::caller()),
                })?;

        info!(
            "User {} logged in ({})",
            user.id,
            if user.is_pending() { "pending" } else { "linked" }
        );
        self.metrics.login_succeeded();

        Ok(LoginOutcome {
            user,
            session_token,
        })
    }

    /// Link a pending user to the chat they contacted the bot from.
    ///
    /// Replays, unknown users and already-linked users change nothing.
    pub async fn on_platform_contact(
        &self,
        contact: PlatformContact,
    ) -> RelayErrorResult<ContactOutcome> {
        let outcome = match self.store.get_by_id(contact.user_id).await? {
            None => ContactOutcome::UnknownUser,
            Some(user) if !user.is_pending() => ContactOutcome::AlreadyLinked,
            Some(user) => {
                let key = SendKey::generate();
                let assigned = self
                    .store
                    .assign_destination_and_key(user.id, contact.chat_id, &key)
                    .await?;

                if assigned {
                    ContactOutcome::Linked { key }
                } else {
                    // Another contact for the same user won the assignment
                    ContactOutcome::AlreadyLinked
                }
            }
        };

        match &outcome {
            ContactOutcome::Linked { key } => info!(
                "User {} linked to chat {} with key {}",
                contact.user_id,
                contact.chat_id,
                key.redacted()
            ),
            other => debug!(
                "Contact from user {} ignored: {}",
                contact.user_id,
                other.label()
            ),
        }
        self.metrics.contact_handled(outcome.label());

        Ok(outcome)
    }
}
