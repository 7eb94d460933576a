use crate::Result as DbErrorResult;

use async_trait::async_trait;
use tp_core::{ChatId, SendKey, User};

/// Durable mapping of user id -> send key -> chat.
///
/// Absence is `Ok(None)`, never an error. Implementations must make
/// `create_if_absent` and `assign_destination_and_key` atomic per user id.
#[async_trait]
pub trait KeyStore: Send + Sync {
    async fn get_by_id(&self, id: i64) -> DbErrorResult<Option<User>>;

    async fn get_by_send_key(&self, key: &str) -> DbErrorResult<Option<User>>;

    /// Return the stored user, inserting a pending one first if there is none.
    /// An existing record is returned unchanged (its name is not updated).
    async fn create_if_absent(&self, id: i64, first_name: &str) -> DbErrorResult<User>;

    /// Link the user to a chat and key, only if the user exists and has no key yet.
    /// Returns whether this call performed the assignment.
    async fn assign_destination_and_key(
        &self,
        id: i64,
        chat_id: ChatId,
        key: &SendKey,
    ) -> DbErrorResult<bool>;
}
