pub mod connection;
pub mod error;
pub mod key_store;
pub mod repositories;

pub use connection::database::Database;
pub use error::{DbError, Result};
pub use key_store::KeyStore;
pub use repositories::user_repository::UserRepository;
