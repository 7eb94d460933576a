pub mod error;
pub mod identity;
pub mod login_verifier;
pub mod session_claims;
pub mod session_codec;

pub use error::{AuthError, Result};
pub use identity::Identity;
pub use login_verifier::{AuthVerifier, MAX_AUTH_AGE_SECS, auth_secret, data_check_string};
pub use session_claims::SessionClaims;
pub use session_codec::{DEFAULT_SESSION_MAX_AGE_SECS, SessionCodec};

#[cfg(test)]
mod tests;
