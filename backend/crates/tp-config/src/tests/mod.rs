
use std::env;

use tempfile::TempDir;

pub(crate) const VALID_BOT_TOKEN: &str = "123456789:ABCDefGHIIklmnOpQrsTUVWXyZ123456789";
pub(crate) const VALID_SECRET_KEY: &str = "0123456789abcdef0123456789abcdef";

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Create a temp config directory and set TELEPUSH_CONFIG_DIR
pub(crate) fn setup_config_dir() -> (TempDir, EnvGuard) {
    let temp = TempDir::new().unwrap();
    let guard = EnvGuard::set("TELEPUSH_CONFIG_DIR", temp.path().to_str().unwrap());
    (temp, guard)
}

/// Set every variable without a usable default
pub(crate) fn set_required_env() -> Vec<EnvGuard> {
    vec![
        EnvGuard::set("TELEPUSH_BOT_TOKEN", VALID_BOT_TOKEN),
        EnvGuard::set("TELEPUSH_BOT_USERNAME", "telepush_bot"),
        EnvGuard::set("TELEPUSH_WEBSITE_URL", "https://push.example.org"),
        EnvGuard::set("TELEPUSH_SECRET_KEY", VALID_SECRET_KEY),
    ]
}
