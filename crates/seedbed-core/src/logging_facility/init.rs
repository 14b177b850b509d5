use serde::Deserialize;
use std::sync::Once;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Output profile, selectable from configuration (`log_profile = "production"`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Human-readable lines on stderr, seedbed crates at debug
    #[default]
    Development,
    /// JSON lines on stderr, seedbed crates at info
    Production,
    /// Nothing is printed; tests install `init_test_capture()` instead
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset
    pub fn default_directive(&self) -> Option<&'static str> {
        match self {
            Profile::Development => Some("seedbed=debug"),
            Profile::Production => Some("seedbed=info"),
            Profile::Test => None,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directive().unwrap_or("off")))
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber for `profile`
///
/// Only the first call in a process has an effect. Log output goes to
/// stderr so command output on stdout stays machine-readable.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(profile.env_filter())
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(profile.env_filter())
                .finish()
                .try_init(),
            Profile::Test => return,
        };
        // Err only if another global subscriber is already in place
        drop(installed);
    });
}
