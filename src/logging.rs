//! Logging initialization.
//!
//! Logs always go to stderr so they never interleave with a report written
//! to stdout. `RUST_LOG` overrides the profile's default filter.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Human-readable, warnings and above.
    #[default]
    Quiet,
    /// Human-readable, debug and above.
    Verbose,
    /// JSON lines, info and above.
    Json,
}

impl Profile {
    fn default_filter(&self) -> &'static str {
        match self {
            Profile::Quiet => "neardup=warn",
            Profile::Verbose => "neardup=debug",
            Profile::Json => "neardup=info",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Installs the global subscriber. Later calls are no-ops.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_filter()));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);
        let installed = match profile {
            Profile::Json => builder.json().try_init(),
            _ => builder.try_init(),
        };
        if let Err(e) = installed {
            eprintln!("neardup: logging not initialized: {e}");
        }
    });
}
