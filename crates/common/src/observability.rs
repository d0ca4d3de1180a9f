//! Logging setup
//!
//! All crates log through `tracing` macros; binaries and tests call
//! [`init_tracing`] once to install a `fmt` subscriber.

use std::sync::atomic::{AtomicBool, Ordering};

use hotjar_domain::LoggingConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LICENSE_NOTICE_EMITTED: AtomicBool = AtomicBool::new(false);

const LICENSE_NOTICE: &str = "This Hotjar integration is licensed under the Business Source \
License 1.1 (BSL 1.1). Production use by for-profit organizations requires a commercial license.";

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `config.level`. Returns `false` when a subscriber was
/// already installed (for example by another test), which is not an error.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    if config.json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init().is_ok()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init().is_ok()
    }
}

/// Log the licensing notice the first time it is called in this process.
///
/// Returns `true` only for the call that actually logged.
pub fn emit_license_notice_once() -> bool {
    if LICENSE_NOTICE_EMITTED.swap(true, Ordering::SeqCst) {
        return false;
    }
    tracing::warn!(target: "hotjar::license", "{LICENSE_NOTICE}");
    true
}
