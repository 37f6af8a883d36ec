use std::sync::Once;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SURVEY_BUILDER_LOG";

static INIT: Once = Once::new();

/// Installs the global fmt subscriber once. Filter comes from
/// `SURVEY_BUILDER_LOG`, defaulting to `info`. Output goes to stderr.
pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
