pub mod build_info;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs the global fmt subscriber. `RUST_LOG` wins when set; otherwise
/// `bank_ledger=info`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("bank_ledger=info"));

        // Another subscriber may already be installed (e.g. by a test harness).
        let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
    });
}
