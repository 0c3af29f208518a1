pub mod build_info;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "rupeewise=info";

/// Initializes the global tracing subscriber, logging to stderr.
///
/// Directives come from `RUST_LOG` when it is set and parses; otherwise
/// `rupeewise=info` applies.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let filter = tracing_filter(directives.as_deref());

        // A host process may already own the global subscriber.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

fn tracing_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}
