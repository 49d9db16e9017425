//! Process-wide tracing subscriber for the server binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "info,actix_web=info,sqlx=warn,sea_orm=warn";
const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

/// JSON lines by default; `LOG_FORMAT=pretty` switches to human-readable
/// output for local runs. `RUST_LOG` overrides the level filter.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let pretty = std::env::var(LOG_FORMAT_VAR)
        .map(|v| v.eq_ignore_ascii_case("pretty"))
        .unwrap_or(false);

    let base = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    let registry = tracing_subscriber::registry().with(env_filter);
    if pretty {
        registry.with(base.with_ansi(true)).init();
    } else {
        registry.with(base.with_ansi(false).json()).init();
    }
}
