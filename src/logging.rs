//! Diagnostic logging to stderr.
//!
//! Quiet by default (`warn`); `-v` raises this crate to `debug`.
//! `RUST_LOG` takes precedence over both:
//!
//! ```bash
//! RUST_LOG=wow_globals::fetch=debug wow-globals update
//! ```

use std::sync::Once;

use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "warn,wow_globals=debug";

/// HH:MM:SS.mmm
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

fn filter_directives(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    }
}

/// Install the global subscriber. Only the first call takes effect.
pub fn init(verbose: bool) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(filter_directives(verbose))
        };

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(std::env::var_os("NO_COLOR").is_none())
            .with_target(verbose)
            .with_timer(CompactTime)
            .with_filter(filter);

        // A subscriber installed by an embedding program wins.
        let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
    });
}
