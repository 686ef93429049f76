//! HTTP front end for decant.
//!
//! Exposes `GET /api/extract`, which runs the extraction [`Pipeline`]
//! for one URL and returns the rendered content as JSON.
//!
//! [`Pipeline`]: decant_core::Pipeline

pub mod config;
pub mod handlers;
pub mod routes;
pub mod types;

pub use config::{LogFormat, ServerConfig};
pub use handlers::AppState;
pub use routes::{build_app, create_router, with_timeout};

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "decant_server=info,decant_core=info,tower_http=info";

/// Install the global tracing subscriber.
pub fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    match format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }
}
