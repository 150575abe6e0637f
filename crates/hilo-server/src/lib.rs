//! Service shell for hilo: upstream pollers and the HTTP read API.
//!
//! The prediction core lives in `hilo-predict` and `hilo-session`; this crate
//! only moves data in and out of it.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Plain-text banner |
//! | GET | `/health` | Health check |
//! | GET | `/api/taixiu` | Latest snapshot of the classic table |
//! | GET | `/api/taixiumd5` | Latest snapshot of the MD5 table |
//! | GET | `/api/history` | Both histories, most recent first |

/// Axum router and handlers.
pub mod api;
/// Service configuration.
pub mod config;
/// Error types for the service shell.
pub mod error;
/// Per-variant upstream poller.
pub mod poller;
/// Process wiring: pollers, listener, shutdown.
pub mod runtime;
/// Tracing subscriber setup.
pub mod telemetry;
/// Upstream notification format and event extraction.
pub mod upstream;

/// Re-export of [`api::create_router`].
pub use api::create_router;
/// Re-export of [`config::ServerConfig`].
pub use config::ServerConfig;
/// Re-exports of [`error::ServerError`] and [`error::ServerResult`].
pub use error::{ServerError, ServerResult};
/// Re-export of [`poller::Poller`].
pub use poller::Poller;
/// Re-export of [`runtime::serve`].
pub use runtime::serve;
