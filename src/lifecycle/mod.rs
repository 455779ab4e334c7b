//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → wait_for_signal() resolves
//!
//! Shutdown (shutdown.rs):
//!     trigger() → every subscriber wakes → server stops accepting → drain
//! ```
//!
//! # Design Decisions
//! - The server listens to both sources; whichever fires first wins
//! - In-flight requests are drained by axum's graceful shutdown

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::wait_for_signal;
