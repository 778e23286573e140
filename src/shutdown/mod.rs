//! Cooperative cancellation and graceful shutdown.
//!
//! - [`CancelToken`]: a cloneable, idempotent cancellation signal that
//!   blocking waits can select on.
//! - [`Grace`]: drives an orderly shutdown once a termination request
//!   arrives, with a force-quit on a second request and an optional timeout.
//!
//! Wiring OS signals to the termination channel is left to the host.

mod grace;
mod token;

pub use grace::{Grace, GraceOutcome};
pub use token::CancelToken;
