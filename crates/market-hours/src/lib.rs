//! Exchange session clocks: which world markets are open right now, and
//! when does that change.
//!
//! The registry holds immutable per-exchange schedules (IANA zone, local
//! open/close, trading weekdays); the evaluator is a pure function from an
//! instant to per-exchange session views, re-run on every display tick.

pub mod registry;
pub mod session;

pub use registry::*;
pub use session::*;
