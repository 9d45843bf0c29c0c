//! gsync-runtime
//!
//! Editing-session runtime. One [`FormSession`] per open record owns:
//! - the record and the host-facing [`FormView`]
//! - the coordinator state and registry cache (never shared across records)
//! - a counter of outstanding outbound work
//!
//! Every field change is routed to the handlers registered for the record's
//! kind. Reconciliation cycles wait for outstanding lookups before building
//! their request, and write their result back without re-triggering.
//!
//! Locks are plain `std::sync::Mutex` and are never held across an await.

mod inflight;
mod session;
mod view;

pub use inflight::{InflightGuard, InflightTracker};
pub use session::{FormSession, Services};
pub use view::FormView;
