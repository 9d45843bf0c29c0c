//! gsync-reconcile
//!
//! Tax-identity reconciliation: which field changes trigger a refresh of the
//! GST details, how bursts of triggers collapse into one outbound request,
//! and what that request carries.
//!
//! Architectural decisions:
//! - Monitored fields are a fixed table per kind class
//! - At most one cycle pending per record; later triggers coalesce into it
//! - `update_place_of_supply` is sticky until the pending cycle consumes it
//! - Triggers are ignored while a result (or party details) is being written
//!   back, so a write-back never schedules another cycle
//!
//! Deterministic, pure logic. No IO. The runtime drives the async cycle.

mod dispatch;
mod request;
mod state;

pub use dispatch::{is_monitored, monitored_fields, updates_place_of_supply};
pub use request::{
    build_party_details_request, build_request, is_inward_stock_entry, is_same_gstin_stock_entry,
    GstDetailsArgs, PartyDetailsArgs, PartyDetailsRequest, ReconcileRequest,
};
pub use state::{Admission, CycleTicket, ReconcileState, SkipReason};
