//! gsync-testkit
//!
//! In-memory stand-ins for the host services plus record builders, so
//! sessions can be driven end to end without a network.
//!
//! - [`RecordingGstDetails`]: records every reconciliation request and
//!   replies from a queue
//! - [`CountingLookup`]: registry lookups from a fixed table; optionally gated
//!   so a test decides when each lookup completes
//! - [`RecordingPartyDetails`]: records subcontracting party-detail requests
//! - [`Harness`]: a session wired to all three

mod builders;
mod fakes;

pub use builders::{
    active_entry, field_map, purchase_invoice, sales_invoice, stock_entry, subcontracting_receipt,
    Harness, COMPANY,
};
pub use fakes::{CountingLookup, RecordingGstDetails, RecordingPartyDetails};
