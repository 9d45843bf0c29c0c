//! gsync-remote
//!
//! Outbound service boundary.
//!
//! The engine talks to three host services, each behind its own port so
//! sessions can run against in-memory fakes:
//! - [`GstDetailsService`]: tax-identity reconciliation
//! - [`GstinLookup`]: registry status of a GSTIN as of a date
//! - [`PartyDetailsService`]: supplier details for subcontracting movements
//!
//! [`FrappeClient`] implements all three over the host's method API.
//! It does **not** retry; failures propagate to the caller unchanged.

mod frappe;
mod ports;

pub use frappe::{
    FrappeClient, METHOD_GET_GSTIN_STATUS, METHOD_GET_GST_DETAILS, METHOD_GET_PARTY_DETAILS,
};
pub use ports::{GstDetailsService, GstinLookup, PartyDetailsService};
