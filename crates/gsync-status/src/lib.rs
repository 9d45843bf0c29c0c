//! gsync-status
//!
//! Registry status of party GSTINs:
//! - record-scoped cache of registry lookups (one per GSTIN per editing
//!   session, shared by concurrent checks)
//! - status description shown next to the GSTIN field
//! - validation of registration / cancellation dates and status against the
//!   transaction date
//!
//! Rules are checked in order and the first violation wins:
//!
//! | # | Condition                                             | Error           |
//! |---|-------------------------------------------------------|-----------------|
//! | 1 | no registration date, or date < registration date     | `InvalidParty`  |
//! | 2 | status Cancelled and date >= cancelled date           | `InvalidParty`  |
//! | 3 | status not Active / Cancelled                         | `InvalidStatus` |
//!
//! No IO. Lookups themselves are performed by the runtime and passed in.

mod cache;
mod validate;

pub use cache::{StatusCache, StatusSlot};
pub use validate::{status_description, validate_gstin_status, ValidationContext};
