//! gsync-schemas
//!
//! Shared data model for tax-identity synchronization:
//! - transaction kinds and their field layout
//! - the mutable transaction record
//! - registry (GSTIN) entries
//! - process-wide GST settings
//! - the user-facing error taxonomy
//!
//! Plain data. No IO, no async.

mod error;
pub mod fields;
mod kind;
mod record;
mod registry;
mod settings;

pub use error::GstError;
pub use kind::{DocKind, KindClass, PartyType};
pub use record::{is_truthy, FieldMap, TransactionRecord};
pub use registry::{format_user_date, parse_date, GstinStatus, RegistryEntry};
pub use settings::GstSettings;
