use gsync_schemas::{fields, TransactionRecord};

use crate::{is_same_gstin_stock_entry, updates_place_of_supply};

/// Why a trigger was dropped without scheduling anything.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Party details are being written onto the record.
    UpdatingPartyDetails,
    /// A reconciliation result is being written onto the record.
    ApplyingResult,
    NoCompany,
    /// Neither a party nor a same-GSTIN stock movement.
    NoParty,
}

/// Outcome of offering a trigger to the coordinator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Admission {
    Skipped(SkipReason),
    /// A cycle is already pending; this trigger rides along with it.
    Coalesced,
    /// A new cycle is pending. `company` is captured now, before the cycle
    /// waits for outstanding work.
    Started { company: String },
}

/// What a pending cycle consumes when it is about to build its request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleTicket {
    pub company: String,
    pub update_place_of_supply: bool,
}

/// Per-record coordinator state. One instance per editing session.
#[derive(Debug, Default)]
pub struct ReconcileState {
    cycle_pending: bool,
    update_place_of_supply: bool,
    applying_result: bool,
    updating_party_details: bool,
    coalesced_triggers: u64,
}

impl ReconcileState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a field-change trigger.
    ///
    /// Guards run first, then party resolution, then the place-of-supply
    /// mark (which survives coalescing), then the pending check.
    pub fn admit(&mut self, record: &TransactionRecord, trigger: &str) -> Admission {
        if self.updating_party_details {
            return Admission::Skipped(SkipReason::UpdatingPartyDetails);
        }
        let company = match record.str(fields::COMPANY) {
            Some(c) => c.to_string(),
            None => return Admission::Skipped(SkipReason::NoCompany),
        };
        if self.applying_result {
            return Admission::Skipped(SkipReason::ApplyingResult);
        }

        let has_party = record.flag(record.kind.party_fieldname());
        if !(has_party || is_same_gstin_stock_entry(record)) {
            return Admission::Skipped(SkipReason::NoParty);
        }

        if updates_place_of_supply(trigger) {
            self.update_place_of_supply = true;
        }

        if self.cycle_pending {
            self.coalesced_triggers += 1;
            return Admission::Coalesced;
        }
        self.cycle_pending = true;
        Admission::Started { company }
    }

    /// Close the pending window: later triggers start a new cycle. Consumes
    /// the place-of-supply mark.
    pub fn take_cycle(&mut self, company: String) -> CycleTicket {
        self.cycle_pending = false;
        CycleTicket {
            company,
            update_place_of_supply: std::mem::take(&mut self.update_place_of_supply),
        }
    }

    pub fn is_cycle_pending(&self) -> bool {
        self.cycle_pending
    }

    /// Triggers absorbed by an already-pending cycle over the session.
    pub fn coalesced_triggers(&self) -> u64 {
        self.coalesced_triggers
    }

    pub fn begin_apply(&mut self) {
        self.applying_result = true;
    }

    pub fn end_apply(&mut self) {
        self.applying_result = false;
    }

    pub fn is_applying(&self) -> bool {
        self.applying_result
    }

    pub fn begin_party_details(&mut self) {
        self.updating_party_details = true;
    }

    pub fn end_party_details(&mut self) {
        self.updating_party_details = false;
    }

    pub fn is_updating_party_details(&self) -> bool {
        self.updating_party_details
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gsync_schemas::DocKind;

    fn invoice() -> TransactionRecord {
        TransactionRecord::new(DocKind::SalesInvoice)
            .with(fields::COMPANY, "ACME India")
            .with(fields::CUSTOMER, "Globex")
    }

    #[test]
    fn first_trigger_starts_and_second_coalesces() {
        let mut st = ReconcileState::new();
        let rec = invoice();
        assert_eq!(
            st.admit(&rec, fields::TAX_CATEGORY),
            Admission::Started {
                company: "ACME India".into()
            }
        );
        assert!(st.is_cycle_pending());
        assert_eq!(st.admit(&rec, fields::PLACE_OF_SUPPLY), Admission::Coalesced);
        assert_eq!(st.coalesced_triggers(), 1);
    }

    #[test]
    fn place_of_supply_mark_survives_coalescing() {
        let mut st = ReconcileState::new();
        let rec = invoice();
        st.admit(&rec, fields::TAX_CATEGORY);
        st.admit(&rec, fields::CUSTOMER_ADDRESS);
        let ticket = st.take_cycle("ACME India".into());
        assert!(ticket.update_place_of_supply);
        assert!(!st.is_cycle_pending());

        // consumed: next cycle starts clean
        st.admit(&rec, fields::TAX_CATEGORY);
        assert!(!st.take_cycle("ACME India".into()).update_place_of_supply);
    }

    #[test]
    fn missing_company_skips() {
        let mut st = ReconcileState::new();
        let rec = TransactionRecord::new(DocKind::SalesInvoice).with(fields::CUSTOMER, "Globex");
        assert_eq!(
            st.admit(&rec, fields::TAX_CATEGORY),
            Admission::Skipped(SkipReason::NoCompany)
        );
        assert!(!st.is_cycle_pending());
    }

    #[test]
    fn missing_party_skips() {
        let mut st = ReconcileState::new();
        let rec = TransactionRecord::new(DocKind::PurchaseInvoice).with(fields::COMPANY, "ACME India");
        assert_eq!(
            st.admit(&rec, fields::SUPPLIER_ADDRESS),
            Admission::Skipped(SkipReason::NoParty)
        );
    }

    #[test]
    fn applying_result_blocks_every_trigger() {
        let mut st = ReconcileState::new();
        let rec = invoice();
        st.begin_apply();
        for trigger in [fields::PLACE_OF_SUPPLY, fields::TAX_CATEGORY, fields::CUSTOMER_ADDRESS] {
            assert_eq!(
                st.admit(&rec, trigger),
                Admission::Skipped(SkipReason::ApplyingResult)
            );
        }
        st.end_apply();
        assert!(matches!(st.admit(&rec, fields::TAX_CATEGORY), Admission::Started { .. }));
    }

    #[test]
    fn party_details_update_blocks_triggers() {
        let mut st = ReconcileState::new();
        st.begin_party_details();
        assert_eq!(
            st.admit(&invoice(), fields::TAX_CATEGORY),
            Admission::Skipped(SkipReason::UpdatingPartyDetails)
        );
        st.end_party_details();
        assert!(!st.is_updating_party_details());
    }

    #[test]
    fn same_gstin_stock_entry_needs_no_party() {
        let mut st = ReconcileState::new();
        let rec = TransactionRecord::new(DocKind::StockEntry)
            .with(fields::COMPANY, "ACME India")
            .with(fields::PURPOSE, fields::PURPOSE_MATERIAL_ISSUE);
        assert!(matches!(st.admit(&rec, fields::BILL_FROM_ADDRESS), Admission::Started { .. }));
    }
}
