use chrono::NaiveDate;
use gsync_schemas::{
    fields, format_user_date, parse_date, GstError, GstinStatus, RegistryEntry, TransactionRecord,
};

/// Inputs the validator needs from the record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationContext {
    /// Value of the kind's authoritative date field.
    pub transaction_date: Option<NaiveDate>,
    pub gstin_label: String,
    pub date_label: String,
}

impl ValidationContext {
    pub fn for_record(record: &TransactionRecord, gstin_field: &str) -> Self {
        let date_field = record.kind.date_field();
        Self {
            transaction_date: record.str(date_field).and_then(parse_date),
            gstin_label: fields::label(gstin_field),
            date_label: fields::label(date_field),
        }
    }
}

fn user_date(d: Option<NaiveDate>) -> String {
    d.map(format_user_date)
        .unwrap_or_else(|| "an unknown date".to_string())
}

/// Check a registry entry against the transaction date.
///
/// Without a transaction date only the registration-present and status rules
/// can fire. A cancelled entry with no cancellation date is treated as
/// cancelled from the start.
pub fn validate_gstin_status(entry: &RegistryEntry, ctx: &ValidationContext) -> Result<(), GstError> {
    let registration_violated = match (entry.registration_date, ctx.transaction_date) {
        (None, _) => true,
        (Some(registered), Some(date)) => date < registered,
        (Some(_), None) => false,
    };
    if registration_violated {
        let on = user_date(entry.registration_date);
        return Err(GstError::InvalidParty {
            message: format!(
                "{} is Registered on {}. Please make sure that the {} is on or after {}",
                ctx.gstin_label, on, ctx.date_label, on
            ),
        });
    }

    if entry.status == GstinStatus::Cancelled {
        let cancelled_in_effect = match (ctx.transaction_date, entry.cancelled_date) {
            (Some(date), Some(cancelled)) => date >= cancelled,
            (Some(_), None) => true,
            (None, _) => false,
        };
        if cancelled_in_effect {
            let from = user_date(entry.cancelled_date);
            return Err(GstError::InvalidParty {
                message: format!(
                    "{} is Cancelled from {}. Please make sure that the {} is before {}",
                    ctx.gstin_label, from, ctx.date_label, from
                ),
            });
        }
    }

    if !entry.status.is_known() {
        return Err(GstError::InvalidStatus {
            message: format!("Status of {} is {}", ctx.gstin_label, entry.status),
        });
    }

    Ok(())
}

/// Text shown under the GSTIN field.
pub fn status_description(entry: &RegistryEntry) -> String {
    match entry.last_updated_on {
        Some(at) => format!(
            "Status: {} (Updated on {})",
            entry.status,
            format_user_date(at.date())
        ),
        None => format!("Status: {}", entry.status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gsync_schemas::DocKind;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn context_uses_kind_date_field() {
        let rec = TransactionRecord::new(DocKind::PurchaseOrder)
            .with(fields::TRANSACTION_DATE, "2023-03-04")
            .with(fields::POSTING_DATE, "1999-01-01");
        let ctx = ValidationContext::for_record(&rec, fields::SUPPLIER_GSTIN);
        assert_eq!(ctx.transaction_date, Some(d(2023, 3, 4)));
        assert_eq!(ctx.date_label, "Date");
        assert_eq!(ctx.gstin_label, "Supplier GSTIN");
    }

    #[test]
    fn missing_date_only_checks_registration_and_status() {
        let ctx = ValidationContext {
            transaction_date: None,
            gstin_label: "Supplier GSTIN".into(),
            date_label: "Posting Date".into(),
        };
        let cancelled = RegistryEntry::new("X", GstinStatus::Cancelled)
            .registered_on(d(2020, 1, 1))
            .cancelled_on(d(2021, 1, 1));
        assert!(validate_gstin_status(&cancelled, &ctx).is_ok());

        let unregistered = RegistryEntry::new("X", GstinStatus::Active);
        assert!(validate_gstin_status(&unregistered, &ctx).is_err());
    }

    #[test]
    fn cancelled_without_cancel_date_fails() {
        let ctx = ValidationContext {
            transaction_date: Some(d(2023, 1, 1)),
            gstin_label: "Supplier GSTIN".into(),
            date_label: "Posting Date".into(),
        };
        let entry = RegistryEntry::new("X", GstinStatus::Cancelled).registered_on(d(2020, 1, 1));
        let err = validate_gstin_status(&entry, &ctx).unwrap_err();
        assert!(err.message().contains("an unknown date"));
    }

    #[test]
    fn description_includes_update_date_when_known() {
        let entry = RegistryEntry::new("X", GstinStatus::Active)
            .updated_at(d(2024, 1, 5).and_hms_opt(10, 0, 0).unwrap());
        assert_eq!(status_description(&entry), "Status: Active (Updated on 05-01-2024)");
        let bare = RegistryEntry::new("X", GstinStatus::Other("Suspended".into()));
        assert_eq!(status_description(&bare), "Status: Suspended");
    }
}
