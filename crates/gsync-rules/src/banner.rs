use gsync_schemas::{DocKind, GstSettings};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadlineColor {
    Blue,
}

/// Dashboard headline shown above the form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Headline {
    pub message: String,
    pub color: HeadlineColor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<HeadlineLink>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HeadlineLink {
    pub label: String,
    pub url: String,
}

pub const DOCUMENT_NAME_DOCS_URL: &str =
    "https://docs.indiacompliance.app/docs/miscellaneous/transaction_validations#document-name";

/// Whether the document name is reported to the GST portal and therefore
/// subject to the 16-character limit.
pub fn is_invoice_no_validation_required(kind: DocKind, settings: &GstSettings) -> bool {
    match kind {
        DocKind::SalesInvoice => true,
        DocKind::PurchaseInvoice => settings.enable_e_waybill_from_pi,
        DocKind::DeliveryNote => settings.enable_e_waybill_from_dn,
        DocKind::PurchaseReceipt => settings.enable_e_waybill_from_pr,
        _ => false,
    }
}

pub fn invoice_no_banner(kind: DocKind, settings: &GstSettings) -> Option<Headline> {
    if !is_invoice_no_validation_required(kind, settings) {
        return None;
    }
    Some(Headline {
        message: "Naming Series should not exceed 16 characters for GST.".to_string(),
        color: HeadlineColor::Blue,
        link: Some(HeadlineLink {
            label: "Know more".to_string(),
            url: DOCUMENT_NAME_DOCS_URL.to_string(),
        }),
    })
}
