use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fields;

/// Transaction doctypes that carry tax-identity fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DocKind {
    #[serde(rename = "Quotation")]
    Quotation,
    #[serde(rename = "Sales Order")]
    SalesOrder,
    #[serde(rename = "Delivery Note")]
    DeliveryNote,
    #[serde(rename = "Sales Invoice")]
    SalesInvoice,
    #[serde(rename = "Purchase Order")]
    PurchaseOrder,
    #[serde(rename = "Purchase Receipt")]
    PurchaseReceipt,
    #[serde(rename = "Purchase Invoice")]
    PurchaseInvoice,
    #[serde(rename = "Stock Entry")]
    StockEntry,
    #[serde(rename = "Subcontracting Order")]
    SubcontractingOrder,
    #[serde(rename = "Subcontracting Receipt")]
    SubcontractingReceipt,
}

/// Grouping that decides which address/GSTIN fields a kind carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindClass {
    CustomerFacing,
    InternalTransfer,
    Subcontracting,
    SupplierFacing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartyType {
    Customer,
    Supplier,
}

impl PartyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartyType::Customer => "Customer",
            PartyType::Supplier => "Supplier",
        }
    }

    /// Key under which the party is sent to the host (`customer` / `supplier`).
    pub fn key(&self) -> &'static str {
        match self {
            PartyType::Customer => fields::CUSTOMER,
            PartyType::Supplier => fields::SUPPLIER,
        }
    }
}

impl DocKind {
    pub const ALL: [DocKind; 10] = [
        DocKind::Quotation,
        DocKind::SalesOrder,
        DocKind::DeliveryNote,
        DocKind::SalesInvoice,
        DocKind::PurchaseOrder,
        DocKind::PurchaseReceipt,
        DocKind::PurchaseInvoice,
        DocKind::StockEntry,
        DocKind::SubcontractingOrder,
        DocKind::SubcontractingReceipt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocKind::Quotation => "Quotation",
            DocKind::SalesOrder => "Sales Order",
            DocKind::DeliveryNote => "Delivery Note",
            DocKind::SalesInvoice => "Sales Invoice",
            DocKind::PurchaseOrder => "Purchase Order",
            DocKind::PurchaseReceipt => "Purchase Receipt",
            DocKind::PurchaseInvoice => "Purchase Invoice",
            DocKind::StockEntry => "Stock Entry",
            DocKind::SubcontractingOrder => "Subcontracting Order",
            DocKind::SubcontractingReceipt => "Subcontracting Receipt",
        }
    }

    /// Parse a doctype name. Accepts the host spelling ("Sales Invoice") and
    /// the compact one ("SalesInvoice", "sales_invoice").
    pub fn parse(s: &str) -> Option<Self> {
        let norm: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        DocKind::ALL.into_iter().find(|k| {
            let candidate: String = k
                .as_str()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .map(|c| c.to_ascii_lowercase())
                .collect();
            candidate == norm
        })
    }

    pub fn class(&self) -> KindClass {
        match self {
            DocKind::Quotation
            | DocKind::SalesOrder
            | DocKind::DeliveryNote
            | DocKind::SalesInvoice => KindClass::CustomerFacing,
            DocKind::StockEntry => KindClass::InternalTransfer,
            DocKind::SubcontractingOrder | DocKind::SubcontractingReceipt => {
                KindClass::Subcontracting
            }
            DocKind::PurchaseOrder | DocKind::PurchaseReceipt | DocKind::PurchaseInvoice => {
                KindClass::SupplierFacing
            }
        }
    }

    pub fn is_customer_facing(&self) -> bool {
        self.class() == KindClass::CustomerFacing
    }

    pub fn party_type(&self) -> PartyType {
        if self.is_customer_facing() {
            PartyType::Customer
        } else {
            PartyType::Supplier
        }
    }

    /// Field holding the party on the record. Quotations use `party_name`
    /// since the party may be a lead.
    pub fn party_fieldname(&self) -> &'static str {
        match self {
            DocKind::Quotation => fields::PARTY_NAME,
            other => other.party_type().key(),
        }
    }

    /// The authoritative date field for this kind.
    pub fn date_field(&self) -> &'static str {
        match self {
            DocKind::Quotation
            | DocKind::SalesOrder
            | DocKind::PurchaseOrder
            | DocKind::SubcontractingOrder => fields::TRANSACTION_DATE,
            DocKind::DeliveryNote
            | DocKind::SalesInvoice
            | DocKind::PurchaseReceipt
            | DocKind::PurchaseInvoice
            | DocKind::StockEntry
            | DocKind::SubcontractingReceipt => fields::POSTING_DATE,
        }
    }

    /// Party GSTIN whose registry status is tracked.
    pub fn party_gstin_field(&self) -> &'static str {
        if self.is_customer_facing() {
            fields::BILLING_ADDRESS_GSTIN
        } else {
            fields::SUPPLIER_GSTIN
        }
    }

    /// Kinds edited as regular buy/sell transactions (status validation and
    /// the overseas gate apply to these).
    pub fn is_trade_transaction(&self) -> bool {
        matches!(
            self.class(),
            KindClass::CustomerFacing | KindClass::SupplierFacing
        )
    }

    /// Kinds whose supplier change pulls party details for subcontracting.
    pub fn is_subcontracting_movement(&self) -> bool {
        matches!(
            self.class(),
            KindClass::InternalTransfer | KindClass::Subcontracting
        )
    }

    pub fn supports_ecommerce(&self) -> bool {
        matches!(
            self,
            DocKind::SalesInvoice | DocKind::SalesOrder | DocKind::DeliveryNote
        )
    }

    /// Kinds that accept free-text port codes.
    pub fn ignores_port_code_validation(&self) -> bool {
        matches!(self, DocKind::SalesInvoice | DocKind::DeliveryNote)
    }
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_host_and_compact_spellings() {
        assert_eq!(DocKind::parse("Sales Invoice"), Some(DocKind::SalesInvoice));
        assert_eq!(DocKind::parse("SalesInvoice"), Some(DocKind::SalesInvoice));
        assert_eq!(
            DocKind::parse("subcontracting_receipt"),
            Some(DocKind::SubcontractingReceipt)
        );
        assert_eq!(DocKind::parse("POS Invoice"), None);
    }

    #[test]
    fn party_fields_follow_kind() {
        assert_eq!(DocKind::Quotation.party_fieldname(), "party_name");
        assert_eq!(DocKind::SalesOrder.party_fieldname(), "customer");
        assert_eq!(DocKind::StockEntry.party_fieldname(), "supplier");
        assert_eq!(DocKind::PurchaseInvoice.party_type(), PartyType::Supplier);
    }

    #[test]
    fn orders_use_transaction_date() {
        assert_eq!(DocKind::SalesOrder.date_field(), "transaction_date");
        assert_eq!(DocKind::SubcontractingOrder.date_field(), "transaction_date");
        assert_eq!(DocKind::SalesInvoice.date_field(), "posting_date");
        assert_eq!(DocKind::StockEntry.date_field(), "posting_date");
    }

    #[test]
    fn serde_uses_doctype_names() {
        let s = serde_json::to_string(&DocKind::PurchaseReceipt).unwrap();
        assert_eq!(s, "\"Purchase Receipt\"");
        let k: DocKind = serde_json::from_str("\"Stock Entry\"").unwrap();
        assert_eq!(k, DocKind::StockEntry);
    }
}
