use std::fmt;

/// User-facing failures raised at the point of an offending field change.
///
/// Each variant carries the message shown to the user; the title is fixed per
/// variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GstError {
    /// Transaction date falls outside the party GSTIN's registration window.
    InvalidParty { message: String },
    /// Registry reports a status other than Active / Cancelled.
    InvalidStatus { message: String },
    /// A GST setting must be enabled before this transaction is allowed.
    ConfigurationRequired { message: String },
    /// GST transporter id is malformed.
    TransportIdFormat { message: String },
}

impl GstError {
    pub fn title(&self) -> &'static str {
        match self {
            GstError::InvalidParty { .. } => "Invalid Party GSTIN",
            GstError::InvalidStatus { .. } => "Invalid GSTIN Status",
            GstError::ConfigurationRequired { .. } => "Configuration Required",
            GstError::TransportIdFormat { .. } => "Invalid GST Transporter ID",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            GstError::InvalidParty { message }
            | GstError::InvalidStatus { message }
            | GstError::ConfigurationRequired { message }
            | GstError::TransportIdFormat { message } => message.as_str(),
        }
    }
}

impl fmt::Display for GstError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.message())
    }
}

impl std::error::Error for GstError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_title_and_message() {
        let err = GstError::InvalidStatus {
            message: "Status of Supplier GSTIN is Suspended".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid GSTIN Status: Status of Supplier GSTIN is Suspended"
        );
    }

    #[test]
    fn converts_into_anyhow_and_back() {
        let err = GstError::ConfigurationRequired {
            message: "enable it".into(),
        };
        let any: anyhow::Error = err.clone().into();
        assert_eq!(any.downcast_ref::<GstError>(), Some(&err));
    }
}
