use std::sync::OnceLock;

use gsync_schemas::GstError;
use regex::Regex;

const CHECK_CHARS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn gstin_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]$").expect("static regex")
    })
}

/// Ids issued to transporters without a GSTIN.
fn transporter_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^88[0-9A-Z]{13}$").expect("static regex"))
}

/// Mod-36 check character over the first 14 characters of a GSTIN-shaped id.
/// `None` if the input is shorter than 14 or contains other characters.
pub fn gstin_check_char(id: &str) -> Option<char> {
    let bytes = id.as_bytes();
    if bytes.len() < 14 {
        return None;
    }
    let mut sum: u32 = 0;
    for (i, b) in bytes[..14].iter().enumerate() {
        let code = CHECK_CHARS.iter().position(|c| c == b)? as u32;
        let factor = if i % 2 == 0 { 1 } else { 2 };
        let product = code * factor;
        sum += product / 36 + product % 36;
    }
    let check = (36 - sum % 36) % 36;
    Some(CHECK_CHARS[check as usize] as char)
}

/// Format check for `gst_transporter_id`. Blank ids pass.
pub fn validate_transporter_id(raw: &str) -> Result<(), GstError> {
    let id = raw.trim().to_ascii_uppercase();
    if id.is_empty() {
        return Ok(());
    }

    if id.len() != 15 {
        return Err(GstError::TransportIdFormat {
            message: format!("GST Transporter ID {id} should be 15 characters long"),
        });
    }

    if !gstin_pattern().is_match(&id) && !transporter_pattern().is_match(&id) {
        return Err(GstError::TransportIdFormat {
            message: format!("GST Transporter ID {id} does not match the GSTIN format"),
        });
    }

    let expected = gstin_check_char(&id);
    if expected != id.chars().last() {
        return Err(GstError::TransportIdFormat {
            message: format!("Invalid GST Transporter ID {id}: check digit does not match"),
        });
    }

    Ok(())
}
