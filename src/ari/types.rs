use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// ARI certificate identifier
///
/// Holds the issuer's key identifier and the serial number content octets,
/// both taken from a single parsed certificate. The values cannot be changed
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CertificateIdentifier {
    authority_key_id: Vec<u8>,
    serial_number: Vec<u8>,
}

impl CertificateIdentifier {
    /// Create an identifier from already-extracted octets
    pub fn new(authority_key_id: Vec<u8>, serial_number: Vec<u8>) -> Self {
        Self {
            authority_key_id,
            serial_number,
        }
    }

    /// Key identifier octets from the Authority Key Identifier extension
    pub fn authority_key_id(&self) -> &[u8] {
        &self.authority_key_id
    }

    /// Content octets of the DER-encoded serial number
    pub fn serial_number(&self) -> &[u8] {
        &self.serial_number
    }

    /// `base64url(AKI) "." base64url(serial)`, unpadded
    pub fn encode(&self) -> String {
        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&self.authority_key_id),
            URL_SAFE_NO_PAD.encode(&self.serial_number)
        )
    }
}

impl fmt::Display for CertificateIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// ACME directory document
///
/// Only the renewal-info resource is read; every other field is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiscoveryDirectory {
    #[serde(rename = "renewalInfo")]
    pub renewal_info: String,
}

/// Suggested renewal window
///
/// Timestamps are passed through exactly as the server sent them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedWindow {
    pub start: String,
    pub end: String,
}

/// Renewal information for one certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewalInfo {
    #[serde(
        rename = "explanationURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub explanation_url: Option<String>,
    #[serde(rename = "suggestedWindow")]
    pub suggested_window: SuggestedWindow,
}
