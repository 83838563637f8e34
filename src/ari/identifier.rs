//! ARI certificate identifier derivation
//!
//! The identifier is `base64url(keyIdentifier) "." base64url(serial)`, where
//! `keyIdentifier` is the first element of the Authority Key Identifier
//! extension and `serial` is the content of the DER INTEGER encoding of the
//! certificate serial number.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use der::asn1::{AnyRef, IntRef};
use der::{Decode, Encode, Reader, SliceReader, Tag, Tagged};
use oid_registry::OID_X509_EXT_AUTHORITY_KEY_IDENTIFIER;
use tracing::{debug, warn};
use x509_parser::certificate::X509Certificate;

use crate::ari::types::CertificateIdentifier;
use crate::error::{DecodeError, Error};
use crate::types::Result;

/// Dotted form of the Authority Key Identifier extension OID
pub const AUTHORITY_KEY_IDENTIFIER_OID: &str = "2.5.29.35";

/// Extract the key identifier from an Authority Key Identifier extension value
///
/// `extension_value` is the content of the extension's OCTET STRING, i.e. the
/// DER `AuthorityKeyIdentifier ::= SEQUENCE { keyIdentifier [0] ... }`. The
/// content octets of the first element of the SEQUENCE are returned.
pub fn extract_authority_key_id(extension_value: &[u8]) -> Result<Vec<u8>> {
    let mut reader =
        SliceReader::new(extension_value).map_err(|e| asn1_error(extension_value, e))?;
    let seq = AnyRef::decode(&mut reader).map_err(|e| asn1_error(extension_value, e))?;

    if !reader.is_finished() {
        return Err(DecodeError::TrailingData {
            oid: AUTHORITY_KEY_IDENTIFIER_OID.to_string(),
            bytes: extension_value.to_vec(),
        }
        .into());
    }

    if seq.tag() != Tag::Sequence {
        return Err(DecodeError::UnexpectedTag {
            oid: AUTHORITY_KEY_IDENTIFIER_OID.to_string(),
            bytes: extension_value.to_vec(),
            tag: seq.tag().to_string(),
        }
        .into());
    }

    // Anything after the first element is ignored.
    let mut inner = SliceReader::new(seq.value()).map_err(|e| asn1_error(extension_value, e))?;
    let key_id = AnyRef::decode(&mut inner).map_err(|e| asn1_error(extension_value, e))?;
    let key_id = key_id.value().to_vec();

    debug!(
        hex = %hex::encode(&key_id),
        base64 = %URL_SAFE_NO_PAD.encode(&key_id),
        "Authority Key Identifier"
    );

    Ok(key_id)
}

/// Re-encode a serial number as a DER INTEGER and return its content octets
///
/// `raw_serial` holds the two's-complement big-endian serial as stored in the
/// certificate. Redundant sign octets are dropped, while the leading `0x00`
/// required for a positive value with the high bit set is kept.
///
/// Serials that are not minimally encoded in the certificate (e.g.
/// `00 00 01`) are accepted and canonicalised rather than rejected, so such
/// a certificate yields the identifier of the equivalent minimal serial.
/// Stricter X.509 parsers refuse these certificates outright.
pub fn encode_serial(raw_serial: &[u8]) -> Result<Vec<u8>> {
    let minimal = minimal_signed_bytes(raw_serial);

    let encoded = IntRef::new(&minimal)
        .and_then(|int| int.to_der())
        .map_err(|e| encode_error(raw_serial, e))?;
    let integer = AnyRef::from_der(&encoded).map_err(|e| encode_error(raw_serial, e))?;
    let content = integer.value().to_vec();

    debug!(
        hex = %hex::encode(&content),
        base64 = %URL_SAFE_NO_PAD.encode(&content),
        "Serial Number"
    );

    Ok(content)
}

/// Derive the ARI identifier components of `cert`
///
/// If the certificate carries more than one Authority Key Identifier
/// extension, the first one in certificate order is used and a warning is
/// logged. The ARI draft leaves this case undefined.
pub fn derive_identifier(cert: &X509Certificate<'_>) -> Result<CertificateIdentifier> {
    let aki_values = cert
        .tbs_certificate
        .extensions()
        .iter()
        .filter(|ext| ext.oid == OID_X509_EXT_AUTHORITY_KEY_IDENTIFIER)
        .map(|ext| ext.value);

    let aki_value = select_first_extension(aki_values)?;
    let authority_key_id = extract_authority_key_id(aki_value)?;
    let serial_number = encode_serial(cert.tbs_certificate.raw_serial())?;

    Ok(CertificateIdentifier::new(authority_key_id, serial_number))
}

/// Derive the encoded ARI identifier string of `cert`
pub fn derive(cert: &X509Certificate<'_>) -> Result<String> {
    derive_identifier(cert).map(|id| id.encode())
}

fn select_first_extension<'a, I>(mut values: I) -> Result<&'a [u8]>
where
    I: Iterator<Item = &'a [u8]>,
{
    let first = values.next().ok_or_else(|| Error::MissingExtension {
        oid: AUTHORITY_KEY_IDENTIFIER_OID.to_string(),
    })?;

    let extra = values.count();
    if extra > 0 {
        warn!(
            oid = AUTHORITY_KEY_IDENTIFIER_OID,
            count = extra + 1,
            "Certificate has duplicate Authority Key Identifier extensions, using the first"
        );
    }

    Ok(first)
}

/// Shortest two's-complement form of a big-endian signed integer
fn minimal_signed_bytes(bytes: &[u8]) -> Vec<u8> {
    if bytes.is_empty() {
        return vec![0];
    }

    let mut start = 0;
    while start + 1 < bytes.len() {
        let redundant_zero = bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0;
        let redundant_ones = bytes[start] == 0xff && bytes[start + 1] & 0x80 != 0;
        if !(redundant_zero || redundant_ones) {
            break;
        }
        start += 1;
    }

    bytes[start..].to_vec()
}

fn asn1_error(bytes: &[u8], err: der::Error) -> Error {
    DecodeError::Asn1 {
        oid: AUTHORITY_KEY_IDENTIFIER_OID.to_string(),
        bytes: bytes.to_vec(),
        reason: err.to_string(),
    }
    .into()
}

fn encode_error(serial: &[u8], err: der::Error) -> Error {
    Error::Encode {
        serial: serial.to_vec(),
        reason: err.to_string(),
    }
}
