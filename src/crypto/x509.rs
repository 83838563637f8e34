use std::path::Path;

use x509_parser::certificate::X509Certificate;
use x509_parser::prelude::FromDer;

use crate::error::Error;
use crate::types::Result;

/// Parse DER bytes into a certificate
///
/// No validation beyond structural parsing is performed. `path` is only used
/// for error reporting.
pub fn parse_certificate<'a>(der: &'a [u8], path: &Path) -> Result<X509Certificate<'a>> {
    let (rest, cert) = X509Certificate::from_der(der)
        .map_err(|e| Error::input(path, format!("failed to parse certificate: {}", e)))?;

    if !rest.is_empty() {
        return Err(Error::input(path, "trailing data after certificate"));
    }

    Ok(cert)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::first_certificate;
    use crate::error::ErrorKind;

    const LEAF: &[u8] = include_bytes!("../../tests/fixtures/leaf.pem");

    #[test]
    fn test_parse_certificate() {
        let path = Path::new("leaf.pem");
        let der = first_certificate(LEAF, path).unwrap();
        let cert = parse_certificate(&der, path).unwrap();
        assert_eq!(cert.tbs_certificate.raw_serial(), &[0x00, 0x87, 0x65, 0x43, 0x21]);
    }

    #[test]
    fn test_garbage_is_input_error() {
        let err = parse_certificate(&[0x30, 0x03, 0x02, 0x01, 0x01], Path::new("x.der")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn test_trailing_bytes_are_rejected() {
        let path = Path::new("leaf.pem");
        let mut der = first_certificate(LEAF, path).unwrap();
        der.push(0x00);
        let err = parse_certificate(&der, path).unwrap_err();
        assert!(err.to_string().contains("trailing data"));
    }
}
