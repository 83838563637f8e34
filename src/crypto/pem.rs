use std::path::Path;

use tracing::debug;

use crate::error::Error;
use crate::types::Result;
use crate::utils::FsUtils;

/// PEM label of an X.509 certificate block
pub const CERTIFICATE_LABEL: &str = "CERTIFICATE";

/// Read `path` and return the DER bytes of its first PEM block
pub async fn load_first_certificate(path: &Path) -> Result<Vec<u8>> {
    let pem = FsUtils::read_file(path).await?;
    first_certificate(&pem, path)
}

/// Return the DER bytes of the first PEM block in `pem`
///
/// The first block must be labelled `CERTIFICATE`, whatever follows it.
/// Blocks after the first are never looked at. `path` is only used for
/// error reporting.
pub fn first_certificate(pem: &[u8], path: &Path) -> Result<Vec<u8>> {
    let block = pem::parse(pem)
        .map_err(|e| Error::input(path, format!("failed to parse certificate PEM: {}", e)))?;

    if block.tag() != CERTIFICATE_LABEL {
        return Err(Error::input(
            path,
            format!("first PEM block is not a certificate ({})", block.tag()),
        ));
    }

    debug!(path = %path.display(), len = block.contents().len(), "Loaded certificate PEM block");
    Ok(block.into_contents())
}
