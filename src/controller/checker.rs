use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{debug, info};

use crate::ari::{derive, AriResolver, HttpFetcher, RenewalInfo};
use crate::crypto::{load_first_certificate, parse_certificate};
use crate::error::Error;
use crate::types::Result;

/// Checks renewal information for a list of certificate files
///
/// Certificates are processed one at a time, in order. The first failure
/// stops processing; results already written stay written.
pub struct RenewalChecker<F: HttpFetcher> {
    /// ARI resolver
    resolver: AriResolver<F>,
}

impl<F: HttpFetcher> RenewalChecker<F> {
    /// Create a new checker
    pub fn new(resolver: AriResolver<F>) -> Self {
        Self { resolver }
    }

    /// Discover the renewal-info endpoint, then check every path in turn
    ///
    /// Each result is written to `out` as soon as it is available. Returns
    /// the number of certificates checked.
    pub async fn check_all<P, W>(&self, paths: &[P], out: &mut W) -> Result<usize>
    where
        P: AsRef<Path>,
        W: Write,
    {
        if paths.is_empty() {
            return Err(Error::Config(
                "must provide at least one PEM certificate to process".to_string(),
            ));
        }

        let endpoint = self.resolver.discover_endpoint().await?;
        debug!(endpoint = %endpoint, "Discovered renewal-info endpoint");

        for path in paths {
            let info = self.check_one(&endpoint, path.as_ref()).await?;
            write_renewal_info(out, &info)?;
        }

        Ok(paths.len())
    }

    /// Check a single certificate file against a discovered endpoint
    pub async fn check_one(&self, endpoint: &str, path: &Path) -> Result<RenewalInfo> {
        let identifier = {
            let der = load_first_certificate(path).await?;
            let cert = parse_certificate(&der, path)?;
            derive(&cert)?
        };

        info!(
            input_pem = %path.display(),
            identifier = %identifier,
            "Derived ARI certificate identifier"
        );

        self.resolver.fetch_renewal_info(endpoint, &identifier).await
    }
}

/// Write `info` as indented JSON followed by a newline, then flush
pub fn write_renewal_info<W: Write>(out: &mut W, info: &RenewalInfo) -> Result<()> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut *out, formatter);
    info.serialize(&mut serializer).map_err(io::Error::from)?;

    writeln!(out)?;
    out.flush()?;
    Ok(())
}
