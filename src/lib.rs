//! ARI Probe - ACME Renewal Information client
//!
//! Derives the ARI certificate identifier of end-entity certificates and
//! queries the renewal window suggested by the issuing ACME server.

// Foundational layer
pub mod error;
pub mod types;
pub mod utils;
pub mod config;
pub mod telemetry;

// Core layer
pub mod crypto;
pub mod ari;

// Application layer
pub mod controller;

// Public key types
pub use crate::error::{DecodeError, Error, ErrorKind};
pub use crate::types::Result;
pub use crate::ari::{
    AriResolver, CertificateIdentifier, HttpFetcher, RenewalInfo, ReqwestFetcher, ResolverConfig,
};
pub use crate::config::Settings;
pub use crate::controller::RenewalChecker;
