pub mod fetcher;
pub mod http;
pub mod identifier;
pub mod resolver;
pub mod types;

// Re-export key types
pub use fetcher::{HttpFetcher, HttpResponse};
pub use http::ReqwestFetcher;
pub use identifier::{derive, derive_identifier, encode_serial, extract_authority_key_id};
pub use resolver::{renewal_info_request_url, AriResolver, ResolverConfig};
pub use types::{CertificateIdentifier, DiscoveryDirectory, RenewalInfo, SuggestedWindow};
