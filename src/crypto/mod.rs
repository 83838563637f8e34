pub mod pem;
pub mod x509;

// Re-export key functions
pub use pem::{first_certificate, load_first_certificate};
pub use x509::parse_certificate;
