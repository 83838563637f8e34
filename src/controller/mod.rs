pub mod checker;

pub use checker::{write_renewal_info, RenewalChecker};
