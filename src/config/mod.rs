pub mod settings;

pub use settings::{
    AcmeConfig, LoggingConfig, Overrides, Settings, CONFIG_PATH_ENV, DEFAULT_DIRECTORY_URL,
};
