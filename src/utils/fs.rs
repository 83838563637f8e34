use std::path::Path;
use tokio::fs;

use crate::error::Error;

/// File system utilities
pub struct FsUtils;

impl FsUtils {
    /// Read file contents
    pub async fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, Error> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Error::input(path, "file not found"));
        }

        fs::read(path)
            .await
            .map_err(|e| Error::input(path, format!("failed to read file: {}", e)))
    }
}
