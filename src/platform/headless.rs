//! Bridge for headless/CLI environments: no native surfaces, downloads go
//! to a directory.

use super::{PlatformBridge, PlatformError};
use log::debug;
use std::path::PathBuf;

/// Minimal bridge: every probe answers "absent" and `download` writes the
/// bytes into a target directory.
#[derive(Debug, Clone)]
pub struct HeadlessPlatform {
    output_dir: PathBuf,
}

impl HeadlessPlatform {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &std::path::Path {
        &self.output_dir
    }
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}

impl PlatformBridge for HeadlessPlatform {
    fn download(&self, filename: &str, bytes: &[u8]) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(filename);
        std::fs::write(&path, bytes)?;
        debug!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}
