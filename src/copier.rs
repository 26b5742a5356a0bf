//! External disk-copy tool invocation.
//!
//! Copying the actual blocks is delegated to `vmkfstools` on the ESXi
//! host. The orchestrator depends only on the [`ImageCopier`] trait, so
//! tests substitute a double instead of spawning processes.

use std::path::Path;
use std::process::Command;

use crate::error::CloneError;

/// Default copy tool binary on an ESXi host.
pub const DEFAULT_TOOL: &str = "vmkfstools";

/// Capability to copy a disk image into a new format.
pub trait ImageCopier {
    /// Copy `src` to `dst`, converting to `format`. Blocks until the copy
    /// finishes; a non-zero exit is a fatal [`CloneError::CopyToolFailure`].
    fn copy(&self, src: &Path, dst: &Path, format: &str) -> Result<(), CloneError>;
}

/// Production copier shelling out to `vmkfstools -i <src> <dst> -d <format>`.
pub struct Vmkfstools {
    command: String,
}

impl Vmkfstools {
    pub fn new() -> Self {
        Self::with_command(DEFAULT_TOOL)
    }

    /// Use a different binary, e.g. a stub in integration tests.
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Default for Vmkfstools {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageCopier for Vmkfstools {
    fn copy(&self, src: &Path, dst: &Path, format: &str) -> Result<(), CloneError> {
        let output = Command::new(&self.command)
            .arg("-i")
            .arg(src)
            .arg(dst)
            .args(["-d", format])
            .output()
            .map_err(|e| CloneError::Io {
                context: format!("running {}", self.command),
                source: e,
            })?;

        if !output.status.success() {
            return Err(CloneError::CopyToolFailure {
                command: self.command.clone(),
                message: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        tracing::info!(
            src = %src.display(),
            dst = %dst.display(),
            format,
            "disk image copied"
        );
        Ok(())
    }
}
