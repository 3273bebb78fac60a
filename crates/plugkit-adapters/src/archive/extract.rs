//! Zip extraction into the project directory.

use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, trace};
use zip::ZipArchive;

use plugkit_core::{
    application::{
        ApplicationError,
        ports::{ProgressEvent, ProgressObserver, TreeMaterializer},
    },
    error::{PlugkitError, PlugkitResult, Stage},
};

/// Unpacks a zip archive onto the local filesystem.
///
/// Every entry must live under the strip prefix. The prefix directory entry
/// itself is skipped. Unix modes recorded in the archive are restored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipMaterializer;

impl ZipMaterializer {
    pub fn new() -> Self {
        Self
    }
}

fn extraction_error(reason: impl Into<String>) -> PlugkitError {
    ApplicationError::Extraction {
        reason: reason.into(),
    }
    .into()
}

/// Entry path below `prefix`, or `None` for the prefix directory itself.
fn strip_entry(name: &Path, prefix: &str) -> PlugkitResult<Option<PathBuf>> {
    let rel = name.strip_prefix(prefix).map_err(|_| {
        extraction_error(format!(
            "entry '{}' is outside archive root '{}'",
            name.display(),
            prefix
        ))
    })?;
    if rel.as_os_str().is_empty() {
        Ok(None)
    } else {
        Ok(Some(rel.to_path_buf()))
    }
}

impl TreeMaterializer for ZipMaterializer {
    #[instrument(skip_all, fields(dest = %dest.display(), prefix = strip_prefix))]
    fn materialize(
        &self,
        archive: &[u8],
        dest: &Path,
        strip_prefix: &str,
        observer: &dyn ProgressObserver,
    ) -> PlugkitResult<usize> {
        let mut zip = ZipArchive::new(Cursor::new(archive))
            .map_err(|e| extraction_error(format!("not a readable zip archive: {e}")))?;

        let total = zip.len() as u64;
        let mut written = 0;

        for i in 0..zip.len() {
            let mut entry = zip
                .by_index(i)
                .map_err(|e| extraction_error(format!("entry {i}: {e}")))?;

            let name = entry.enclosed_name().ok_or_else(|| {
                extraction_error(format!("entry '{}' has an unsafe path", entry.name()))
            })?;

            let Some(rel) = strip_entry(&name, strip_prefix)? else {
                observer.on_progress(ProgressEvent::new(Stage::Materialize, i as u64 + 1, Some(total)));
                continue;
            };
            let target = dest.join(&rel);

            if entry.is_dir() {
                fs::create_dir_all(&target).map_err(|e| {
                    extraction_error(format!("create {}: {e}", target.display()))
                })?;
            } else {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent).map_err(|e| {
                        extraction_error(format!("create {}: {e}", parent.display()))
                    })?;
                }
                let mut out = fs::File::create(&target).map_err(|e| {
                    extraction_error(format!("create {}: {e}", target.display()))
                })?;
                io::copy(&mut entry, &mut out).map_err(|e| {
                    extraction_error(format!("write {}: {e}", target.display()))
                })?;
                trace!(path = %rel.display(), "Extracted");
            }

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = entry.unix_mode() {
                    fs::set_permissions(&target, fs::Permissions::from_mode(mode & 0o7777))
                        .map_err(|e| {
                            extraction_error(format!("chmod {}: {e}", target.display()))
                        })?;
                }
            }

            written += 1;
            observer.on_progress(ProgressEvent::new(Stage::Materialize, i as u64 + 1, Some(total)));
        }

        debug!(entries = written, "Extraction complete");
        Ok(written)
    }
}
