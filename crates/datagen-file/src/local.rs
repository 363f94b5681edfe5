//! Local filesystem artifact storage

use crate::ArtifactStorage;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};

/// Stores artifacts as files in a media directory
///
/// Existing files are never overwritten: if `file_name` is taken, a numeric
/// suffix is added before the extension (`users.csv`, `users_1.csv`, ...).
#[derive(Debug, Clone)]
pub struct LocalArtifactStorage {
    root: PathBuf,
}

impl LocalArtifactStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the first file under the media directory whose name is not
    /// already taken. The name is claimed with `create_new`, so concurrent
    /// callers never share a target.
    async fn create_available(&self, file_name: &str) -> Result<(PathBuf, File)> {
        let (stem, extension) = match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
            _ => (file_name, None),
        };

        for n in 0u32.. {
            let name = match (n, extension) {
                (0, _) => file_name.to_string(),
                (_, Some(ext)) => format!("{stem}_{n}.{ext}"),
                (_, None) => format!("{stem}_{n}"),
            };
            let candidate = self.root.join(name);
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
                .await
            {
                Ok(file) => return Ok((candidate, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("Failed to create artifact: {}", candidate.display())
                    })
                }
            }
        }
        anyhow::bail!("No free file name for {file_name}")
    }
}

#[async_trait]
impl ArtifactStorage for LocalArtifactStorage {
    async fn persist(&self, file_name: &str, source: &Path) -> Result<String> {
        if file_name.contains(['/', '\\']) {
            anyhow::bail!("Invalid artifact file name: {file_name}");
        }

        let mut input = File::open(source)
            .await
            .with_context(|| format!("Failed to open staging file: {}", source.display()))?;

        tokio::fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("Failed to create media directory: {}", self.root.display()))?;

        let (target, mut output) = self.create_available(file_name).await?;
        let copied = async {
            tokio::io::copy(&mut input, &mut output).await?;
            output.sync_all().await
        }
        .await;
        if let Err(e) = copied {
            drop(output);
            let _ = tokio::fs::remove_file(&target).await;
            return Err(e).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    source.display(),
                    target.display()
                )
            });
        }

        tracing::debug!("Stored artifact {}", target.display());
        Ok(target.display().to_string())
    }
}
