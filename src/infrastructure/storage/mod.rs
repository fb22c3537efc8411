use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Kinds of files produced by a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Audio,
    Video,
    Image,
}

impl ArtifactKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactKind::Audio => "mp3",
            ArtifactKind::Video => "mp4",
            ArtifactKind::Image => "png",
        }
    }

    fn directory(&self) -> &'static str {
        match self {
            ArtifactKind::Audio => "audio",
            ArtifactKind::Video => "video",
            ArtifactKind::Image => "images",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ArtifactKind::Audio => "audio/mpeg",
            ArtifactKind::Video => "video/mp4",
            ArtifactKind::Image => "image/png",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.directory())
    }
}

/// Filesystem layout for audio, video and preview image artifacts.
///
/// Every artifact is addressed by a generated filename; jobs never share
/// filenames, so no locking is needed between concurrent conversions.
pub struct ArtifactStore {
    base_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Create the per-kind directories if they do not exist yet
    pub async fn ensure_directories(&self) -> io::Result<()> {
        for kind in [ArtifactKind::Audio, ArtifactKind::Video, ArtifactKind::Image] {
            tokio::fs::create_dir_all(self.base_dir.join(kind.directory())).await?;
        }
        Ok(())
    }

    /// Generate a fresh opaque filename with the extension of `kind`
    pub fn generate_filename(&self, kind: ArtifactKind) -> String {
        format!("{}.{}", Uuid::new_v4(), kind.extension())
    }

    /// Resolve a filename to its path. Only the final path component is kept.
    pub fn path_for(&self, kind: ArtifactKind, filename: &str) -> PathBuf {
        let name = Path::new(filename)
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_default();
        self.base_dir.join(kind.directory()).join(name)
    }

    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    pub async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }

    /// Remove a file, ignoring every failure (a missing file included)
    pub async fn delete(&self, path: &Path) {
        if let Err(e) = tokio::fs::remove_file(path).await {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, "Artifact deletion failed");
            }
        }
    }
}

/// Artifacts created by one job that must be removed if the job fails
#[derive(Debug, Default)]
pub struct ArtifactLedger {
    entries: Vec<(ArtifactKind, String)>,
}

impl ArtifactLedger {
    pub fn track(&mut self, kind: ArtifactKind, filename: impl Into<String>) {
        self.entries.push((kind, filename.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn filenames(&self) -> impl Iterator<Item = (ArtifactKind, &str)> {
        self.entries.iter().map(|(kind, name)| (*kind, name.as_str()))
    }

    /// Best-effort removal of every tracked artifact
    pub async fn cleanup(self, store: &ArtifactStore) {
        for (kind, filename) in self.entries {
            let path = store.path_for(kind, &filename);
            store.delete(&path).await;
            tracing::info!(kind = %kind, filename = %filename, "Removed artifact of failed conversion");
        }
    }

    /// Ownership of the tracked artifacts passes to the caller
    pub fn release(self) {}
}

/// A transient file removed when the guard goes out of scope.
///
/// Covers every exit path, including a dropped future on timeout.
#[derive(Debug)]
pub struct ScopedArtifact {
    path: Option<PathBuf>,
}

impl ScopedArtifact {
    pub fn new(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    pub fn path(&self) -> &Path {
        self.path.as_deref().unwrap_or_else(|| Path::new(""))
    }

    /// Remove the file now, without blocking the runtime
    pub async fn remove(mut self) {
        if let Some(path) = self.path.take() {
            if let Err(e) = tokio::fs::remove_file(&path).await {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::debug!(path = %path.display(), error = %e, "Transient file removal failed");
                }
            }
        }
    }
}

impl Drop for ScopedArtifact {
    fn drop(&mut self) {
        // Drop cannot await; a blocking unlink of one small file is acceptable here
        if let Some(path) = self.path.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}
