use std::io;
use std::path::{Path, PathBuf};

/// A request-scoped file that is removed when the guard goes out of scope,
/// whichever way the handler exits.
#[derive(Debug)]
pub struct TempFile {
    path: PathBuf,
}

impl TempFile {
    /// Writes `data` to `<dir>/<request_id>.<extension>`. Names are keyed by
    /// request id so concurrent uploads of the same filename never collide.
    pub async fn write(dir: &Path, request_id: &str, extension: &str, data: &[u8]) -> io::Result<Self> {
        tokio::fs::create_dir_all(dir).await?;
        let guard = Self::reserve(dir, &format!("{}.{}", request_id, extension));
        tokio::fs::write(&guard.path, data).await?;
        Ok(guard)
    }

    /// Claims a path that an external tool is expected to create.
    pub fn reserve(dir: &Path, file_name: &str) -> Self {
        Self {
            path: dir.join(file_name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "removed temporary file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "failed to remove temporary file"),
        }
    }
}

/// Same as [`TempFile`] for a scratch directory.
#[derive(Debug)]
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub async fn create(parent: &Path, name: &str) -> io::Result<Self> {
        let path = parent.join(name);
        tokio::fs::create_dir_all(&path).await?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove temporary directory");
            }
        }
    }
}

/// Lowercased extension of an uploaded filename, limited to ASCII
/// alphanumerics so it is safe to reuse in a server-side path.
pub fn sanitized_extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_lowercase();
    if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(ext)
    } else {
        None
    }
}
