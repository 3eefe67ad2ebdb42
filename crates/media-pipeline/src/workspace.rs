//! Per-request scratch directory.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};

/// Uniquely named temporary directory owned by one video request.
///
/// Removed recursively when dropped, so early returns and panics clean up too. Call
/// [`Workspace::close`] on the normal path to have removal errors logged.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub const PREFIX: &'static str = "genbot-video-";

    /// Creates the directory under `root`, or under the system temp dir when `root` is `None`.
    pub fn create(root: Option<&Path>) -> io::Result<Self> {
        let dir = match root {
            Some(root) => {
                std::fs::create_dir_all(root)?;
                tempfile::Builder::new()
                    .prefix(Self::PREFIX)
                    .tempdir_in(root)?
            }
            None => tempfile::Builder::new().prefix(Self::PREFIX).tempdir()?,
        };
        debug!(path = %dir.path().display(), "Workspace created");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a file directly inside the workspace.
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Removes the directory and everything in it.
    pub fn close(self) {
        let path = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => debug!(path = %path.display(), "Workspace removed"),
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove workspace"),
        }
    }
}
