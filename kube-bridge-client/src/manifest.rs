//! Raw manifest files sent to the API server as-is
use std::path::{Path, PathBuf};

use kube_bridge_core::Body;
use tracing::trace;

/// The unparsed contents of a manifest file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    path: PathBuf,
    contents: String,
}

impl Manifest {
    /// Reads the whole file at `path`
    pub async fn read(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await?;
        trace!(path = %path.display(), len = contents.len(), "read manifest");
        Ok(Self {
            path: path.to_owned(),
            contents,
        })
    }

    /// Where the manifest was read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file contents
    pub fn contents(&self) -> &str {
        &self.contents
    }
}

impl From<Manifest> for Body {
    fn from(manifest: Manifest) -> Self {
        Body::yaml(manifest.contents)
    }
}
