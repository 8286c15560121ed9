mod tar_gz;

use anyhow::Result;
use std::path::Path;

pub use tar_gz::TarGzUnpacker;

/// Unpacks downloaded package archives into a directory.
#[cfg_attr(test, mockall::automock)]
pub trait Unpacker: Send + Sync {
    /// Extract `archive` (the raw downloaded bytes) into `extract_to`.
    ///
    /// Entry paths are kept as they appear in the archive, so an npm tarball
    /// lands under `<extract_to>/package/`.
    fn unpack(&self, archive: &[u8], extract_to: &Path) -> Result<()>;
}
