use anyhow::{Context, Result, bail};
use flate2::read::GzDecoder;
use log::debug;
use std::path::Path;
use tar::Archive;

use super::Unpacker;

/// Unpacker for gzip-compressed tarballs (`.tgz`, `.tar.gz`).
#[derive(Debug, Default, Clone, Copy)]
pub struct TarGzUnpacker;

impl Unpacker for TarGzUnpacker {
    #[tracing::instrument(skip(self, archive))]
    fn unpack(&self, archive: &[u8], extract_to: &Path) -> Result<()> {
        debug!(
            "Extracting {} byte tarball to {:?}...",
            archive.len(),
            extract_to
        );

        let mut tar = Archive::new(GzDecoder::new(archive));
        tar.set_overwrite(true);

        let mut unpacked = 0usize;
        for entry in tar.entries().context("Failed to read tarball entries")? {
            let mut entry = entry.context("Failed to read tarball entry")?;
            let path = entry.path()?.into_owned();

            // unpack_in refuses entries that would escape the destination
            if !entry
                .unpack_in(extract_to)
                .with_context(|| format!("Failed to unpack {:?}", path))?
            {
                bail!("Archive entry {:?} escapes the destination directory", path);
            }
            unpacked += 1;
        }

        debug!("Unpacked {} entries into {:?}", unpacked, extract_to);
        Ok(())
    }
}
