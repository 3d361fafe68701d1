//! Byte-level joining of per-chunk audio files

use crate::{Error, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Concatenate `parts` in order into `output` and return the bytes written.
///
/// The parts are joined byte for byte; nothing is decoded or re-encoded.
/// Data is written to a temporary file next to `output` that is renamed into
/// place once every part has been copied, so a failed run leaves no output.
pub fn assemble<P: AsRef<Path>>(parts: &[P], output: &Path) -> Result<u64> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = tempfile::Builder::new()
        .prefix(".storyvoice-")
        .suffix(".part")
        .tempfile_in(dir)?;

    let mut written = 0u64;
    {
        let mut writer = BufWriter::new(staged.as_file_mut());
        for part in parts {
            let part = part.as_ref();
            if !part.exists() {
                return Err(Error::FileNotFound(part.display().to_string()));
            }
            let mut reader = File::open(part)?;
            written += io::copy(&mut reader, &mut writer)?;
        }
        writer.flush()?;
    }

    staged.persist(output)?;
    log::debug!("Assembled {} parts ({} bytes) into {}", parts.len(), written, output.display());

    Ok(written)
}
