use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Chat files larger than this are refused
pub const MAX_TRANSCRIPT_BYTES: u64 = 100 * 1024 * 1024;

/// Check the size of an already opened file (avoids a stat/open race)
pub fn validate_file_size(file: &File, path: &Path, max_bytes: u64) -> Result<()> {
    let size = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?
        .len();

    if size > max_bytes {
        bail!("File too large: {} ({} bytes, max {} bytes)", path.display(), size, max_bytes);
    }
    Ok(())
}
