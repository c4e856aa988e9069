use std::path::Path;

use anyhow::{Context, Result};

/// Reads a program image from disk.
///
/// Size limits are enforced when the image is handed to a Machine.
pub fn load(path: &Path) -> Result<Vec<u8>> {
    let rom = std::fs::read(path).with_context(|| format!("unable to read {}", path.display()))?;
    log::info!("read {} bytes from {}", rom.len(), path.display());
    Ok(rom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_image_verbatim() {
        let path = std::env::temp_dir().join(format!("chipvm-rom-{}.ch8", std::process::id()));
        std::fs::write(&path, [0x00, 0xE0, 0x12, 0x00]).unwrap();
        let rom = load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(rom, vec![0x00, 0xE0, 0x12, 0x00]);
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = load(Path::new("/nonexistent/missing.ch8")).unwrap_err();
        assert!(err.to_string().contains("missing.ch8"));
    }
}
