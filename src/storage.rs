use std::fs;
use std::path::Path;

use crate::error::Result;

/// Write `content` to `path` as UTF-8, creating missing parent directories
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }
    fs::write(path, content)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "Saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("out.txt");
        write_text(&path, "hello").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_text(&path, "first").unwrap();
        write_text(&path, "").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }
}
