use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use tracing::info;

use crate::{config::Config, files};

/// Copies `src` into the export directory under a timestamped name that
/// keeps the source extension. Sources without an extension get `bak`.
pub fn run(config: &Config, src: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let src_path = src.to_string_lossy();
    let extension = files::file_extension(&src_path).unwrap_or("bak");

    let dir = match output {
        Some(x) => x.to_path_buf(),
        None => config.app_dir(),
    };
    let target = files::combine_path(&dir, files::current_file_name("_backup", extension));
    files::check_access(&target)?;
    if !files::copy_file(src, &target) {
        bail!(
            "Failed to copy {} to {}",
            src.display(),
            target.display()
        );
    }

    info!("backed up {} to {}", src.display(), target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn timestamped_copy() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("measurements.db");
        fs::write(&src, b"sqlite").unwrap();

        let out = dir.path().join("out");
        let target = run(&Config::default(), &src, Some(&out)).unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"sqlite");
        let name = target.file_name().unwrap().to_str().unwrap();
        assert!(name.ends_with("_backup.db"), "unexpected name: {name}");
    }

    #[test]
    fn missing_source_fails() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("absent.db");
        let out = dir.path().join("out");
        assert!(run(&Config::default(), &src, Some(&out)).is_err());
    }
}
