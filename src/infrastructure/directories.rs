use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};

use crate::config::DirectoryConfig;

#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub logs_dir: PathBuf,
}

pub fn ensure_directories(cfg: &DirectoryConfig) -> Result<ResolvedPaths> {
    let logs_dir = ensure_dir(Path::new(&cfg.logs_dir))?;

    let write_check = logs_dir.join(".write-test");
    fs::write(&write_check, b"ok")
        .with_context(|| format!("logs directory {} is not writable", logs_dir.display()))?;
    fs::remove_file(&write_check)?;
    Ok(ResolvedPaths { logs_dir })
}

/// Existing directories are used as they are. Directories created here are
/// owner-only on unix.
fn ensure_dir(dir: &Path) -> Result<PathBuf> {
    if dir.exists() {
        if !dir.is_dir() {
            bail!("{} exists but is not a directory", dir.display());
        }
    } else {
        create_private_dir(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }
    Ok(dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf()))
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(path: &Path) -> DirectoryConfig {
        DirectoryConfig {
            logs_dir: path.to_string_lossy().into_owned(),
        }
    }

    #[test]
    fn creates_nested_logs_dir() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("state").join("logs");

        let paths = ensure_directories(&config_for(&target)).unwrap();
        assert!(paths.logs_dir.is_dir());
        assert!(!paths.logs_dir.join(".write-test").exists());
    }

    #[test]
    fn file_in_place_of_logs_dir_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("logs");
        fs::write(&target, b"not a dir").unwrap();

        assert!(ensure_directories(&config_for(&target)).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn created_logs_dir_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("logs");

        let paths = ensure_directories(&config_for(&target)).unwrap();
        let mode = fs::metadata(&paths.logs_dir).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
        assert_eq!(mode & 0o700, 0o700);
    }

    #[cfg(unix)]
    #[test]
    fn existing_logs_dir_keeps_its_mode() {
        use std::os::unix::fs::PermissionsExt;

        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("shared");
        fs::create_dir(&target).unwrap();
        fs::set_permissions(&target, fs::Permissions::from_mode(0o750)).unwrap();

        ensure_directories(&config_for(&target)).unwrap();
        let mode = fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o750);
    }
}
