use crate::error::Error;
use crate::result::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Copy a single file, overwriting the destination if it exists
pub fn copy_file(source: &Path, destination: &Path) -> Result<()> {
    fs::copy(source, destination).map_err(|source_err| Error::CopyFailed {
        from: source.to_path_buf(),
        to: destination.to_path_buf(),
        source: source_err,
    })?;
    Ok(())
}

/// Find the package directory in the current directory or specified path.
///
/// Without an explicit path the current directory is used, unless it has no
/// `control` file and a `package/` subdirectory with one exists.
pub fn find_package_dir(path: Option<&Path>) -> Result<PathBuf> {
    let base_path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let cwd = std::env::current_dir()?;
            let nested = cwd.join("package");
            if !cwd.join("control").exists() && nested.join("control").exists() {
                nested
            } else {
                cwd
            }
        }
    };

    if !base_path.is_dir() {
        return Err(Error::PackageDirNotFound(base_path));
    }

    Ok(base_path)
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir(path)?;
    }
    Ok(())
}
