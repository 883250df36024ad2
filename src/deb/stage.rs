use crate::config::Layout;
use crate::context::Context;
use crate::error::Error;
use crate::result::Result;
use crate::utils;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What happened to the staging directory before it was populated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prepared {
    /// It did not exist and was created.
    Created,
    /// It existed and was removed and recreated empty.
    Cleared,
    /// It existed and was left as-is; same-named files get overwritten.
    Kept,
}

/// Result of a completed staging run
#[derive(Debug)]
pub struct Staged {
    pub prepared: Prepared,
    /// Path of the binary inside the staging directory
    pub binary: PathBuf,
    /// Every regular file under the staging root, relative to it
    pub files: Vec<PathBuf>,
}

/// Clear (when `clear` is set) or create the staging directory.
///
/// Deletion only ever happens on explicit consent. A missing directory is
/// created along with its parent.
pub fn prepare_dir(ctx: &Context, dir: &Path, clear: bool) -> Result<Prepared> {
    let mut prepared = Prepared::Kept;

    if dir.exists() && clear {
        if ctx.verbose {
            println!("Removing {}", dir.display());
        }
        fs::remove_dir_all(dir)?;
        prepared = Prepared::Cleared;
    }

    if !dir.exists() {
        if let Some(parent) = dir.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::create_dir(dir)?;
        if prepared == Prepared::Kept {
            prepared = Prepared::Created;
        }
    }

    Ok(prepared)
}

/// Fail with `MissingArtifact` unless the release binary exists.
pub fn verify_binary(layout: &Layout) -> Result<()> {
    if !layout.binary.exists() {
        return Err(Error::MissingArtifact {
            path: layout.binary.clone(),
        });
    }
    Ok(())
}

/// Copy the release binary into `bin/` and the metadata files into the
/// staging directory. Returns the staged binary path.
pub fn populate(ctx: &Context, layout: &Layout) -> Result<PathBuf> {
    let bin_dir = layout.bin_dir();
    utils::ensure_dir(&bin_dir)?;

    // `Layout::resolve` guarantees every path here names a file.
    let binary_name = layout
        .binary
        .file_name()
        .ok_or_else(|| Error::custom("release binary path has no file name"))?;
    let binary_dst = bin_dir.join(binary_name);
    if ctx.verbose {
        println!("Copying {} to {}", layout.binary.display(), binary_dst.display());
    }
    utils::copy_file(&layout.binary, &binary_dst)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&binary_dst)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&binary_dst, perms)?;
    }

    for source in &layout.metadata {
        let name = source
            .file_name()
            .ok_or_else(|| Error::custom(format!("{} has no file name", source.display())))?;
        let dest_path = layout.staging_dir.join(name);
        if ctx.verbose {
            println!("Copying {} to {}", source.display(), dest_path.display());
        }
        utils::copy_file(source, &dest_path)?;
    }

    Ok(binary_dst)
}

/// List regular files under `root`, relative to it and sorted.
pub fn staged_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() {
            if let Ok(relative) = entry.path().strip_prefix(root) {
                files.push(relative.to_path_buf());
            }
        }
    }
    Ok(files)
}

/// Prepare, verify and populate the staging directory, in that order.
///
/// Not transactional: a directory created in the first step stays on disk
/// when the binary check fails.
pub fn run(ctx: &Context, layout: &Layout, clear: bool) -> Result<Staged> {
    let prepared = prepare_dir(ctx, &layout.staging_dir, clear)?;
    verify_binary(layout)?;
    let binary = populate(ctx, layout)?;
    let files = staged_files(layout.staging_root())?;

    Ok(Staged {
        prepared,
        binary,
        files,
    })
}
