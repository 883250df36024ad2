use std::path::PathBuf;

/// Context passed throughout the application containing global configuration
#[derive(Clone)]
pub struct Context {
    /// Enable verbose output (show archiver output and every copy)
    pub verbose: bool,

    /// Package directory holding the Debian metadata files.
    /// Every relative path in the layout resolves against it.
    pub base_dir: PathBuf,
}

impl Context {
    pub fn new(base_dir: PathBuf, verbose: bool) -> Self {
        Self { verbose, base_dir }
    }
}
