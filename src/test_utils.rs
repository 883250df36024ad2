//! Scratch package trees for unit tests.

use crate::config::{Layout, Overrides};
use crate::context::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const CONTROL: &str = "\
Package: otterlang
Version: 0.1.0
Architecture: amd64
Maintainer: Otter Developers <dev@otterlang.org>
Description: The Otter programming language
";
pub const CHANGELOG: &str = "otterlang (0.1.0) unstable; urgency=low\n\n  * Initial release.\n";
pub const COPYRIGHT: &str = "Format: https://www.debian.org/doc/packaging-manuals/copyright-format/1.0/\n";
pub const RULES: &str = "#!/usr/bin/make -f\n%:\n\tdh $@\n";
pub const BINARY: &[u8] = b"\x7fELF fake otter compiler";

/// A repository checkout with `package/` metadata and a built
/// `target/release/otter`.
pub struct Fixture {
    pub root: TempDir,
    pub ctx: Context,
}

impl Fixture {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let package = root.path().join("package");
        fs::create_dir_all(&package).unwrap();
        fs::write(package.join("control"), CONTROL).unwrap();
        fs::write(package.join("changelog"), CHANGELOG).unwrap();
        fs::write(package.join("copyright"), COPYRIGHT).unwrap();
        fs::write(package.join("rules"), RULES).unwrap();

        let release = root.path().join("target/release");
        fs::create_dir_all(&release).unwrap();
        fs::write(release.join("otter"), BINARY).unwrap();

        let ctx = Context::new(package, false);
        Self { root, ctx }
    }

    pub fn package_dir(&self) -> &Path {
        &self.ctx.base_dir
    }

    pub fn layout(&self) -> Layout {
        Layout::load(&self.ctx, None, &Overrides::default()).unwrap()
    }

    pub fn layout_with_archiver(&self, archiver: &str) -> Layout {
        let overrides = Overrides {
            archiver: Some(archiver.to_string()),
            ..Overrides::default()
        };
        Layout::load(&self.ctx, None, &overrides).unwrap()
    }

    pub fn remove_binary(&self) {
        fs::remove_file(self.root.path().join("target/release/otter")).unwrap();
    }

    /// Write a stand-in for `dpkg-deb -b <root> <out>` and return the command
    /// line that runs it. The script records the staged files into the
    /// output so tests can check what the archiver saw.
    pub fn fake_archiver(&self) -> String {
        let script = self.root.path().join("fake-dpkg-deb.sh");
        fs::write(
            &script,
            "[ \"$1\" = \"-b\" ] || exit 2\n\
             [ -d \"$2/DEBIAN\" ] || exit 4\n\
             (cd \"$2\" && find . -type f | sort) > \"$3\"\n",
        )
        .unwrap();
        format!("sh {}", script.display())
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }
}
