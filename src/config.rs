use crate::context::Context;
use crate::deb::control::Control;
use crate::error::Error;
use crate::result::Result;
use crate::tpl::Tpl;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the optional config file looked up in the package directory.
pub const CONFIG_FILE: &str = "deb.toml";

pub const DEFAULT_NAME: &str = "otterlang";
pub const DEFAULT_BINARY: &str = "otter";
pub const DEFAULT_BINARY_PATH: &str = "../target/release/$BINARY";
pub const DEFAULT_STAGING: &str = "$NAME/DEBIAN";
pub const DEFAULT_OUTPUT: &str = "$NAME.deb";
pub const DEFAULT_ARCHIVER: &str = "dpkg-deb";
pub const DEFAULT_METADATA: [&str; 4] = ["control", "changelog", "copyright", "rules"];

/// Contents of `deb.toml`. Every key is optional.
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DebConfig {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub binary: Option<String>,

    #[serde(default)]
    pub binary_path: Option<String>,

    #[serde(default)]
    pub staging: Option<String>,

    #[serde(default)]
    pub output: Option<String>,

    #[serde(default)]
    pub metadata: Option<Vec<String>>,

    #[serde(default)]
    pub archiver: Option<String>,
}

impl DebConfig {
    /// Load the config file named on the command line, or `deb.toml` from the
    /// package directory when it exists. No file means all defaults.
    pub fn load(ctx: &Context, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(Error::ConfigNotFound(path.to_path_buf()));
            }
            Some(path) => path.to_path_buf(),
            None => {
                let path = ctx.base_dir.join(CONFIG_FILE);
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        if ctx.verbose {
            println!("Reading config from {}", path.display());
        }

        let content = fs::read_to_string(&path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// Values given on the command line. They win over the config file.
///
/// Paths are taken as given, so relative ones resolve against the current
/// directory rather than the package directory.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub binary: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub archiver: Option<String>,
}

/// Fully resolved paths for one staging run
#[derive(Debug, Clone)]
pub struct Layout {
    pub name: String,
    pub version: Option<String>,
    pub architecture: Option<String>,
    /// The `DEBIAN` directory that receives `bin/` and the metadata files
    pub staging_dir: PathBuf,
    /// Prebuilt release binary
    pub binary: PathBuf,
    /// Metadata files copied verbatim into the staging directory
    pub metadata: Vec<PathBuf>,
    /// Archive written by the archiver
    pub output: PathBuf,
    pub archiver: String,
}

impl Layout {
    pub fn load(ctx: &Context, config_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let config = DebConfig::load(ctx, config_path)?;
        Self::resolve(ctx, config, overrides)
    }

    /// Apply defaults, template variables and command-line overrides.
    pub fn resolve(ctx: &Context, config: DebConfig, overrides: &Overrides) -> Result<Self> {
        let name = config.name.unwrap_or_else(|| DEFAULT_NAME.to_string());
        if name.trim().is_empty() {
            return Err(Error::InvalidConfig("`name` must not be empty".to_string()));
        }

        let binary_name = config.binary.unwrap_or_else(|| DEFAULT_BINARY.to_string());
        if binary_name.trim().is_empty() {
            return Err(Error::InvalidConfig("`binary` must not be empty".to_string()));
        }

        let mut tpl = Tpl::new();
        tpl.register("NAME", &name);
        tpl.register("BINARY", &binary_name);

        // The control file is optional here; a missing one only surfaces
        // later as a failed copy.
        let control = Control::load(&ctx.base_dir.join("control")).unwrap_or_default();
        let version = control.version().map(str::to_string);
        let architecture = control.architecture().map(str::to_string);
        if let Some(version) = &version {
            tpl.register("VERSION", version);
        }
        if let Some(architecture) = &architecture {
            tpl.register("ARCH", architecture);
        }

        let resolve = |value: Option<String>, default: &str| -> PathBuf {
            let value = value.unwrap_or_else(|| default.to_string());
            ctx.base_dir.join(tpl.parse(&value))
        };

        let staging_dir = resolve(config.staging, DEFAULT_STAGING);

        let binary = match &overrides.binary {
            Some(path) => path.clone(),
            None => resolve(config.binary_path, DEFAULT_BINARY_PATH),
        };

        let output = match &overrides.output {
            Some(path) => path.clone(),
            None => resolve(config.output, DEFAULT_OUTPUT),
        };

        let metadata_names = config
            .metadata
            .unwrap_or_else(|| DEFAULT_METADATA.iter().map(|s| s.to_string()).collect());
        if metadata_names.is_empty() {
            return Err(Error::InvalidConfig("`metadata` must list at least one file".to_string()));
        }

        let mut metadata = Vec::with_capacity(metadata_names.len());
        for entry in tpl.parse_vec(&metadata_names) {
            let path = ctx.base_dir.join(&entry);
            if path.file_name().is_none() {
                return Err(Error::InvalidConfig(format!(
                    "metadata entry `{}` does not name a file",
                    entry
                )));
            }
            metadata.push(path);
        }

        if binary.file_name().is_none() {
            return Err(Error::InvalidConfig(format!(
                "release binary path {} does not name a file",
                binary.display()
            )));
        }

        let archiver = overrides
            .archiver
            .clone()
            .or(config.archiver)
            .unwrap_or_else(|| DEFAULT_ARCHIVER.to_string());
        if archiver.trim().is_empty() {
            return Err(Error::InvalidConfig("`archiver` must not be empty".to_string()));
        }

        Ok(Layout {
            name,
            version,
            architecture,
            staging_dir,
            binary,
            metadata,
            output,
            archiver,
        })
    }

    /// Directory handed to the archiver; the parent of the `DEBIAN` directory.
    pub fn staging_root(&self) -> &Path {
        self.staging_dir.parent().unwrap_or(&self.staging_dir)
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.staging_dir.join("bin")
    }
}
