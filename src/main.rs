mod args;
mod cmd;
mod config;
mod confirm;
mod context;
mod deb;
mod error;
mod result;
mod tpl;
mod utils;

#[cfg(test)]
mod test_utils;

use args::Args;
use config::{Layout, Overrides};
use context::Context;
use deb::stage::{self, Prepared};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> result::Result<()> {
    let args = Args::parse();
    let clear_mode = args.clear_mode();
    let Args {
        verbose,
        no_archive,
        path,
        config: config_path,
        binary,
        output,
        archiver,
        ..
    } = args;

    let package_dir = utils::find_package_dir(path.as_deref())?;
    let ctx = Context::new(package_dir, verbose);

    cliclack::intro("otter-deb")?;

    let overrides = Overrides {
        binary,
        output,
        archiver,
    };
    let layout = Layout::load(&ctx, config_path.as_deref(), &overrides)?;

    cliclack::log::info(format!("Will create at {}", layout.staging_dir.display()))?;

    let clear = confirm::decide_clear(layout.staging_dir.exists(), clear_mode, confirm::ask_clear)?;

    let staged = {
        let spinner = cliclack::spinner();
        spinner.start("Staging package files...");
        match stage::run(&ctx, &layout, clear) {
            Ok(staged) => {
                spinner.stop(format!("Staged {} files", staged.files.len()));
                staged
            }
            Err(e @ error::Error::MissingArtifact { .. }) => {
                spinner.error("First you need to build the binaries");
                return Err(e);
            }
            Err(e) => {
                spinner.error("Staging failed");
                return Err(e);
            }
        }
    };

    match staged.prepared {
        Prepared::Cleared => cliclack::log::step("Cleared the previous staging directory")?,
        Prepared::Kept => cliclack::log::warning(
            "Reused the existing staging directory; unrelated files were left in place",
        )?,
        Prepared::Created => {}
    }

    if verbose {
        cliclack::log::remark(format!("Binary staged at {}", staged.binary.display()))?;
        for file in &staged.files {
            cliclack::log::remark(file.display().to_string())?;
        }
    }

    if no_archive {
        cliclack::outro(format!(
            "Staged {} (archiver skipped)",
            layout.staging_root().display()
        ))?;
        return Ok(());
    }

    let spinner = cliclack::spinner();
    spinner.start(format!("Running {}...", layout.archiver));
    let package = match deb::archive::build(&ctx, &layout) {
        Ok(package) => {
            spinner.stop("Archive created");
            package
        }
        Err(e) => {
            spinner.error("Archiver failed");
            return Err(e);
        }
    };

    let label = match (&layout.version, &layout.architecture) {
        (Some(version), Some(arch)) => format!("{} {} ({})", layout.name, version, arch),
        (Some(version), None) => format!("{} {}", layout.name, version),
        _ => layout.name.clone(),
    };
    cliclack::outro(format!("Built {} at {}", label, package.display()))?;
    Ok(())
}
