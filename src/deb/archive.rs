use crate::cmd;
use crate::config::Layout;
use crate::context::Context;
use crate::error::Error;
use crate::result::Result;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

/// Run the archiver as `<archiver> -b <staging root> <output>`.
///
/// The archiver string may carry a wrapper and leading arguments, e.g.
/// `fakeroot dpkg-deb`. The output's parent directory is created first.
pub fn build(ctx: &Context, layout: &Layout) -> Result<PathBuf> {
    let mut parts = layout.archiver.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| Error::InvalidConfig("archiver command is empty".to_string()))?;

    let mut args: Vec<OsString> = parts.map(OsString::from).collect();
    args.push(OsString::from("-b"));
    args.push(layout.staging_root().as_os_str().to_owned());
    args.push(layout.output.as_os_str().to_owned());

    if let Some(parent) = layout.output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    cmd::execute(ctx, program, args.as_slice())?;

    Ok(layout.output.clone())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::deb::stage;
    use crate::test_utils::Fixture;

    #[test]
    fn archiver_receives_staging_root_and_output() {
        let fx = Fixture::new();
        let layout = fx.layout_with_archiver(&fx.fake_archiver());
        stage::run(&fx.ctx, &layout, false).unwrap();

        let output = build(&fx.ctx, &layout).unwrap();

        assert_eq!(output, fx.package_dir().join("otterlang.deb"));
        let listing = fs::read_to_string(&output).unwrap();
        assert_eq!(
            listing.lines().collect::<Vec<_>>(),
            vec![
                "./DEBIAN/bin/otter",
                "./DEBIAN/changelog",
                "./DEBIAN/control",
                "./DEBIAN/copyright",
                "./DEBIAN/rules",
            ]
        );
    }

    #[test]
    fn failing_archiver_is_reported() {
        let fx = Fixture::new();
        let layout = fx.layout_with_archiver("false");
        stage::run(&fx.ctx, &layout, false).unwrap();

        let err = build(&fx.ctx, &layout).unwrap_err();
        assert!(matches!(err, Error::ArchiveFailed(_)));
    }

    #[test]
    fn missing_archiver_is_reported() {
        let fx = Fixture::new();
        let layout = fx.layout_with_archiver("otter-deb-missing-archiver");
        stage::run(&fx.ctx, &layout, false).unwrap();

        let err = build(&fx.ctx, &layout).unwrap_err();
        assert!(matches!(err, Error::ArchiveFailed(_)));
        assert!(!layout.output.exists());
    }

    #[test]
    fn blank_archiver_is_rejected() {
        let fx = Fixture::new();
        let mut layout = fx.layout();
        layout.archiver = "   ".to_string();

        let err = build(&fx.ctx, &layout).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn output_parent_is_created() {
        let fx = Fixture::new();
        let mut layout = fx.layout_with_archiver(&fx.fake_archiver());
        layout.output = fx.path("dist/nightly/otterlang.deb");
        stage::run(&fx.ctx, &layout, false).unwrap();

        build(&fx.ctx, &layout).unwrap();

        assert!(layout.output.is_file());
    }
}
