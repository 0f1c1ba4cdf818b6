use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};

use appicon_renderer::discovery::{self, DEFAULT_ICON_NAME};
use appicon_renderer::{
    GenerationProfile, IconGenerator, PixelRasterizer, PlatformSelection, RoundIconStyle,
};

/// Generate Android and iOS app icons from one square image.
#[derive(Debug, Parser)]
#[command(name = "appicon", version)]
struct Args {
    /// Source icon, at least 1024x1024. Searched for as app_icon.png when missing.
    #[arg(value_name = "SOURCE")]
    source: Option<PathBuf>,

    /// Background color used to flatten transparency (#RGB or #RRGGBB).
    #[arg(short, long)]
    background: Option<String>,

    /// Platforms to generate.
    #[arg(short, long, value_enum)]
    platform: Option<PlatformSelection>,

    /// PNG with alpha or SVG used to stencil Android adaptive foregrounds.
    #[arg(short, long)]
    mask: Option<PathBuf>,

    /// Write into this directory instead of the project's default locations.
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Xcode project name under ios/. Detected from the .xcodeproj when missing.
    #[arg(long, value_name = "NAME")]
    ios_project: Option<String>,

    /// Fraction of the adaptive canvas covered by the icon.
    #[arg(long, value_name = "RATIO")]
    padding_ratio: Option<f32>,

    /// How ic_launcher_round.png is drawn.
    #[arg(long, value_enum)]
    round_icons: Option<RoundIconStyle>,

    /// JSON profile providing defaults for every option above.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Project directory that default paths are resolved against.
    #[arg(long, value_name = "DIR", default_value = ".")]
    project_root: PathBuf,
}

fn load_profile(path: Option<&Path>) -> Result<GenerationProfile> {
    let Some(path) = path else {
        return Ok(GenerationProfile::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("cannot read profile {}", path.display()))?;
    GenerationProfile::from_json(&json)
        .with_context(|| format!("invalid profile {}", path.display()))
}

impl Args {
    /// Layers command-line flags over the profile file.
    fn merge_into(self, mut profile: GenerationProfile) -> GenerationProfile {
        if let Some(source) = self.source {
            profile.source = Some(source);
        }
        if let Some(background) = self.background {
            profile.background = background;
        }
        if let Some(platform) = self.platform {
            profile.platform = platform;
        }
        if let Some(mask) = self.mask {
            profile.mask = Some(mask);
        }
        if let Some(output) = self.output {
            profile.output = Some(output);
        }
        if let Some(project) = self.ios_project {
            profile.ios_project = Some(project);
        }
        if let Some(ratio) = self.padding_ratio {
            profile.padding_ratio = ratio;
        }
        if let Some(style) = self.round_icons {
            profile.round_icons = style;
        }
        profile
    }
}

/// Falls back to searching the project when the source does not exist.
fn resolve_source(profile: &mut GenerationProfile, project_root: &Path) -> Result<()> {
    let given = profile
        .source
        .as_ref()
        .map(|source| project_root.join(source))
        .unwrap_or_else(|| project_root.join(DEFAULT_ICON_NAME));
    if given.is_file() {
        return Ok(());
    }

    let found = discovery::find_file(project_root, DEFAULT_ICON_NAME)
        .with_context(|| format!("cannot search {}", project_root.display()))?
        .with_context(|| format!("could not find {DEFAULT_ICON_NAME} in {}", project_root.display()))?;
    warn!("{} not found, using detected icon {}", given.display(), found.display());
    profile.source = Some(found);
    Ok(())
}

/// Returns `Ok(false)` when a platform failed after generation started.
fn run(args: Args) -> Result<bool> {
    let project_root = args.project_root.clone();
    let base = load_profile(args.config.as_deref())?;
    let mut profile = args.merge_into(base);
    resolve_source(&mut profile, &project_root)?;

    let (generator, job) = IconGenerator::from_profile(PixelRasterizer::new(), &profile, &project_root)
        .context("cannot start generation")?;

    info!("source icon: {}", job.source.path().display());
    info!("background color: {}", generator.config().background());

    let mut success = true;
    for outcome in generator.run(&job) {
        match outcome.result.and_then(|report| report.into_result()) {
            Ok(report) => info!(
                "{}: {} files written to {}",
                outcome.platform,
                report.written.len(),
                report.root.display()
            ),
            Err(e) => {
                error!("{}: {e}", outcome.platform);
                success = false;
            }
        }
    }
    Ok(success)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_profile_keeps_parse_error_as_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_profile(Some(&path)).unwrap_err();
        assert!(err.to_string().starts_with("invalid profile"));
        assert!(err.downcast_ref::<serde_json::Error>().is_some());
    }

    #[test]
    fn missing_profile_names_the_file() {
        let err = load_profile(Some(Path::new("/nonexistent/profile.json"))).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/profile.json"));
        assert!(err.downcast_ref::<std::io::Error>().is_some());
    }

    #[test]
    fn missing_source_is_searched_for() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets/App_Icon.PNG"), b"").unwrap();

        let mut profile = GenerationProfile::new();
        resolve_source(&mut profile, dir.path()).unwrap();
        assert_eq!(profile.source, Some(dir.path().join("assets/App_Icon.PNG")));

        let empty = tempfile::tempdir().unwrap();
        let err = resolve_source(&mut GenerationProfile::new(), empty.path()).unwrap_err();
        assert!(err.to_string().contains(DEFAULT_ICON_NAME));
    }
}
