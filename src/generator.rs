//! Top-level orchestration of a generation run.
//!
//! [`IconGenerator::from_profile`] performs every precondition check before
//! anything touches the output directories, then [`IconGenerator::run`]
//! drives each selected platform pipeline independently.

use std::path::{Path, PathBuf};

use log::info;

use crate::config::GenerationConfig;
use crate::error::{PipelineError, PreconditionError};
use crate::icon::SourceIcon;
use crate::mask::{self, Mask};
use crate::profile::GenerationProfile;
use crate::raster::Rasterizer;
use crate::report::{GenerationReport, Platform};
use crate::{android, discovery, ios};

/// A platform pipeline and the directory it writes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub platform: Platform,
    pub root: PathBuf,
}

/// Validated inputs of one run.
#[derive(Debug, Clone)]
pub struct GenerationJob<I> {
    pub source: SourceIcon,
    pub mask: Option<Mask<I>>,
    pub targets: Vec<Target>,
}

/// Result of one platform pipeline.
#[derive(Debug)]
pub struct PlatformOutcome {
    pub platform: Platform,
    pub result: Result<GenerationReport, PipelineError>,
}

impl PlatformOutcome {
    /// Returns true if the pipeline finished and every output was written.
    pub fn is_success(&self) -> bool {
        self.result.as_ref().is_ok_and(GenerationReport::is_complete)
    }
}

/// Drives the platform pipelines with one rasterizer and one configuration.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use appicon_renderer::{GenerationProfile, IconGenerator, PixelRasterizer};
///
/// let profile = GenerationProfile::new()
///     .with_source("app_icon.png")
///     .with_ios_project("MyApp");
/// let (generator, job) =
///     IconGenerator::from_profile(PixelRasterizer::new(), &profile, Path::new(".")).unwrap();
///
/// for outcome in generator.run(&job) {
///     println!("{}: {}", outcome.platform, outcome.is_success());
/// }
/// ```
pub struct IconGenerator<R: Rasterizer> {
    rasterizer: R,
    config: GenerationConfig,
}

impl<R: Rasterizer> IconGenerator<R> {
    pub fn new(rasterizer: R, config: GenerationConfig) -> Self {
        Self { rasterizer, config }
    }

    /// Validates `profile` and resolves every path relative to `project_root`.
    ///
    /// Fails before any file is written if the background color, padding
    /// ratio or source icon is invalid, or if iOS output is requested
    /// without a project name or output directory. An unusable mask only
    /// produces a warning.
    pub fn from_profile(
        rasterizer: R,
        profile: &GenerationProfile,
        project_root: &Path,
    ) -> Result<(Self, GenerationJob<R::Image>), PreconditionError> {
        let config = profile.config()?;

        let source_path = profile
            .source
            .as_ref()
            .map(|path| project_root.join(path))
            .unwrap_or_else(|| project_root.join(discovery::DEFAULT_ICON_NAME));
        let source = SourceIcon::open(&rasterizer, &source_path)?;

        let mut targets = Vec::new();
        for &platform in profile.platform.platforms() {
            let root = match (&profile.output, platform) {
                (Some(output), _) => project_root.join(output),
                (None, Platform::Android) => android::default_root(project_root),
                (None, Platform::Ios) => {
                    let project = profile
                        .ios_project
                        .clone()
                        .or_else(|| discovery::find_ios_project(project_root))
                        .ok_or(PreconditionError::MissingIosProject)?;
                    ios::default_root(project_root, &project)
                }
            };
            targets.push(Target { platform, root });
        }

        let mask = if profile.platform.includes(Platform::Android) {
            let mask_path = profile.mask.as_ref().map(|path| project_root.join(path));
            mask::load(&rasterizer, mask_path.as_deref())
        } else {
            None
        };

        let job = GenerationJob {
            source,
            mask,
            targets,
        };
        Ok((Self::new(rasterizer, config), job))
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Runs the Android pipeline into `root`.
    pub fn android(
        &self,
        source: &SourceIcon,
        mask: Option<&Mask<R::Image>>,
        root: &Path,
    ) -> Result<GenerationReport, PipelineError> {
        android::generate(&self.rasterizer, &self.config, source, mask, root)
    }

    /// Runs the iOS pipeline into `root`.
    pub fn ios(&self, source: &SourceIcon, root: &Path) -> Result<GenerationReport, PipelineError> {
        ios::generate(&self.rasterizer, &self.config, source, root)
    }

    /// Runs every target of `job`. A failing platform does not stop the others.
    pub fn run(&self, job: &GenerationJob<R::Image>) -> Vec<PlatformOutcome> {
        job.targets
            .iter()
            .map(|target| {
                info!("generating {} icons into {}", target.platform, target.root.display());
                let result = match target.platform {
                    Platform::Android => self.android(&job.source, job.mask.as_ref(), &target.root),
                    Platform::Ios => self.ios(&job.source, &target.root),
                };
                PlatformOutcome {
                    platform: target.platform,
                    result,
                }
            })
            .collect()
    }
}
