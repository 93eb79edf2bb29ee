//! Report generator.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use base64::Engine;
use chrono::{DateTime, Local};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use streamcheck_config::{ArtifactsConfig, ReportConfig};

use crate::error::ReportError;
use crate::model::{Feature, Totals};
use crate::render::{self, ReportPage};

/// Where the report was written and what it counted.
#[derive(Debug, Clone)]
pub struct ReportOutput {
    pub path: PathBuf,
    pub totals: Totals,
}

/// Turns a directory of Cucumber JSON files into `index.html`.
pub struct ReportGenerator {
    config: ReportConfig,
    json_dir: PathBuf,
    output_dir: PathBuf,
    screenshots_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(config: &ReportConfig, artifacts: &ArtifactsConfig) -> Self {
        Self {
            config: config.clone(),
            json_dir: artifacts.reports_dir.clone(),
            output_dir: artifacts.html_dir.clone(),
            screenshots_dir: artifacts.screenshots_dir.clone(),
        }
    }

    /// Read results from `dir` instead of the configured reports directory.
    pub fn with_json_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.json_dir = dir.into();
        self
    }

    /// Write `index.html` into `dir` instead of the configured HTML directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn generate(&self) -> Result<ReportOutput, ReportError> {
        let files = self.result_files();
        if files.is_empty() {
            return Err(ReportError::NoResults(self.json_dir.clone()));
        }

        let mut features = Vec::new();
        let mut first_write: Option<SystemTime> = None;
        let mut last_write: Option<SystemTime> = None;

        for path in &files {
            let content = fs::read_to_string(path)?;
            let parsed: Vec<Feature> =
                serde_json::from_str(&content).map_err(|source| ReportError::Parse {
                    path: path.clone(),
                    source,
                })?;
            debug!("Loaded {} feature(s) from {}", parsed.len(), path.display());
            features.extend(parsed);

            if let Ok(modified) = fs::metadata(path).and_then(|m| m.modified()) {
                first_write = Some(first_write.map_or(modified, |t| t.min(modified)));
                last_write = Some(last_write.map_or(modified, |t| t.max(modified)));
            }
        }

        let (started, finished) = run_window(&features, first_write, last_write);
        let totals = Totals::from_features(&features);

        let screenshots = if self.config.automatically_add_screenshots {
            self.load_screenshots()
        } else {
            HashMap::new()
        };

        let html = render::render(&ReportPage {
            config: &self.config,
            features: &features,
            totals,
            platform_name: std::env::consts::OS,
            platform_arch: std::env::consts::ARCH,
            started,
            finished,
            screenshots: &screenshots,
        });

        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join("index.html");
        fs::write(&path, html)?;

        info!(
            "Wrote report to {} ({} scenarios, {} failed)",
            path.display(),
            totals.scenarios,
            totals.scenarios_failed
        );
        Ok(ReportOutput { path, totals })
    }

    /// `*.json` files directly inside the JSON directory, sorted by name.
    fn result_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(&self.json_dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();
        files
    }

    /// PNG screenshots keyed by file stem, as `data:` URIs.
    fn load_screenshots(&self) -> HashMap<String, String> {
        let mut screenshots = HashMap::new();
        if !self.screenshots_dir.is_dir() {
            return screenshots;
        }

        for entry in WalkDir::new(&self.screenshots_dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file() || !is_png(path) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match fs::read(path) {
                Ok(bytes) => {
                    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
                    screenshots.insert(stem.to_string(), format!("data:image/png;base64,{}", encoded));
                }
                Err(e) => warn!("Skipping screenshot {}: {}", path.display(), e),
            }
        }

        debug!("Found {} screenshot(s)", screenshots.len());
        screenshots
    }
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

/// Run start and end.
///
/// The end is the newest result file; the start is the oldest one, pushed
/// back by the recorded duration when that reaches further.
fn run_window(
    features: &[Feature],
    first_write: Option<SystemTime>,
    last_write: Option<SystemTime>,
) -> (DateTime<Local>, DateTime<Local>) {
    let finished: DateTime<Local> = last_write.map(Into::into).unwrap_or_else(Local::now);
    let first: DateTime<Local> = first_write.map(Into::into).unwrap_or(finished);

    let recorded: std::time::Duration = features.iter().map(Feature::duration).sum();
    let started = chrono::Duration::from_std(recorded)
        .ok()
        .and_then(|d| finished.checked_sub_signed(d))
        .map_or(first, |by_duration| by_duration.min(first));

    (started, finished)
}
