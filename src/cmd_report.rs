//! Offline subcommands: report generation and config validation.

use std::path::PathBuf;

use tracing::{info, warn};

use streamcheck_config::{Config, ConfigValidator, ValidationResult};
use streamcheck_report::ReportGenerator;

pub(crate) fn run_report(
    config: &Config,
    json_dir: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut generator = ReportGenerator::new(&config.report, &config.artifacts);
    if let Some(dir) = json_dir {
        generator = generator.with_json_dir(dir);
    }
    if let Some(dir) = output {
        generator = generator.with_output_dir(dir);
    }

    let output = generator.generate()?;
    let totals = output.totals;
    println!("Report: {}", output.path.display());
    println!(
        "Scenarios: {} total, {} passed, {} failed",
        totals.scenarios, totals.scenarios_passed, totals.scenarios_failed
    );
    Ok(())
}

pub(crate) fn run_validate(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let result = ConfigValidator::validate(config)?;
    for line in summary_lines(&result) {
        println!("{}", line);
    }

    if result.is_valid() {
        info!("Configuration is valid");
        Ok(())
    } else {
        warn!("Configuration has {} error(s)", result.errors.len());
        Err(format!("{} configuration error(s)", result.errors.len()).into())
    }
}

fn summary_lines(result: &ValidationResult) -> Vec<String> {
    let mut lines: Vec<String> = result
        .errors
        .iter()
        .map(|e| format!("error: {}: {}", e.path, e.message))
        .collect();
    lines.extend(
        result
            .warnings
            .iter()
            .map(|w| format!("warning: {}: {}", w.path, w.message)),
    );
    if lines.is_empty() {
        lines.push("ok".to_string());
    }
    lines
}
