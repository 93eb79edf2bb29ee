//! HTML rendering.

use std::collections::HashMap;
use std::fmt::Write;
use std::time::Duration;

use chrono::{DateTime, Local};

use streamcheck_config::ReportConfig;

use crate::model::{Feature, Scenario, Totals};

const STYLE: &str = "body{font-family:sans-serif;margin:2em;color:#222}\
table{border-collapse:collapse;width:100%;margin-bottom:1.5em}\
th,td{border:1px solid #ddd;padding:6px 8px;text-align:left;vertical-align:top}\
th{background:#f4f4f4}.passed{color:#2e7d32}.failed{color:#c62828}\
.skipped,.pending,.undefined,.unknown{color:#9e9e9e}\
.panel{display:inline-block;vertical-align:top;margin:0 2em 1em 0}\
pre{white-space:pre-wrap;margin:4px 0}img{max-width:480px;border:1px solid #ccc}";

/// Everything one report page shows.
pub(crate) struct ReportPage<'a> {
    pub config: &'a ReportConfig,
    pub features: &'a [Feature],
    pub totals: Totals,
    pub platform_name: &'a str,
    pub platform_arch: &'a str,
    pub started: DateTime<Local>,
    pub finished: DateTime<Local>,
    /// Scenario screenshot stem to `data:` URI.
    pub screenshots: &'a HashMap<String, String>,
}

/// Escape text for HTML element and attribute content.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs >= 60.0 {
        format!("{}m {:.1}s", d.as_secs() / 60, secs % 60.0)
    } else {
        format!("{:.3}s", secs)
    }
}

/// `Play and pause a video` -> `Play_and_pause_a_video`.
pub(crate) fn screenshot_stem(scenario_name: &str) -> String {
    scenario_name.split_whitespace().collect::<Vec<_>>().join("_")
}

// Writing into a String cannot fail, so `write!` results are ignored below.
pub(crate) fn render(page: &ReportPage<'_>) -> String {
    let cfg = page.config;
    let mut html = String::new();

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n<h1>{}</h1>\n",
        escape(&cfg.page_title),
        STYLE,
        escape(&cfg.report_name)
    );

    render_metadata(&mut html, page);
    render_summary(&mut html, &page.totals);

    for feature in page.features {
        render_feature(&mut html, feature, page);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_metadata(html: &mut String, page: &ReportPage<'_>) {
    let cfg = page.config;
    let time_format = "%Y-%m-%d %H:%M:%S";

    html.push_str("<div class=\"panel\"><h2>Metadata</h2><table>\n");
    for (label, value) in [
        ("Browser", format!("{} {}", cfg.browser_name, cfg.browser_version)),
        ("Device", cfg.device.clone()),
        ("Platform", format!("{} ({})", page.platform_name, page.platform_arch)),
    ] {
        let _ = writeln!(html, "<tr><th>{}</th><td>{}</td></tr>", label, escape(&value));
    }
    html.push_str("</table></div>\n");

    html.push_str("<div class=\"panel\"><h2>Run Info</h2><table>\n");
    let executed_by = cfg.executed_by.clone().unwrap_or_else(|| "-".to_string());
    for (label, value) in [
        ("Project", cfg.project.clone()),
        ("Release", cfg.release.clone()),
        ("Executed By", executed_by),
        ("Execution Start Time", page.started.format(time_format).to_string()),
        ("Execution End Time", page.finished.format(time_format).to_string()),
    ] {
        let _ = writeln!(html, "<tr><th>{}</th><td>{}</td></tr>", label, escape(&value));
    }
    html.push_str("</table></div>\n");
}

fn render_summary(html: &mut String, totals: &Totals) {
    let _ = write!(
        html,
        "<h2>Summary</h2>\n<table>\n<tr><th></th><th>Total</th><th>Passed</th><th>Failed</th></tr>\n\
         <tr><th>Features</th><td>{}</td><td class=\"passed\">{}</td><td class=\"failed\">{}</td></tr>\n\
         <tr><th>Scenarios</th><td>{}</td><td class=\"passed\">{}</td><td class=\"failed\">{}</td></tr>\n\
         <tr><th>Steps</th><td>{}</td><td class=\"passed\">{}</td><td class=\"failed\">{}</td></tr>\n\
         </table>\n",
        totals.features,
        totals.features - totals.features_failed,
        totals.features_failed,
        totals.scenarios,
        totals.scenarios_passed,
        totals.scenarios_failed,
        totals.steps,
        totals.steps_passed,
        totals.steps_failed,
    );
}

fn render_feature(html: &mut String, feature: &Feature, page: &ReportPage<'_>) {
    let status = feature.status();
    let _ = writeln!(
        html,
        "<h2>{}: {} <span class=\"{}\">({})</span> <small>{}</small></h2>",
        escape(&feature.keyword),
        escape(&feature.name),
        status.as_str(),
        status.as_str(),
        format_duration(feature.duration())
    );
    if let Some(uri) = &feature.uri {
        let _ = writeln!(html, "<p><code>{}</code></p>", escape(uri));
    }

    html.push_str(
        "<table>\n<tr><th>Scenario</th><th>Status</th><th>Duration</th><th>Steps</th></tr>\n",
    );
    for scenario in feature.scenarios() {
        render_scenario(html, scenario, page);
    }
    html.push_str("</table>\n");
}

fn render_scenario(html: &mut String, scenario: &Scenario, page: &ReportPage<'_>) {
    let status = scenario.status();
    let _ = write!(
        html,
        "<tr><td>{}</td><td class=\"{}\">{}</td><td>{}</td><td>",
        escape(&scenario.name),
        status.as_str(),
        status.as_str(),
        format_duration(scenario.duration())
    );

    for step in &scenario.steps {
        let step_status = step.result.status.as_str();
        let _ = writeln!(
            html,
            "<div class=\"{}\">{}{} <small>({})</small></div>",
            step_status,
            escape(&step.keyword),
            escape(&step.name),
            step_status
        );
        if let Some(message) = &step.result.error_message {
            let _ = writeln!(html, "<pre class=\"failed\">{}</pre>", escape(message));
        }
        for embedding in step.embeddings.iter().filter(|e| e.is_image()) {
            let _ = writeln!(
                html,
                "<img alt=\"{}\" src=\"data:{};base64,{}\">",
                escape(embedding.name.as_deref().unwrap_or("embedded screenshot")),
                escape(&embedding.mime_type),
                escape(&embedding.data)
            );
        }
    }

    if let Some(uri) = page.screenshots.get(&screenshot_stem(&scenario.name)) {
        let _ = writeln!(
            html,
            "<img alt=\"{}\" src=\"{}\">",
            escape(&scenario.name),
            escape(uri)
        );
    }

    html.push_str("</td></tr>\n");
}
