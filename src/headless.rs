//! Headless mode: one probe, one analysis, output on stdout.
//!
//! Used when there is no interactive terminal to draw on, or when asked for
//! explicitly with `--headless`.

use std::io::Write;

use anyhow::{anyhow, Context, Result};
use tracing::{info, warn};

use crate::api::AnalysisRequest;
use crate::app::{build_client, build_prober};
use crate::config::Config;
use crate::report::{MarkdownCapability, ReportRenderer};
use crate::ui::Theme;

/// What headless mode writes on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// The content exactly as the service returned it.
    Raw,
    /// Rendered HTML, when markdown is available.
    Html,
}

pub async fn run(config: &Config, capability: MarkdownCapability, output: Output) -> Result<()> {
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    run_to(config, capability, output, &mut stdout.lock(), &mut stderr.lock()).await
}

/// Probe and submit concurrently. The report goes to `out`; the health line
/// goes to `diag` whether or not the analysis succeeded.
pub async fn run_to<W: Write, D: Write>(
    config: &Config,
    capability: MarkdownCapability,
    output: Output,
    out: &mut W,
    diag: &mut D,
) -> Result<()> {
    let request = AnalysisRequest::new(&config.default_ticker, &config.default_prompt)
        .ok_or_else(|| anyhow!(t!("form.required").to_string()))?;

    let prober = build_prober(config);
    let client = build_client(config);
    info!(api_base = %config.api_base, ticker = %request.ticker, "headless analysis");

    let (health, result) = tokio::join!(prober.probe(), client.submit(&request));
    if !health.is_reachable() {
        warn!(?health, "service health check did not pass");
    }
    writeln!(diag, "{}", health.message()).context("failed to write health status")?;

    let response = result.map_err(|e| anyhow!("⚠️ {e}"))?;

    let renderer = ReportRenderer::new(capability, &Theme::default_dark());
    let report = renderer.render(&response.content_markdown);
    let body = match (output, report.html()) {
        (Output::Html, Some(html)) => html.as_str(),
        _ => response.content_markdown.as_str(),
    };

    out.write_all(body.as_bytes()).context("failed to write report")?;
    if !body.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}
