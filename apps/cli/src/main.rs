use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{load_settings, render_text, AuditClient, AuditorSettings, SubmitOutcome};
use shared::protocol::is_submittable_text;
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "auditor", about = "Run a draft/critique/synthesis compliance audit")]
struct Args {
    /// Document text to audit; falls back to --file, then stdin.
    #[arg(long, conflicts_with = "file")]
    text: Option<String>,
    #[arg(long)]
    file: Option<PathBuf>,
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Print the raw report as JSON instead of the rendered trace.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn apply_to(&self, settings: &mut AuditorSettings) {
        if let Some(endpoint) = &self.endpoint {
            settings.endpoint_url = endpoint.clone();
        }
        if let Some(timeout_secs) = self.timeout_secs {
            settings.request_timeout_secs = timeout_secs;
        }
    }
}

async fn read_document(args: &Args) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read document '{}'", path.display()));
    }
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("failed to read document from stdin")?;
    Ok(text)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings();
    args.apply_to(&mut settings);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let text = read_document(&args).await?;
    if !is_submittable_text(&text) {
        bail!("document text is empty; pass --text, --file, or pipe text on stdin");
    }

    let client = AuditClient::from_settings(&settings)?;
    info!(endpoint = %settings.endpoint_url, "starting audit");

    match client.submit(text).await {
        SubmitOutcome::Completed => {}
        SubmitOutcome::Failed(kind) => {
            let detail = client
                .last_failure()
                .await
                .map(|diagnostic| diagnostic.message)
                .unwrap_or_default();
            bail!("audit failed ({}): {detail}", kind.label());
        }
        other => bail!("audit did not complete: {other:?}"),
    }

    if args.json {
        let state = client.snapshot().await;
        if let Some(report) = state.report() {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    } else {
        print!("{}", render_text(&client.display_model().await));
    }

    Ok(())
}
