use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use upgrade_advisor_core::prompt::{build_replacement_prompt, build_upgrade_prompt};
use upgrade_advisor_core::{
    classify, llm, report, Classified, GeminiClient, LlmSettings, QueryOptions, SnykScanner,
    VulnerabilityScanner,
};

#[derive(Parser, Debug)]
#[command(
    name = "upgrade-advisor",
    author,
    version,
    about = "AI-assisted dependency upgrade planner"
)]
struct Cli {
    /// Project directory to scan; prompted for interactively when omitted
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Vulnerability scanner executable to invoke
    #[arg(long = "scanner-bin", value_name = "BIN", default_value = "snyk")]
    scanner_bin: String,

    /// Generation model override (also UPGRADE_ADVISOR_MODEL)
    #[arg(long, value_name = "MODEL")]
    model: Option<String>,

    /// Print the classified findings as JSON before querying the model
    #[arg(long)]
    findings_json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();
    run(Cli::parse()).await
}

async fn run(cli: Cli) -> Result<()> {
    let mut settings = LlmSettings::from_env()?;
    if cli.model.is_some() {
        settings.model = cli.model.clone();
    }
    let client = GeminiClient::new(&settings)?;

    let project_dir = match cli.path {
        Some(path) => path,
        None => prompt_for_path()?,
    };
    if !project_dir.is_dir() {
        bail!(
            "`{}` is not a directory; provide a valid project path",
            project_dir.display()
        );
    }

    let scanner = SnykScanner::new(cli.scanner_bin);
    let output = scanner
        .scan(&project_dir)
        .await
        .context("vulnerability scan failed")?;
    let classified = classify(output.flatten());
    info!(
        fixable = classified.fixable.len(),
        unfixable = classified.unfixable.len(),
        "classified scan findings"
    );

    if cli.findings_json {
        println!("{}", serde_json::to_string_pretty(&classified)?);
    }

    let options = QueryOptions {
        retry_delay: settings.retry_delay(),
    };
    advise(&client, &classified, &options).await;
    Ok(())
}

/// Run the two advisory queries. Each one fails independently: an error in
/// the upgrade-plan query is shown inline and does not stop the
/// replacement-suggestions query.
async fn advise(client: &GeminiClient, classified: &Classified, options: &QueryOptions) {
    if classified.fixable.is_empty() {
        println!("\n{}", report::NO_FIXABLE_NOTICE);
    } else {
        info!("requesting an upgrade plan from the model");
        let prompt = build_upgrade_prompt(&classified.fixable);
        let body = match llm::query(client, &prompt, options).await {
            Ok(text) => text,
            Err(err) => format!("Could not generate an upgrade plan: {err}"),
        };
        print!("{}", report::render_section(report::UPGRADE_PLAN_TITLE, &body));
    }

    if classified.unfixable.is_empty() {
        println!("\n{}", report::ALL_FIXABLE_NOTICE);
    } else {
        info!("requesting replacement suggestions from the model");
        let prompt = build_replacement_prompt(&classified.unfixable);
        let body = match llm::query(client, &prompt, options).await {
            Ok(text) => text,
            Err(err) => format!("Could not generate replacement suggestions: {err}"),
        };
        print!(
            "{}",
            report::render_section(report::REPLACEMENTS_TITLE, &body)
        );
    }
}

fn prompt_for_path() -> Result<PathBuf> {
    print!("Please enter the full path to the project you want to scan: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read project path from stdin")?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        bail!("no project path provided");
    }
    Ok(PathBuf::from(trimmed))
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tokio=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .try_init();
}
