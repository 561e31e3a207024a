use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use seekletter::board::browser::{BrowserOptions, ChromeCredentialSource};
use seekletter::board::session::saved_jobs_url;
use seekletter::board::{acquire_credentials, BoardSession, JobAdDetailsExtractor};
use seekletter::cli::{Cli, Commands};
use seekletter::collector::{collect_saved_jobs, CollectOptions, CollectSummary};
use seekletter::config::Config;
use seekletter::letters::{generate_letters, GenerateOptions, LetterContext, PromptTemplate};
use seekletter::llm_client::LlmClient;
use seekletter::store::{JobState, JobStore};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(dir) = cli.jobs_dir {
        config.jobs_dir = dir;
    }

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Collect {
            login,
            refresh,
            keep_open,
            profile_dir,
        } => {
            if let Some(dir) = profile_dir {
                config.board.profile_dir = dir;
            }
            run_collect(&config, login, keep_open, CollectOptions { refresh }).await
        }
        Commands::Generate {
            prompt,
            cv,
            model,
            dry_run,
        } => {
            if let Some(path) = prompt {
                config.prompt_path = path;
            }
            if let Some(path) = cv {
                config.cv_path = path;
            }
            if let Some(model) = model {
                config.openai_model = model;
            }
            run_generate(&config, GenerateOptions { dry_run }).await
        }
        Commands::Status => run_status(&config),
    }
}

async fn run_collect(
    config: &Config,
    login: bool,
    keep_open: bool,
    options: CollectOptions,
) -> Result<()> {
    let store = JobStore::new(&config.jobs_dir);
    let browser = ChromeCredentialSource::launch(&BrowserOptions::new(&config.board.profile_dir))
        .await
        .context("Could not start Chrome")?;

    let result = collect_with_browser(&browser, config, login, &store, &options).await;

    if keep_open {
        wait_for_enter("Press Enter to quit...").await?;
    }
    if let Err(e) = browser.close().await {
        warn!("{e}");
    }

    let summary = result?;
    info!(
        "Collected {} of {} saved jobs into {} ({} already present, {} without a description)",
        summary.saved,
        summary.total,
        store.root().display(),
        summary.already_collected,
        summary.placeholders
    );
    Ok(())
}

async fn collect_with_browser(
    browser: &ChromeCredentialSource,
    config: &Config,
    login: bool,
    store: &JobStore,
    options: &CollectOptions,
) -> Result<CollectSummary> {
    if login {
        browser.open(&config.board.base_url).await?;
        wait_for_enter("Log in (including any 2FA) in the browser window, then press Enter...")
            .await?;
    }

    browser.open(&saved_jobs_url(&config.board.base_url)).await?;
    let credentials = acquire_credentials(browser).await?;
    let session = BoardSession::new(&credentials, config.board.clone())?;

    let summary = collect_saved_jobs(&session, &JobAdDetailsExtractor, store, options).await?;
    Ok(summary)
}

async fn run_generate(config: &Config, options: GenerateOptions) -> Result<()> {
    let api_key = if options.dry_run {
        config.openai_api_key.clone().unwrap_or_default()
    } else {
        config.require_openai_key()?.to_string()
    };

    let template = PromptTemplate::load(&config.prompt_path)?;
    let cv_text = std::fs::read_to_string(&config.cv_path)
        .with_context(|| format!("Cannot read résumé {}", config.cv_path.display()))?;
    let llm = LlmClient::new(api_key, &config.openai_base_url, &config.openai_model)?;
    info!("LLM client initialized (model: {})", llm.model());

    let store = JobStore::new(&config.jobs_dir);
    let ctx = LetterContext {
        template: &template,
        cv_text: &cv_text,
        model: &llm,
    };
    let summary = generate_letters(&store, &ctx, &options).await?;

    info!(
        "Done: {} generated, {} already done, {} skipped, {} failed, {} pending",
        summary.generated, summary.already_done, summary.skipped, summary.failed, summary.pending
    );
    Ok(())
}

fn run_status(config: &Config) -> Result<()> {
    let store = JobStore::new(&config.jobs_dir);
    if !store.root().is_dir() {
        println!("No job store at {}", store.root().display());
        return Ok(());
    }

    let mut counts: BTreeMap<JobState, usize> = BTreeMap::new();
    for folder in store.folders()? {
        let state = folder.state();
        println!("{:<11} {}", state.to_string(), folder.name());
        *counts.entry(state).or_default() += 1;
    }

    let totals = counts
        .iter()
        .map(|(state, n)| format!("{n} {state}"))
        .collect::<Vec<_>>()
        .join(", ");
    println!("{}", if totals.is_empty() { "0 jobs".to_string() } else { totals });
    Ok(())
}

async fn wait_for_enter(prompt: &str) -> Result<()> {
    println!("{prompt}");
    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("Failed to read from stdin")?;
    Ok(())
}
