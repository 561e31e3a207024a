use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "seekletter",
    about = "Collect saved SEEK jobs and draft cover letters for them",
    version
)]
pub struct Cli {
    /// Job store root (overrides JOBS_DIR)
    #[arg(long, global = true)]
    pub jobs_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Pull saved jobs from the board into the job store
    Collect {
        /// Open the board first and wait for a manual login before collecting
        #[arg(long)]
        login: bool,

        /// Re-fetch jobs that are already in the store
        #[arg(long)]
        refresh: bool,

        /// Keep the browser open until Enter is pressed
        #[arg(long)]
        keep_open: bool,

        /// Chrome profile directory holding the board session (overrides SEEK_PROFILE_DIR)
        #[arg(long)]
        profile_dir: Option<PathBuf>,
    },
    /// Write a cover letter for every collected job that lacks one
    Generate {
        /// Prompt template (overrides PROMPT_PATH)
        #[arg(long)]
        prompt: Option<PathBuf>,

        /// Résumé text (overrides CV_PATH)
        #[arg(long)]
        cv: Option<PathBuf>,

        /// Model name (overrides OPENAI_MODEL)
        #[arg(long)]
        model: Option<String>,

        /// Render prompts but do not call the model
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the pipeline state of every job folder
    Status,
}
