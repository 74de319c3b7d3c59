//! Vitae - command line front end
//!
//! Wires the infrastructure adapters into the application services and
//! exposes the resume-analysis operations as subcommands.

mod commands;
mod config;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Vitae resume-analysis client.
#[derive(Debug, Parser)]
#[command(name = "vitae", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Available operations.
#[derive(Debug, Subcommand)]
enum Command {
    /// Create an account and sign in.
    Signup {
        /// Account email address.
        email: String,
        /// Account password.
        password: String,
        /// Display name for the profile.
        #[arg(long)]
        full_name: String,
    },
    /// Verify credentials by signing in.
    Login {
        /// Account email address.
        email: String,
        /// Account password.
        password: String,
    },
    /// Clear the local session state.
    Logout,
    /// Upload a resume for analysis.
    Upload {
        /// Path to a PDF, DOC, or DOCX file.
        file: std::path::PathBuf,
    },
    /// List stored resumes.
    List,
    /// Show one resume.
    Show {
        /// Resume id.
        id: i64,
    },
    /// Show the extracted skills of one resume.
    Skills {
        /// Resume id.
        id: i64,
    },
    /// Delete a resume.
    Delete {
        /// Resume id.
        id: i64,
    },
    /// Ask a single career question.
    Ask {
        /// The question text.
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
        /// Scope the question to one resume.
        #[arg(long)]
        resume: Option<i64>,
    },
    /// Interactive question session with expiry monitoring.
    Chat {
        /// Scope questions to one resume.
        #[arg(long)]
        resume: Option<i64>,
    },
    /// Filter resumes by skills, education, and experience.
    Filter {
        /// Required skill (repeatable).
        #[arg(long = "skill")]
        skills: Vec<String>,
        /// Accepted education level (repeatable).
        #[arg(long = "education")]
        education_levels: Vec<String>,
        /// Minimum years of experience.
        #[arg(long)]
        min_experience: Option<u32>,
        /// Maximum years of experience.
        #[arg(long)]
        max_experience: Option<u32>,
    },
    /// Show the skill distribution across all resumes.
    Summary,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match commands::run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
