//! Subcommand handlers.
//!
//! Builds the adapter stack once per invocation, signs in where the
//! operation needs a session, and prints results for the terminal.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use vitae_application::{
    ApiClient, NotificationFeed, ResumeService, SessionConfig, SessionMonitor,
    ports::{Clock, ExpiryStore, IdentityProvider},
};
use vitae_domain::{FilterCriteria, format_file_size, responses};
use vitae_infrastructure::{
    ConsoleNavigator, FileExpiryStore, ReqwestTransport, RestIdentityProvider, SystemClock,
};

use crate::{Command, config::AppConfig};

type Identity = RestIdentityProvider<SystemClock, FileExpiryStore>;
type Service = ResumeService<ReqwestTransport, Identity, ConsoleNavigator>;

struct App {
    config: AppConfig,
    identity: Arc<Identity>,
    navigator: Arc<ConsoleNavigator>,
    service: Service,
    feed: NotificationFeed,
}

/// Executes one subcommand.
///
/// # Errors
///
/// Returns any configuration, authentication, or API error hit along
/// the way; the caller prints it and sets the exit code.
pub async fn run(command: Command, config: AppConfig) -> Result<(), Box<dyn Error>> {
    let app = build(config)?;
    note_stale_session().await;

    match command {
        Command::Signup {
            email,
            password,
            full_name,
        } => {
            let profile = app.identity.sign_up(&email, &password, &full_name).await?;
            println!("Account created for {}.", profile.email);
        }
        Command::Login { email, password } => {
            let profile = app.identity.sign_in(&email, &password).await?;
            println!(
                "Signed in as {}.",
                profile.full_name.as_deref().unwrap_or(&profile.email)
            );
        }
        Command::Logout => {
            app.identity.sign_out().await;
            println!("Signed out.");
        }
        Command::Upload { file } => {
            app.sign_in_from_env().await?;
            let file_name = file
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or("upload path has no usable file name")?
                .to_string();
            let content_type = mime_guess::from_path(&file)
                .first_raw()
                .unwrap_or("application/octet-stream");
            let bytes = tokio::fs::read(&file).await?;
            let size = format_file_size(bytes.len() as u64);

            let receipt = app.service.upload(&file_name, content_type, bytes).await?;
            app.feed.push_upload_notices(receipt.resume_id, &file_name);

            println!(
                "Uploaded {file_name} ({size}) as resume {}.",
                receipt.resume_id
            );
            for notice in app.feed.snapshot().iter().rev() {
                println!("  [{:?}] {}: {}", notice.kind, notice.title, notice.message);
            }
        }
        Command::List => {
            app.sign_in_from_env().await?;
            let resumes = app.service.list().await?;
            if resumes.is_empty() {
                println!("No resumes stored.");
            }
            for resume in resumes {
                println!(
                    "{:>4}  {}  {}  [{}]",
                    resume.id,
                    resume.created_at,
                    resume.filename,
                    resume.skills.join(", ")
                );
            }
        }
        Command::Show { id } => {
            app.sign_in_from_env().await?;
            let resume = app.service.detail(id).await?;
            println!("Resume {}", resume.id);
            println!("  file:     {} ({})", resume.filename, resume.file_type);
            println!("  uploaded: {}", resume.created_at);
            println!("  skills:   {}", resume.skills.join(", "));
        }
        Command::Skills { id } => {
            app.sign_in_from_env().await?;
            let skills = app.service.skills(id).await?;
            for (category, entries) in skills {
                println!("{category}: {}", entries.join(", "));
            }
        }
        Command::Delete { id } => {
            app.sign_in_from_env().await?;
            let message = app.service.delete(id).await?;
            println!("{message}");
        }
        Command::Ask { question, resume } => {
            app.sign_in_from_env().await?;
            let question = question.join(" ");
            let answer = app.service.ask(&question, resume).await?;
            println!("{answer}");
        }
        Command::Chat { resume } => {
            app.sign_in_from_env().await?;
            chat(&app, resume).await?;
        }
        Command::Filter {
            skills,
            education_levels,
            min_experience,
            max_experience,
        } => {
            app.sign_in_from_env().await?;
            let criteria = FilterCriteria {
                skills,
                education_levels,
                min_experience,
                max_experience,
            };
            let outcome = app.service.filter(&criteria).await?;
            println!("{} matching resume(s)", outcome.total);
            for resume in outcome.resumes {
                println!(
                    "{:>4}  {}  {:.1} years  {}",
                    resume.id, resume.filename, resume.years_of_experience, resume.education_level
                );
            }
        }
        Command::Summary => {
            app.sign_in_from_env().await?;
            let counts = app.service.skill_distribution().await?;
            if counts.is_empty() {
                println!("No skills extracted yet.");
            }
            for (skill, count) in counts {
                println!("{count:>4}  {skill}");
            }
        }
    }

    Ok(())
}

fn build(config: AppConfig) -> Result<App, Box<dyn Error>> {
    let transport = Arc::new(ReqwestTransport::new()?);
    let identity = Arc::new(RestIdentityProvider::new(
        &config.identity_url,
        config.identity_client_id.clone(),
        SystemClock::new(),
        FileExpiryStore::new("."),
    )?);
    let navigator = Arc::new(ConsoleNavigator::new());
    let client = Arc::new(ApiClient::new(
        transport,
        identity.clone(),
        navigator.clone(),
        config.api_url.clone(),
    ));

    Ok(App {
        config,
        identity,
        navigator,
        service: ResumeService::new(client),
        feed: NotificationFeed::new(),
    })
}

impl App {
    /// Signs in with the configured credentials; required by every
    /// operation that talks to the backend.
    async fn sign_in_from_env(&self) -> Result<(), Box<dyn Error>> {
        let (Some(email), Some(password)) = (&self.config.email, &self.config.password) else {
            return Err(
                "set VITAE_EMAIL and VITAE_PASSWORD to authenticate non-interactive commands"
                    .into(),
            );
        };
        self.identity.sign_in(email, password).await?;
        Ok(())
    }
}

/// Interactive question loop. Every line of input counts as activity
/// for the session monitor.
async fn chat(app: &App, resume: Option<i64>) -> Result<(), Box<dyn Error>> {
    let monitor = SessionMonitor::spawn(
        app.identity.clone(),
        app.navigator.clone(),
        SessionConfig {
            debounce: Duration::from_secs(1),
            session_timeout: Duration::from_secs(app.config.session_timeout_secs),
        },
    );

    println!("Ask a career question ('exit' or an empty line to quit).");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let question = line.trim();
        if question.is_empty() || question.eq_ignore_ascii_case("exit") {
            break;
        }
        if !monitor.is_running() {
            break;
        }
        monitor.note_activity();

        match app.service.ask(question, resume).await {
            Ok(answer) => println!("\n{answer}\n"),
            Err(err) => {
                tracing::error!("chat request failed: {err}");
                println!("\n{}\n", responses::REQUEST_ERROR);
            }
        }
    }
    monitor.stop();
    Ok(())
}

/// Logs a note when a previous session's persisted expiry has passed.
async fn note_stale_session() {
    let store = FileExpiryStore::new(".");
    match store.load().await {
        Ok(Some(expires_at)) if expires_at <= SystemClock::new().now() => {
            tracing::info!("previous session expired at {expires_at}");
        }
        Ok(_) => {}
        Err(err) => tracing::debug!("could not read persisted session expiry: {err}"),
    }
}
