//! Provider portal CLI
//!
//! Drives the profile-content step from the terminal: manage the session
//! marker, then commit local headshot, gallery and reviews files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portal_core::common::{ProviderId, SelectedFile};
use portal_core::config::Config;
use portal_core::domains::onboarding::{
    messages, CommitWorkflow, OnboardingSession, PendingUploads, UploadSlot,
};
use portal_core::domains::users::User;
use portal_core::kernel::{BaseProviderStore, FileSessionStore, PortalDeps};

/// How long the CLI lingers for the detached signup notification before exiting
const NOTIFICATION_GRACE: Duration = Duration::from_secs(10);

#[derive(Parser)]
#[command(name = "portal")]
#[command(about = "Provider portal onboarding CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the onboarding session marker
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Upload profile files and complete onboarding
    Commit {
        #[arg(long)]
        headshot: PathBuf,
        #[arg(long)]
        gallery: PathBuf,
        #[arg(long)]
        reviews: PathBuf,
    },

    /// Print the session provider's record as JSON
    Provider,

    /// Normalize and validate a user document (JSON file)
    CheckUser { path: PathBuf },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Store the provider id created on the entry step
    Set { provider_id: String },
    /// Show the stored provider id
    Show,
    /// Remove the stored provider id
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,portal_core=debug,portal_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Session { action } => session(action, session_store(&load_config()?)),
        Commands::Commit {
            headshot,
            gallery,
            reviews,
        } => {
            let config = load_config()?;
            commit(&config, session_store(&config), [headshot, gallery, reviews]).await
        }
        Commands::Provider => {
            let config = load_config()?;
            provider(&config, session_store(&config)).await
        }
        Commands::CheckUser { path } => check_user(&path),
    }
}

fn load_config() -> Result<Config> {
    Config::from_env().context("Failed to load configuration")
}

fn session_store(config: &Config) -> Arc<FileSessionStore> {
    Arc::new(FileSessionStore::new(&config.session_file))
}

fn session(action: SessionAction, store: Arc<FileSessionStore>) -> Result<()> {
    match action {
        SessionAction::Set { provider_id } => {
            let id = ProviderId::parse(&provider_id).context("Invalid provider ID")?;
            OnboardingSession::start(store, id.clone())?;
            println!("Session started for provider {}", id);
        }
        SessionAction::Show => match OnboardingSession::load(store)?.provider_id() {
            Some(id) => println!("{}", id),
            None => println!("No provider in session"),
        },
        SessionAction::Clear => {
            OnboardingSession::load(store)?.clear()?;
            println!("Session cleared");
        }
    }
    Ok(())
}

async fn commit(config: &Config, store: Arc<FileSessionStore>, paths: [PathBuf; 3]) -> Result<()> {
    let mut uploads = PendingUploads::new();
    for (slot, path) in UploadSlot::ALL.into_iter().zip(paths) {
        let file = read_selected_file(&path).await?;
        if let Err(rejection) = uploads.select(slot, Some(file)) {
            eprintln!("{}: {}", slot.label(), messages::selection_rejected(&rejection));
        }
    }

    let deps = Arc::new(PortalDeps::from_config(config)?);
    let workflow = CommitWorkflow::with_deps(deps.clone());
    let mut session = OnboardingSession::load(store)?;

    println!("{}", messages::UPLOADING);

    match workflow.run(&mut session, &mut uploads).await {
        Ok(outcome) => {
            println!("{}", outcome.message);
            println!("Next: {}", config.route_for(outcome.next_step));

            if tokio::time::timeout(NOTIFICATION_GRACE, outcome.notification)
                .await
                .is_err()
            {
                tracing::warn!("Signup notification still pending at exit");
            }
            for failure in deps.side_effects.failures() {
                tracing::warn!(effect = failure.effect, error = %failure.error, "Side effect failed");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", messages::commit_error(&e));
            if let Some(step) = e.redirect() {
                println!("Next: {}", config.route_for(step));
            }
            std::process::exit(1);
        }
    }
}

async fn provider(config: &Config, store: Arc<FileSessionStore>) -> Result<()> {
    let session = OnboardingSession::load(store)?;
    let Some(provider_id) = session.provider_id() else {
        anyhow::bail!("No provider in session");
    };

    let deps = PortalDeps::from_config(config)?;
    let record = deps.provider_store.get_provider(provider_id).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn check_user(path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut user: User = serde_json::from_str(&raw).context("Invalid user document")?;
    user.normalize();
    user.validate()?;
    println!("{}", serde_json::to_string_pretty(&user)?);
    Ok(())
}

async fn read_selected_file(path: &Path) -> Result<SelectedFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let content_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream");

    Ok(SelectedFile::new(file_name, content_type, bytes))
}
