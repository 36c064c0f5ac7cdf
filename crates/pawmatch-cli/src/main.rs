mod render;
mod repl;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use pawmatch_catalog::{submit_login, CatalogController, LoginOutcome};
use pawmatch_client::DogsClient;
use pawmatch_core::{guard, AppConfig, LoginForm, Session, View};
use tracing_subscriber::EnvFilter;

use crate::repl::Exit;

#[derive(Debug, Parser)]
#[command(name = "pawmatch")]
#[command(about = "Browse adoptable dogs, pick favorites and get matched")]
struct Cli {
    /// Catalog service origin (overrides `PAWMATCH_API_BASE_URL`)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Log in and list every breed the catalog knows
    Breeds {
        #[command(flatten)]
        login: LoginArgs,
    },
    /// Log in and browse the catalog interactively
    Browse {
        #[command(flatten)]
        login: LoginArgs,
    },
}

#[derive(Debug, Args)]
struct LoginArgs {
    /// Name to log in with
    #[arg(long, env = "PAWMATCH_NAME", default_value = "")]
    name: String,

    /// Email address to log in with
    #[arg(long, env = "PAWMATCH_EMAIL", default_value = "")]
    email: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = pawmatch_core::load_app_config()?;
    if let Some(base_url) = cli.base_url {
        pawmatch_core::override_api_base_url(&mut config, "--base-url", base_url)?;
    }
    init_tracing(&config.log_level)?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Some(Commands::Breeds { login }) => run_breeds(&config, &login).await,
        Some(Commands::Browse { login }) => run_browse(&config, &login).await,
        None => {
            println!("pawmatch: run `pawmatch browse --name <NAME> --email <EMAIL>` to start");
            Ok(())
        }
    }
}

/// Logs go to stderr so they never interleave with rendered screens.
fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Submits the login form and reports why it failed, if it did.
async fn log_in(client: &DogsClient, args: &LoginArgs) -> anyhow::Result<()> {
    let form = LoginForm::new(args.name.as_str(), args.email.as_str());
    match submit_login(client, &form).await.context("Login failed")? {
        LoginOutcome::LoggedIn => Ok(()),
        LoginOutcome::Rejected => anyhow::bail!("Login failed: credentials were rejected"),
        LoginOutcome::Invalid(errors) => {
            anyhow::bail!("Login failed:\n{}", render::login_errors(&errors))
        }
    }
}

async fn run_breeds(config: &AppConfig, login: &LoginArgs) -> anyhow::Result<()> {
    let client = DogsClient::from_config(config, Session::new())?;
    log_in(&client, login).await?;

    let breeds = client.breeds().await.context("Error fetching breeds")?;
    for breed in &breeds {
        println!("{breed}");
    }
    tracing::info!(count = breeds.len(), "breeds listed");
    Ok(())
}

async fn run_browse(config: &AppConfig, login: &LoginArgs) -> anyhow::Result<()> {
    let client = DogsClient::from_config(config, Session::new())?;
    log_in(&client, login).await?;

    let session = client.session().clone();
    let shown = guard(View::Catalog, &session).view();
    if shown != View::Catalog {
        anyhow::bail!("not logged in; redirected to {shown}");
    }

    let mut ctrl = CatalogController::new(client, session, config.page_size);
    match repl::run(&mut ctrl, config.grid_columns).await? {
        Exit::Quit => {}
        Exit::LoggedOut => println!("Logged out."),
        Exit::Expired => println!("Your session has expired. Log in again to continue."),
    }
    Ok(())
}
