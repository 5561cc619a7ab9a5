use anyhow::{Context, Result};
use clap::{Command, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Generator, Shell};
use clap_verbosity_flag::Verbosity;
use console::style;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_log::AsTrace;

mod assign;
mod collect;
mod core;
mod gitlab;
mod normalize;
mod settings;

use crate::gitlab::error::GitlabError;
use crate::gitlab::item::ItemKind;
use crate::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "gitlab-admin", author, version, about, long_about = None)] // Read from `Cargo.toml`
struct Cli {
    // If provided, outputs the completion file for given shell
    #[arg(long = "generate", value_enum)]
    generator: Option<Shell>,
    /// config.yaml to read instead of the one in the user config dir
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,
    #[command(flatten)]
    verbose: Verbosity,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Assign role to a user in a project or group
    #[command()]
    AssignRole {
        #[arg(long)]
        username: String,
        #[arg(long = "repo_or_group_name", alias = "repo-or-group-name")]
        repo_or_group_name: String,
        /// guest, reporter, developer, maintainer or owner
        #[arg(long)]
        role: String,
    },

    /// List issues or merge requests for a given year
    #[command()]
    Get {
        #[arg(long = "type", value_enum)]
        kind: ItemKind,
        #[arg(long)]
        year: i32,
    },
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

/// Prints the help text and returns the exit status for a run without a
/// subcommand.
fn missing_command<W: Write>(out: &mut W) -> io::Result<i32> {
    write!(out, "{}", Cli::command().render_help())?;

    Ok(1)
}

async fn run<W: Write>(
    command: Commands,
    client: &gitlab::Client<'_>,
    out: &mut W,
) -> Result<(), GitlabError> {
    match command {
        Commands::AssignRole {
            username,
            repo_or_group_name,
            role,
        } => {
            let outcome =
                assign::assign_role(client, &username, &repo_or_group_name, &role, out).await?;

            writeln!(out, "{}", style(outcome).green())?;
        }

        Commands::Get { kind, year } => {
            let summary = collect::items_created_in_year(client, kind, year, out).await?;

            tracing::info!(
                "{} {kind} in {} of {} projects",
                summary.items,
                summary.projects_with_items,
                summary.projects
            );
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(cli.verbose.log_level_filter().as_trace())
        .init();

    if let Some(generator) = cli.generator {
        let mut cmd = Cli::command();
        eprintln!("Generating completion file for {generator:?}...");
        print_completions(generator, &mut cmd);

        return Ok(());
    }

    let Some(command) = cli.command else {
        std::process::exit(missing_command(&mut io::stdout())?);
    };

    let config = Settings::new(cli.config.as_deref())
        .context("loading settings")?;

    let transport = crate::core::client::Client::new(&config.gitlab)?;
    let client = gitlab::Client::new(&transport, config.per_page);

    let mut stdout = io::stdout().lock();

    if let Err(e) = run(command, &client, &mut stdout).await {
        writeln!(stdout, "{}", style(e).red())?;
        std::process::exit(1);
    }

    Ok(())
}
