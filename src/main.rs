use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use version_tag::cli::{self, ResolveRequest, VersionKind};
use version_tag::config;
use version_tag::git::{self, Backend};
use version_tag::output::{OutputFormat, OutputTarget};
use version_tag::ui;

/// Environment variable holding the log filter (tracing EnvFilter syntax)
const LOG_ENV: &str = "VERSION_TAG_LOG";

#[derive(clap::Parser)]
#[command(
    name = "version-tag",
    version,
    about = "Compute the next release or pull-request version tag from git history"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        default_value = ".",
        help = "Repository to inspect"
    )]
    repo: PathBuf,

    #[arg(long, global = true, value_enum, help = "How tags are read")]
    backend: Option<Backend>,

    #[arg(long, global = true, value_enum, help = "How the tag is reported")]
    output_format: Option<OutputFormat>,

    #[arg(long, global = true, help = "Output name [default: TAG]")]
    output_name: Option<String>,

    #[arg(
        long,
        global = true,
        env = "GITHUB_OUTPUT",
        help = "File appended to with --output-format github-output"
    )]
    github_output: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Only log errors")]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Next release version (vMAJOR.MINOR.PATCH)
    Version(ResolveArgs),

    /// Next pull-request version (vMAJOR.MINOR.PATCH-PR-ID.SUB)
    Pr {
        #[arg(help = "Pull request number")]
        pr: u32,

        #[command(flatten)]
        args: ResolveArgs,
    },
}

#[derive(clap::Args)]
struct ResolveArgs {
    #[arg(long, help = "Only scan history reachable from this commit-ish")]
    reference: Option<String>,

    #[arg(
        long,
        num_args = 0..,
        help = "Files holding a version floor (e.g. v2.0.0)"
    )]
    file: Vec<PathBuf>,
}

fn main() {
    let mut args = Args::parse();
    init_logging(args.quiet);

    let Some(command) = args.command.take() else {
        // Printing help only fails if stdout is gone; the exit status carries the outcome
        let _ = Args::command().print_help();
        std::process::exit(2);
    };

    if let Err(e) = run(args, command) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_logging(quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn run(args: Args, command: Command) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;

    let (kind, resolve) = match command {
        Command::Version(resolve) => (VersionKind::Release, resolve),
        Command::Pr { pr, args } => (VersionKind::PullRequest(pr), args),
    };

    let request = ResolveRequest {
        kind,
        reference: resolve.reference,
        files: if resolve.file.is_empty() {
            config.files
        } else {
            resolve.file
        },
        max_collision_attempts: config.tags.collision_cap(),
    };

    let target = OutputTarget {
        format: args.output_format.unwrap_or(config.output.format),
        name: args.output_name.unwrap_or(config.output.name),
        github_output: args.github_output,
    };

    let backend = args.backend.unwrap_or(config.tags.backend);
    let source = git::open(backend, &args.repo)
        .with_context(|| format!("Cannot open repository at '{}'", args.repo.display()))?;

    cli::run(source, &request, &target, &mut std::io::stdout().lock())
        .context("Failed to compute version tag")?;

    Ok(())
}
