use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use cbk_config::{CasebookConfig, PROJECT_DIR};

mod cli;
mod commands;
mod context;
mod output;
mod ui;

fn main() {
    if let Err(error) = run() {
        eprintln!("cbk error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    if let cli::Commands::Schema(args) = &cli.command {
        return commands::schema::handle(args, &flags);
    }

    let _ = dotenvy::dotenv();

    if let cli::Commands::Init(args) = &cli.command {
        let project_root = init_target(flags.project.as_deref())?;
        let config = CasebookConfig::load_for_project(&project_root)
            .context("failed to load casebook configuration")?;
        return commands::init::handle(args, &project_root, &config, &flags);
    }

    let project_root = resolve_project_root(flags.project.as_deref())?;
    let config = CasebookConfig::load_for_project(&project_root)
        .context("failed to load casebook configuration")?;

    let mut ctx = context::AppContext::init(project_root, config)
        .context("failed to open casebook workspace")?;

    commands::dispatch::dispatch(&cli.command, &mut ctx, &flags)?;
    ctx.commit()
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CASEBOOK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Directory `cbk init` creates `.casebook/` in: `--project` or the cwd.
fn init_target(project_override: Option<&str>) -> anyhow::Result<PathBuf> {
    match project_override {
        Some(path) => {
            let explicit = PathBuf::from(path);
            anyhow::ensure!(
                explicit.is_dir(),
                "invalid --project '{}': directory does not exist",
                explicit.display()
            );
            Ok(explicit)
        }
        None => std::env::current_dir().context("failed to read current directory"),
    }
}

fn resolve_project_root(project_override: Option<&str>) -> anyhow::Result<PathBuf> {
    if let Some(path) = project_override {
        let explicit = PathBuf::from(path);

        if explicit
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == PROJECT_DIR)
        {
            return explicit
                .parent()
                .map(std::path::Path::to_path_buf)
                .context("invalid --project path: '.casebook' directory has no parent");
        }

        if explicit.is_dir() {
            return Ok(explicit);
        }

        anyhow::bail!(
            "invalid --project '{}': directory does not exist",
            explicit.display()
        );
    }

    let start = std::env::current_dir().context("failed to read current directory")?;
    context::find_project_root(&start)
        .context("not a casebook project (no .casebook directory found). Run 'cbk init' first.")
}
