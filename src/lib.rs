//! filehub - Catalog browser for a deduplicating file store
//!
//! The storage backend keeps one physical copy per distinct content and counts
//! how many uploads reference it. filehub turns independent filter controls
//! into backend queries, tracks which filters are active, and summarizes each
//! listing: total, unique and duplicated files, and bytes saved.
//!
//! - [`filters`]: filter state engine and query descriptors
//! - [`catalog`]: records, summary aggregation, HTTP client, view state
//! - [`session`]: engine and view wired to a backend with stale-response discard
//! - [`output`]: table, JSON and CSV renderers
//! - [`shell`]: interactive filter shell

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod filters;
pub mod logging;
pub mod output;
pub mod session;
pub mod shell;

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::catalog::{CatalogApi, HttpCatalog};
use crate::cli::{BrowseArgs, Cli, Commands, ConfigArgs, DeleteArgs, ListArgs, OutputFormat, TypesArgs};
use crate::config::Config;
use crate::error::{ExitCode, UpstreamFailure};
use crate::filters::FilterEngine;
use crate::output::{CsvOutput, JsonOutput, TableOutput};
use crate::session::CatalogSession;
use crate::shell::Shell;

/// Run the application with parsed arguments.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded, the backend cannot be
/// reached, or output cannot be written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let config = Config::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_cli_overrides(&cli);
    let color = config.color && io::stdout().is_terminal();
    if !color {
        yansi::disable();
    }
    log::debug!("Using backend at {}", config.api_url);

    match &cli.command {
        Commands::List(args) => handle_list(&config, args, color),
        Commands::Types(args) => handle_types(&config, args),
        Commands::Delete(args) => handle_delete(&config, args, color),
        Commands::Browse(args) => handle_browse(&config, args, color),
        Commands::Config(args) => handle_config(&config, args),
    }
}

fn connect(config: &Config) -> Result<Arc<HttpCatalog>> {
    let api = HttpCatalog::new(&config.api_url, config.timeout())
        .with_context(|| format!("Failed to set up client for {}", config.api_url))?;
    Ok(Arc::new(api))
}

/// Fail with the view's error if its newest request failed.
fn ensure_loaded<A: CatalogApi + 'static>(session: &CatalogSession<A>) -> Result<()> {
    match session.view().state().error() {
        Some(message) => Err(UpstreamFailure(message.to_string()).into()),
        None => Ok(()),
    }
}

fn handle_list(config: &Config, args: &ListArgs, color: bool) -> Result<ExitCode> {
    let mut engine = FilterEngine::new();
    args.filters.apply_to(&mut engine);

    let mut session = CatalogSession::with_engine(connect(config)?, engine);
    session.load();
    session.wait();
    ensure_loaded(&session).context("Failed to list files")?;

    let view = session.view();
    let active = session.engine().active_filters();
    let exit_code = ExitCode::for_listing(view.summary());
    let format = args.output.unwrap_or(config.output);
    log::debug!("Writing {} record(s) as {}", view.records().len(), format);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Table => {
            TableOutput::new(view.records(), view.summary(), view.loaded_query(), active)
                .with_color(color)
                .write_to(&mut out)
                .context("Failed to write table")?;
        }
        OutputFormat::Json => JsonOutput::new(view, active, exit_code)
            .write_to(&mut out, !args.compact)
            .context("Failed to write JSON")?,
        OutputFormat::Csv => CsvOutput::new(view.records())
            .write_to(&mut out)
            .context("Failed to write CSV")?,
    }
    out.flush()?;

    Ok(exit_code)
}

fn handle_types(config: &Config, args: &TypesArgs) -> Result<ExitCode> {
    let types = connect(config)?
        .file_types()
        .context("Failed to fetch file types")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer(&mut out, &types)?;
        writeln!(out)?;
    } else {
        for file_type in &types {
            writeln!(out, "{file_type}")?;
        }
    }

    Ok(if types.is_empty() {
        ExitCode::NoFiles
    } else {
        ExitCode::Success
    })
}

fn handle_delete(config: &Config, args: &DeleteArgs, color: bool) -> Result<ExitCode> {
    if !args.yes && !confirm(&format!("Delete file {}?", args.id))? {
        eprintln!("Aborted.");
        return Ok(ExitCode::GeneralError);
    }

    let mut session = CatalogSession::new(connect(config)?);
    session
        .delete(&args.id)
        .with_context(|| format!("Failed to delete {}", args.id))?;
    session.wait();
    ensure_loaded(&session).context("Deleted, but failed to refresh the catalog")?;

    let view = session.view();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Deleted {}", args.id)?;
    writeln!(out)?;
    TableOutput::new(view.records(), view.summary(), None, session.engine().active_filters())
        .with_color(color)
        .write_summary(&mut out)?;

    Ok(ExitCode::Success)
}

fn handle_browse(config: &Config, args: &BrowseArgs, color: bool) -> Result<ExitCode> {
    let mut engine = FilterEngine::with_listener(|query| log::debug!("Filters changed: [{}]", query));
    args.filters.apply_to(&mut engine);

    let session = CatalogSession::with_engine(connect(config)?, engine);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(session, stdin.lock(), stdout.lock()).with_color(color);
    shell.run().context("Shell I/O failed")?;

    ensure_loaded(shell.session()).context("Last request failed")?;
    Ok(ExitCode::Success)
}

fn handle_config(config: &Config, args: &ConfigArgs) -> Result<ExitCode> {
    if args.save {
        let path = config.save().context("Failed to save configuration")?;
        println!("Saved configuration to {}", path.display());
    } else {
        print!("{}", config.to_toml()?);
    }
    Ok(ExitCode::Success)
}

/// Ask a yes/no question on stderr; anything but `y`/`yes` is no.
fn confirm(question: &str) -> Result<bool> {
    eprint!("{question} [y/N] ");
    io::stderr().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
