//! Command dispatch
//!
//! Each handler reports application failures through the container's
//! reporter before mapping them to their exit code; only the client-safe
//! message reaches stderr.

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, FilterQuery};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{self, Settings};
use crate::infrastructure::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Filter {
            name,
            under,
            key,
            values,
            compact,
        } => _filter(&build_container(cli)?, name, under, key, values, *compact),
        Commands::Show { name } => _show(&build_container(cli)?, name),
        Commands::List => _list(&build_container(cli)?),
        Commands::Config { command } => _config(cli, command),
        Commands::Completion { shell } => _completion(*shell),
    }
}

fn build_container(cli: &Cli) -> CliResult<ServiceContainer> {
    let settings = Settings::load(cli.source_dir.as_deref())?;
    debug!("source_dir: {}", settings.source_dir.display());
    Ok(ServiceContainer::new(settings))
}

/// Report an application failure and turn it into the CLI error.
fn fail(container: &ServiceContainer, error: ApplicationError) -> CliError {
    container.reporter.report(&error);
    CliError::from(error)
}

/// Parse one target value: JSON scalars read as themselves, everything else
/// (bare words included) as a plain string.
pub(crate) fn parse_target_value(raw: &str) -> Value {
    match serde_json::from_str(raw) {
        Ok(value @ (Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_))) => value,
        _ => Value::String(raw.to_string()),
    }
}

#[instrument(skip(container))]
fn _filter(
    container: &ServiceContainer,
    name: &str,
    under: &str,
    key: &str,
    values: &[String],
    compact: bool,
) -> CliResult<()> {
    if values.is_empty() {
        return Err(CliError::InvalidArgs(
            "at least one target value is required".to_string(),
        ));
    }

    let query = FilterQuery {
        ancestor_label: under.to_string(),
        field_key: key.to_string(),
        target_values: values.iter().map(|raw| parse_target_value(raw)).collect(),
    };

    let results = container
        .filter
        .filter_named(name, &query)
        .map_err(|e| fail(container, e))?;

    let document = Value::Array(results);
    let rendered = if compact {
        serde_json::to_string(&document)
    } else {
        serde_json::to_string_pretty(&document)
    }
    .map_err(|e| {
        fail(
            container,
            ApplicationError::Internal {
                context: "serializing filter results".to_string(),
                source: Box::new(e),
            },
        )
    })?;

    output::info(&rendered);
    Ok(())
}

#[instrument(skip(container))]
fn _show(container: &ServiceContainer, name: &str) -> CliResult<()> {
    let tree = container
        .filter
        .fetch_tree(name)
        .map_err(|e| fail(container, e))?;

    output::header(&format!(
        "{} ({} nodes, depth {})",
        name,
        tree.len(),
        tree.depth()
    ));
    output::info(&tree.display_tree());
    Ok(())
}

#[instrument(skip(container))]
fn _list(container: &ServiceContainer) -> CliResult<()> {
    let names = container
        .source
        .list_names()
        .map_err(|e| fail(container, ApplicationError::from(e)))?;

    if names.is_empty() {
        output::warning(&format!(
            "no trees found in {}",
            container.source.base_dir().display()
        ));
        return Ok(());
    }
    for name in names {
        output::info(&name);
    }
    Ok(())
}

fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.source_dir.as_deref())?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init => {
            let path = Settings::init_global()?;
            output::success(&format!("wrote {}", path.display()));
            Ok(())
        }
        ConfigCommands::Path => {
            match config::global_config_path() {
                Some(path) => {
                    let status = if path.exists() { "exists" } else { "missing" };
                    output::detail(&format!("global: {} ({})", path.display(), status));
                }
                None => output::warning("could not determine the global config directory"),
            }
            Ok(())
        }
    }
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}
