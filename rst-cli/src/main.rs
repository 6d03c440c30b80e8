//! Command-line interface for rst-convert
//! This binary converts RST discourse trees between the formats of annotation tools and parsers.
//!
//! Usage:
//!   rst-convert `<input>` [`<input-format>`] [`<output-format>`] [`<output>`]  - Convert a file
//!   rst-convert --list-formats                                            - List formats
//!
//! A missing input format is taken from the configuration, then from the input's file
//! extension. A missing output format is taken from the configuration. Output goes to stdout
//! unless an output path is given.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use rst_babel::{FormatError, FormatRegistry};
use rst_config::{ConfigError, LogLevel, Loader, RstConfig};
use rst_parser::rst::error::ErrorKind;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
enum CliError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("no input format given and none can be guessed from '{}'", .0.display())]
    UnknownInputFormat(PathBuf),
    #[error(transparent)]
    Format(#[from] FormatError),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Io { .. } | CliError::Config(_) => 1,
            CliError::UnknownInputFormat(_) => 2,
            CliError::Format(err) => match err.kind() {
                ErrorKind::UnknownFormat => 2,
                ErrorKind::MalformedInput
                | ErrorKind::DisconnectedGraph
                | ErrorKind::CyclicGraph => 3,
                ErrorKind::UnsupportedConversion => 4,
            },
        }
    }
}

fn cli() -> Command {
    Command::new("rst-convert")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Converts Rhetorical Structure Theory discourse trees between file formats")
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Path to the file to convert")
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("input-format")
                .help("Format of the input file (e.g., 'rs3', 'dis', 'hilda', 'hs2015')")
                .index(2),
        )
        .arg(
            Arg::new("output-format")
                .help("Format to write (e.g., 'rs3', 'dis', 'rstlatex')")
                .index(3),
        )
        .arg(
            Arg::new("output")
                .help("Path of the output file (default: stdout)")
                .index(4),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log more (repeat for more detail)")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List the formats that can be read and written")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> ExitCode {
    let matches = cli().get_matches();

    let config = match load_config(matches.get_one::<String>("config")) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("rst-convert: {}", err);
            return ExitCode::from(err.exit_code());
        }
    };
    setup_logging(config.logging.level, matches.get_count("verbose"));

    let result = FormatRegistry::with_options(config.output.render_options())
        .map_err(CliError::from)
        .and_then(|registry| {
            if matches.get_flag("list-formats") {
                handle_list_formats_command(&registry);
                Ok(())
            } else {
                handle_convert_command(&registry, &config, &matches)
            }
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("rst-convert: {}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn load_config(path: Option<&String>) -> Result<RstConfig, CliError> {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };
    Ok(loader.build()?)
}

fn setup_logging(configured: LogLevel, verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match configured.raised(verbosity) {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    // stdout may carry the converted document
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Handle the convert command
fn handle_convert_command(
    registry: &FormatRegistry,
    config: &RstConfig,
    matches: &ArgMatches,
) -> Result<(), CliError> {
    let input = matches
        .get_one::<String>("input")
        .map(PathBuf::from)
        .unwrap_or_default();

    let input_format = match matches
        .get_one::<String>("input-format")
        .or(config.convert.input_format.as_ref())
    {
        Some(name) => name.clone(),
        None => guess_format(registry, &input)?,
    };
    let output_format = matches
        .get_one::<String>("output-format")
        .unwrap_or(&config.convert.output_format);

    let source = fs::read_to_string(&input).map_err(|source| CliError::Io {
        path: input.clone(),
        source,
    })?;
    info!(input = %input.display(), from = %input_format, to = %output_format, "converting");

    let output = registry
        .convert(&source, &input_format, output_format)
        .map_err(|err| err.with_path(&input))?;

    match matches.get_one::<String>("output") {
        Some(path) => {
            fs::write(path, &output).map_err(|source| CliError::Io {
                path: PathBuf::from(path),
                source,
            })?;
            debug!(output = %path, bytes = output.len(), "wrote output");
        }
        None => print!("{}", output),
    }
    Ok(())
}

fn guess_format(registry: &FormatRegistry, input: &Path) -> Result<String, CliError> {
    input
        .extension()
        .and_then(|extension| extension.to_str())
        .and_then(|extension| registry.find_by_extension(extension))
        .filter(|id| {
            registry
                .get(*id)
                .is_ok_and(|format| format.supports_parsing())
        })
        .map(|id| id.to_string())
        .ok_or_else(|| CliError::UnknownInputFormat(input.to_path_buf()))
}

/// Handle the list-formats command
fn handle_list_formats_command(registry: &FormatRegistry) {
    println!("Input formats:\n");
    for name in registry.input_formats() {
        print_format(registry, name);
    }
    println!("Output formats:\n");
    for name in registry.output_formats() {
        print_format(registry, name);
    }
}

fn print_format(registry: &FormatRegistry, name: &str) {
    if let Ok(format) = registry.resolve(name) {
        println!("  {}", name);
        println!("    {}", format.description());
        println!();
    }
}
