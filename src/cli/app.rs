//! Main CLI application

use crate::config::{
    build_completion_tree, build_option_set, parse_schema_auto, parse_schema_file,
    validate_schema, Schema,
};
use crate::error::OptreeError;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

/// Environment variable shells use for the completion-request line
pub const COMP_LINE_VAR: &str = "COMP_LINE";

/// Verbosity levels for diagnostics on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet = 0,
    Normal = 1,
    Verbose = 2,
}

impl Verbosity {
    fn level(self) -> Level {
        match self {
            Verbosity::Quiet => Level::ERROR,
            Verbosity::Normal => Level::WARN,
            Verbosity::Verbose => Level::DEBUG,
        }
    }
}

/// CLI application bound to a loaded schema
pub struct App {
    /// Parsed schema
    schema: Schema,
    /// Schema file path
    schema_path: PathBuf,
}

impl App {
    /// Create a new app by discovering the schema file
    pub fn new() -> Result<Self, OptreeError> {
        let (schema, schema_path) = parse_schema_auto()?;
        validate_schema(&schema)?;
        Ok(App {
            schema,
            schema_path,
        })
    }

    /// Create app with a specific schema file
    pub fn with_schema_file(path: PathBuf) -> Result<Self, OptreeError> {
        let schema = parse_schema_file(&path)?;
        validate_schema(&schema)?;
        Ok(App {
            schema,
            schema_path: path,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Print the completions for a completion-request line, one per line
    pub fn complete(&self, line: &str, out: &mut dyn Write) -> Result<(), OptreeError> {
        let root = build_completion_tree(&self.schema)?;
        debug!(schema = %self.schema_path.display(), line, "completing");
        for candidate in root.complete_line(line) {
            writeln!(out, "{}", candidate)?;
        }
        Ok(())
    }

    /// Parse `args` against the declared options and print the typed result
    pub fn parse(&self, args: &[String], out: &mut dyn Write) -> Result<(), OptreeError> {
        let mut options = build_option_set(&self.schema)?;
        let positionals = options.parse(args)?;
        options.check_required()?;

        for opt in options.iter() {
            writeln!(out, "{}={}", opt.name, opt.value())?;
        }
        for arg in positionals {
            writeln!(out, "arg={}", arg)?;
        }
        Ok(())
    }

    /// List the declared options: flags, kind, default and help
    pub fn list_options(&self, out: &mut dyn Write) -> Result<(), OptreeError> {
        let options = build_option_set(&self.schema)?;
        for opt in options.iter() {
            writeln!(
                out,
                "{}\t{}\t{}\t{}",
                opt.flags().join(","),
                opt.kind(),
                opt.default_text.as_deref().unwrap_or("-"),
                opt.help.as_deref().unwrap_or_default()
            )?;
        }
        Ok(())
    }
}

/// Build the clap command
fn build_command() -> Command {
    Command::new("optree")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Typed command-line options and shell completion from a schema file")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Path to optree.yml schema file")
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print debug output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("complete")
                .about("Print completions for the current command line")
                .arg(
                    Arg::new("line")
                        .long("line")
                        .value_name("LINE")
                        .help("Command line to complete (defaults to $COMP_LINE)"),
                ),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse arguments against the schema options")
                .arg(
                    Arg::new("args")
                        .value_name("ARGS")
                        .num_args(0..)
                        .trailing_var_arg(true)
                        .allow_hyphen_values(true),
                ),
        )
        .subcommand(Command::new("options").about("List the declared options"))
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Install the stderr subscriber. `RUST_LOG` takes precedence over the flags.
fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.level().as_str()));
    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Run the CLI application with the process arguments
pub fn run() -> Result<(), OptreeError> {
    run_from(env::args_os())
}

/// Run the CLI application with provided arguments
pub fn run_from<I, T>(args: I) -> Result<(), OptreeError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_command().get_matches_from(args);
    init_tracing(get_verbosity(&matches));

    let app = match matches.get_one::<String>("file") {
        Some(path) => App::with_schema_file(PathBuf::from(path))?,
        None => App::new()?,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match matches.subcommand() {
        Some(("complete", sub)) => {
            let line = sub
                .get_one::<String>("line")
                .cloned()
                .or_else(|| env::var(COMP_LINE_VAR).ok());
            match line {
                Some(line) => app.complete(&line, &mut out),
                None => Ok(()),
            }
        }
        Some(("parse", sub)) => {
            let args: Vec<String> = sub
                .get_many::<String>("args")
                .map(|values| values.cloned().collect())
                .unwrap_or_default();
            app.parse(&args, &mut out)
        }
        Some(("options", _)) => app.list_options(&mut out),
        _ => Ok(()),
    }
}
