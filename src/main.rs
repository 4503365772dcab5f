use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use flexwec_casegen::casegen::{self, CaseGenerator};
use flexwec_casegen::config::{self, CaseConfig};
use flexwec_casegen::io;
use flexwec_casegen::{CaseGenError, Result, VariableSource};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose)?;
    match cli.command {
        Command::Generate(args) => execute_generate(args),
        Command::Render(args) => execute_render(args),
    }
}

fn init_logging(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| CaseGenError::Logging(error.to_string()))
}

fn execute_generate(args: GenerateArgs) -> Result<()> {
    require_exists(&args.templates)?;

    let config = match &args.config {
        Some(path) => {
            require_exists(path)?;
            config::load(path)?
        }
        None => CaseConfig::default(),
    };
    let variables = load_variables(args.variables.as_deref())?;
    let base_dir = match args.output {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    let generator = CaseGenerator::new(config.catalog(), config.extension_filter());
    let written = generator.generate(&args.templates, &base_dir, &variables, &args.analysis_type)?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

fn execute_render(args: RenderArgs) -> Result<()> {
    require_exists(&args.input)?;
    let variables = load_variables(args.variables.as_deref())?;
    print!("{}", casegen::render_file(&args.input, &variables)?);
    Ok(())
}

fn load_variables(path: Option<&Path>) -> Result<VariableSource> {
    match path {
        Some(path) => {
            require_exists(path)?;
            io::read_variables(path, None)
        }
        None => Ok(VariableSource::Absent),
    }
}

fn require_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(CaseGenError::MissingInput(path.to_path_buf()))
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Generate BEM solver case files from ?variable? templates."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write substituted copies of every template into the case directory.
    Generate(GenerateArgs),
    /// Print one substituted template to stdout.
    Render(RenderArgs),
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Directory holding the template input files.
    #[arg(long)]
    templates: PathBuf,

    /// Design variable document (.json or .xlsx). Omit to copy templates as-is.
    #[arg(long)]
    variables: Option<PathBuf>,

    /// Run directory receiving the case files. Defaults to the current directory.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Analysis type used to resolve the BEM subdirectory.
    #[arg(long, default_value = "")]
    analysis_type: String,

    /// JSON configuration with extensions and analysis types.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Template file to substitute.
    #[arg(long)]
    input: PathBuf,

    /// Design variable document (.json or .xlsx).
    #[arg(long)]
    variables: Option<PathBuf>,
}
