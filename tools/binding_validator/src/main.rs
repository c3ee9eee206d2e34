use bindcheck_core::catalog::ExpectedCatalog;
use bindcheck_core::error::CoreResult;
use bindcheck_core::source::SourceText;
use bindcheck_core::validator::render::render_report;
use bindcheck_core::validator::{BindingValidator, ValidationReport};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Exit status for input that could not be read or a catalog that could not be used.
const EXIT_FATAL: i32 = 2;

#[derive(Parser)]
#[command(name = "binding_validator")]
#[command(about = "Checks a generated jlcxx binding source for expected declarations")]
struct Cli {
    /// Generated binding source to inspect
    #[arg(
        env = "BINDING_VALIDATOR_SOURCE",
        default_value = "deps/databento_jl.cpp"
    )]
    source: PathBuf,

    /// JSON catalog replacing the built-in expectations
    #[arg(long, env = "BINDING_VALIDATOR_CATALOG")]
    catalog: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli.source, cli.catalog.as_deref()) {
        Ok(report) => {
            print!("{}", render_report(&report));
            std::process::exit(report.exit_code());
        }
        Err(e) => {
            eprintln!("binding_validator: {}", e);
            std::process::exit(EXIT_FATAL);
        }
    }
}

fn run(source: &Path, catalog: Option<&Path>) -> CoreResult<ValidationReport> {
    let validator = match catalog {
        Some(p) => BindingValidator::with_catalog(ExpectedCatalog::load(p)?),
        None => BindingValidator::new_phase2()?,
    };
    let text = SourceText::load(source)?;
    validator.validate(&text)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
