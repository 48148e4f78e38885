//! Happy hour CLI - Validate the venue spreadsheet and build the site data
//!
//! # Main Commands
//!
//! ```bash
//! happyhour validate --csv bars.csv        # Check the spreadsheet, list errors
//! happyhour generate --output public       # Write report, venue JSON, static files
//! happyhour build                          # validate + generate, fail on errors
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! happyhour parse --csv bars.csv           # Dump extracted rows as JSON
//! ```
//!
//! Paths default to `HAPPYHOUR_CSV`, `HAPPYHOUR_OUTPUT_DIR` and
//! `HAPPYHOUR_STATIC_DIR` (a `.env` file is honored).

use clap::{Args, Parser, Subcommand};
use happyhour::config::Config;
use happyhour::logs::set_quiet;
use happyhour::parser::{extract, read_csv_file};
use happyhour::report::console_lines;
use happyhour::transform::{generate, run_file, PipelineOutcome};
use happyhour::validation::ValidateOptions;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "happyhour")]
#[command(about = "Validate the happy hour spreadsheet and generate site data", long_about = None)]
struct Cli {
    /// Only print errors and results
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PathArgs {
    /// Input CSV file [env: HAPPYHOUR_CSV]
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Output directory [env: HAPPYHOUR_OUTPUT_DIR]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Static assets directory [env: HAPPYHOUR_STATIC_DIR]
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the CSV and print every error with a fix hint
    Validate {
        /// Input CSV file [env: HAPPYHOUR_CSV]
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Write the error report, venue data and static files
    Generate {
        #[command(flatten)]
        paths: PathArgs,
    },

    /// Validate, then generate; exits 1 when the CSV has errors
    Build {
        #[command(flatten)]
        paths: PathArgs,
    },

    /// Parse the CSV and output the extracted rows as JSON
    Parse {
        /// Input CSV file [env: HAPPYHOUR_CSV]
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    set_quiet(cli.quiet);

    let result = match cli.command {
        Commands::Validate { csv } => cmd_validate(csv),
        Commands::Generate { paths } => cmd_generate(paths),
        Commands::Build { paths } => cmd_build(paths),
        Commands::Parse { csv, output } => cmd_parse(csv, output.as_deref()),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

type CmdResult = Result<bool, Box<dyn std::error::Error>>;

fn load_config(paths: PathArgs) -> Result<Config, Box<dyn std::error::Error>> {
    Ok(Config::from_env()?
        .with_csv(paths.csv)
        .with_output_dir(paths.output)
        .with_static_dir(paths.static_dir))
}

fn cmd_validate(csv: Option<PathBuf>) -> CmdResult {
    let config = Config::from_env()?.with_csv(csv);
    eprintln!("✔️  Validating: {}", config.csv_path.display());

    let outcome = run_file(&config.csv_path, &ValidateOptions::default())?;
    print_outcome(&outcome);
    Ok(outcome.is_valid())
}

fn cmd_generate(paths: PathArgs) -> CmdResult {
    let config = load_config(paths)?;
    eprintln!("📄 Processing: {}", config.csv_path.display());

    let outcome = run_file(&config.csv_path, &ValidateOptions::default())?;
    let summary = generate(&outcome, &config)?;

    eprintln!(
        "\n📊 Results: {} venues written, {} errors",
        summary.venues_written, outcome.result.error_count
    );
    eprintln!("   Report: {}", config.errors_dir().join("index.html").display());
    eprintln!("\n✨ Done!");
    Ok(true)
}

fn cmd_build(paths: PathArgs) -> CmdResult {
    let config = load_config(paths)?;
    eprintln!("🔨 Building from: {}", config.csv_path.display());

    let outcome = run_file(&config.csv_path, &ValidateOptions::default())?;
    print_outcome(&outcome);
    generate(&outcome, &config)?;

    if outcome.is_valid() {
        eprintln!("\n✨ Build complete: {}", config.output_dir.display());
    } else {
        eprintln!(
            "\n❌ Build failed, see {}",
            config.errors_dir().join("index.html").display()
        );
    }
    Ok(outcome.is_valid())
}

fn cmd_parse(csv: Option<PathBuf>, output: Option<&Path>) -> CmdResult {
    let config = Config::from_env()?.with_csv(csv);
    eprintln!("📄 Parsing CSV: {}", config.csv_path.display());

    let text = read_csv_file(&config.csv_path)?;
    let extraction = extract(&text);

    eprintln!("   Columns: {}", extraction.columns.join(", "));
    for err in &extraction.errors {
        eprintln!("   ⚠️  Line {}: {}", err.line, err.message);
    }
    eprintln!("✅ Parsed {} rows", extraction.rows.len());

    let json = serde_json::to_string_pretty(&extraction.rows)?;
    write_output(&json, output)?;

    Ok(true)
}

fn print_outcome(outcome: &PipelineOutcome) {
    let result = &outcome.result;
    eprintln!(
        "\n📊 Results: {} valid venues, {} errors",
        result.valid_row_count, result.error_count
    );

    if result.valid {
        eprintln!("   ✅ CSV is valid!");
        return;
    }
    eprintln!();
    for line in console_lines(result) {
        eprintln!("   {}", line);
    }
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
