//! Quotecsv CLI - export quote records to CSV and import CSV of any generation
//!
//! ```bash
//! quotecsv export quote.json -o quote.csv     # Record JSON -> canonical CSV
//! quotecsv import quote.csv                   # CSV -> parsed quote JSON
//! quotecsv import old.csv --record            # CSV -> full record JSON
//! quotecsv detect old.csv                     # Which layout is this?
//! quotecsv serve                              # Start HTTP server (port 3000)
//! ```

use clap::{Parser, Subcommand};
use quotecsv::{load_quote_csv, read_quote_json, to_csv, write_quote_csv, LOG_BROADCASTER};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "quotecsv")]
#[command(about = "Import and export quote CSV files", long_about = None)]
struct Cli {
    /// Silence diagnostics on stderr
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serialize a quote record (JSON) as canonical CSV
    Export {
        /// Input record JSON file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse a quote CSV file and output JSON
    Import {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit a full quote record instead of the parse result
        #[arg(long)]
        record: bool,

        /// Product key for the items when emitting a record
        #[arg(long, default_value = "default", env = "QUOTECSV_PRODUCT_KEY")]
        product_key: String,
    },

    /// Print which CSV layout a file uses
    Detect {
        /// Input CSV file
        input: PathBuf,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000", env = "QUOTECSV_PORT")]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    LOG_BROADCASTER.set_echo(!cli.quiet);

    let result = match cli.command {
        Commands::Export { input, output } => cmd_export(&input, output.as_deref()),

        Commands::Import {
            input,
            output,
            record,
            product_key,
        } => cmd_import(&input, output.as_deref(), record, &product_key),

        Commands::Detect { input } => cmd_detect(&input),

        Commands::Serve { port } => quotecsv::server::start_server(port).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_export(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let record = read_quote_json(input)?;
    if record.active_product().is_none() {
        return Err(format!(
            "No product '{}' in {}",
            record.current_product_key,
            input.display()
        )
        .into());
    }

    match output {
        Some(path) => write_quote_csv(&record, path)?,
        None => println!("{}", to_csv(&record)),
    }
    Ok(())
}

fn cmd_import(
    input: &Path,
    output: Option<&Path>,
    as_record: bool,
    product_key: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = load_quote_csv(input)?;
    eprintln!("   Encoding: {}", loaded.encoding);
    eprintln!("   Format: {}", loaded.parsed.format);
    eprintln!("   Items: {}", loaded.parsed.items.len());

    let json = if as_record {
        serde_json::to_string_pretty(&loaded.parsed.into_record(product_key))?
    } else {
        serde_json::to_string_pretty(&loaded.parsed)?
    };
    write_output(&json, output)
}

fn cmd_detect(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = load_quote_csv(input)?;
    println!("{}", loaded.parsed.format);
    Ok(())
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
