//! Sweeper CLI - serve the web UI and run the pipeline on local files
//!
//! # Main Command
//!
//! ```bash
//! sweeper serve                        # Start HTTP server (port 3000)
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! sweeper parse data.csv               # Parse a file and print a preview
//! sweeper convert data.csv -f xlsx     # Run the full pipeline on a file
//! ```

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use sweeper::{
    convert_file, preview_file, CleanOptions, ConvertOptions, OutputFormat, UploadedFile,
};

#[derive(Parser)]
#[command(name = "sweeper")]
#[command(about = "Clean and convert CSV/XLSX files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server for the web UI
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Parse a file and print its preview
    Parse {
        /// Input file (.csv or .xlsx)
        input: PathBuf,
    },

    /// Run the full pipeline on a file: parse, clean, select, serialize
    Convert {
        /// Input file (.csv or .xlsx)
        input: PathBuf,

        /// Output format: csv or xlsx
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Remove duplicate rows
        #[arg(long)]
        remove_duplicates: bool,

        /// Fill missing numeric values with the column mean
        #[arg(long)]
        fill_missing: bool,

        /// Comma-separated list of columns to keep (default: all)
        #[arg(short, long)]
        columns: Option<String>,

        /// Output file (default: input name with replaced extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { port } => sweeper::server::start_server(port).await,

        Commands::Parse { input } => cmd_parse(&input),

        Commands::Convert {
            input,
            format,
            remove_duplicates,
            fill_missing,
            columns,
            output,
        } => cmd_convert(
            &input,
            &format,
            remove_duplicates,
            fill_missing,
            columns.as_deref(),
            output.as_deref(),
        ),
    };

    if let Err(e) = result {
        eprintln!("✗ Error: {}", e);
        std::process::exit(1);
    }
}

/// Read a local file into an upload the pipeline understands.
fn read_upload(input: &Path) -> Result<UploadedFile, Box<dyn std::error::Error>> {
    let name = input
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| format!("Invalid file name: {}", input.display()))?;
    let bytes = fs::read(input)?;
    Ok(UploadedFile::new(name, bytes))
}

fn cmd_parse(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing: {}", input.display());

    let file = read_upload(input)?;
    let preview = preview_file(&file, CleanOptions::default())?;

    eprintln!("   Size: {} bytes", preview.size_bytes);
    eprintln!(
        "   Shape: {} rows x {} columns",
        preview.row_count, preview.column_count
    );
    for column in &preview.columns {
        let kind = if column.numeric { "numeric" } else { "text" };
        eprintln!("   [{}] {}", kind, column.name);
    }

    for row in &preview.head {
        let fields: Vec<String> = row
            .iter()
            .map(|cell| cell.clone().unwrap_or_default())
            .collect();
        println!("{}", fields.join(","));
    }

    Ok(())
}

fn cmd_convert(
    input: &Path,
    format: &str,
    remove_duplicates: bool,
    fill_missing: bool,
    columns: Option<&str>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Processing: {}", input.display());

    let file = read_upload(input)?;
    let format: OutputFormat = format.parse()?;

    let options = ConvertOptions {
        clean: CleanOptions {
            remove_duplicates,
            fill_missing,
        },
        columns: columns.map(|list| {
            list.split(',')
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect()
        }),
        format,
    };

    let converted = convert_file(&file, &options)?;

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&converted.file_name));
    fs::write(&path, &converted.bytes)?;

    eprintln!("💾 Output written to: {}", path.display());
    Ok(())
}
