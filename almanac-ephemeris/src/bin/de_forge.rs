#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use almanac_ephemeris::{Ephemeris, EphemerisBuilder};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "de-forge")]
#[command(about = "Converts ASCII DE-series ephemeris exports into the binary format")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Concatenate a header export and yearly data chunks into one ASCII file
    Join {
        /// Directory holding the yearly chunk files
        #[arg(short, long)]
        directory: PathBuf,
        /// Header export, ending in an open data group
        #[arg(long)]
        header: PathBuf,
        /// File name prefix selecting the chunks (e.g. "ascp")
        #[arg(short, long, default_value = "ascp")]
        prefix: String,
        /// Combined ASCII output file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Convert a complete ASCII export into a binary ephemeris
    Build {
        /// Complete ASCII export (header groups plus data records)
        #[arg(short, long)]
        input: PathBuf,
        /// Binary output file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print the header of a binary ephemeris
    Inspect {
        /// Binary ephemeris file
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn cmd_join(
    directory: PathBuf,
    header: PathBuf,
    prefix: String,
    output: PathBuf,
) -> Result<(), String> {
    almanac_ephemeris::join(&directory, &header, &prefix, &output)
        .map_err(|e| format!("Join failed: {}", e))?;
    println!("Wrote {}", output.display());
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_build(input: PathBuf, output: PathBuf) -> Result<(), String> {
    println!("Converting {}...", input.display());
    let builder = EphemerisBuilder::new(&input, &output)
        .map_err(|e| format!("Cannot open files: {}", e))?;
    builder.build().map_err(|e| format!("Build failed: {}", e))?;
    println!("Wrote {}", output.display());
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_inspect(input: PathBuf) -> Result<(), String> {
    let ephemeris =
        Ephemeris::open(&input).map_err(|e| format!("Cannot open ephemeris: {}", e))?;

    println!("Version:      {}", ephemeris.version());
    println!("Start epoch:  {} JD", ephemeris.start_epoch());
    println!("Final epoch:  {} JD", ephemeris.final_epoch());
    println!("Record span:  {} days", ephemeris.record_span());
    println!("Records:      {}", ephemeris.record_count());
    println!("Constants:    {}", ephemeris.constants().len());
    for (name, value) in ephemeris.constants() {
        println!("  {:<8} {}", name, value);
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Join {
            directory,
            header,
            prefix,
            output,
        } => cmd_join(directory, header, prefix, output),
        Commands::Build { input, output } => cmd_build(input, output),
        Commands::Inspect { input } => cmd_inspect(input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("de-forge requires the 'cli' feature.");
    eprintln!("Run with: cargo run --features cli --bin de-forge -- <args>");
    std::process::exit(1);
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cmd_build_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("missing.txt");
        let output = temp_dir.path().join("out.bin");
        let result = cmd_build(input, output);
        assert!(result.is_err());
    }

    #[test]
    fn test_cmd_inspect_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let result = cmd_inspect(temp_dir.path().join("missing.bin"));
        assert!(result.is_err());
    }
}
