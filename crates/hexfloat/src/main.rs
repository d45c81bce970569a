//! Command line front end for IBM hexadecimal floating point conversion.
//!
//! # Examples
//!
//! ```bash
//! # Convert IBM single precision records to IEEE single precision
//! hexfloat convert data.bin --from ibm32 --to ieee32
//!
//! # Print the values held in an IBM double precision file
//! hexfloat dump data.bin --format ibm64
//!
//! # Write the reference data set and its expected values
//! hexfloat generate ibm_floats.bin --expected output.txt
//! ```

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use hexfloat_encoding::{FormatTag, Narrowing};
use miette::Result;

mod commands;
mod config;
mod error;

use commands::convert::ConvertOptions;
use config::Config;

#[derive(Parser, Debug)]
#[command(name = "hexfloat")]
#[command(author, version, about = "IBM hexadecimal floating point converter", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a file of fixed-width float records
    Convert {
        /// Input record file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Source format (ibm32, ibm64, ieee32, ieee64)
        #[arg(long, value_name = "FMT")]
        from: Option<FormatTag>,

        /// Target format (ibm32, ibm64, ieee32, ieee64)
        #[arg(long, value_name = "FMT")]
        to: Option<FormatTag>,

        /// Output file path
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// How long HFP records are narrowed to 32-bit targets (round, truncate)
        #[arg(long, value_name = "MODE")]
        narrowing: Option<Narrowing>,

        /// Convert record by record instead of buffering the whole file
        #[arg(long)]
        stream: bool,
    },

    /// Print decoded values, one per line
    Dump {
        /// Input record file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Format of the records in the file
        #[arg(short, long, value_name = "FMT")]
        format: FormatTag,

        /// Format whose precision and range the values are shown in
        #[arg(long = "as", value_name = "FMT", default_value = "ieee64")]
        view: FormatTag,

        /// Narrowing mode for long HFP shown as a 32-bit format
        #[arg(long, value_name = "MODE", default_value = "round")]
        narrowing: Narrowing,
    },

    /// Write the reference IBM float data set
    Generate {
        /// Output record file
        #[arg(value_name = "FILE")]
        output: PathBuf,

        /// Record format (ibm32 or ibm64)
        #[arg(short, long, value_name = "FMT", default_value = "ibm32")]
        format: FormatTag,

        /// Also write the expected decoded values to this text file
        #[arg(long, value_name = "FILE")]
        expected: Option<PathBuf>,
    },

    /// Print the default configuration
    Config {
        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so dump output stays clean
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Convert {
            input,
            from,
            to,
            output,
            narrowing,
            stream,
        } => {
            let config = Config::load();
            let options =
                ConvertOptions::resolve(&config, input, output, from, to, narrowing, stream);
            commands::convert::run(options)
        }
        Commands::Dump {
            input,
            format,
            view,
            narrowing,
        } => commands::dump::run(&input, format, view, narrowing),
        Commands::Generate {
            output,
            format,
            expected,
        } => commands::generate::run(&output, format, expected.as_deref()),
        Commands::Config { output } => commands::config::run(output.as_deref()),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "hexfloat", &mut std::io::stdout());
            Ok(())
        }
    }
}
