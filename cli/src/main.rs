use binschema::{CodecOptions, render_error};
use clap::{Parser, Subcommand};
use miette::Result;
use std::process::ExitCode;

mod commands;

use commands::CliError;

/// Binschema - schema-driven binary serialization
#[derive(Parser, Debug)]
#[command(name = "binschema")]
#[command(about = "Check schemas and decode binary records", long_about = None)]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Reject strings that run to the end of the buffer without a NUL
    #[arg(long, global = true)]
    strict_strings: bool,

    /// Largest vector count accepted while decoding
    #[arg(long, global = true)]
    max_sequence_len: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a schema and print each field's type and size
    Check {
        /// Schema text, e.g. "id: u32, name: string"
        schema: String,
    },

    /// Decode a hex-encoded buffer
    Decode {
        /// Schema text, e.g. "id: u32, name: string"
        #[arg(short, long)]
        schema: String,

        /// Byte offset of the first record
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Decode consecutive records until the buffer is exhausted
        #[arg(long)]
        all: bool,

        /// Buffer as hex digits; whitespace and a `0x` prefix are ignored
        hex: String,
    },
}

impl Args {
    fn codec_options(&self) -> CodecOptions {
        let defaults = CodecOptions::default();
        CodecOptions {
            max_sequence_len: self.max_sequence_len.unwrap_or(defaults.max_sequence_len),
            strict_strings: self.strict_strings,
        }
    }
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt};

    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    let options = args.codec_options();
    let output = match &args.command {
        Command::Check { schema } => commands::check(schema),
        Command::Decode {
            schema,
            offset,
            all,
            hex,
        } => commands::parse_hex(hex)
            .and_then(|bytes| commands::decode(schema, options, &bytes, *offset, *all)),
    };

    match output {
        Ok(text) => {
            print!("{text}");
            Ok(ExitCode::SUCCESS)
        }
        Err(CliError::Codec(err)) => {
            render_error(&err);
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err.into()),
    }
}
