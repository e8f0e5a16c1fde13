//! Command-line interface implementation for payload-scaffold.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for payload-scaffold.
#[derive(Parser, Debug)]
#[command(author, version, about = "payload-scaffold: validate and scaffold Payload CMS projects", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a project spec and write the generated project
    Scaffold {
        /// Path to the spec file, or a directory containing payload-scaffold.{json,yml,yaml}
        #[arg(value_name = "SPEC", required_unless_present = "stdin")]
        spec: Option<String>,

        /// Directory where the generated project will be created [default: ./<projectName>]
        #[arg(short, long, value_name = "OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        /// Force overwrite of existing output directory
        #[arg(short, long)]
        force: bool,

        /// Read the spec from stdin
        #[arg(short, long)]
        stdin: bool,

        /// Print the planned files without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate a project spec and report every problem found
    Validate {
        /// Path to the spec file, or a directory containing payload-scaffold.{json,yml,yaml}
        #[arg(value_name = "SPEC", required_unless_present = "stdin")]
        spec: Option<String>,

        /// Read the spec from stdin
        #[arg(short, long)]
        stdin: bool,
    },

    /// Answer JSON-lines tool calls on stdin
    Serve,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument
                || e.kind() == ErrorKind::MissingSubcommand
            {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
