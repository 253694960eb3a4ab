//! The `regvm` binary: runs, disassembles, and configures regvm bytecode programs.

pub(crate) mod error;
pub(crate) mod log_args;
pub(crate) mod output;

use std::process::ExitCode;

use colored::Colorize;
use error::Error;
use log_args::LogArgs;
use output::{build_filename, build_output_path};
use tracing::{debug, info};

use clap::{Parser, Subcommand};

use regvm_common::utils::io::file::{short_path, write_file};
use regvm_config::{config, ConfigArgs, Configuration};
use regvm_disassembler::{disassemble, DisassemblerArgs};
use regvm_run::{display, run, to_json, RunArgs};

/// Exit status for a program that stopped with an error.
const EXIT_PROGRAM_ERROR: u8 = 1;

/// Exit status for usage, configuration, and load errors.
const EXIT_USAGE_ERROR: u8 = 2;

#[derive(Debug, Parser)]
#[clap(name = "regvm", version)]
struct Arguments {
    #[clap(subcommand)]
    sub: Subcommands,

    #[clap(flatten)]
    logs: LogArgs,
}

#[derive(Debug, Subcommand)]
#[clap(about = "regvm runs and inspects programs for a small register-based virtual machine.")]
enum Subcommands {
    #[clap(name = "run", about = "Execute bytecode and print its output")]
    Run(RunArgs),

    #[clap(name = "disassemble", about = "Disassemble bytecode to assembly")]
    Disassemble(DisassemblerArgs),

    #[clap(name = "config", about = "Display and edit the current configuration")]
    Config(ConfigArgs),
}

fn main() -> ExitCode {
    let args = Arguments::parse();

    // setup logging
    let _guard = match args.logs.init_tracing() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{} failed to initialize logging: {}", "warning:".yellow().bold(), e);
            None
        }
    };

    match execute(args.sub) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::from(EXIT_USAGE_ERROR)
        }
    }
}

/// Dispatches a subcommand, returning the exit status for the process.
fn execute(sub: Subcommands) -> Result<ExitCode, Error> {
    match sub {
        Subcommands::Run(mut cmd) => {
            let configuration = Configuration::load()
                .map_err(|e| Error::Generic(format!("failed to load configuration: {}", e)))?;

            // flags the user has not specified fall back to the configured settings
            cmd.defaults = configuration.vm_options();

            let result = run(cmd.clone())?;

            // if the user has passed an output filename, override the default filename
            let filename =
                build_filename(&cmd.name, if cmd.json { "result.json" } else { "result.txt" });

            if cmd.output == "print" {
                let rendered =
                    if cmd.json { to_json(&result)? } else { display(&result, cmd.trace) };
                println!("{}", rendered);
            } else {
                // no escape codes in files
                colored::control::set_override(false);
                let rendered =
                    if cmd.json { to_json(&result)? } else { display(&result, cmd.trace) };

                let output_path = build_output_path(&cmd.output, &filename)
                    .map_err(|e| Error::Generic(format!("failed to build output path: {}", e)))?;
                write_file(&output_path, &rendered)
                    .map_err(|e| Error::Generic(format!("failed to write result: {}", e)))?;
                info!("wrote result to '{}'", short_path(&output_path));
            }

            if !result.success {
                debug!("program failed, exiting with status {}", EXIT_PROGRAM_ERROR);
                return Ok(ExitCode::from(EXIT_PROGRAM_ERROR));
            }
        }

        Subcommands::Disassemble(cmd) => {
            // if the user has passed an output filename, override the default filename
            let filename = build_filename(&cmd.name, "disassembled.asm");

            let assembly = disassemble(cmd.clone())?;

            if cmd.output == "print" {
                print!("{}", assembly);
            } else {
                let output_path = build_output_path(&cmd.output, &filename)
                    .map_err(|e| Error::Generic(format!("failed to build output path: {}", e)))?;

                write_file(&output_path, &assembly)
                    .map_err(|e| Error::Generic(format!("failed to write assembly: {}", e)))?;
                info!("wrote assembly to '{}'", short_path(&output_path));
            }
        }

        Subcommands::Config(cmd) => {
            config(cmd)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
