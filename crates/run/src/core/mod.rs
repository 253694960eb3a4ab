use std::time::Instant;

use crate::{error::Error, interfaces::RunArgs};
use colored::Colorize;
use eyre::eyre;
use regvm_vm::core::vm::{ExecutionResult, VM};
use tracing::{debug, info, warn};

/// Loads the target program into a fresh machine and runs it to completion.
///
/// A program that stops with an error still produces an [`ExecutionResult`], with `success` set
/// to `false`. Only targets that cannot be resolved or loaded return an [`Error`].
///
/// ```
/// use regvm_run::{run, RunArgsBuilder};
///
/// let args = RunArgsBuilder::new()
///     .target("01000501010703000001030200010F000E".to_string())
///     .build()
///     .expect("failed to build args");
///
/// let result = run(args).expect("failed to run");
/// assert!(result.success);
/// assert_eq!(result.output, "12");
/// ```
pub fn run(args: RunArgs) -> Result<ExecutionResult, Error> {
    let start_time = Instant::now();

    let bytecode =
        args.get_bytecode().map_err(|e| eyre!("fetching target bytecode failed: {}", e))?;
    let options = args.options();
    debug!(
        "running {} bytes (max_steps: {:?}, register_policy: {})",
        bytecode.len(),
        options.max_steps,
        options.register_policy
    );

    let result = VM::run_program(&bytecode, options)?;

    match &result.error {
        None => info!("program halted after {} steps", result.steps),
        Some(error) => warn!("program stopped after {} steps: {}", result.steps, error),
    }
    debug!("execution took {:?}", start_time.elapsed());

    Ok(result)
}

/// Renders `result` as JSON in the `{ success, registers, output, execution_steps, error }`
/// shape.
pub fn to_json(result: &ExecutionResult) -> Result<String, Error> {
    serde_json::to_string_pretty(result).map_err(|e| Error::Eyre(eyre!(e)))
}

/// Renders `result` for a terminal: output, registers, and status, followed by the execution
/// trace when `trace` is set.
pub fn display(result: &ExecutionResult, trace: bool) -> String {
    let mut lines = Vec::new();

    lines.push(format!("{} {}", "output:".bold(), result.output));
    lines.push(format!("{} {}", "registers:".bold(), format_registers(&result.registers)));
    lines.push(format!("{} {}", "steps:".bold(), result.steps));
    lines.push(match &result.error {
        None => format!("{} {}", "status:".bold(), "halted".green()),
        Some(error) => format!("{} {}", "status:".bold(), error.to_string().red()),
    });

    if trace {
        lines.push(format!("{}", "trace:".bold()));
        for (i, entry) in result.trace.iter().enumerate() {
            lines.push(format!(
                "  {:>4} {} {}",
                i.to_string().dimmed(),
                format!("{:#04x}", entry.pc).cyan(),
                format_registers(&entry.registers)
            ));
        }
    }

    lines.join("\n")
}

fn format_registers(registers: &[u8]) -> String {
    registers
        .iter()
        .enumerate()
        .map(|(i, value)| format!("r{}={}", i, value))
        .collect::<Vec<_>>()
        .join(" ")
}
