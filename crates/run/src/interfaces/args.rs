use clap::Parser;
use derive_builder::Builder;
use eyre::Result;
use regvm_common::bytecode::get_bytecode_from_target;
use regvm_vm::core::{registers::RegisterPolicy, vm::VmOptions};

/// Arguments for the `run` command
#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Executes regvm bytecode and prints its output",
    override_usage = "regvm run <TARGET> [OPTIONS]"
)]
pub struct RunArgs {
    /// The program to run, either a hex string or a file containing one.
    #[clap(required = true)]
    pub target: String,

    /// Stop the program after this many instructions. `0` removes the limit. Defaults to the
    /// configured `max_steps`.
    #[clap(long = "max-steps", value_name = "N")]
    pub max_steps: Option<u64>,

    /// How register operands outside R0-R7 are handled. Defaults to the configured
    /// `register_policy`.
    #[clap(long = "register-policy", value_enum)]
    pub register_policy: Option<RegisterPolicy>,

    /// Include the execution trace in the output.
    #[clap(long, short)]
    pub trace: bool,

    /// Print the result as JSON.
    #[clap(long)]
    pub json: bool,

    /// Name of the output file.
    #[clap(long, short, default_value = "", hide_default_value = true)]
    pub name: String,

    /// The output directory to write the output to or 'print' to print to the console
    #[clap(long = "output", short = 'o', default_value = "print", hide_default_value = true)]
    pub output: String,

    /// Execution settings used for any flag that was not given, typically the configured ones.
    #[clap(skip)]
    pub defaults: VmOptions,
}

impl RunArgs {
    /// Resolves the target into raw bytecode.
    pub fn get_bytecode(&self) -> Result<Vec<u8>> {
        Ok(get_bytecode_from_target(&self.target)?)
    }

    /// The execution settings for this run. Flags that were given replace the matching field of
    /// `defaults`.
    ///
    /// ```
    /// use regvm_run::RunArgsBuilder;
    /// use regvm_vm::core::{registers::RegisterPolicy, vm::VmOptions};
    ///
    /// let args = RunArgsBuilder::new()
    ///     .register_policy(Some(RegisterPolicy::Mask))
    ///     .defaults(VmOptions::default().with_max_steps(Some(10)))
    ///     .build()
    ///     .expect("failed to build args");
    ///
    /// let options = args.options();
    /// assert_eq!(options.max_steps, Some(10));
    /// assert_eq!(options.register_policy, RegisterPolicy::Mask);
    /// ```
    pub fn options(&self) -> VmOptions {
        let mut options = self.defaults;

        if let Some(max_steps) = self.max_steps {
            options = options.with_step_limit(max_steps);
        }
        if let Some(register_policy) = self.register_policy {
            options = options.with_register_policy(register_policy);
        }

        options
    }
}

impl RunArgsBuilder {
    /// Creates a builder with every field set to its command line default.
    pub fn new() -> Self {
        Self {
            target: Some(String::new()),
            max_steps: Some(None),
            register_policy: Some(None),
            trace: Some(false),
            json: Some(false),
            name: Some(String::new()),
            output: Some(String::from("print")),
            defaults: Some(VmOptions::default()),
        }
    }
}
