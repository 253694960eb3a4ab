//! Configuration management for regvm
//!
//! This crate provides functionality for managing the regvm configuration, including loading,
//! saving, updating, and deleting configuration settings. The configuration holds the execution
//! defaults applied by `regvm run` when no flag overrides them.

/// Error types for the configuration module
pub mod error;

use crate::error::Error;
use clap::Parser;
use regvm_common::utils::io::file::{delete_path, read_file, write_file};
use regvm_vm::core::{registers::RegisterPolicy, vm::VmOptions};
use serde::{Deserialize, Serialize};
#[allow(deprecated)]
use std::env::home_dir;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Command line arguments for the configuration command
#[derive(Debug, Clone, Parser)]
#[clap(
    about = "Display and edit the current configuration",
    override_usage = "regvm config [KEY] [VALUE]"
)]
pub struct ConfigArgs {
    /// The target key to update.
    #[clap(required = false, default_value = "")]
    pub key: String,

    /// The value to set the key to.
    #[clap(required = false, default_value = "")]
    pub value: String,
}

/// The [`Configuration`] struct represents the configuration of the CLI. `regvm run` reads its
/// execution defaults from here; command line flags take precedence.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Configuration {
    /// The maximum number of instructions a program may execute. `0` means unlimited.
    pub max_steps: u64,

    /// How register operands outside R0-R7 are handled.
    pub register_policy: RegisterPolicy,
}

/// Returns the path of the configuration file, `$HOME/.regvm/config.toml`.
#[allow(deprecated)]
pub fn config_path() -> Result<PathBuf, Error> {
    let mut home = home_dir().ok_or_else(|| {
        Error::Generic(
            "failed to get home directory. does your os support `std::env::home_dir()`?"
                .to_string(),
        )
    })?;
    home.push(".regvm");
    home.push("config.toml");

    Ok(home)
}

fn path_str(path: &Path) -> Result<&str, Error> {
    path.to_str().ok_or_else(|| Error::Generic("failed to convert path to string".to_string()))
}

impl Configuration {
    /// Returns the current configuration, creating the file with default values if it doesn't
    /// exist yet.
    pub fn load() -> Result<Self, Error> {
        Self::load_from(&config_path()?)
    }

    /// Reads the configuration stored at `path`, creating it with default values if missing.
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        // if the config file doesn't exist, create it
        if !path.exists() {
            debug!("no configuration found at '{}', writing defaults", path.display());
            Configuration::default().save_to(path)?;
        }

        // read the config file
        let contents = read_file(path_str(path)?)
            .map_err(|e| Error::Generic(format!("failed to read config file: {e}")))?;

        // parse the config file
        toml::from_str(&contents)
            .map_err(|e| Error::ParseError(format!("failed to parse config file: {e}")))
    }

    /// Saves the current configuration to disk.
    pub fn save(&self) -> Result<(), Error> {
        self.save_to(&config_path()?)
    }

    /// Writes the configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), Error> {
        write_file(
            path_str(path)?,
            &toml::to_string(&self)
                .map_err(|e| Error::ParseError(format!("failed to serialize config: {e}")))?,
        )
        .map_err(|e| Error::Generic(format!("failed to write config file: {e}")))?;

        Ok(())
    }

    /// Deletes the configuration file at `$HOME/.regvm/config.toml`.
    pub fn delete() -> Result<(), Error> {
        let path = config_path()?;
        if !delete_path(path_str(&path)?) {
            return Err(Error::Generic(format!(
                "failed to delete config file '{}'",
                path.display()
            )));
        }

        Ok(())
    }

    /// Sets a single key/value pair, checking that the value has the correct type. Nothing is
    /// written to disk.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        match key {
            "max_steps" => {
                self.max_steps = value.parse::<u64>().map_err(|e| {
                    Error::ParseError(format!("'{value}' is not a valid step count: {e}"))
                })?;
            }
            "register_policy" => {
                self.register_policy = value.parse::<RegisterPolicy>().map_err(|e| {
                    Error::ParseError(format!("{e}, expected 'fault' or 'mask'"))
                })?;
            }
            _ => return Err(Error::InvalidKey(key.to_string())),
        }

        Ok(())
    }

    /// Update a single key/value pair in the configuration and write it to disk.
    pub fn update(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.set(key, value)?;

        // write the updated config to disk
        self.save()?;

        Ok(())
    }

    /// The execution settings described by this configuration.
    ///
    /// ```
    /// use regvm_config::Configuration;
    ///
    /// let config = Configuration { max_steps: 0, ..Default::default() };
    /// assert_eq!(config.vm_options().max_steps, None);
    ///
    /// let config = Configuration { max_steps: 1000, ..Default::default() };
    /// assert_eq!(config.vm_options().max_steps, Some(1000));
    /// ```
    pub fn vm_options(&self) -> VmOptions {
        VmOptions::default()
            .with_step_limit(self.max_steps)
            .with_register_policy(self.register_policy)
    }
}

/// The `config` command is used to display and edit the current configuration.
pub fn config(args: ConfigArgs) -> Result<(), Error> {
    if !args.key.is_empty() {
        if !args.value.is_empty() {
            // read the config file and update the key/value pair
            let mut config = Configuration::load()?;
            config.update(&args.key, &args.value)?;
            info!("updated configuration! Set '{}' = '{}' .", &args.key, &args.value);
        } else {
            // key is set, but no value is set
            return Err(Error::MissingValue(args.key));
        }
    } else {
        // no key is set, print the config file
        println!("{:#?}", Configuration::load()?);
        info!("use `regvm config <KEY> <VALUE>` to set a key/value pair.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn temp_config(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join("regvm_config_tests").join(name);
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn test_default_configuration() {
        let config = Configuration::default();
        assert_eq!(config.max_steps, 0);
        assert_eq!(config.register_policy, RegisterPolicy::Fault);
        assert_eq!(config.vm_options(), VmOptions::default());
    }

    #[test]
    fn test_load_creates_missing_file() {
        let path = temp_config("missing.toml");

        let config = Configuration::load_from(&path).expect("failed to load config file");
        assert_eq!(config, Configuration::default());
        assert!(path.exists());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_config("round_trip.toml");
        let mut config = Configuration::default();
        config.set("max_steps", "5000").expect("failed to set max_steps");
        config.set("register_policy", "mask").expect("failed to set register_policy");
        config.save_to(&path).expect("failed to save config file");

        let contents = std::fs::read_to_string(&path).expect("failed to read config file");
        assert!(contents.contains("max_steps = 5000"));
        assert!(contents.contains("register_policy = \"mask\""));

        let loaded = Configuration::load_from(&path).expect("failed to load config file");
        assert_eq!(loaded, config);
        assert_eq!(loaded.vm_options().max_steps, Some(5000));
        assert_eq!(loaded.vm_options().register_policy, RegisterPolicy::Mask);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let path = temp_config("partial.toml");
        std::fs::create_dir_all(path.parent().expect("no parent")).expect("failed to create dir");
        std::fs::write(&path, "max_steps = 12\n").expect("failed to write config file");

        let config = Configuration::load_from(&path).expect("failed to load config file");
        assert_eq!(config.max_steps, 12);
        assert_eq!(config.register_policy, RegisterPolicy::Fault);
    }

    #[test]
    fn test_malformed_file() {
        let path = temp_config("malformed.toml");
        std::fs::create_dir_all(path.parent().expect("no parent")).expect("failed to create dir");
        std::fs::write(&path, "register_policy = \"wrap\"\n").expect("failed to write config");

        assert!(matches!(Configuration::load_from(&path), Err(Error::ParseError(_))));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Configuration::default();

        assert!(matches!(config.set("max_steps", "-1"), Err(Error::ParseError(_))));
        assert!(matches!(config.set("register_policy", "wrap"), Err(Error::ParseError(_))));
        assert!(matches!(config.set("rpc_url", "x"), Err(Error::InvalidKey(_))));
        assert_eq!(config, Configuration::default());
    }

    #[test]
    #[serial]
    fn test_update_and_delete_configuration() {
        Configuration::delete().expect("failed to delete config file");
        let mut config = Configuration::load().expect("failed to load config file");

        config.update("max_steps", "64").expect("failed to update max_steps");
        let loaded = Configuration::load().expect("failed to load config file");
        assert_eq!(loaded.max_steps, 64);

        Configuration::delete().expect("failed to delete config file");
        let config = Configuration::load().expect("failed to load config file");
        assert_eq!(config, Configuration::default());
    }

    #[test]
    #[serial]
    fn test_config_command() {
        Configuration::delete().expect("failed to delete config file");

        config(ConfigArgs { key: "register_policy".to_string(), value: "mask".to_string() })
            .expect("config command failed");
        assert_eq!(
            Configuration::load().expect("failed to load config file").register_policy,
            RegisterPolicy::Mask
        );

        let result =
            config(ConfigArgs { key: "unknown".to_string(), value: "1".to_string() });
        assert!(matches!(result, Err(Error::InvalidKey(_))));

        let result = config(ConfigArgs { key: "max_steps".to_string(), value: String::new() });
        assert!(matches!(result, Err(Error::MissingValue(key)) if key == "max_steps"));

        Configuration::delete().expect("failed to delete config file");
    }
}
