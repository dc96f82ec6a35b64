// ⚙️ Configuration - run mode from argv, log filter from the environment

use anyhow::{bail, Result};

pub const USAGE: &str = "\
Usage:
  bmi-calculator                                  interactive calculator
  bmi-calculator calc <height_cm> <weight_kg> [--json]
  bmi-calculator help";

/// What the binary should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Interactive terminal form (default)
    Ui,

    /// One-shot calculation. Texts are passed through to the engine as typed.
    Calc {
        height: String,
        weight: String,
        json: bool,
    },

    Help,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,

    /// tracing-subscriber filter directive
    pub rust_log: String,
}

impl Config {
    /// Build from the process arguments and environment.
    /// A `.env` file is loaded first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let args: Vec<String> = std::env::args().skip(1).collect();
        Ok(Config {
            mode: parse_mode(&args)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
        })
    }
}

/// Parse arguments (without the program name)
pub fn parse_mode(args: &[String]) -> Result<Mode> {
    let Some(command) = args.first() else {
        return Ok(Mode::Ui);
    };

    match command.as_str() {
        "ui" => Ok(Mode::Ui),
        "help" | "--help" | "-h" => Ok(Mode::Help),
        "calc" => {
            let mut json = false;
            let mut values = Vec::new();
            for arg in &args[1..] {
                if arg == "--json" {
                    json = true;
                } else {
                    values.push(arg.clone());
                }
            }

            match <[String; 2]>::try_from(values) {
                Ok([height, weight]) => Ok(Mode::Calc {
                    height,
                    weight,
                    json,
                }),
                Err(values) => bail!(
                    "calc expects <height_cm> <weight_kg>, got {} value(s)\n\n{}",
                    values.len(),
                    USAGE
                ),
            }
        }
        other => bail!("unknown command '{}'\n\n{}", other, USAGE),
    }
}
