// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bmi_calculator::{config::USAGE, evaluate, Assessment, Config, Mode};

/// JSON shape of a one-shot calculation
#[derive(Serialize)]
struct CalcResponse {
    bmi: f64,
    bmi_display: String,
    category: bmi_calculator::Category,
    label: &'static str,
}

impl From<Assessment> for CalcResponse {
    fn from(assessment: Assessment) -> Self {
        Self {
            bmi: assessment.bmi,
            bmi_display: assessment.display_value(),
            category: assessment.category,
            label: assessment.category.label(),
        }
    }
}

fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Logs go to stderr; the default filter keeps the UI screen clean
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("bmi-calculator v{}", bmi_calculator::VERSION);

    match config.mode {
        Mode::Ui => run_ui_mode()?,
        Mode::Calc {
            height,
            weight,
            json,
        } => run_calc(&height, &weight, json)?,
        Mode::Help => println!("{}", USAGE),
    }

    Ok(())
}

/// Outcome of a one-shot calculation: what to print, where, and the exit status
#[derive(Debug, PartialEq)]
enum CalcOutcome {
    Computed(String),
    Rejected(String),
}

impl CalcOutcome {
    fn exit_code(&self) -> i32 {
        match self {
            CalcOutcome::Computed(_) => 0,
            CalcOutcome::Rejected(_) => 1,
        }
    }
}

fn calc(height: &str, weight: &str, json: bool) -> Result<CalcOutcome> {
    match evaluate(height, weight) {
        Ok(assessment) => Ok(CalcOutcome::Computed(render_calc(assessment, json)?)),
        Err(e) => Ok(CalcOutcome::Rejected(format!("❌ No BMI: {}", e))),
    }
}

fn run_calc(height: &str, weight: &str, json: bool) -> Result<()> {
    let outcome = calc(height, weight, json)?;
    match &outcome {
        CalcOutcome::Computed(text) => println!("{}", text),
        CalcOutcome::Rejected(message) => {
            eprintln!("{}", message);
            std::process::exit(outcome.exit_code());
        }
    }

    Ok(())
}

/// Text printed for a successful `calc`
fn render_calc(assessment: Assessment, json: bool) -> Result<String> {
    if json {
        serde_json::to_string_pretty(&CalcResponse::from(assessment))
            .context("Failed to serialize result")
    } else {
        Ok(assessment.summary())
    }
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    println!("🖥️  Starting BMI Calculator... (Esc to quit)\n");

    let mut app = ui::App::new();
    ui::run_ui(&mut app).context("Terminal UI failed")?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use: bmi-calculator calc <height_cm> <weight_kg>");
    std::process::exit(1);
}
