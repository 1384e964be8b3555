#![deny(unsafe_code)]
//! CLI for fuelsense.
//!
//! Subcommands:
//! - `check` — run the inline heuristic for one changed field
//! - `assess` — grade a whole transaction as on form submit
//! - `render <animation>` — step a background animation N frames, write PNG
//! - `schema` — print validator and animation parameter schemas
//! - `list` — print available animations

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use fuelsense_core::{Animation, Srgb};
use fuelsense_raster::AnimationKind;
use fuelsense_validator::{
    assess_or_report, HeuristicConfig, RecordingFeedback, Transaction, Validator, VerdictState,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "fuelsense", about = "Fuel-purchase form checks and background effects")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify one changed form field against its siblings.
    Check {
        /// Field that changed (quantity, rate, amount, or any other input name).
        field: String,

        /// New value of the changed field. Defaults to that field's flag below.
        #[arg(long)]
        value: Option<String>,

        #[arg(long)]
        quantity: Option<String>,

        #[arg(long)]
        rate: Option<String>,

        #[arg(long)]
        amount: Option<String>,

        /// Threshold overrides as a JSON string.
        #[arg(long, default_value = "{}")]
        config: String,
    },
    /// Grade a submitted transaction by the gap between amount and quantity * rate.
    Assess {
        #[arg(long)]
        fuel_qty: String,

        #[arg(long)]
        rate: String,

        #[arg(long)]
        amount: String,

        #[arg(long, default_value = "")]
        pump_id: String,

        #[arg(long, default_value = "")]
        emp_id: String,
    },
    /// Run an animation for N frames and write a PNG snapshot.
    Render {
        /// Animation name (e.g. "particles").
        #[arg(default_value = "particles")]
        animation: String,

        /// Surface width in pixels.
        #[arg(short = 'W', long, default_value_t = 1280)]
        width: u32,

        /// Surface height in pixels.
        #[arg(short = 'H', long, default_value_t = 720)]
        height: u32,

        /// Number of frames to step before the snapshot.
        #[arg(short, long, default_value_t = 120)]
        frames: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Background color as #rrggbb.
        #[arg(short, long, default_value = "#1a1a2e")]
        background: String,

        /// Output file path.
        #[arg(short, long, default_value = "background.png")]
        output: PathBuf,

        /// Animation parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Print parameter schemas.
    Schema,
    /// List available animations.
    List,
}

fn parse_json(raw: &str, flag: &str) -> Result<serde_json::Value, CliError> {
    serde_json::from_str(raw).map_err(|e| CliError::Input(format!("invalid {flag} JSON: {e}")))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Check {
            field,
            value,
            quantity,
            rate,
            amount,
            config,
        } => {
            let validator = Validator::from_json(&parse_json(&config, "--config")?);
            let mut form = HashMap::new();
            for (name, v) in [("quantity", &quantity), ("rate", &rate), ("amount", &amount)] {
                if let Some(v) = v {
                    form.insert(name.to_string(), v.clone());
                }
            }
            let field_name = fuelsense_validator::FieldName::parse(&field);
            let value = value
                .or_else(|| form.get(field_name.as_str()).cloned())
                .unwrap_or_default();

            let mut sink = RecordingFeedback::new();
            let verdict = validator.on_field_change(&field, &value, &form, &mut sink)?;

            if cli.json {
                let out = serde_json::json!({
                    "field": field_name.as_str(),
                    "value": value,
                    "verdict": verdict,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                let label = match verdict.state {
                    VerdictState::Valid => "valid",
                    VerdictState::Warning => "warning",
                    VerdictState::Neutral => "neutral",
                };
                match verdict.message {
                    Some(msg) => println!("{field_name}: {label} - {msg}"),
                    None => println!("{field_name}: {label}"),
                }
            }
        }
        Command::Assess {
            fuel_qty,
            rate,
            amount,
            pump_id,
            emp_id,
        } => {
            let tx = Transaction {
                fuel_qty,
                rate,
                amount,
                pump_id,
                emp_id,
            };
            let assessment = assess_or_report(&tx);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                println!("{} [{}]", assessment.prediction, assessment.class);
                if let Some(expected) = assessment.expected_amount {
                    println!("expected amount: {expected:.2}");
                }
            }
        }
        Command::Render {
            animation,
            width,
            height,
            frames,
            seed,
            background,
            output,
            params,
        } => {
            let params = parse_json(&params, "--params")?;
            let background = Srgb::from_hex(&background)?;

            let mut anim = AnimationKind::from_name(&animation, width, height, seed, &params)?;
            (0..frames).for_each(|_| anim.step());

            fuelsense_raster::snapshot::snapshot(&anim, background, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "animation": animation,
                    "width": width,
                    "height": height,
                    "frames": frames,
                    "seed": seed,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {animation} ({width}x{height}, {frames} frames, seed {seed}) -> {}",
                    output.display()
                );
            }
        }
        Command::Schema => {
            let anim = AnimationKind::from_name("particles", 1, 1, 1, &serde_json::json!({"count": 0}))?;
            let schema = serde_json::json!({
                "validator": HeuristicConfig::param_schema(),
                "particles": anim.param_schema(),
            });
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Command::List => {
            let animations = AnimationKind::list_animations();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "animations": animations }))?);
            } else {
                println!("Animations:");
                for name in animations {
                    println!("  {name}");
                }
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        log::debug!("exiting with code {}", e.exit_code());
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn check_parses_field_and_siblings() {
        let cli = Cli::try_parse_from([
            "fuelsense", "check", "amount", "--quantity", "10", "--rate", "2", "--amount", "30",
        ])
        .unwrap();
        match cli.command {
            Command::Check { field, quantity, amount, value, .. } => {
                assert_eq!(field, "amount");
                assert_eq!(quantity.as_deref(), Some("10"));
                assert_eq!(amount.as_deref(), Some("30"));
                assert!(value.is_none());
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn render_defaults_to_particles() {
        let cli = Cli::try_parse_from(["fuelsense", "render"]).unwrap();
        match cli.command {
            Command::Render { animation, frames, .. } => {
                assert_eq!(animation, "particles");
                assert_eq!(frames, 120);
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn bad_params_json_is_input_error() {
        let err = parse_json("{nope", "--params").unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn check_runs_end_to_end() {
        let cli = Cli::try_parse_from(["fuelsense", "--json", "check", "rate", "--value", "0.5"]).unwrap();
        assert!(run(cli).is_ok());
    }

    #[test]
    fn render_rejects_bad_background() {
        let cli = Cli::try_parse_from(["fuelsense", "render", "--background", "purple"]).unwrap();
        let err = run(cli).unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }
}
