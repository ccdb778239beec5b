// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
//
//! slump_compute: CLI for on-site slump acceptance and correction
//!
//! Takes a load JSON on stdin or as --json argument, evaluates it against the
//! design water/cement ratio, and prints the result with a field record.
//!
//! Usage:
//!   echo '{"measuredSlump":50,"targetSlump":80,"volume":5,...}' | slump_compute
//!   slump_compute --json '{"measuredSlump":50,...}' --format text
//!   slump_compute --config calculator.json < load.json
//!
//! Exit status: 0 accepted or correctable with water, 2 rejected or
//! admixture required, 1 invalid input.

use serde_json::json;
use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

use slump_core::calculator::{Severity, SlumpCalculator};
use slump_core::config::CalculatorConfig;
use slump_core::kernel::events_for;
use slump_core::load::LoadInput;
use slump_core::report::{render_text, FieldRecord};

const EXIT_OK: i32 = 0;
const EXIT_INVALID: i32 = 1;
const EXIT_REJECT: i32 = 2;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    // stdin is only read when the load is not passed inline
    let mut stdin = String::new();
    if flag_value(&args, "--json").is_none() {
        if let Err(e) = io::stdin().read_to_string(&mut stdin) {
            eprintln!("ERROR: Failed to read stdin: {}", e);
            process::exit(EXIT_INVALID);
        }
    }

    let (output, code) = run(&args, &stdin);
    if code == EXIT_INVALID {
        eprintln!("{}", output);
    } else {
        print!("{}", output);
    }
    process::exit(code);
}

/// Evaluate one load. Returns what to print and the exit status; on
/// invalid input the text is the `ERROR:` line for stderr.
fn run(args: &[String], stdin: &str) -> (String, i32) {
    match evaluate(args, stdin) {
        Ok(done) => done,
        Err(message) => (format!("ERROR: {}", message), EXIT_INVALID),
    }
}

fn evaluate(args: &[String], stdin: &str) -> Result<(String, i32), String> {
    let format = flag_value(args, "--format").unwrap_or("json");
    if format != "json" && format != "text" {
        return Err(format!("unknown --format `{}` (expected json or text)", format));
    }

    let config = match flag_value(args, "--config") {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|e| format!("Invalid config {}: {}", path, e))?;
            CalculatorConfig::from_json(&raw)
                .map_err(|e| format!("Invalid config {}: {}", path, e))?
        }
        None => CalculatorConfig::default(),
    };

    let input = flag_value(args, "--json").unwrap_or(stdin);
    let load = LoadInput::from_json(input).map_err(|e| e.to_string())?;

    let calculator = SlumpCalculator::with_config(config);
    let result = calculator
        .evaluate_checked(&load)
        .map_err(|e| e.to_string())?;
    let record = FieldRecord::now(&load, &calculator.config().responsible_party);
    info!(classification = ?result.classification, "load evaluated");

    let output = if format == "text" {
        render_text(&load, &result, &record)
            .map_err(|e| format!("Failed to render report: {}", e))?
    } else {
        let value = json!({
            "result": result,
            "record": record,
            "events": events_for(&result),
        });
        let mut s = serde_json::to_string_pretty(&value)
            .map_err(|e| format!("Failed to serialize result: {}", e))?;
        s.push('\n');
        s
    };

    let code = if result.classification.severity() == Severity::Reject {
        EXIT_REJECT
    } else {
        EXIT_OK
    };
    Ok((output, code))
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn args(flags: &[&str]) -> Vec<String> {
        std::iter::once("slump_compute")
            .chain(flags.iter().copied())
            .map(String::from)
            .collect()
    }

    fn load(measured: f64, expected_water: f64) -> String {
        json!({
            "measuredSlump": measured, "targetSlump": 80, "volume": 5,
            "cementContent": 350, "designWaterCementRatio": 0.55,
            "expectedWater": expected_water, "temperature": 25, "concreteAge": 60
        })
        .to_string()
    }

    #[test]
    fn water_correction_exits_zero_with_json() {
        let (out, code) = run(&args(&[]), &load(50.0, 180.0));
        assert_eq!(code, EXIT_OK);
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["result"]["classification"], "allowed");
        assert_eq!(v["events"][0]["topic"], "SLUMP.CLASSIFICATION");
    }

    #[test]
    fn caveats_exit_zero() {
        let (_, code) = run(&args(&[]), &load(50.0, 190.0));
        assert_eq!(code, EXIT_OK);
    }

    #[test]
    fn too_fluid_exits_two() {
        let (out, code) = run(&args(&[]), &load(100.0, 180.0));
        assert_eq!(code, EXIT_REJECT);
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["result"]["classification"], "non-conforming-high");
    }

    #[test]
    fn admixture_required_exits_two() {
        let (_, code) = run(&args(&[]), &load(50.0, 200.0));
        assert_eq!(code, EXIT_REJECT);
    }

    #[test]
    fn invalid_input_exits_one() {
        let (out, code) = run(&args(&[]), "{ not json");
        assert_eq!(code, EXIT_INVALID);
        assert!(out.starts_with("ERROR: failed to parse load"), "{}", out);

        let zero_volume = load(50.0, 180.0).replace("\"volume\":5", "\"volume\":0");
        let (out, code) = run(&args(&[]), &zero_volume);
        assert_eq!(code, EXIT_INVALID);
        assert!(out.contains("volume"), "{}", out);
    }

    #[test]
    fn inline_json_wins_over_stdin() {
        let inline = load(100.0, 180.0);
        let (_, code) = run(&args(&["--json", &inline]), "");
        assert_eq!(code, EXIT_REJECT);
    }

    #[test]
    fn text_format_renders_report() {
        let (out, code) = run(&args(&["--format", "text"]), &load(50.0, 180.0));
        assert_eq!(code, EXIT_OK);
        assert!(out.starts_with("== CORRECTION ALLOWED =="));
        assert!(out.contains("SUMMARY: ADD 37.5 LITERS OF WATER"));
    }

    #[test]
    fn unknown_format_is_rejected() {
        let (out, code) = run(&args(&["--format", "yaml"]), &load(50.0, 180.0));
        assert_eq!(code, EXIT_INVALID);
        assert!(out.contains("unknown --format `yaml`"), "{}", out);
    }

    #[test]
    fn partial_config_file_overrides_tolerance() {
        let path = env::temp_dir().join(format!("slump_compute_cfg_{}.json", process::id()));
        fs::write(&path, r#"{"tolerance_mm": 35.0, "responsible_party": "QA"}"#).unwrap();
        let path_arg = path.to_string_lossy().into_owned();

        let (out, code) = run(&args(&["--config", &path_arg]), &load(50.0, 180.0));
        fs::remove_file(&path).unwrap();

        assert_eq!(code, EXIT_OK);
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["result"]["classification"], "adequate");
        assert_eq!(v["record"]["responsible"], "QA");
    }

    #[test]
    fn missing_config_file_exits_one() {
        let (out, code) = run(
            &args(&["--config", "/nonexistent/slump_compute.json"]),
            &load(50.0, 180.0),
        );
        assert_eq!(code, EXIT_INVALID);
        assert!(out.starts_with("ERROR: Invalid config"), "{}", out);
    }
}
