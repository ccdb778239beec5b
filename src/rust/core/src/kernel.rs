// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//
// ============================================================================
// SlumpKernel: browser entry point
// ============================================================================
// The site form calls ONLY this module. Parsing, validation, evaluation and
// the field record all happen in Rust; the form renders what comes back.
// ============================================================================

use crate::calculator::{Classification, SlumpCalculator, SlumpResult};
use crate::error::InputError;
use crate::load::LoadInput;
use crate::report::FieldRecord;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationEvent {
    pub topic: String,
    pub message: String,
    pub severity: String, // 'INFO', 'WARNING', 'CRITICAL'
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SlumpResponse {
    pub result: SlumpResult,
    pub record: FieldRecord,
    pub events: Vec<ValidationEvent>,
}

#[wasm_bindgen]
pub struct SlumpKernel;

#[wasm_bindgen]
impl SlumpKernel {
    /// Evaluate a load sent by the site form as a JSON string.
    ///
    /// # Returns
    /// JSON `{ result, record, events }`, or `{ error }` when the load cannot
    /// be parsed or fails field validation.
    #[wasm_bindgen]
    pub fn evaluate_json(input_json: &str) -> String {
        let response = LoadInput::from_json(input_json).and_then(|load| Self::respond(&load));
        match response {
            Ok(r) => serde_json::to_string(&r).unwrap_or_default(),
            Err(e) => serde_json::to_string(&serde_json::json!({ "error": e.to_string() }))
                .unwrap_or_default(),
        }
    }

    /// Same as [`SlumpKernel::evaluate_json`] over JS objects.
    #[wasm_bindgen]
    pub fn evaluate(input: JsValue) -> Result<JsValue, JsValue> {
        let load: LoadInput = serde_wasm_bindgen::from_value(input)?;
        let response = Self::respond(&load).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(serde_wasm_bindgen::to_value(&response)?)
    }
}

/// Pure Rust side (non-wasm-bindgen)
impl SlumpKernel {
    pub fn respond(load: &LoadInput) -> Result<SlumpResponse, InputError> {
        let calculator = SlumpCalculator::new();
        let result = calculator.evaluate_checked(load)?;
        let record = FieldRecord::now(load, &calculator.config().responsible_party);
        let events = events_for(&result);
        Ok(SlumpResponse {
            result,
            record,
            events,
        })
    }
}

pub fn events_for(result: &SlumpResult) -> Vec<ValidationEvent> {
    let severity = match result.classification {
        Classification::Adequate | Classification::Allowed => "INFO",
        Classification::AllowedWithCaveats => "WARNING",
        Classification::NotAllowed | Classification::NonConformingHigh => "CRITICAL",
    };

    let mut events = vec![ValidationEvent {
        topic: "SLUMP.CLASSIFICATION".to_string(),
        message: format!(
            "{}: deviation {:.0} mm",
            result.classification.headline(),
            result.slump_deviation
        ),
        severity: severity.to_string(),
    }];

    if let Some(alert) = &result.normative_alert {
        events.push(ValidationEvent {
            topic: "NBR12655.ALERT".to_string(),
            message: alert.clone(),
            severity: severity.to_string(),
        });
    }

    events
}
