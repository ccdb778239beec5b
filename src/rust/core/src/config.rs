// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
use crate::error::InputError;
use serde::{Deserialize, Serialize};

/// Tunable constants of the slump calculator.
///
/// `Default` reproduces the field procedure used for NBR 12655 acceptance;
/// a partial JSON file overrides only the keys it names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Half-width of the acceptance band around the target slump (mm).
    pub tolerance_mm: f64,
    /// Base correction factor k (L/m³ per 10 mm of slump gain).
    pub base_factor: f64,
    /// Multiplier on the design a/c tolerated with caveats.
    pub safety_margin: f64,
    /// Largest slump gain (mm) a plain plasticizer is trusted to deliver
    /// when no admixture is in use.
    pub plasticizer_max_gain_mm: f64,
    /// Label printed in the field record.
    pub responsible_party: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            tolerance_mm: 10.0,
            base_factor: 2.5,
            safety_margin: 1.05,
            plasticizer_max_gain_mm: 30.0,
            responsible_party: "Técnico de Controle Tecnológico".to_string(),
        }
    }
}

impl CalculatorConfig {
    pub fn from_json(json: &str) -> Result<CalculatorConfig, InputError> {
        Ok(serde_json::from_str(json)?)
    }
}
