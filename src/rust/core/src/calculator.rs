// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//
// SlumpCalculator: acceptance and correction of a fresh-concrete load
//
// ============================================================================
// Decision bands (deviation = measured - target)
// ============================================================================
//   |deviation| <= tolerance   -> Adequate, nothing to do
//   deviation  >  tolerance    -> NonConformingHigh, reject (too fluid)
//   deviation  < -tolerance    -> water correction, bounded by the design a/c:
//       new a/c <= design              -> Allowed
//       new a/c <= design * margin     -> AllowedWithCaveats
//       otherwise                      -> NotAllowed, admixture instead
// ============================================================================

use crate::config::CalculatorConfig;
use crate::error::InputError;
use crate::formulas::{
    percent_of_cement, round_to, safety_limit, slump_deviation, water_cement_ratio,
    water_for_slump_gain,
};
use crate::load::{AdmixtureType, LoadInput};
use crate::science::{admixture, correction};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

const ALERT_REJECT: &str = "NBR 12655: Concrete outside specification must be rejected.";
const ALERT_LIMIT: &str =
    "NBR 12655: The water/cement ratio is at the limit. Increase technological control.";
const ALERT_ADMIXTURE: &str = "NBR 12655 Art. 6.2.2: Concrete that does not meet the mix design \
     requirements must be rejected or corrected with admixtures, never with additional water \
     that exceeds the specified water/cement ratio.";

const RISKS_TOO_FLUID: [&str; 5] = [
    "Possible excess water",
    "Compromised strength",
    "Increased shrinkage",
    "Concrete segregation",
    "Excessive bleeding",
];

const RISKS_ALLOWED: [&str; 1] = ["Monitor homogeneity after addition"];

const RISKS_CAVEATS: [&str; 4] = [
    "Close to the water/cement ratio limit",
    "May marginally affect strength",
    "Requires rigorous control of the addition",
    "Increase sampling of test specimens",
];

const RISKS_NOT_ALLOWED: [&str; 5] = [
    "Violation of the design water/cement ratio",
    "Significant strength loss",
    "Compromised durability",
    "Increased permeability",
    "Risk of shrinkage cracking",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    Adequate,
    Allowed,
    AllowedWithCaveats,
    NotAllowed,
    NonConformingHigh,
}

/// How the outcome should be flagged to the site crew.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Ok,
    Caution,
    Reject,
}

impl Classification {
    pub fn headline(self) -> &'static str {
        match self {
            Classification::Adequate => "SLUMP ADEQUATE",
            Classification::Allowed => "CORRECTION ALLOWED",
            Classification::AllowedWithCaveats => "CORRECTION WITH CAVEATS",
            Classification::NotAllowed => "CORRECTION NOT ALLOWED",
            Classification::NonConformingHigh => "NON-CONFORMITY",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Classification::Adequate | Classification::Allowed => Severity::Ok,
            Classification::AllowedWithCaveats => Severity::Caution,
            Classification::NotAllowed | Classification::NonConformingHigh => Severity::Reject,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.headline())
    }
}

/// Outcome of one evaluation. Quantities are totals for the whole load
/// unless the name says per cubic meter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlumpResult {
    pub classification: Classification,
    pub message: String,
    /// mm
    pub corrected_slump_estimate: f64,
    /// L
    pub additional_water_liters: f64,
    /// L/m³, only when water is added
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_water_per_cubic_meter: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_admixture: Option<AdmixtureType>,
    /// L
    pub recommended_admixture_liters: f64,
    /// %, 2 decimals
    pub recommended_admixture_percent_of_cement: f64,
    /// 3 decimals
    pub new_water_cement_ratio: f64,
    /// 3 decimals
    pub design_water_cement_ratio_echo: f64,
    pub risks: Vec<String>,
    pub is_allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normative_alert: Option<String>,
    /// |measured - target| (mm)
    pub slump_deviation: f64,
    /// k used for the water estimate (L/m³ per 10 mm); correction path only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction_factor: Option<f64>,
}

impl SlumpResult {
    fn no_action(
        classification: Classification,
        message: String,
        load: &LoadInput,
        deviation: f64,
    ) -> SlumpResult {
        let design_echo = round_to(load.design_water_cement_ratio, 3);
        SlumpResult {
            classification,
            message,
            corrected_slump_estimate: load.measured_slump,
            additional_water_liters: 0.0,
            additional_water_per_cubic_meter: None,
            recommended_admixture: None,
            recommended_admixture_liters: 0.0,
            recommended_admixture_percent_of_cement: 0.0,
            new_water_cement_ratio: design_echo,
            design_water_cement_ratio_echo: design_echo,
            risks: Vec::new(),
            is_allowed: true,
            normative_alert: None,
            slump_deviation: deviation.abs(),
            correction_factor: None,
        }
    }
}

fn owned(risks: &[&str]) -> Vec<String> {
    risks.iter().map(|r| r.to_string()).collect()
}

/// Stateless evaluator. Holds configuration only; every call is independent.
#[derive(Clone, Debug, Default)]
pub struct SlumpCalculator {
    config: CalculatorConfig,
}

impl SlumpCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CalculatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Validate, then evaluate.
    pub fn evaluate_checked(&self, load: &LoadInput) -> Result<SlumpResult, InputError> {
        if let Err(e) = load.validate() {
            warn!(error = %e, "load rejected before evaluation");
            return Err(e);
        }
        Ok(self.evaluate(load))
    }

    /// Classify a load and recommend a correction.
    ///
    /// Does not validate: a zero `volume` or `cement_content` propagates as
    /// NaN/infinity. Use [`SlumpCalculator::evaluate_checked`] on raw input.
    pub fn evaluate(&self, load: &LoadInput) -> SlumpResult {
        let deviation = slump_deviation(load.measured_slump, load.target_slump);
        let tolerance = self.config.tolerance_mm;

        let result = if deviation.abs() <= tolerance {
            SlumpResult::no_action(
                Classification::Adequate,
                format!("Slump within acceptable tolerance (±{} mm).", tolerance),
                load,
                deviation,
            )
        } else if deviation > tolerance {
            self.too_fluid(load, deviation)
        } else {
            self.too_stiff(load, deviation)
        };

        debug!(
            classification = ?result.classification,
            deviation,
            water_l = result.additional_water_liters,
            admixture_l = result.recommended_admixture_liters,
            "load evaluated"
        );
        result
    }

    fn too_fluid(&self, load: &LoadInput, deviation: f64) -> SlumpResult {
        let mut result = SlumpResult::no_action(
            Classification::NonConformingHigh,
            format!(
                "Slump {} mm above specification. Concrete excessively fluid. REJECT LOAD.",
                deviation
            ),
            load,
            deviation,
        );
        result.risks = owned(&RISKS_TOO_FLUID);
        result.is_allowed = false;
        result.normative_alert = Some(ALERT_REJECT.to_string());
        result
    }

    fn too_stiff(&self, load: &LoadInput, deviation: f64) -> SlumpResult {
        let needed = deviation.abs();

        // 1. Water estimate
        let k = correction::correction_factor(self.config.base_factor, load);
        let water_per_m3 = water_for_slump_gain(needed, k);
        let total_extra = water_per_m3 * load.volume;

        // 2. Resulting a/c over the whole load
        let total_cement = load.total_cement();
        let new_ratio = water_cement_ratio(load.total_water(), total_extra, total_cement);
        let design = load.design_water_cement_ratio;
        let limit = safety_limit(design, self.config.safety_margin);

        // 3. Decide
        let (classification, message, water, dose, risks, alert) = if new_ratio <= design {
            (
                Classification::Allowed,
                "Water correction allowed within normative limits.".to_string(),
                total_extra,
                None,
                owned(&RISKS_ALLOWED),
                None,
            )
        } else if new_ratio <= limit {
            (
                Classification::AllowedWithCaveats,
                "Correction close to the limit. Add water with extreme caution and record the adjustment."
                    .to_string(),
                total_extra,
                None,
                owned(&RISKS_CAVEATS),
                Some(ALERT_LIMIT.to_string()),
            )
        } else {
            let dose = admixture::recommend(
                load.admixture_in_use,
                needed,
                self.config.plasticizer_max_gain_mm,
                total_cement,
            );
            (
                Classification::NotAllowed,
                format!(
                    "Water addition PROHIBITED - it would exceed the design water/cement ratio. {}",
                    dose.instruction()
                ),
                0.0,
                Some(dose),
                owned(&RISKS_NOT_ALLOWED),
                Some(ALERT_ADMIXTURE.to_string()),
            )
        };

        let is_allowed = classification != Classification::NotAllowed;
        let corrected = if is_allowed && water > 0.0 {
            load.measured_slump + needed
        } else {
            load.target_slump
        };
        let admixture_liters = dose.map_or(0.0, |d| d.liters);

        SlumpResult {
            classification,
            message,
            corrected_slump_estimate: corrected,
            additional_water_liters: water,
            additional_water_per_cubic_meter: (water > 0.0).then(|| water / load.volume),
            recommended_admixture: dose.map(|d| d.product),
            recommended_admixture_liters: admixture_liters,
            recommended_admixture_percent_of_cement: round_to(
                percent_of_cement(admixture_liters, total_cement),
                2,
            ),
            new_water_cement_ratio: round_to(new_ratio, 3),
            design_water_cement_ratio_echo: round_to(design, 3),
            risks,
            is_allowed,
            normative_alert: alert,
            slump_deviation: needed,
            correction_factor: Some(k),
        }
    }
}
