// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//
// Water correction factor k (L/m³ per 10 mm of slump gain).
//
// Site conditions that stiffen the mix raise k. Rules are evaluated in
// table order and are NOT exclusive: a load at 36 °C picks up both the
// "> 30" and the "> 35" increments.

use crate::load::{AggregateType, LoadInput};
use tracing::trace;

/// One increment applied to k when its condition holds.
pub struct FactorRule {
    pub label: &'static str,
    pub applies: fn(&LoadInput) -> bool,
    pub delta: f64,
}

fn hot(load: &LoadInput) -> bool {
    load.temperature > 30.0
}

fn very_hot(load: &LoadInput) -> bool {
    load.temperature > 35.0
}

fn aged(load: &LoadInput) -> bool {
    load.concrete_age > 90.0
}

fn very_aged(load: &LoadInput) -> bool {
    load.concrete_age > 120.0
}

fn fine_aggregate(load: &LoadInput) -> bool {
    load.aggregate_type == AggregateType::Brita0
}

fn rounded_aggregate(load: &LoadInput) -> bool {
    load.aggregate_type == AggregateType::Seixo
}

pub const FACTOR_RULES: [FactorRule; 6] = [
    FactorRule { label: "temperature > 30 °C", applies: hot, delta: 0.3 },
    FactorRule { label: "temperature > 35 °C", applies: very_hot, delta: 0.5 },
    FactorRule { label: "age > 90 min", applies: aged, delta: 0.5 },
    FactorRule { label: "age > 120 min", applies: very_aged, delta: 0.8 },
    // Smaller aggregate, larger specific surface to wet
    FactorRule { label: "Brita 0 aggregate", applies: fine_aggregate, delta: 0.3 },
    // Rounded river gravel needs less water
    FactorRule { label: "Seixo aggregate", applies: rounded_aggregate, delta: -0.2 },
];

/// Fold every applicable rule into `base`.
pub fn correction_factor(base: f64, load: &LoadInput) -> f64 {
    FACTOR_RULES
        .iter()
        .filter(|rule| (rule.applies)(load))
        .fold(base, |k, rule| {
            trace!(rule = rule.label, delta = rule.delta, "correction rule applied");
            k + rule.delta
        })
}

/// Labels of the rules that fire for `load`, in table order.
pub fn applied_rules(load: &LoadInput) -> Vec<&'static str> {
    FACTOR_RULES
        .iter()
        .filter(|rule| (rule.applies)(load))
        .map(|rule| rule.label)
        .collect()
}
