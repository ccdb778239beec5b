// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//
// Field documentation for an evaluated load: the timestamped record kept
// with the delivery ticket and a plain-text report for the site crew.

use crate::calculator::{Classification, SlumpResult};
use crate::load::{CementType, LoadInput, StructuralElement};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// dd/mm/yyyy, HH:MM:SS (pt-BR locale)
const RECORD_DATE_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    pub date: String,
    pub measured_slump: f64,
    pub target_slump: f64,
    pub volume: f64,
    pub temperature: f64,
    pub concrete_age: f64,
    pub structural_element: StructuralElement,
    pub cement_type: CementType,
    pub responsible: String,
}

impl FieldRecord {
    pub fn at(load: &LoadInput, timestamp: NaiveDateTime, responsible: &str) -> FieldRecord {
        FieldRecord {
            date: timestamp.format(RECORD_DATE_FORMAT).to_string(),
            measured_slump: load.measured_slump,
            target_slump: load.target_slump,
            volume: load.volume,
            temperature: load.temperature,
            concrete_age: load.concrete_age,
            structural_element: load.structural_element,
            cement_type: load.cement_type,
            responsible: responsible.to_string(),
        }
    }

    /// Record stamped with the local wall clock.
    pub fn now(load: &LoadInput, responsible: &str) -> FieldRecord {
        Self::at(load, Local::now().naive_local(), responsible)
    }
}

/// One-line action for the crew.
pub fn executive_summary(result: &SlumpResult) -> String {
    if result.is_allowed {
        match result.classification {
            Classification::Adequate => "RELEASE LOAD FOR PLACEMENT".to_string(),
            _ => format!(
                "ADD {:.1} LITERS OF WATER",
                result.additional_water_liters
            ),
        }
    } else if result.recommended_admixture_liters > 0.0 {
        format!(
            "USE ADMIXTURE: {:.2} L",
            result.recommended_admixture_liters
        )
    } else {
        "REJECT LOAD".to_string()
    }
}

/// Plain-text report: headline, technical table, risks, alert, summary and record.
pub fn render_text(
    load: &LoadInput,
    result: &SlumpResult,
    record: &FieldRecord,
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, load, result, record)?;
    Ok(out)
}

fn write_report(
    out: &mut String,
    load: &LoadInput,
    result: &SlumpResult,
    record: &FieldRecord,
) -> std::fmt::Result {
    writeln!(out, "== {} ==", result.classification.headline())?;
    writeln!(out, "{}", result.message)?;
    writeln!(out)?;

    writeln!(out, "TECHNICAL DATA")?;
    writeln!(
        out,
        "  Slump deviation:        {:+.0} mm",
        load.measured_slump - load.target_slump
    )?;
    writeln!(
        out,
        "  Corrected slump (est.): {:.0} mm",
        result.corrected_slump_estimate
    )?;
    writeln!(
        out,
        "  Water/cement ratio:     {:.3} (design {:.3})",
        result.new_water_cement_ratio, result.design_water_cement_ratio_echo
    )?;
    if result.additional_water_liters > 0.0 {
        writeln!(
            out,
            "  Additional water:       {:.1} L",
            result.additional_water_liters
        )?;
        if let Some(per_m3) = result.additional_water_per_cubic_meter {
            writeln!(out, "                          {:.1} L/m³", per_m3)?;
        }
    }
    if result.recommended_admixture_liters > 0.0 {
        let product = result
            .recommended_admixture
            .map(|a| a.label())
            .unwrap_or("Admixture");
        writeln!(
            out,
            "  {:<24}{:.2} L",
            format!("{}:", product),
            result.recommended_admixture_liters
        )?;
        writeln!(
            out,
            "                          {:.2}% of cement mass",
            result.recommended_admixture_percent_of_cement
        )?;
    }

    if !result.risks.is_empty() {
        writeln!(out)?;
        writeln!(out, "RISKS")?;
        for risk in &result.risks {
            writeln!(out, "  - {}", risk)?;
        }
    }

    if let Some(alert) = &result.normative_alert {
        writeln!(out)?;
        writeln!(out, "NORMATIVE ALERT")?;
        writeln!(out, "  {}", alert)?;
    }

    writeln!(out)?;
    writeln!(out, "SUMMARY: {}", executive_summary(result))?;
    writeln!(out)?;
    writeln!(out, "RECORD")?;
    writeln!(out, "  Date/time:   {}", record.date)?;
    writeln!(
        out,
        "  Slump:       {:.0} mm measured / {:.0} mm target",
        record.measured_slump, record.target_slump
    )?;
    writeln!(out, "  Volume:      {} m³", record.volume)?;
    writeln!(
        out,
        "  Conditions:  {} °C, {} min since batching",
        record.temperature, record.concrete_age
    )?;
    writeln!(
        out,
        "  Element:     {} ({})",
        record.structural_element, record.cement_type
    )?;
    writeln!(out, "  Responsible: {}", record.responsible)?;
    writeln!(
        out,
        "Recorded by the technological control system per NBR 12655."
    )?;
    Ok(())
}
