// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto

//! Slump Kernel Scenario Tests
//!
//! Field scenarios driven through the JSON entry point, as the site form sends them.

use crate::kernel::SlumpKernel;
use serde_json::{json, Value};

fn evaluate(load: Value) -> Value {
    let out = SlumpKernel::evaluate_json(&load.to_string());
    serde_json::from_str(&out).unwrap()
}

fn reference_load() -> Value {
    json!({
        "measuredSlump": 50, "targetSlump": 80, "volume": 5,
        "cementContent": 350, "designWaterCementRatio": 0.55,
        "expectedWater": 180, "aggregateType": "Brita 1",
        "admixtureInUse": "None", "temperature": 25,
        "concreteAge": 60, "structuralElement": "Slab"
    })
}

#[test]
fn scenario_on_target_is_adequate() {
    let mut load = reference_load();
    load["measuredSlump"] = json!(80);
    let res = &evaluate(load)["result"];
    assert_eq!(res["classification"], "adequate");
    assert_eq!(res["slumpDeviation"], 0.0);
    assert_eq!(res["isAllowed"], true);
    assert_eq!(res["additionalWaterLiters"], 0.0);
    assert_eq!(res["recommendedAdmixtureLiters"], 0.0);
}

#[test]
fn scenario_too_fluid_is_rejected() {
    let mut load = reference_load();
    load["measuredSlump"] = json!(100);
    let response = evaluate(load);
    let res = &response["result"];
    assert_eq!(res["classification"], "non-conforming-high");
    assert_eq!(res["isAllowed"], false);
    assert_eq!(res["risks"].as_array().unwrap().len(), 5);

    let events = response["events"].as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["severity"], "CRITICAL");
    assert_eq!(events[1]["topic"], "NBR12655.ALERT");
}

#[test]
fn scenario_reference_load_water_estimate() {
    let res = &evaluate(reference_load())["result"];
    assert_eq!(res["slumpDeviation"], 30.0);
    assert_eq!(res["correctionFactor"], 2.5);
    assert_eq!(res["additionalWaterPerCubicMeter"], 7.5);
    assert_eq!(res["additionalWaterLiters"], 37.5);
    // (900 + 37.5) / 1750 = 0.536 <= 0.55
    assert_eq!(res["newWaterCementRatio"], 0.536);
    assert_eq!(res["classification"], "allowed");
}

#[test]
fn scenario_hot_old_fine_aggregate_stacks_factor() {
    let mut load = reference_load();
    load["temperature"] = json!(36);
    load["concreteAge"] = json!(130);
    load["aggregateType"] = json!("Brita 0");
    let res = &evaluate(load)["result"];

    let k = res["correctionFactor"].as_f64().unwrap();
    assert!((k - 4.9).abs() < 1e-9, "k = {}", k);
    // 3 * 4.9 * 5 = 73.5 L -> (900 + 73.5) / 1750 = 0.556, inside the 5% margin
    let water = res["additionalWaterLiters"].as_f64().unwrap();
    assert!((water - 73.5).abs() < 1e-9);
    assert_eq!(res["classification"], "allowed-with-caveats");
}

#[test]
fn scenario_plasticizer_for_small_gain() {
    let mut load = reference_load();
    load["measuredSlump"] = json!(55);
    load["expectedWater"] = json!(200);
    let res = &evaluate(load)["result"];
    assert_eq!(res["classification"], "not-allowed");
    assert_eq!(res["recommendedAdmixture"], "Plasticizer");
    let liters = res["recommendedAdmixtureLiters"].as_f64().unwrap();
    assert_eq!(liters, 350.0 * 5.0 * 0.004);
    assert_eq!(res["recommendedAdmixturePercentOfCement"], 0.4);
    assert_eq!(res["additionalWaterLiters"], 0.0);
    assert_eq!(res["correctedSlumpEstimate"], 80.0);
}

#[test]
fn scenario_field_form_payload() {
    let load = json!({
        "slumpMedido": 40, "slumpProjeto": 100, "volume": 7,
        "consumoCimento": 300, "relacaoACProjeto": 0.6,
        "aguaPrevista": 185, "tipoAgregado": "Seixo",
        "aditivo": "plastificante", "temperatura": 28,
        "idadeConcreto": 45, "elementoEstrutural": "pilar",
        "tipoCimento": "CP III"
    });
    let response = evaluate(load);
    let res = &response["result"];
    // k = 2.3, 6 * 2.3 = 13.8 L/m³ -> (1295 + 96.6) / 2100 = 0.663 > 0.63
    assert_eq!(res["classification"], "not-allowed");
    assert_eq!(res["recommendedAdmixture"], "Plasticizer");
    assert_eq!(res["recommendedAdmixturePercentOfCement"], 0.3);

    let record = &response["record"];
    assert_eq!(record["structuralElement"], "Column");
    assert_eq!(record["cementType"], "CP III");
    assert_eq!(record["responsible"], "Técnico de Controle Tecnológico");
}

#[test]
fn invalid_volume_returns_error_object() {
    let mut load = reference_load();
    load["volume"] = json!(0);
    let response = evaluate(load);
    assert!(response.get("result").is_none());
    let msg = response["error"].as_str().unwrap();
    assert!(msg.contains("volume"), "{}", msg);
}

#[test]
fn malformed_json_returns_error_object() {
    let out = SlumpKernel::evaluate_json("{ not json");
    let response: Value = serde_json::from_str(&out).unwrap();
    assert!(response["error"].as_str().unwrap().starts_with("failed to parse load"));
}

#[test]
fn scenario_form_text_values() {
    let load = json!({
        "slumpMedido": "50", "slumpProjeto": "80", "volume": "5",
        "consumoCimento": "350", "relacaoACProjeto": "0.55",
        "aguaPrevista": "180", "tipoAgregado": "Brita 1",
        "aditivo": "nenhum", "temperatura": "25",
        "idadeConcreto": "60", "elementoEstrutural": "laje"
    });
    let res = &evaluate(load)["result"];
    assert_eq!(res["classification"], "allowed");
    assert_eq!(res["additionalWaterLiters"], 37.5);
}
