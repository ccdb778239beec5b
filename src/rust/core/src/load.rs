// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//
// Fresh-concrete load as delivered on site: slump reading, mix design
// parameters and site conditions.

use crate::error::InputError;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Folds a label into a comparable key: "Brita 0", "brita_0" and "BRITA-0"
/// all become "brita0".
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Generates the label/parse/serde plumbing shared by the load enums.
/// Serialized as the display label, parsed leniently from any listed key.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $label:literal [$($key:literal),+ $(,)?]),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = InputError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let key = normalize(s);
                $(
                    if normalize($label) == key $(|| $key == key)+ {
                        return Ok($name::$variant);
                    }
                )+
                Err(InputError::UnknownVariant {
                    kind: $kind,
                    value: s.to_string(),
                })
            }
        }

        impl TryFrom<String> for $name {
            type Error = InputError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$name> for &'static str {
            fn from(v: $name) -> Self {
                v.label()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labelled_enum! {
    /// Coarse aggregate of the mix. Crushed stone grades (brita) or river gravel (seixo).
    AggregateType, "aggregate type" {
        Brita0 => "Brita 0" ["gravel0", "crushedstone0"],
        Brita1 => "Brita 1" ["gravel1", "crushedstone1"],
        Brita2 => "Brita 2" ["gravel2", "crushedstone2"],
        Seixo => "Seixo" ["rivergravel", "pebble"],
    }
}

labelled_enum! {
    /// Chemical admixture already dosed into the load at the plant.
    AdmixtureType, "admixture" {
        None => "None" ["nenhum", "nenhuma"],
        Plasticizer => "Plasticizer" ["plastificante"],
        Superplasticizer => "Superplasticizer" ["superplastificante"],
    }
}

labelled_enum! {
    /// Element being cast. Recorded for traceability only.
    StructuralElement, "structural element" {
        Slab => "Slab" ["laje"],
        Beam => "Beam" ["viga"],
        Column => "Column" ["pilar"],
        FoundationBlock => "Foundation block" ["bloco", "blocodefundação", "blocodefundacao"],
        Foundation => "Foundation" ["fundacao", "fundação"],
    }
}

labelled_enum! {
    /// Brazilian cement designation (NBR 16697). Recorded only.
    CementType, "cement type" {
        CpI => "CP I" ["cp1"],
        CpII => "CP II" ["cp2"],
        CpIII => "CP III" ["cp3"],
        CpIV => "CP IV" ["cp4"],
        CpVAri => "CP V-ARI" ["cp5", "cp5ari"],
    }
}

impl Default for AggregateType {
    fn default() -> Self {
        AggregateType::Brita1
    }
}

impl Default for AdmixtureType {
    fn default() -> Self {
        AdmixtureType::None
    }
}

impl Default for StructuralElement {
    fn default() -> Self {
        StructuralElement::Slab
    }
}

impl Default for CementType {
    fn default() -> Self {
        CementType::CpII
    }
}

/// Reads a number the way the site form hands it over: either a JSON number
/// or the raw text of the input box ("50", " 0.55 ").
fn form_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("`{}` is not a number", text))),
    }
}

/// One delivered load, as collected from the site form.
///
/// Keys are camelCase; the Portuguese names used by the field form
/// (`slumpMedido`, `consumoCimento`, ...) are accepted as aliases, and
/// numeric fields may arrive as the text of the form inputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadInput {
    /// Slump measured on site (mm, NBR NM 67)
    #[serde(alias = "slumpMedido", deserialize_with = "form_number")]
    pub measured_slump: f64,
    /// Slump specified by the mix design (mm)
    #[serde(alias = "slumpProjeto", deserialize_with = "form_number")]
    pub target_slump: f64,
    /// Load volume (m³)
    #[serde(deserialize_with = "form_number")]
    pub volume: f64,
    /// Cement content (kg/m³)
    #[serde(alias = "consumoCimento", deserialize_with = "form_number")]
    pub cement_content: f64,
    /// Design water/cement ratio
    #[serde(alias = "relacaoACProjeto", deserialize_with = "form_number")]
    pub design_water_cement_ratio: f64,
    /// Design water content (L/m³)
    #[serde(alias = "aguaPrevista", deserialize_with = "form_number")]
    pub expected_water: f64,
    #[serde(default, alias = "tipoAgregado")]
    pub aggregate_type: AggregateType,
    #[serde(default, alias = "aditivo")]
    pub admixture_in_use: AdmixtureType,
    /// Ambient temperature (°C)
    #[serde(alias = "temperatura", deserialize_with = "form_number")]
    pub temperature: f64,
    /// Minutes since batching
    #[serde(alias = "idadeConcreto", deserialize_with = "form_number")]
    pub concrete_age: f64,
    #[serde(default, alias = "elementoEstrutural")]
    pub structural_element: StructuralElement,
    #[serde(default, alias = "tipoCimento")]
    pub cement_type: CementType,
}

impl LoadInput {
    pub fn from_json(json: &str) -> Result<LoadInput, InputError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Numeric fields with their wire names, in form order.
    fn numeric_fields(&self) -> [(&'static str, f64); 8] {
        [
            ("measuredSlump", self.measured_slump),
            ("targetSlump", self.target_slump),
            ("volume", self.volume),
            ("cementContent", self.cement_content),
            ("designWaterCementRatio", self.design_water_cement_ratio),
            ("expectedWater", self.expected_water),
            ("temperature", self.temperature),
            ("concreteAge", self.concrete_age),
        ]
    }

    /// Field-level checks the calculator relies on. Reports the first
    /// offending field.
    pub fn validate(&self) -> Result<(), InputError> {
        for (field, value) in self.numeric_fields() {
            if !value.is_finite() {
                return Err(InputError::NonFinite { field });
            }
        }

        let strictly_positive = [
            ("volume", self.volume),
            ("cementContent", self.cement_content),
            ("designWaterCementRatio", self.design_water_cement_ratio),
        ];
        for (field, value) in strictly_positive {
            if value <= 0.0 {
                return Err(InputError::NonPositive { field, value });
            }
        }
        Ok(())
    }

    /// Total cement in the load (kg)
    pub fn total_cement(&self) -> f64 {
        self.cement_content * self.volume
    }

    /// Total design water in the load (L)
    pub fn total_water(&self) -> f64 {
        self.expected_water * self.volume
    }
}

#[cfg(test)]
pub(crate) fn sample_load() -> LoadInput {
    LoadInput {
        measured_slump: 50.0,
        target_slump: 80.0,
        volume: 5.0,
        cement_content: 350.0,
        design_water_cement_ratio: 0.55,
        expected_water: 180.0,
        aggregate_type: AggregateType::Brita1,
        admixture_in_use: AdmixtureType::None,
        temperature: 25.0,
        concrete_age: 60.0,
        structural_element: StructuralElement::Slab,
        cement_type: CementType::CpII,
    }
}
