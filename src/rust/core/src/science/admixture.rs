// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
use crate::formulas::admixture_liters;
use crate::load::AdmixtureType;
use serde::{Deserialize, Serialize};

// Doses as fractions of cement mass.

/// Plasticizer: roughly 10-30 mm of gain at 0.2-0.5% of cement.
pub const PLASTICIZER_DOSE: f64 = 0.004;
/// Superplasticizer: 30-80 mm of gain at 0.5-2.0% of cement.
pub const SUPERPLASTICIZER_DOSE: f64 = 0.012;
pub const PLASTICIZER_TOPUP: f64 = 0.003;
pub const SUPERPLASTICIZER_TOPUP: f64 = 0.005;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdmixtureDose {
    pub product: AdmixtureType,
    /// Supplementary dose on top of an admixture already in the load
    pub supplementary: bool,
    pub percent_of_cement: f64,
    pub liters: f64,
}

impl AdmixtureDose {
    /// Corrective instruction appended to the result message.
    pub fn instruction(&self) -> String {
        let product = self.product.label().to_lowercase();
        if self.supplementary {
            format!("SOLUTION: Add a supplementary dose of {}.", product)
        } else {
            format!("SOLUTION: Add {}.", product)
        }
    }
}

/// Dose recommended when water can no longer be added.
///
/// # Arguments
/// * `in_use` - Admixture already dosed at the plant
/// * `slump_gain` - Slump increase required (mm)
/// * `plasticizer_max_gain` - Largest gain a plain plasticizer covers (mm)
/// * `total_cement` - Cement in the load (kg)
pub fn recommend(
    in_use: AdmixtureType,
    slump_gain: f64,
    plasticizer_max_gain: f64,
    total_cement: f64,
) -> AdmixtureDose {
    let (product, supplementary, fraction) = match in_use {
        AdmixtureType::None if slump_gain <= plasticizer_max_gain => {
            (AdmixtureType::Plasticizer, false, PLASTICIZER_DOSE)
        }
        AdmixtureType::None => (AdmixtureType::Superplasticizer, false, SUPERPLASTICIZER_DOSE),
        AdmixtureType::Plasticizer => (AdmixtureType::Plasticizer, true, PLASTICIZER_TOPUP),
        AdmixtureType::Superplasticizer => {
            (AdmixtureType::Superplasticizer, true, SUPERPLASTICIZER_TOPUP)
        }
    };

    AdmixtureDose {
        product,
        supplementary,
        percent_of_cement: fraction * 100.0,
        liters: admixture_liters(total_cement, fraction),
    }
}
