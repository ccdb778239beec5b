// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//! Scalar Formulas for Slump Correction
//!
//! Pure functions on scalar values. The calculator composes these; none of
//! them validate their inputs.
//!
//! References:
//! - ABNT NBR NM 67: Slump test (abatimento do tronco de cone)
//! - ABNT NBR 12655: Preparo, controle, recebimento e aceitação

// ============================================================================
// SLUMP
// ============================================================================

/// Signed slump deviation (mm). Positive when the load is more fluid than specified.
pub fn slump_deviation(measured: f64, target: f64) -> f64 {
    measured - target
}

/// Water needed per cubic meter to gain `slump_gain` mm of slump
///
/// w = (Δs / 10) * k
///
/// # Arguments
/// * `slump_gain` - Slump increase required (mm)
/// * `factor` - Correction factor k (L/m³ per 10 mm)
pub fn water_for_slump_gain(slump_gain: f64, factor: f64) -> f64 {
    (slump_gain / 10.0) * factor
}

// ============================================================================
// WATER / CEMENT
// ============================================================================

/// Water/cement ratio of the whole load after adding `extra_water` liters
///
/// a/c = (W₀ + ΔW) / C
///
/// # Arguments
/// * `total_water` - Design water in the load (L ≈ kg)
/// * `extra_water` - Water added on site (L)
/// * `total_cement` - Cement in the load (kg)
pub fn water_cement_ratio(total_water: f64, extra_water: f64, total_cement: f64) -> f64 {
    (total_water + extra_water) / total_cement
}

/// Upper a/c bound tolerated with increased technological control.
pub fn safety_limit(design_ratio: f64, margin: f64) -> f64 {
    design_ratio * margin
}

// ============================================================================
// ADMIXTURE
// ============================================================================

/// Admixture volume for a dose given as a fraction of cement mass (0.004 = 0.4%).
///
/// Dosing is by mass of cement; liters are reported assuming unit density,
/// which is how plant dosing tables are read on site.
pub fn admixture_liters(total_cement: f64, fraction: f64) -> f64 {
    total_cement * fraction
}

/// Share of cement mass represented by `liters` of admixture (%).
pub fn percent_of_cement(liters: f64, total_cement: f64) -> f64 {
    liters / total_cement * 100.0
}

// ============================================================================
// NUMERICS
// ============================================================================

/// Round to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deviation_sign() {
        assert_eq!(slump_deviation(50.0, 80.0), -30.0);
        assert_eq!(slump_deviation(100.0, 80.0), 20.0);
    }

    #[test]
    fn water_for_thirty_mm() {
        assert!((water_for_slump_gain(30.0, 2.5) - 7.5).abs() < 1e-12);
    }

    #[test]
    fn ratio_of_reference_load() {
        // 5 m³ at 180 L/m³ + 37.5 L over 1750 kg cement
        let ac = water_cement_ratio(900.0, 37.5, 1750.0);
        assert!((ac - 0.535_714).abs() < 1e-6);
    }

    #[test]
    fn safety_limit_five_percent() {
        assert!((safety_limit(0.55, 1.05) - 0.5775).abs() < 1e-12);
    }

    #[test]
    fn admixture_percent_round_trip() {
        let liters = admixture_liters(1750.0, 0.004);
        assert_eq!(liters, 350.0 * 5.0 * 0.004);
        assert!((percent_of_cement(liters, 1750.0) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(0.535_714, 3), 0.536);
        assert_eq!(round_to(1.2, 2), 1.2);
        assert_eq!(round_to(-0.125_6, 2), -0.13);
    }
}
