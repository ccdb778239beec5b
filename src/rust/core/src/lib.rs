// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//
// Slump Control: fresh-concrete acceptance on site (NBR 12655, NBR NM 67)
// Core calculator, wasm bridge and field record
//

pub mod calculator;
pub mod config;
pub mod error;
pub mod formulas;
pub mod kernel;
pub mod load;
pub mod report;
pub mod science;
#[cfg(test)]
pub mod tests_slump;

// Re-export core types
pub use calculator::{Classification, Severity, SlumpCalculator, SlumpResult};
pub use config::CalculatorConfig;
pub use error::InputError;
pub use kernel::SlumpKernel;
pub use load::{AdmixtureType, AggregateType, CementType, LoadInput, StructuralElement};
