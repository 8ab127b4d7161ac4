//! # Program Validation & Expansion
//!
//! Checks a decoded macro table and turns the instruction program into the
//! ordered list of words it encodes. Validation always completes before any
//! expansion starts: a cyclic table is rejected without expanding anything.

use log::debug;

use crate::lexicon::types::error::Result;
use crate::lexicon::types::models::{DecodeOptions, Macro};

pub mod expand;
pub mod validate;

/// Validates `macros` and `program`, then materializes the word list.
///
/// # Errors
/// - `InvalidReference` if any index falls outside the macro table
/// - `CyclicReference` if a subroutine can reach itself
/// - `LimitExceeded` if an expansion outgrows `options.max_expanded_len`
pub fn run(macros: &[Macro], program: &[usize], options: &DecodeOptions) -> Result<Vec<String>> {
    validate::check_references(macros, program)?;
    let order = validate::topological_order(macros)?;
    debug!("Validated {} macros, {} subroutines", macros.len(), order.len());
    expand::materialize(macros, program, &order, options)
}
