//!
//! Named-Argument Reordering
//!
//! Maps caller-supplied argument names onto the target's declared parameter
//! order. The permutation covers the full call-site vector, so slot 0 (the
//! function reference itself) always maps to itself.
//!

use smallvec::SmallVec;

use crate::error::CallError;

pub(crate) type ArgumentOrder = SmallVec<[usize; 8]>;

/// Compute the permutation that reorders a positional argument vector into
/// declaration order. Position `k` of the reordered vector takes the value at
/// `order[k]`. On duplicate declared names the last occurrence wins.
///
/// Fails when a supplied name has no declared counterpart.
pub(crate) fn compute_order(
    parameter_names: &[String],
    supplied_names: &[String],
) -> Result<ArgumentOrder, CallError> {
    let mut order: ArgumentOrder = (0..parameter_names.len() + 1).collect();
    for (supplied_pos, name) in supplied_names.iter().enumerate() {
        let mut declared_pos = None;
        for (j, parameter) in parameter_names.iter().enumerate() {
            if parameter == name {
                declared_pos = Some(j);
            }
        }
        match declared_pos {
            Some(j) => order[j + 1] = supplied_pos + 1,
            None => return Err(CallError::unbound_argument(name, parameter_names)),
        }
    }
    Ok(order)
}
