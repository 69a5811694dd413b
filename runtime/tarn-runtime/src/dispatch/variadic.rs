//!
//! Variadic Argument Adaptation
//!
//! Decides whether the trailing arguments of a call already form the variadic
//! sequence or must be collected into one. The check is structural: a final
//! argument that is a sequence, sitting exactly in the variadic slot, passes
//! through unchanged. A single sequence intended as one variadic element is
//! therefore indistinguishable from a pre-built tail; that ambiguity is
//! deliberate and preserved.
//!

use crate::value::Value;

/// Resolution-time decision, baked into the cached invoker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VariadicPlan {
    /// The final argument already occupies the variadic slot as a sequence.
    PassThrough,
    /// Collect every argument from `from` onward into one new sequence.
    Collect { from: usize },
}

/// Pick the plan for a variadic target. `declared_arity` counts the leading
/// function-reference slot.
pub(crate) fn plan(declared_arity: usize, args: &[Value]) -> VariadicPlan {
    if args.len() == declared_arity && args.last().is_some_and(Value::is_seq) {
        VariadicPlan::PassThrough
    } else {
        VariadicPlan::Collect {
            from: declared_arity - 1,
        }
    }
}
