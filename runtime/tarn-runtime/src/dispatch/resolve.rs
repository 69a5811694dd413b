//!
//! Slow-Path Resolution
//!
//! Runs whenever a cell's current behavior cannot serve the call directly:
//! casts the callee slot, computes the reorder permutation and variadic plan,
//! composes them into an adapted invoker, and publishes the next behavior.
//! Publishing is the cache install; concurrent resolutions of one cell race
//! benignly and the last writer wins.
//!

use tracing::trace;

use super::invoker::AdaptedInvoker;
use super::{Behavior, DispatchCell, reorder, variadic};
use crate::error::{CallError, CallResult};
use crate::value::Value;

pub(crate) fn resolve(cell: &DispatchCell, args: &[Value]) -> CallResult {
    let target = match args.first() {
        Some(Value::Function(f)) => f.clone(),
        Some(other) => return Err(CallError::not_callable(other.type_name())),
        None => return Err(CallError::not_callable("nothing")),
    };

    let shape = cell.shape();
    let order = if shape.argument_names.is_empty() {
        None
    } else {
        Some(reorder::compute_order(
            target.parameter_names(),
            &shape.argument_names,
        )?)
    };
    let plan = target
        .is_variadic()
        .then(|| variadic::plan(target.parameter_count() + 1, args));
    let invoker = AdaptedInvoker::new(target.clone(), order, plan);

    if shape.constant_fold {
        // A failing first call leaves the site unfrozen.
        let value = invoker.invoke(args)?;
        trace!(function = target.name(), "froze constant call site");
        cell.install(Behavior::Frozen {
            value: value.clone(),
        });
        Ok(value)
    } else {
        trace!(
            function = target.name(),
            id = target.identity().as_u64(),
            "installed guarded dispatch"
        );
        cell.install(Behavior::Guarded {
            expected: target.identity(),
            invoker: invoker.clone(),
        });
        invoker.invoke(args)
    }
}
