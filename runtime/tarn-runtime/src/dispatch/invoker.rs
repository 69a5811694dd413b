//!
//! Adapted Invokers
//!
//! The specialized invocation path cached by a guarded call site: the reorder
//! permutation and variadic plan computed on the slow path, composed into one
//! callable unit. Applying it is pure argument shuffling followed by entering
//! the target's thunk with the function-reference slot stripped.
//!

use smallvec::SmallVec;

use super::reorder::ArgumentOrder;
use super::variadic::VariadicPlan;
use crate::error::{CallError, CallResult};
use crate::function::FunctionReference;
use crate::value::Value;

type ArgVec = SmallVec<[Value; 8]>;

#[derive(Clone)]
pub(crate) struct AdaptedInvoker {
    target: FunctionReference,
    order: Option<ArgumentOrder>,
    variadic: Option<VariadicPlan>,
}

impl AdaptedInvoker {
    pub(crate) fn new(
        target: FunctionReference,
        order: Option<ArgumentOrder>,
        variadic: Option<VariadicPlan>,
    ) -> Self {
        Self {
            target,
            order,
            variadic,
        }
    }

    /// Run the pipeline: permute, adapt the variadic tail, strip slot 0,
    /// enter the thunk. `args` is the full call-site vector including the
    /// function reference.
    pub(crate) fn invoke(&self, args: &[Value]) -> CallResult {
        let mut call_args: ArgVec = match &self.order {
            Some(order) => {
                if args.len() < order.len() {
                    return Err(CallError::ArityMismatch {
                        expected: order.len(),
                        found: args.len(),
                    });
                }
                let mut reordered: ArgVec = order.iter().map(|&src| args[src].clone()).collect();
                // arguments beyond the mapping pass through unchanged
                reordered.extend(args[order.len()..].iter().cloned());
                reordered
            }
            None => args.iter().cloned().collect(),
        };

        if let Some(VariadicPlan::Collect { from }) = self.variadic {
            let tail: Vec<Value> = call_args.drain(from.min(call_args.len())..).collect();
            call_args.push(Value::seq(tail));
        }

        self.target.invoke(&call_args[1..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::reorder::compute_order;
    use crate::dispatch::variadic;

    fn join_args(name: &str, count: usize) -> FunctionReference {
        FunctionReference::new(
            name,
            (0..count).map(|i| format!("p{}", i)).collect(),
            |args| {
                let joined = args
                    .iter()
                    .map(Value::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                Ok(Value::from(joined.as_str()))
            },
        )
    }

    #[test]
    fn test_plain_invoker_strips_the_function_slot() {
        let f = join_args("f", 2);
        let invoker = AdaptedInvoker::new(f.clone(), None, None);
        let args = vec![Value::Function(f), Value::Int(1), Value::Int(2)];
        assert_eq!(invoker.invoke(&args), Ok(Value::from("1,2")));
    }

    #[test]
    fn test_reordering_invoker_applies_the_permutation() {
        let f = join_args("f", 3);
        let order = compute_order(
            f.parameter_names(),
            &["p2".to_string(), "p0".to_string(), "p1".to_string()],
        )
        .unwrap();
        let invoker = AdaptedInvoker::new(f.clone(), Some(order), None);

        // supplied (p2=3, p0=1, p1=2) lands in declaration order
        let args = vec![
            Value::Function(f),
            Value::Int(3),
            Value::Int(1),
            Value::Int(2),
        ];
        assert_eq!(invoker.invoke(&args), Ok(Value::from("1,2,3")));
    }

    #[test]
    fn test_collecting_invoker_builds_the_tail_sequence() {
        let f = FunctionReference::variadic_fn(
            "f",
            vec!["a".to_string(), "rest".to_string()],
            |args| Ok(Value::seq(args.to_vec())),
        );
        let args = vec![
            Value::Function(f.clone()),
            Value::Int(1),
            Value::Int(2),
            Value::Int(3),
        ];
        let plan = variadic::plan(f.parameter_count() + 1, &args);
        let invoker = AdaptedInvoker::new(f, None, Some(plan));

        let expected = Value::seq(vec![
            Value::Int(1),
            Value::seq(vec![Value::Int(2), Value::Int(3)]),
        ]);
        assert_eq!(invoker.invoke(&args), Ok(expected));
    }
}
