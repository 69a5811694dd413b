//!
//! Function References
//!
//! First-class callable values: an invocation thunk, an ordered list of
//! declared parameter names, a variadic flag, and a process-unique identity
//! tag assigned at creation time. The dispatch cache guards on the tag, so
//! "same closure" means reference identity, never structural equality.
//!

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{CallError, CallResult};
use crate::value::Value;

/// The invocation thunk receives exactly the declared parameters; the leading
/// function-reference slot is stripped by the dispatcher before entry.
pub type InvocationThunk = dyn Fn(&[Value]) -> CallResult + Send + Sync;

static NEXT_FUNCTION_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque comparable identity tag, unique per closure creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionId(u64);

impl FunctionId {
    fn next() -> Self {
        FunctionId(NEXT_FUNCTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

struct FunctionInner {
    id: FunctionId,
    name: String,
    parameter_names: Vec<String>,
    variadic: bool,
    thunk: Box<InvocationThunk>,
}

/// A shared, immutable reference to a callable value.
#[derive(Clone)]
pub struct FunctionReference {
    inner: Arc<FunctionInner>,
}

impl FunctionReference {
    /// Create a fixed-arity function. `parameter_names` may be empty for a
    /// positional-only callable.
    pub fn new<F>(name: impl Into<String>, parameter_names: Vec<String>, thunk: F) -> Self
    where
        F: Fn(&[Value]) -> CallResult + Send + Sync + 'static,
    {
        Self::build(name.into(), parameter_names, false, Box::new(thunk))
    }

    /// Create a variadic function. The final declared parameter receives the
    /// collected (or passed-through) trailing sequence.
    pub fn variadic_fn<F>(name: impl Into<String>, parameter_names: Vec<String>, thunk: F) -> Self
    where
        F: Fn(&[Value]) -> CallResult + Send + Sync + 'static,
    {
        Self::build(name.into(), parameter_names, true, Box::new(thunk))
    }

    fn build(
        name: String,
        parameter_names: Vec<String>,
        variadic: bool,
        thunk: Box<InvocationThunk>,
    ) -> Self {
        Self {
            inner: Arc::new(FunctionInner {
                id: FunctionId::next(),
                name,
                parameter_names,
                variadic,
                thunk,
            }),
        }
    }

    pub fn identity(&self) -> FunctionId {
        self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn parameter_names(&self) -> &[String] {
        &self.inner.parameter_names
    }

    pub fn parameter_count(&self) -> usize {
        self.inner.parameter_names.len()
    }

    pub fn is_variadic(&self) -> bool {
        self.inner.variadic
    }

    /// Enter the thunk. Arity is exact: adaptation has already collected any
    /// variadic tail into the final sequence parameter.
    pub fn invoke(&self, args: &[Value]) -> CallResult {
        if args.len() != self.parameter_count() {
            return Err(CallError::ArityMismatch {
                expected: self.parameter_count(),
                found: args.len(),
            });
        }
        (self.inner.thunk)(args)
    }
}

impl PartialEq for FunctionReference {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for FunctionReference {}

impl fmt::Debug for FunctionReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionReference")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("parameter_names", &self.inner.parameter_names)
            .field("variadic", &self.inner.variadic)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(name: &str, result: i64) -> FunctionReference {
        FunctionReference::new(name, vec![], move |_| Ok(Value::Int(result)))
    }

    #[test]
    fn test_identity_is_unique_per_creation() {
        let a = constant("a", 1);
        let b = constant("b", 1);
        assert_ne!(a.identity(), b.identity());
        assert_eq!(a.identity(), a.clone().identity());
    }

    #[test]
    fn test_invoke_checks_exact_arity() {
        let f = FunctionReference::new("add", vec!["a".into(), "b".into()], |args| {
            match (&args[0], &args[1]) {
                (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a + b)),
                _ => Err(CallError::raised("add expects ints")),
            }
        });

        assert_eq!(f.invoke(&[Value::Int(2), Value::Int(3)]), Ok(Value::Int(5)));
        assert_eq!(
            f.invoke(&[Value::Int(2)]),
            Err(CallError::ArityMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_callee_failure_passes_through() {
        let f = FunctionReference::new("boom", vec![], |_| Err(CallError::raised("kaboom")));
        assert_eq!(f.invoke(&[]), Err(CallError::raised("kaboom")));
    }
}
