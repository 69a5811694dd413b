//!
//! Closure Call Dispatch
//!
//! Per-call-site inline caching for first-class function calls. The code
//! generator calls `bootstrap` once per closure-call site and emits the
//! resulting cell next to the call instruction. A cell starts in `Fallback`;
//! the first invocation resolves the target (named-argument reordering,
//! variadic adaptation), installs a `Guarded` behavior keyed on the target's
//! identity, and every later call with the same closure skips resolution
//! entirely. The cache is strictly monomorphic: a different target replaces
//! the cached state wholesale, so alternating targets at one site thrash on
//! every call. Sites marked constant-fold freeze to their first result
//! instead and never resolve again.
//!

mod invoker;
mod reorder;
mod resolve;
mod variadic;

use std::sync::atomic::{AtomicPtr, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use invoker::AdaptedInvoker;

use crate::error::CallResult;
use crate::function::FunctionId;
use crate::value::Value;

/// Static call-site metadata, fixed at cell creation.
#[derive(Debug, Clone)]
pub struct CallSiteShape {
    /// Argument count including the leading function-reference slot.
    pub arity: usize,
    /// Caller-supplied argument names; empty for a purely positional call.
    pub argument_names: Vec<String>,
    /// Compute the result once and reuse it forever.
    pub constant_fold: bool,
}

/// Current dispatch strategy of a cell. Always replaced as one unit, never
/// mutated in place.
enum Behavior {
    /// No cached state; every call resolves.
    Fallback,
    /// Fast path for one remembered target.
    Guarded {
        expected: FunctionId,
        invoker: AdaptedInvoker,
    },
    /// Terminal: the value is returned unconditionally.
    Frozen { value: Value },
}

/// The mutable dispatch state of one compiled call site.
pub struct DispatchCell {
    shape: CallSiteShape,
    behavior: AtomicPtr<Behavior>,
    /// Superseded behaviors, parked until the cell drops so an in-flight
    /// reader never sees a freed pointer.
    retired: Mutex<Vec<Box<Behavior>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

// Behaviors only hold Send + Sync payloads; the raw pointer is published with
// release/acquire ordering and freed no earlier than the cell itself.
unsafe impl Send for DispatchCell {}
unsafe impl Sync for DispatchCell {}

/// Create the dispatch cell for one closure-call site. Consumed by the code
/// generator, once per site. `argument_names` empty means a purely positional
/// call.
pub fn bootstrap(
    arity: usize,
    constant_fold: bool,
    argument_names: Vec<String>,
) -> Arc<DispatchCell> {
    debug_assert!(arity >= 1, "slot 0 holds the function reference");
    debug_assert!(argument_names.len() <= arity - 1);
    Arc::new(DispatchCell {
        shape: CallSiteShape {
            arity,
            argument_names,
            constant_fold,
        },
        behavior: AtomicPtr::new(Box::into_raw(Box::new(Behavior::Fallback))),
        retired: Mutex::new(Vec::new()),
        hits: AtomicU64::new(0),
        misses: AtomicU64::new(0),
    })
}

impl DispatchCell {
    pub fn shape(&self) -> &CallSiteShape {
        &self.shape
    }

    /// Invoke the call site. `args` is the full argument vector; `args[0]` is
    /// the function reference being called.
    pub fn invoke(&self, args: &[Value]) -> CallResult {
        debug_assert_eq!(args.len(), self.shape.arity);
        match self.current() {
            Behavior::Frozen { value } => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Ok(value.clone())
            }
            Behavior::Guarded { expected, invoker } => {
                match args.first().and_then(Value::as_function) {
                    Some(f) if f.identity() == *expected => {
                        self.hits.fetch_add(1, Ordering::Relaxed);
                        invoker.invoke(args)
                    }
                    _ => {
                        self.misses.fetch_add(1, Ordering::Relaxed);
                        resolve::resolve(self, args)
                    }
                }
            }
            Behavior::Fallback => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                resolve::resolve(self, args)
            }
        }
    }

    /// Calls served by the cached fast path or a frozen value.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Calls that went through slow-path resolution.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    fn current(&self) -> &Behavior {
        // Valid for the cell's lifetime: replaced behaviors are retired, not
        // freed.
        unsafe { &*self.behavior.load(Ordering::Acquire) }
    }

    /// Atomically publish the next behavior. Racing installs converge by
    /// last-writer-wins; resolution is a pure function of (shape, target), so
    /// any racing result is equally valid.
    fn install(&self, behavior: Behavior) {
        let fresh = Box::into_raw(Box::new(behavior));
        let old = self.behavior.swap(fresh, Ordering::AcqRel);
        let mut retired = self.retired.lock().unwrap();
        retired.push(unsafe { Box::from_raw(old) });
    }
}

impl Drop for DispatchCell {
    fn drop(&mut self) {
        let current = self.behavior.load(Ordering::Acquire);
        drop(unsafe { Box::from_raw(current) });
    }
}
