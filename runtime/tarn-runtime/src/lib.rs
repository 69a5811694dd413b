//!
//! tarn-runtime - Runtime call-dispatch core
//!
//! This crate provides the closure call-dispatch machinery for compiled tarn
//! programs. It includes:
//!
//! - value: runtime value representation
//! - function: first-class function references with creation-time identity
//! - error: the call error taxonomy
//! - dispatch: per-call-site inline caching, named-argument reordering,
//!   variadic adaptation, and constant folding
//!
//! Entry points:
//! - `bootstrap`: create the dispatch cell for one closure-call site
//! - `DispatchCell::invoke`: the emitted call instruction
//!

pub mod dispatch;
pub mod error;
pub mod function;
pub mod value;

pub use dispatch::{CallSiteShape, DispatchCell, bootstrap};
pub use error::{CallError, CallResult};
pub use function::{FunctionId, FunctionReference, InvocationThunk};
pub use value::Value;
