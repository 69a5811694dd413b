//!
//! Closure Call Error Types
//!
//! Errors surfaced by closure call sites to the calling expression's
//! evaluation context.
//!
//! Error categories:
//! - NotCallable: the value in the callee slot is not a function reference
//! - UnboundArgument: a supplied argument name has no declared counterpart
//! - ArityMismatch: argument count does not match the declared parameters
//! - Raised: a failure raised inside the closure body, passed through
//!   unmodified
//!
//! A cache miss is not an error; the fallback path resolves it silently.
//!

use thiserror::Error;

use crate::value::Value;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CallError {
    #[error("value of type '{found}' is not callable")]
    NotCallable { found: String },

    #[error("argument name '{name}' is not among the declared parameter names: [{}]", .declared.join(", "))]
    UnboundArgument { name: String, declared: Vec<String> },

    #[error("wrong number of arguments: expected {expected}, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("{message}")]
    Raised { message: String },
}

impl CallError {
    pub fn not_callable(found: impl Into<String>) -> Self {
        CallError::NotCallable {
            found: found.into(),
        }
    }

    pub fn unbound_argument(name: impl Into<String>, declared: &[String]) -> Self {
        CallError::UnboundArgument {
            name: name.into(),
            declared: declared.to_vec(),
        }
    }

    pub fn raised(message: impl Into<String>) -> Self {
        CallError::Raised {
            message: message.into(),
        }
    }
}

pub type CallResult = Result<Value, CallError>;
