//! Assertion primitives used inside `it` bodies.
//!
//! `expect(value)` wraps a value in an [`Expectation`]. Each check is a
//! separate method returning `Result<(), AssertionError>`, so a body can chain
//! them with `?` and the runner records the first violation as the failure.
//!
//! Which checks are available depends on what the wrapped type can do:
//!
//! - `to_be_defined()`: `T: Definedness` (`Option`, `serde_json::Value`)
//! - `to_be(expected)`: `T: PartialEq + Debug`
//! - `to_be_greater_than(expected)`: `T: PartialOrd + Debug`
//! - `to_throw()`: `T: Fn() -> Result<R, E>`

use std::fmt::Debug;
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

/// A violated assertion. Distinct from any error the code under test returns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssertionError {
    #[error("Expected value to be defined, but got {actual}")]
    NotDefined { actual: String },

    #[error("Expected {actual} to be {expected}")]
    NotEqual { actual: String, expected: String },

    #[error("Expected {actual} to be greater than {expected}")]
    NotGreater { actual: String, expected: String },

    #[error("Expected function to throw an error, but it did not")]
    DidNotThrow,
}

/// Values that may stand for "nothing".
pub trait Definedness: Debug {
    fn is_defined(&self) -> bool;
}

impl<T: Debug> Definedness for Option<T> {
    fn is_defined(&self) -> bool {
        self.is_some()
    }
}

impl Definedness for serde_json::Value {
    fn is_defined(&self) -> bool {
        !self.is_null()
    }
}

impl<T: Definedness + ?Sized> Definedness for &T {
    fn is_defined(&self) -> bool {
        (**self).is_defined()
    }
}

/// Handle returned by [`expect`]. Stateless; every method may be called any
/// number of times.
#[derive(Debug, Clone, Copy)]
pub struct Expectation<T> {
    value: T,
}

pub fn expect<T>(value: T) -> Expectation<T> {
    Expectation { value }
}

impl<T> Expectation<T> {
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Definedness> Expectation<T> {
    pub fn to_be_defined(&self) -> Result<(), AssertionError> {
        if self.value.is_defined() {
            return Ok(());
        }
        Err(AssertionError::NotDefined {
            actual: format!("{:?}", self.value),
        })
    }
}

impl<T: Debug> Expectation<T> {
    /// Strict equality against a value of the same type.
    pub fn to_be(&self, expected: T) -> Result<(), AssertionError>
    where
        T: PartialEq,
    {
        if self.value == expected {
            return Ok(());
        }
        Err(AssertionError::NotEqual {
            actual: format!("{:?}", self.value),
            expected: format!("{:?}", expected),
        })
    }

    /// Fails unless `value > expected`. Incomparable pairs such as NaN fail too.
    pub fn to_be_greater_than(&self, expected: T) -> Result<(), AssertionError>
    where
        T: PartialOrd,
    {
        if self.value > expected {
            return Ok(());
        }
        Err(AssertionError::NotGreater {
            actual: format!("{:?}", self.value),
            expected: format!("{:?}", expected),
        })
    }
}

impl<F, R, E> Expectation<F>
where
    F: Fn() -> Result<R, E>,
{
    /// Calls the wrapped function once. Returning `Err` or panicking counts as
    /// having thrown; returning `Ok` is a violation.
    pub fn to_throw(&self) -> Result<(), AssertionError> {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.value)())) {
            Ok(Ok(_)) => Err(AssertionError::DidNotThrow),
            Ok(Err(_)) | Err(_) => Ok(()),
        }
    }
}
