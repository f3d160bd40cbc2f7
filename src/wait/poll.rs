//! Per-attempt outcomes and success predicates.

use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Outcome of a single polling attempt.
///
/// Produced fresh by every attempt and consumed by the waiter; a wait ends on
/// the first `Success` or `Failure`. The pending observation usually has the
/// same type as the result, but may differ when "not there yet" carries less
/// than "done" (for example `Option<Row>` while pending, `Row` once found).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollResult<T, P = T> {
    /// Not done yet. The observed value is kept for timeout diagnostics.
    Pending(P),
    /// Done; the value is handed back to the caller.
    Success(T),
    /// Definitely not going to succeed; stop polling.
    Failure(String),
}

impl<T> PollResult<T> {
    /// Classify `value` with a strict predicate.
    pub fn from_predicate(value: T, is_done: impl FnOnce(&T) -> bool) -> Self {
        if is_done(&value) {
            PollResult::Success(value)
        } else {
            PollResult::Pending(value)
        }
    }

    /// Classify `value` by its [`Truthy`] shape.
    pub fn from_truthy(value: T) -> Self
    where
        T: Truthy,
    {
        Self::from_predicate(value, Truthy::is_truthy)
    }

    /// Map the carried value, leaving failures untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PollResult<U> {
        match self {
            PollResult::Pending(v) => PollResult::Pending(f(v)),
            PollResult::Success(v) => PollResult::Success(f(v)),
            PollResult::Failure(reason) => PollResult::Failure(reason),
        }
    }
}

impl<T, P> PollResult<T, P> {
    pub fn is_pending(&self) -> bool {
        matches!(self, PollResult::Pending(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PollResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, PollResult::Failure(_))
    }
}

/// Loose "success-shaped" test: present and not empty.
///
/// Values that are absent (`None`), empty (`""`, `[]`, `{}`), zero or `false`
/// are falsy. Domain rows such as requests and VMs are always truthy once
/// they exist.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl Truthy for () {
    fn is_truthy(&self) -> bool {
        false
    }
}

macro_rules! impl_truthy_for_numbers {
    ($($t:ty),*) => {
        $(
            impl Truthy for $t {
                fn is_truthy(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

impl_truthy_for_numbers!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Truthy for [T] {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Truthy for Vec<T> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V, S> Truthy for HashMap<K, V, S> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V> Truthy for BTreeMap<K, V> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T, S> Truthy for HashSet<T, S> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl<T: Truthy + ?Sized> Truthy for Box<T> {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

/// A pair is truthy when its first element is; the second rides along.
impl<A: Truthy, B> Truthy for (A, B) {
    fn is_truthy(&self) -> bool {
        self.0.is_truthy()
    }
}

impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(a) => !a.is_empty(),
            Value::Object(o) => !o.is_empty(),
        }
    }
}
