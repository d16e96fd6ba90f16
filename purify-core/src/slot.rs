//! Field and entry binders.
//!
//! A [`Slot`] is a mediated read/write binding to one scalar: a struct field
//! reached through an accessor closure, or a map entry reached by key. Batch
//! sanitizers read the slot, run the pipeline, and write the result back
//! through the same slot. Writing [`Value::Absent`] never changes a slot.
//!
//! License: MIT OR APACHE 2.0

use crate::errors::PurifyError;
use crate::value::Value;

/// A settable scalar location.
pub trait Slot {
    /// Reads the current value.
    fn get(&self) -> Result<Value, PurifyError>;

    /// Writes a sanitized value back. Slots reject values they cannot hold
    /// with [`PurifyError::SlotMismatch`].
    fn set(&mut self, value: Value) -> Result<(), PurifyError>;
}

/// A batch sanitizer target that may be missing.
///
/// Implemented for `&mut T` and `Option<&mut T>`, so callers pass either a
/// plain mutable reference or `None` for the "null target" case.
pub trait Target<'a, T: ?Sized> {
    fn into_target(self) -> Option<&'a mut T>;
}

impl<'a, T: ?Sized> Target<'a, T> for &'a mut T {
    fn into_target(self) -> Option<&'a mut T> {
        Some(self)
    }
}

impl<'a, T: ?Sized> Target<'a, T> for Option<&'a mut T> {
    fn into_target(self) -> Option<&'a mut T> {
        self
    }
}

fn mismatch(expected: &'static str, value: &Value) -> PurifyError {
    PurifyError::SlotMismatch {
        expected,
        found: value.kind(),
    }
}

impl Slot for String {
    fn get(&self) -> Result<Value, PurifyError> {
        Ok(Value::Text(self.clone()))
    }

    fn set(&mut self, value: Value) -> Result<(), PurifyError> {
        match value {
            Value::Absent => {}
            Value::Text(s) => *self = s,
            Value::Bytes(b) => {
                *self = String::from_utf8(b).map_err(|_| PurifyError::SlotMismatch {
                    expected: "string",
                    found: "non-UTF-8 byte sequence",
                })?
            }
            other => return Err(mismatch("string", &other)),
        }
        Ok(())
    }
}

impl Slot for Vec<u8> {
    fn get(&self) -> Result<Value, PurifyError> {
        Ok(Value::Bytes(self.clone()))
    }

    fn set(&mut self, value: Value) -> Result<(), PurifyError> {
        match value {
            Value::Absent => {}
            Value::Bytes(b) => *self = b,
            Value::Text(s) => *self = s.into_bytes(),
            other => return Err(mismatch("byte sequence", &other)),
        }
        Ok(())
    }
}

/// An empty optional reads as [`Value::Absent`], so leaf rules leave it alone.
impl<T: Slot + Default> Slot for Option<T> {
    fn get(&self) -> Result<Value, PurifyError> {
        match self {
            Some(inner) => inner.get(),
            None => Ok(Value::Absent),
        }
    }

    fn set(&mut self, value: Value) -> Result<(), PurifyError> {
        if value.is_absent() {
            return Ok(());
        }
        match self {
            Some(inner) => inner.set(value),
            None => {
                let mut fresh = T::default();
                fresh.set(value)?;
                *self = Some(fresh);
                Ok(())
            }
        }
    }
}

impl Slot for i64 {
    fn get(&self) -> Result<Value, PurifyError> {
        Ok(Value::Int(*self))
    }

    fn set(&mut self, value: Value) -> Result<(), PurifyError> {
        match value {
            Value::Absent => {}
            Value::Int(i) => *self = i,
            other => return Err(mismatch("integer", &other)),
        }
        Ok(())
    }
}

/// Integers beyond this magnitude cannot be stored in an `f64` without rounding.
const MAX_EXACT_FLOAT_INT: u64 = 1 << 53;

impl Slot for u64 {
    fn get(&self) -> Result<Value, PurifyError> {
        Ok(Value::from(*self))
    }

    fn set(&mut self, value: Value) -> Result<(), PurifyError> {
        match value {
            Value::Absent => {}
            Value::UInt(u) => *self = u,
            Value::Int(i) if i >= 0 => *self = i.unsigned_abs(),
            other => return Err(mismatch("unsigned integer", &other)),
        }
        Ok(())
    }
}

impl Slot for f64 {
    fn get(&self) -> Result<Value, PurifyError> {
        Ok(Value::Float(*self))
    }

    fn set(&mut self, value: Value) -> Result<(), PurifyError> {
        match value {
            Value::Absent => {}
            Value::Float(x) => *self = x,
            Value::Int(i) if i.unsigned_abs() <= MAX_EXACT_FLOAT_INT => *self = i as f64,
            other => return Err(mismatch("float", &other)),
        }
        Ok(())
    }
}

impl Slot for bool {
    fn get(&self) -> Result<Value, PurifyError> {
        Ok(Value::Bool(*self))
    }

    fn set(&mut self, value: Value) -> Result<(), PurifyError> {
        match value {
            Value::Absent => {}
            Value::Bool(b) => *self = b,
            other => return Err(mismatch("boolean", &other)),
        }
        Ok(())
    }
}

/// Untyped slot: holds whatever the pipeline produced.
impl Slot for Value {
    fn get(&self) -> Result<Value, PurifyError> {
        Ok(self.clone())
    }

    fn set(&mut self, value: Value) -> Result<(), PurifyError> {
        if !value.is_absent() {
            *self = value;
        }
        Ok(())
    }
}

/// JSON entry. Arrays and objects are not scalars and cannot be read.
impl Slot for serde_json::Value {
    fn get(&self) -> Result<Value, PurifyError> {
        Value::from_json(self)
    }

    fn set(&mut self, value: Value) -> Result<(), PurifyError> {
        if !value.is_absent() {
            *self = value.into_json();
        }
        Ok(())
    }
}
