//! Positional arguments recorded alongside a message template.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::throwable::Throwable;

/// Owned snapshot of one positional argument.
///
/// Values are copied in when the event is built, so later changes to the
/// caller's data never reach a recorded event.
#[derive(Clone, Debug)]
pub enum Argument {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(String),
    Throwable(Throwable),
}

impl Argument {
    /// Snapshot any displayable value as its rendered text.
    pub fn display(value: impl fmt::Display) -> Self {
        Argument::Str(value.to_string())
    }

    pub fn as_throwable(&self) -> Option<&Throwable> {
        match self {
            Argument::Throwable(t) => Some(t),
            _ => None,
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Null => f.write_str("null"),
            Argument::Bool(v) => write!(f, "{v}"),
            Argument::Int(v) => write!(f, "{v}"),
            Argument::UInt(v) => write!(f, "{v}"),
            Argument::Float(v) => write!(f, "{v}"),
            Argument::Char(v) => write!(f, "{v}"),
            Argument::Str(v) => f.write_str(v),
            Argument::Throwable(v) => write!(f, "{v}"),
        }
    }
}

// Floats compare by bit pattern so that `Eq` and `Hash` stay consistent.
impl PartialEq for Argument {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Argument::Null, Argument::Null) => true,
            (Argument::Bool(a), Argument::Bool(b)) => a == b,
            (Argument::Int(a), Argument::Int(b)) => a == b,
            (Argument::UInt(a), Argument::UInt(b)) => a == b,
            (Argument::Float(a), Argument::Float(b)) => a.to_bits() == b.to_bits(),
            (Argument::Char(a), Argument::Char(b)) => a == b,
            (Argument::Str(a), Argument::Str(b)) => a == b,
            (Argument::Throwable(a), Argument::Throwable(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Argument {}

impl Hash for Argument {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Argument::Null => {}
            Argument::Bool(v) => v.hash(state),
            Argument::Int(v) => v.hash(state),
            Argument::UInt(v) => v.hash(state),
            Argument::Float(v) => v.to_bits().hash(state),
            Argument::Char(v) => v.hash(state),
            Argument::Str(v) => v.hash(state),
            Argument::Throwable(v) => v.hash(state),
        }
    }
}

macro_rules! impl_from {
    ($variant:ident: $($ty:ty),+ => $conv:ty) => {
        $(
            impl From<$ty> for Argument {
                fn from(value: $ty) -> Self {
                    Argument::$variant(<$conv>::from(value))
                }
            }
        )+
    };
}

impl_from!(Int: i8, i16, i32, i64 => i64);
impl_from!(UInt: u8, u16, u32, u64 => u64);
impl_from!(Float: f32, f64 => f64);
impl_from!(Str: &str, String, &String => String);

impl From<isize> for Argument {
    fn from(value: isize) -> Self {
        Argument::Int(value as i64)
    }
}

impl From<usize> for Argument {
    fn from(value: usize) -> Self {
        Argument::UInt(value as u64)
    }
}

impl From<bool> for Argument {
    fn from(value: bool) -> Self {
        Argument::Bool(value)
    }
}

impl From<char> for Argument {
    fn from(value: char) -> Self {
        Argument::Char(value)
    }
}

impl From<Throwable> for Argument {
    fn from(value: Throwable) -> Self {
        Argument::Throwable(value)
    }
}

impl From<&Argument> for Argument {
    fn from(value: &Argument) -> Self {
        value.clone()
    }
}

impl<T: Into<Argument>> From<Option<T>> for Argument {
    fn from(value: Option<T>) -> Self {
        value.map_or(Argument::Null, Into::into)
    }
}

/// Build a `Vec<Argument>` from heterogeneous values.
///
/// ```
/// use logcapture::{args, Argument};
///
/// let args = args!["user", 42, None::<&str>];
/// assert_eq!(args, vec![Argument::from("user"), Argument::Int(42), Argument::Null]);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Argument>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Argument::from($arg)),+]
    };
}
