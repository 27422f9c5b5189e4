//! `ToValue` implementations for standard library types.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::error::Error;
use std::hash::BuildHasher;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use super::{ToValue, Value};

macro_rules! signed {
    ($($ty:ty),*) => {$(
        impl ToValue for $ty {
            fn to_value(&self) -> Value<'_> {
                Value::I64(i64::from(*self))
            }
        }
    )*};
}

macro_rules! unsigned {
    ($($ty:ty),*) => {$(
        impl ToValue for $ty {
            fn to_value(&self) -> Value<'_> {
                Value::U64(u64::from(*self))
            }
        }
    )*};
}

signed!(i8, i16, i32, i64);
unsigned!(u8, u16, u32, u64);

impl ToValue for isize {
    fn to_value(&self) -> Value<'_> {
        i64::try_from(*self).map_or(Value::Unsupported, Value::I64)
    }
}

impl ToValue for usize {
    fn to_value(&self) -> Value<'_> {
        u64::try_from(*self).map_or(Value::Unsupported, Value::U64)
    }
}

impl ToValue for i128 {
    fn to_value(&self) -> Value<'_> {
        Value::I128(*self)
    }
}

impl ToValue for u128 {
    fn to_value(&self) -> Value<'_> {
        Value::U128(*self)
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value<'_> {
        Value::F32(*self)
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value<'_> {
        Value::F64(*self)
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl ToValue for () {
    fn to_value(&self) -> Value<'_> {
        Value::Null
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value<'_> {
        Value::str(self)
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value<'_> {
        Value::str(self)
    }
}

impl<B> ToValue for Cow<'_, B>
where
    B: ToValue + ToOwned + ?Sized,
{
    fn to_value(&self) -> Value<'_> {
        self.as_ref().to_value()
    }
}

impl ToValue for Path {
    fn to_value(&self) -> Value<'_> {
        Value::Str(self.to_string_lossy())
    }
}

impl ToValue for PathBuf {
    fn to_value(&self) -> Value<'_> {
        self.as_path().to_value()
    }
}

macro_rules! displayed {
    ($($ty:ty),*) => {$(
        impl ToValue for $ty {
            fn to_value(&self) -> Value<'_> {
                Value::Display(self)
            }
        }
    )*};
}

// `char` renders as a one-letter string but is not text, so it never serves as
// a field or map key.
displayed!(char, IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr);

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value<'_> {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for &mut T {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Rc<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Arc<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value<'_> {
        Value::Seq(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value<'_> {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value<'_> {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for VecDeque<T> {
    fn to_value(&self) -> Value<'_> {
        Value::Seq(self.iter().map(ToValue::to_value).collect())
    }
}

/// Keeps the entries whose key converts to text; other keys are dropped.
fn text_keyed<'a, K, V, I>(entries: I) -> Value<'a>
where
    K: ToValue + 'a,
    V: ToValue + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    Value::Map(
        entries
            .filter_map(|(key, value)| match key.to_value() {
                Value::Str(text) => Some((text, value.to_value())),
                _ => None,
            })
            .collect(),
    )
}

impl<K: ToValue, V: ToValue, S: BuildHasher> ToValue for HashMap<K, V, S> {
    fn to_value(&self) -> Value<'_> {
        text_keyed(self.iter())
    }
}

impl<K: ToValue, V: ToValue> ToValue for BTreeMap<K, V> {
    fn to_value(&self) -> Value<'_> {
        text_keyed(self.iter())
    }
}

impl ToValue for dyn Error + 'static {
    fn to_value(&self) -> Value<'_> {
        Value::Error(self)
    }
}

impl ToValue for dyn Error + Send + Sync + 'static {
    fn to_value(&self) -> Value<'_> {
        Value::Error(self)
    }
}

impl ToValue for std::io::Error {
    fn to_value(&self) -> Value<'_> {
        Value::Error(self)
    }
}

impl ToValue for std::fmt::Error {
    fn to_value(&self) -> Value<'_> {
        Value::Error(self)
    }
}

impl ToValue for Value<'_> {
    fn to_value(&self) -> Value<'_> {
        self.reborrow()
    }
}
