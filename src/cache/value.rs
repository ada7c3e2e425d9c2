//! Cache Value Module
//!
//! Defines which payload types the cache can hold and when a payload counts
//! as "no value".

use std::borrow::Cow;
use std::sync::Arc;

// == Cache Value ==
/// A payload that can be stored in a [`TtlCache`](crate::cache::TtlCache).
///
/// Values are handed back by clone, so large payloads are best wrapped in
/// `Arc`. Types that have a natural "nothing" state report it through
/// [`is_absent`](CacheValue::is_absent); `set` rejects such values.
pub trait CacheValue: Clone + Send + Sync + 'static {
    /// Returns true if this value represents the absence of a value.
    fn is_absent(&self) -> bool {
        false
    }
}

impl<T: Clone + Send + Sync + 'static> CacheValue for Option<T> {
    fn is_absent(&self) -> bool {
        self.is_none()
    }
}

impl CacheValue for serde_json::Value {
    fn is_absent(&self) -> bool {
        self.is_null()
    }
}

impl<T: ?Sized + Send + Sync + 'static> CacheValue for Arc<T> {}

impl<T: Clone + Send + Sync + 'static> CacheValue for Vec<T> {}

impl CacheValue for Cow<'static, str> {}

macro_rules! impl_present_value {
    ($($ty:ty),* $(,)?) => {
        $(impl CacheValue for $ty {})*
    };
}

impl_present_value!(
    String,
    &'static str,
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
);
