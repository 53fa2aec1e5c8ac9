use crate::error::ConfigResult;

/// Flat key-value configuration store.
///
/// Implementations must be thread-safe (`Send + Sync`). Keys are opaque
/// strings; values are strings or absent. There is no distinction between "a
/// key that was never set" and "a key that was removed" — both read back as
/// `None`, which is what lets enumerated sequences (`Prefix/<n>/ID`) be
/// truncated by writing an absent value past their last entry.
pub trait Configuration: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key is not set.
    fn get_string(&self, key: &str) -> ConfigResult<Option<String>>;

    /// Write `value` under `key`, or remove the key when `value` is `None`.
    fn set_string(&self, key: &str, value: Option<&str>) -> ConfigResult<()>;
}
