// src/report/context.rs

//! Named values interpolated into log templates (`"Exit code {code}"`).

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

use regex::{Captures, Regex};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z0-9_.\-]+)\}").expect("placeholder regex is valid")
});

#[derive(Debug, Clone, PartialEq)]
pub enum ContextValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Duration(Duration),
    /// Nested values, e.g. the per-field overrides under `_style`.
    Map(LogContext),
}

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextValue::Str(s) => f.write_str(s),
            ContextValue::Int(i) => write!(f, "{i}"),
            ContextValue::Float(x) => write!(f, "{x}"),
            ContextValue::Bool(b) => write!(f, "{b}"),
            ContextValue::Duration(d) => write!(f, "{:.3}s", d.as_secs_f64()),
            ContextValue::Map(m) => write!(f, "{m:?}"),
        }
    }
}

impl From<&str> for ContextValue {
    fn from(s: &str) -> Self {
        ContextValue::Str(s.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(s: String) -> Self {
        ContextValue::Str(s)
    }
}

impl From<i32> for ContextValue {
    fn from(i: i32) -> Self {
        ContextValue::Int(i64::from(i))
    }
}

impl From<i64> for ContextValue {
    fn from(i: i64) -> Self {
        ContextValue::Int(i)
    }
}

impl From<usize> for ContextValue {
    fn from(n: usize) -> Self {
        ContextValue::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<f64> for ContextValue {
    fn from(x: f64) -> Self {
        ContextValue::Float(x)
    }
}

impl From<bool> for ContextValue {
    fn from(b: bool) -> Self {
        ContextValue::Bool(b)
    }
}

impl From<Duration> for ContextValue {
    fn from(d: Duration) -> Self {
        ContextValue::Duration(d)
    }
}

impl From<LogContext> for ContextValue {
    fn from(m: LogContext) -> Self {
        ContextValue::Map(m)
    }
}

/// Ordered string-keyed context map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogContext {
    values: BTreeMap<String, ContextValue>,
}

impl LogContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Insert only if `key` is not present yet.
    pub fn insert_default(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) {
        self.values.entry(key.into()).or_insert_with(|| value.into());
    }

    /// Nested map under `key`, created if absent.
    ///
    /// `None` if `key` already holds a non-map value; that value is left as is.
    pub fn map_mut(&mut self, key: &str) -> Option<&mut LogContext> {
        let slot = self
            .values
            .entry(key.to_string())
            .or_insert_with(|| ContextValue::Map(LogContext::new()));
        match slot {
            ContextValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Overwrite with every entry of `other`.
    pub fn extend(&mut self, other: LogContext) {
        self.values.extend(other.values);
    }
}

impl<K: Into<String>, V: Into<ContextValue>> FromIterator<(K, V)> for LogContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ctx = LogContext::new();
        for (k, v) in iter {
            ctx.insert(k, v);
        }
        ctx
    }
}

/// Replace `{key}` placeholders with values from `ctx`.
///
/// Unknown keys and keys holding a nested map are left verbatim.
pub fn interpolate(template: &str, ctx: &LogContext) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| match ctx.get(&caps[1]) {
            Some(ContextValue::Map(_)) | None => caps[0].to_string(),
            Some(value) => value.to_string(),
        })
        .into_owned()
}
