//! `{{name}}` placeholder substitution.
//!
//! # Invariants
//!
//! 1. **Single pass**: substituted values are never rescanned, so a value
//!    containing `{{other}}` is emitted literally.
//! 2. **Soft miss**: a placeholder whose name is not in [`Params`] is left
//!    exactly as written, braces included.
//! 3. Only `{{` + one or more ASCII word characters + `}}` is a placeholder.
//!    Anything else, including `{{ name }}` and `{{}}`, is plain text.

use std::collections::HashMap;
use std::fmt;

/// A value substituted into a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) if n.is_nan() => f.write_str("NaN"),
            Self::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            // Covers -0.0 as well.
            Self::Number(n) if *n == 0.0 => f.write_str("0"),
            Self::Number(n) if n.abs() >= 1e21 || n.abs() < 1e-6 => {
                // Exponent form with an explicit sign, as in `1e+21`.
                let sci = format!("{n:e}");
                match sci.split_once('e') {
                    Some((mantissa, exp)) if !exp.starts_with('-') => {
                        write!(f, "{mantissa}e+{exp}")
                    }
                    _ => f.write_str(&sci),
                }
            }
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&String> for ParamValue {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

macro_rules! number_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn from(n: $ty) -> Self {
                    Self::Number(n as f64)
                }
            }
        )*
    };
}

number_from!(f64, f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Per-call interpolation parameters.
///
/// A numeric `count` entry also drives plural selection.
///
/// ```
/// use lexicon::Params;
///
/// let params = Params::new().with("name", "Ada").with("count", 3);
/// assert_eq!(params.count(), Some(3.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: HashMap<String, ParamValue>,
}

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder variant of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// The `count` parameter, only when it is a number.
    #[must_use]
    pub fn count(&self) -> Option<f64> {
        match self.values.get("count") {
            Some(ParamValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// Replace every `{{name}}` in `template` with its value from `params`.
#[must_use]
pub fn interpolate(template: &str, params: &Params) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        result.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];
        let name_len = after_open
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
            .count();

        if name_len == 0 || !after_open[name_len..].starts_with("}}") {
            // Not a placeholder here; the second brace may still open one.
            result.push('{');
            rest = &rest[open + 1..];
            continue;
        }

        let name = &after_open[..name_len];
        match params.get(name) {
            Some(value) => result.push_str(&value.to_string()),
            None => result.push_str(&rest[open..open + name_len + 4]),
        }
        rest = &after_open[name_len + 2..];
    }

    result.push_str(rest);
    result
}
