#![forbid(unsafe_code)]

//! CSS length resolution for declarative distances such as `"120vh"`.
//!
//! Section distances are authored in viewport-relative units and must be
//! re-resolved to pixels every time the viewport changes. [`CssLength`]
//! keeps the authored unit so resolution can be repeated on resize.
//!
//! # Failure Modes
//!
//! Strict parsing ([`CssLength::parse`]) reports a [`LengthParseError`].
//! Frame-time callers use [`CssLength::resolve_or`], which falls back to a
//! default length and never fails.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::Viewport;
use crate::warn;

/// A length in one of the units the site scripts understand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LengthRepr", into = "String")]
pub enum CssLength {
    /// Absolute pixels. Bare numbers parse as pixels.
    Px(f64),
    /// Percentage of viewport height.
    Vh(f64),
    /// Percentage of viewport width.
    Vw(f64),
}

impl CssLength {
    /// Parse a length string (`"120vh"`, `"40vw"`, `"300px"`, `"300"`).
    ///
    /// Surrounding whitespace is ignored and unit suffixes are matched
    /// case-insensitively.
    pub fn parse(input: &str) -> Result<Self, LengthParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(LengthParseError::Empty);
        }
        let lower = trimmed.to_ascii_lowercase();
        let (number, ctor): (&str, fn(f64) -> Self) = if let Some(n) = lower.strip_suffix("vh") {
            (n, Self::Vh)
        } else if let Some(n) = lower.strip_suffix("vw") {
            (n, Self::Vw)
        } else if let Some(n) = lower.strip_suffix("px") {
            (n, Self::Px)
        } else {
            (lower.as_str(), Self::Px)
        };
        let value: f64 = number
            .trim()
            .parse()
            .map_err(|_| LengthParseError::InvalidNumber(trimmed.to_string()))?;
        if !value.is_finite() {
            return Err(LengthParseError::InvalidNumber(trimmed.to_string()));
        }
        Ok(ctor(value))
    }

    /// Resolve to pixels against `viewport`.
    #[must_use]
    pub fn resolve(&self, viewport: Viewport) -> f64 {
        match *self {
            Self::Px(v) => v,
            Self::Vh(v) => v / 100.0 * viewport.height,
            Self::Vw(v) => v / 100.0 * viewport.width,
        }
    }

    /// Parse `input` and resolve it, falling back to `default` when the
    /// input is missing or malformed.
    #[must_use]
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn resolve_or(input: Option<&str>, default: CssLength, viewport: Viewport) -> f64 {
        let length = match input.map(Self::parse) {
            Some(Ok(length)) => length,
            Some(Err(err)) => {
                warn!(%err, fallback = %default, "malformed length, using default");
                default
            }
            None => default,
        };
        length.resolve(viewport)
    }
}

impl fmt::Display for CssLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Vh(v) => write!(f, "{v}vh"),
            Self::Vw(v) => write!(f, "{v}vw"),
        }
    }
}

impl FromStr for CssLength {
    type Err = LengthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<CssLength> for String {
    fn from(length: CssLength) -> Self {
        length.to_string()
    }
}

/// Wire form of a length: either a bare number (pixels) or a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum LengthRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<LengthRepr> for CssLength {
    type Error = LengthParseError;

    fn try_from(repr: LengthRepr) -> Result<Self, Self::Error> {
        match repr {
            LengthRepr::Number(v) if v.is_finite() => Ok(Self::Px(v)),
            LengthRepr::Number(v) => Err(LengthParseError::InvalidNumber(v.to_string())),
            LengthRepr::Text(s) => Self::parse(&s),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a length string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LengthParseError {
    /// The input was empty or whitespace.
    Empty,
    /// The numeric part was not a finite number.
    InvalidNumber(String),
}

impl fmt::Display for LengthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty length"),
            Self::InvalidNumber(s) => write!(f, "invalid length: {s:?}"),
        }
    }
}

impl std::error::Error for LengthParseError {}

// ---------------------------------------------------------------------------
// Lenient deserialization
// ---------------------------------------------------------------------------

/// `deserialize_with` helpers that turn malformed values into `None`.
///
/// Declarative attributes come from hand-edited markup; a bad value should
/// leave the element on its default rather than reject the whole config.
pub mod lenient {
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer};

    use super::CssLength;
    use crate::warn;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(IgnoredAny),
    }

    /// Accept a number or a numeric string; anything else becomes `None`.
    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed = match Raw::deserialize(deserializer)? {
            Raw::Number(v) => Some(v),
            Raw::Text(s) => s.trim().parse::<f64>().ok(),
            Raw::Other(_) => None,
        };
        Ok(parsed.filter(|v| {
            let ok = v.is_finite();
            if !ok {
                warn!("non-finite number in config, using default");
            }
            ok
        }))
    }

    /// Accept a length string or a bare pixel number; anything else becomes `None`.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn length<'de, D>(deserializer: D) -> Result<Option<CssLength>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(v) if v.is_finite() => Some(CssLength::Px(v)),
            Raw::Number(_) => None,
            Raw::Text(s) => match CssLength::parse(&s) {
                Ok(length) => Some(length),
                Err(err) => {
                    warn!(%err, "malformed length in config, using default");
                    None
                }
            },
            Raw::Other(_) => None,
        })
    }
}
