//! Scalars that arrive as either JSON numbers or strings.
//!
//! The admin form posts prices as text and the client app posts table numbers as text, so the
//! input types accept both and convert explicitly.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON value where a number is expected but a numeric string is tolerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Loose {
    Number(f64),
    Text(String),
    Other(Value),
}

impl Loose {
    /// The finite number this value denotes, if any.
    pub fn number(&self) -> Option<f64> {
        let n = match self {
            Loose::Number(n) => *n,
            Loose::Text(s) => s.trim().parse().ok()?,
            Loose::Other(_) => return None,
        };
        n.is_finite().then_some(n)
    }

    /// A whole, non-negative number. Text must be plain ASCII digits.
    pub fn whole(&self) -> Option<u64> {
        match self {
            Loose::Number(n) if n.is_finite() && *n >= 0.0 && n.fract() == 0.0 => {
                (*n <= u64::MAX as f64).then_some(*n as u64)
            }
            Loose::Text(s) => {
                let s = s.trim();
                if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                s.parse().ok()
            }
            _ => None,
        }
    }

    /// The value as text. Whole numbers are written without a fractional part.
    pub fn text(&self) -> Option<String> {
        match self {
            Loose::Text(s) => Some(s.clone()),
            Loose::Number(_) => self.whole().map(|n| n.to_string()),
            Loose::Other(_) => None,
        }
    }

    /// True for an empty or whitespace-only string.
    pub fn is_blank(&self) -> bool {
        matches!(self, Loose::Text(s) if s.trim().is_empty())
    }
}

impl From<f64> for Loose {
    fn from(n: f64) -> Self {
        Loose::Number(n)
    }
}

impl From<&str> for Loose {
    fn from(s: &str) -> Self {
        Loose::Text(s.to_string())
    }
}
