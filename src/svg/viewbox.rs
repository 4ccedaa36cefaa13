//! `viewBox` resolution.

use std::fmt;

/// Rectangular coordinate frame declared by a document's `viewBox`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRect {
    pub origin_x: f64,
    pub origin_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewRect {
    /// Frame assumed when a document declares no usable `viewBox`.
    pub const DEFAULT: Self = Self {
        origin_x: 0.0,
        origin_y: 0.0,
        width: 100.0,
        height: 100.0,
    };

    /// Resolve a raw `viewBox` attribute value.
    ///
    /// Total: a missing value, a token count other than four, a token that is
    /// not a finite number, or a negative dimension all yield
    /// [`ViewRect::DEFAULT`].
    pub fn resolve(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or(Self::DEFAULT)
    }

    fn parse(value: &str) -> Option<Self> {
        let tokens: Vec<&str> = value
            .split(is_separator)
            .filter(|token| !token.is_empty())
            .collect();

        let &[x, y, width, height] = tokens.as_slice() else {
            return None;
        };

        let rect = Self {
            origin_x: number(x)?,
            origin_y: number(y)?,
            width: number(width)?,
            height: number(height)?,
        };

        (rect.width >= 0.0 && rect.height >= 0.0).then_some(rect)
    }
}

impl Default for ViewRect {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ViewRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.origin_x, self.origin_y, self.width, self.height
        )
    }
}

#[inline]
fn is_separator(c: char) -> bool {
    matches!(c, ',' | ' ' | '\t' | '\r' | '\n')
}

#[inline]
fn number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}
