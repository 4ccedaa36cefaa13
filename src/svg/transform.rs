//! Translate-then-scale mapping onto the canonical square.

use std::fmt;

use super::ViewRect;

/// Side length of the canonical output square.
pub const CANONICAL_SIZE: f64 = 100.0;

/// Affine mapping applied as `translate(tx,ty) scale(sx,sy)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl AffineTransform {
    /// Derive the mapping from `rect` onto `0 0 100 100`.
    ///
    /// A zero dimension leaves its axis unscaled (`1.0`).
    pub fn derive(rect: &ViewRect) -> Self {
        Self {
            translate_x: negate(rect.origin_x),
            translate_y: negate(rect.origin_y),
            scale_x: axis_scale(rect.width),
            scale_y: axis_scale(rect.height),
        }
    }

    /// Value for the `transform` attribute.
    ///
    /// Both operations are always written, even at identity.
    pub fn to_attribute(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AffineTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({},{}) scale({},{})",
            self.translate_x, self.translate_y, self.scale_x, self.scale_y
        )
    }
}

#[inline]
fn axis_scale(extent: f64) -> f64 {
    if extent == 0.0 {
        1.0
    } else {
        CANONICAL_SIZE / extent
    }
}

/// Negate without producing `-0`.
#[inline]
fn negate(value: f64) -> f64 {
    -value + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(origin_x: f64, origin_y: f64, width: f64, height: f64) -> ViewRect {
        ViewRect {
            origin_x,
            origin_y,
            width,
            height,
        }
    }

    #[test]
    fn test_derive_translate_then_scale() {
        let t = AffineTransform::derive(&rect(10.0, 20.0, 200.0, 50.0));
        assert_eq!(
            t,
            AffineTransform {
                translate_x: -10.0,
                translate_y: -20.0,
                scale_x: 0.5,
                scale_y: 2.0,
            }
        );
        assert_eq!(t.to_attribute(), "translate(-10,-20) scale(0.5,2)");
    }

    #[test]
    fn test_derive_zero_dimension_guard() {
        let t = AffineTransform::derive(&rect(0.0, 0.0, 0.0, 10000.0));
        assert_eq!(t.scale_x, 1.0);
        assert_eq!(t.scale_y, 0.01);

        let t = AffineTransform::derive(&rect(0.0, 0.0, 0.0, 0.0));
        assert_eq!((t.scale_x, t.scale_y), (1.0, 1.0));
    }

    #[test]
    fn test_identity_is_still_written() {
        let t = AffineTransform::derive(&ViewRect::DEFAULT);
        assert_eq!(t.to_attribute(), "translate(0,0) scale(1,1)");
    }

    #[test]
    fn test_negative_origin() {
        let t = AffineTransform::derive(&rect(-8.5, -1.0, 400.0, 25.0));
        assert_eq!(t.to_attribute(), "translate(8.5,1) scale(0.25,4)");
    }

    #[test]
    fn test_fractional_scale_uses_shortest_repr() {
        let t = AffineTransform::derive(&rect(0.0, 0.0, 109.0, 3.0));
        assert_eq!(t.scale_x, 100.0 / 109.0);
        assert_eq!(
            t.to_attribute(),
            format!("translate(0,0) scale({},{})", 100.0 / 109.0, 100.0 / 3.0)
        );
    }
}
