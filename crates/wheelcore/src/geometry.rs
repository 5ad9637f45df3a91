//! Angular layout of the wheel.
//!
//! Angles in this module are degrees measured clockwise from the zero-reference, the 12 o'clock
//! position under the pointer. Segment `i` owns `[i * span, (i + 1) * span)`. The renderer and the
//! resolver both go through [`Geometry`], so the slice drawn under the pointer is the slice
//! [`Geometry::segment_at`] reports.

use std::f64::consts::PI;
use thiserror::Error;

pub const FULL_TURN: f64 = 360.0;

/// Screen angle (radians) of the zero-reference. Cairo puts 0 rad at 3 o'clock with y pointing
/// down, so clockwise is increasing radians and 12 o'clock is `-PI / 2`.
pub const START_OFFSET: f64 = -PI / 2.0;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("the wheel has no segments")]
    NoSegments,
    #[error("segment {index} is out of range for a wheel of {count}")]
    OutOfRange { index: usize, count: usize },
}

/// Folds any finite angle into `[0, 360)`.
pub fn normalize(angle: f64) -> f64 {
    let folded = angle.rem_euclid(FULL_TURN);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if folded >= FULL_TURN { 0.0 } else { folded }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    count: usize,
    span: f64,
}

impl Geometry {
    pub fn new(count: usize) -> Result<Self, GeometryError> {
        if count == 0 {
            return Err(GeometryError::NoSegments);
        }
        Ok(Self {
            count,
            span: FULL_TURN / count as f64,
        })
    }

    /// Degrees owned by each segment.
    pub fn span(&self) -> f64 {
        self.span
    }

    fn check(&self, index: usize) -> Result<(), GeometryError> {
        if index < self.count {
            Ok(())
        } else {
            Err(GeometryError::OutOfRange {
                index,
                count: self.count,
            })
        }
    }

    /// Half-open interval `[start, end)` owned by `index`.
    pub fn interval(&self, index: usize) -> Result<(f64, f64), GeometryError> {
        self.check(index)?;
        let start = index as f64 * self.span;
        Ok((start, start + self.span))
    }

    /// Angle at which the label of `index` is centered.
    pub fn label_angle(&self, index: usize) -> Result<f64, GeometryError> {
        self.check(index)?;
        Ok(index as f64 * self.span + self.span / 2.0)
    }

    /// Index of the segment containing `angle`. The one formula both drawing and resolution
    /// rely on.
    pub fn segment_at(&self, angle: f64) -> usize {
        let slot = (normalize(angle) / self.span).floor() as usize;
        // float rounding can land exactly on `count` just below a full turn
        slot % self.count
    }

    /// Wheel-frame angle sitting under the pointer after `rotation` degrees of spin.
    ///
    /// The pointer travels clockwise over the wheel as rotation grows; on screen this is the
    /// wheel turning by `-rotation` (see [`Geometry::screen_angle`]).
    pub fn pointer_angle(rotation: f64) -> f64 {
        normalize(rotation)
    }

    /// Converts a wheel-frame angle into cairo radians for a wheel spun by `rotation`.
    ///
    /// The wheel turns by `-rotation`, so the visible spin is counter-clockwise while the
    /// pointer walks the segments clockwise.
    pub fn screen_angle(wheel_angle: f64, rotation: f64) -> f64 {
        START_OFFSET + (wheel_angle - normalize(rotation)).to_radians()
    }

    /// Start and end of `index` in cairo radians, ready for `Context::arc`.
    pub fn segment_arc(&self, index: usize, rotation: f64) -> Result<(f64, f64), GeometryError> {
        let (start, end) = self.interval(index)?;
        Ok((
            Self::screen_angle(start, rotation),
            Self::screen_angle(end, rotation),
        ))
    }

    /// Direction of the label baseline of `index` in cairo radians.
    pub fn label_arc(&self, index: usize, rotation: f64) -> Result<f64, GeometryError> {
        Ok(Self::screen_angle(self.label_angle(index)?, rotation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_empty_wheel_has_no_geometry() {
        assert_eq!(Geometry::new(0), Err(GeometryError::NoSegments));
    }

    #[test]
    fn test_span_and_intervals() {
        let geometry = Geometry::new(4).unwrap();
        assert_eq!(geometry.span(), 90.0);

        let cases = vec![
            (0, (0.0, 90.0)),
            (1, (90.0, 180.0)),
            (2, (180.0, 270.0)),
            (3, (270.0, 360.0)),
        ];
        for (index, expected) in cases {
            assert_eq!(geometry.interval(index).unwrap(), expected);
        }

        assert_eq!(
            geometry.interval(4),
            Err(GeometryError::OutOfRange { index: 4, count: 4 })
        );
    }

    #[test]
    fn test_segment_at_boundaries() {
        let geometry = Geometry::new(10).unwrap();
        let cases = vec![
            (0.0, 0),
            (35.999, 0),
            (36.0, 1),
            (359.999, 9),
            (360.0, 0),
            (-1.0, 9),
            (725.0, 0),
        ];
        for (angle, expected) in cases {
            assert_eq!(geometry.segment_at(angle), expected, "angle {angle}");
        }
    }

    #[test]
    fn test_label_sits_inside_its_segment() {
        for count in 1..=24 {
            let geometry = Geometry::new(count).unwrap();
            for index in 0..count {
                let (start, end) = geometry.interval(index).unwrap();
                let label = geometry.label_angle(index).unwrap();
                assert!(start < label && label < end);
                assert_eq!(geometry.segment_at(label), index);
            }
        }
    }

    #[test]
    fn test_normalize_folds_into_one_turn() {
        assert_eq!(normalize(0.0), 0.0);
        assert_eq!(normalize(360.0), 0.0);
        assert_eq!(normalize(1450.0), 10.0);
        assert_eq!(normalize(-90.0), 270.0);
        assert_eq!(normalize(-1e-20), 0.0);
    }

    #[test]
    fn test_pointer_is_drawn_at_zero_reference() {
        for rotation in [0.0, 90.0, 1440.0, 1777.25] {
            let pointer = Geometry::pointer_angle(rotation);
            let screen = Geometry::screen_angle(pointer, rotation);
            assert!((screen - START_OFFSET).abs() < EPS, "rotation {rotation}");
        }
    }

    #[test]
    fn test_segment_arc_contains_pointer() {
        let geometry = Geometry::new(6).unwrap();
        let rotation = 1440.0 + 130.0;
        let index = geometry.segment_at(Geometry::pointer_angle(rotation));
        let (start, end) = geometry.segment_arc(index, rotation).unwrap();
        assert!(start <= START_OFFSET + EPS && START_OFFSET < end);
    }
}
