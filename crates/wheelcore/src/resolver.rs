use crate::geometry::{Geometry, GeometryError, normalize};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ResolveError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("rotation must be a finite, non-negative number of degrees (got {0})")]
    InvalidRotation(f64),
}

/// Breakdown of a single resolution, kept for logging and the result line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub rotation: f64,
    pub normalized: f64,
    pub pointer_angle: f64,
    pub span: f64,
    pub index: usize,
}

/// Maps a cumulative rotation onto the segment under the pointer.
pub fn resolve_with(geometry: &Geometry, rotation: f64) -> Result<Resolution, ResolveError> {
    if !rotation.is_finite() || rotation < 0.0 {
        return Err(ResolveError::InvalidRotation(rotation));
    }

    let pointer_angle = Geometry::pointer_angle(rotation);
    Ok(Resolution {
        rotation,
        normalized: normalize(rotation),
        pointer_angle,
        span: geometry.span(),
        index: geometry.segment_at(pointer_angle),
    })
}

pub fn resolve(rotation: f64, count: usize) -> Result<usize, ResolveError> {
    let geometry = Geometry::new(count)?;
    Ok(resolve_with(&geometry, rotation)?.index)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Multiples of 13.25 are exact in binary, so shifting by a full turn is exact too.
    fn rotations() -> impl Iterator<Item = f64> {
        (0..400).map(|k| k as f64 * 13.25)
    }

    #[test]
    fn test_four_full_turns_land_on_first_segment() {
        assert_eq!(resolve(1440.0, 10), Ok(0));
    }

    #[test]
    fn test_quarter_turn_on_four_segments() {
        assert_eq!(resolve(90.0, 4), Ok(1));
    }

    #[test]
    fn test_winner_always_in_range() {
        for count in 1..=32 {
            for rotation in rotations() {
                let index = resolve(rotation, count).unwrap();
                assert!(index < count, "rotation {rotation}, count {count}");
            }
        }
    }

    #[test]
    fn test_full_turn_is_invisible() {
        for count in 1..=32 {
            for rotation in rotations() {
                assert_eq!(
                    resolve(rotation, count),
                    resolve(rotation + 360.0, count),
                    "rotation {rotation}, count {count}"
                );
            }
        }
    }

    #[test]
    fn test_single_segment_always_wins() {
        for rotation in rotations() {
            assert_eq!(resolve(rotation, 1), Ok(0));
        }
    }

    #[test]
    fn test_label_angle_round_trips() {
        for count in 1..=36 {
            let geometry = Geometry::new(count).unwrap();
            for index in 0..count {
                let midpoint = geometry.label_angle(index).unwrap();
                assert_eq!(resolve(midpoint, count), Ok(index));
                assert_eq!(resolve(midpoint + 1440.0, count), Ok(index));
            }
        }
    }

    #[test]
    fn test_empty_wheel_is_an_error() {
        assert_eq!(
            resolve(100.0, 0),
            Err(ResolveError::Geometry(GeometryError::NoSegments))
        );
    }

    #[test]
    fn test_rejects_invalid_rotation() {
        for rotation in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                resolve(rotation, 4),
                Err(ResolveError::InvalidRotation(_))
            ));
        }
    }

    #[test]
    fn test_resolution_breakdown() {
        let geometry = Geometry::new(8).unwrap();
        let resolution = resolve_with(&geometry, 1440.0 + 100.0).unwrap();
        assert_eq!(resolution.normalized, 100.0);
        assert_eq!(resolution.pointer_angle, 100.0);
        assert_eq!(resolution.span, 45.0);
        assert_eq!(resolution.index, 2);
    }
}
