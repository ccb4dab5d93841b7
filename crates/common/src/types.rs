use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Planar pose: where a cursor stands and which way it faces.
///
/// Headings are in degrees, 0 pointing along +x and increasing
/// counter-clockwise. They are not wrapped; use [`normalize_degrees`]
/// when a value in `[0, 360)` is needed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub position: DVec2,
    pub heading: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
            heading,
        }
    }

    /// Pose reached by turning `angle` degrees and then moving `distance` forward.
    pub fn turned_and_advanced(&self, angle: f64, distance: f64) -> Self {
        let heading = self.heading + angle;
        Self {
            position: self.position + heading_vector(heading) * distance,
            heading,
        }
    }
}

/// Unit vector for a heading given in degrees.
pub fn heading_vector(degrees: f64) -> DVec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    DVec2::new(cos, sin)
}

/// Wrap a heading into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn pose_default_is_origin_facing_east() {
        let p = Pose::default();
        assert_eq!(p.position, DVec2::ZERO);
        assert_eq!(p.heading, 0.0);
    }

    #[test]
    fn heading_vector_cardinal_directions() {
        assert!(close(heading_vector(0.0), DVec2::X));
        assert!(close(heading_vector(90.0), DVec2::Y));
        assert!(close(heading_vector(180.0), -DVec2::X));
        assert!(close(heading_vector(-90.0), -DVec2::Y));
    }

    #[test]
    fn turned_and_advanced_moves_along_new_heading() {
        let p = Pose::new(1.0, 1.0, 0.0).turned_and_advanced(90.0, 2.0);
        assert_eq!(p.heading, 90.0);
        assert!(close(p.position, DVec2::new(1.0, 3.0)));
    }

    #[test]
    fn normalize_wraps_into_range() {
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert!(normalize_degrees(-1e-18) < 360.0);
    }
}
