//! Bending a finished command sequence under a uniform force such as wind.
//!
//! Each branch's absolute heading is pulled toward the force heading; how far
//! depends on the branch's `resistance` against the force magnitude.

use bonsai_common::normalize_degrees;

use crate::command::Command;
use crate::cursor::Cursor;
use crate::error::InterpretError;
use crate::interpreter::interpret;

/// Logistic curve centred on 0.5, steepness 10, range (0, 1).
pub fn sigmoid(x: f64) -> f64 {
    const STEEPNESS: f64 = 10.0;
    const MIDPOINT: f64 = 0.5;
    1.0 / (1.0 + (-STEEPNESS * (x - MIDPOINT)).exp())
}

/// Blend heading `h1` (weight `a`) with heading `h2` (weight `b`) along the
/// shorter arc. Inputs and output are in degrees; output lies in `[0, 360)`.
///
/// A non-finite weight ratio (infinite `a`, or `a + b == 0`) leaves `h1` as is.
pub fn interpolate_headings(h1: f64, h2: f64, a: f64, b: f64) -> f64 {
    let ratio = a / (a + b);
    if !ratio.is_finite() {
        return normalize_degrees(h1);
    }

    let (h1, h2) = (normalize_degrees(h1), normalize_degrees(h2));
    // weight paired with the larger heading
    let (bigger, smaller, weight) = if h2 > h1 {
        (h2, h1, 1.0 - ratio)
    } else {
        (h1, h2, ratio)
    };

    let mut delta = bigger - smaller;
    let mut sign = 1.0;
    if delta > 180.0 {
        delta = 360.0 - delta;
        sign = -1.0;
    }

    normalize_degrees(smaller + sign * delta * sigmoid(weight))
}

/// Rewrite every branch's angle so it leans toward `global_heading`.
///
/// Walks `commands` from `cursor`'s pose; the cursor ends where the bent
/// sequence leads. Branches the force cannot move (infinite resistance, or
/// zero resistance under zero force) are emitted exactly as given.
pub fn apply_force<C: Cursor>(
    cursor: &mut C,
    commands: &[Command],
    global_heading: f64,
    force: f64,
) -> Result<Vec<Command>, InterpretError> {
    interpret(cursor, commands, |pose, branch| {
        if !(branch.resistance / (branch.resistance + force)).is_finite() {
            return vec![Command::Branch(*branch)];
        }
        let current = normalize_degrees(pose.heading);
        let target = interpolate_headings(
            current + branch.angle,
            global_heading,
            branch.resistance,
            force,
        );
        let mut angle = target - current;
        if angle > 180.0 {
            angle -= 360.0;
        } else if angle <= -180.0 {
            angle += 360.0;
        }
        vec![Command::Branch(branch.with_angle(angle))]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Branch;
    use crate::cursor::Turtle;
    use crate::interpreter::replay;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn sigmoid_midpoint_and_tails() {
        assert!(close(sigmoid(0.5), 0.5));
        assert!(sigmoid(0.0) < 0.01);
        assert!(sigmoid(1.0) > 0.99);
    }

    #[test]
    fn equal_weights_meet_halfway() {
        assert!(close(interpolate_headings(90.0, 0.0, 1.0, 1.0), 45.0));
        assert!(close(interpolate_headings(0.0, 90.0, 1.0, 1.0), 45.0));
    }

    #[test]
    fn interpolation_takes_shorter_arc() {
        assert!(close(interpolate_headings(350.0, 10.0, 1.0, 1.0), 0.0));
        assert!(close(interpolate_headings(20.0, 300.0, 1.0, 1.0), 340.0));
    }

    #[test]
    fn heavier_weight_dominates() {
        let stiff = interpolate_headings(90.0, 0.0, 10.0, 1.0);
        let soft = interpolate_headings(90.0, 0.0, 1.0, 10.0);
        assert!(stiff > 80.0);
        assert!(soft < 10.0);
    }

    #[test]
    fn infinite_resistance_is_rigid() {
        assert_eq!(interpolate_headings(90.0, 0.0, f64::INFINITY, 5.0), 90.0);
        assert_eq!(interpolate_headings(-90.0, 0.0, 0.0, 0.0), 270.0);
    }

    #[test]
    fn wind_bends_flexible_branch() {
        let cmds = [Command::Branch(Branch::new(0.0, 10.0).with_resistance(1.0))];
        let mut t = Turtle::new(0.0, 0.0, 90.0);
        let bent = apply_force(&mut t, &cmds, 0.0, 1.0).unwrap();

        let b = bent[0].branch().unwrap();
        assert!(close(b.angle, -45.0));
        assert_eq!(b.length, 10.0);
        assert!(close(t.pose().heading, 45.0));
    }

    #[test]
    fn wind_leaves_rigid_branch_and_structure_alone() {
        let cmds = [
            Command::Push,
            Command::Branch(Branch::new(30.0, 5.0)),
            Command::Pop,
        ];
        let mut t = Turtle::new(0.0, 0.0, 90.0);
        let out = apply_force(&mut t, &cmds, 0.0, 3.0).unwrap();
        assert_eq!(out, cmds);
        assert_eq!(t.pose().heading, 90.0);
    }

    #[test]
    fn rigid_branches_pass_through_bit_for_bit() {
        let cmds = [
            Command::Branch(Branch::new(270.0, 5.0)),
            Command::Branch(Branch::new(0.3, 5.0)),
            Command::Branch(Branch::new(360.0, 5.0)),
            Command::Branch(Branch::new(-540.0, 0.0)),
        ];
        let mut t = Turtle::new(0.0, 0.0, 90.1);
        let out = apply_force(&mut t, &cmds, 0.0, 3.0).unwrap();
        assert_eq!(out, cmds);

        let mut expected = Turtle::new(0.0, 0.0, 90.1);
        replay(&mut expected, &cmds).unwrap();
        assert_eq!(t.pose(), expected.pose());
    }

    #[test]
    fn calm_air_leaves_weightless_branch_alone() {
        let cmds = [Command::Branch(Branch::new(200.0, 1.0).with_resistance(0.0))];
        let mut t = Turtle::default();
        assert_eq!(apply_force(&mut t, &cmds, 45.0, 0.0).unwrap(), cmds);
    }
}
