//! Deterministic textbook fractals, plus one stochastic field of flowers.

use bonsai_kernel::{Branch, BranchKind, Command, LSystem, LSystemError};
use rand::Rng;

/// Kind carried by the segments that get rewritten.
pub const FORWARD: BranchKind = BranchKind(1);

fn forward(length: f64) -> Command {
    Command::Branch(Branch::new(0.0, length).with_kind(FORWARD))
}

fn turn(angle: f64) -> Command {
    Command::Branch(Branch::turn(angle))
}

/// Quadratic Koch island: a square whose edges fold into bays and capes.
pub fn koch_island(d: f64) -> Result<LSystem, LSystemError> {
    let f = forward(d);
    let (tp, tn) = (turn(90.0), turn(-90.0));
    let production = vec![f, tn, f, tp, f, tp, f, f, tn, f, tn, f, tp, f];

    LSystem::new(vec![f, tn, f, tn, f, tn, f], 4)
        .with_rule(FORWARD, move |_, _| production.clone())
}

/// Heighway dragon, using two segment kinds that rewrite into each other.
pub fn dragon_curve(d: f64) -> Result<LSystem, LSystemError> {
    const T1: BranchKind = BranchKind(1);
    const T2: BranchKind = BranchKind(2);

    let f1 = Command::Branch(Branch::new(0.0, d).with_kind(T1));
    let f2 = Command::Branch(Branch::new(0.0, d).with_kind(T2));
    let (tp, tn) = (turn(90.0), turn(-90.0));

    LSystem::new(vec![f1], 10)
        .with_rule(T1, move |_, _| vec![f1, tp, f2, tp])?
        .with_rule(T2, move |_, _| vec![tn, f1, tn, f2])
}

/// Bracketed bush with two lateral fans per segment.
pub fn bushy_tree(d: f64) -> Result<LSystem, LSystemError> {
    let f = forward(d);
    let (tp, tn) = (turn(22.5), turn(-22.5));
    let (push, pop) = (Command::Push, Command::Pop);
    let production = vec![
        f, f, tn, push, tn, f, tp, f, tp, f, pop, tp, push, tp, f, tn, f, tn, f, pop,
    ];

    LSystem::new(vec![f], 4).with_rule(FORWARD, move |_, _| production.clone())
}

/// Stochastic stems that sprout a left shoot, a right shoot, or both.
pub fn flower_field(d: f64) -> Result<LSystem, LSystemError> {
    let f = forward(d);
    let (tp, tn) = (turn(30.0), turn(-30.0));
    let (push, pop) = (Command::Push, Command::Pop);

    LSystem::new(vec![f], 4).with_rule(FORWARD, move |_, rng| {
        let r: f64 = rng.random();
        if r <= 0.33 {
            vec![f, push, tp, f, pop, f, push, tn, f, pop, f]
        } else if r <= 0.66 {
            vec![f, push, tp, f, pop, f]
        } else {
            vec![f, push, tn, f, pop, f]
        }
    })
}

/// Cesàro-style curve: each segment grows a narrow triangular spike.
///
/// The spike is placed at 30% of the segment; its sides are sized so the
/// four pieces keep the curve's endpoints roughly fixed.
pub fn triangle_koch(d: f64) -> Result<LSystem, LSystemError> {
    const P: f64 = 0.3;
    const Q: f64 = 1.0 - P;
    let h = (P * Q).sqrt();
    let (tp, tn) = (turn(86.0), turn(-86.0));

    LSystem::new(vec![forward(d)], 4).with_rule(FORWARD, move |s, _| {
        let x = s.branch.length;
        vec![
            forward(x * P),
            tp,
            forward(x * h),
            tn,
            tn,
            forward(x * h),
            tp,
            forward(x * Q),
        ]
    })
}
