//! Plants whose growth depends on energy and joint resistance rather than a
//! fixed grammar.

use bonsai_kernel::{Branch, BranchKind, BranchSnapshot, Command, LSystem, LSystemError};
use rand::{Rng, RngCore};

/// Growing stem segment of [`weed_plant`].
pub const STEM: BranchKind = BranchKind(1);
/// Leaf of [`weed_plant`]; never rewritten into anything else.
pub const LEAF: BranchKind = BranchKind(2);

/// Axiom of [`windswept_tree`]; expands into the trunk.
pub const TRUNK_START: BranchKind = BranchKind(1);
/// Growing tip of [`windswept_tree`].
pub const LIMB: BranchKind = BranchKind(2);
/// Finished wood of [`windswept_tree`]; has no rule.
pub const WOOD: BranchKind = BranchKind(3);

/// Stem surplus a weed plant needs before it grows at all.
const GROWTH_SURPLUS: f64 = 10.0;
const LEAF_ENERGY: f64 = 5.0;
const LEAF_RESISTANCE: f64 = 0.2;

/// A weed that lengthens its stems while the energy budget allows, then
/// splits them around a leaf.
///
/// Splits conserve the stem's energy: the two halves share it in proportion
/// to their lengths. Leaves carry their own fixed energy.
pub fn weed_plant(mean_branch_length: u32, mean_leaf_length: u32) -> Result<LSystem, LSystemError> {
    let seed = vec![Command::Branch(
        Branch::new(0.0, 5.0)
            .with_resistance(1.0)
            .with_energy(1.0)
            .with_kind(STEM),
    )];

    LSystem::new(seed, 40)
        .with_rule(STEM, move |s, rng| {
            grow_stem(s, rng, f64::from(mean_branch_length), f64::from(mean_leaf_length))
        })?
        .with_rule(LEAF, |s, _| vec![Command::Branch(s.branch)])
}

fn grow_stem(
    snapshot: &BranchSnapshot,
    rng: &mut dyn RngCore,
    mean_branch_length: f64,
    mean_leaf_length: f64,
) -> Vec<Command> {
    let branch = snapshot.branch;
    if snapshot.energy_surplus <= GROWTH_SURPLUS || branch.length <= 0.0 {
        return vec![Command::Branch(branch)];
    }

    let limit = mean_branch_length + f64::from(rng.random_range(-4i32..4));
    if branch.length < limit {
        let grown = branch.length + 2.0;
        let ratio = grown / branch.length;
        return vec![Command::Branch(
            branch.with_length(grown).with_energy(branch.energy * ratio),
        )];
    }

    // stem lengths stay integral: the seed is 5 and growth adds 2
    let whole = branch.length.round() as i64;
    let lower = if whole - 5 > 5 {
        rng.random_range(5..whole - 5) as f64
    } else {
        branch.length / 2.0
    };
    let upper = branch.length - lower;

    let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    let leaf_length = (mean_leaf_length + f64::from(rng.random_range(-2i32..2))).max(1.0);
    let leaf = Branch::new(rng.random_range(10.0..30.0) * sign, leaf_length)
        .with_energy(LEAF_ENERGY)
        .with_resistance(LEAF_RESISTANCE)
        .with_kind(LEAF);

    tracing::trace!(length = branch.length, lower, upper, "splitting stem");
    vec![
        Command::Branch(
            branch
                .with_length(lower)
                .with_energy(branch.energy * lower / branch.length),
        ),
        Command::Push,
        Command::Branch(leaf),
        Command::Pop,
        Command::Branch(
            branch
                .with_angle(0.0)
                .with_length(upper)
                .with_energy(branch.energy * upper / branch.length),
        ),
    ]
}

/// A tree whose limbs weaken as they fork; combine with
/// [`bonsai_kernel::apply_force`] to bend it in the wind.
///
/// Each fork scales the child limb's resistance by 0.85 to 0.9, and limb
/// length is proportional to resistance. Limbs below 0.05 resistance die off.
pub fn windswept_tree(d: f64) -> Result<LSystem, LSystemError> {
    let seed = vec![Command::Branch(
        Branch::new(0.0, 0.0)
            .with_resistance(1.0)
            .with_energy(1.0)
            .with_kind(TRUNK_START),
    )];

    LSystem::new(seed, 10)
        .with_rule(TRUNK_START, move |s, rng| {
            let energy = s.branch.energy;
            let piece = |angle: f64| {
                Command::Branch(
                    Branch::new(angle, d)
                        .with_energy(energy)
                        .with_resistance(1.0)
                        .with_kind(WOOD),
                )
            };
            let mut trunk = vec![piece(0.0)];
            for _ in 0..2 {
                trunk.push(piece(f64::from(rng.random_range(-10i32..=10))));
            }
            if let Some(Command::Branch(tip)) = trunk.last_mut() {
                tip.kind = LIMB;
            }
            trunk
        })?
        .with_rule(LIMB, move |s, rng| grow_limb(s, rng, d))
}

fn grow_limb(snapshot: &BranchSnapshot, rng: &mut dyn RngCore, d: f64) -> Vec<Command> {
    let limb = snapshot.branch;
    let r = limb.resistance;
    if r <= 0.05 {
        return Vec::new();
    }

    let wood = Command::Branch(limb.with_kind(WOOD));
    if rng.random_bool(0.6) {
        let mut fork = |angles: std::ops::RangeInclusive<i32>| {
            [
                Command::Push,
                Command::Branch(
                    Branch::new(f64::from(rng.random_range(angles)), d * r)
                        .with_energy(limb.energy)
                        .with_resistance(rng.random_range(0.85..0.9) * r)
                        .with_kind(LIMB),
                ),
                Command::Pop,
            ]
        };
        let left = fork(-30..=-20);
        let right = fork(20..=30);
        // gaps are whole units long
        let gap_max = ((d * r) as i64).max(0);
        let gap = Command::Branch(
            Branch::new(0.0, rng.random_range(0..=gap_max) as f64)
                .with_energy(limb.energy)
                .with_resistance(r)
                .with_kind(WOOD),
        );

        let (first, second) = if rng.random_bool(0.5) {
            (left, right)
        } else {
            (right, left)
        };
        let mut out = vec![wood];
        out.extend(first);
        out.push(gap);
        out.extend(second);
        out
    } else {
        vec![
            wood,
            Command::Branch(
                Branch::new(f64::from(rng.random_range(-10i32..=10)), d * r)
                    .with_resistance(0.95 * r)
                    .with_energy(limb.energy)
                    .with_kind(LIMB),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bonsai_common::Pose;
    use bonsai_kernel::{ExpandOptions, Turtle, check_balance};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn snapshot(branch: Branch, energy_surplus: f64) -> BranchSnapshot {
        BranchSnapshot {
            branch,
            energy_surplus,
            pose: Pose::default(),
        }
    }

    fn stem(length: f64, energy: f64) -> Branch {
        Branch::new(0.0, length)
            .with_resistance(1.0)
            .with_energy(energy)
            .with_kind(STEM)
    }

    fn branches(cmds: &[Command]) -> Vec<Branch> {
        cmds.iter().filter_map(Command::branch).copied().collect()
    }

    #[test]
    fn short_stem_grows_with_proportional_energy() {
        let system = weed_plant(20, 5).unwrap();
        let rule = system.rule(STEM).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let out = rule(&snapshot(stem(5.0, 1.0), 50.0), &mut rng).unwrap();
        assert_eq!(out.len(), 1);
        let grown = out[0].branch().unwrap();
        assert_eq!(grown.length, 7.0);
        assert!((grown.energy - 1.4).abs() < 1e-12);
        assert_eq!(grown.kind, STEM);
    }

    #[test]
    fn starved_stem_is_unchanged() {
        let system = weed_plant(20, 5).unwrap();
        let rule = system.rule(STEM).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let b = stem(9.0, 2.0);
        assert_eq!(rule(&snapshot(b, 10.0), &mut rng).unwrap(), vec![Command::Branch(b)]);
    }

    #[test]
    fn long_stem_splits_around_leaf_conserving_energy() {
        let system = weed_plant(20, 5).unwrap();
        let rule = system.rule(STEM).unwrap();

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let parent = stem(30.0, 6.0);
            let out = rule(&snapshot(parent, 50.0), &mut rng).unwrap();

            assert_eq!(out.len(), 5);
            assert_eq!(out[1], Command::Push);
            assert_eq!(out[3], Command::Pop);
            assert!(check_balance(&out).is_ok());

            let parts = branches(&out);
            let (lower, leaf, upper) = (parts[0], parts[1], parts[2]);
            assert_eq!(leaf.kind, LEAF);
            assert_eq!(leaf.energy, 5.0);
            assert!((10.0..=30.0).contains(&leaf.angle.abs()));
            assert!((3.0..=6.0).contains(&leaf.length));

            assert_eq!(upper.angle, 0.0);
            assert!(lower.length >= 5.0);
            assert!((lower.length + upper.length - 30.0).abs() < 1e-12);
            assert!((lower.energy + upper.energy - parent.energy).abs() < 1e-9);
        }
    }

    #[test]
    fn weed_plant_full_expansion() {
        let system = weed_plant(20, 5).unwrap();
        assert_eq!(system.recommended_depth(), 40);
        let mut rng = StdRng::seed_from_u64(3);
        let out = system
            .expand(
                &Turtle::new(0.0, -250.0, 90.0),
                &ExpandOptions::default().with_available_energy(1000.0),
                &mut rng,
            )
            .unwrap();

        assert!(check_balance(&out).is_ok());
        let parts = branches(&out);
        assert!(parts.iter().any(|b| b.kind == LEAF));
        assert!(parts.iter().all(|b| b.length >= 0.0));
    }

    #[test]
    fn trunk_start_builds_three_pieces() {
        let system = windswept_tree(50.0).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let out = system
            .expand(
                &Turtle::default(),
                &ExpandOptions::default().with_depth(1),
                &mut rng,
            )
            .unwrap();

        let parts = branches(&out);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].angle, 0.0);
        assert_eq!(parts[0].kind, WOOD);
        assert_eq!(parts[1].kind, WOOD);
        assert_eq!(parts[2].kind, LIMB);
        assert!(parts.iter().all(|b| b.length == 50.0 && b.resistance == 1.0));
    }

    #[test]
    fn weak_limb_dies() {
        let system = windswept_tree(50.0).unwrap();
        let rule = system.rule(LIMB).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let limb = Branch::new(0.0, 2.0).with_resistance(0.04).with_kind(LIMB);
        assert!(rule(&snapshot(limb, 0.0), &mut rng).unwrap().is_empty());
    }

    #[test]
    fn limbs_weaken_as_they_grow() {
        let system = windswept_tree(50.0).unwrap();
        let rule = system.rule(LIMB).unwrap();

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let limb = Branch::new(0.0, 40.0).with_resistance(0.8).with_kind(LIMB);
            let out = rule(&snapshot(limb, 0.0), &mut rng).unwrap();

            assert!(check_balance(&out).is_ok());
            assert_eq!(out[0], Command::Branch(limb.with_kind(WOOD)));
            for child in branches(&out).iter().filter(|b| b.kind == LIMB) {
                assert!(child.resistance < 0.8);
                assert!(child.resistance >= 0.8 * 0.85 - 1e-12);
                assert!((child.length - 40.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn windswept_tree_full_expansion() {
        let system = windswept_tree(50.0).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let out = system
            .expand(&Turtle::default(), &ExpandOptions::default(), &mut rng)
            .unwrap();

        assert!(check_balance(&out).is_ok());
        let parts = branches(&out);
        assert!(parts.len() > 3);
        assert!(parts.iter().all(|b| b.resistance.is_finite() && b.resistance > 0.0));
    }

    #[test]
    fn negative_unit_length_still_grows() {
        let system = windswept_tree(-10.0).unwrap();
        let rule = system.rule(LIMB).unwrap();
        let limb = Branch::new(0.0, -8.0).with_resistance(0.8).with_kind(LIMB);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = rule(&snapshot(limb, 0.0), &mut rng).unwrap();
            assert!(check_balance(&out).is_ok());
            // gaps collapse to nothing rather than going negative
            assert!(
                branches(&out)
                    .iter()
                    .filter(|b| b.kind == WOOD && b.angle == 0.0 && b.resistance == 0.8)
                    .all(|b| b.length <= 0.0)
            );
        }
    }
}
