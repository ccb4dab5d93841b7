use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag selecting which production rule applies to a [`Branch`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BranchKind(pub u32);

impl BranchKind {
    /// Kind carried by branches that were not given one explicitly.
    pub const DEFAULT: BranchKind = BranchKind(0);
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A directed segment: turn by `angle`, then move `length` forward.
///
/// `Branch` is `Copy`; the `with_*` methods produce a copy that differs from
/// `self` only in the named field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    /// Heading change in degrees, applied before advancing.
    pub angle: f64,
    /// Forward distance in cursor units. Rules must keep this non-negative.
    pub length: f64,
    /// Stiffness of the joint at the start of the segment. Infinite means rigid.
    #[serde(
        default = "infinite_resistance",
        skip_serializing_if = "is_infinite"
    )]
    pub resistance: f64,
    /// Energy consumed by this segment alone, not counting children.
    #[serde(default = "unit_energy")]
    pub energy: f64,
    #[serde(default)]
    pub kind: BranchKind,
}

fn infinite_resistance() -> f64 {
    f64::INFINITY
}

fn unit_energy() -> f64 {
    1.0
}

fn is_infinite(value: &f64) -> bool {
    value.is_infinite()
}

impl Branch {
    /// Segment with default resistance, energy and kind.
    pub fn new(angle: f64, length: f64) -> Self {
        Self {
            angle,
            length,
            resistance: f64::INFINITY,
            energy: 1.0,
            kind: BranchKind::DEFAULT,
        }
    }

    /// Zero-length segment that only changes the heading.
    pub fn turn(angle: f64) -> Self {
        Self::new(angle, 0.0)
    }

    pub fn with_angle(self, angle: f64) -> Self {
        Self { angle, ..self }
    }

    pub fn with_length(self, length: f64) -> Self {
        Self { length, ..self }
    }

    pub fn with_resistance(self, resistance: f64) -> Self {
        Self { resistance, ..self }
    }

    pub fn with_energy(self, energy: f64) -> Self {
        Self { energy, ..self }
    }

    pub fn with_kind(self, kind: BranchKind) -> Self {
        Self { kind, ..self }
    }
}

/// One instruction in a command sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Save the cursor pose.
    Push,
    /// Restore the most recently saved pose.
    Pop,
    Branch(Branch),
}

impl Command {
    pub fn branch(&self) -> Option<&Branch> {
        match self {
            Self::Branch(b) => Some(b),
            Self::Push | Self::Pop => None,
        }
    }
}

impl From<Branch> for Command {
    fn from(branch: Branch) -> Self {
        Self::Branch(branch)
    }
}

/// Sum of `energy` over every branch in `commands`.
pub fn total_energy(commands: &[Command]) -> f64 {
    commands
        .iter()
        .filter_map(Command::branch)
        .map(|b| b.energy)
        .sum()
}
