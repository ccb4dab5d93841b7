//! Rule-table-driven rewrite engine.
//!
//! An [`LSystem`] owns a seed sequence and at most one production rule per
//! [`BranchKind`]. Each expansion round recomputes one energy surplus for the
//! whole sequence, then rewrites every branch through [`try_interpret`], so rules
//! see the pose each branch starts from.

use std::collections::BTreeMap;
use std::fmt;

use bonsai_common::Pose;
use rand::RngCore;

use crate::command::{Branch, BranchKind, Command, total_energy};
use crate::cursor::Cursor;
use crate::error::{LSystemError, RuleError};
use crate::interpreter::try_interpret;

/// A production rule: maps a branch in context to its replacement.
///
/// Rules draw randomness only from the generator they are handed. Rules
/// registered through [`LSystem::add_rule`] never fail.
pub type ProductionRule = Box<
    dyn Fn(&BranchSnapshot, &mut dyn RngCore) -> Result<Vec<Command>, RuleError> + Send + Sync,
>;

/// Context handed to a rule for a single branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchSnapshot {
    /// The branch being rewritten.
    pub branch: Branch,
    /// `max(available_energy - total_energy, 0)` for the whole sequence this round.
    pub energy_surplus: f64,
    /// Cursor pose just before the branch is applied.
    pub pose: Pose,
}

/// Knobs for [`LSystem::expand`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandOptions {
    /// Number of rounds. `None` uses the system's recommended depth.
    pub depth: Option<u32>,
    /// Energy ceiling the surplus is computed against.
    pub available_energy: f64,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            depth: None,
            available_energy: 100.0,
        }
    }
}

impl ExpandOptions {
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn with_available_energy(mut self, available_energy: f64) -> Self {
        self.available_energy = available_energy;
        self
    }
}

/// Seed sequence plus per-kind production rules.
pub struct LSystem {
    seed: Vec<Command>,
    rules: BTreeMap<BranchKind, ProductionRule>,
    recommended_depth: u32,
}

impl LSystem {
    /// Depth used by systems that do not pick one.
    pub const DEFAULT_DEPTH: u32 = 3;

    pub fn new(seed: impl Into<Vec<Command>>, recommended_depth: u32) -> Self {
        Self {
            seed: seed.into(),
            rules: BTreeMap::new(),
            recommended_depth,
        }
    }

    pub fn seed(&self) -> &[Command] {
        &self.seed
    }

    pub fn recommended_depth(&self) -> u32 {
        self.recommended_depth
    }

    /// Register `rule` for branches of `kind`.
    ///
    /// Fails if `kind` already has a rule; the existing rule is kept.
    pub fn add_rule<F>(&mut self, kind: BranchKind, rule: F) -> Result<&mut Self, LSystemError>
    where
        F: Fn(&BranchSnapshot, &mut dyn RngCore) -> Vec<Command> + Send + Sync + 'static,
    {
        self.insert(
            kind,
            Box::new(move |s: &BranchSnapshot, rng: &mut dyn RngCore| {
                Ok::<_, RuleError>(rule(s, rng))
            }),
        )
    }

    /// Register a rule that may refuse a branch.
    ///
    /// An error from `rule` aborts [`LSystem::expand`] as
    /// [`LSystemError::Rule`], carrying the rule's error untouched.
    pub fn add_fallible_rule<F, E>(
        &mut self,
        kind: BranchKind,
        rule: F,
    ) -> Result<&mut Self, LSystemError>
    where
        F: Fn(&BranchSnapshot, &mut dyn RngCore) -> Result<Vec<Command>, E>
            + Send
            + Sync
            + 'static,
        E: Into<RuleError>,
    {
        self.insert(
            kind,
            Box::new(move |s: &BranchSnapshot, rng: &mut dyn RngCore| {
                rule(s, rng).map_err(Into::<RuleError>::into)
            }),
        )
    }

    fn insert(&mut self, kind: BranchKind, rule: ProductionRule) -> Result<&mut Self, LSystemError> {
        if self.rules.contains_key(&kind) {
            return Err(LSystemError::DuplicateRule(kind));
        }
        tracing::trace!(%kind, "registered production rule");
        self.rules.insert(kind, rule);
        Ok(self)
    }

    /// Register `rule` for branches carrying [`BranchKind::DEFAULT`].
    pub fn add_default_rule<F>(&mut self, rule: F) -> Result<&mut Self, LSystemError>
    where
        F: Fn(&BranchSnapshot, &mut dyn RngCore) -> Vec<Command> + Send + Sync + 'static,
    {
        self.add_rule(BranchKind::DEFAULT, rule)
    }

    /// By-value form of [`LSystem::add_rule`], for building a system in one expression.
    pub fn with_rule<F>(mut self, kind: BranchKind, rule: F) -> Result<Self, LSystemError>
    where
        F: Fn(&BranchSnapshot, &mut dyn RngCore) -> Vec<Command> + Send + Sync + 'static,
    {
        self.add_rule(kind, rule)?;
        Ok(self)
    }

    pub fn rule(&self, kind: BranchKind) -> Option<&ProductionRule> {
        self.rules.get(&kind)
    }

    pub fn has_rule(&self, kind: BranchKind) -> bool {
        self.rules.contains_key(&kind)
    }

    /// Kinds with a registered rule, in ascending order.
    pub fn kinds(&self) -> impl Iterator<Item = BranchKind> + '_ {
        self.rules.keys().copied()
    }

    /// Rewrite the seed for the configured number of rounds.
    ///
    /// Every round runs on a fresh clone of `cursor`, so the caller's cursor
    /// is left untouched. Returns the flat, fully expanded sequence.
    pub fn expand<C>(
        &self,
        cursor: &C,
        options: &ExpandOptions,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Command>, LSystemError>
    where
        C: Cursor + Clone,
    {
        let depth = options.depth.unwrap_or(self.recommended_depth);
        let _span = tracing::info_span!(
            "expand",
            depth,
            available_energy = options.available_energy
        )
        .entered();

        let mut output = self.seed.clone();
        for round in 0..depth {
            let mut scratch = cursor.clone();
            output = self.step(&mut scratch, &output, options.available_energy, rng)?;
            tracing::debug!(round, commands = output.len(), "expansion round complete");
        }

        tracing::info!(commands = output.len(), "expansion finished");
        Ok(output)
    }

    /// One expansion round over `commands`.
    fn step<C: Cursor>(
        &self,
        cursor: &mut C,
        commands: &[Command],
        available_energy: f64,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Command>, LSystemError> {
        let total = total_energy(commands);
        let surplus = (available_energy - total).max(0.0);
        tracing::debug!(total_energy = total, surplus, "energy budget for round");

        try_interpret(cursor, commands, |pose, branch| match self.rules.get(&branch.kind) {
            Some(rule) => {
                let snapshot = BranchSnapshot {
                    branch: *branch,
                    energy_surplus: surplus,
                    pose: *pose,
                };
                rule(&snapshot, &mut *rng).map_err(|source| LSystemError::Rule {
                    kind: branch.kind,
                    source,
                })
            }
            None => Ok(vec![Command::Branch(*branch)]),
        })
    }
}

impl fmt::Debug for LSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LSystem")
            .field("seed", &self.seed)
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .field("recommended_depth", &self.recommended_depth)
            .finish()
    }
}
