//! Bonsai kernel: command model, stack interpreter, L-system rewrite engine.
//!
//! # Invariants
//! - Expansion never mutates the caller's cursor, seed, or rule table.
//! - Every `Pop` has a matching earlier `Push` within the same pass, or the pass fails.
//! - The engine performs no I/O and holds no global state; all randomness is
//!   supplied by the caller.

pub mod command;
pub mod cursor;
pub mod error;
pub mod force;
pub mod interpreter;
pub mod lsystem;

pub use command::{Branch, BranchKind, Command, total_energy};
pub use cursor::{Cursor, Turtle, TurtleSnapshot};
pub use error::{InterpretError, LSystemError, RuleError};
pub use force::{apply_force, interpolate_headings, sigmoid};
pub use interpreter::{check_balance, interpret, replay, try_interpret};
pub use lsystem::{BranchSnapshot, ExpandOptions, LSystem, ProductionRule};

pub fn crate_info() -> &'static str {
    "bonsai-kernel v0.1.0"
}
