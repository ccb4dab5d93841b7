//! Stack-based command interpreter.
//!
//! Two modes share the same Push/Pop semantics:
//! - [`interpret`] rewrites: every branch is handed to a handler, and the
//!   handler's replacement is both replayed on the cursor and emitted.
//! - [`replay`] only moves the cursor.
//!
//! [`try_interpret`] is the rewriting mode for handlers that can fail.
//!
//! Each pass owns its own state stack, created empty and dropped on return.

use bonsai_common::Pose;

use crate::command::{Branch, Command};
use crate::cursor::Cursor;
use crate::error::InterpretError;

/// LIFO of saved cursor states for a single pass.
struct StateStack<S> {
    saved: Vec<S>,
}

impl<S> StateStack<S> {
    fn new() -> Self {
        Self { saved: Vec::new() }
    }

    fn push(&mut self, state: S) {
        self.saved.push(state);
    }

    fn pop(&mut self, index: usize) -> Result<S, InterpretError> {
        self.saved
            .pop()
            .ok_or(InterpretError::UnbalancedStack { index })
    }

    /// Consume the stack at the end of a pass, reporting leftover pushes.
    fn finish(self, mode: &'static str) {
        if !self.saved.is_empty() {
            tracing::warn!(
                mode,
                open = self.saved.len(),
                "pass ended with unmatched push commands"
            );
        }
    }
}

/// Walk `commands`, replacing each branch with `handler(pose_before, branch)`.
///
/// The replacement is replayed on `cursor` so later commands see the pose the
/// rewritten geometry leads to. Push and Pop are emitted unchanged. Returns the
/// rewritten sequence; fails on a Pop with nothing to restore, whether in
/// `commands` itself or inside a replacement.
pub fn interpret<C, F>(
    cursor: &mut C,
    commands: &[Command],
    mut handler: F,
) -> Result<Vec<Command>, InterpretError>
where
    C: Cursor,
    F: FnMut(&Pose, &Branch) -> Vec<Command>,
{
    try_interpret(cursor, commands, |pose, branch| Ok(handler(pose, branch)))
}

/// [`interpret`] with a handler that may fail.
///
/// The first handler error stops the walk and is returned as is; no later
/// branch reaches the handler.
pub fn try_interpret<C, F, E>(
    cursor: &mut C,
    commands: &[Command],
    mut handler: F,
) -> Result<Vec<Command>, E>
where
    C: Cursor,
    F: FnMut(&Pose, &Branch) -> Result<Vec<Command>, E>,
    E: From<InterpretError>,
{
    let mut stack = StateStack::new();
    let mut output = Vec::with_capacity(commands.len());

    for (index, cmd) in commands.iter().enumerate() {
        match cmd {
            Command::Push => {
                stack.push(cursor.snapshot());
                output.push(Command::Push);
            }
            Command::Pop => {
                let saved = stack.pop(index)?;
                cursor.restore(&saved);
                output.push(Command::Pop);
            }
            Command::Branch(branch) => {
                let pose_before = cursor.pose();
                let replacement = handler(&pose_before, branch)?;
                replay(cursor, &replacement)?;
                output.extend(replacement);
            }
        }
    }

    stack.finish("interpret");
    Ok(output)
}

/// Apply the pose semantics of `commands` to `cursor` without rewriting.
pub fn replay<C: Cursor>(cursor: &mut C, commands: &[Command]) -> Result<(), InterpretError> {
    let mut stack = StateStack::new();

    for (index, cmd) in commands.iter().enumerate() {
        match cmd {
            Command::Push => stack.push(cursor.snapshot()),
            Command::Pop => {
                let saved = stack.pop(index)?;
                cursor.restore(&saved);
            }
            Command::Branch(branch) => {
                cursor.turn(branch.angle);
                cursor.advance(branch.length);
            }
        }
    }

    stack.finish("replay");
    Ok(())
}

/// Check Push/Pop pairing without touching a cursor.
///
/// Stricter than the walkers: a sequence that leaves pushes open is rejected.
pub fn check_balance(commands: &[Command]) -> Result<(), InterpretError> {
    let mut depth = 0usize;
    for (index, cmd) in commands.iter().enumerate() {
        match cmd {
            Command::Push => depth += 1,
            Command::Pop => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(InterpretError::UnbalancedStack { index })?;
            }
            Command::Branch(_) => {}
        }
    }
    if depth > 0 {
        return Err(InterpretError::UnclosedPush { open: depth });
    }
    Ok(())
}
