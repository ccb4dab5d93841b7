use crate::command::BranchKind;

/// Errors from walking a command sequence.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InterpretError {
    /// A `Pop` arrived while the state stack was empty.
    #[error("unbalanced stack: pop at command {index} has no matching push")]
    UnbalancedStack { index: usize },
    /// The sequence ended with saved poses still on the stack.
    #[error("unbalanced stack: {open} push command(s) never popped")]
    UnclosedPush { open: usize },
}

/// Error type fallible production rules return.
pub type RuleError = Box<dyn std::error::Error + Send + Sync>;

/// Errors from configuring or expanding an [`crate::LSystem`].
#[derive(Debug, thiserror::Error)]
pub enum LSystemError {
    #[error("a rule for branch kind {0} is already registered")]
    DuplicateRule(BranchKind),
    #[error(transparent)]
    Interpret(#[from] InterpretError),
    /// A rule gave up; `source` is the rule's own error.
    #[error("rule for branch kind {kind} failed: {source}")]
    Rule {
        kind: BranchKind,
        #[source]
        source: RuleError,
    },
}
