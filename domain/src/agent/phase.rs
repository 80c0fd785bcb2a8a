//! Orchestrator lifecycle phases.

use serde::{Deserialize, Serialize};

/// Phase of one orchestrator run.
///
/// ```text
/// Received → Planning → Executing(0..n) → Synthesizing → Completed
/// ```
///
/// `Completed` is the only terminal phase, reached even when every tool
/// failed or the run timed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "phase", content = "step")]
pub enum ExecutionPhase {
    Received,
    Planning,
    /// Executing the step at this zero-based plan index
    Executing(usize),
    Synthesizing,
    Completed,
}

impl ExecutionPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExecutionPhase::Completed)
    }

    /// Whether `next` is a legal successor of this phase.
    pub fn can_advance_to(&self, next: ExecutionPhase) -> bool {
        use ExecutionPhase::*;
        match (self, next) {
            (Received, Planning) => true,
            (Planning, Executing(0)) | (Planning, Synthesizing) => true,
            (Executing(i), Executing(j)) => j == i + 1,
            (Executing(_), Synthesizing) => true,
            // Fatal errors and timeouts jump straight to completion
            (_, Completed) => !self.is_terminal(),
            _ => false,
        }
    }
}

impl std::fmt::Display for ExecutionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionPhase::Received => write!(f, "received"),
            ExecutionPhase::Planning => write!(f, "planning"),
            ExecutionPhase::Executing(i) => write!(f, "executing step {}", i + 1),
            ExecutionPhase::Synthesizing => write!(f, "synthesizing"),
            ExecutionPhase::Completed => write!(f, "completed"),
        }
    }
}
