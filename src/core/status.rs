//! Status codes for integrators

/// Outcome of a low-level integration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Reached the end of the span.
    Success,
    /// The step observer returned [`ControlFlag::Interrupt`](crate::ControlFlag::Interrupt).
    UserInterrupt,
    /// The step budget was exhausted.
    NeedLargerNMax,
    /// The required step size fell below the minimum.
    StepSizeTooSmall,
    /// A trial state or derivative became non-finite.
    Diverged,
}

impl Status {
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success)
    }
}
