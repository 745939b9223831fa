//! Diagnostics sink
//!
//! Discovery never fails the build, so its problems only surface as
//! trace-level messages handed to whatever sink the caller passes in.

/// Receives trace-level diagnostics
pub trait Diagnostics {
    /// Records a message under a short context label (e.g. "discover")
    fn trace(&self, context: &str, message: &str);
}

/// Discards every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn trace(&self, _context: &str, _message: &str) {}
}

#[cfg(test)]
pub(crate) use recorded::RecordedDiagnostics;
