//! Error types for exact geometric operations.

use thiserror::Error;

/// Errors that can occur during exact geometric operations.
///
/// Degenerate input geometry (zero-length edges, coincident vertices,
/// fewer than three distinct points) is never an error; such paths are
/// simply handled or discarded by the operations themselves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExactError {
    /// The clipping engine detected an impossible internal state.
    ///
    /// The active-edge or output-ring graph became inconsistent mid-sweep.
    /// Any partial output must be discarded; `Clipper64::clear` restores a
    /// usable engine.
    #[error("clipping engine entered an inconsistent state")]
    InternalInconsistency,
}
