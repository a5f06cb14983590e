/// Solver errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolverError
{
    /// Top eigenpair extraction did not converge.
    EigenConvergence,
    /// Shapes of matrices disagree with the problem dimension.
    DimensionMismatch,
    /// Search over the trace scale exceeded its max iterations.
    BinarySearchDidNotConverge,
    /// Gradient is materially non-symmetric.
    AsymmetricGradient,
    /// NaN or infinity found in a computed value.
    NonFiniteValue,

    /// Invalid parameter or argument.
    InvalidParam,
    /// Shortage of work slice length.
    WorkShortage,
}

impl core::fmt::Display for SolverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", match &self {
            SolverError::EigenConvergence           => "EigenConvergence: top eigenpair extraction did not converge",
            SolverError::DimensionMismatch          => "DimensionMismatch: matrix shapes disagree with dimension",
            SolverError::BinarySearchDidNotConverge => "BinarySearchDidNotConverge: trace scale search exceeded max iterations",
            SolverError::AsymmetricGradient         => "AsymmetricGradient: gradient is not symmetric",
            SolverError::NonFiniteValue             => "NonFiniteValue: found NaN or infinity",
            SolverError::InvalidParam               => "InvalidParam: invalid parameter or argument",
            SolverError::WorkShortage               => "WorkShortage: shortage of work slice length",
        })
    }
}

//

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "std")]
impl std::error::Error for SolverError {}
