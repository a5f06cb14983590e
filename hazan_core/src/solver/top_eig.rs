//! Top eigenpair extraction

use crate::solver::{LinAlg, SolverError};

/// Top eigenpair extractor trait
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
pub trait TopEig<L: LinAlg>
{
    /// Finds the largest eigenvalue \\(\lambda_{\max}\\) of a symmetric matrix \\(G\\) and its unit eigenvector.
    /// This is called by [`crate::solver::Solver::solve`] with passing the gradient as `mat`.
    ///
    /// Returns `Ok` with \\(\lambda_{\max}\\), or `Err` if something fails.
    /// * `n` is a number of rows and columns of \\(G\\).
    /// * `mat` is \\(G\\) stored in column-major.
    /// * `tol` is a relative tolerance of the eigenpair residual.
    /// * `vec` is a starting vector before entry (implementations may ignore it),
    ///   and shall be replaced with the unit eigenvector on exit.
    fn top_eig(&mut self, n: usize, mat: &[L::F], tol: L::F, vec: &mut[L::F]) -> Result<L::F, SolverError>;
}
