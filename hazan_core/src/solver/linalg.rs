//! Linear algebra

use num_traits::Float;
use core::fmt::{Debug, LowerExp};

/// Linear algebra trait.
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Square matrices are stored in column-major, `n * n` elements.
pub trait LinAlg
{
    /// Floating point data type used as scalars.
    type F: Float + Debug + LowerExp;

    /// Calculate 2-norm (or euclidean norm) \\(\\|x\\|_2=\sqrt{\sum_i x_i^2}\\).
    /// Applied to a stored matrix, this is its Frobenius norm.
    ///
    /// Returns the calculated norm.
    /// * `x` is a vector \\(x\\).
    fn norm(x: &[Self::F]) -> Self::F;

    /// Calculate \\(x^T y\\).
    ///
    /// * `x` and `y` shall have the same length.
    fn inner_prod(x: &[Self::F], y: &[Self::F]) -> Self::F;

    /// Copy from a vector to another vector.
    ///
    /// * `x` is a slice to copy.
    /// * `y` is a slice being copied to.
    ///   `x` and `y` shall have the same length.
    fn copy(x: &[Self::F], y: &mut[Self::F]);

    /// Calculate \\(\alpha x\\).
    ///
    /// * `alpha` is a scalar \\(\alpha\\).
    /// * `x` is a vector \\(x\\) before entry, \\(\alpha x\\) on exit.
    fn scale(alpha: Self::F, x: &mut[Self::F]);

    /// Calculate \\(\alpha x + y\\).
    ///
    /// * `alpha` is a scalar \\(\alpha\\).
    /// * `x` is a vector \\(x\\).
    /// * `y` is a vector \\(y\\) before entry, \\(\alpha x + y\\) on exit.
    ///   `x` and `y` shall have the same length.
    fn add(alpha: Self::F, x: &[Self::F], y: &mut[Self::F]);

    /// Calculates \\(\alpha G x + \beta y\\).
    ///
    /// * If `transpose` is `true`, Calculate \\(\alpha G^T x + \beta y\\) instead.
    /// * `n_row` is a number of rows of \\(G\\).
    /// * `n_col` is a number of columns of \\(G\\).
    /// * `mat` is a matrix \\(G\\), stored in column-major.
    ///   The length of `mat` shall be `n_row * n_col`.
    /// * `x` is a vector \\(x\\).
    ///   The length of `x` shall be `n_col` (or `n_row` if `transpose` is `true`).
    /// * `y` is a vector \\(y\\) before entry,
    ///   \\(\alpha G x + \beta y\\) (or \\(\alpha G^T x + \beta y\\) if `transpose` is `true`) on exit.
    fn transform_ge(transpose: bool, n_row: usize, n_col: usize, alpha: Self::F, mat: &[Self::F], x: &[Self::F], beta: Self::F, y: &mut[Self::F]);

    /// Calculates \\(S + \alpha x x^T\\).
    ///
    /// * `n` is a number of rows and columns of \\(S\\), and the length of `x`.
    /// * `mat` is \\(S\\) before entry, \\(S + \alpha x x^T\\) on exit.
    fn rank1op(n: usize, alpha: Self::F, x: &[Self::F], mat: &mut[Self::F]);

    /// Calculates \\({\bf Tr}(A B)\\) of two `n`-by-`n` matrices.
    fn trace_prod(n: usize, mat_a: &[Self::F], mat_b: &[Self::F]) -> Self::F;

    /// Query of a length of work slice that [`LinAlg::sym_eig`] requires.
    ///
    /// Returns a length of work slice.
    /// * `n` is a number of rows and columns of \\(S\\).
    fn sym_eig_worklen(n: usize) -> usize;

    /// Eigenvalue decomposition of a symmetric matrix: \\(S \rightarrow V \mathbf{diag}(\lambda) V^T\\).
    ///
    /// Returns `Ok`, or `Err` if it does not converge within `max_sweep`.
    /// * `n` is a number of rows and columns of \\(S\\).
    /// * `mat` is \\(S\\), which is destroyed on exit.
    /// * `eps_zero` is a relative tolerance of off-diagonal elements to be regarded as zero.
    /// * `max_sweep` is a maximum number of sweeps over all the off-diagonal elements.
    /// * `eigval` is \\(\lambda\\) on exit. The length shall be `n`.
    /// * `eigvec` is \\(V\\) stored in column-major on exit. The length shall be `n * n`.
    /// * `work` slice is used for temporal variables.
    fn sym_eig(n: usize, mat: &mut[Self::F], eps_zero: Self::F, max_sweep: usize,
        eigval: &mut[Self::F], eigvec: &mut[Self::F], work: &mut[Self::F]) -> Result<(), ()>;
}
