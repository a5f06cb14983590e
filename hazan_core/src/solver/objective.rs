//! Concave objective

use crate::solver::LinAlg;

/// Concave objective trait
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Expresses a concave function \\(f: \mathbb{R}^{n \times n} \to \mathbb{R}\\)
/// to be maximized over \\(\lbrace X \in \mathcal{S}\_+^n \mid {\bf Tr}\ X = 1 \rbrace\\).
/// Matrices are stored in column-major, `n * n` elements.
pub trait Objective<L: LinAlg>
{
    /// Dimension \\(n\\) of the matrix variable.
    fn dim(&self) -> usize;

    /// Calculate \\(f(X)\\).
    ///
    /// * `x` is \\(X\\).
    fn value(&self, x: &[L::F]) -> L::F;

    /// Calculate \\(\nabla f(X)\\).
    ///
    /// * `x` is \\(X\\).
    /// * `g` is \\(\nabla f(X)\\) on exit, the same length as `x`.
    fn grad(&self, x: &[L::F], g: &mut[L::F]);
}

impl<L: LinAlg, O: Objective<L>> Objective<L> for &O
{
    fn dim(&self) -> usize
    {
        (**self).dim()
    }

    fn value(&self, x: &[L::F]) -> L::F
    {
        (**self).value(x)
    }

    fn grad(&self, x: &[L::F], g: &mut[L::F])
    {
        (**self).grad(x, g)
    }
}
