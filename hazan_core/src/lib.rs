/*!
Core of Hazan's sparse approximation solver for semidefinite programs.

<script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
<script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>

[`solver::Solver`] approximately maximizes a concave \\(f(X)\\)
over \\(\lbrace X \succeq 0,\ {\bf Tr}\ X = 1 \rbrace\\)
by rank-one Frank-Wolfe steps toward the top eigenvector of \\(\nabla f(X)\\).
It does not rely on dynamic heap allocation; see the `hazan` crate for problems built on it.
*/

#![no_std]

pub mod solver;

//

mod floatgeneric;

pub use floatgeneric::*;

//

mod eig_dense;
mod eig_lanczos;
mod eig_select;

pub use eig_dense::*;
pub use eig_lanczos::*;
pub use eig_select::*;

//

mod objfn;

pub use objfn::*;
