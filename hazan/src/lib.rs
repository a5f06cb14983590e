/*!
Hazan's sparse approximation of semidefinite programs.

<script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
<script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>

This crate for Rust provides **bounded-trace and general semidefinite problems** that can be solved by [`hazan_core`].

# General usage

1. A problem you want to solve is assumed to be expressed as either
   * maximizing a concave \\(f(X)\\) over \\(X \succeq 0,\ {\bf Tr}\ X = 1\\): [`ProbBoundedTrace`], or
   * finding \\(X \succeq 0\\) of \\({\bf Tr}(A_i X) \le b_i + \epsilon\\): [`ProbGeneral`].
1. Choose a [`hazan_core::solver::LinAlg`] implementation to use:
   * [`prelude::FloatGeneric`] -
     `num::Float`-generic, pure Rust.
1. Construct your problem with matrices using [`MatBuild`].
1. Create a [`prelude::Solver`] or [`GeneralSolver`] instance and optionally set its parameters.
1. Feed the problem to the solver and invoke its `solve` to get a resulted solution.

# Examples

A general problem of one dimension:
\\[
\begin{array}{ll}
x \ge 0 \\\\
{\rm s.t.} & 1.5 x \le 1 + \epsilon.
\end{array}
\\]

The search starts from the trace scale \\(1\\), which violates the constraint,
and halves it to \\(0.5\\).

```
use float_eq::assert_float_eq;
use hazan::prelude::*;
use hazan::*;

//env_logger::init(); // Use any logger crate as `hazan` uses `log` crate.

type La = FloatGeneric<f64>;
type AMatBuild = MatBuild<La>;
type AProbGeneral = ProbGeneral<La>;
type AGeneralSolver = GeneralSolver<La>;

let sym_a = AMatBuild::new(1).iter_rowmaj(&[1.5]);

let mut prob = AProbGeneral::new(1, vec![sym_a], vec![1.], 0.1).unwrap();

let s = AGeneralSolver::new().par(|p| {
   p.max_iter = 10;
});
let rslt = s.solve(&mut prob).unwrap();

assert_float_eq!(rslt.x_trace, 0.5, abs <= 1e-12);
assert_float_eq!(rslt.x[(0, 0)], 0.5, abs <= 1e-12);
assert_float_eq!(rslt.fx, 0.25, abs <= 1e-12);
```

A bounded-trace problem maximizing \\(-\sum_i X_{ii}^2\\):

```
use float_eq::assert_float_eq;
use hazan::prelude::*;
use hazan::*;

type La = FloatGeneric<f64>;

let n = 2;
let obj = ObjFn::<La, _, _>::new(n,
    |x: &[f64]| -(0.. n).map(|i| x[i * n + i] * x[i * n + i]).sum::<f64>(),
    |x: &[f64], g: &mut[f64]| {
        g.fill(0.);
        for i in 0.. n {
            g[i * n + i] = -2. * x[i * n + i];
        }
    }
);

let mut prob = ProbBoundedTrace::<La, _>::new(obj, 100, Some(1.));

let s = Solver::<La>::new();
let p = prob.problem(&s.par);
let x = s.solve(p).unwrap();

assert_float_eq!(x[0] + x[3], 1., abs <= 1e-9);
assert_float_eq!(x[0], 0.5, abs <= 0.01);
```
*/

mod matbuild;

pub use matbuild::*;

//

mod problem;

pub use problem::*;

//

mod general_solver;

pub use general_solver::*;

//

pub mod env;

//

/// Prelude
pub mod prelude
{
   pub use hazan_core::solver::{Solver, SolverError, SolverParam, Objective};
   pub use hazan_core::{FloatGeneric, ObjFn};
}
