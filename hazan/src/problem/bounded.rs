use core::marker::PhantomData;
use num_traits::Zero;
use hazan_core::solver::{Solver, SolverParam, LinAlg, Objective};

//

/// Bounded-trace problem
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// The problem is
/// \\[
/// \begin{array}{ll}
/// {\rm maximize} & f(X) \\\\
/// {\rm subject \ to} & X \succeq 0 \\\\
/// & {\bf Tr}\ X = 1,
/// \end{array}
/// \\]
/// where
/// - variables \\( X \in \mathcal{S}^n \\)
/// - \\( f \\) is concave, given as an [`Objective`].
///
/// It is approximately solved by a fixed number of iterations of [`Solver`].
/// A curvature constant \\(C_f\\) of \\(f\\), if known, tightens the eigenpair tolerance as the iteration proceeds.
pub struct ProbBoundedTrace<L: LinAlg, O: Objective<L>>
{
    ph_l: PhantomData<L>,

    obj: O,
    n_iter: usize,
    cf: Option<L::F>,

    w_solver: Vec<L::F>,
}

impl<L: LinAlg, O: Objective<L>> ProbBoundedTrace<L, O>
{
    /// Creates a bounded-trace problem with given data.
    ///
    /// Returns a [`ProbBoundedTrace`] instance.
    /// * `obj` is \\(f\\).
    /// * `n_iter` is a number of iterations.
    /// * `cf` is an optional curvature constant \\(C_f\\).
    pub fn new(obj: O, n_iter: usize, cf: Option<L::F>) -> Self
    {
        ProbBoundedTrace {
            ph_l: PhantomData,
            obj, n_iter, cf,
            w_solver: Vec::new(),
        }
    }

    /// Objective of the problem.
    pub fn objective(&self) -> &O
    {
        &self.obj
    }

    /// Generates the problem data structures to be fed to [`Solver::solve`].
    ///
    /// Returns a tuple of the objective, the number of iterations, the curvature constant and a work slice.
    /// * `par` shall be the parameters of the [`Solver`] to be used.
    pub fn problem(&mut self, par: &SolverParam<L::F>) -> (&O, usize, Option<L::F>, &mut[L::F])
    {
        let s = Solver::<L>::new().par(|p| *p = par.clone());

        self.w_solver.resize(s.query_worklen(self.obj.dim()), L::F::zero());

        (&self.obj, self.n_iter, self.cf, self.w_solver.as_mut())
    }
}
