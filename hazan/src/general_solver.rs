use num_traits::{Float, Zero, One};
use hazan_core::solver::{Solver, SolverParam, SolverError, LinAlg, Objective};
use crate::{MatBuild, ProbGeneral};

//

/// General solver parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralParam<F: Float>
{
    /// Max number of inner solves of the trace-scale search.
    pub max_iter: usize,
    /// Initial trace scale, positive.
    pub trace_init: F,
    /// Curvature constant of the surrogate, if known. `None` uses [`SolverParam::eps_eig`].
    pub curvature: Option<F>,
    /// Parameters of the inner [`Solver`].
    pub solver: SolverParam<F>,
}

impl<F: Float> Default for GeneralParam<F>
{
    fn default() -> Self
    {
        GeneralParam {
            max_iter: 50,
            trace_init: F::one(),
            curvature: None,
            solver: SolverParam::default(),
        }
    }
}

//

/// Solution of [`GeneralSolver::solve`].
#[derive(Debug, Clone)]
pub struct GeneralSolution<L: LinAlg>
{
    /// \\(X = t \hat X\\).
    pub x: MatBuild<L>,
    /// Surrogate value \\(f(\hat X)\\), greater than \\(-\epsilon\\).
    pub fx: L::F,
    /// Accepted trace scale \\(t\\).
    pub x_trace: L::F,
    /// Number of inner solves taken.
    pub iter: usize,
}

//

/// General semidefinite problem solver struct.
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Solves [`ProbGeneral`] by repeated bounded-trace solves of its surrogate at trace scales \\(t\\).
/// The search begins at [`GeneralParam::trace_init`] and keeps a bracket \\([t_{lo}, t_{hi}]\\):
/// the sign of \\(\partial f / \partial t\\) decides which end \\(t\\) replaces,
/// \\(t\\) doubles or halves while the bracket is open on that side,
/// and bisects once both ends are known.
pub struct GeneralSolver<L: LinAlg>
{
    /// solver parameters.
    pub par: GeneralParam<L::F>,
}

impl<L: LinAlg> GeneralSolver<L>
{
    /// Creates an instance.
    ///
    /// Returns [`GeneralSolver`] instance.
    pub fn new() -> Self
    {
        GeneralSolver {
            par: GeneralParam::default(),
        }
    }

    /// Changes solver parameters.
    ///
    /// Returns [`GeneralSolver`] with its parameters changed.
    /// * `f` is a function to change parameters given by its argument.
    pub fn par<P>(mut self, f: P) -> Self
    where P: FnOnce(&mut GeneralParam<L::F>)
    {
        f(&mut self.par);
        self
    }

    /// Solves at a fixed trace scale.
    ///
    /// Returns `Ok` with a tuple of \\(t \hat X\\) and \\(f(\hat X)\\),
    /// or `Err` with [`SolverError`] type.
    /// * `prob` is the problem.
    /// * `x_trace` is the trace scale \\(t\\), positive.
    pub fn solve_at(&self, prob: &mut ProbGeneral<L>, x_trace: L::F) -> Result<(MatBuild<L>, L::F), SolverError>
    {
        let (x, fx, _) = self.solve_inner(prob, x_trace)?;

        Ok((x, fx))
    }

    /// Starts to solve a problem.
    ///
    /// Returns `Ok` with [`GeneralSolution`],
    /// or `Err` with [`SolverError`] type.
    /// * `prob` is the problem.
    pub fn solve(&self, prob: &mut ProbGeneral<L>) -> Result<GeneralSolution<L>, SolverError>
    {
        let f0 = L::F::zero();
        let f1 = L::F::one();
        let f2 = f1 + f1;

        let eps = prob.eps();

        log::info!("----- Trace search started");
        log::debug!("{:?}", self.par);

        let mut x_trace = self.par.trace_init;
        let mut lo = f0;
        let mut hi: Option<L::F> = None;

        for i in 0.. self.par.max_iter {
            let (x, fx, sens) = self.solve_inner(prob, x_trace)?;

            log::debug!("{}: x_trace {:.3e} f {:.3e} sens {:.3e}", i, x_trace, fx, sens);

            if fx > -eps {
                log::info!("----- Trace search finished: x_trace {:.3e}", x_trace);

                return Ok(GeneralSolution {
                    x,
                    fx,
                    x_trace,
                    iter: i + 1,
                });
            }

            if sens > f0 {
                lo = x_trace;
                x_trace = match hi {
                    Some(h) => (lo + h) / f2,
                    None => x_trace * f2,
                };
            }
            else {
                hi = Some(x_trace);
                x_trace = if lo > f0 {
                    (lo + x_trace) / f2
                }
                else {
                    x_trace / f2
                };
            }

            if !(x_trace > f0) || !x_trace.is_finite() {
                log::warn!("trace search: scale {:.3e} out of range after {} solves", x_trace, i + 1);
                return Err(SolverError::BinarySearchDidNotConverge);
            }
        }

        log::warn!("trace search: not converged within {} solves", self.par.max_iter);
        Err(SolverError::BinarySearchDidNotConverge)
    }

    fn solve_inner(&self, prob: &mut ProbGeneral<L>, x_trace: L::F) -> Result<(MatBuild<L>, L::F, L::F), SolverError>
    {
        if !(x_trace > L::F::zero()) || !x_trace.is_finite() {
            log::error!("trace scale {:?} must be positive", x_trace);
            return Err(SolverError::InvalidParam);
        }

        let dim = prob.dim();
        let s = Solver::<L>::new().par(|p| *p = self.par.solver.clone());
        let (obj, n_iter, cf, work) = prob.problem(x_trace, self.par.curvature, &self.par.solver);

        let x = s.solve((&obj, n_iter, cf, work))?;

        let fx = obj.value(x);
        let sens = obj.trace_sens(x);
        if !fx.is_finite() || !sens.is_finite() {
            log::error!("surrogate is not finite at x_trace {:.3e}", x_trace);
            return Err(SolverError::NonFiniteValue);
        }

        let x = MatBuild::from_colmaj(dim, x).scale(x_trace);

        Ok((x, fx, sens))
    }
}
