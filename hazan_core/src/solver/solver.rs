//! Hazan's bounded-trace solver

use num_traits::{Float, NumCast, Zero, One};
use core::marker::PhantomData;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use crate::solver::{LinAlg, Objective, TopEig, SolverError};
use crate::EigSelect;

//

/// Solver parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverParam<F: Float>
{
    /// Tolerance of small positive value to avoid division by zero.
    pub eps_zero: F,
    /// Tolerance of the top eigenpair when no curvature constant is given.
    pub eps_eig: F,
    /// Tolerance of the asymmetry of a gradient relative to its norm.
    pub eps_sym: F,
    /// Max iteration number of the top eigenpair extraction.
    pub max_iter_eig: usize,
    /// Max dimension of the Krylov subspace for Lanczos.
    pub lanczos_ncv: usize,
    /// Lanczos is used for a dimension of this or more, the dense eigenvalue decomposition otherwise.
    pub lanczos_min_dim: usize,
    /// Seed of the random numbers for the initial point and the Lanczos starting vectors.
    pub seed: u64,
    /// Period of iterations to output progress log(for debug/trace level).
    pub log_period: usize,
}

impl<F: Float> Default for SolverParam<F>
{
    fn default() -> Self
    {
        let ten = <F as NumCast>::from(10).unwrap();

        SolverParam {
            eps_zero: ten.powi(-12),
            eps_eig: ten.powi(-9),
            eps_sym: ten.powi(-8),
            max_iter_eig: 300,
            lanczos_ncv: 20,
            lanczos_min_dim: 3,
            seed: 0,
            log_period: 100,
        }
    }
}

//

/// Hazan's bounded-trace solver struct.
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// This struct abstracts a solver of
/// \\[
/// \begin{array}{ll}
/// {\rm maximize} & f(X) \\\\
/// {\rm subject \ to} & X \succeq 0 \\\\
/// & {\bf Tr}\ X = 1,
/// \end{array}
/// \\]
/// where
/// * variables \\( X \in \mathcal{S}^n \\)
/// * \\( f \\) is a concave function expressed by [`Objective`].
///
/// Each iteration takes the unit eigenvector \\(v_k\\) of the largest eigenvalue of \\(\nabla f(X_k)\\)
/// and updates \\(X_{k+1} = X_k + \alpha_k (v_k v_k^T - X_k)\\) with \\(\alpha_k = \min(1, {2 \over k + 1})\\),
/// so that every iterate is a convex combination of rank-one unit-trace matrices.
/// After \\(k\\) iterations the rank of \\(X\\) is at most \\(k\\).
pub struct Solver<L: LinAlg>
{
    /// solver parameters.
    pub par: SolverParam<L::F>,
}

impl<L: LinAlg> Solver<L>
{
    /// Query of a length of work slice.
    ///
    /// Returns a length of work slice that [`Solver::solve`] requires.
    /// * `dim` is a dimension of the matrix variable.
    pub fn query_worklen(&self, dim: usize) -> usize
    {
        dim * dim +  // x
        dim * dim +  // grad
        dim +        // eigenvector
        EigSelect::<L>::query_worklen(dim, self.par.lanczos_min_dim, self.par.lanczos_ncv)
    }

    /// Creates an instance.
    ///
    /// Returns [`Solver`] instance.
    pub fn new() -> Self
    {
        Solver {
            par: SolverParam::default(),
        }
    }

    /// Changes solver parameters.
    ///
    /// Returns [`Solver`] with its parameters changed.
    /// * `f` is a function to change parameters given by its argument.
    pub fn par<P>(mut self, f: P) -> Self
    where P: FnOnce(&mut SolverParam<L::F>)
    {
        f(&mut self.par);
        self
    }

    /// Starts to solve a bounded-trace problem.
    ///
    /// Returns `Ok` with \\(X\\) stored in column-major,
    /// or `Err` with [`SolverError`] type.
    /// * `obj` is \\(f\\) as an [`Objective`].
    /// * `n_iter` is a number of iterations, at least 1.
    /// * `cf` is an optional curvature constant \\(C_f\\) of \\(f\\).
    ///   If given, the tolerance of the top eigenpair at iteration \\(k\\) is \\(C_f / (k + 1)^2\\),
    ///   otherwise [`SolverParam::eps_eig`].
    /// * `work` slice is used for temporal variables. [`Solver::solve`] does not rely on dynamic heap allocation.
    pub fn solve<O>(self,
        (obj, n_iter, cf, work): (O, usize, Option<L::F>, &mut[L::F])
    ) -> Result<&[L::F], SolverError>
    where O: Objective<L>
    {
        let dim = obj.dim();

        if dim == 0 || n_iter == 0 {
            log::error!("dim {} and n_iter {} must be >= 1", dim, n_iter);
            return Err(SolverError::InvalidParam);
        }

        if let Some(c) = cf {
            if !(c > L::F::zero()) {
                log::error!("curvature constant {:?} must be > 0", c);
                return Err(SolverError::InvalidParam);
            }
        }

        if self.query_worklen(dim) > work.len() {
            log::error!("Work memory length {} must be >= {}", work.len(), self.query_worklen(dim));
            return Err(SolverError::WorkShortage);
        }

        log::debug!("{:?}", self.par);

        let core = SolverCore {
            ph_l: PhantomData::<L>,
            par: self.par,
            obj,
            n_iter,
            cf,
        };

        let (sol_x, rest) = work.split_at_mut(dim * dim);

        core.solve(sol_x, rest)?;

        Ok(sol_x)
    }
}

//

struct SolverCore<L, O>
where L: LinAlg, O: Objective<L>
{
    ph_l: PhantomData<L>,
    par: SolverParam<L::F>,

    obj: O,
    n_iter: usize,
    cf: Option<L::F>,
}

impl<L, O> SolverCore<L, O>
where L: LinAlg, O: Objective<L>
{
    fn solve(self, x: &mut[L::F], work: &mut[L::F]) -> Result<(), SolverError>
    {
        log::info!("----- Initializing");
        let n = self.obj.dim();

        let (g, rest) = work.split_at_mut(n * n);
        let (v, w_eig) = rest.split_at_mut(n);

        let mut rng = Xoshiro256StarStar::seed_from_u64(self.par.seed);

        self.init_x(x, v, &mut rng);

        let mut eig = EigSelect::<L>::new(
            n, w_eig,
            self.par.lanczos_min_dim, self.par.lanczos_ncv,
            self.par.eps_zero, self.par.max_iter_eig
        );
        log::debug!("top eigenpair by {}", eig.name());

        // Iteration
        log::info!("----- Started");
        for k in 0.. self.n_iter {
            let log_trig = if self.par.log_period > 0 {
                k % self.par.log_period == 0 || k + 1 == self.n_iter
            }
            else {
                if k == 0 && log::log_enabled!(log::Level::Debug) {
                    log::warn!("log_period == 0: no periodic log");
                }
                false
            };

            self.obj.grad(x, g);
            self.symmetrize_grad(n, g)?;

            let tol = self.eig_tol(k);

            // random starting vector for Lanczos
            for e in v.iter_mut() {
                *e = <L::F as NumCast>::from(rng.gen::<f64>() - 0.5).unwrap();
            }

            let lambda = eig.top_eig(n, g, tol, v)?;

            let alpha = self.step_size(k);

            // X := X + alpha * (v v^T - X)
            L::scale(L::F::one() - alpha, x);
            L::rank1op(n, alpha, v, x);

            if log_trig {
                log::debug!("{}: f {:.3e} lambda {:.3e} alpha {:.2e}", k, self.obj.value(x), lambda, alpha);
            }
            else {
                log::trace!("{}: lambda {:.3e} alpha {:.2e} tol {:.2e}", k, lambda, alpha, tol);
            }
        }

        log::trace!("x {:?}", x);
        log::info!("----- Finished");

        Ok(())
    }

    fn init_x(&self, x: &mut[L::F], v: &mut[L::F], rng: &mut Xoshiro256StarStar)
    {
        let n = v.len();
        let f0 = L::F::zero();
        let f1 = L::F::one();

        for e in v.iter_mut() {
            *e = <L::F as NumCast>::from(rng.gen::<f64>()).unwrap();
        }

        // Tr(v v^T) = |v|^2
        let mut sq_norm = L::inner_prod(v, v);
        if sq_norm <= self.par.eps_zero {
            for e in v.iter_mut() {
                *e = f1;
            }
            sq_norm = <L::F as NumCast>::from(n).unwrap();
        }

        L::scale(f0, x);
        L::rank1op(n, sq_norm.recip(), v, x);
    }

    fn symmetrize_grad(&self, n: usize, g: &mut[L::F]) -> Result<(), SolverError>
    {
        if g.iter().any(|e| !e.is_finite()) {
            log::error!("gradient has a non-finite value");
            return Err(SolverError::NonFiniteValue);
        }

        let f1 = L::F::one();
        let f2 = f1 + f1;

        let mut asym = L::F::zero();
        for c in 0.. n {
            for r in 0.. c {
                asym = asym.max((g[c * n + r] - g[r * n + c]).abs());
            }
        }

        let norm_g = L::norm(g);
        if asym > self.par.eps_sym * norm_g.max(self.par.eps_zero) {
            log::error!("gradient asymmetry {:.2e} exceeds {:.2e} of its norm {:.2e}", asym, self.par.eps_sym, norm_g);
            return Err(SolverError::AsymmetricGradient);
        }

        for c in 0.. n {
            for r in 0.. c {
                let s = (g[c * n + r] + g[r * n + c]) / f2;
                g[c * n + r] = s;
                g[r * n + c] = s;
            }
        }

        Ok(())
    }

    fn eig_tol(&self, k: usize) -> L::F
    {
        let tol = if let Some(cf) = self.cf {
            let k1 = <L::F as NumCast>::from(k + 1).unwrap();
            cf / (k1 * k1)
        }
        else {
            self.par.eps_eig
        };

        tol.max(L::F::epsilon())
    }

    fn step_size(&self, k: usize) -> L::F
    {
        let f1 = L::F::one();
        let f2 = f1 + f1;

        f1.min(f2 / <L::F as NumCast>::from(k + 1).unwrap())
    }
}

//

#[test]
fn test_solver1()
{
    use float_eq::assert_float_eq;
    use crate::{FloatGeneric, ObjFn};

    type L = FloatGeneric<f64>;

    let _ = env_logger::builder().is_test(true).try_init();

    let n = 4;

    // f(X) = -sum_i X_ii^2
    let obj = ObjFn::<L, _, _>::new(n,
        |x: &[f64]| {
            -(0.. n).map(|i| x[i * n + i] * x[i * n + i]).sum::<f64>()
        },
        |x: &[f64], g: &mut[f64]| {
            for e in g.iter_mut() {
                *e = 0.;
            }
            for i in 0.. n {
                g[i * n + i] = -2. * x[i * n + i];
            }
        }
    );

    let s = Solver::<L>::new();
    let w = &mut[0.; 1000];
    assert!(s.query_worklen(n) <= w.len());
    let x = s.solve((&obj, 100, Some(2.), w)).unwrap();

    assert_float_eq!(obj.value(x), -0.25, abs <= 0.05);

    let tr: f64 = (0.. n).map(|i| x[i * n + i]).sum();
    assert_float_eq!(tr, 1., abs <= 1e-9);
}

#[test]
fn test_solver2()
{
    use crate::{FloatGeneric, ObjFn};

    type L = FloatGeneric<f64>;

    let _ = env_logger::builder().is_test(true).try_init();

    let obj = ObjFn::<L, _, _>::new(2,
        |_: &[f64]| 0.,
        |_: &[f64], g: &mut[f64]| {
            g.copy_from_slice(&[0., 1., 0., 0.]);
        }
    );

    let w = &mut[0.; 100];
    let rslt = Solver::<L>::new().solve((&obj, 10, None, w));
    assert_eq!(rslt, Err(SolverError::AsymmetricGradient));

    let w = &mut[0.; 100];
    let rslt = Solver::<L>::new().solve((&obj, 0, None, w));
    assert_eq!(rslt, Err(SolverError::InvalidParam));

    let w = &mut[0.; 4];
    let rslt = Solver::<L>::new().solve((&obj, 10, None, w));
    assert_eq!(rslt, Err(SolverError::WorkShortage));
}
