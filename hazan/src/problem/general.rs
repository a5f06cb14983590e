use num_traits::{Float, NumCast, Zero, One, ToPrimitive};
use hazan_core::solver::{Solver, SolverParam, SolverError, LinAlg, Objective};
use crate::MatBuild;

//

/// Log-sum-exp surrogate of a constraint system at a fixed trace scale
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// \\[
/// f(X) = -{1 \over M} \ln \sum_{i=0}^{m-1} \exp \left( M ({\bf Tr}(t A_i X) - b_i) \right),
/// \\]
/// a smooth lower approximation of \\(-\max_i ({\bf Tr}(t A_i X) - b_i)\\)
/// with the trace scale \\(t\\) and the temperature \\(M\\).
pub struct ProbGeneralObj<'a, L: LinAlg>
{
    dim: usize,
    syms_a: &'a[MatBuild<L>],
    vec_b: &'a[L::F],
    x_trace: L::F,
    temp: L::F,
}

impl<'a, L: LinAlg> ProbGeneralObj<'a, L>
{
    // M (Tr(t A_i X) - b_i) for each i
    fn logits(&self, x: &[L::F]) -> Vec<L::F>
    {
        self.syms_a.iter().zip(self.vec_b)
            .map(|(a, b)| {
                self.temp * (self.x_trace * L::trace_prod(self.dim, a.as_ref(), x) - *b)
            })
            .collect()
    }

    // softmax of the logits in place, returning log-sum-exp
    fn softmax(z: &mut[L::F]) -> L::F
    {
        let z_max = z.iter().fold(L::F::neg_infinity(), |m, e| m.max(*e));

        let mut sum = L::F::zero();
        for e in z.iter_mut() {
            *e = (*e - z_max).exp();
            sum = sum + *e;
        }
        L::scale(sum.recip(), z);

        z_max + sum.ln()
    }

    /// Trace scale \\(t\\).
    pub fn x_trace(&self) -> L::F
    {
        self.x_trace
    }

    /// Temperature \\(M\\).
    pub fn temperature(&self) -> L::F
    {
        self.temp
    }

    /// Sensitivity to the trace scale.
    ///
    /// Returns \\({\partial f \over \partial t} = -\sum_i w_i {\bf Tr}(A_i X)\\)
    /// where \\(w\\) is the softmax of the exponents.
    /// A positive value means that a larger trace scale improves \\(f\\).
    pub fn trace_sens(&self, x: &[L::F]) -> L::F
    {
        let mut w = self.logits(x);
        Self::softmax(&mut w);

        let mut sens = L::F::zero();
        for (a, wi) in self.syms_a.iter().zip(w) {
            sens = sens - wi * L::trace_prod(self.dim, a.as_ref(), x);
        }
        sens
    }
}

impl<'a, L: LinAlg> Objective<L> for ProbGeneralObj<'a, L>
{
    fn dim(&self) -> usize
    {
        self.dim
    }

    fn value(&self, x: &[L::F]) -> L::F
    {
        let mut z = self.logits(x);
        let lse = Self::softmax(&mut z);

        -lse / self.temp
    }

    fn grad(&self, x: &[L::F], g: &mut[L::F])
    {
        let n = self.dim;

        let mut w = self.logits(x);
        Self::softmax(&mut w);

        let f1 = L::F::one();
        let f2 = f1 + f1;

        // -t sum_i w_i (A_i + A_i^T) / 2, since Tr(A X) = Tr(A^T X) for symmetric X
        L::scale(L::F::zero(), g);
        for (a, wi) in self.syms_a.iter().zip(w) {
            let coef = -self.x_trace * wi / f2;
            for c in 0.. n {
                for r in 0.. n {
                    g[c * n + r] = g[c * n + r] + coef * (a[(r, c)] + a[(c, r)]);
                }
            }
        }
    }
}

//

/// General semidefinite feasibility problem
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// The problem is to find
/// \\[
/// \begin{array}{ll}
/// X \succeq 0 \\\\
/// {\rm s.t.} & {\bf Tr}(A_i X) \le b_i + \epsilon \quad (i = 0, \ldots, m - 1),
/// \end{array}
/// \\]
/// where
/// - variables \\( X \in \mathcal{S}^n \\)
/// - \\( A_i \in \mathbb{R}^{n \times n},\ b_i \in \mathbb{R} \\)
/// - \\( \epsilon > 0 \\) is an accuracy.
///
/// Writing \\(X = t \hat X\\) with \\({\bf Tr}\ \hat X = 1\\),
/// the problem at a fixed trace scale \\(t\\) becomes a bounded-trace problem of
/// the surrogate [`ProbGeneralObj`] with
/// \\(M = \max(\ln m / \epsilon, 1)\\) and \\(K = \max(\lfloor 1 / \epsilon \rfloor, 1)\\) iterations.
/// A point of \\(f(\hat X) > -\epsilon\\) is accepted.
/// [`crate::GeneralSolver`] searches the trace scale.
pub struct ProbGeneral<L: LinAlg>
{
    dim: usize,
    syms_a: Vec<MatBuild<L>>,
    vec_b: Vec<L::F>,
    eps: L::F,

    w_solver: Vec<L::F>,
}

impl<L: LinAlg> ProbGeneral<L>
{
    /// Creates a general problem with given data.
    ///
    /// Returns a [`ProbGeneral`] instance, or `Err` with [`SolverError`] type.
    /// * `dim` is \\(n\\).
    /// * `syms_a` is \\(A_0, \\ldots, A_{m-1}\\) each of which shall be \\(n \times n\\).
    /// * `vec_b` is \\(b_0, \\ldots, b_{m-1}\\).
    /// * `eps` is \\(\epsilon\\).
    pub fn new(dim: usize, syms_a: Vec<MatBuild<L>>, vec_b: Vec<L::F>, eps: L::F) -> Result<Self, SolverError>
    {
        if dim == 0 || syms_a.is_empty() {
            log::error!("dim {} and the number of constraints {} must be >= 1", dim, syms_a.len());
            return Err(SolverError::InvalidParam);
        }

        if !(eps > L::F::zero()) || !eps.is_finite() {
            log::error!("eps must be positive and finite");
            return Err(SolverError::InvalidParam);
        }

        if syms_a.len() != vec_b.len() {
            log::error!("{} matrices for {} scalars", syms_a.len(), vec_b.len());
            return Err(SolverError::DimensionMismatch);
        }

        for (i, a) in syms_a.iter().enumerate() {
            if a.size() != (dim, dim) {
                log::error!("A_{} is {:?}, not ({}, {})", i, a.size(), dim, dim);
                return Err(SolverError::DimensionMismatch);
            }
        }

        Ok(ProbGeneral {
            dim,
            syms_a,
            vec_b,
            eps,
            w_solver: Vec::new(),
        })
    }

    /// Dimension \\(n\\).
    pub fn dim(&self) -> usize
    {
        self.dim
    }

    /// Accuracy \\(\epsilon\\).
    pub fn eps(&self) -> L::F
    {
        self.eps
    }

    /// Temperature \\(M = \max(\ln m / \epsilon, 1)\\).
    pub fn temperature(&self) -> L::F
    {
        let m = <L::F as NumCast>::from(self.syms_a.len()).unwrap();

        (m.ln() / self.eps).max(L::F::one())
    }

    /// Number of iterations \\(K = \max(\lfloor 1 / \epsilon \rfloor, 1)\\).
    pub fn n_iter(&self) -> usize
    {
        self.eps.recip().floor().to_usize().unwrap_or(usize::MAX).max(1)
    }

    /// Surrogate objective at a trace scale.
    ///
    /// Returns [`ProbGeneralObj`] borrowing the constraint system.
    /// * `x_trace` is the trace scale \\(t\\).
    pub fn objective(&self, x_trace: L::F) -> ProbGeneralObj<'_, L>
    {
        ProbGeneralObj {
            dim: self.dim,
            syms_a: &self.syms_a,
            vec_b: &self.vec_b,
            x_trace,
            temp: self.temperature(),
        }
    }

    /// Generates the problem data structures to be fed to [`Solver::solve`].
    ///
    /// Returns a tuple of the surrogate objective, the number of iterations, the curvature constant and a work slice.
    /// * `x_trace` is the trace scale \\(t\\).
    /// * `cf` is an optional curvature constant of the surrogate.
    /// * `par` shall be the parameters of the [`Solver`] to be used.
    pub fn problem(&mut self, x_trace: L::F, cf: Option<L::F>, par: &SolverParam<L::F>) -> (ProbGeneralObj<'_, L>, usize, Option<L::F>, &mut[L::F])
    {
        let s = Solver::<L>::new().par(|p| *p = par.clone());
        let n_iter = self.n_iter();
        let temp = self.temperature();

        self.w_solver.resize(s.query_worklen(self.dim), L::F::zero());

        let obj = ProbGeneralObj {
            dim: self.dim,
            syms_a: &self.syms_a,
            vec_b: &self.vec_b,
            x_trace,
            temp,
        };

        (obj, n_iter, cf, self.w_solver.as_mut())
    }
}

//

#[test]
fn test_general_obj1()
{
    use float_eq::assert_float_eq;
    use hazan_core::FloatGeneric;

    type L = FloatGeneric<f64>;

    let a0 = MatBuild::<L>::new(2).iter_rowmaj(&[
        1., 0.,
        0., 0.,
    ]);
    let a1 = MatBuild::<L>::new(2).iter_rowmaj(&[
        0., 2.,
        0., 1.,
    ]);
    let prob = ProbGeneral::new(2, vec![a0, a1], vec![0.5, 0.2], 0.5).unwrap();

    // M = ln 2 / 0.5
    let temp = 2_f64.ln() / 0.5;
    assert_float_eq!(prob.temperature(), temp, abs <= 1e-12);
    assert_eq!(prob.n_iter(), 2);

    let obj = prob.objective(2.);
    let x = &[0.25, 0.25, 0.25, 0.75]; // column-major, Tr = 1

    // Tr(A_0 X) = 0.25, Tr(A_1 X) = 2 * 0.25 + 0.75
    let z0 = temp * (2. * 0.25 - 0.5);
    let z1 = temp * (2. * 1.25 - 0.2);
    let lse = (z0.exp() + z1.exp()).ln();
    assert_float_eq!(obj.value(x), -lse / temp, abs <= 1e-12);

    let w0 = z0.exp() / (z0.exp() + z1.exp());
    let w1 = 1. - w0;
    assert_float_eq!(obj.trace_sens(x), -(w0 * 0.25 + w1 * 1.25), abs <= 1e-12);

    // gradient is made of the symmetric parts
    let g = &mut[0.; 4];
    obj.grad(x, g);
    assert_float_eq!(*g, [-2. * w0, -2. * w1, -2. * w1, -2. * w1], abs_all <= 1e-12);
}

#[test]
fn test_general_obj2()
{
    use float_eq::assert_float_eq;
    use hazan_core::FloatGeneric;

    type L = FloatGeneric<f64>;

    // exponents far beyond the range of exp
    let a = MatBuild::<L>::identity(1).scale(1e3);
    let prob = ProbGeneral::new(1, vec![a.clone(), a], vec![0., 0.], 1e-3).unwrap();

    let obj = prob.objective(1.);
    let x = &[1.];
    let temp = prob.temperature();

    assert!((temp * 1e3).exp().is_infinite());
    assert_float_eq!(obj.value(x), -1e3 - 2_f64.ln() / temp, abs <= 1e-9);

    let g = &mut[0.];
    obj.grad(x, g);
    assert_float_eq!(g[0], -1e3, abs <= 1e-9);
}

#[test]
fn test_general_new1()
{
    use hazan_core::FloatGeneric;

    type L = FloatGeneric<f64>;

    let a = MatBuild::<L>::identity(2);

    let rslt = ProbGeneral::new(3, vec![a.clone()], vec![1.], 0.1);
    assert_eq!(rslt.err(), Some(SolverError::DimensionMismatch));

    let rslt = ProbGeneral::new(2, vec![a.clone(), a.clone()], vec![1.], 0.1);
    assert_eq!(rslt.err(), Some(SolverError::DimensionMismatch));

    let rslt = ProbGeneral::new(2, vec![a.clone()], vec![1.], 0.);
    assert_eq!(rslt.err(), Some(SolverError::InvalidParam));

    let rslt = ProbGeneral::<L>::new(2, vec![], vec![], 0.1);
    assert_eq!(rslt.err(), Some(SolverError::InvalidParam));

    assert!(ProbGeneral::new(2, vec![a], vec![1.], 0.1).is_ok());
}
