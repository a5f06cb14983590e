use crate::solver::{LinAlg, TopEig, SolverError};

//

/// Dense top eigenpair extractor
///
/// Computes the full spectrum by [`LinAlg::sym_eig`] and picks the largest eigenvalue.
/// Suited for small matrices.
pub struct EigDense<'a, L: LinAlg>
{
    work: &'a mut[L::F],
    eps_zero: L::F,
    max_sweep: usize,
}

impl<'a, L: LinAlg> EigDense<'a, L>
{
    /// Query of a length of work slice.
    ///
    /// Returns a length of work slice that [`EigDense::new`] requires.
    /// * `n` is a number of rows and columns of the matrix.
    pub fn query_worklen(n: usize) -> usize
    {
        n * n +  // copy of mat
        n +      // eigenvalues
        n * n +  // eigenvectors
        L::sym_eig_worklen(n)
    }

    /// Creates an instance.
    ///
    /// Returns [`EigDense`] instance.
    /// * `work` slice is used for temporal variables in [`EigDense::top_eig`].
    /// * `eps_zero` shall be the same value as [`crate::solver::SolverParam::eps_zero`].
    /// * `max_sweep` is a maximum number of sweeps of the eigenvalue decomposition.
    pub fn new(work: &'a mut[L::F], eps_zero: L::F, max_sweep: usize) -> Self
    {
        EigDense {
            work,
            eps_zero,
            max_sweep,
        }
    }
}

impl<'a, L: LinAlg> TopEig<L> for EigDense<'a, L>
{
    fn top_eig(&mut self, n: usize, mat: &[L::F], _tol: L::F, vec: &mut[L::F]) -> Result<L::F, SolverError>
    {
        if self.work.len() < Self::query_worklen(n) {
            log::error!("work shortage: {} given < {} required", self.work.len(), Self::query_worklen(n));
            return Err(SolverError::WorkShortage);
        }

        let (a, rest) = self.work.split_at_mut(n * n);
        let (eigval, rest) = rest.split_at_mut(n);
        let (eigvec, w) = rest.split_at_mut(n * n);

        L::copy(mat, a);
        L::sym_eig(n, a, self.eps_zero, self.max_sweep, eigval, eigvec, w)
            .or(Err(SolverError::EigenConvergence))?;

        let mut i_max = 0;
        for i in 1.. n {
            if eigval[i] > eigval[i_max] {
                i_max = i;
            }
        }

        let (_, v) = eigvec.split_at(i_max * n);
        L::copy(&v[.. n], vec);

        Ok(eigval[i_max])
    }
}

//

#[test]
fn test_eig_dense1()
{
    use float_eq::assert_float_eq;
    use num_traits::Float;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let mat = &[ // column-major
        -3., 0.,
         0., 1.,
    ];
    let v = &mut[0.; 2];
    assert!(EigDense::<L>::query_worklen(2) <= 10);
    let w = &mut[0.; 10];
    let mut e = EigDense::<L>::new(w, 1e-12, 50);
    let lambda = e.top_eig(2, mat, 0., v).unwrap();

    assert_float_eq!(lambda, 1., abs <= 1e-12);
    assert_float_eq!(v[0].abs(), 0., abs <= 1e-12);
    assert_float_eq!(v[1].abs(), 1., abs <= 1e-12);
}
