use crate::solver::{LinAlg, TopEig, SolverError};
use crate::{EigDense, EigLanczos};

//

/// Top eigenpair extractor selected by dimension
///
/// [`EigLanczos`] is used for a dimension of `lanczos_min_dim` or more,
/// and [`EigDense`] below it.
pub enum EigSelect<'a, L: LinAlg>
{
    /// Full spectrum decomposition.
    Dense(EigDense<'a, L>),
    /// Restarted Lanczos iteration.
    Lanczos(EigLanczos<'a, L>),
}

impl<'a, L: LinAlg> EigSelect<'a, L>
{
    /// Query of a length of work slice.
    ///
    /// Returns a length of work slice that [`EigSelect::new`] requires.
    /// * `n` is a number of rows and columns of the matrix.
    /// * `lanczos_min_dim` is the threshold dimension.
    /// * `ncv` is a maximum dimension of the Krylov subspace of [`EigLanczos`].
    pub fn query_worklen(n: usize, lanczos_min_dim: usize, ncv: usize) -> usize
    {
        if n >= lanczos_min_dim {
            EigLanczos::<L>::query_worklen(n, ncv)
        }
        else {
            EigDense::<L>::query_worklen(n)
        }
    }

    /// Creates an instance.
    ///
    /// Returns [`EigSelect`] instance.
    /// * `n` is a number of rows and columns of the matrix.
    /// * `work` slice is used for temporal variables in [`EigSelect::top_eig`].
    /// * `lanczos_min_dim` is the threshold dimension.
    /// * `ncv` is a maximum dimension of the Krylov subspace of [`EigLanczos`].
    /// * `eps_zero` shall be the same value as [`crate::solver::SolverParam::eps_zero`].
    /// * `max_iter` is a maximum number of iterations of either extractor.
    pub fn new(n: usize, work: &'a mut[L::F], lanczos_min_dim: usize, ncv: usize, eps_zero: L::F, max_iter: usize) -> Self
    {
        if n >= lanczos_min_dim {
            EigSelect::Lanczos(EigLanczos::new(work, ncv, eps_zero, max_iter))
        }
        else {
            EigSelect::Dense(EigDense::new(work, eps_zero, max_iter))
        }
    }

    /// Name of the selected extractor.
    pub fn name(&self) -> &'static str
    {
        match self {
            EigSelect::Dense(_) => "dense",
            EigSelect::Lanczos(_) => "lanczos",
        }
    }
}

impl<'a, L: LinAlg> TopEig<L> for EigSelect<'a, L>
{
    fn top_eig(&mut self, n: usize, mat: &[L::F], tol: L::F, vec: &mut[L::F]) -> Result<L::F, SolverError>
    {
        match self {
            EigSelect::Dense(e) => e.top_eig(n, mat, tol, vec),
            EigSelect::Lanczos(e) => e.top_eig(n, mat, tol, vec),
        }
    }
}

//

#[test]
fn test_eig_select1()
{
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let w = &mut[0.; 64];
    assert_eq!(EigSelect::<L>::new(2, w, 3, 20, 1e-12, 100).name(), "dense");
    let w = &mut[0.; 64];
    assert_eq!(EigSelect::<L>::new(3, w, 3, 20, 1e-12, 100).name(), "lanczos");
}
