use num_traits::{Float, Zero, One};
use crate::solver::{LinAlg, TopEig, SolverError};

//

/// Lanczos top eigenpair extractor
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Builds a Krylov basis \\(V_m\\) of at most `ncv` vectors with full reorthogonalization,
/// and takes the Ritz pair of the largest eigenvalue of the tridiagonal \\(T_m = V_m^T G V_m\\).
/// The Ritz pair is accepted when the residual estimate \\(\beta_m |s_m|\\) is within
/// \\({\rm tol} \cdot \\|G\\|_F\\).
/// Otherwise the process is restarted from the Ritz vector.
/// An invariant subspace found before `ncv` vectors are built does not end the basis;
/// it is extended by a unit vector orthogonalized against it.
pub struct EigLanczos<'a, L: LinAlg>
{
    work: &'a mut[L::F],
    ncv: usize,
    eps_zero: L::F,
    max_iter: usize,
}

impl<'a, L: LinAlg> EigLanczos<'a, L>
{
    /// Query of a length of work slice.
    ///
    /// Returns a length of work slice that [`EigLanczos::new`] requires.
    /// * `n` is a number of rows and columns of the matrix.
    /// * `ncv` is a maximum dimension of the Krylov subspace.
    pub fn query_worklen(n: usize, ncv: usize) -> usize
    {
        let ncv = ncv.min(n);

        n * ncv +     // basis
        n +           // w
        ncv +         // alpha
        ncv +         // beta
        ncv * ncv +   // tridiagonal
        ncv +         // ritz values
        ncv * ncv +   // ritz vectors of tridiagonal
        L::sym_eig_worklen(ncv)
    }

    /// Creates an instance.
    ///
    /// Returns [`EigLanczos`] instance.
    /// * `work` slice is used for temporal variables in [`EigLanczos::top_eig`].
    /// * `ncv` is a maximum dimension of the Krylov subspace, at least 1.
    /// * `eps_zero` shall be the same value as [`crate::solver::SolverParam::eps_zero`].
    /// * `max_iter` is a maximum number of restarts,
    ///   also used as a maximum number of sweeps of [`LinAlg::sym_eig`] for the tridiagonal.
    pub fn new(work: &'a mut[L::F], ncv: usize, eps_zero: L::F, max_iter: usize) -> Self
    {
        EigLanczos {
            work,
            ncv: ncv.max(1),
            eps_zero,
            max_iter,
        }
    }
}

impl<'a, L: LinAlg> TopEig<L> for EigLanczos<'a, L>
{
    fn top_eig(&mut self, n: usize, mat: &[L::F], tol: L::F, vec: &mut[L::F]) -> Result<L::F, SolverError>
    {
        if self.work.len() < Self::query_worklen(n, self.ncv) {
            log::error!("work shortage: {} given < {} required", self.work.len(), Self::query_worklen(n, self.ncv));
            return Err(SolverError::WorkShortage);
        }

        let f0 = L::F::zero();
        let f1 = L::F::one();
        let ncv = self.ncv.min(n);

        let (basis, rest) = self.work.split_at_mut(n * ncv);
        let (w, rest) = rest.split_at_mut(n);
        let (alpha, rest) = rest.split_at_mut(ncv);
        let (beta, rest) = rest.split_at_mut(ncv);
        let (tmat, rest) = rest.split_at_mut(ncv * ncv);
        let (theta, rest) = rest.split_at_mut(ncv);
        let (svec, w_eig) = rest.split_at_mut(ncv * ncv);

        let norm_mat = L::norm(mat);

        if norm_mat <= self.eps_zero {
            // every unit vector is an eigenvector of zero eigenvalue
            let norm_vec = L::norm(vec);
            if norm_vec > self.eps_zero {
                L::scale(norm_vec.recip(), vec);
            }
            else {
                L::scale(f0, vec);
                vec[0] = f1;
            }
            return Ok(f0);
        }

        for restart in 0..= self.max_iter {
            let norm_vec = L::norm(vec);
            if norm_vec > self.eps_zero {
                L::scale(norm_vec.recip(), vec);
            }
            else {
                L::scale(f0, vec);
                vec[0] = f1;
            }
            L::copy(vec, &mut basis[.. n]);

            // Lanczos process
            let mut m = 0;
            for j in 0.. ncv {
                let (done, next) = basis.split_at_mut((j + 1) * n);
                let v_j = &done[j * n..];

                L::transform_ge(false, n, n, f1, mat, v_j, f0, w);
                alpha[j] = L::inner_prod(w, v_j);

                // full reorthogonalization, twice
                for _ in 0.. 2 {
                    for i in 0..= j {
                        let v_i = &done[i * n.. (i + 1) * n];
                        let c = L::inner_prod(w, v_i);
                        L::add(-c, v_i, w);
                    }
                }

                m = j + 1;
                beta[j] = L::norm(w);

                if j + 1 == ncv {
                    if beta[j] <= self.eps_zero * norm_mat {
                        beta[j] = f0;
                    }
                    break;
                }

                let v_next = &mut next[.. n];

                if beta[j] > self.eps_zero * norm_mat {
                    L::copy(w, v_next);
                    L::scale(beta[j].recip(), v_next);
                }
                else {
                    // invariant subspace, continue from the unit vector least covered by the basis
                    beta[j] = f0;

                    let mut k_min = 0;
                    let mut cov_min = L::F::infinity();
                    for k in 0.. n {
                        let mut cov = f0;
                        for i in 0..= j {
                            let e = done[i * n + k];
                            cov = cov + e * e;
                        }
                        if cov < cov_min {
                            k_min = k;
                            cov_min = cov;
                        }
                    }

                    L::scale(f0, v_next);
                    v_next[k_min] = f1;
                    for _ in 0.. 2 {
                        for i in 0..= j {
                            let v_i = &done[i * n.. (i + 1) * n];
                            let c = L::inner_prod(v_next, v_i);
                            L::add(-c, v_i, v_next);
                        }
                    }
                    let norm_next = L::norm(v_next);
                    L::scale(norm_next.recip(), v_next);
                }
            }

            // Ritz pairs
            let t = &mut tmat[.. m * m];
            L::scale(f0, t);
            for j in 0.. m {
                t[j * m + j] = alpha[j];
                if j + 1 < m {
                    t[j * m + j + 1] = beta[j];
                    t[(j + 1) * m + j] = beta[j];
                }
            }

            let theta = &mut theta[.. m];
            let svec = &mut svec[.. m * m];
            L::sym_eig(m, t, self.eps_zero, self.max_iter, theta, svec, w_eig)
                .or(Err(SolverError::EigenConvergence))?;

            let mut i_max = 0;
            for i in 1.. m {
                if theta[i] > theta[i_max] {
                    i_max = i;
                }
            }
            let s = &svec[i_max * m.. (i_max + 1) * m];

            L::transform_ge(false, n, m, f1, &basis[.. n * m], s, f0, vec);
            let norm_ritz = L::norm(vec);
            L::scale(norm_ritz.recip(), vec);

            // the whole space is spanned when m == n
            let resid = if m == n {
                f0
            }
            else {
                beta[m - 1] * s[m - 1].abs()
            };

            log::trace!("lanczos {}: m {} theta {:.3e} resid {:.2e}", restart, m, theta[i_max], resid);

            if resid <= tol * norm_mat {
                return Ok(theta[i_max]);
            }
        }

        log::warn!("lanczos: not converged within {} restarts", self.max_iter);
        Err(SolverError::EigenConvergence)
    }
}

//

#[test]
fn test_eig_lanczos1()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let n = 5;
    let mut mat = [0.; 25];
    for i in 0.. n {
        mat[i * n + i] = 2.;
        if i + 1 < n {
            mat[i * n + i + 1] = -1.;
            mat[(i + 1) * n + i] = -1.;
        }
    }
    let v = &mut[1., 0.3, -0.2, 0.5, 0.1];
    let w = &mut[0.; 100];
    assert!(EigLanczos::<L>::query_worklen(n, 3) <= w.len());

    // restarted with a Krylov dimension smaller than n
    let mut e = EigLanczos::<L>::new(w, 3, 1e-12, 300);
    let lambda = e.top_eig(n, &mat, 1e-10, v).unwrap();

    // 2 - 2 cos(5 pi / 6)
    let ref_lambda = 2. + 3_f64.sqrt();
    assert_float_eq!(lambda, ref_lambda, abs <= 1e-8);

    let gv = &mut[0.; 5];
    L::transform_ge(false, n, n, 1., &mat, v, 0., gv);
    for k in 0.. n {
        assert_float_eq!(gv[k], ref_lambda * v[k], abs <= 1e-4);
    }
}

#[test]
fn test_eig_lanczos2()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let mat = &[ // column-major, largest eigenvalue is not the largest in magnitude
        -5., 0., 0.,
         0., 1., 0.,
         0., 0., 0.5,
    ];
    let v = &mut[1., 1., 1.];
    let w = &mut[0.; 50];
    let mut e = EigLanczos::<L>::new(w, 20, 1e-12, 10);
    let lambda = e.top_eig(3, mat, 1e-10, v).unwrap();

    assert_float_eq!(lambda, 1., abs <= 1e-9);
    assert_float_eq!(v[1].abs(), 1., abs <= 1e-9);
}

#[test]
fn test_eig_lanczos3()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    // starting vector lies in the invariant subspace of the smallest eigenvalue
    let mat = &[
        1., 0., 0.,
        0., 2., 0.,
        0., 0., 5.,
    ];
    let v = &mut[1., 0., 0.];
    let w = &mut[0.; 50];
    assert!(EigLanczos::<L>::query_worklen(3, 20) <= w.len());

    let mut e = EigLanczos::<L>::new(w, 20, 1e-12, 10);
    let lambda = e.top_eig(3, mat, 1e-10, v).unwrap();

    assert_float_eq!(lambda, 5., abs <= 1e-12);
    assert_float_eq!(v[2].abs(), 1., abs <= 1e-12);
}

#[test]
fn test_eig_lanczos4()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let mat = &[0.; 9];
    let w = &mut[0.; 50];
    let mut e = EigLanczos::<L>::new(w, 20, 1e-12, 10);

    let v = &mut[3., 4., 0.];
    let lambda = e.top_eig(3, mat, 1e-10, v).unwrap();
    assert_float_eq!(lambda, 0., abs <= 0.);
    assert_float_eq!(*v, [0.6, 0.8, 0.], abs_all <= 1e-12);

    let v = &mut[0.; 3];
    let lambda = e.top_eig(3, mat, 1e-10, v).unwrap();
    assert_float_eq!(lambda, 0., abs <= 0.);
    assert_float_eq!(*v, [1., 0., 0.], abs_all <= 0.);
}
