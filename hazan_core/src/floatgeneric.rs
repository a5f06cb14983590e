use num_traits::Float;
use core::marker::PhantomData;
use core::fmt::{Debug, LowerExp};
use core::ops::{Index, IndexMut};
use crate::solver::LinAlg;

/// `num::Float`-generic [`LinAlg`] implementation
///
/// All numeric operations are written in pure Rust, but slow.
#[derive(Debug, Clone)]
pub struct FloatGeneric<F>
{
    ph_f: PhantomData<F>,
}

//

struct MatIdx<'a, F: Float>
{
    n_row: usize,
    n_col: usize,
    mat: &'a[F],
    transpose: bool,
}

impl<'a, F: Float> MatIdx<'a, F>
{
    fn idx(&self, (r, c): (usize, usize)) -> usize
    {
        let (r, c) = if !self.transpose {(r, c)} else {(c, r)};

        assert!(r < self.n_row);
        assert!(c < self.n_col);

        c * self.n_row + r
    }
}

impl<'a, F: Float> Index<(usize, usize)> for MatIdx<'a, F>
{
    type Output = F;

    fn index(&self, index: (usize, usize)) -> &Self::Output
    {
        &self.mat[self.idx(index)]
    }
}

//

struct MatIdxMut<'a, F: Float>
{
    n: usize,
    mat: &'a mut[F],
}

impl<'a, F: Float> MatIdxMut<'a, F>
{
    fn idx(&self, (r, c): (usize, usize)) -> usize
    {
        assert!(r < self.n);
        assert!(c < self.n);

        c * self.n + r
    }

    fn set_identity(&mut self)
    {
        for a in self.mat.iter_mut() {
            *a = F::zero();
        }
        for i in 0.. self.n {
            self[(i, i)] = F::one();
        }
    }
}

impl<'a, F: Float> Index<(usize, usize)> for MatIdxMut<'a, F>
{
    type Output = F;

    fn index(&self, index: (usize, usize)) -> &Self::Output
    {
        &self.mat[self.idx(index)]
    }
}

impl<'a, F: Float> IndexMut<(usize, usize)> for MatIdxMut<'a, F>
{
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output
    {
        let i = self.idx(index);

        &mut self.mat[i]
    }
}

//

// cyclic Jacobi on a full symmetric matrix; rotations are applied to both triangles
fn jacobi_eig<F: Float>(mat_x: &mut MatIdxMut<F>, mat_z: &mut MatIdxMut<F>, eps: F, max_sweep: usize) -> bool
{
    let n = mat_x.n;
    let tol = eps * eps;
    let f0 = F::zero();
    let f1 = F::one();
    let f2 = f1 + f1;

    // Frobenius norm is invariant under the rotations
    let mut sq_scale = f0;
    for a in mat_x.mat.iter() {
        sq_scale = sq_scale + *a * *a;
    }

    for _ in 0.. max_sweep {
        let mut conv = true;

        for i in 0.. n {
            for j in i + 1.. n {
                let a = mat_x[(i, i)];
                let b = mat_x[(j, j)];
                let d = mat_x[(i, j)];

                if (d * d > tol * (a * b).abs()) && (d * d > tol * sq_scale) {
                    conv = false;

                    let zeta = (b - a) / (f2 * d);
                    let t = if zeta > f0 {
                        f1 / (zeta + (f1 + zeta * zeta).sqrt())
                    }
                    else {
                        -f1 / (-zeta + (f1 + zeta * zeta).sqrt())
                    };
                    let c = (f1 + t * t).sqrt().recip();
                    let s = c * t;

                    for k in 0.. n {
                        if k != i && k != j {
                            let xi = mat_x[(k, i)];
                            let xj = mat_x[(k, j)];
                            mat_x[(k, i)] = c * xi - s * xj;
                            mat_x[(i, k)] = c * xi - s * xj;
                            mat_x[(k, j)] = s * xi + c * xj;
                            mat_x[(j, k)] = s * xi + c * xj;
                        }

                        let zi = mat_z[(k, i)];
                        let zj = mat_z[(k, j)];
                        mat_z[(k, i)] = c * zi - s * zj;
                        mat_z[(k, j)] = s * zi + c * zj;
                    }

                    mat_x[(i, i)] = c * c * a + s * s * b - f2 * c * s * d;
                    mat_x[(j, j)] = s * s * a + c * c * b + f2 * c * s * d;
                    mat_x[(i, j)] = f0;
                    mat_x[(j, i)] = f0;
                }
            }
        }

        if conv {
            return true;
        }
    }

    false
}

//

impl<F: Float + Debug + LowerExp> LinAlg for FloatGeneric<F>
{
    type F = F;

    fn norm(x: &[F]) -> F
    {
        let mut sum = F::zero();
        for u in x {
            sum = sum + *u * *u;
        }
        sum.sqrt()
    }

    fn inner_prod(x: &[F], y: &[F]) -> F
    {
        assert_eq!(x.len(), y.len());

        let mut sum = F::zero();
        for (u, v) in x.iter().zip(y) {
            sum = sum + *u * *v;
        }
        sum
    }

    fn copy(x: &[F], y: &mut[F])
    {
        assert_eq!(x.len(), y.len());

        for (u, v) in x.iter().zip(y) {
            *v = *u;
        }
    }

    fn scale(alpha: F, x: &mut[F])
    {
        for u in x {
            *u = alpha * *u;
        }
    }

    fn add(alpha: F, x: &[F], y: &mut[F])
    {
        assert_eq!(x.len(), y.len());

        for (u, v) in x.iter().zip(y) {
            *v = *v + alpha * *u;
        }
    }

    // y = a*mat*x + b*y
    fn transform_ge(transpose: bool, n_row: usize, n_col: usize, alpha: F, mat: &[F], x: &[F], beta: F, y: &mut[F])
    {
        assert_eq!(mat.len(), n_row * n_col);
        if transpose {
            assert_eq!(x.len(), n_row);
            assert_eq!(y.len(), n_col);
        } else {
            assert_eq!(x.len(), n_col);
            assert_eq!(y.len(), n_row);
        };

        let mat = MatIdx {
            n_row, n_col, mat, transpose,
        };

        for r in 0.. y.len() {
            let mut mat_x = F::zero();
            for c in 0.. x.len() {
                mat_x = mat_x + mat[(r, c)] * x[c];
            }
            y[r] = alpha * mat_x + beta * y[r];
        }
    }

    fn rank1op(n: usize, alpha: F, x: &[F], mat: &mut[F])
    {
        assert_eq!(x.len(), n);
        assert_eq!(mat.len(), n * n);

        let mut mat = MatIdxMut {
            n, mat,
        };

        for c in 0.. n {
            for r in 0.. n {
                mat[(r, c)] = alpha * x[r] * x[c] + mat[(r, c)];
            }
        }
    }

    fn trace_prod(n: usize, mat_a: &[F], mat_b: &[F]) -> F
    {
        assert_eq!(mat_a.len(), n * n);
        assert_eq!(mat_b.len(), n * n);

        let mat_a = MatIdx {
            n_row: n, n_col: n, mat: mat_a, transpose: false,
        };
        let mat_bt = MatIdx {
            n_row: n, n_col: n, mat: mat_b, transpose: true,
        };

        let mut sum = F::zero();
        for c in 0.. n {
            for r in 0.. n {
                sum = sum + mat_a[(r, c)] * mat_bt[(r, c)];
            }
        }
        sum
    }

    fn sym_eig_worklen(_n: usize) -> usize
    {
        0
    }

    fn sym_eig(n: usize, mat: &mut[F], eps_zero: F, max_sweep: usize,
        eigval: &mut[F], eigvec: &mut[F], _work: &mut[F]) -> Result<(), ()>
    {
        assert_eq!(mat.len(), n * n);
        assert_eq!(eigval.len(), n);
        assert_eq!(eigvec.len(), n * n);

        let mut mat_x = MatIdxMut {
            n, mat,
        };
        let mut mat_z = MatIdxMut {
            n, mat: eigvec,
        };

        mat_z.set_identity();

        if !jacobi_eig(&mut mat_x, &mut mat_z, eps_zero, max_sweep) {
            log::warn!("jacobi: not converged within {} sweeps", max_sweep);
            return Err(());
        }

        for i in 0.. n {
            eigval[i] = mat_x[(i, i)];
        }

        Ok(())
    }
}

//

#[test]
fn test_sym_eig1()
{
    use float_eq::assert_float_eq;

    type L = FloatGeneric<f64>;

    let mat = &mut[ // column-major
        2., 1., 0.,
        1., 2., 0.,
        0., 0., -1.,
    ];
    let ref_mat = mat.clone();
    let eigval = &mut[0.; 3];
    let eigvec = &mut[0.; 9];

    L::sym_eig(3, mat, 1e-12, 100, eigval, eigvec, &mut[]).unwrap();

    let mut sorted = *eigval;
    sorted.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap());
    assert_float_eq!(sorted, [-1., 1., 3.], abs_all <= 1e-9);

    // G v = lambda v for each pair
    for i in 0.. 3 {
        let v = &eigvec[i * 3.. i * 3 + 3];
        let gv = &mut[0.; 3];
        L::transform_ge(false, 3, 3, 1., &ref_mat, v, 0., gv);
        for k in 0.. 3 {
            assert_float_eq!(gv[k], eigval[i] * v[k], abs <= 1e-9);
        }
        assert_float_eq!(L::norm(v), 1., abs <= 1e-9);
    }
}

#[test]
fn test_trace_prod1()
{
    use float_eq::assert_float_eq;

    type L = FloatGeneric<f64>;

    let a = &[ // column-major
        1., 3.,
        2., 4.,
    ];
    let b = &[ // column-major
        5., 7.,
        6., 8.,
    ];
    // A B = [[19, 22], [43, 50]]
    assert_float_eq!(L::trace_prod(2, a, b), 69., abs <= 1e-12);

    let x = &[1., -1.];
    let s = &mut[0.; 4];
    L::rank1op(2, 2., x, s);
    assert_float_eq!(*s, [2., -2., -2., 2.], abs_all <= 1e-12);
}
