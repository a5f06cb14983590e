use std::ops::{Index, IndexMut, Deref};
use num_traits::{Zero, One};
use hazan_core::solver::LinAlg;

//

/// Matrix builder
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-svg.js"></script>
///
/// Square matrix struct which owns a `Vec` of data array stored in column-major.
/// This struct relies on dynamic heap allocation.
#[derive(Debug, Clone)]
pub struct MatBuild<L: LinAlg>
{
    n: usize,
    array: Vec<L::F>,
}

impl<L: LinAlg> MatBuild<L>
{
    /// Creates an instance.
    ///
    /// Returns the [`MatBuild`] instance with zero data.
    /// * `n` is a number of rows and columns.
    pub fn new(n: usize) -> Self
    {
        MatBuild {
            n,
            array: vec![L::F::zero(); n * n],
        }
    }

    /// Creates an identity matrix.
    pub fn identity(n: usize) -> Self
    {
        MatBuild::new(n).by_fn(|r, c| if r == c {L::F::one()} else {L::F::zero()})
    }

    /// Creates an instance copying data stored in column-major.
    ///
    /// * `n` is a number of rows and columns.
    /// * `array` shall have the length `n * n`.
    pub fn from_colmaj(n: usize, array: &[L::F]) -> Self
    {
        assert_eq!(array.len(), n * n);

        MatBuild {
            n,
            array: array.to_vec(),
        }
    }

    /// Size of the matrix.
    ///
    /// Returns a tuple of a number of rows and columns.
    pub fn size(&self) -> (usize, usize)
    {
        (self.n, self.n)
    }

    /// Data by a function.
    ///
    /// * `func` takes a row and a column of the matrix and returns data of each element.
    pub fn set_by_fn<M>(&mut self, mut func: M)
    where M: FnMut(usize, usize) -> L::F
    {
        for c in 0.. self.n {
            for r in 0.. self.n {
                self[(r, c)] = func(r, c);
            }
        }
    }
    /// Builder pattern of [`MatBuild::set_by_fn`].
    pub fn by_fn<M>(mut self, func: M) -> Self
    where M: FnMut(usize, usize) -> L::F
    {
        self.set_by_fn(func);
        self
    }

    /// Data by an iterator in row-major.
    ///
    /// * `iter` iterates matrix data in row-major.
    pub fn set_iter_rowmaj<T, I>(&mut self, iter: T)
    where T: IntoIterator<Item=I>, I: Deref<Target=L::F>
    {
        let mut i = iter.into_iter();

        for r in 0.. self.n {
            for c in 0.. self.n {
                if let Some(v) = i.next() {
                    self[(r, c)] = *v;
                }
                else {
                    break;
                }
            }
        }
    }
    /// Builder pattern of [`MatBuild::set_iter_rowmaj`].
    pub fn iter_rowmaj<T, I>(mut self, iter: T) -> Self
    where T: IntoIterator<Item=I>, I: Deref<Target=L::F>
    {
        self.set_iter_rowmaj(iter);
        self
    }

    /// Scales by \\(\alpha\\).
    ///
    /// * `alpha` is a scalar \\(\alpha\\).
    pub fn set_scale(&mut self, alpha: L::F)
    {
        L::scale(alpha, &mut self.array);
    }
    /// Builder pattern of [`MatBuild::set_scale`].
    pub fn scale(mut self, alpha: L::F) -> Self
    {
        self.set_scale(alpha);
        self
    }

    /// Calculates \\({\bf Tr}\ A\\).
    pub fn trace(&self) -> L::F
    {
        let mut sum = L::F::zero();
        for i in 0.. self.n {
            sum = sum + self[(i, i)];
        }
        sum
    }

    /// Calculates \\({\bf Tr}(A B)\\) with another matrix \\(B\\) of the same size.
    pub fn trace_prod(&self, mat_b: &MatBuild<L>) -> L::F
    {
        assert_eq!(self.n, mat_b.n);

        L::trace_prod(self.n, &self.array, &mat_b.array)
    }

    /// Calculates eigenvalues, assuming the matrix is symmetric.
    ///
    /// Returns the eigenvalues in no particular order,
    /// or `None` if the decomposition does not converge.
    /// * `eps_zero` should be the same value as [`hazan_core::solver::SolverParam::eps_zero`].
    pub fn eigvals(&self, eps_zero: L::F) -> Option<Vec<L::F>>
    {
        let n = self.n;
        let f0 = L::F::zero();

        let mut mat = self.array.clone();
        let mut eigval = vec![f0; n];
        let mut eigvec = vec![f0; n * n];
        let mut work = vec![f0; L::sym_eig_worklen(n)];

        L::sym_eig(n, &mut mat, eps_zero, 300, &mut eigval, &mut eigvec, &mut work).ok()?;

        Some(eigval)
    }

    fn idx(&self, (r, c): (usize, usize)) -> usize
    {
        assert!(r < self.n);
        assert!(c < self.n);

        c * self.n + r
    }
}

//

impl<L: LinAlg> Index<(usize, usize)> for MatBuild<L>
{
    type Output = L::F;
    fn index(&self, index: (usize, usize)) -> &Self::Output
    {
        let i = self.idx(index);

        &self.array[i]
    }
}

impl<L: LinAlg> IndexMut<(usize, usize)> for MatBuild<L>
{
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output
    {
        let i = self.idx(index);

        &mut self.array[i]
    }
}

//

impl<L: LinAlg> AsRef<[L::F]> for MatBuild<L>
{
    fn as_ref(&self) -> &[L::F]
    {
        &self.array
    }
}

//

impl<L: LinAlg> core::fmt::Display for MatBuild<L>
{
    fn fmt(&self, f: &mut core::fmt::Formatter) -> Result<(), core::fmt::Error>
    {
        let n = self.n;
        if n == 0 {
            write!(f, "[ ]")?;
        }
        else {
            write!(f, "[ {:.3e}", self[(0, 0)])?;
            if n > 2 {
                write!(f, " ...")?;
            }
            if n > 1 {
                write!(f, " {:.3e}", self[(0, n - 1)])?;
            }

            if n > 2 {
                writeln!(f)?;
                write!(f, "  ...")?;
            }

            if n > 1 {
                writeln!(f)?;
                write!(f, "  {:.3e}", self[(n - 1, 0)])?;
                if n > 2 {
                    write!(f, " ...")?;
                }
                write!(f, " {:.3e}", self[(n - 1, n - 1)])?;
            }
            write!(f, " ]")?;
        }

        write!(f, " ({} x {})", n, n)
    }
}

//

#[test]
fn test_matbuild1()
{
    use float_eq::assert_float_eq;
    use hazan_core::FloatGeneric;

    type L = FloatGeneric<f64>;

    let ref_array = &[ // column-major
        1., 4., 7.,
        2., 5., 8.,
        3., 6., 9.,
    ];

    let m = MatBuild::<L>::new(3)
            .iter_rowmaj(&[
                1., 2., 3.,
                4., 5., 6.,
                7., 8., 9.,
            ])
            .scale(2.);

    let m_array: &[f64] = m.as_ref();
    let ref_scaled: Vec<f64> = ref_array.iter().map(|e| e * 2.).collect();
    assert_float_eq!(m_array, ref_scaled.as_slice(), abs_all <= 1e-12);

    assert_float_eq!(m.trace(), 30., abs <= 1e-12);
    assert_float_eq!(m.trace_prod(&MatBuild::identity(3)), 30., abs <= 1e-12);
    assert_eq!(format!("{}", m), "[ 2.000e0 ... 6.000e0\n  ...\n  1.400e1 ... 1.800e1 ] (3 x 3)");
}

#[test]
fn test_matbuild2()
{
    use float_eq::assert_float_eq;
    use hazan_core::FloatGeneric;

    type L = FloatGeneric<f64>;

    let m = MatBuild::<L>::new(2).iter_rowmaj(&[
        2., 1.,
        1., 2.,
    ]);

    let mut e = m.eigvals(1e-12).unwrap();
    e.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_float_eq!(e.as_slice(), [1., 3.].as_ref(), abs_all <= 1e-9);
}
