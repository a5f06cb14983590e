use core::marker::PhantomData;
use crate::solver::{LinAlg, Objective};

//

/// Objective by closures
///
/// Wraps a pair of closures computing \\(f(X)\\) and \\(\nabla f(X)\\) as an [`Objective`].
pub struct ObjFn<L, FV, FG>
where L: LinAlg, FV: Fn(&[L::F]) -> L::F, FG: Fn(&[L::F], &mut[L::F])
{
    ph_l: PhantomData<L>,
    dim: usize,
    f: FV,
    gradf: FG,
}

impl<L, FV, FG> ObjFn<L, FV, FG>
where L: LinAlg, FV: Fn(&[L::F]) -> L::F, FG: Fn(&[L::F], &mut[L::F])
{
    /// Creates an instance.
    ///
    /// Returns [`ObjFn`] instance.
    /// * `dim` is a dimension of the matrix variable.
    /// * `f` takes \\(X\\) and returns \\(f(X)\\).
    /// * `gradf` takes \\(X\\) and writes \\(\nabla f(X)\\) to its second argument.
    pub fn new(dim: usize, f: FV, gradf: FG) -> Self
    {
        ObjFn {
            ph_l: PhantomData,
            dim, f, gradf,
        }
    }
}

impl<L, FV, FG> Objective<L> for ObjFn<L, FV, FG>
where L: LinAlg, FV: Fn(&[L::F]) -> L::F, FG: Fn(&[L::F], &mut[L::F])
{
    fn dim(&self) -> usize
    {
        self.dim
    }

    fn value(&self, x: &[L::F]) -> L::F
    {
        (self.f)(x)
    }

    fn grad(&self, x: &[L::F], g: &mut[L::F])
    {
        (self.gradf)(x, g)
    }
}
