use std::marker::PhantomData;
use std::sync::Arc;

use hana::{Ring, RingOps};
use hana_matrix::sparse::SpMat;

use crate::utils::make_matrix;
use crate::{Dual, GridDeg, ModElem, ModStr};

/// A homomorphism `M -> N`.
pub type Hom<M, N> = Arc<dyn Fn(&M) -> N + Send + Sync>;

type MapFn<I, M, N> = Arc<dyn Fn(I, &M) -> N + Send + Sync>;

/// A family of homomorphisms `fᵢ: Mᵢ -> Nᵢ₊ₖ` where `k` is the degree.
pub struct ChainMap<I, M, N, R>
where I: GridDeg {
    deg: I,
    map: MapFn<I, M, N>,
    _r: PhantomData<fn() -> R>
}

impl<I, M, N, R> ChainMap<I, M, N, R>
where
    I: GridDeg,
    M: ModElem<R>,
    N: ModElem<R>,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    pub fn new<F>(deg: I, map: F) -> Self
    where F: Fn(I, &M) -> N + Send + Sync + 'static {
        Self { deg, map: Arc::new(map), _r: PhantomData }
    }

    pub fn zero(deg: I) -> Self {
        Self::new(deg, |_, _| N::zero())
    }

    pub fn deg(&self) -> I {
        self.deg
    }

    /// The component `fᵢ`.
    pub fn at(&self, i: I) -> Hom<M, N> {
        let map = self.map.clone();
        Arc::new(move |z| map(i, z))
    }

    pub fn apply(&self, i: I, z: &M) -> N {
        (self.map)(i, z)
    }

    /// `other ∘ self`, of degree `self.deg() + other.deg()`.
    pub fn compose<L>(&self, other: &ChainMap<I, N, L, R>) -> ChainMap<I, M, L, R>
    where L: ModElem<R> {
        let (f, g) = (self.map.clone(), other.map.clone());
        let k = self.deg;
        ChainMap::new(self.deg + other.deg, move |i, z| g(i + k, &f(i, z)))
    }

    /// The map `i ↦ f(i - s)`, matching a complex shifted by `s`.
    pub fn shifted(&self, s: I) -> Self {
        let f = self.map.clone();
        Self::new(self.deg, move |i, z| f(i - s, z))
    }

    /// The matrix of `fᵢ` from the generators of `from`
    /// to the coordinates of `to`.
    ///
    /// Panics if an image is not vectorizable in `to`.
    pub fn as_matrix(&self, i: I, from: &ModStr<M, R>, to: &ModStr<N, R>) -> SpMat<R> {
        let f = self.map.clone();
        make_matrix(from, to, move |z| f(i, z))
    }

    /// The transpose map `g ↦ g ∘ fᵢ₋ₖ : Dual(Nᵢ) -> Dual(Mᵢ₋ₖ)`, of degree `-k`.
    pub fn dual(&self) -> ChainMap<I, Dual<N, R>, Dual<M, R>, R> {
        let k = self.deg;
        let f = self.map.clone();
        ChainMap::new(-k, move |i, g: &Dual<N, R>| {
            let f = f.clone();
            g.compose(move |z: &M| f(i - k, z))
        })
    }
}

impl<I, M, N, R> Clone for ChainMap<I, M, N, R>
where I: GridDeg {
    fn clone(&self) -> Self {
        Self { deg: self.deg, map: self.map.clone(), _r: PhantomData }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;
    use hana::lc::{FreeGen, Lc};

    type X = FreeGen<usize>;
    type L = Lc<X, i64>;

    fn e(i: usize) -> L {
        L::from(FreeGen(i))
    }

    // z ↦ 2z, of degree 1.
    fn double() -> ChainMap<isize, L, L, i64> {
        ChainMap::new(1, |_, z: &L| z.clone() * 2)
    }

    #[test]
    fn apply() {
        let f = double();
        assert_eq!(f.deg(), 1);
        assert_eq!(f.apply(0, &e(0)), e(0) * 2);
        assert_eq!((f.at(3))(&e(1)), e(1) * 2);
    }

    #[test]
    fn zero() {
        let f = ChainMap::<isize, L, L, i64>::zero(-1);
        assert_eq!(f.deg(), -1);
        assert_eq!(f.apply(0, &e(0)), L::zero());
    }

    #[test]
    fn compose() {
        // z ↦ (i + 1) z at index i.
        let f = ChainMap::<isize, L, L, i64>::new(1, |i, z| z.clone() * (i as i64 + 1));
        let g = f.compose(&f);
        assert_eq!(g.deg(), 2);

        // f at 1 after f at 0: 2 * 1.
        assert_eq!(g.apply(0, &e(0)), e(0) * 2);
        // f at 3 after f at 2: 4 * 3.
        assert_eq!(g.apply(2, &e(0)), e(0) * 12);
    }

    #[test]
    fn shifted() {
        let f = ChainMap::<isize, L, L, i64>::new(0, |i, z| z.clone() * (i as i64));
        let g = f.shifted(2);
        assert_eq!(g.apply(5, &e(0)), e(0) * 3);
    }

    #[test]
    fn as_matrix() {
        let m = ModStr::<L, i64>::from_raw_gens((0..2).map(FreeGen));
        let n = ModStr::<L, i64>::from_raw_gens((2..5).map(FreeGen));

        // e0 ↦ e2 + e3, e1 ↦ -e4.
        let f = ChainMap::<isize, L, L, i64>::new(0, |_, z: &L| z.apply(|x|
            match x.0 {
                0 => e(2) + e(3),
                _ => -e(4)
            }
        ));

        let a = f.as_matrix(0, &m, &n);
        assert_eq!(a, SpMat::from_dense_data((3, 2), [1,0,1,0,0,-1]));
    }

    #[test]
    fn dual() {
        let m = ModStr::<L, i64>::from_raw_gens((0..2).map(FreeGen));
        let n = ModStr::<L, i64>::from_raw_gens((2..5).map(FreeGen));
        let f = ChainMap::<isize, L, L, i64>::new(1, |_, z: &L| z.apply(|x|
            match x.0 {
                0 => e(2) + e(3),
                _ => -e(4)
            }
        ));

        let (dm, dn) = (m.dual().unwrap(), n.dual().unwrap());
        let g = f.dual();
        assert_eq!(g.deg(), -1);

        let a = g.as_matrix(1, &dn, &dm);
        assert_eq!(a, f.as_matrix(0, &m, &n).transpose());
    }
}
