use log::info;
use num_bigint::BigInt;
use hana::{EucRing, EucRingOps, Field, FieldOps, Ring, RingOps};
use hana::{Poly, Ratio, FF};

use crate::utils::{EucHomologyCalc, LUHomologyCalc};
use crate::{ChainComplex, Grid, GridDeg, ModElem, ModStr};

pub type Homology<I, M, R> = Grid<I, ModStr<M, R>>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HomologyOptions {
    /// Compute only `rank` and `tors`, without generators or vectorizers.
    pub only_structures: bool
}

impl HomologyOptions {
    pub fn only_structures() -> Self {
        Self { only_structures: true }
    }
}

/// Computes the homology module `Hᵢ` of a fixed complex.
pub trait HomologyStrategy<I, M, R>: Send + Sync {
    fn calculate(&self, i: I) -> ModStr<M, R>;
}

impl<I, M, R, S> HomologyStrategy<I, M, R> for Box<S>
where S: HomologyStrategy<I, M, R> + ?Sized {
    fn calculate(&self, i: I) -> ModStr<M, R> {
        (**self).calculate(i)
    }
}

/// Rings for which a default homology strategy is chosen:
/// Euclidean elimination for integers and polynomials,
/// LU decomposition for fields.
pub trait HomologyRing: EucRing
where for<'x> &'x Self: EucRingOps<Self> {
    fn strategy<I, M>(c: &ChainComplex<I, M, Self>, options: HomologyOptions) -> Box<dyn HomologyStrategy<I, M, Self>>
    where I: GridDeg, M: ModElem<Self>;
}

macro_rules! impl_euc {
    ($($t:ty),*) => {
        $(impl HomologyRing for $t {
            fn strategy<I, M>(c: &ChainComplex<I, M, Self>, options: HomologyOptions) -> Box<dyn HomologyStrategy<I, M, Self>>
            where I: GridDeg, M: ModElem<Self> {
                Box::new(EucHomologyCalc::<I, M, Self>::new(c, options))
            }
        })*
    };
}

impl_euc!(i32, i64, i128, BigInt);

impl<const X: char, K> HomologyRing for Poly<X, K>
where K: Field, for<'x> &'x K: FieldOps<K> {
    fn strategy<I, M>(c: &ChainComplex<I, M, Self>, options: HomologyOptions) -> Box<dyn HomologyStrategy<I, M, Self>>
    where I: GridDeg, M: ModElem<Self> {
        Box::new(EucHomologyCalc::<I, M, Self>::new(c, options))
    }
}

impl<const P: i32> HomologyRing for FF<P> {
    fn strategy<I, M>(c: &ChainComplex<I, M, Self>, options: HomologyOptions) -> Box<dyn HomologyStrategy<I, M, Self>>
    where I: GridDeg, M: ModElem<Self> {
        Box::new(LUHomologyCalc::<I, M, Self>::new(c, options))
    }
}

impl<T> HomologyRing for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn strategy<I, M>(c: &ChainComplex<I, M, Self>, options: HomologyOptions) -> Box<dyn HomologyStrategy<I, M, Self>>
    where I: GridDeg, M: ModElem<Self> {
        Box::new(LUHomologyCalc::<I, M, Self>::new(c, options))
    }
}

impl<I, M, R> ChainComplex<I, M, R>
where
    I: GridDeg,
    M: ModElem<R>,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    /// The homology grid computed by `strategy`, supported
    /// where `self` is. Each `Hᵢ` is computed on first access.
    pub fn homology_with<S>(&self, strategy: S) -> Homology<I, M, R>
    where S: HomologyStrategy<I, M, R> + 'static {
        Grid::new(self.support(), move |i| {
            info!("compute H[{i}]..");
            let h = strategy.calculate(i);
            info!("H[{i}] = {h}");
            h
        })
    }
}

impl<I, M, R> ChainComplex<I, M, R>
where
    I: GridDeg,
    M: ModElem<R>,
    R: HomologyRing, for<'x> &'x R: EucRingOps<R>
{
    pub fn homology(&self, options: HomologyOptions) -> Homology<I, M, R> {
        self.homology_with(R::strategy(self, options))
    }
}
