use std::fmt::Display;
use std::ops::RangeInclusive;
use std::sync::Arc;

use delegate::delegate;
use itertools::Itertools;
use log::debug;
use num_traits::Zero;
use hana::{Ring, RingOps};
use hana::lc::{FreeGen, Gen, Lc};
use hana_matrix::sparse::SpMat;
use hana_matrix::MatTrait;

use crate::{isize2, ChainMap, Dual, Error, Grid, GridDeg, ModElem, ModStr};

pub type ChainComplex1<M, R> = ChainComplex<isize, M, R>;
pub type ChainComplex2<M, R> = ChainComplex<isize2, M, R>;
pub type ChainComplex3<M, R> = ChainComplex<crate::isize3, M, R>;

/// Elements of complexes built from literal matrices.
pub type FreeChain<R> = Lc<FreeGen<usize>, R>;

/// A graded module `{ Cᵢ }` together with a differential
/// `d: Cᵢ -> Cᵢ₊ₖ` of a fixed degree `k`, satisfying `d ∘ d = 0`.
pub struct ChainComplex<I, M, R>
where I: GridDeg {
    grid: Grid<I, ModStr<M, R>>,
    d: ChainMap<I, M, M, R>
}

impl<I, M, R> ChainComplex<I, M, R>
where
    I: GridDeg,
    M: ModElem<R>,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    pub fn new(grid: Grid<I, ModStr<M, R>>, d: ChainMap<I, M, M, R>) -> Self {
        Self { grid, d }
    }

    pub fn generate<It, F1, F2>(support: It, d_deg: I, grid_fn: F1, d_fn: F2) -> Self
    where
        It: IntoIterator<Item = I>,
        F1: Fn(I) -> ModStr<M, R> + Send + Sync + 'static,
        F2: Fn(I, &M) -> M + Send + Sync + 'static
    {
        let grid = Grid::new(support, grid_fn);
        let d = ChainMap::new(d_deg, d_fn);
        Self::new(grid, d)
    }

    pub fn grid(&self) -> &Grid<I, ModStr<M, R>> {
        &self.grid
    }

    delegate! {
        to self.grid {
            pub fn get(&self, i: I) -> Arc<ModStr<M, R>>;
            pub fn support(&self) -> impl Iterator<Item = I> + '_;
            pub fn is_supported(&self, i: I) -> bool;
        }
    }

    pub fn d_deg(&self) -> I {
        self.d.deg()
    }

    pub fn d(&self) -> &ChainMap<I, M, M, R> {
        &self.d
    }

    pub fn differentiate(&self, i: I, z: &M) -> M {
        self.d.apply(i, z)
    }

    pub fn is_free_to_free(&self, i: I) -> bool {
        self.get(i).is_free() && self.get(i + self.d_deg()).is_free()
    }

    /// The matrix of `d: Cᵢ -> Cᵢ₊ₖ`. Panics unless both ends are free.
    pub fn d_matrix(&self, i: I) -> SpMat<R> {
        assert!(self.is_free_to_free(i), "d at {i} is not a map between free modules.");

        let (c0, c1) = (self.get(i), self.get(i + self.d_deg()));
        self.d.as_matrix(i, &c0, &c1)
    }

    /// `self.shifted(s)[i] == self[i - s]`.
    pub fn shifted(&self, s: I) -> Self {
        let grid = self.grid.shifted(s);
        let d = self.d.shifted(s);
        Self::new(grid, d)
    }

    /// The dual complex `{ Hom(Cᵢ, R) }` with the transposed differential
    /// of degree `-k`. Fails if some supported module is not free.
    pub fn dual(&self) -> Result<ChainComplex<I, Dual<M, R>, R>, Error> {
        for i in self.support() {
            let c = self.get(i);
            if !c.is_free() {
                return Err(Error::NotFreeAt { index: i.to_string(), symbol: c.to_string() })
            }
        }

        let grid = self.grid.map(|i, c| match c.dual() {
            Ok(c) => c,
            Err(e) => panic!("{e} (at {i})")
        });
        let d = self.d.dual();

        Ok(ChainComplex::new(grid, d))
    }

    pub fn display_d_at(&self, i: I) -> String
    where M: Display {
        let j = i + self.d_deg();
        let (c0, c1) = (self.get(i), self.get(j));

        let mut res = format!("C[{i}]: {c0} -> C[{j}]: {c1}");
        for z in c0.gens() {
            let dz = self.differentiate(i, z);
            res += &format!("\n  {z} ↦ {dz}");
        }
        res
    }

    pub fn print_d(&self)
    where M: Display {
        for i in self.support() {
            println!("{}\n", self.display_d_at(i));
        }
    }
}

impl<M, R> ChainComplex1<M, R>
where
    M: ModElem<R>,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    /// The complex that agrees with `self` on `range` and is zero outside.
    pub fn truncated(&self, range: RangeInclusive<isize>) -> Self {
        let d_deg = self.d_deg();
        let support = self.support().filter(|i| range.contains(i)).collect_vec();

        let (c, r) = (self.clone(), range.clone());
        let grid = Grid::new(support, move |i| {
            if r.contains(&i) {
                c.get(i).as_ref().clone()
            } else {
                ModStr::zero()
            }
        });

        let d = self.d.clone();
        let d = ChainMap::new(d_deg, move |i, z| {
            if range.contains(&i) && range.contains(&(i + d_deg)) {
                d.apply(i, z)
            } else {
                M::zero()
            }
        });

        Self::new(grid, d)
    }
}

impl<X, R> ChainComplex1<Lc<X, R>, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    /// Splits each `Cᵢ` by the secondary degree of its generators,
    /// giving a bigraded complex with differential of degree `(k, d_deg2)`.
    ///
    /// Panics if some generator is not a single raw generator.
    pub fn as_bigraded<F>(&self, d_deg2: isize, secondary: F) -> ChainComplex2<Lc<X, R>, R>
    where F: Fn(&X) -> isize + Send + Sync + 'static {
        let support = self.support().flat_map(|i| {
            let c = self.get(i);
            c.gens()
                .map(|z| secondary(&raw_gen(z)))
                .unique()
                .sorted()
                .map(move |j| isize2(i, j))
                .collect_vec()
        }).collect_vec();

        debug!("bigraded support: {}", support.iter().join(", "));

        let c = self.clone();
        let grid = Grid::new(support, move |isize2(i, j)| {
            let gens = c.get(i).gens()
                .map(raw_gen)
                .filter(|x| secondary(x) == j)
                .collect_vec();
            ModStr::from_raw_gens(gens)
        });

        let d = self.d.clone();
        let d2 = ChainMap::new(isize2(self.d_deg(), d_deg2), move |isize2(i, _), z| d.apply(i, z));

        ChainComplex::new(grid, d2)
    }
}

fn raw_gen<X, R>(z: &Lc<X, R>) -> X
where X: Gen, R: Ring, for<'x> &'x R: RingOps<R> {
    let Some(x) = z.as_gen() else {
        panic!("{z} is not a raw generator.")
    };
    x
}

impl<R> ChainComplex1<FreeChain<R>, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    /// The free complex whose differential at `offset + k` is given by
    /// `mats[k]`. `C[offset + k]` has rank `mats[k].ncols()`, and modules
    /// outside the range are zero.
    pub fn from_mats(d_deg: isize, offset: isize, mats: Vec<SpMat<R>>) -> Self {
        let n = mats.len();
        let range = offset .. offset + n as isize;
        let index = move |i: isize| range.contains(&i).then(|| (i - offset) as usize);

        for (k, a) in mats.iter().enumerate() {
            let j = offset + k as isize + d_deg;
            let m = index(j).map(|l| mats[l].ncols()).unwrap_or(0);
            assert_eq!(a.nrows(), m, "mats[{k}] has {} rows, but the target has rank {m}.", a.nrows());
        }

        // generators are numbered consecutively through the range.
        let starts = mats.iter().scan(0, |s, a| {
            let s0 = *s;
            *s += a.ncols();
            Some(s0)
        }).collect_vec();

        let (mats, starts) = (Arc::new(mats), Arc::new(starts));

        let (m, s, idx) = (mats.clone(), starts.clone(), index.clone());
        let grid_fn = move |i| match idx(i) {
            Some(k) => ModStr::from_raw_gens((0..m[k].ncols()).map(|j| FreeGen(s[k] + j))),
            None => ModStr::from_raw_gens([])
        };

        let d_fn = move |i, z: &FreeChain<R>| {
            let (Some(k), Some(l)) = (index(i), index(i + d_deg)) else {
                return FreeChain::zero()
            };
            let (a, s0, s1) = (&mats[k], starts[k], starts[l]);

            z.apply(|x| {
                if !(s0 .. s0 + a.ncols()).contains(&x.0) {
                    return FreeChain::zero()
                }
                a.col_vec(x.0 - s0).iter().map(|(i, r)|
                    (FreeGen(s1 + i), r.clone())
                ).collect()
            })
        };

        Self::generate(range_of(offset, n, d_deg), d_deg, grid_fn, d_fn)
    }
}

fn range_of(offset: isize, n: usize, d_deg: isize) -> Vec<isize> {
    let range = offset .. offset + n as isize;
    if d_deg > 0 {
        range.collect()
    } else {
        range.rev().collect()
    }
}

impl<I, M, R> Clone for ChainComplex<I, M, R>
where I: GridDeg {
    fn clone(&self) -> Self {
        Self { grid: self.grid.clone(), d: self.d.clone() }
    }
}
