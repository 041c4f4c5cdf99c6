use itertools::Itertools;
use log::debug;
use hana::{Field, FieldOps};
use hana_matrix::dense::{lu, LU};
use hana_matrix::sparse::SpVec;

use crate::{ChainComplex, Grid, GridDeg, HomologyOptions, HomologyStrategy, ModElem, ModStr};
use super::combine_dense;

/// Homology over a field by LU decomposition. The result is always free.
///
/// ```text
///    H[i] = Ker(a2) / Im(a1) ≅ Ker(a2 t1)
/// ```
///
/// where the columns of `t1` span a complement of `Im(a1)`.
pub struct LUHomologyCalc<I, M, R>
where I: GridDeg {
    complex: ChainComplex<I, M, R>,
    options: HomologyOptions,
    elims: Grid<I, LU<R>>
}

impl<I, M, R> LUHomologyCalc<I, M, R>
where
    I: GridDeg,
    M: ModElem<R>,
    R: Field, for<'x> &'x R: FieldOps<R>
{
    pub fn new(complex: &ChainComplex<I, M, R>, options: HomologyOptions) -> Self {
        let complex = complex.clone();
        let c = complex.clone();
        let elims = Grid::new(complex.support(), move |j| {
            lu(&c.d_matrix(j).to_dense())
        });

        Self { complex, options, elims }
    }

    fn compute(&self, i: I) -> ModStr<M, R> {
        let c = self.complex.get(i);
        let n = c.dim();
        if n == 0 {
            return ModStr::zero()
        }

        let k = self.complex.d_deg();
        let (e1, e2) = (self.elims.get(i - k), self.elims.get(i));
        let (r1, r2) = (e1.rank(), e2.rank());

        assert!(n >= r1 + r2, "d² ≠ 0 at {i}.");
        debug!("H[{i}]: n = {n}, r1 = {r1}, r2 = {r2}.");

        if self.options.only_structures {
            return ModStr::from_structure(n - r1 - r2, vec![])
        }

        let t1 = e1.cokernel();              // n x (n - r1)
        let b2 = &e2.upper() * &t1;          // r2 x (n - r1)
        let e3 = lu(&b2);
        let z = &t1 * &e3.kernel();          // n x (n - r1 - r2)

        let gens = combine_dense(&c.gens().cloned().collect_vec(), &z);

        ModStr::free(gens, move |x| {
            let v = c.vectorize(x)?.to_vec();
            let w = e1.project_cokernel(&v);
            let y = e3.solve_kernel(&w)?;
            Some(SpVec::from(y))
        })
    }
}

impl<I, M, R> HomologyStrategy<I, M, R> for LUHomologyCalc<I, M, R>
where
    I: GridDeg,
    M: ModElem<R>,
    R: Field, for<'x> &'x R: FieldOps<R>
{
    fn calculate(&self, i: I) -> ModStr<M, R> {
        self.compute(i)
    }
}
