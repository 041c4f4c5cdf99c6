use std::sync::Arc;

use itertools::Itertools;
use log::{debug, trace};
use num_traits::{One, Zero};
use hana::{EucRing, EucRingOps};
use hana_matrix::dense::{col_echelon, row_echelon, snf, Mat, RowEchelon};
use hana_matrix::sparse::SpVec;
use hana_matrix::MatTrait;

use crate::{ChainComplex, Grid, GridDeg, HomologyOptions, HomologyStrategy, ModElem, ModStr, Summand};
use super::combine_dense;

/// Homology over a Euclidean ring by row-echelon elimination,
/// with torsion read off from a Smith normal form.
///
/// The elimination of each `dⱼ` is computed once and shared between
/// `Hⱼ` (as the outgoing map) and `Hⱼ₊ₖ` (as the incoming map).
pub struct EucHomologyCalc<I, M, R>
where I: GridDeg {
    complex: ChainComplex<I, M, R>,
    options: HomologyOptions,
    elims: Grid<I, RowEchelon<R>>
}

impl<I, M, R> EucHomologyCalc<I, M, R>
where
    I: GridDeg,
    M: ModElem<R>,
    R: EucRing, for<'x> &'x R: EucRingOps<R>
{
    pub fn new(complex: &ChainComplex<I, M, R>, options: HomologyOptions) -> Self {
        let complex = complex.clone();
        let with_trans = !options.only_structures;

        let c = complex.clone();
        let elims = Grid::new(complex.support(), move |j| {
            let d = c.d_matrix(j).to_dense();
            row_echelon(&d, [with_trans, with_trans])
        });

        Self { complex, options, elims }
    }

    //              a1              a2
    //    C[i-k] ---------> C[i] ---------> C[i+k]
    //                       |
    //                    p1 |
    //                       V
    //                  R^r1 ⊕ R^(n-r1)
    //
    //  p1 a1 = [h1; 0] with h1 of full row rank r1, and a2 vanishes on
    //  the first summand. Hence
    //
    //    H[i] = Ker(a2) / Im(a1)
    //         ≅ Ker(a2 t1) (free) ⊕ R^r1 / Im(h1) (tor)
    //
    //  where t1 = p1⁻¹[:, r1..n] and the torsion is given by snf(h1).

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

        let with_trans = !self.options.only_structures;
        let tor_snf = (r1 > 0).then(|| snf(&e1.top(), [with_trans, with_trans, false, false]));
        let tors = match &tor_snf {
            Some(s) => s.factors().into_iter().filter(|a| !a.is_unit()).cloned().collect_vec(),
            None => vec![]
        };

        debug!("H[{i}]: n = {n}, r1 = {r1}, r2 = {r2}, tors = {}.", tors.len());

        if self.options.only_structures {
            return ModStr::from_structure(n - r1 - r2, tors)
        }

        let free = Self::free_part(c.clone(), &e1, &e2);
        let tor = match tor_snf {
            Some(s) => {
                let (_, [u, uinv, _, _]) = s.destruct();
                let (Some(u), Some(uinv)) = (u, uinv) else { unreachable!() };
                Self::tor_part(c, &e1, u, uinv, tors)
            },
            None => ModStr::zero()
        };

        &free + &tor
    }

    fn free_part(c: Arc<ModStr<M, R>>, e1: &RowEchelon<R>, e2: &RowEchelon<R>) -> ModStr<M, R> {
        let (Some(p1), Some(t1)) = (e1.p(), e1.cokernel()) else { unreachable!() };
        let r1 = e1.rank();

        let b2 = &e2.top() * &t1;          // r2 x (n - r1)
        let ce = col_echelon(&b2);
        let z = &t1 * &ce.kernel();         // n x (n - r1 - r2)

        trace!("free part: {:?}", z.shape());

        let gens = combine_dense(&c.gens().cloned().collect_vec(), &z);
        let p1 = p1.submat_rows(r1 .. p1.nrows());

        ModStr::free(gens, move |x| {
            let v = c.vectorize(x)?.to_vec();
            let w = p1.apply(&v);
            let y = ce.solve_kernel(&w)?;
            Some(SpVec::from(y))
        })
    }

    fn tor_part(c: Arc<ModStr<M, R>>, e1: &RowEchelon<R>, u: Mat<R>, uinv: Mat<R>, tors: Vec<R>) -> ModStr<M, R> {
        let (Some(p1), Some(pinv1)) = (e1.p(), e1.pinv()) else { unreachable!() };
        let (r1, l) = (e1.rank(), tors.len());

        // non-unit factors come last.
        let z = &pinv1.submat_cols(0 .. r1) * &uinv.submat_cols(r1 - l .. r1);
        let gens = combine_dense(&c.gens().cloned().collect_vec(), &z);
        let summands = gens.into_iter().zip(tors.iter().cloned()).map(|(z, d)|
            Summand::new(z, d)
        ).collect();

        let q = &u.submat_rows(r1 - l .. r1) * &p1.submat_rows(0 .. r1);   // l x n

        ModStr::new(summands, move |x| {
            let v = c.vectorize(x)?.to_vec();
            let y = q.apply(&v).iter().zip(tors.iter()).map(|(a, d)| reduce(a, d)).collect_vec();
            Some(SpVec::from(y))
        })
    }
}

// The remainder of `a` by `d`, moved into the normalized range when
// `a % d` falls outside of it. For integers this is `0 <= r < d`.
fn reduce<R>(a: &R, d: &R) -> R
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    let r = a % d;
    if r.is_zero() || r.normalizing_unit().is_one() {
        return r
    }
    let s = &r + d;
    if (&s / d).is_zero() { s } else { r }
}

impl<I, M, R> HomologyStrategy<I, M, R> for EucHomologyCalc<I, M, R>
where
    I: GridDeg,
    M: ModElem<R>,
    R: EucRing, for<'x> &'x R: EucRingOps<R>
{
    fn calculate(&self, i: I) -> ModStr<M, R> {
        self.compute(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hana::lc::FreeGen;
    use crate::{ChainComplex1, FreeChain};

    type C = ChainComplex1<FreeChain<i64>, i64>;

    #[test]
    fn elims_shared() {
        let c = C::d3();
        let calc = EucHomologyCalc::new(&c, HomologyOptions::default());

        // d has degree -1: H₁ uses d₂ and d₁.
        calc.calculate(1);
        assert!(calc.elims.is_cached(1));
        assert!(calc.elims.is_cached(2));
        assert!(!calc.elims.is_cached(0));

        calc.calculate(0);
        assert!(calc.elims.is_cached(0));
    }

    #[test]
    fn torsion_gens() {
        // Z² <-[2 0; 0 3]- Z²: H₀ = Z/6.
        let c = C::from_mats(-1, 0, vec![
            hana_matrix::sparse::SpMat::zero((0, 2)),
            hana_matrix::sparse::SpMat::from_dense_data((2, 2), [2, 0, 0, 3]),
        ]);
        let calc = EucHomologyCalc::new(&c, HomologyOptions::default());
        let h = calc.calculate(0);

        assert_eq!(h.rank(), 0);
        assert_eq!(h.tors(), vec![6]);

        let z = h.generator(0).clone();
        assert_eq!(h.vectorize(&z).map(|v| v.to_vec()), Some(vec![1]));

        let e0 = FreeChain::from(FreeGen(0));
        let e1 = FreeChain::from(FreeGen(1));
        let v0 = h.vectorize(&e0).map(|v| v.to_vec());
        let v1 = h.vectorize(&e1).map(|v| v.to_vec());

        // e0 and e1 have orders 2 and 3 in Z/6.
        let (a0, a1) = (v0.unwrap()[0], v1.unwrap()[0]);
        assert_eq!((a0 * 2) % 6, 0);
        assert_ne!(a0 % 6, 0);
        assert_eq!((a1 * 3) % 6, 0);
        assert_ne!(a1 % 6, 0);
    }

    #[test]
    fn mixed() {
        // Z³ <-[2; 0; 0]- Z: H₀ = Z² ⊕ Z/2.
        let c = C::from_mats(-1, 0, vec![
            hana_matrix::sparse::SpMat::zero((0, 3)),
            hana_matrix::sparse::SpMat::from_dense_data((3, 1), [2, 0, 0]),
        ]);
        let calc = EucHomologyCalc::new(&c, HomologyOptions::default());
        let h = calc.calculate(0);

        assert_eq!(h.rank(), 2);
        assert_eq!(h.tors(), vec![2]);
        assert_eq!(h.to_string(), "Z² ⊕ Z/2");

        for k in 0..3 {
            let z = h.generator(k).clone();
            let v = h.vectorize(&z).map(|v| v.to_vec());
            let e = (0..3).map(|l| if l == k { 1 } else { 0 }).collect_vec();
            assert_eq!(v, Some(e));
        }
    }

    #[test]
    fn torsion_coords_canonical() {
        let c = C::rp2();
        let calc = EucHomologyCalc::new(&c, HomologyOptions::default());
        let h = calc.calculate(1);
        assert_eq!(h.tors(), vec![2]);

        let z = h.generator(0).clone();
        for x in [z.clone(), -&z, &z * 3, &z * -5] {
            assert_eq!(h.vectorize(&x).map(|v| v.to_vec()), Some(vec![1]));
        }
        assert_eq!(h.vectorize(&(&z * 2)).map(|v| v.to_vec()), Some(vec![0]));

        // Z <-6- Z: H₀ = Z/6.
        let c = C::from_mats(-1, 0, vec![
            hana_matrix::sparse::SpMat::zero((0, 1)),
            hana_matrix::sparse::SpMat::from_dense_data((1, 1), [6]),
        ]);
        let calc = EucHomologyCalc::new(&c, HomologyOptions::default());
        let h = calc.calculate(0);
        let z = h.generator(0).clone();
        assert_eq!(h.vectorize(&(&z * 5)).map(|v| v.to_vec()), Some(vec![5]));
        assert_eq!(h.vectorize(&-&z).map(|v| v.to_vec()), Some(vec![5]));
        assert_eq!(h.vectorize(&(&z * -8)).map(|v| v.to_vec()), Some(vec![4]));
    }

    #[test]
    fn vectorize_additive() {
        // Z³ <-[2; 0; 0]- Z: H₀ = Z² ⊕ Z/2.
        let c = C::from_mats(-1, 0, vec![
            hana_matrix::sparse::SpMat::zero((0, 3)),
            hana_matrix::sparse::SpMat::from_dense_data((3, 1), [2, 0, 0]),
        ]);
        let calc = EucHomologyCalc::new(&c, HomologyOptions::default());
        let h = calc.calculate(0);
        let coords = |x: &FreeChain<i64>| h.vectorize(x).map(|v| v.to_vec()).unwrap();

        let (z0, z1, t) = (h.generator(0).clone(), h.generator(1).clone(), h.generator(2).clone());
        let b = c.differentiate(1, &FreeChain::from(FreeGen(3)));

        let x = &(&(&z0 * 4) - &z1) + &(&(&t * 3) + &b);
        assert_eq!(coords(&x), vec![4, -1, 1]);

        let (va, vb) = (coords(&(&z0 + &t)), coords(&(&z1 * -2 + &t)));
        let sum = coords(&(&(&z0 + &t) + &(&z1 * -2 + &t)));
        assert_eq!(sum[..2], [va[0] + vb[0], va[1] + vb[1]]);
        assert_eq!(sum[2], (va[2] + vb[2]) % 2);
    }
}
