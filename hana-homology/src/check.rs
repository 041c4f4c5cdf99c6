//! Consistency checks for complexes and chain maps, compared in coordinates.

use hana::{Ring, RingOps};

use crate::{ChainComplex, ChainMap, GridDeg, ModElem};

/// Whether `d ∘ d` vanishes on the generators of `C[i]`.
pub fn is_chain_complex_at<I, M, R>(c: &ChainComplex<I, M, R>, i: I) -> bool
where
    I: GridDeg,
    M: ModElem<R>,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    find_non_cycle(c, i).is_none()
}

pub fn assert_chain_complex<I, M, R>(c: &ChainComplex<I, M, R>, i: I)
where
    I: GridDeg,
    M: ModElem<R>,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    if let Some(k) = find_non_cycle(c, i) {
        panic!("d² is non-zero at {i}, on generator {k}.")
    }
}

fn find_non_cycle<I, M, R>(c: &ChainComplex<I, M, R>, i: I) -> Option<usize>
where
    I: GridDeg,
    M: ModElem<R>,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    let k = c.d_deg();
    let target = c.get(i + k + k);

    c.get(i).gens().position(|z| {
        let dz = c.differentiate(i, z);
        let ddz = c.differentiate(i + k, &dz);
        !target.vectorize(&ddz).is_some_and(|v| v.is_zero())
    })
}

/// Checks `f ∘ d₁ = d₂ ∘ f` on the generators of `c1[i]`.
pub fn assert_chain_map<I, M, N, R>(f: &ChainMap<I, M, N, R>, c1: &ChainComplex<I, M, R>, c2: &ChainComplex<I, N, R>, i: I)
where
    I: GridDeg,
    M: ModElem<R>,
    N: ModElem<R>,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    let k = c1.d_deg();
    assert_eq!(k, c2.d_deg(), "differentials have different degrees.");

    let j = i + f.deg();
    let target = c2.get(j + k);

    for (l, x) in c1.get(i).gens().enumerate() {
        let fdx = f.apply(i + k, &c1.differentiate(i, x));
        let dfx = c2.differentiate(j, &f.apply(i, x));

        let (v1, v2) = (target.vectorize(&fdx), target.vectorize(&dfx));
        assert!(v1.is_some() && v1 == v2, "f ∘ d != d ∘ f at {i}, on generator {l}.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChainComplex1, FreeChain};

    type C = ChainComplex1<FreeChain<i64>, i64>;
    type F = ChainMap<isize, FreeChain<i64>, FreeChain<i64>, i64>;

    #[test]
    fn id_is_chain_map() {
        let c = C::d3();
        let f = F::new(0, |_, z| z.clone());
        for i in c.support() {
            assert_chain_map(&f, &c, &c, i);
        }
    }

    #[test]
    fn scalar_is_chain_map() {
        let c = C::t2();
        let f = F::new(0, |_, z| z.clone() * 3);
        for i in c.support() {
            assert_chain_map(&f, &c, &c, i);
        }
    }

    #[test]
    #[should_panic]
    fn not_chain_map() {
        // e ↦ (i + 1) e does not commute with d.
        let c = C::d3();
        let f = F::new(0, |i, z| z.clone() * (i as i64 + 1));
        assert_chain_map(&f, &c, &c, 1);
    }

    #[test]
    #[should_panic]
    fn degree_mismatch() {
        let c = C::d3();
        let d = c.dual().unwrap();
        let f = ChainMap::zero(0);
        assert_chain_map(&f, &c, &d, 0);
    }
}
