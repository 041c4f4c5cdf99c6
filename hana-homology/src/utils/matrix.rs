use hana::{Ring, RingOps};
use hana_matrix::dense::Mat;
use hana_matrix::sparse::{SpMat, SpVec};
use hana_matrix::MatTrait;

use crate::config::is_multithread_enabled;
use crate::{ModElem, ModStr};

#[cfg(feature = "multithread")]
use rayon::prelude::{IntoParallelIterator, ParallelIterator};

fn map_cols<T, F>(n: usize, f: F) -> Vec<T>
where T: Send, F: Fn(usize) -> T + Send + Sync { 
    cfg_if::cfg_if! { 
        if #[cfg(feature = "multithread")] {
            if is_multithread_enabled() { 
                return (0..n).into_par_iter().map(f).collect()
            }
        }
    }
    (0..n).map(f).collect()
}

/// The elements `Σᵢ aᵢⱼ bᵢ` for each column `j` of `a`. 
pub fn combine<M, R>(basis: &[M], a: &SpMat<R>) -> Vec<M>
where M: ModElem<R>, R: Ring, for<'x> &'x R: RingOps<R> { 
    assert_eq!(basis.len(), a.nrows());

    map_cols(a.ncols(), |j| { 
        a.col_vec(j).iter().fold(M::zero(), |res, (i, r)| 
            res + basis[i].clone() * r.clone()
        )
    })
}

pub fn combine_dense<M, R>(basis: &[M], a: &Mat<R>) -> Vec<M>
where M: ModElem<R>, R: Ring, for<'x> &'x R: RingOps<R> { 
    combine(basis, &a.to_sparse())
}

/// The matrix of `f` with respect to the generators of `from` 
/// and the coordinates of `to`. 
/// 
/// Panics if some `f(x)` is not vectorizable in `to`.
pub fn make_matrix<M, N, R, F>(from: &ModStr<M, R>, to: &ModStr<N, R>, f: F) -> SpMat<R>
where 
    M: ModElem<R>, 
    N: ModElem<R>, 
    R: Ring, for<'x> &'x R: RingOps<R>,
    F: Fn(&M) -> N + Send + Sync
{ 
    let (m, n) = (to.dim(), from.dim());
    let cols = map_cols(n, |j| make_matrix_col(from, to, &f, j));
    SpMat::from_col_vecs(m, cols)
}

#[inline(never)] // for profilability
fn make_matrix_col<M, N, R, F>(from: &ModStr<M, R>, to: &ModStr<N, R>, f: &F, j: usize) -> SpVec<R>
where 
    M: ModElem<R>, 
    N: ModElem<R>, 
    R: Ring, for<'x> &'x R: RingOps<R>,
    F: Fn(&M) -> N
{ 
    let x = from.generator(j);
    let y = f(x);
    let Some(v) = to.vectorize(&y) else { 
        panic!("image of generator {j} is not in the span of the target generators.")
    };
    v
}

#[cfg(test)]
mod tests { 
    use super::*;
    use num_traits::Zero;
    use hana::lc::{FreeGen, Lc};

    type L = Lc<FreeGen<usize>, i64>;

    fn e(i: usize) -> L { 
        L::from(FreeGen(i))
    }

    #[test]
    fn combine_gens() { 
        let basis = vec![e(0), e(1), e(2)];
        let a = SpMat::from_dense_data((3, 2), [
            1, 0,
            2, 1,
            0, -1
        ]);
        let res = combine(&basis, &a);
        assert_eq!(res, vec![e(0) + e(1) * 2, e(1) - e(2)]);
    }

    #[test]
    fn combine_empty() { 
        let basis: Vec<L> = vec![];
        let a = SpMat::<i64>::zero((0, 2));
        let res = combine(&basis, &a);
        assert_eq!(res, vec![L::zero(), L::zero()]);
    }

    #[test]
    fn make_matrix_lc() { 
        let from = ModStr::from_raw_gens([FreeGen(0), FreeGen(1)]);
        let to = ModStr::from_raw_gens([FreeGen(10), FreeGen(11), FreeGen(12)]);
        let a = make_matrix(&from, &to, |z: &L| z.apply(|x| 
            L::from(FreeGen(x.0 + 10)) + L::from(FreeGen(x.0 + 11)) * -1
        ));
        assert_eq!(a, SpMat::from_dense_data((3, 2), [
             1,  0,
            -1,  1,
             0, -1
        ]));
    }

    #[test]
    #[should_panic]
    fn make_matrix_fail() { 
        let from = ModStr::from_raw_gens([FreeGen(0)]);
        let to = ModStr::from_raw_gens([FreeGen(1)]);
        make_matrix(&from, &to, |z: &L| z.clone());
    }
}
