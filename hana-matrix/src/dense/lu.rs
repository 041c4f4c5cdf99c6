use log::{debug, trace};
use num_traits::{Zero, One};
use hana::{Field, FieldOps};
use crate::config::is_multithread_enabled;
use crate::dense::*;

#[cfg(feature = "multithread")]
use rayon::prelude::{IntoParallelIterator, ParallelIterator};

/// LU decomposition with full pivoting over a field:
/// 
/// ```text
///   P a Q = L U
/// ```
/// 
/// where `(P a Q)[i, j] = a[p[i], q[j]]`, `L` is `m x r` unit lower 
/// triangular and `U` is `r x n` upper triangular with an invertible 
/// leading `r x r` block.
pub fn lu<R>(target: &Mat<R>) -> LU<R>
where R: Field, for<'a> &'a R: FieldOps<R> {
    debug!("start lu: {:?}.", target.shape());
    trace!("{}", target);

    let mut calc = LUCalc::new(target.clone());
    calc.process();

    debug!("lu done, rank: {}.", calc.rank);

    calc.result()
}

#[derive(Debug)]
pub struct LU<R> { 
    l: Mat<R>,
    u: Mat<R>,
    p: Vec<usize>,
    q: Vec<usize>,
}

impl<R> LU<R>
where R: Field, for<'a> &'a R: FieldOps<R> { 
    pub fn l(&self) -> &Mat<R> { 
        &self.l
    }

    pub fn u(&self) -> &Mat<R> { 
        &self.u
    }

    pub fn p(&self) -> &[usize] { 
        &self.p
    }

    pub fn q(&self) -> &[usize] { 
        &self.q
    }

    pub fn rank(&self) -> usize { 
        self.u.nrows()
    }

    pub fn nullity(&self) -> usize { 
        self.q.len() - self.rank()
    }

    fn nrows(&self) -> usize { 
        self.p.len()
    }

    fn ncols(&self) -> usize { 
        self.q.len()
    }

    /// `U Q⁻¹`, an `r x n` matrix with the same kernel as `a`.
    pub fn upper(&self) -> Mat<R> { 
        let (r, n) = (self.rank(), self.ncols());
        let mut m = Mat::zero((r, n));
        for k in 0..r { 
            for j in k..n { 
                m[(k, self.q[j])] = self.u[(k, j)].clone();
            }
        }
        m
    }

    /// An `n x (n - r)` matrix whose columns form a basis of `ker a`.
    pub fn kernel(&self) -> Mat<R> { 
        let (r, n) = (self.rank(), self.ncols());
        let cols = if is_multithread_enabled() { 
            self.kernel_cols_par(r .. n)
        } else { 
            (r .. n).map(|b| self.kernel_col(b)).collect()
        };
        let mut k = Mat::zero((n, n - r));
        for (b, col) in cols.into_iter().enumerate() { 
            for (i, a) in col.into_iter().enumerate() { 
                k[(i, b)] = a;
            }
        }
        k
    }

    #[cfg(feature = "multithread")]
    fn kernel_cols_par(&self, range: std::ops::Range<usize>) -> Vec<Vec<R>> { 
        range.into_par_iter().map(|b| self.kernel_col(b)).collect()
    }

    #[cfg(not(feature = "multithread"))]
    fn kernel_cols_par(&self, range: std::ops::Range<usize>) -> Vec<Vec<R>> { 
        range.map(|b| self.kernel_col(b)).collect()
    }

    // y = [-U1⁻¹ U2 e_b; e_b], x[q[j]] = y[j].
    fn kernel_col(&self, b: usize) -> Vec<R> { 
        let (r, n) = (self.rank(), self.ncols());
        let mut y = vec![R::zero(); n];
        y[b] = R::one();

        for k in (0..r).rev() { 
            let mut s = self.u[(k, b)].clone();
            for j in k + 1 .. r { 
                s += &self.u[(k, j)] * &y[j];
            }
            y[k] = -s / &self.u[(k, k)];
        }

        self.unpermute_cols(y)
    }

    fn permute_cols(&self, x: &[R]) -> Vec<R> { 
        self.q.iter().map(|&j| x[j].clone()).collect()
    }

    fn unpermute_cols(&self, y: Vec<R>) -> Vec<R> { 
        let mut x = vec![R::zero(); self.ncols()];
        for (j, a) in y.into_iter().enumerate() { 
            x[self.q[j]] = a;
        }
        x
    }

    /// Coordinates of `x` with respect to the columns of `kernel()`, 
    /// or `None` if `x` is not in the kernel.
    pub fn solve_kernel(&self, x: &[R]) -> Option<Vec<R>> { 
        assert_eq!(x.len(), self.ncols());

        let y = self.permute_cols(x);
        if !self.u.apply(&y).iter().all(|a| a.is_zero()) { 
            return None
        }

        let r = self.rank();
        Some(y[r..].to_vec())
    }

    /// An `m x (m - r)` matrix whose columns span a complement 
    /// of the image of `a`. The columns are unit vectors `e_{p[k]}`, `k ≥ r`.
    pub fn cokernel(&self) -> Mat<R> { 
        let (r, m) = (self.rank(), self.nrows());
        let mut c = Mat::zero((m, m - r));
        for k in r..m { 
            c[(self.p[k], k - r)] = R::one();
        }
        c
    }

    /// Coordinates of the class of `v` in `Rᵐ / im a` with respect to 
    /// the columns of `cokernel()`.
    pub fn project_cokernel(&self, v: &[R]) -> Vec<R> { 
        assert_eq!(v.len(), self.nrows());

        let r = self.rank();
        let w: Vec<_> = self.p.iter().map(|&i| v[i].clone()).collect();
        let c = self.forward_solve(&w[0..r]);

        (r .. self.nrows()).map(|i| { 
            let mut z = w[i].clone();
            for k in 0..r { 
                z -= &self.l[(i, k)] * &c[k];
            }
            z
        }).collect()
    }

    /// Solves `a x = b`, returning `None` if `b` is not in the image.
    pub fn solve(&self, b: &[R]) -> Option<Vec<R>> { 
        assert_eq!(b.len(), self.nrows());

        let r = self.rank();
        if !self.project_cokernel(b).iter().all(|a| a.is_zero()) { 
            return None
        }

        let w: Vec<_> = self.p[0..r].iter().map(|&i| b[i].clone()).collect();
        let c = self.forward_solve(&w);

        let mut y = vec![R::zero(); self.ncols()];
        for k in (0..r).rev() { 
            let mut s = c[k].clone();
            for j in k + 1 .. r { 
                s -= &self.u[(k, j)] * &y[j];
            }
            y[k] = s / &self.u[(k, k)];
        }

        Some(self.unpermute_cols(y))
    }

    // L1 c = w.
    fn forward_solve(&self, w: &[R]) -> Vec<R> { 
        let r = w.len();
        let mut c: Vec<R> = Vec::with_capacity(r);
        for i in 0..r { 
            let mut s = w[i].clone();
            for k in 0..i { 
                s -= &self.l[(i, k)] * &c[k];
            }
            c.push(s);
        }
        c
    }
}

struct LUCalc<R> { 
    target: Mat<R>,
    p: Vec<usize>,
    q: Vec<usize>,
    rank: usize
}

impl<R> LUCalc<R>
where R: Field, for<'a> &'a R: FieldOps<R> {
    fn new(target: Mat<R>) -> Self { 
        let (m, n) = target.shape();
        let p = (0..m).collect();
        let q = (0..n).collect();
        Self { target, p, q, rank: 0 }
    }

    // The multipliers of L are stored below the diagonal of `target`.
    fn process(&mut self) { 
        let (m, n) = self.target.shape();

        for k in 0 .. m.min(n) { 
            let Some((i, j)) = self.select_pivot(k) else { 
                break
            };

            if i > k { 
                self.target.swap_rows(k, i);
                self.p.swap(k, i);
            }
            if j > k { 
                self.target.swap_cols(k, j);
                self.q.swap(k, j);
            }

            trace!("pivot: ({i}, {j}) -> ({k}, {k})");

            let Some(ainv) = self.target[(k, k)].inv() else { 
                unreachable!()
            };

            for i in k + 1 .. m { 
                if self.target[(i, k)].is_zero() { continue }

                let l = &self.target[(i, k)] * &ainv;
                for j in k + 1 .. n { 
                    let b = &l * &self.target[(k, j)];
                    self.target[(i, j)] -= b;
                }
                self.target[(i, k)] = l;
            }

            self.rank += 1;
        }
    }

    fn select_pivot(&self, k: usize) -> Option<(usize, usize)> { 
        let (m, n) = self.target.shape();
        (k..n).flat_map(|j| (k..m).map(move |i| (i, j))).find(|&(i, j)| 
            !self.target[(i, j)].is_zero()
        )
    }

    fn result(self) -> LU<R> { 
        let (m, n) = self.target.shape();
        let r = self.rank;

        let mut l = Mat::zero((m, r));
        let mut u = Mat::zero((r, n));

        for k in 0..r { 
            l[(k, k)] = R::one();
            for i in k + 1 .. m { 
                l[(i, k)] = self.target[(i, k)].clone();
            }
            for j in k..n { 
                u[(k, j)] = self.target[(k, j)].clone();
            }
        }

        LU { l, u, p: self.p, q: self.q }
    }
}

#[cfg(test)]
mod tests { 
    use super::*;
    use hana::{Ratio, FF2, FF};
    use crate::sparse::SpMat;

    type Q = Ratio<i64>;

    fn permuted<R>(a: &Mat<R>, p: &[usize], q: &[usize]) -> Mat<R>
    where R: Field, for<'a> &'a R: FieldOps<R> { 
        Mat::from_data((p.len(), q.len()), 
            p.iter().flat_map(|&i| q.iter().map(move |&j| a[(i, j)].clone()))
        )
    }

    fn to_q(a: &Mat<i64>) -> Mat<Q> { 
        Mat::from_data(a.shape(), 
            (0 .. a.nrows()).flat_map(|i| (0 .. a.ncols()).map(move |j| Q::from(a[(i, j)] as i32)))
        )
    }

    #[test]
    fn decomp() { 
        let a: Mat<Q> = Mat::from_data((3, 3), [1,2,3,4,5,6,7,8,9].map(Q::from));
        let e = lu(&a);

        assert_eq!(e.rank(), 2);
        assert_eq!(e.l() * e.u(), permuted(&a, e.p(), e.q()));
    }

    #[test]
    fn decomp_rand() { 
        for _ in 0..10 { 
            let a = to_q(&SpMat::<i64>::rand((6, 8), 0.3).to_dense());
            let e = lu(&a);
            assert_eq!(e.l() * e.u(), permuted(&a, e.p(), e.q()));
        }
    }

    #[test]
    fn zero() { 
        let a: Mat<Q> = Mat::zero((2, 3));
        let e = lu(&a);
        assert_eq!(e.rank(), 0);
        assert_eq!(e.kernel(), Mat::id(3));
        assert_eq!(e.cokernel(), Mat::id(2));
    }

    #[test]
    fn upper() { 
        let a: Mat<Q> = Mat::from_data((3, 3), [0,2,3,0,4,6,0,0,1].map(Q::from));
        let e = lu(&a);
        let m = e.upper();
        assert_eq!(m.shape(), (2, 3));

        let k = e.kernel();
        assert_eq!(k.shape(), (3, 1));
        assert!((&m * &k).is_zero());
    }

    #[test]
    fn kernel() { 
        for _ in 0..10 { 
            let a = to_q(&SpMat::<i64>::rand((4, 7), 0.4).to_dense());
            let e = lu(&a);
            let k = e.kernel();

            assert_eq!(k.ncols(), e.nullity());
            assert!((&a * &k).is_zero());

            for j in 0 .. k.ncols() { 
                let x = k.col(j);
                let y = e.solve_kernel(&x).unwrap();
                assert_eq!(k.apply(&y), x);
            }
        }
    }

    #[test]
    fn solve_kernel_fails() { 
        let a: Mat<Q> = Mat::from_data((1, 2), [1, 1].map(Q::from));
        let e = lu(&a);
        assert_eq!(e.solve_kernel(&[Q::from(1), Q::from(0)]), None);
        assert!(e.solve_kernel(&[Q::from(1), Q::from(-1)]).is_some());
    }

    #[test]
    fn cokernel() { 
        let a: Mat<Q> = Mat::from_data((3, 1), [1, 1, 1].map(Q::from));
        let e = lu(&a);
        let c = e.cokernel();
        assert_eq!(c.shape(), (3, 2));

        // image vectors project to zero.
        assert!(e.project_cokernel(&a.col(0)).iter().all(|x| x.is_zero()));

        // the cokernel generators project to unit vectors.
        for j in 0..2 { 
            let z = e.project_cokernel(&c.col(j));
            assert_eq!(z, (0..2).map(|k| if k == j { Q::one() } else { Q::zero() }).collect::<Vec<_>>());
        }
    }

    #[test]
    fn solve() { 
        let a: Mat<Q> = Mat::from_data((3, 2), [1,2,3,4,5,6].map(Q::from));
        let e = lu(&a);

        let b = [Q::from(3), Q::from(7), Q::from(11)];
        let x = e.solve(&b).unwrap();
        assert_eq!(a.apply(&x), b.to_vec());

        assert_eq!(e.solve(&[Q::from(1), Q::from(0), Q::from(0)]), None);
    }

    #[test]
    fn f2() { 
        let a: Mat<FF2> = Mat::from_data((2, 3), [1,1,0,0,1,1].map(FF2::from));
        let e = lu(&a);
        assert_eq!(e.rank(), 2);
        let k = e.kernel();
        assert_eq!(k.col(0), vec![FF2::from(1); 3]);
    }

    #[test]
    fn f3() { 
        type F3 = FF<3>;
        let a: Mat<F3> = Mat::from_data((2, 2), [1,2,2,1].map(F3::from));
        let e = lu(&a);
        assert_eq!(e.rank(), 1);
        assert!((&a * &e.kernel()).is_zero());
    }
}
