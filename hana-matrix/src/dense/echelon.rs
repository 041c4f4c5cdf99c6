use std::ops::Range;
use log::{debug, trace};
use num_traits::{Zero, One};
use hana::{EucRing, EucRingOps};
use crate::dense::*;
use super::tracked::{eliminator, Tracked};

/// Computes `P a = H` where `H` is in reduced row echelon form: 
/// pivots are normalized, entries below them vanish, and entries 
/// above them are reduced modulo the pivot.
/// `flags = [p, pinv]` selects which transforms are tracked.
pub fn row_echelon<R>(target: &Mat<R>, flags: [bool; 2]) -> RowEchelon<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    debug!("start row-echelon: {:?}, flags: {:?}.", target.shape(), flags);
    trace!("{}", target);

    let mut calc = EchelonCalc::new(target.clone(), flags);
    calc.process();

    debug!("row-echelon done, rank: {}.", calc.pivots.len());
    trace!("{}", calc.t.target);

    calc.result()
}

/// Column echelon form of `a`, computed as the row echelon form of `aᵀ`. 
/// Tracks both transforms, so that the kernel of `a` can be read off 
/// together with the coordinates of its elements.
pub fn col_echelon<R>(target: &Mat<R>) -> ColEchelon<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    let e = row_echelon(&target.transpose(), [true, true]);
    ColEchelon { e, shape: target.shape() }
}

#[derive(Debug)]
pub struct RowEchelon<R> { 
    result: Mat<R>,
    p:    Option<Mat<R>>,
    pinv: Option<Mat<R>>,
    pivots: Vec<usize>
}

impl<R> RowEchelon<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> { 
    pub fn result(&self) -> &Mat<R> { 
        &self.result
    }

    pub fn p(&self) -> Option<&Mat<R>> { 
        self.p.as_ref()
    }

    pub fn pinv(&self) -> Option<&Mat<R>> { 
        self.pinv.as_ref()
    }

    pub fn rank(&self) -> usize { 
        self.pivots.len()
    }

    /// Column index of the pivot of each nonzero row.
    pub fn pivots(&self) -> &[usize] { 
        &self.pivots
    }

    /// The nonzero rows `H[0..r, :]`.
    pub fn top(&self) -> Mat<R> { 
        self.result.submat_rows(0 .. self.rank())
    }

    /// Columns of `P⁻¹` spanning a complement of the image. 
    /// `None` unless `pinv` is tracked.
    pub fn cokernel(&self) -> Option<Mat<R>> { 
        let r = self.rank();
        self.pinv.as_ref().map(|pinv| pinv.submat_cols(r .. pinv.ncols()))
    }

    /// Rows of `P` projecting onto the complement of the image. 
    pub fn projector(&self) -> Option<Mat<R>> { 
        let r = self.rank();
        self.p.as_ref().map(|p| p.submat_rows(r .. p.nrows()))
    }
}

#[derive(Debug)]
pub struct ColEchelon<R> { 
    e: RowEchelon<R>,
    shape: (usize, usize)
}

impl<R> ColEchelon<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> { 
    pub fn rank(&self) -> usize { 
        self.e.rank()
    }

    pub fn nullity(&self) -> usize { 
        self.shape.1 - self.rank()
    }

    fn null_range(&self) -> Range<usize> { 
        self.rank() .. self.shape.1
    }

    /// An `n x (n - r)` matrix whose columns form a basis of `ker a`.
    pub fn kernel(&self) -> Mat<R> { 
        let Some(p) = self.e.p() else { unreachable!() };
        p.submat_rows(self.null_range()).transpose()
    }

    /// Coordinates of `w` with respect to the columns of `kernel()`, 
    /// or `None` if `w` is not in the kernel.
    pub fn solve_kernel(&self, w: &[R]) -> Option<Vec<R>> { 
        assert_eq!(w.len(), self.shape.1);

        let Some(pinv) = self.e.pinv() else { unreachable!() };
        let y = pinv.transpose().apply(w);
        let r = self.rank();

        if y[0..r].iter().all(|a| a.is_zero()) { 
            Some(y[r..].to_vec())
        } else { 
            None
        }
    }
}

struct EchelonCalc<R> { 
    t: Tracked<R>,
    pivots: Vec<usize>
}

impl<R> EchelonCalc<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    fn new(target: Mat<R>, [p, pinv]: [bool; 2]) -> Self { 
        Self { t: Tracked::new(target, [p, pinv, false, false]), pivots: vec![] }
    }

    fn result(self) -> RowEchelon<R> { 
        let Tracked { target, p, pinv, .. } = self.t;
        RowEchelon { result: target, p, pinv, pivots: self.pivots }
    }

    fn process(&mut self) { 
        let (m, n) = self.t.target.shape();

        for j in 0..n { 
            let i = self.pivots.len();
            if i == m { break }

            if self.reduce_col(i, j) { 
                self.pivots.push(j);
            }
        }
    }

    // Makes `(i, j)` a normalized pivot, clearing below it and 
    // reducing above it. Returns false if column `j` vanishes from row `i` on.
    fn reduce_col(&mut self, i: usize, j: usize) -> bool { 
        let m = self.t.target.nrows();
        let Some(k) = (i..m)
            .filter(|&k| !self.t.target[(k, j)].is_zero())
            .min_by_key(|&k| self.t.row_nz(k)) 
        else { 
            return false
        };

        if k != i { 
            self.t.swap_rows(i, k);
        }

        for k in i + 1 .. m { 
            if self.t.target[(k, j)].is_zero() { continue }
            let e = eliminator(&self.t.target[(i, j)], &self.t.target[(k, j)]);
            self.t.left_elementary([&e[0], &e[1], &e[2], &e[3]], i, k);
        }

        let u = self.t.target[(i, j)].normalizing_unit();
        if !u.is_one() { 
            self.t.mul_row(i, &u);
        }

        for k in 0..i { 
            let q = &self.t.target[(k, j)] / &self.t.target[(i, j)];
            if !q.is_zero() { 
                self.t.add_row_to(i, k, &-q);
            }
        }

        true
    }
}

#[cfg(test)]
mod tests { 
    use super::*;
    use hana::Ratio;

    fn is_echelon<R>(h: &Mat<R>, pivots: &[usize]) -> bool
    where R: EucRing, for<'a> &'a R: EucRingOps<R> { 
        let r = pivots.len();
        pivots.windows(2).all(|w| w[0] < w[1]) && 
        pivots.iter().enumerate().all(|(i, &j)| 
            (0..j).all(|j1| h[(i, j1)].is_zero()) && 
            (i + 1 .. h.nrows()).all(|i1| h[(i1, j)].is_zero())
        ) && 
        (r .. h.nrows()).all(|i| 
            (0 .. h.ncols()).all(|j| h[(i, j)].is_zero())
        )
    }

    #[test]
    fn row_echelon_int() { 
        let a: Mat<i64> = Mat::from_data((3, 4), [
            2, 4, 1, 3,
            4, 8, 3, 7,
            6, 12, 4, 10
        ]);
        let e = row_echelon(&a, [true, true]);
        let (p, pinv) = (e.p().unwrap(), e.pinv().unwrap());

        assert_eq!(e.rank(), 2);
        assert_eq!(e.pivots(), &[0, 2]);
        assert!(is_echelon(e.result(), e.pivots()));
        assert_eq!(p * &a, e.result().clone());
        assert_eq!(pinv * e.result(), a);
        assert!((p * pinv).is_id());
    }

    #[test]
    fn row_echelon_normalized() { 
        let a: Mat<i64> = Mat::from_data((2, 2), [-4, 6, 0, 0]);
        let e = row_echelon(&a, [false, false]);
        assert_eq!(e.result(), &Mat::from_data((2, 2), [4, -6, 0, 0]));
    }

    #[test]
    fn row_echelon_reduced_above() { 
        let a: Mat<i64> = Mat::from_data((2, 2), [1, 7, 0, 3]);
        let e = row_echelon(&a, [true, true]);
        assert_eq!(e.result(), &Mat::from_data((2, 2), [1, 1, 0, 3]));
        assert_eq!(e.p().unwrap() * &a, e.result().clone());
    }

    #[test]
    fn row_echelon_field() { 
        type Q = Ratio<i64>;
        let a: Mat<Q> = Mat::from_data((2, 3), [1,2,3,4,5,6].map(Q::from));
        let e = row_echelon(&a, [true, true]);

        assert_eq!(e.rank(), 2);
        assert_eq!(e.result(), &Mat::from_data((2, 3), [
            Q::from(1), Q::from(0), Q::from(-1), 
            Q::from(0), Q::from(1), Q::from(2)
        ]));
        assert_eq!(e.p().unwrap() * &a, e.result().clone());
    }

    #[test]
    fn row_echelon_rand() { 
        use crate::sparse::SpMat;

        for _ in 0..10 { 
            let a: Mat<i64> = SpMat::rand((6, 8), 0.4).to_dense();
            let e = row_echelon(&a, [true, true]);
            let (p, pinv) = (e.p().unwrap(), e.pinv().unwrap());

            assert!(is_echelon(e.result(), e.pivots()));
            assert_eq!(p * &a, e.result().clone());
            assert_eq!(pinv * e.result(), a);
        }
    }

    #[test]
    fn cokernel() { 
        let a: Mat<i64> = Mat::from_data((3, 1), [1, 1, 1]);
        let e = row_echelon(&a, [true, true]);
        let c = e.cokernel().unwrap();
        let pr = e.projector().unwrap();

        assert_eq!(c.shape(), (3, 2));
        assert_eq!(pr.shape(), (2, 3));
        assert!((&pr * &c).is_id());
        assert!((&pr * &a).is_zero());
    }

    #[test]
    fn kernel() { 
        let a: Mat<i64> = Mat::from_data((2, 4), [
            1, 1, 0, 0,
            0, 0, 1, 1
        ]);
        let e = col_echelon(&a);
        let k = e.kernel();

        assert_eq!(e.rank(), 2);
        assert_eq!(e.nullity(), 2);
        assert_eq!(k.shape(), (4, 2));
        assert!((&a * &k).is_zero());

        let w = vec![3, -3, 5, -5];
        let y = e.solve_kernel(&w).unwrap();
        assert_eq!(k.apply(&y), w);

        assert_eq!(e.solve_kernel(&[1, 0, 0, 0]), None);
    }

    #[test]
    fn kernel_rand() { 
        use crate::sparse::SpMat;

        for _ in 0..10 { 
            let a: Mat<i64> = SpMat::rand((4, 7), 0.4).to_dense();
            let e = col_echelon(&a);
            let k = e.kernel();

            assert_eq!(k.ncols(), e.nullity());
            assert!((&a * &k).is_zero());

            for j in 0 .. k.ncols() { 
                let w = k.col(j);
                let y = e.solve_kernel(&w).unwrap();
                assert_eq!(k.apply(&y), w);
            }
        }
    }
}
