use std::cmp::min;
use itertools::Itertools;
use log::{debug, trace};
use num_traits::{Zero, One};
use hana::{EucRing, EucRingOps};
use crate::dense::*;
use super::tracked::{eliminator, gcdx, Tracked};

pub type SnfFlags = [bool; 4];

pub fn snf<R>(target: &Mat<R>, flags: SnfFlags) -> SnfResult<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    let copy = target.clone();
    snf_in_place(copy, flags)
}

pub fn snf_in_place<R>(target: Mat<R>, flags: SnfFlags) -> SnfResult<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    debug!("start snf: {:?}, flags: {:?}.", target.shape(), flags);
    trace!("{}", target);

    let mut calc = SnfCalc::new(target, flags);

    calc.process();

    debug!("snf done.");
    trace!("{}", calc.t.target);

    calc.result()
}

#[derive(Debug)]
pub struct SnfResult<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> { 
    result: Mat<R>,
    p:    Option<Mat<R>>,
    pinv: Option<Mat<R>>,
    q:    Option<Mat<R>>,
    qinv: Option<Mat<R>>
}

impl<R> SnfResult<R>
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

    pub fn q(&self) -> Option<&Mat<R>> {
        self.q.as_ref()
    }

    pub fn qinv(&self) -> Option<&Mat<R>> {
        self.qinv.as_ref()
    }

    pub fn trans(&self) -> [Option<&Mat<R>>; 4] {
        [self.p.as_ref(),
         self.pinv.as_ref(),
         self.q.as_ref(),
         self.qinv.as_ref()]
    }

    pub fn destruct(self) -> (Mat<R>, [Option<Mat<R>>; 4]) {
        (self.result, [self.p, self.pinv, self.q, self.qinv])
    }

    pub fn rank(&self) -> usize {
        let n = min(self.result.nrows(), self.result.ncols());
        for i in 0..n { 
            if self.result[(i, i)].is_zero() { 
                return i
            }
        }
        n
    }

    /// The diagonal entries `D[i, i]`, `0 <= i < min(m, n)`.
    pub fn diag(&self) -> Vec<&R> { 
        let n = min(self.result.nrows(), self.result.ncols());
        (0..n).map(|i| &self.result[(i, i)]).collect()
    }

    pub fn factors(&self) -> Vec<&R> { 
        let n = min(self.result.nrows(), self.result.ncols());
        (0..n).filter_map(|i| { 
            let a = &self.result[(i, i)];
            if !a.is_zero() { 
                Some(a)
            } else {
                None
            }
         }).collect()
    }
}

/// Diagonalization by alternately clearing the row and the column
/// through each pivot, followed by enforcing `d₀ | d₁ | ⋯`.
struct SnfCalc<R> {
    t: Tracked<R>
}

impl<R> SnfCalc<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    fn new(target: Mat<R>, flags: SnfFlags) -> Self {
        Self { t: Tracked::new(target, flags) }
    }

    fn result(self) -> SnfResult<R> {
        let Tracked { target, p, pinv, q, qinv } = self.t;
        SnfResult { result: target, p, pinv, q, qinv }
    }

    fn process(&mut self) {
        if self.t.target.is_zero() {
            return
        }

        let r = self.diagonalize();
        self.sort_divisors(r);
    }

    // Returns the number of pivots placed on the diagonal.
    fn diagonalize(&mut self) -> usize {
        let (m, n) = self.t.target.shape();
        let mut k = 0;

        for j in 0..n {
            if k == m { break }

            let Some(i) = self.lightest_row(k, j) else { continue };
            if i != k { self.t.swap_rows(k, i) }
            if j != k { self.t.swap_cols(k, j) }

            let u = self.t.target[(k, k)].normalizing_unit();
            if !u.is_one() {
                self.t.mul_col(k, &u);
            }

            self.isolate(k);
            k += 1;
        }

        k
    }

    // Among rows `k..` with a nonzero entry in column `j`, the sparsest.
    fn lightest_row(&self, k: usize, j: usize) -> Option<usize> {
        (k .. self.t.target.nrows())
            .filter(|&i| !self.t.target[(i, j)].is_zero())
            .min_by_key(|&i| self.t.row_nz(i))
    }

    // Clears row `k` and column `k` except for the pivot.
    // Each pass replaces the pivot by a proper divisor until both are clear.
    fn isolate(&mut self, k: usize) {
        while self.t.row_nz(k) > 1 || self.t.col_nz(k) > 1 {
            let changed = self.clear_col(k) | self.clear_row(k);
            assert!(changed, "no progress in elimination at {k}.");
        }
    }

    fn clear_col(&mut self, k: usize) -> bool {
        let targets = (0 .. self.t.target.nrows())
            .filter(|&i| i != k && !self.t.target[(i, k)].is_zero())
            .collect_vec();

        for &i in targets.iter() {
            let e = eliminator(&self.t.target[(k, k)], &self.t.target[(i, k)]);
            self.t.left_elementary([&e[0], &e[1], &e[2], &e[3]], k, i);
        }

        !targets.is_empty()
    }

    fn clear_row(&mut self, k: usize) -> bool {
        let targets = (0 .. self.t.target.ncols())
            .filter(|&j| j != k && !self.t.target[(k, j)].is_zero())
            .collect_vec();

        for &j in targets.iter() {
            let e = eliminator(&self.t.target[(k, k)], &self.t.target[(k, j)]);
            self.t.right_elementary([&e[0], &e[1], &e[2], &e[3]], k, j);
        }

        !targets.is_empty()
    }

    // Repeats until every `dᵢ` divides `dᵢ₊₁`, then normalizes each `dᵢ`.
    fn sort_divisors(&mut self, r: usize) {
        debug_assert!(self.t.target.is_diag());

        while let Some(i) = (0 .. r.saturating_sub(1)).find(|&i| !self.divides_next(i)) {
            self.merge(i);
        }

        for i in 0..r {
            let u = self.t.target[(i, i)].normalizing_unit();
            if !u.is_one() {
                self.t.mul_row(i, &u);
            }
        }
    }

    fn divides_next(&self, i: usize) -> bool {
        let a = &self.t.target;
        a[(i, i)].divides(&a[(i + 1, i + 1)])
    }

    //   [ 1   1 ] [x  0] [s -b]   [d  0   ]
    //   [-tb  sa] [0  y] [t  a] = [0  xy/d]
    //
    // where d = sx + ty = gcd(x, y), a = x/d, b = y/d.
    fn merge(&mut self, i: usize) {
        let j = i + 1;
        let (x, y) = (&self.t.target[(i, i)], &self.t.target[(j, j)]);

        if y.divides(x) {
            self.t.swap_rows(i, j);
            self.t.swap_cols(i, j);
            return
        }

        let (d, s, t) = gcdx(x, y);
        let (a, b) = (x / &d, y / &d);
        let (tb, sa) = (&t * &b, &s * &a);

        self.t.left_elementary([&R::one(), &R::one(), &-tb, &sa], i, j);
        self.t.right_elementary([&s, &t, &-b, &a], i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_snf(a: &Mat<i64>, diag: &[i64]) {
        let res = snf(a, [true; 4]);
        let [p, pinv, q, qinv] = res.trans().map(|m| m.unwrap().clone());
        let d = res.result();

        assert_eq!(&(&p * a) * &q, *d);
        assert_eq!(&(&pinv * d) * &qinv, *a);
        assert_eq!(d, &Mat::diag(a.shape(), diag.iter().cloned()));
    }

    #[test]
    fn already_diagonal() {
        let a = Mat::diag((3, 4), [1, 2, 6]);
        assert_snf(&a, &[1, 2, 6]);
    }

    #[test]
    fn divisibility() {
        let a = Mat::diag((5, 5), [0, -3, 54, 92, -4]);
        assert_snf(&a, &[1, 2, 12, 2484, 0]);
    }

    #[test]
    fn rank_and_factors() {
        let a: Mat<i64> = Mat::from_data((3, 3), [
            2, 4, 4,
            -6, 6, 12,
            10, -4, -16
        ]);
        assert_snf(&a, &[2, 6, 12]);

        let res = snf(&a, [false; 4]);
        assert_eq!(res.rank(), 3);
        assert_eq!(res.factors(), vec![&2, &6, &12]);
        assert_eq!(res.diag(), vec![&2, &6, &12]);
    }

    #[test]
    fn rank_deficient() {
        let a: Mat<i64> = Mat::from_data((3, 4), [
            1, 2, 3, 4,
            2, 4, 6, 8,
            0, 2, 2, 2
        ]);
        assert_snf(&a, &[1, 2, 0]);

        let res = snf(&a, [false; 4]);
        assert_eq!(res.rank(), 2);
        assert_eq!(res.factors(), vec![&1, &2]);
    }

    #[test]
    fn zero() {
        let a: Mat<i64> = Mat::zero((2, 3));
        let res = snf(&a, [true; 4]);
        assert_eq!(res.rank(), 0);
        assert!(res.factors().is_empty());
        assert_eq!(res.p(), Some(&Mat::id(2)));
    }

    #[test]
    fn untracked() {
        let a: Mat<i64> = Mat::from_data((2, 2), [2, 0, 0, 3]);
        let res = snf(&a, [false; 4]);
        assert_eq!(res.result(), &Mat::diag((2, 2), [1, 6]));
        assert_eq!(res.p(), None);
        assert_eq!(res.qinv(), None);
    }

    #[test]
    fn over_field() {
        use hana::Ratio;
        type Q = Ratio<i64>;

        let a: Mat<Q> = Mat::from_data((2, 3), [1, 2, 3, 4, 5, 6].map(Q::from));
        let res = snf(&a, [true; 4]);
        let [p, _, q, _] = res.trans().map(|m| m.unwrap().clone());

        assert_eq!(res.rank(), 2);
        assert!(res.factors().into_iter().all(|a| a.is_one()));
        assert_eq!(&(&p * &a) * &q, *res.result());
    }
}
