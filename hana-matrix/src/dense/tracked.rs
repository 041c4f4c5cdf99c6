use log::trace;
use num_traits::{Zero, One};
use hana::{EucRing, EucRingOps};
use crate::dense::Mat;
use crate::MatTrait;

/// A matrix under elementary row and column operations, together with
/// the accumulated transforms `P`, `P⁻¹`, `Q`, `Q⁻¹` such that
/// `target = P a Q` for the original `a`. Untracked transforms are `None`.
#[derive(Debug)]
pub(crate) struct Tracked<R> {
    pub target: Mat<R>,
    pub p:    Option<Mat<R>>,
    pub pinv: Option<Mat<R>>,
    pub q:    Option<Mat<R>>,
    pub qinv: Option<Mat<R>>
}

impl<R> Tracked<R>
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    /// `flags = [p, pinv, q, qinv]`.
    pub fn new(target: Mat<R>, flags: [bool; 4]) -> Self {
        let (m, n) = target.shape();
        let [fp, fpinv, fq, fqinv] = flags;
        Self {
            target,
            p:    fp.then(|| Mat::id(m)),
            pinv: fpinv.then(|| Mat::id(m)),
            q:    fq.then(|| Mat::id(n)),
            qinv: fqinv.then(|| Mat::id(n)),
        }
    }

    pub fn row_nz(&self, i: usize) -> usize {
        self.target.inner().row(i).iter().filter(|a| !a.is_zero()).count()
    }

    pub fn col_nz(&self, j: usize) -> usize {
        self.target.inner().column(j).iter().filter(|a| !a.is_zero()).count()
    }

    pub fn swap_rows(&mut self, i: usize, j: usize) {
        self.target.swap_rows(i, j);
        if let Some(p) = &mut self.p { p.swap_rows(i, j) }
        if let Some(pinv) = &mut self.pinv { pinv.swap_cols(i, j) }
        trace!("rows {i} <-> {j}\n{}", self.target);
    }

    pub fn swap_cols(&mut self, i: usize, j: usize) {
        self.target.swap_cols(i, j);
        if let Some(q) = &mut self.q { q.swap_cols(i, j) }
        if let Some(qinv) = &mut self.qinv { qinv.swap_rows(i, j) }
        trace!("cols {i} <-> {j}\n{}", self.target);
    }

    /// Panics if `u` is not a unit and an inverse is tracked.
    pub fn mul_row(&mut self, i: usize, u: &R) {
        self.target.mul_row(i, u);
        if let Some(p) = &mut self.p { p.mul_row(i, u) }
        if let Some(pinv) = &mut self.pinv { pinv.mul_col(i, &unit_inv(u)) }
        trace!("row {i} *= {u}\n{}", self.target);
    }

    pub fn mul_col(&mut self, j: usize, u: &R) {
        self.target.mul_col(j, u);
        if let Some(q) = &mut self.q { q.mul_col(j, u) }
        if let Some(qinv) = &mut self.qinv { qinv.mul_row(j, &unit_inv(u)) }
        trace!("col {j} *= {u}\n{}", self.target);
    }

    /// `row[j] += r * row[i]`.
    pub fn add_row_to(&mut self, i: usize, j: usize, r: &R) {
        self.target.add_row_to(i, j, r);
        if let Some(p) = &mut self.p { p.add_row_to(i, j, r) }
        if let Some(pinv) = &mut self.pinv { pinv.add_col_to(j, i, &-r) }
        trace!("row {j} += {r} * row {i}\n{}", self.target);
    }

    /// Rows `(i, j)` are multiplied from the left by `[a, b; c, d]` with `ad - bc = 1`.
    pub fn left_elementary(&mut self, e: [&R; 4], i: usize, j: usize) {
        debug_assert!(is_unimodular(e));
        self.target.left_elementary(e, i, j);
        if let Some(p) = &mut self.p { p.left_elementary(e, i, j) }
        if let Some(pinv) = &mut self.pinv {
            let [a, b, c, d] = adjugate(e);
            pinv.right_elementary([&a, &b, &c, &d], i, j)
        }
        trace!("rows ({i}, {j}) <- {e:?}\n{}", self.target);
    }

    /// Columns `(i, j)` are multiplied from the right by `[a, c; b, d]` with `ad - bc = 1`.
    pub fn right_elementary(&mut self, e: [&R; 4], i: usize, j: usize) {
        debug_assert!(is_unimodular(e));
        self.target.right_elementary(e, i, j);
        if let Some(q) = &mut self.q { q.right_elementary(e, i, j) }
        if let Some(qinv) = &mut self.qinv {
            let [a, b, c, d] = adjugate(e);
            qinv.left_elementary([&a, &b, &c, &d], i, j)
        }
        trace!("cols ({i}, {j}) <- {e:?}\n{}", self.target);
    }
}

fn unit_inv<R>(u: &R) -> R
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    match u.inv() {
        Some(v) => v,
        None => panic!("{u} is not a unit.")
    }
}

fn is_unimodular<R>([a, b, c, d]: [&R; 4]) -> bool
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    (a * d - b * c).is_one()
}

fn adjugate<R>([a, b, c, d]: [&R; 4]) -> [R; 4]
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    [d.clone(), -c, -b, a.clone()]
}

/// `(d, s, t)` with `d = sx + ty = gcd(x, y)`, taking `t = 0` whenever `x | y`
/// so that a pivot dividing its column is never disturbed.
pub(crate) fn gcdx<R>(x: &R, y: &R) -> (R, R, R)
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    let (d, s, t) = R::gcdx(x, y);
    match (x / &d).inv() {
        Some(s0) => (d, s0, R::zero()),
        None => (d, s, t)
    }
}

/// For `x ≠ 0`, the unimodular `[s, t; -y/d, x/d]` taking `(x, y)` to `(d, 0)`.
pub(crate) fn eliminator<R>(x: &R, y: &R) -> [R; 4]
where R: EucRing, for<'a> &'a R: EucRingOps<R> {
    let (d, s, t) = gcdx(x, y);
    let (a, b) = (x / &d, y / &d);
    [s, t, -b, a]
}

#[cfg(test)]
mod tests {
    use super::*;
    use hana::Ratio;

    fn check(t: Tracked<i64>, a: &Mat<i64>) {
        let [p, pinv, q, qinv] = [t.p, t.pinv, t.q, t.qinv].map(|m| m.unwrap());
        assert_eq!(&(&p * a) * &q, t.target);
        assert_eq!(&(&pinv * &t.target) * &qinv, *a);
    }

    #[test]
    fn ops_keep_transforms() {
        let a = Mat::from_data((3, 3), [1, 2, 3, 4, 5, 6, 7, 8, 10]);
        let mut t = Tracked::new(a.clone(), [true; 4]);

        t.swap_rows(0, 2);
        t.swap_cols(1, 2);
        t.mul_row(1, &-1);
        t.mul_col(0, &-1);
        t.add_row_to(0, 1, &3);
        t.left_elementary([&3, &2, &4, &3], 0, 2);
        t.right_elementary([&2, &1, &1, &1], 1, 2);

        check(t, &a);
    }

    #[test]
    fn untracked() {
        let a = Mat::from_data((2, 3), [1, 2, 3, 4, 5, 6]);
        let mut t = Tracked::new(a, [true, false, false, true]);
        t.swap_rows(0, 1);
        assert!(t.p.is_some() && t.pinv.is_none());
        assert!(t.q.is_none() && t.qinv.is_some());
    }

    #[test]
    fn eliminator_clears() {
        let (x, y) = (4i64, 6i64);
        let [s, t, c, d] = eliminator(&x, &y);
        assert_eq!(s * x + t * y, 2);
        assert_eq!(c * x + d * y, 0);
        assert_eq!(s * d - t * c, 1);
    }

    #[test]
    fn gcdx_prefers_t_zero() {
        type Q = Ratio<i64>;
        let (d, s, t) = gcdx(&Q::from(3), &Q::from(5));
        assert_eq!(d, Q::from(1));
        assert_eq!(s, Q::new(1, 3));
        assert_eq!(t, Q::from(0));

        let (d, s, t) = gcdx(&-2i64, &6i64);
        assert_eq!((d, s, t), (2, -1, 0));
    }
}
