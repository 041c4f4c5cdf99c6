use std::fmt::Display;
use std::ops::{Add, Mul};
use std::sync::Arc;

use ahash::AHashMap;
use itertools::Itertools;
use num_traits::Zero;
use hana::{Ring, RingOps};
use hana::lc::{Gen, Lc};
use hana::util::format::{paren_expr, superscript};
use hana_matrix::sparse::SpVec;

use crate::{Dual, Error};

/// Elements of a base module over `R`.
pub trait ModElem<R>: 
    Clone + 
    Send + 
    Sync + 
    'static + 
    Zero + 
    Add<Output = Self> + 
    Mul<R, Output = Self> 
{}

impl<M, R> ModElem<R> for M
where M: Clone + Send + Sync + 'static + Zero + Add<Output = M> + Mul<R, Output = M> {}

pub type Vectorizer<M, R> = Arc<dyn Fn(&M) -> Option<SpVec<R>> + Send + Sync>;

/// A cyclic summand `R/(d)` generated by `gen`. 
/// `d = 0` means the summand is free.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summand<M, R> { 
    gen: M,
    divisor: R
}

impl<M, R> Summand<M, R>
where M: ModElem<R>, R: Ring, for<'x> &'x R: RingOps<R> { 
    pub fn new(gen: M, divisor: R) -> Self { 
        Self { gen, divisor }
    }

    pub fn free(gen: M) -> Self { 
        Self::new(gen, R::zero())
    }

    pub fn gen(&self) -> &M { 
        &self.gen
    }

    pub fn divisor(&self) -> &R { 
        &self.divisor
    }

    pub fn is_free(&self) -> bool { 
        self.divisor.is_zero()
    }
}

impl<M, R> Display for Summand<M, R>
where M: ModElem<R>, R: Ring, for<'x> &'x R: RingOps<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_free() { 
            write!(f, "{}", R::math_symbol())
        } else { 
            write!(f, "{}", tor_symbol::<R>(&self.divisor))
        }
    }
}

fn tor_symbol<R>(d: &R) -> String
where R: Ring, for<'x> &'x R: RingOps<R> { 
    format!("{}/{}", R::math_symbol(), paren_expr(d))
}

/// A finitely presented module in decomposed form
/// 
/// ```text
///   M = R/(d₁) ⊕ ... ⊕ R/(dₗ) ⊕ Rʳ
/// ```
/// 
/// given by a list of summands together with a vectorizer, 
/// expressing elements as coordinates over the summand generators.
#[derive(Clone)]
pub struct ModStr<M, R> { 
    summands: Vec<Summand<M, R>>,
    vectorizer: Vectorizer<M, R>
}

impl<M, R> ModStr<M, R>
where M: ModElem<R>, R: Ring, for<'x> &'x R: RingOps<R> { 
    pub fn new<F>(summands: Vec<Summand<M, R>>, vectorizer: F) -> Self
    where F: Fn(&M) -> Option<SpVec<R>> + Send + Sync + 'static { 
        Self { summands, vectorizer: Arc::new(vectorizer) }
    }

    pub fn free<F>(gens: Vec<M>, vectorizer: F) -> Self
    where F: Fn(&M) -> Option<SpVec<R>> + Send + Sync + 'static { 
        let summands = gens.into_iter().map(Summand::free).collect();
        Self::new(summands, vectorizer)
    }

    /// The zero module. Every element vectorizes to the empty vector.
    pub fn zero() -> Self { 
        Self::new(vec![], |_| Some(SpVec::zero(0)))
    }

    /// A module with the given structure, without generators: 
    /// every generator is zero and `vectorize` always fails.
    pub fn from_structure(rank: usize, tors: Vec<R>) -> Self { 
        let summands = std::iter::repeat_with(|| Summand::free(M::zero()))
            .take(rank)
            .chain(tors.into_iter().map(|d| Summand::new(M::zero(), d)))
            .collect();
        Self::new(summands, |_| None)
    }

    pub fn summands(&self) -> &[Summand<M, R>] { 
        &self.summands
    }

    pub fn dim(&self) -> usize { 
        self.summands.len()
    }

    pub fn rank(&self) -> usize { 
        self.summands.iter().filter(|s| s.is_free()).count()
    }

    pub fn tors(&self) -> Vec<R> { 
        self.summands.iter().filter(|s| !s.is_free()).map(|s| s.divisor.clone()).collect()
    }

    pub fn is_free(&self) -> bool { 
        self.summands.iter().all(|s| s.is_free())
    }

    pub fn is_zero(&self) -> bool { 
        self.summands.is_empty()
    }

    pub fn generator(&self, i: usize) -> &M { 
        &self.summands[i].gen
    }

    pub fn gens(&self) -> impl Iterator<Item = &M> { 
        self.summands.iter().map(|s| &s.gen)
    }

    pub fn vectorizer(&self) -> &Vectorizer<M, R> { 
        &self.vectorizer
    }

    /// Coordinates of `z`, or `None` if `z` is not expressible 
    /// by the generators.
    pub fn vectorize(&self, z: &M) -> Option<SpVec<R>> { 
        let v = (self.vectorizer)(z)?;
        assert_eq!(v.dim(), self.dim(), "vectorizer returned a vector of wrong dimension.");
        Some(v)
    }

    /// The submodule spanned by the summands satisfying `pred`. 
    /// Coordinates of the removed summands are dropped.
    pub fn filter<F>(&self, pred: F) -> Self
    where F: Fn(&Summand<M, R>) -> bool { 
        let mut table = AHashMap::new();
        let mut summands = vec![];

        for (i, s) in self.summands.iter().enumerate() { 
            if pred(s) { 
                table.insert(i, summands.len());
                summands.push(s.clone());
            }
        }

        let n = summands.len();
        let vectorizer = self.vectorizer.clone();

        Self::new(summands, move |z| { 
            let v = vectorizer(z)?;
            Some(SpVec::from_entries(n, v.iter().filter_map(|(i, a)| 
                table.get(&i).map(|&j| (j, a.clone()))
            )))
        })
    }

    /// The direct sum. The vectorizer stacks the coordinates of both.
    pub fn sum<'a, I>(iter: I) -> Self
    where I: IntoIterator<Item = &'a Self> { 
        iter.into_iter().fold(Self::zero(), |res, m| &res + m)
    }

    /// The dual module `Hom(M, R)`, generated by the coordinate functionals.
    pub fn dual(&self) -> Result<ModStr<Dual<M, R>, R>, Error> { 
        if !self.is_free() { 
            return Err(Error::NotFree { symbol: self.to_string() })
        }

        let n = self.dim();
        let summands = (0..n).map(|i| { 
            let v = self.vectorizer.clone();
            let f = Dual::new(move |z: &M| v(z).map(|v| v.get(i)));
            Summand::free(f)
        }).collect();

        let gens = self.gens().cloned().collect_vec();
        Ok(ModStr::new(summands, move |f: &Dual<M, R>| { 
            let entries = gens.iter().map(|z| f.eval(z)).collect::<Option<Vec<_>>>()?;
            Some(SpVec::from(entries))
        }))
    }

    /// The number of summands for each divisor, in order of first appearance.
    /// Free summands are counted under the divisor `0`.
    pub fn divisor_counts(&self) -> Vec<(R, usize)> { 
        let mut res: Vec<(R, usize)> = vec![];
        for s in self.summands.iter() { 
            match res.iter_mut().find(|(d, _)| d == &s.divisor) { 
                Some((_, c)) => *c += 1,
                None => res.push((s.divisor.clone(), 1))
            }
        }
        res
    }

    pub fn display_detail(&self) -> String
    where M: Display { 
        let mut res = format!("{} {{\n", self);
        for (i, s) in self.summands.iter().enumerate() { 
            res += &format!("  {i}: {s}, {}\n", s.gen);
        }
        res += "}";
        res
    }
}

impl<X, R> ModStr<Lc<X, R>, R>
where X: Gen, R: Ring, for<'x> &'x R: RingOps<R> { 
    /// The free module with basis `gens`. Elements with terms 
    /// outside `gens` are not vectorizable.
    pub fn from_raw_gens<I>(gens: I) -> Self
    where I: IntoIterator<Item = X> { 
        let gens = gens.into_iter().collect_vec();
        let n = gens.len();
        let index: AHashMap<X, usize> = gens.iter().cloned().enumerate().map(|(i, x)| (x, i)).collect();
        let lcs = gens.into_iter().map(Lc::from).collect();

        Self::free(lcs, move |z: &Lc<X, R>| { 
            let entries = z.iter().map(|(x, r)| 
                index.get(x).map(|&i| (i, r.clone()))
            ).collect::<Option<Vec<_>>>()?;
            Some(SpVec::from_entries(n, entries))
        })
    }
}

impl<M, R> Default for ModStr<M, R>
where M: ModElem<R>, R: Ring, for<'x> &'x R: RingOps<R> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<M, R> PartialEq for ModStr<M, R>
where M: ModElem<R> + PartialEq, R: Ring, for<'x> &'x R: RingOps<R> {
    fn eq(&self, other: &Self) -> bool {
        self.summands == other.summands
    }
}

impl<'a, 'b, M, R> Add<&'b ModStr<M, R>> for &'a ModStr<M, R>
where M: ModElem<R>, R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = ModStr<M, R>;

    fn add(self, rhs: &'b ModStr<M, R>) -> Self::Output {
        let summands = self.summands.iter().chain(rhs.summands.iter()).cloned().collect();
        let (v1, v2) = (self.vectorizer.clone(), rhs.vectorizer.clone());

        ModStr::new(summands, move |z| { 
            let a = v1(z)?;
            let b = v2(z)?;
            Some(a.stack(&b))
        })
    }
}

impl<M, R> Display for ModStr<M, R>
where M: ModElem<R>, R: Ring, for<'x> &'x R: RingOps<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() { 
            return write!(f, "0")
        }

        let symbol = R::math_symbol();
        let rank = self.rank();
        let mut res = vec![];

        if rank == 1 { 
            res.push(symbol);
        } else if rank > 1 { 
            res.push(format!("{symbol}{}", superscript(rank as isize)));
        }

        for (d, c) in self.divisor_counts() { 
            if d.is_zero() { continue }
            let t = tor_symbol(&d);
            if c > 1 { 
                res.push(format!("({t}){}", superscript(c as isize)));
            } else { 
                res.push(t);
            }
        }

        write!(f, "{}", res.join(" ⊕ "))
    }
}

impl<M, R> std::fmt::Debug for ModStr<M, R>
where M: ModElem<R>, R: Ring, for<'x> &'x R: RingOps<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests { 
    use super::*;
    use hana::lc::FreeGen;

    type X = FreeGen<usize>;
    type L = Lc<X, i64>;

    fn e(i: usize) -> L { 
        L::from(FreeGen(i))
    }

    #[test]
    fn zero() { 
        let m = ModStr::<L, i64>::zero();
        assert!(m.is_zero());
        assert!(m.is_free());
        assert_eq!(m.rank(), 0);
        assert_eq!(m.to_string(), "0");
        assert_eq!(m.vectorize(&L::zero()), Some(SpVec::zero(0)));
        assert_eq!(m.vectorize(&e(0)), Some(SpVec::zero(0)));
    }

    #[test]
    fn raw_gens() { 
        let m = ModStr::from_raw_gens((0..3).map(FreeGen));
        assert_eq!(m.dim(), 3);
        assert_eq!(m.rank(), 3);
        assert!(m.is_free());
        assert_eq!(m.generator(1), &e(1));
        assert_eq!(m.to_string(), "Z³");

        let z = e(0) * 2 + e(2) * -1;
        assert_eq!(m.vectorize(&z), Some(SpVec::from(vec![2, 0, -1])));
        assert_eq!(m.vectorize(&e(3)), None);
    }

    #[test]
    fn structure() { 
        let m = ModStr::<L, i64>::from_structure(2, vec![2, 2, 3]);
        assert_eq!(m.rank(), 2);
        assert_eq!(m.tors(), vec![2, 2, 3]);
        assert!(!m.is_free());
        assert_eq!(m.to_string(), "Z² ⊕ (Z/2)² ⊕ Z/3");
        assert_eq!(m.divisor_counts(), vec![(0, 2), (2, 2), (3, 1)]);
        assert_eq!(m.vectorize(&e(0)), None);
    }

    #[test]
    fn sum() { 
        let m1 = ModStr::from_raw_gens([FreeGen(0), FreeGen(1)]);
        let m2 = ModStr::from_raw_gens([FreeGen(1), FreeGen(2)]);
        let m = &m1 + &m2;

        assert_eq!(m.dim(), 4);
        assert_eq!(m.vectorize(&(e(0) + e(1))), None);
        assert_eq!(m.vectorize(&e(1)), Some(SpVec::from(vec![0, 1, 1, 0])));

        let s = ModStr::sum([&m1, &m2]);
        assert!(s == m);
    }

    #[test]
    fn filter() { 
        let m = ModStr::from_raw_gens((0..3).map(FreeGen));
        let m = m.filter(|s| s.gen() != &e(1));

        assert_eq!(m.dim(), 2);
        assert_eq!(m.vectorize(&(e(0) + e(1) + e(2) * 3)), Some(SpVec::from(vec![1, 3])));
        assert_eq!(m.vectorize(&e(5)), None);
    }

    #[test]
    fn dual() { 
        let m = ModStr::<L, i64>::from_raw_gens((0..2).map(FreeGen));
        let d = m.dual().unwrap();

        assert_eq!(d.dim(), 2);
        let z = e(0) * 3 + e(1) * 5;
        assert_eq!(d.generator(0).eval(&z), Some(3));
        assert_eq!(d.generator(1).eval(&z), Some(5));
        assert_eq!(d.generator(0).eval(&e(7)), None);

        let f = d.generator(0).clone() * 2 + d.generator(1).clone();
        assert_eq!(d.vectorize(&f), Some(SpVec::from(vec![2, 1])));
    }

    #[test]
    fn dual_not_free() { 
        let m = ModStr::<L, i64>::from_structure(1, vec![2]);
        let e = m.dual().err();
        assert_eq!(e, Some(Error::NotFree { symbol: "Z ⊕ Z/2".into() }));
    }

    #[test]
    fn display_detail() { 
        let m = ModStr::<L, i64>::from_raw_gens((0..2).map(FreeGen));
        assert_eq!(m.display_detail(), "Z² {\n  0: Z, <0>\n  1: Z, <1>\n}");
    }

    #[test]
    fn tor_symbol_paren() { 
        use hana::{Poly, Ratio};
        use num_traits::One;
        type P = Poly<'x', Ratio<i64>>;

        let m = ModStr::<Lc<X, P>, P>::from_structure(0, vec![P::variable() + P::one()]);
        assert_eq!(m.to_string(), "Q[x]/(x + 1)");
    }
}
