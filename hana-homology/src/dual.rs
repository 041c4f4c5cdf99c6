use std::ops::{Add, Mul};
use std::sync::Arc;

use num_traits::Zero;
use hana::{Ring, RingOps};

type Func<M, R> = Arc<dyn Fn(&M) -> Option<R> + Send + Sync>;

/// A linear functional `M -> R`. Evaluation fails wherever the 
/// coordinates it was built from are undefined.
pub struct Dual<M, R> { 
    f: Option<Func<M, R>> // `None` for zero.
}

impl<M, R> Dual<M, R>
where M: Send + Sync + 'static, R: Ring, for<'x> &'x R: RingOps<R> { 
    pub fn new<F>(f: F) -> Self
    where F: Fn(&M) -> Option<R> + Send + Sync + 'static { 
        Self { f: Some(Arc::new(f)) }
    }

    pub fn eval(&self, z: &M) -> Option<R> { 
        match &self.f { 
            Some(f) => f(z),
            None => Some(R::zero())
        }
    }

    /// `self ∘ h`.
    pub fn compose<N, F>(&self, h: F) -> Dual<N, R>
    where 
        N: Send + Sync + 'static, 
        F: Fn(&N) -> M + Send + Sync + 'static 
    { 
        match &self.f { 
            Some(f) => { 
                let f = f.clone();
                Dual::new(move |z| f(&h(z)))
            },
            None => Dual::zero()
        }
    }
}

impl<M, R> Clone for Dual<M, R> {
    fn clone(&self) -> Self {
        Self { f: self.f.clone() }
    }
}

impl<M, R> Zero for Dual<M, R>
where M: Send + Sync + 'static, R: Ring, for<'x> &'x R: RingOps<R> {
    fn zero() -> Self {
        Self { f: None }
    }

    fn is_zero(&self) -> bool {
        self.f.is_none()
    }
}

impl<M, R> Add for Dual<M, R>
where M: Send + Sync + 'static, R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self.f, rhs.f) { 
            (Some(f), Some(g)) => Dual::new(move |z| Some(f(z)? + g(z)?)),
            (f, None) | (None, f) => Self { f }
        }
    }
}

impl<M, R> Mul<R> for Dual<M, R>
where M: Send + Sync + 'static, R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = Self;

    fn mul(self, r: R) -> Self::Output {
        match self.f { 
            Some(_) if r.is_zero() => Self::zero(),
            Some(f) => Dual::new(move |z| f(z).map(|a| a * &r)),
            None => Self::zero()
        }
    }
}
