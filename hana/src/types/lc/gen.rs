use std::hash::Hash;
use derive_more::{Display, Debug};

use crate::{Elem, ElemBase};

/// A generator of a free module.
pub trait Gen: Elem + Hash + Ord {}

#[derive(Debug, Display, Default, Hash, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
#[display("<{}>", _0)]
#[debug("<{}>", _0)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FreeGen<T>(pub T) where T: ElemBase;

impl<T> From<T> for FreeGen<T> 
where T: ElemBase {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> Elem for FreeGen<T> 
where T: ElemBase { 
    fn math_symbol() -> String {
        let full_name = std::any::type_name::<T>();
        let name = full_name.split("::").last().unwrap_or(full_name);
        format!("Free<{}>", name)
    }
}

impl<T> Gen for FreeGen<T> 
where T: ElemBase + Hash + Ord {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let x = FreeGen(42);
        assert_eq!(x.to_string(), "<42>");
        assert_eq!(format!("{:?}", x), "<42>");
        assert_eq!(FreeGen::<usize>::math_symbol(), "Free<usize>");
    }
}
