use std::fmt::{Debug, Display};

pub trait ElemBase: 
    Default + 
    PartialEq + 
    Eq + 
    Clone + 
    Send + 
    Sync + 
    Display + 
    Debug + 
    'static
{}

impl<T> ElemBase for T where T: 
    Default + 
    PartialEq + 
    Eq + 
    Clone + 
    Send + 
    Sync + 
    Display + 
    Debug + 
    'static
{}

/// An element of some algebraic structure, printable together with 
/// the symbol of the structure it lives in (e.g. `Z`, `F₂`). 
pub trait Elem: ElemBase { 
    fn math_symbol() -> String;
}
