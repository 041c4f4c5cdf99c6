mod int;
mod ff;
mod ratio;
mod poly;

pub mod lc;

pub use int::*;
pub use ff::*;
pub use ratio::*;
pub use poly::*;
