mod matrix;
mod euc_calc;
mod lu_calc;

pub use matrix::*;
pub use euc_calc::EucHomologyCalc;
pub use lu_calc::LUHomologyCalc;
