mod grid;
mod mod_str;
mod dual;
mod chain_map;
mod complex;
mod homology;
mod sample;
mod error;

pub use grid::*;
pub use mod_str::*;
pub use dual::*;
pub use chain_map::*;
pub use complex::*;
pub use homology::*;
pub use error::*;

pub mod check;
pub mod config;
pub mod utils;
