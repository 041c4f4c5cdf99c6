mod grid;
mod grid_deg;

pub use grid::*;
pub use grid_deg::*;
