pub use crate::MatTrait;

mod _mat;
mod echelon;
mod snf;
mod lu;
mod tracked;

pub use _mat::*;
pub use echelon::*;
pub use snf::*;
pub use lu::*;
