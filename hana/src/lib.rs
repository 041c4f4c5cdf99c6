mod abst;
mod types;

pub use abst::*;
pub use types::*;

pub mod util;
