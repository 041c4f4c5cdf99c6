pub use crate::MatTrait;

mod sp_mat;
mod sp_vec;

pub use sp_mat::SpMat;
pub use sp_vec::{SpVec, dot};
