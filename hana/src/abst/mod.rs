mod elem;
mod additive;
mod ring;
mod euc_ring;

pub use elem::*;
pub use additive::*;
pub use ring::*;
pub use euc_ring::*;
