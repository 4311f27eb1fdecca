//! Pure hand analysis: shanten and agari decomposition.

pub mod decomp;
pub mod shanten;

pub use decomp::*;
pub use shanten::*;
