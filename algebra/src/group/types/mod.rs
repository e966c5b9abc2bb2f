mod cyclic;
mod dihedral;
mod fn_group;
mod integers;
mod multiplicative;
mod symmetric;
mod trivial;

pub use cyclic::*;
pub use dihedral::*;
pub use fn_group::*;
pub use integers::*;
pub use multiplicative::*;
pub use symmetric::*;
pub use trivial::*;
