mod group_impl;
pub mod types;

pub use group_impl::*;
pub use types::*;
