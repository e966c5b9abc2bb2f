pub mod action;
pub mod check_opts;
mod closure;
pub mod error;
pub mod finite;
pub mod free_group;
pub mod group;
pub mod laws;
pub mod monoid;
pub mod morphism;
pub mod ordinal;
pub mod presentation;
pub mod product;
pub mod quotient;
pub mod semigroup;
pub mod subgroup;
