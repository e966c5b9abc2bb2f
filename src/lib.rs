//! Algebraic structures as runtime descriptors: groups, morphisms, subgroups,
//! quotients, actions and presentations.

pub use algebra::*;
pub use union_find;

pub mod prelude {
  pub use algebra::{
    action::{cayley_embedding, Action, OrbitDecomposition, OrbitStabilizer},
    check_opts::CheckOptions,
    error::{AlgebraError, AlgebraResult, Law},
    finite::Finite,
    free_group::{FreeGroup, Letter, Word},
    group::*,
    laws::{check_commutative, check_group, check_monoid, check_semigroup},
    monoid::Monoid,
    morphism::{Isomorphism, Morphism},
    ordinal::Ordinal,
    presentation::PresentedGroup,
    product::DirectProduct,
    quotient::{first_isomorphism, Coset, CosetSpace, FirstIsomorphism, Quotient},
    semigroup::{Element, Semigroup},
    subgroup::{Member, NormalSubgroup, Restricted, Subgroup},
  };
  pub use algebra::{direct_product, direct_product_type};
}
