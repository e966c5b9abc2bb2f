use crate::{
  finite::Finite,
  group::{CommGroup, Group},
  monoid::Monoid,
  ordinal::Ordinal,
  semigroup::Semigroup,
};

/// The group with a single element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Trivial;

impl Semigroup for Trivial {
  type Elem = ();

  fn op(&self, _a: &(), _b: &()) {}
}

impl Monoid for Trivial {
  fn identity(&self) {}
}

impl Group for Trivial {
  fn inverse(&self, _a: &()) {}
}

impl CommGroup for Trivial {}

impl Finite for Trivial {
  fn size(&self) -> usize {
    1
  }

  fn for_each(&self) -> impl Iterator<Item = ()> + '_ {
    std::iter::once(())
  }
}

impl Ordinal for Trivial {
  fn ord(&self, _a: &()) -> usize {
    0
  }

  fn from_ord(&self, _ord: usize) {}
}
