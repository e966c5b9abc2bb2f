use crate::{
  finite::Finite,
  group::{CommGroup, Group},
  monoid::Monoid,
  ordinal::Ordinal,
  semigroup::Semigroup,
};

/// The direct product of two descriptors, operating componentwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirectProduct<L, R> {
  left: L,
  right: R,
}

impl<L, R> DirectProduct<L, R> {
  pub const fn new(left: L, right: R) -> Self {
    Self { left, right }
  }

  pub const fn left(&self) -> &L {
    &self.left
  }

  pub const fn right(&self) -> &R {
    &self.right
  }
}

impl<L, R> Semigroup for DirectProduct<L, R>
where
  L: Semigroup,
  R: Semigroup,
{
  type Elem = (L::Elem, R::Elem);

  fn op(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem {
    (self.left.op(&a.0, &b.0), self.right.op(&a.1, &b.1))
  }

  fn equal(&self, a: &Self::Elem, b: &Self::Elem) -> bool {
    self.left.equal(&a.0, &b.0) && self.right.equal(&a.1, &b.1)
  }

  fn normalize(&self, a: Self::Elem) -> Self::Elem {
    (self.left.normalize(a.0), self.right.normalize(a.1))
  }
}

impl<L, R> Monoid for DirectProduct<L, R>
where
  L: Monoid,
  R: Monoid,
{
  fn identity(&self) -> Self::Elem {
    (self.left.identity(), self.right.identity())
  }
}

impl<L, R> Group for DirectProduct<L, R>
where
  L: Group,
  R: Group,
{
  fn inverse(&self, a: &Self::Elem) -> Self::Elem {
    (self.left.inverse(&a.0), self.right.inverse(&a.1))
  }
}

impl<L, R> CommGroup for DirectProduct<L, R>
where
  L: CommGroup,
  R: CommGroup,
{
}

impl<L, R> Finite for DirectProduct<L, R>
where
  L: Finite,
  R: Finite,
{
  fn size(&self) -> usize {
    self.left.size() * self.right.size()
  }

  /// Enumerates with the left component varying fastest.
  fn for_each(&self) -> impl Iterator<Item = Self::Elem> + '_ {
    let lefts = self.left.elements();
    self.right.for_each().flat_map(move |r| {
      lefts
        .clone()
        .into_iter()
        .map(move |l| (l, r.clone()))
    })
  }
}

impl<L, R> Ordinal for DirectProduct<L, R>
where
  L: Ordinal,
  R: Ordinal,
{
  fn ord(&self, a: &Self::Elem) -> usize {
    self.left.ord(&a.0) + self.right.ord(&a.1) * self.left.size()
  }

  fn from_ord(&self, ord: usize) -> Self::Elem {
    let l = ord % self.left.size();
    let r = ord / self.left.size();
    (self.left.from_ord(l), self.right.from_ord(r))
  }
}

#[macro_export]
macro_rules! direct_product_type {
  ($g:ty) => {
    $g
  };
  ($l:ty, $($rs:ty),+) => {
    $crate::product::DirectProduct<$l, $crate::direct_product_type!($($rs),+)>
  }
}

#[macro_export]
macro_rules! direct_product {
  ($g:expr) => {
    $g
  };
  ($l:expr, $($rs:expr),+) => {
    $crate::product::DirectProduct::new($l, $crate::direct_product!($($rs),+))
  }
}
