use crate::{
  finite::Finite,
  group::{CommGroup, Group},
  monoid::Monoid,
  ordinal::Ordinal,
  semigroup::Semigroup,
};

/// The cyclic group of order `N`: residues `0..N` under addition mod `N`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cyclic<const N: u16>;

impl<const N: u16> Cyclic<N> {
  /// The residue `1`, which generates the group.
  pub const fn generator() -> u16 {
    1 % N
  }

  pub const fn const_op(a: u16, b: u16) -> u16 {
    ((a as u32 + b as u32) % N as u32) as u16
  }
}

impl<const N: u16> Semigroup for Cyclic<N> {
  type Elem = u16;

  fn op(&self, a: &u16, b: &u16) -> u16 {
    Self::const_op(*a, *b)
  }
}

impl<const N: u16> Monoid for Cyclic<N> {
  fn identity(&self) -> u16 {
    0
  }
}

impl<const N: u16> Group for Cyclic<N> {
  fn inverse(&self, a: &u16) -> u16 {
    (N - a) % N
  }
}

impl<const N: u16> CommGroup for Cyclic<N> {}

impl<const N: u16> Finite for Cyclic<N> {
  fn size(&self) -> usize {
    N as usize
  }

  fn for_each(&self) -> impl Iterator<Item = u16> + '_ {
    0..N
  }
}

impl<const N: u16> Ordinal for Cyclic<N> {
  fn ord(&self, a: &u16) -> usize {
    *a as usize
  }

  fn from_ord(&self, ord: usize) -> u16 {
    debug_assert!(ord < N as usize);
    ord as u16
  }
}
