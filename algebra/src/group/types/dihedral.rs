use std::fmt::Display;

use crate::{
  finite::Finite,
  group::Group,
  monoid::Monoid,
  ordinal::Ordinal,
  semigroup::Semigroup,
};

/// An element of a dihedral group: a rotation by `i` steps, or the reflection
/// obtained by rotating `i` steps after reflecting through axis 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symmetry {
  Rot(u16),
  Rfl(u16),
}

impl Display for Symmetry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Rot(i) => write!(f, "r{i}"),
      Self::Rfl(i) => write!(f, "s{i}"),
    }
  }
}

/// The dihedral group of order `2N`, the symmetries of a regular `N`-gon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dihedral<const N: u16>;

impl<const N: u16> Dihedral<N> {
  /// While const traits are nightly-only, define const versions of the trait
  /// impls manually.
  pub const fn const_identity() -> Symmetry {
    Symmetry::Rot(0)
  }

  pub const fn const_ord(a: Symmetry) -> usize {
    match a {
      Symmetry::Rot(i) => i as usize,
      Symmetry::Rfl(i) => (N + i) as usize,
    }
  }

  pub const fn const_op(a: Symmetry, b: Symmetry) -> Symmetry {
    match (a, b) {
      (Symmetry::Rot(i), Symmetry::Rot(j)) => Symmetry::Rot((i + j) % N),
      (Symmetry::Rot(i), Symmetry::Rfl(j)) => Symmetry::Rfl((i + j) % N),
      (Symmetry::Rfl(i), Symmetry::Rot(j)) => Symmetry::Rfl((N + i - j) % N),
      (Symmetry::Rfl(i), Symmetry::Rfl(j)) => Symmetry::Rot((N + i - j) % N),
    }
  }
}

impl<const N: u16> Semigroup for Dihedral<N> {
  type Elem = Symmetry;

  fn op(&self, a: &Symmetry, b: &Symmetry) -> Symmetry {
    Self::const_op(*a, *b)
  }
}

impl<const N: u16> Monoid for Dihedral<N> {
  fn identity(&self) -> Symmetry {
    Self::const_identity()
  }
}

impl<const N: u16> Group for Dihedral<N> {
  fn inverse(&self, a: &Symmetry) -> Symmetry {
    match a {
      Symmetry::Rot(i) => Symmetry::Rot((N - i) % N),
      Symmetry::Rfl(i) => Symmetry::Rfl(*i),
    }
  }
}

impl<const N: u16> Finite for Dihedral<N> {
  fn size(&self) -> usize {
    2 * (N as usize)
  }

  fn for_each(&self) -> impl Iterator<Item = Symmetry> + '_ {
    (0..self.size()).map(|ord| self.from_ord(ord))
  }
}

impl<const N: u16> Ordinal for Dihedral<N> {
  fn ord(&self, a: &Symmetry) -> usize {
    Self::const_ord(*a)
  }

  fn from_ord(&self, ord: usize) -> Symmetry {
    if ord < N as usize {
      Symmetry::Rot(ord as u16)
    } else {
      debug_assert!(ord < 2 * N as usize);
      Symmetry::Rfl((ord - N as usize) as u16)
    }
  }
}
