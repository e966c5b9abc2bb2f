use crate::{monoid::Monoid, semigroup::Semigroup};

/// The monoid of `u64` under wrapping multiplication, i.e. the integers
/// mod 2^64 under multiplication. Not a group: even numbers have no inverse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Multiplicative;

impl Semigroup for Multiplicative {
  type Elem = u64;

  fn op(&self, a: &u64, b: &u64) -> u64 {
    a.wrapping_mul(*b)
  }
}

impl Monoid for Multiplicative {
  fn identity(&self) -> u64 {
    1
  }
}
