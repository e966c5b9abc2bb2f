use crate::{
  group::{CommGroup, Group},
  monoid::Monoid,
  semigroup::Semigroup,
  subgroup::Subgroup,
};

/// The additive group of integers, carried by `i64` with wrapping arithmetic.
/// Behaves as ℤ for every computation that does not overflow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Integers;

impl Integers {
  /// The subgroup `nℤ`, generated by `n`.
  pub fn multiples(&self, n: i64) -> Subgroup<'_, Self> {
    Subgroup::with_generators(
      self,
      move |x: &i64| {
        if n == 0 {
          *x == 0
        } else {
          x.wrapping_rem(n) == 0
        }
      },
      vec![n],
    )
  }
}

impl Semigroup for Integers {
  type Elem = i64;

  fn op(&self, a: &i64, b: &i64) -> i64 {
    a.wrapping_add(*b)
  }
}

impl Monoid for Integers {
  fn identity(&self) -> i64 {
    0
  }

  fn pow(&self, a: &i64, n: u64) -> i64 {
    a.wrapping_mul(n as i64)
  }
}

impl Group for Integers {
  fn inverse(&self, a: &i64) -> i64 {
    a.wrapping_neg()
  }
}

impl CommGroup for Integers {}
