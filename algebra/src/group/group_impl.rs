use crate::monoid::Monoid;

/// An algebraic group.
pub trait Group: Monoid {
  /// The unique inverse of a group element.
  fn inverse(&self, a: &Self::Elem) -> Self::Elem;

  /// `g • x • g⁻¹`.
  fn conjugate(&self, g: &Self::Elem, x: &Self::Elem) -> Self::Elem {
    self.op(&self.op(g, x), &self.inverse(g))
  }

  /// `a⁻¹ • b`, which lies in a subgroup `S` exactly when `a` and `b` share a
  /// left coset of `S`.
  fn left_quotient(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem {
    self.op(&self.inverse(a), b)
  }

  /// Integer powers, negative exponents raising the inverse.
  fn zpow(&self, a: &Self::Elem, n: i64) -> Self::Elem {
    if n >= 0 {
      self.pow(a, n as u64)
    } else {
      self.pow(&self.inverse(a), n.unsigned_abs())
    }
  }
}

/// A group whose operation commutes. Every subgroup of a commutative group is
/// normal.
pub trait CommGroup: Group {}
