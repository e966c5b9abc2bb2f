use crate::semigroup::Semigroup;

/// An algebraic monoid.
pub trait Monoid: Semigroup {
  /// The identity element of the monoid.
  fn identity(&self) -> Self::Elem;

  fn is_identity(&self, a: &Self::Elem) -> bool {
    self.equal(a, &self.identity())
  }

  /// `a` multiplied with itself `n` times, by repeated squaring.
  fn pow(&self, a: &Self::Elem, mut n: u64) -> Self::Elem {
    let mut result = self.identity();
    let mut base = a.clone();
    while n > 0 {
      if n & 1 == 1 {
        result = self.op(&result, &base);
      }
      n >>= 1;
      if n > 0 {
        base = self.op(&base, &base);
      }
    }
    result
  }

  /// Folds the operation over `elems`, left to right.
  fn product<'e, I>(&self, elems: I) -> Self::Elem
  where
    I: IntoIterator<Item = &'e Self::Elem>,
  {
    elems
      .into_iter()
      .fold(self.identity(), |acc, x| self.op(&acc, x))
  }
}
