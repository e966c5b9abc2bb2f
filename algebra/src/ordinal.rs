use crate::finite::Finite;

/// A trait for finite descriptors with labeled elements.
pub trait Ordinal: Finite {
  /// Returns a unique integer for each element which exactly covers the range
  /// (0..size). There must exist an element associated with each number in the
  /// range, and `for_each` must enumerate elements in this order.
  fn ord(&self, a: &Self::Elem) -> usize;

  /// The inverse of `ord`, returns the element associated with the ordinal.
  fn from_ord(&self, ord: usize) -> Self::Elem;
}
