use std::{fmt::Debug, hash::Hash};

/// Values that can serve as the carrier of an algebraic descriptor.
pub trait Element: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> Element for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

/// An algebraic semigroup.
///
/// Descriptors are values rather than element types, so that structures built
/// at runtime (quotients, subgroups, presentations) can carry the operation of
/// the structure they were derived from. A descriptor is never mutated after
/// construction and may be shared freely between threads.
pub trait Semigroup: Send + Sync {
  type Elem: Element;

  /// The associative binary operation.
  fn op(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

  /// Whether two carrier values denote the same element. Carriers whose values
  /// are representatives of classes (cosets) override this.
  fn equal(&self, a: &Self::Elem, b: &Self::Elem) -> bool {
    a == b
  }

  /// Rewrites `a` into the descriptor's normal form. Implementations that
  /// override this must send `equal` values to `==` values.
  fn normalize(&self, a: Self::Elem) -> Self::Elem {
    a
  }
}
