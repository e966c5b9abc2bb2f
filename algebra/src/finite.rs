use crate::semigroup::Semigroup;

/// A descriptor with finitely many elements. The size of the carrier is a
/// property of the descriptor, fixed at construction.
pub trait Finite: Semigroup {
  fn size(&self) -> usize;

  /// Enumerates every element exactly once.
  fn for_each(&self) -> impl Iterator<Item = Self::Elem> + '_;

  fn elements(&self) -> Vec<Self::Elem> {
    self.for_each().collect()
  }
}
