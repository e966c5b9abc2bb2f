use std::sync::Arc;

use crate::{
  check_opts::CheckOptions,
  error::AlgebraResult,
  group::Group,
  laws::{check_group, check_monoid},
  monoid::Monoid,
  semigroup::{Element, Semigroup},
};

type BinaryFn<T> = Arc<dyn Fn(&T, &T) -> T + Send + Sync>;
type UnaryFn<T> = Arc<dyn Fn(&T) -> T + Send + Sync>;

/// A monoid assembled from a raw operation and identity.
#[derive(Clone)]
pub struct FnMonoid<T> {
  op: BinaryFn<T>,
  identity: T,
}

impl<T: Element> FnMonoid<T> {
  /// Assembles a monoid without checking its laws. Associativity and the
  /// identity laws are the caller's responsibility.
  pub fn new(op: impl Fn(&T, &T) -> T + Send + Sync + 'static, identity: T) -> Self {
    Self {
      op: Arc::new(op),
      identity,
    }
  }

  /// Assembles a monoid, rejecting it if the monoid laws fail on `witnesses`.
  pub fn validated(
    op: impl Fn(&T, &T) -> T + Send + Sync + 'static,
    identity: T,
    witnesses: &[T],
    opts: &CheckOptions,
  ) -> AlgebraResult<Self> {
    let monoid = Self::new(op, identity);
    check_monoid(&monoid, witnesses, opts)?;
    Ok(monoid)
  }
}

impl<T: Element> Semigroup for FnMonoid<T> {
  type Elem = T;

  fn op(&self, a: &T, b: &T) -> T {
    (self.op)(a, b)
  }
}

impl<T: Element> Monoid for FnMonoid<T> {
  fn identity(&self) -> T {
    self.identity.clone()
  }
}

/// A group assembled from a raw operation, identity and inverse.
#[derive(Clone)]
pub struct FnGroup<T> {
  monoid: FnMonoid<T>,
  inverse: UnaryFn<T>,
}

impl<T: Element> FnGroup<T> {
  /// Assembles a group without checking its laws.
  pub fn new(
    op: impl Fn(&T, &T) -> T + Send + Sync + 'static,
    identity: T,
    inverse: impl Fn(&T) -> T + Send + Sync + 'static,
  ) -> Self {
    Self {
      monoid: FnMonoid::new(op, identity),
      inverse: Arc::new(inverse),
    }
  }

  /// Assembles a group, rejecting it with a `LawViolation` if associativity,
  /// identity or inverse laws fail on `witnesses`.
  pub fn validated(
    op: impl Fn(&T, &T) -> T + Send + Sync + 'static,
    identity: T,
    inverse: impl Fn(&T) -> T + Send + Sync + 'static,
    witnesses: &[T],
    opts: &CheckOptions,
  ) -> AlgebraResult<Self> {
    let group = Self::new(op, identity, inverse);
    check_group(&group, witnesses, opts)?;
    Ok(group)
  }
}

impl<T: Element> Semigroup for FnGroup<T> {
  type Elem = T;

  fn op(&self, a: &T, b: &T) -> T {
    self.monoid.op(a, b)
  }
}

impl<T: Element> Monoid for FnGroup<T> {
  fn identity(&self) -> T {
    self.monoid.identity()
  }
}

impl<T: Element> Group for FnGroup<T> {
  fn inverse(&self, a: &T) -> T {
    (self.inverse)(a)
  }
}
