//! Subgroups as validated membership predicates.
//!
//! A [`Subgroup`] borrows its parent group and decides membership with a
//! predicate, so subgroups of infinite groups are represented without
//! materializing their elements. Alongside the predicate, a subgroup records
//! the elements it is known to contain: a generating set when it was built
//! from one, otherwise the members it was validated on. Constructions that
//! need to enumerate (images, joins) require a generating set.

mod normal;
mod restricted;

use std::{ptr, sync::Arc};

use itertools::{iproduct, Itertools};
use tracing::debug;

pub use normal::*;
pub use restricted::*;

use crate::{
  check_opts::CheckOptions,
  closure::Closure,
  error::{AlgebraError, AlgebraResult, Law},
  finite::Finite,
  group::{CommGroup, Group},
  laws,
  morphism::Morphism,
};

pub(crate) type Pred<'a, T> = Arc<dyn Fn(&T) -> bool + Send + Sync + 'a>;

/// Elements a subgroup is known to contain.
#[derive(Clone, Debug)]
pub(crate) enum Known<T> {
  /// A generating set.
  Generators(Arc<[T]>),
  /// A set whose conjugates generate.
  NormalGenerators(Arc<[T]>),
  /// Members seen during validation, with no generation guarantee.
  Sample(Arc<[T]>),
}

impl<T> Known<T> {
  pub fn elements(&self) -> &[T] {
    match self {
      Self::Generators(elements) | Self::NormalGenerators(elements) | Self::Sample(elements) => {
        elements
      }
    }
  }

  /// Whether a homomorphism sending these elements to the identity is
  /// guaranteed to send the whole subgroup there.
  pub fn determines_kernel(&self) -> bool {
    !matches!(self, Self::Sample(_))
  }

  fn generators(&self) -> Option<&[T]> {
    match self {
      Self::Generators(elements) => Some(elements),
      _ => None,
    }
  }
}

/// A subset of a group closed under the identity, products and inverses.
pub struct Subgroup<'a, G: Group> {
  parent: &'a G,
  member: Pred<'a, G::Elem>,
  known: Known<G::Elem>,
}

impl<G: Group> Clone for Subgroup<'_, G> {
  fn clone(&self) -> Self {
    Self {
      parent: self.parent,
      member: self.member.clone(),
      known: self.known.clone(),
    }
  }
}

impl<'a, G: Group> Subgroup<'a, G> {
  pub(crate) fn from_parts(parent: &'a G, member: Pred<'a, G::Elem>, known: Known<G::Elem>) -> Self {
    Self {
      parent,
      member,
      known,
    }
  }

  /// A subgroup defined by `member`, whose closure obligations are the
  /// caller's responsibility.
  pub fn new_unchecked(parent: &'a G, member: impl Fn(&G::Elem) -> bool + Send + Sync + 'a) -> Self {
    Self::from_parts(parent, Arc::new(member), Known::Sample(Vec::new().into()))
  }

  /// A subgroup defined by `member`, which the caller asserts is exactly the
  /// subgroup generated by `generators`.
  pub fn with_generators(
    parent: &'a G,
    member: impl Fn(&G::Elem) -> bool + Send + Sync + 'a,
    generators: Vec<G::Elem>,
  ) -> Self {
    debug_assert!(generators.iter().all(&member));
    Self::from_parts(parent, Arc::new(member), Known::Generators(generators.into()))
  }

  /// A subgroup defined by `member`, rejected with a `LawViolation` if the
  /// identity is not a member, or if the members among `witnesses` are not
  /// closed under products and inverses.
  pub fn new(
    parent: &'a G,
    member: impl Fn(&G::Elem) -> bool + Send + Sync + 'a,
    witnesses: &[G::Elem],
    opts: &CheckOptions,
  ) -> AlgebraResult<Self> {
    let member: Pred<'a, G::Elem> = Arc::new(member);

    let identity = parent.identity();
    if !member(&identity) {
      return Err(laws::violation(Law::SubgroupIdentity, &identity));
    }

    let members: Vec<G::Elem> = witnesses.iter().filter(|x| member(x)).cloned().collect();

    let instances = laws::pairs(members.len(), opts);
    if let Some((i, j)) = laws::find_violation(&instances, opts, |(i, j)| {
      !member(&parent.op(&members[i], &members[j]))
    }) {
      return Err(laws::violation(
        Law::SubgroupProduct,
        (&members[i], &members[j]),
      ));
    }

    let instances = laws::singles(members.len(), opts);
    if let Some(i) = laws::find_violation(&instances, opts, |i| {
      !member(&parent.inverse(&members[i]))
    }) {
      return Err(laws::violation(Law::SubgroupInverse, &members[i]));
    }

    Ok(Self::from_parts(parent, member, Known::Sample(members.into())))
  }

  /// The whole group.
  pub fn top(parent: &'a G) -> Self {
    Self::new_unchecked(parent, |_| true)
  }

  /// The whole group, recorded with a generating set so that `join` and
  /// `map` are available. `generators` must generate the parent.
  pub fn top_generated_by(parent: &'a G, generators: Vec<G::Elem>) -> Self {
    Self::with_generators(parent, |_| true, generators)
  }

  /// The trivial subgroup `{e}`.
  pub fn bottom(parent: &'a G) -> Self {
    Self::from_parts(
      parent,
      Arc::new(move |x: &G::Elem| parent.is_identity(x)),
      Known::Generators(Vec::new().into()),
    )
  }

  /// The smallest subgroup containing `generators`. Membership is decided
  /// lazily by a memoized search bounded by `opts.search_limit`.
  pub fn generated_by(parent: &'a G, generators: Vec<G::Elem>, opts: &CheckOptions) -> Self {
    let steps = generators
      .iter()
      .flat_map(|g| [g.clone(), parent.inverse(g)])
      .unique()
      .collect();
    let closure = Arc::new(Closure::new(parent, steps, opts.search_limit));
    Self::from_parts(
      parent,
      Arc::new(move |x: &G::Elem| closure.contains(x)),
      Known::Generators(generators.into()),
    )
  }

  pub fn parent(&self) -> &'a G {
    self.parent
  }

  pub fn contains(&self, x: &G::Elem) -> bool {
    (self.member)(x)
  }

  /// A generating set, if one is known.
  pub fn generators(&self) -> Option<&[G::Elem]> {
    self.known.generators()
  }

  pub(crate) fn known(&self) -> &Known<G::Elem> {
    &self.known
  }

  pub(crate) fn predicate(&self) -> Pred<'a, G::Elem> {
    self.member.clone()
  }

  /// The intersection of two subgroups of the same group.
  pub fn meet(&self, other: &Self) -> Self {
    debug_assert!(ptr::eq(self.parent, other.parent));
    let (a, b) = (self.member.clone(), other.member.clone());
    let known: Vec<G::Elem> = self
      .known
      .elements()
      .iter()
      .chain(other.known.elements())
      .filter(|x| a(x) && b(x))
      .unique()
      .cloned()
      .collect();
    Self::from_parts(
      self.parent,
      Arc::new(move |x: &G::Elem| a(x) && b(x)),
      Known::Sample(known.into()),
    )
  }

  /// The smallest subgroup containing both subgroups: the closure of their
  /// union, not the union itself. Both sides need a known generating set.
  pub fn join(&self, other: &Self, opts: &CheckOptions) -> AlgebraResult<Self> {
    debug_assert!(ptr::eq(self.parent, other.parent));
    match (self.known.generators(), other.known.generators()) {
      (Some(a), Some(b)) => Ok(Self::generated_by(
        self.parent,
        a.iter().chain(b).unique().cloned().collect(),
        opts,
      )),
      _ => Err(AlgebraError::GeneratorsUnknown),
    }
  }

  /// The intersection of any number of subgroups, `top` for none.
  pub fn meet_all<'s>(parent: &'a G, subgroups: impl IntoIterator<Item = &'s Self>) -> Self
  where
    'a: 's,
  {
    subgroups
      .into_iter()
      .fold(Self::top(parent), |acc, s| acc.meet(s))
  }

  /// The subgroup generated by any number of subgroups, `bottom` for none.
  pub fn join_all<'s>(
    parent: &'a G,
    subgroups: impl IntoIterator<Item = &'s Self>,
    opts: &CheckOptions,
  ) -> AlgebraResult<Self>
  where
    'a: 's,
  {
    let mut generators = Vec::new();
    for subgroup in subgroups {
      debug_assert!(ptr::eq(parent, subgroup.parent));
      generators.extend_from_slice(subgroup.generators().ok_or(AlgebraError::GeneratorsUnknown)?);
    }
    Ok(Self::generated_by(
      parent,
      generators.into_iter().unique().collect(),
      opts,
    ))
  }

  /// The image of this subgroup under `f`, generated by the images of its
  /// generators.
  pub fn map<'b, H: Group>(&self, f: &Morphism<'b, G, H>, opts: &CheckOptions) -> AlgebraResult<Subgroup<'b, H>> {
    debug_assert!(ptr::eq(self.parent, f.source()));
    let generators = self.generators().ok_or(AlgebraError::GeneratorsUnknown)?;
    Ok(Subgroup::generated_by(
      f.target(),
      generators.iter().map(|g| f.apply(g)).unique().collect(),
      opts,
    ))
  }

  /// The preimage of this subgroup under `f`.
  pub fn comap<'b, F: Group>(&self, f: &Morphism<'b, F, G>) -> Subgroup<'b, F>
  where
    'a: 'b,
  {
    debug_assert!(ptr::eq(self.parent, f.target()));
    let member = self.member.clone();
    let map = f.map.clone();
    Subgroup::from_parts(
      f.source(),
      Arc::new(move |x: &F::Elem| member(&map(x))),
      Known::Sample(Vec::new().into()),
    )
  }

  /// A pair `(g, s)` with `g` among `witnesses` and `s` a member known to the
  /// subgroup or among `witnesses`, such that `g • s • g⁻¹` is not a member.
  pub fn normality_witness(&self, witnesses: &[G::Elem]) -> Option<(G::Elem, G::Elem)> {
    let members: Vec<&G::Elem> = self
      .known
      .elements()
      .iter()
      .chain(witnesses.iter().filter(|x| self.contains(x)))
      .unique()
      .collect();
    iproduct!(witnesses.iter(), members.iter())
      .find(|(g, s)| !self.contains(&self.parent.conjugate(g, s)))
      .map(|(g, s)| (g.clone(), (*s).clone()))
  }

  /// Whether conjugation by every witness preserves the subgroup. Exact when
  /// `witnesses` is the whole of a finite parent.
  pub fn is_normal(&self, witnesses: &[G::Elem]) -> bool {
    self.normality_witness(witnesses).is_none()
  }

  /// Promotes to a normal subgroup, rejecting with `NormalityRequired` if a
  /// conjugate by some witness escapes.
  pub fn into_normal(self, witnesses: &[G::Elem]) -> AlgebraResult<NormalSubgroup<'a, G>> {
    match self.normality_witness(witnesses) {
      Some((g, s)) => {
        let err = AlgebraError::NormalityRequired {
          witness: format!("{g:?} • {s:?} • {g:?}⁻¹"),
        };
        debug!(%err, "normality check failed");
        Err(err)
      }
      None => Ok(NormalSubgroup::new(self)),
    }
  }

  /// Every subgroup of a commutative group is normal.
  pub fn into_normal_commutative(self) -> NormalSubgroup<'a, G>
  where
    G: CommGroup,
  {
    NormalSubgroup::new(self)
  }

  /// Whether every known member, and every member among `witnesses`, lies in
  /// `other`.
  pub fn le(&self, other: &Self, witnesses: &[G::Elem]) -> bool {
    self
      .known
      .elements()
      .iter()
      .chain(witnesses.iter().filter(|x| self.contains(x)))
      .all(|x| other.contains(x))
  }

  /// A validated handle on `x`, if it is a member.
  pub fn member(&self, x: &G::Elem) -> Option<Member<G::Elem>> {
    self.contains(x).then(|| Member::new(x.clone()))
  }

  /// This subgroup as a group in its own right.
  pub fn as_group(&self) -> Restricted<'_, 'a, G> {
    Restricted::new(self)
  }
}

impl<'a, G: Group + Finite> Subgroup<'a, G> {
  /// A subgroup of a finite group, with closure checked against every element
  /// and its members recorded as a generating set.
  pub fn finite(
    parent: &'a G,
    member: impl Fn(&G::Elem) -> bool + Send + Sync + 'a,
    opts: &CheckOptions,
  ) -> AlgebraResult<Self> {
    Ok(Self::new(parent, member, &parent.elements(), opts)?.enumerate())
  }

  /// Records every member as the generating set, making `join` and `map`
  /// available.
  pub fn enumerate(self) -> Self {
    let members: Vec<G::Elem> = self.members();
    Self {
      known: Known::Generators(members.into()),
      ..self
    }
  }

  pub fn members(&self) -> Vec<G::Elem> {
    self.parent.for_each().filter(|x| self.contains(x)).collect()
  }

  pub fn order(&self) -> usize {
    self.parent.for_each().filter(|x| self.contains(x)).count()
  }

  /// The number of cosets of this subgroup.
  pub fn index(&self) -> usize {
    self.parent.size() / self.order()
  }

  pub fn same_members(&self, other: &Self) -> bool {
    self
      .parent
      .for_each()
      .all(|x| self.contains(&x) == other.contains(&x))
  }
}

#[cfg(test)]
mod tests {
  use googletest::{expect_that, expect_true, gtest, prelude::*};
  use rstest::rstest;

  use super::*;
  use crate::{
    free_group::FreeGroup,
    group::{Cyclic, Dihedral, Integers, Permutation, Symmetric, Symmetry},
    laws::check_group,
    monoid::Monoid,
  };

  fn opts() -> CheckOptions {
    CheckOptions::default()
  }

  fn cycle(points: &[usize]) -> Permutation {
    let Some(perm) = Permutation::cycle(3, points) else {
      panic!("invalid cycle {points:?}");
    };
    perm
  }

  #[gtest]
  fn test_new_accepts_closed_predicate() {
    let g = Dihedral::<4>;
    let rotations = Subgroup::new(
      &g,
      |x: &Symmetry| matches!(x, Symmetry::Rot(_)),
      &g.elements(),
      &opts(),
    );
    expect_true!(rotations.is_ok());
  }

  #[gtest]
  fn test_new_rejects_unclosed_predicate() {
    let g = Dihedral::<4>;
    let res = Subgroup::new(
      &g,
      |x: &Symmetry| matches!(x, Symmetry::Rot(0) | Symmetry::Rot(1)),
      &g.elements(),
      &opts(),
    );
    expect_true!(matches!(
      res,
      Err(AlgebraError::LawViolation {
        law: Law::SubgroupProduct,
        ..
      })
    ));

    let res = Subgroup::new(&g, |x: &Symmetry| *x == Symmetry::Rot(1), &g.elements(), &opts());
    expect_true!(matches!(
      res,
      Err(AlgebraError::LawViolation {
        law: Law::SubgroupIdentity,
        ..
      })
    ));
  }

  #[rstest]
  #[case(vec![], 1)]
  #[case(vec![4], 3)]
  #[case(vec![6], 2)]
  #[case(vec![4, 6], 6)]
  #[case(vec![5], 12)]
  fn test_generated_order(#[case] generators: Vec<u16>, #[case] order: usize) {
    let g = Cyclic::<12>;
    let s = Subgroup::generated_by(&g, generators, &opts());
    assert_eq!(s.order(), order);
  }

  #[gtest]
  fn test_meet_laws() {
    let g = Cyclic::<12>;
    let a = Subgroup::generated_by(&g, vec![2], &opts());
    let b = Subgroup::generated_by(&g, vec![3], &opts());
    let c = Subgroup::generated_by(&g, vec![4], &opts());

    expect_true!(a.meet(&a).same_members(&a));
    expect_true!(a.meet(&b).same_members(&b.meet(&a)));
    expect_true!(a.meet(&b).meet(&c).same_members(&a.meet(&b.meet(&c))));
    for x in g.for_each() {
      expect_true!(a.meet(&b).contains(&x) == (a.contains(&x) && b.contains(&x)));
    }
    expect_that!(a.meet(&b).order(), eq(2));
  }

  #[gtest]
  fn test_join_laws() -> Result<()> {
    let g = Cyclic::<12>;
    let a = Subgroup::generated_by(&g, vec![4], &opts());
    let b = Subgroup::generated_by(&g, vec![6], &opts());

    expect_true!(a.join(&a, &opts())?.same_members(&a));
    let joined = a.join(&b, &opts())?;
    expect_true!(joined.same_members(&b.join(&a, &opts())?));
    expect_that!(joined.order(), eq(6));
    expect_true!(a.le(&joined, &g.elements()));
    expect_true!(b.le(&joined, &g.elements()));
    Ok(())
  }

  #[gtest]
  fn test_lattice_bounds() -> Result<()> {
    let g = Dihedral::<3>;
    let s = Subgroup::finite(&g, |x: &Symmetry| matches!(x, Symmetry::Rot(_)), &opts())?;
    let top = Subgroup::top(&g).enumerate();
    let bottom = Subgroup::bottom(&g);

    expect_true!(s.meet(&top).same_members(&s));
    expect_true!(s.meet(&bottom).same_members(&bottom));
    expect_true!(s.join(&bottom, &opts())?.same_members(&s));
    expect_true!(s.join(&top, &opts())?.same_members(&top));
    expect_true!(Subgroup::meet_all(&g, []).same_members(&top));
    expect_true!(Subgroup::join_all(&g, [], &opts())?.same_members(&bottom));
    expect_true!(Subgroup::join_all(&g, [&s, &bottom], &opts())?.same_members(&s));
    expect_that!(s.index(), eq(2));
    Ok(())
  }

  #[gtest]
  fn test_join_is_closure_of_union() -> Result<()> {
    let g = Symmetric::new(3);
    let a = Subgroup::generated_by(&g, vec![cycle(&[0, 1])], &opts());
    let b = Subgroup::generated_by(&g, vec![cycle(&[1, 2])], &opts());
    expect_that!(a.order(), eq(2));
    expect_that!(b.order(), eq(2));

    let joined = a.join(&b, &opts())?;
    expect_that!(joined.order(), eq(6));

    let (e, x, y) = (g.identity(), cycle(&[0, 1]), cycle(&[1, 2]));
    let union = Subgroup::new(
      &g,
      move |p: &Permutation| *p == e || *p == x || *p == y,
      &g.elements(),
      &opts(),
    );
    expect_true!(matches!(
      union,
      Err(AlgebraError::LawViolation {
        law: Law::SubgroupProduct,
        ..
      })
    ));
    Ok(())
  }

  #[gtest]
  fn test_join_requires_generators() {
    let z = Integers;
    let top = Subgroup::top(&z);
    let evens = z.multiples(2);
    expect_true!(matches!(
      top.join(&evens, &opts()),
      Err(AlgebraError::GeneratorsUnknown)
    ));
  }

  #[gtest]
  fn test_join_on_infinite_carrier() -> Result<()> {
    let z = Integers;
    let joined = z.multiples(4).join(&z.multiples(6), &opts())?;
    expect_true!(joined.contains(&2));
    expect_true!(joined.contains(&-10));
    expect_false!(joined.contains(&3));
    Ok(())
  }

  #[gtest]
  fn test_map_and_comap() -> Result<()> {
    let c12 = Cyclic::<12>;
    let c4 = Cyclic::<4>;
    let reduce = Morphism::new(&c12, &c4, |x: &u16| x % 4, &c12.elements(), &opts())?;

    let evens = Subgroup::generated_by(&c12, vec![2], &opts());
    let image = evens.map(&reduce, &opts())?;
    expect_that!(image.order(), eq(2));

    let kernel = Subgroup::bottom(&c4).comap(&reduce);
    expect_that!(kernel.order(), eq(3));
    expect_true!(kernel.same_members(&Subgroup::generated_by(&c12, vec![4], &opts())));

    let preimage = image.comap(&reduce);
    expect_that!(preimage.order(), eq(6));
    Ok(())
  }

  #[gtest]
  fn test_normality() {
    let g = Symmetric::new(3);
    let elements = g.elements();

    let transposition = Subgroup::generated_by(&g, vec![cycle(&[0, 1])], &opts());
    expect_false!(transposition.is_normal(&elements));
    expect_true!(matches!(
      transposition.into_normal(&elements),
      Err(AlgebraError::NormalityRequired { .. })
    ));

    let alternating = Subgroup::generated_by(&g, vec![cycle(&[0, 1, 2])], &opts());
    expect_true!(alternating.is_normal(&elements));
    expect_true!(alternating.into_normal(&elements).is_ok());
  }

  #[gtest]
  fn test_restricted_group() -> Result<()> {
    let g = Dihedral::<4>;
    let rotations = Subgroup::finite(&g, |x: &Symmetry| matches!(x, Symmetry::Rot(_)), &opts())?;
    let as_group = rotations.as_group();

    expect_that!(as_group.size(), eq(4));
    expect_true!(check_group(&as_group, &as_group.elements(), &opts()).is_ok());
    expect_true!(rotations.member(&Symmetry::Rfl(0)).is_none());

    let inclusion = as_group.inclusion();
    for x in as_group.for_each() {
      expect_true!(inclusion.apply(&x) == *x.get());
    }
    Ok(())
  }

  #[gtest]
  fn test_top_with_generators_joins_and_maps() -> Result<()> {
    let free = FreeGroup::new(vec!['a', 'b']);
    expect_true!(matches!(
      Subgroup::top(&free).join(&Subgroup::bottom(&free), &opts()),
      Err(AlgebraError::GeneratorsUnknown)
    ));

    let top = Subgroup::top_generated_by(&free, vec![free.of('a'), free.of('b')]);
    let joined = top.join(&Subgroup::generated_by(&free, vec![free.of('a')], &opts()), &opts())?;
    expect_true!(joined.contains(&free.of('b')));

    let c5 = Cyclic::<5>;
    let phi = free.lift(&c5, |_: &char| 1);
    expect_that!(top.map(&phi, &opts())?.order(), eq(5));
    Ok(())
  }
}
