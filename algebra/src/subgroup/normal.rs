use std::{ops::Deref, sync::Arc};

use itertools::Itertools;

use crate::{
  check_opts::CheckOptions,
  closure::Closure,
  error::AlgebraResult,
  finite::Finite,
  group::Group,
  morphism::Morphism,
  subgroup::{Known, Subgroup},
};

/// A subgroup closed under conjugation by every element of its parent.
///
/// Only obtainable through a checked conversion ([`Subgroup::into_normal`])
/// or a construction that is normal by definition: kernels, normal closures,
/// the trivial and full subgroups, and subgroups of commutative groups.
pub struct NormalSubgroup<'a, G: Group>(Subgroup<'a, G>);

impl<G: Group> Clone for NormalSubgroup<'_, G> {
  fn clone(&self) -> Self {
    Self(self.0.clone())
  }
}

impl<'a, G: Group> Deref for NormalSubgroup<'a, G> {
  type Target = Subgroup<'a, G>;

  fn deref(&self) -> &Subgroup<'a, G> {
    &self.0
  }
}

impl<'a, G: Group> NormalSubgroup<'a, G> {
  pub(crate) fn new(subgroup: Subgroup<'a, G>) -> Self {
    Self(subgroup)
  }

  pub fn top(parent: &'a G) -> Self {
    Self(Subgroup::top(parent))
  }

  pub fn top_generated_by(parent: &'a G, generators: Vec<G::Elem>) -> Self {
    Self(Subgroup::top_generated_by(parent, generators))
  }

  pub fn bottom(parent: &'a G) -> Self {
    Self(Subgroup::bottom(parent))
  }

  /// The normal closure of `relators`: the subgroup generated by every
  /// conjugate `g • r • g⁻¹` of a relator by an element of the parent.
  ///
  /// Conjugation is part of the lazy membership search, by each of
  /// `parent_generators` and their inverses, so every element of the closure
  /// is reachable. Only `opts.search_limit` bounds the search. The result is
  /// exact when `parent_generators` generate the parent and the limit is not
  /// reached.
  pub fn normal_closure(
    parent: &'a G,
    relators: Vec<G::Elem>,
    parent_generators: &[G::Elem],
    opts: &CheckOptions,
  ) -> Self {
    let steps = relators
      .iter()
      .flat_map(|r| [r.clone(), parent.inverse(r)])
      .map(|x| parent.normalize(x))
      .unique()
      .collect();
    let conjugators = parent_generators
      .iter()
      .flat_map(|a| {
        let a_inv = parent.inverse(a);
        [(a.clone(), a_inv.clone()), (a_inv, a.clone())]
      })
      .unique()
      .collect();
    let closure = Arc::new(Closure::with_conjugators(
      parent,
      steps,
      conjugators,
      opts.search_limit,
    ));
    Self(Subgroup::from_parts(
      parent,
      Arc::new(move |x: &G::Elem| closure.contains(x)),
      Known::NormalGenerators(relators.into()),
    ))
  }

  pub fn subgroup(&self) -> &Subgroup<'a, G> {
    &self.0
  }

  pub fn into_subgroup(self) -> Subgroup<'a, G> {
    self.0
  }

  /// The intersection of normal subgroups is normal.
  pub fn meet(&self, other: &Self) -> Self {
    Self(self.0.meet(&other.0))
  }

  /// The subgroup generated by two normal subgroups is normal.
  pub fn join(&self, other: &Self, opts: &CheckOptions) -> AlgebraResult<Self> {
    Ok(Self(self.0.join(&other.0, opts)?))
  }

  /// The preimage of a normal subgroup is normal.
  pub fn comap<'b, F: Group>(&self, f: &Morphism<'b, F, G>) -> NormalSubgroup<'b, F>
  where
    'a: 'b,
  {
    NormalSubgroup(self.0.comap(f))
  }
}

impl<'a, G: Group + Finite> NormalSubgroup<'a, G> {
  /// The normal closure of `relators` in a finite parent, conjugating by
  /// every element. The result is exact and enumerated.
  pub fn normal_closure_finite(parent: &'a G, relators: Vec<G::Elem>, opts: &CheckOptions) -> Self {
    let opts = opts.with_search_limit(opts.search_limit.max(parent.size()));
    Self::normal_closure(parent, relators, &parent.elements(), &opts).enumerate()
  }

  pub fn enumerate(self) -> Self {
    Self(self.0.enumerate())
  }
}
