//! Left actions of a group on a set of points.

use std::{
  collections::{HashMap, HashSet, VecDeque},
  sync::Arc,
};

use itertools::Itertools;
use tracing::{debug, warn};
use union_find::UnionFind;

use crate::{
  check_opts::CheckOptions,
  error::{AlgebraError, AlgebraResult, Law},
  finite::Finite,
  group::{Group, Permutation, Symmetric},
  laws,
  morphism::Morphism,
  quotient::Coset,
  semigroup::Element,
  subgroup::Subgroup,
};

type ActFn<'a, T, X> = Arc<dyn Fn(&T, &X) -> X + Send + Sync + 'a>;

/// A left action `act(g, x)` of a group on points of type `X`, satisfying
/// `act(e, x) = x` and `act(g, act(h, x)) = act(g • h, x)`.
pub struct Action<'a, G: Group, X> {
  group: &'a G,
  act: ActFn<'a, G::Elem, X>,
}

impl<G: Group, X> Clone for Action<'_, G, X> {
  fn clone(&self) -> Self {
    Self {
      group: self.group,
      act: self.act.clone(),
    }
  }
}

impl<'a, G: Group> Action<'a, G, G::Elem> {
  /// The action of a group on itself by `act(g, x) = g • x`.
  pub fn left_translation(group: &'a G) -> Self {
    Self::new_unchecked(group, move |g: &G::Elem, x: &G::Elem| group.op(g, x))
  }

  /// The action of a group on itself by `act(g, x) = g • x • g⁻¹`. Its orbits
  /// are the conjugacy classes, and the stabilizer of `x` is its centralizer.
  pub fn conjugation(group: &'a G) -> Self {
    Self::new_unchecked(group, move |g: &G::Elem, x: &G::Elem| {
      group.conjugate(g, x)
    })
  }
}

impl<'a, G: Group, X: Element> Action<'a, G, X> {
  /// Bundles `act` without checking the action axioms.
  pub fn new_unchecked(group: &'a G, act: impl Fn(&G::Elem, &X) -> X + Send + Sync + 'a) -> Self {
    Self {
      group,
      act: Arc::new(act),
    }
  }

  /// Bundles `act`, rejecting it with a `LawViolation` if an axiom fails for
  /// group elements from `group_witnesses` and points from `points`.
  pub fn new(
    group: &'a G,
    act: impl Fn(&G::Elem, &X) -> X + Send + Sync + 'a,
    group_witnesses: &[G::Elem],
    points: &[X],
    opts: &CheckOptions,
  ) -> AlgebraResult<Self> {
    let action = Self::new_unchecked(group, act);
    action.check(group_witnesses, points, opts)?;
    Ok(action)
  }

  /// Checks `act(e, x) = x` and `act(g, act(h, x)) = act(g • h, x)` for group
  /// elements from `group_witnesses` and points from `points`.
  pub fn check(&self, group_witnesses: &[G::Elem], points: &[X], opts: &CheckOptions) -> AlgebraResult<()> {
    let e = self.group.identity();
    let instances = laws::singles(points.len(), opts);
    if let Some(i) = laws::find_violation(&instances, opts, |i| self.act(&e, &points[i]) != points[i]) {
      return Err(laws::violation(Law::ActionIdentity, &points[i]));
    }

    let n = group_witnesses.len();
    let instances = laws::triples(n, n, points.len(), opts);
    if let Some((i, j, k)) = laws::find_violation(&instances, opts, |(i, j, k)| {
      let (g, h, x) = (&group_witnesses[i], &group_witnesses[j], &points[k]);
      self.act(g, &self.act(h, x)) != self.act(&self.group.op(g, h), x)
    }) {
      return Err(laws::violation(
        Law::ActionCompatibility,
        (&group_witnesses[i], &group_witnesses[j], &points[k]),
      ));
    }

    Ok(())
  }

  pub fn group(&self) -> &'a G {
    self.group
  }

  pub fn act(&self, g: &G::Elem, x: &X) -> X {
    (self.act)(g, x)
  }

  /// The orbit of `x` under the subgroup generated by `generators`, in
  /// breadth-first discovery order. Stops after `opts.search_limit` points.
  pub fn orbit_from_generators(&self, x: &X, generators: &[G::Elem], opts: &CheckOptions) -> Vec<X> {
    let steps: Vec<G::Elem> = generators
      .iter()
      .flat_map(|g| [g.clone(), self.group.inverse(g)])
      .unique()
      .collect();

    let mut seen = HashSet::from([x.clone()]);
    let mut orbit = vec![x.clone()];
    let mut frontier = VecDeque::from([x.clone()]);
    while let Some(y) = frontier.pop_front() {
      for step in &steps {
        let z = self.act(step, &y);
        if seen.insert(z.clone()) {
          if orbit.len() >= opts.search_limit {
            warn!(limit = opts.search_limit, "orbit search reached its limit");
            return orbit;
          }
          orbit.push(z.clone());
          frontier.push_back(z);
        }
      }
    }
    orbit
  }

  /// The group elements fixing `x`. Always a subgroup, given the action
  /// axioms.
  pub fn stabilizer(&self, x: &X) -> Subgroup<'a, G> {
    let act = self.act.clone();
    let x = x.clone();
    Subgroup::new_unchecked(self.group, move |g: &G::Elem| act(g, &x) == x)
  }
}

impl<'a, G: Group + Finite, X: Element> Action<'a, G, X> {
  /// The orbit of `x`, in order of first appearance over the group's
  /// enumeration.
  pub fn orbit(&self, x: &X) -> Vec<X> {
    self
      .group
      .for_each()
      .map(|g| self.act(&g, x))
      .unique()
      .collect()
  }

  /// The bijection between the left cosets of `stabilizer(x)` and the orbit
  /// of `x`, sending `gS` to `act(g, x)`.
  pub fn orbit_stabilizer(&self, x: &X) -> OrbitStabilizer<'a, G, X> {
    let stabilizer = self.stabilizer(x).enumerate();
    let representatives = stabilizer.cosets().transversal().to_vec();
    let points: Vec<X> = representatives.iter().map(|g| self.act(g, x)).collect();
    let index = points
      .iter()
      .cloned()
      .enumerate()
      .map(|(i, y)| (y, i))
      .collect();
    OrbitStabilizer {
      stabilizer,
      representatives,
      points,
      index,
    }
  }

  /// Partitions `points` into orbits. Rejected with an `ActionClosure`
  /// violation if some point is sent outside of `points`.
  pub fn decompose(&self, points: &[X]) -> AlgebraResult<OrbitDecomposition<X>> {
    let points: Vec<X> = points.iter().unique().cloned().collect();
    let index: HashMap<&X, usize> = points.iter().enumerate().map(|(i, x)| (x, i)).collect();

    let mut uf = UnionFind::new(points.len());
    for (i, x) in points.iter().enumerate() {
      for g in self.group.for_each() {
        let y = self.act(&g, x);
        match index.get(&y) {
          Some(&j) => {
            uf.union(i, j);
          }
          None => return Err(laws::violation(Law::ActionClosure, (&g, x))),
        }
      }
    }

    let orbits: Vec<Vec<X>> = uf
      .sets()
      .into_iter()
      .map(|set| set.into_iter().map(|i| points[i].clone()).collect())
      .collect();
    debug!(
      points = points.len(),
      orbits = orbits.len(),
      "orbit decomposition"
    );
    Ok(OrbitDecomposition::new(orbits))
  }

  /// The morphism sending `g` to the permutation it induces on `points`,
  /// which must be distinct and closed under the action.
  pub fn permutation_representation<'s>(
    &self,
    sym: &'s Symmetric,
    points: &[X],
  ) -> AlgebraResult<Morphism<'s, G, Symmetric>>
  where
    'a: 's,
  {
    debug_assert!(points.iter().all_unique());
    if sym.degree() != points.len() {
      return Err(AlgebraError::DegreeMismatch {
        expected: points.len(),
        actual: sym.degree(),
      });
    }

    let index: HashMap<X, usize> = points
      .iter()
      .cloned()
      .enumerate()
      .map(|(i, x)| (x, i))
      .collect();
    for g in self.group.for_each() {
      if let Some(x) = points.iter().find(|x| !index.contains_key(&self.act(&g, x))) {
        return Err(laws::violation(Law::ActionClosure, (&g, x)));
      }
    }

    let act = self.act.clone();
    let points = points.to_vec();
    Ok(Morphism::new_unchecked(
      self.group,
      sym,
      move |g: &G::Elem| {
        Permutation::from_images_unchecked(points.iter().map(|x| index[&act(g, x)]).collect())
      },
    ))
  }
}

/// Cayley's theorem: the injective morphism from a finite group into the
/// permutations of its own elements, induced by left translation.
pub fn cayley_embedding<'s, G: Group + Finite>(
  group: &'s G,
  sym: &'s Symmetric,
) -> AlgebraResult<Morphism<'s, G, Symmetric>> {
  Action::left_translation(group).permutation_representation(sym, &group.elements())
}

/// The correspondence `G / stabilizer(x) ≃ orbit(x)`.
pub struct OrbitStabilizer<'a, G: Group, X> {
  stabilizer: Subgroup<'a, G>,
  representatives: Vec<G::Elem>,
  points: Vec<X>,
  index: HashMap<X, usize>,
}

impl<'a, G: Group, X: Element> OrbitStabilizer<'a, G, X> {
  /// The size of the orbit, equal to the number of cosets.
  pub fn len(&self) -> usize {
    self.points.len()
  }

  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }

  pub fn stabilizer(&self) -> &Subgroup<'a, G> {
    &self.stabilizer
  }

  /// One coset representative per orbit point, aligned with [`Self::points`].
  pub fn representatives(&self) -> &[G::Elem] {
    &self.representatives
  }

  pub fn points(&self) -> &[X] {
    &self.points
  }

  /// The point `act(g, x)` of the coset `gS`.
  pub fn to_point(&self, coset: &Coset<G::Elem>) -> X {
    let parent = self.stabilizer.parent();
    let g = coset.representative();
    match self
      .representatives
      .iter()
      .position(|t| self.stabilizer.contains(&parent.left_quotient(t, g)))
    {
      Some(idx) => self.points[idx].clone(),
      None => unreachable!("coset of {g:?} missing from the transversal"),
    }
  }

  /// The coset of elements sending `x` to `y`, if `y` is in the orbit.
  pub fn to_coset(&self, y: &X) -> Option<Coset<G::Elem>> {
    self
      .index
      .get(y)
      .map(|&idx| Coset::new(self.representatives[idx].clone()))
  }
}

/// A partition of a set of points into orbits, each with a deterministic
/// representative: its first point in the order the points were given.
#[derive(Clone, Debug)]
pub struct OrbitDecomposition<X> {
  orbits: Vec<Vec<X>>,
  location: HashMap<X, (usize, usize)>,
}

impl<X: Element> OrbitDecomposition<X> {
  fn new(orbits: Vec<Vec<X>>) -> Self {
    let location = orbits
      .iter()
      .enumerate()
      .flat_map(|(o, orbit)| {
        orbit
          .iter()
          .enumerate()
          .map(move |(p, x)| (x.clone(), (o, p)))
      })
      .collect();
    Self { orbits, location }
  }

  /// The number of orbits.
  pub fn len(&self) -> usize {
    self.orbits.len()
  }

  pub fn is_empty(&self) -> bool {
    self.orbits.is_empty()
  }

  pub fn orbits(&self) -> &[Vec<X>] {
    &self.orbits
  }

  pub fn orbit(&self, orbit: usize) -> &[X] {
    &self.orbits[orbit]
  }

  pub fn representative(&self, orbit: usize) -> &X {
    &self.orbits[orbit][0]
  }

  /// The orbit of `x` and its position within that orbit.
  pub fn split(&self, x: &X) -> Option<(usize, usize)> {
    self.location.get(x).copied()
  }

  /// Inverse of [`Self::split`].
  pub fn assemble(&self, orbit: usize, position: usize) -> Option<&X> {
    self.orbits.get(orbit)?.get(position)
  }
}
