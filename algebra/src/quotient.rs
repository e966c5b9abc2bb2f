//! Cosets and quotient groups.
//!
//! A coset is carried by any of its representatives. Two representatives
//! denote the same left coset of `S` exactly when `a⁻¹ • b ∈ S`, which is what
//! [`Quotient`] uses as its semantic equality. Finite parents can additionally
//! pick a canonical representative per coset.

use std::{
  collections::HashMap,
  ptr,
  sync::{Arc, OnceLock},
};

use tracing::debug;

use crate::{
  error::{AlgebraError, AlgebraResult},
  finite::Finite,
  group::{CommGroup, Group},
  monoid::Monoid,
  morphism::{Isomorphism, Morphism},
  ordinal::Ordinal,
  semigroup::Semigroup,
  subgroup::{Member, NormalSubgroup, Restricted, Subgroup},
};

type NormalForm<'a, T> = Arc<dyn Fn(&T) -> T + Send + Sync + 'a>;

/// A left coset `gS`, carried by the representative `g`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Coset<T>(T);

impl<T> Coset<T> {
  pub(crate) fn new(representative: T) -> Self {
    Self(representative)
  }

  pub fn representative(&self) -> &T {
    &self.0
  }

  pub fn into_representative(self) -> T {
    self.0
  }
}

/// One representative per left coset of `subgroup`, each the first of its
/// coset in the parent's enumeration order.
fn transversal<G: Group + Finite>(subgroup: &Subgroup<'_, G>) -> Vec<G::Elem> {
  let parent = subgroup.parent();
  let mut reps: Vec<G::Elem> = Vec::new();
  for g in parent.for_each() {
    if !reps
      .iter()
      .any(|t| subgroup.contains(&parent.left_quotient(t, &g)))
    {
      reps.push(g);
    }
  }
  reps
}

/// The index into `reps` of the coset containing `g`.
fn coset_index<G: Group>(subgroup: &Subgroup<'_, G>, reps: &[G::Elem], g: &G::Elem) -> usize {
  let parent = subgroup.parent();
  match reps
    .iter()
    .position(|t| subgroup.contains(&parent.left_quotient(t, g)))
  {
    Some(idx) => idx,
    None => unreachable!("transversal misses the coset of {g:?}"),
  }
}

impl<'a, G: Group> Subgroup<'a, G> {
  /// The left cosets of this subgroup, which need not be normal.
  pub fn cosets(&self) -> CosetSpace<'_, 'a, G> {
    CosetSpace {
      subgroup: self,
      transversal: OnceLock::new(),
    }
  }
}

/// The set of left cosets `gS` of a subgroup. Without normality there is no
/// group structure, only the partition of the parent.
pub struct CosetSpace<'s, 'a, G: Group> {
  subgroup: &'s Subgroup<'a, G>,
  transversal: OnceLock<Vec<G::Elem>>,
}

impl<'s, 'a, G: Group> CosetSpace<'s, 'a, G> {
  pub fn subgroup(&self) -> &'s Subgroup<'a, G> {
    self.subgroup
  }

  pub fn coset(&self, g: &G::Elem) -> Coset<G::Elem> {
    Coset(g.clone())
  }

  pub fn same_coset(&self, a: &Coset<G::Elem>, b: &Coset<G::Elem>) -> bool {
    self
      .subgroup
      .contains(&self.subgroup.parent().left_quotient(&a.0, &b.0))
  }
}

impl<G: Group + Finite> CosetSpace<'_, '_, G> {
  /// One representative per coset, built on first use.
  pub fn transversal(&self) -> &[G::Elem] {
    self.transversal.get_or_init(|| transversal(self.subgroup))
  }

  pub fn count(&self) -> usize {
    self.transversal().len()
  }

  /// The coset of `g`, carried by its transversal representative.
  pub fn representative_of(&self, g: &G::Elem) -> Coset<G::Elem> {
    Coset(self.transversal()[self.index_of(g)].clone())
  }

  /// The position of `g`'s coset in the transversal.
  pub fn index_of(&self, g: &G::Elem) -> usize {
    coset_index(self.subgroup, self.transversal(), g)
  }
}

/// The quotient `G / N` of a group by a normal subgroup.
pub struct Quotient<'a, G: Group> {
  normal: NormalSubgroup<'a, G>,
  transversal: OnceLock<Vec<G::Elem>>,
  normal_form: Option<NormalForm<'a, G::Elem>>,
}

impl<'a, G: Group> Quotient<'a, G> {
  pub fn new(normal: NormalSubgroup<'a, G>) -> Self {
    debug!(
      known = normal.known().elements().len(),
      "quotient built"
    );
    Self {
      normal,
      transversal: OnceLock::new(),
      normal_form: None,
    }
  }

  /// The quotient by `subgroup`, rejected with `NormalityRequired` if a
  /// conjugate by one of `witnesses` escapes it.
  pub fn try_new(subgroup: Subgroup<'a, G>, witnesses: &[G::Elem]) -> AlgebraResult<Self> {
    Ok(Self::new(subgroup.into_normal(witnesses)?))
  }

  /// Installs a normal form for representatives. `f` must send
  /// representatives of the same coset to the same value.
  pub fn with_normal_form(self, f: impl Fn(&G::Elem) -> G::Elem + Send + Sync + 'a) -> Self {
    Self {
      normal_form: Some(Arc::new(f)),
      ..self
    }
  }

  pub fn parent(&self) -> &'a G {
    self.normal.parent()
  }

  /// The normal subgroup quotiented by, which is the kernel of `project`.
  pub fn kernel(&self) -> &NormalSubgroup<'a, G> {
    &self.normal
  }

  pub fn coset(&self, g: &G::Elem) -> Coset<G::Elem> {
    self.normalize(Coset(g.clone()))
  }

  /// The canonical surjection `g ↦ gN`.
  pub fn project(&self) -> Morphism<'_, G, Self> {
    Morphism::new_unchecked(self.parent(), self, move |g: &G::Elem| self.coset(g))
  }

  /// The unique morphism `ψ` out of the quotient with `ψ ∘ project = phi`.
  ///
  /// The normal subgroup must be known by generators or normal generators,
  /// since a morphism kills it exactly when it kills those. Rejected with
  /// `GeneratorsUnknown` otherwise: the full subgroup, kernels, preimages and
  /// intersections only know a sample. Over a finite parent, [`Self::canonical`]
  /// enumerates the normal subgroup first and makes the check exact.
  ///
  /// Rejected with `LiftObligationUnmet` if `phi` sends a generator to
  /// something other than the identity.
  pub fn lift<'q, M: Group>(&'q self, phi: &Morphism<'q, G, M>) -> AlgebraResult<Morphism<'q, Self, M>> {
    debug_assert!(ptr::eq(self.parent(), phi.source()));
    let known = self.normal.known();
    if !known.determines_kernel() {
      debug!("lift rejected, the normal subgroup has no known generators");
      return Err(AlgebraError::GeneratorsUnknown);
    }
    if let Some(x) = known
      .elements()
      .iter()
      .find(|x| !phi.target().is_identity(&phi.apply(x)))
    {
      let err = AlgebraError::lift_obligation_unmet(x);
      debug!(%err, "lift rejected");
      return Err(err);
    }

    let map = phi.map.clone();
    Ok(Morphism::new_unchecked(
      self,
      phi.target(),
      move |c: &Coset<G::Elem>| map(&c.0),
    ))
  }

  /// The map `G/N → H/N'` induced by `phi: G → H`, which is
  /// `lift(target.project() ∘ phi)`.
  pub fn induced_map<'q, 'b, H: Group>(
    &'q self,
    target: &'q Quotient<'b, H>,
    phi: &Morphism<'q, G, H>,
  ) -> AlgebraResult<Morphism<'q, Self, Quotient<'b, H>>> {
    self.lift(&target.project().compose(phi))
  }

  /// The distinct cosets among `elements`, each carried by its first
  /// occurrence.
  pub fn cosets_among(&self, elements: &[G::Elem]) -> Vec<Coset<G::Elem>> {
    let mut cosets: Vec<Coset<G::Elem>> = Vec::new();
    for g in elements {
      let c = self.coset(g);
      if !cosets.iter().any(|d| self.equal(d, &c)) {
        cosets.push(c);
      }
    }
    cosets
  }
}

impl<G: Group + Finite> Quotient<'_, G> {
  /// Enumerates the normal subgroup and installs the transversal as the normal
  /// form, making `equal` coincide with `==` and `lift` exact whatever the
  /// normal subgroup was built from.
  pub fn canonical(self) -> Self {
    let parent = self.parent();
    let normal = self.normal.enumerate();
    let reps = transversal(&normal);
    let canon: HashMap<G::Elem, G::Elem> = parent
      .for_each()
      .map(|g| {
        let rep = reps[coset_index(&normal, &reps, &g)].clone();
        (g, rep)
      })
      .collect();
    Self {
      normal,
      transversal: OnceLock::from(reps),
      normal_form: Some(Arc::new(move |g: &G::Elem| {
        canon.get(g).cloned().unwrap_or_else(|| g.clone())
      })),
    }
  }

  fn transversal(&self) -> &[G::Elem] {
    self.transversal.get_or_init(|| transversal(&self.normal))
  }
}

impl<G: Group> Semigroup for Quotient<'_, G> {
  type Elem = Coset<G::Elem>;

  fn op(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem {
    self.normalize(Coset(self.parent().op(&a.0, &b.0)))
  }

  fn equal(&self, a: &Self::Elem, b: &Self::Elem) -> bool {
    self
      .normal
      .contains(&self.parent().left_quotient(&a.0, &b.0))
  }

  fn normalize(&self, a: Self::Elem) -> Self::Elem {
    match &self.normal_form {
      Some(f) => Coset(f(&a.0)),
      None => a,
    }
  }
}

impl<G: Group> Monoid for Quotient<'_, G> {
  fn identity(&self) -> Self::Elem {
    self.normalize(Coset(self.parent().identity()))
  }
}

impl<G: Group> Group for Quotient<'_, G> {
  fn inverse(&self, a: &Self::Elem) -> Self::Elem {
    self.normalize(Coset(self.parent().inverse(&a.0)))
  }
}

impl<G: CommGroup> CommGroup for Quotient<'_, G> {}

impl<G: Group + Finite> Finite for Quotient<'_, G> {
  fn size(&self) -> usize {
    self.transversal().len()
  }

  fn for_each(&self) -> impl Iterator<Item = Self::Elem> + '_ {
    self
      .transversal()
      .iter()
      .map(|t| self.normalize(Coset(t.clone())))
  }
}

impl<G: Group + Finite> Ordinal for Quotient<'_, G> {
  fn ord(&self, a: &Self::Elem) -> usize {
    coset_index(&self.normal, self.transversal(), &a.0)
  }

  fn from_ord(&self, ord: usize) -> Self::Elem {
    self.normalize(Coset(self.transversal()[ord].clone()))
  }
}

/// `G / ker φ ≅ range φ`, for a group morphism `φ`.
pub struct FirstIsomorphism<'a, G: Group, H: Group> {
  quotient: Quotient<'a, G>,
  phi: Morphism<'a, G, H>,
}

/// Factors `phi` through the quotient by its kernel.
pub fn first_isomorphism<'a, G: Group, H: Group>(phi: &Morphism<'a, G, H>) -> FirstIsomorphism<'a, G, H> {
  FirstIsomorphism::new(phi.clone())
}

impl<'a, G: Group, H: Group> FirstIsomorphism<'a, G, H> {
  pub fn new(phi: Morphism<'a, G, H>) -> Self {
    Self {
      quotient: Quotient::new(phi.kernel()),
      phi,
    }
  }

  pub fn quotient(&self) -> &Quotient<'a, G> {
    &self.quotient
  }

  pub fn phi(&self) -> &Morphism<'a, G, H> {
    &self.phi
  }

  /// The injective map `G / ker φ → H` through which `φ` factors. The kernel
  /// obligation holds by construction.
  pub fn induced(&self) -> Morphism<'_, Quotient<'a, G>, H> {
    let map = self.phi.map.clone();
    Morphism::new_unchecked(
      &self.quotient,
      self.phi.target(),
      move |c: &Coset<G::Elem>| map(&c.0),
    )
  }
}

impl<'a, G: Group + Finite, H: Group> FirstIsomorphism<'a, G, H> {
  pub fn range(&self) -> Subgroup<'a, H> {
    self.phi.range()
  }

  /// The bijection between the quotient and `image`, which must be the range
  /// of `φ` viewed as a group. Rejected with a `RoundTrip` violation if it is
  /// not.
  pub fn isomorphism<'s, 'r>(
    &'s self,
    image: &'s Restricted<'r, 'a, H>,
  ) -> AlgebraResult<Isomorphism<'s, Quotient<'a, G>, Restricted<'r, 'a, H>>>
  where
    H: Finite,
  {
    let (source, target) = (self.phi.source(), self.phi.target());
    let phi = self.phi.map.clone();
    let forward = Morphism::new_unchecked(&self.quotient, image, move |c: &Coset<G::Elem>| {
      Member::new(phi(&c.0))
    });

    let mut preimages: HashMap<H::Elem, G::Elem> = HashMap::new();
    for g in source.for_each() {
      preimages
        .entry(target.normalize(self.phi.apply(&g)))
        .or_insert(g);
    }
    let quotient = &self.quotient;
    let backward = Morphism::new_unchecked(image, &self.quotient, move |m: &Member<H::Elem>| {
      match preimages.get(&target.normalize(m.get().clone())) {
        Some(g) => quotient.coset(g),
        None => quotient.identity(),
      }
    });

    Isomorphism::new(
      forward,
      backward,
      &self.quotient.elements(),
      &image.elements(),
      &Default::default(),
    )
  }
}
