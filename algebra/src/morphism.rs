use std::{collections::HashSet, sync::Arc};

use itertools::Itertools;

use crate::{
  check_opts::CheckOptions,
  error::{AlgebraResult, Law},
  finite::Finite,
  group::Group,
  laws,
  monoid::Monoid,
  semigroup::Semigroup,
  subgroup::{Known, NormalSubgroup, Subgroup},
};

pub(crate) type MapFn<'a, A, B> = Arc<dyn Fn(&A) -> B + Send + Sync + 'a>;

/// A structure-preserving map between two descriptors, borrowing both.
pub struct Morphism<'a, G: Semigroup, H: Semigroup> {
  source: &'a G,
  target: &'a H,
  pub(crate) map: MapFn<'a, G::Elem, H::Elem>,
}

impl<G: Semigroup, H: Semigroup> Clone for Morphism<'_, G, H> {
  fn clone(&self) -> Self {
    Self {
      source: self.source,
      target: self.target,
      map: self.map.clone(),
    }
  }
}

impl<'a, G: Semigroup, H: Semigroup> Morphism<'a, G, H> {
  /// Bundles `f` without checking that it preserves the operation.
  pub fn new_unchecked(
    source: &'a G,
    target: &'a H,
    f: impl Fn(&G::Elem) -> H::Elem + Send + Sync + 'a,
  ) -> Self {
    Self {
      source,
      target,
      map: Arc::new(f),
    }
  }

  /// Bundles `f`, rejecting it with a `LawViolation` if
  /// `f(x • y) = f(x) • f(y)` fails on a pair of witnesses.
  pub fn new(
    source: &'a G,
    target: &'a H,
    f: impl Fn(&G::Elem) -> H::Elem + Send + Sync + 'a,
    witnesses: &[G::Elem],
    opts: &CheckOptions,
  ) -> AlgebraResult<Self> {
    let morphism = Self::new_unchecked(source, target, f);
    morphism.check_homomorphism(witnesses, opts)?;
    Ok(morphism)
  }

  fn check_homomorphism(&self, witnesses: &[G::Elem], opts: &CheckOptions) -> AlgebraResult<()> {
    let instances = laws::pairs(witnesses.len(), opts);
    let bad = laws::find_violation(&instances, opts, |(i, j)| {
      let (x, y) = (&witnesses[i], &witnesses[j]);
      !self.target.equal(
        &self.apply(&self.source.op(x, y)),
        &self.target.op(&self.apply(x), &self.apply(y)),
      )
    });
    match bad {
      Some((i, j)) => Err(laws::violation(
        Law::Homomorphism,
        (&witnesses[i], &witnesses[j]),
      )),
      None => Ok(()),
    }
  }

  pub fn source(&self) -> &'a G {
    self.source
  }

  pub fn target(&self) -> &'a H {
    self.target
  }

  pub fn apply(&self, x: &G::Elem) -> H::Elem {
    (self.map)(x)
  }

  /// `self ∘ inner`: applies `inner`, then `self`.
  pub fn compose<F: Semigroup>(&self, inner: &Morphism<'a, F, G>) -> Morphism<'a, F, H> {
    let outer = self.map.clone();
    let first = inner.map.clone();
    Morphism::new_unchecked(inner.source, self.target, move |x: &F::Elem| {
      outer(&first(x))
    })
  }

  /// Whether both maps send each witness to equal elements of the target.
  pub fn agrees_with(&self, other: &Self, witnesses: &[G::Elem]) -> bool {
    witnesses
      .iter()
      .all(|x| self.target.equal(&self.apply(x), &other.apply(x)))
  }
}

impl<'a, G: Semigroup> Morphism<'a, G, G> {
  pub fn identity(g: &'a G) -> Self {
    Self::new_unchecked(g, g, |x: &G::Elem| x.clone())
  }
}

impl<'a, G: Monoid, H: Monoid> Morphism<'a, G, H> {
  /// Like [`Morphism::new`], additionally rejecting maps that do not send the
  /// identity to the identity. Group morphisms get this for free.
  pub fn new_monoid(
    source: &'a G,
    target: &'a H,
    f: impl Fn(&G::Elem) -> H::Elem + Send + Sync + 'a,
    witnesses: &[G::Elem],
    opts: &CheckOptions,
  ) -> AlgebraResult<Self> {
    let morphism = Self::new(source, target, f, witnesses, opts)?;
    let e = source.identity();
    if !target.is_identity(&morphism.apply(&e)) {
      return Err(laws::violation(Law::Unital, &e));
    }
    Ok(morphism)
  }
}

impl<'a, G: Group, H: Group> Morphism<'a, G, H> {
  /// The elements sent to the identity.
  pub fn kernel(&self) -> NormalSubgroup<'a, G> {
    NormalSubgroup::bottom(self.target).comap(self)
  }
}

impl<'a, G: Group + Finite, H: Group> Morphism<'a, G, H> {
  /// The image of the source, with the distinct images as its generating set.
  pub fn range(&self) -> Subgroup<'a, H> {
    let target = self.target;
    let images: Vec<H::Elem> = self
      .source
      .for_each()
      .map(|x| target.normalize(self.apply(&x)))
      .unique()
      .collect();
    let lookup: HashSet<H::Elem> = images.iter().cloned().collect();
    Subgroup::from_parts(
      target,
      Arc::new(move |y: &H::Elem| {
        lookup.contains(&target.normalize(y.clone())) || lookup.iter().any(|z| target.equal(z, y))
      }),
      Known::Generators(images.into()),
    )
  }

  /// A group morphism is injective exactly when its kernel is trivial.
  pub fn is_injective(&self) -> bool {
    self
      .source
      .for_each()
      .filter(|x| self.target.is_identity(&self.apply(x)))
      .count()
      == 1
  }
}

/// A pair of mutually inverse morphisms.
pub struct Isomorphism<'a, G: Semigroup, H: Semigroup> {
  forward: Morphism<'a, G, H>,
  backward: Morphism<'a, H, G>,
}

impl<G: Semigroup, H: Semigroup> Clone for Isomorphism<'_, G, H> {
  fn clone(&self) -> Self {
    Self {
      forward: self.forward.clone(),
      backward: self.backward.clone(),
    }
  }
}

impl<'a, G: Semigroup, H: Semigroup> Isomorphism<'a, G, H> {
  pub fn new_unchecked(forward: Morphism<'a, G, H>, backward: Morphism<'a, H, G>) -> Self {
    Self { forward, backward }
  }

  /// Pairs two morphisms, rejecting them with a `RoundTrip` violation unless
  /// `backward ∘ forward` fixes every source witness and `forward ∘ backward`
  /// fixes every target witness.
  pub fn new(
    forward: Morphism<'a, G, H>,
    backward: Morphism<'a, H, G>,
    source_witnesses: &[G::Elem],
    target_witnesses: &[H::Elem],
    opts: &CheckOptions,
  ) -> AlgebraResult<Self> {
    let (source, target) = (forward.source, forward.target);

    let instances = laws::singles(source_witnesses.len(), opts);
    if let Some(i) = laws::find_violation(&instances, opts, |i| {
      let x = &source_witnesses[i];
      !source.equal(&backward.apply(&forward.apply(x)), x)
    }) {
      return Err(laws::violation(Law::RoundTrip, &source_witnesses[i]));
    }

    let instances = laws::singles(target_witnesses.len(), opts);
    if let Some(i) = laws::find_violation(&instances, opts, |i| {
      let y = &target_witnesses[i];
      !target.equal(&forward.apply(&backward.apply(y)), y)
    }) {
      return Err(laws::violation(Law::RoundTrip, &target_witnesses[i]));
    }

    Ok(Self { forward, backward })
  }

  pub fn forward(&self) -> &Morphism<'a, G, H> {
    &self.forward
  }

  pub fn backward(&self) -> &Morphism<'a, H, G> {
    &self.backward
  }

  pub fn symm(&self) -> Isomorphism<'a, H, G> {
    Isomorphism {
      forward: self.backward.clone(),
      backward: self.forward.clone(),
    }
  }
}
