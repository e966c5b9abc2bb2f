use tracing::debug;

use crate::{
  check_opts::CheckOptions,
  error::AlgebraResult,
  free_group::{FreeGroup, Word},
  group::Group,
  monoid::Monoid,
  morphism::Morphism,
  quotient::{Coset, Quotient},
  semigroup::{Element, Semigroup},
  subgroup::NormalSubgroup,
};

/// The group `⟨A | R⟩`: the free group on `A` modulo the normal closure of the
/// relators `R`.
///
/// Equality of elements is decided by membership of `a⁻¹ • b` in the normal
/// closure, which is searched lazily by multiplying by relators and
/// conjugating by generators. The search is bounded by `search_limit`, so
/// equal elements whose witness lies beyond the limit compare unequal.
pub struct PresentedGroup<'a, A: Element> {
  free: &'a FreeGroup<A>,
  relators: Vec<Word<A>>,
  quotient: Quotient<'a, FreeGroup<A>>,
}

impl<'a, A: Element> PresentedGroup<'a, A> {
  pub fn new(free: &'a FreeGroup<A>, relators: Vec<Word<A>>, opts: &CheckOptions) -> Self {
    let generators: Vec<Word<A>> = free.generators().iter().map(|a| free.of(a.clone())).collect();
    debug!(
      generators = generators.len(),
      relators = relators.len(),
      search_limit = opts.search_limit,
      "building presentation"
    );
    let normal = NormalSubgroup::normal_closure(free, relators.clone(), &generators, opts);
    Self {
      free,
      relators,
      quotient: Quotient::new(normal),
    }
  }

  pub fn free(&self) -> &'a FreeGroup<A> {
    self.free
  }

  pub fn relators(&self) -> &[Word<A>] {
    &self.relators
  }

  pub fn quotient(&self) -> &Quotient<'a, FreeGroup<A>> {
    &self.quotient
  }

  /// The image of the generator `a`.
  pub fn of(&self, a: A) -> Coset<Word<A>> {
    self.quotient.coset(&self.free.of(a))
  }

  /// The canonical surjection from the free group.
  pub fn project(&self) -> Morphism<'_, FreeGroup<A>, Self> {
    Morphism::new_unchecked(self.free, self, move |w: &Word<A>| {
      self.quotient.coset(w)
    })
  }

  /// The morphism into `target` sending each generator `a` to `f(a)`.
  /// Rejected with `LiftObligationUnmet`, naming the relator, unless every
  /// relator maps to the identity.
  pub fn lift<'q, G: Group>(
    &'q self,
    target: &'q G,
    f: impl Fn(&A) -> G::Elem + Send + Sync + 'q,
  ) -> AlgebraResult<Morphism<'q, Self, G>> {
    let phi = self.free.lift(target, f);
    let lifted = self.quotient.lift(&phi)?;
    Ok(Morphism::new_unchecked(self, target, move |c: &Coset<Word<A>>| {
      lifted.apply(c)
    }))
  }
}

impl<A: Element> Semigroup for PresentedGroup<'_, A> {
  type Elem = Coset<Word<A>>;

  fn op(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem {
    self.quotient.op(a, b)
  }

  fn equal(&self, a: &Self::Elem, b: &Self::Elem) -> bool {
    self.quotient.equal(a, b)
  }

  fn normalize(&self, a: Self::Elem) -> Self::Elem {
    self.quotient.normalize(a)
  }
}

impl<A: Element> Monoid for PresentedGroup<'_, A> {
  fn identity(&self) -> Self::Elem {
    self.quotient.identity()
  }
}

impl<A: Element> Group for PresentedGroup<'_, A> {
  fn inverse(&self, a: &Self::Elem) -> Self::Elem {
    self.quotient.inverse(a)
  }
}

#[cfg(test)]
mod tests {
  use googletest::{expect_false, expect_true, gtest};

  use super::*;
  use crate::{
    error::AlgebraError,
    group::{Cyclic, Dihedral, Symmetry},
    free_group::Letter,
  };

  #[gtest]
  fn test_cyclic_presentation() {
    let free = FreeGroup::new(vec!['a']);
    let a = free.of('a');
    let relator = free.pow(&a, 4);
    // Deciding that x² is not the identity exhausts the search.
    let opts = CheckOptions::default().with_search_limit(256);
    let g = PresentedGroup::new(&free, vec![relator], &opts);

    let x = g.of('a');
    expect_true!(g.is_identity(&g.pow(&x, 4)));
    expect_true!(g.is_identity(&g.pow(&x, 8)));
    expect_false!(g.is_identity(&g.pow(&x, 2)));
    expect_true!(g.equal(&g.pow(&x, 3), &g.inverse(&x)));
  }

  #[gtest]
  fn test_project_is_surjective_on_generators() {
    let free = FreeGroup::new(vec!['a']);
    let g = PresentedGroup::new(&free, vec![free.pow(&free.of('a'), 2)], &CheckOptions::default());
    let project = g.project();
    expect_true!(g.equal(&project.apply(&free.of('a')), &g.of('a')));
    expect_true!(g.is_identity(&project.apply(&free.pow(&free.of('a'), 2))));
  }

  #[gtest]
  fn test_dihedral_presentation_lifts() {
    // ⟨r, s | r⁴, s², s r s r⟩ maps onto the symmetries of a square.
    let free = FreeGroup::new(vec!['r', 's']);
    let (r, s) = (free.of('r'), free.of('s'));
    let relators = vec![
      free.pow(&r, 4),
      free.pow(&s, 2),
      free.product([&s, &r, &s, &r]),
    ];
    let g = PresentedGroup::new(&free, relators, &CheckOptions::default());
    let d4 = Dihedral::<4>;
    let phi = g.lift(&d4, |a: &char| {
      if *a == 'r' {
        Symmetry::Rot(1)
      } else {
        Symmetry::Rfl(0)
      }
    });
    expect_true!(phi.is_ok());
    if let Ok(phi) = phi {
      expect_true!(phi.apply(&g.of('r')) == Symmetry::Rot(1));
    }
    expect_true!(g.equal(&g.op(&g.of('s'), &g.of('s')), &g.identity()));
  }

  #[gtest]
  fn test_lift_reports_relator() {
    let free = FreeGroup::new(vec!['a']);
    let g = PresentedGroup::new(&free, vec![free.pow(&free.of('a'), 3)], &CheckOptions::default());
    let c4 = Cyclic::<4>;
    let res = g.lift(&c4, |_: &char| 1);
    expect_true!(matches!(
      res,
      Err(AlgebraError::LiftObligationUnmet { witness }) if witness.contains("'a'")
    ));
  }

  #[gtest]
  fn test_far_conjugates_of_relators_are_trivial() {
    // Conjugates of the relator a² by words of length three and four.
    let free = FreeGroup::new(vec!['a', 'b']);
    let (a, b) = (free.of('a'), free.of('b'));
    let opts = CheckOptions::default().with_search_limit(200_000);
    let g = PresentedGroup::new(&free, vec![free.pow(&a, 2)], &opts);

    let b3 = free.pow(&b, 3);
    let far = free.product([&b3, &free.pow(&a, 2), &free.inverse(&b3)]);
    expect_true!(g.is_identity(&g.project().apply(&far)));

    let w = free.word([
      Letter::new('b', false),
      Letter::new('b', false),
      Letter::new('a', true),
      Letter::new('b', false),
    ]);
    let deeper = free.conjugate(&w, &free.pow(&a, 2));
    expect_true!(g.is_identity(&g.project().apply(&deeper)));
  }
}
