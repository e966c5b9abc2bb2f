use std::collections::HashSet;

use googletest::{expect_that, expect_true, gtest, prelude::*};
use group_toolkit::prelude::*;

fn init_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_max_level(tracing::Level::DEBUG)
    .with_test_writer()
    .try_init();
}

fn cycle(degree: usize, points: &[usize]) -> Permutation {
  let Some(perm) = Permutation::cycle(degree, points) else {
    panic!("invalid cycle {points:?} of degree {degree}");
  };
  perm
}

#[gtest]
fn integers_mod_three() -> Result<()> {
  init_tracing();
  let opts = CheckOptions::default();
  let z = Integers;
  let q = Quotient::new(z.multiples(3).into_normal_commutative());
  let window: Vec<i64> = (-30..=30).collect();

  let classes = q.cosets_among(&window);
  expect_that!(classes.len(), eq(3));
  expect_true!(check_commutative(&q, &classes, &opts).is_ok());

  expect_true!(q.equal(&q.coset(&5), &q.coset(&2)));
  expect_true!(q.equal(&q.coset(&-1), &q.coset(&2)));
  expect_true!(q.is_identity(&q.op(&q.coset(&1), &q.coset(&2))));
  expect_false!(q.is_identity(&q.coset(&4)));

  // The kernel of the projection is exactly 3ℤ.
  let project = q.project();
  for x in &window {
    expect_true!(q.is_identity(&project.apply(x)) == (x % 3 == 0));
  }

  let c3 = Cyclic::<3>;
  let phi = Morphism::new(&z, &c3, |x: &i64| x.rem_euclid(3) as u16, &window, &opts)?;
  let psi = q.lift(&phi)?;
  expect_true!(psi.compose(&project).agrees_with(&phi, &window));
  Ok(())
}

#[gtest]
fn presented_cyclic_group_into_s3() -> Result<()> {
  init_tracing();
  let opts = CheckOptions::default();
  let free = FreeGroup::new(vec!['a']);
  let g = PresentedGroup::new(&free, vec![free.pow(&free.of('a'), 3)], &opts);
  let s3 = Symmetric::new(3);

  let rotation = cycle(3, &[0, 1, 2]);
  let rotation_squared = s3.op(&rotation, &rotation);
  let image = rotation.clone();
  let lifted = g.lift(&s3, move |_: &char| image.clone())?;
  let a = g.of('a');
  expect_true!(lifted.apply(&a) == rotation);
  expect_true!(lifted.apply(&g.pow(&a, 2)) == rotation_squared);
  expect_true!(lifted.apply(&g.inverse(&a)) == s3.inverse(&rotation));
  expect_true!(s3.is_identity(&lifted.apply(&g.pow(&a, 3))));

  let window: Vec<Coset<Word<char>>> = free
    .ball(3)
    .iter()
    .map(|w| g.project().apply(w))
    .collect();
  let images: HashSet<Permutation> = window.iter().map(|x| lifted.apply(x)).collect();
  assert_eq!(
    images,
    HashSet::from([s3.identity(), rotation.clone(), rotation_squared])
  );
  expect_true!(Morphism::new(&g, &s3, move |x: &Coset<Word<char>>| lifted.apply(x), &window, &opts).is_ok());

  let transposition = cycle(3, &[0, 1]);
  let res = g.lift(&s3, move |_: &char| transposition.clone());
  expect_true!(matches!(
    res,
    Err(AlgebraError::LiftObligationUnmet { .. })
  ));
  Ok(())
}

#[gtest]
fn cayley_embedding_of_c3() -> Result<()> {
  init_tracing();
  let opts = CheckOptions::default();
  let c3 = Cyclic::<3>;
  let s3 = Symmetric::new(3);

  let embedding = cayley_embedding(&c3, &s3)?;
  expect_true!(embedding.is_injective());

  let image = embedding.range();
  expect_that!(image.order(), eq(3));
  let rotations = Subgroup::generated_by(&s3, vec![cycle(3, &[0, 1, 2])], &opts);
  expect_true!(image.same_members(&rotations));

  // The embedding is an isomorphism onto its image.
  let first = first_isomorphism(&embedding);
  let image_group = image.as_group();
  let iso = first.isomorphism(&image_group)?;
  for x in c3.for_each() {
    let coset = first.quotient().coset(&x);
    expect_true!(first.quotient().equal(&iso.backward().apply(&iso.forward().apply(&coset)), &coset));
  }

  let s4 = Symmetric::new(4);
  expect_true!(matches!(
    cayley_embedding(&c3, &s4),
    Err(AlgebraError::DegreeMismatch {
      expected: 3,
      actual: 4
    })
  ));
  Ok(())
}

#[gtest]
fn join_of_two_transpositions() -> Result<()> {
  init_tracing();
  let opts = CheckOptions::default();
  let s3 = Symmetric::new(3);
  let (a, b) = (cycle(3, &[0, 1]), cycle(3, &[1, 2]));

  let e = s3.identity();
  let with_identity = |t: Permutation| {
    let e = e.clone();
    move |x: &Permutation| *x == t || *x == e
  };

  let first = Subgroup::finite(&s3, with_identity(a.clone()), &opts)?;
  let second = Subgroup::finite(&s3, with_identity(b.clone()), &opts)?;
  expect_that!(first.order(), eq(2));
  expect_that!(second.order(), eq(2));

  let joined = first.join(&second, &opts)?;
  expect_that!(joined.order(), eq(6));
  expect_true!(joined.same_members(&Subgroup::top(&s3)));

  // The union alone is not a subgroup: a • b escapes it.
  let union = Subgroup::new(
    &s3,
    move |x: &Permutation| *x == a || *x == b || *x == e,
    &s3.elements(),
    &opts,
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
