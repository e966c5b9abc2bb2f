//! Validation of algebraic laws over finite sets of witnesses.
//!
//! Laws quantify over every element of a carrier, which is undecidable for
//! infinite carriers. Checks here run over the witnesses a caller supplies:
//! every instance is checked when there are at most
//! [`CheckOptions::max_checks`] of them, otherwise a seeded sample of that
//! size is. Passing every element of a finite carrier makes a check exact.

use std::fmt::Debug;

use itertools::iproduct;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

use crate::{
  check_opts::CheckOptions,
  error::{AlgebraError, AlgebraResult, Law},
  group::{CommGroup, Group},
  monoid::Monoid,
  semigroup::Semigroup,
};

pub(crate) fn singles(n: usize, opts: &CheckOptions) -> Vec<usize> {
  if n <= opts.max_checks {
    (0..n).collect()
  } else {
    let mut rng = StdRng::seed_from_u64(opts.seed);
    (0..opts.max_checks)
      .map(|_| rng.random_range(0..n))
      .collect()
  }
}

pub(crate) fn pairs(n: usize, opts: &CheckOptions) -> Vec<(usize, usize)> {
  if n.saturating_mul(n) <= opts.max_checks {
    iproduct!(0..n, 0..n).collect()
  } else {
    let mut rng = StdRng::seed_from_u64(opts.seed);
    (0..opts.max_checks)
      .map(|_| (rng.random_range(0..n), rng.random_range(0..n)))
      .collect()
  }
}

/// Index triples into three witness lists of lengths `a`, `b` and `c`.
pub(crate) fn triples(a: usize, b: usize, c: usize, opts: &CheckOptions) -> Vec<(usize, usize, usize)> {
  if a.saturating_mul(b).saturating_mul(c) <= opts.max_checks {
    iproduct!(0..a, 0..b, 0..c).collect()
  } else {
    let mut rng = StdRng::seed_from_u64(opts.seed);
    (0..opts.max_checks)
      .map(|_| {
        (
          rng.random_range(0..a),
          rng.random_range(0..b),
          rng.random_range(0..c),
        )
      })
      .collect()
  }
}

/// Returns the first instance flagged by `violates`, in instance order.
pub(crate) fn find_violation<I, F>(instances: &[I], opts: &CheckOptions, violates: F) -> Option<I>
where
  I: Copy + Send + Sync,
  F: Fn(I) -> bool + Sync,
{
  if opts.parallel {
    instances.par_iter().copied().find_first(|&i| violates(i))
  } else {
    instances.iter().copied().find(|&i| violates(i))
  }
}

/// Builds the error for a failed law, logging it.
pub(crate) fn violation(law: Law, witness: impl Debug) -> AlgebraError {
  let err = AlgebraError::law_violation(law, witness);
  debug!(%err, "law check failed");
  err
}

/// Checks `(x • y) • z = x • (y • z)`.
pub fn check_semigroup<S: Semigroup>(s: &S, witnesses: &[S::Elem], opts: &CheckOptions) -> AlgebraResult<()> {
  let n = witnesses.len();
  let instances = triples(n, n, n, opts);
  let bad = find_violation(&instances, opts, |(i, j, k)| {
    let (x, y, z) = (&witnesses[i], &witnesses[j], &witnesses[k]);
    !s.equal(&s.op(&s.op(x, y), z), &s.op(x, &s.op(y, z)))
  });
  match bad {
    Some((i, j, k)) => Err(violation(
      Law::Associativity,
      (&witnesses[i], &witnesses[j], &witnesses[k]),
    )),
    None => Ok(()),
  }
}

/// Checks associativity and `e • x = x • e = x`.
pub fn check_monoid<M: Monoid>(m: &M, witnesses: &[M::Elem], opts: &CheckOptions) -> AlgebraResult<()> {
  check_semigroup(m, witnesses, opts)?;

  let e = m.identity();
  let left = |x: &M::Elem| m.equal(&m.op(&e, x), x);
  let right = |x: &M::Elem| m.equal(&m.op(x, &e), x);
  let instances = singles(witnesses.len(), opts);
  match find_violation(&instances, opts, |i| {
    !left(&witnesses[i]) || !right(&witnesses[i])
  }) {
    Some(i) if !left(&witnesses[i]) => Err(violation(Law::LeftIdentity, &witnesses[i])),
    Some(i) => Err(violation(Law::RightIdentity, &witnesses[i])),
    None => Ok(()),
  }
}

/// Checks the monoid laws and `x⁻¹ • x = x • x⁻¹ = e`.
pub fn check_group<G: Group>(g: &G, witnesses: &[G::Elem], opts: &CheckOptions) -> AlgebraResult<()> {
  check_monoid(g, witnesses, opts)?;

  let left = |x: &G::Elem| g.is_identity(&g.op(&g.inverse(x), x));
  let right = |x: &G::Elem| g.is_identity(&g.op(x, &g.inverse(x)));
  let instances = singles(witnesses.len(), opts);
  match find_violation(&instances, opts, |i| {
    !left(&witnesses[i]) || !right(&witnesses[i])
  }) {
    Some(i) if !left(&witnesses[i]) => Err(violation(Law::LeftInverse, &witnesses[i])),
    Some(i) => Err(violation(Law::RightInverse, &witnesses[i])),
    None => Ok(()),
  }
}

/// Checks the group laws and `x • y = y • x`.
pub fn check_commutative<G: CommGroup>(g: &G, witnesses: &[G::Elem], opts: &CheckOptions) -> AlgebraResult<()> {
  check_group(g, witnesses, opts)?;

  let instances = pairs(witnesses.len(), opts);
  let bad = find_violation(&instances, opts, |(i, j)| {
    let (x, y) = (&witnesses[i], &witnesses[j]);
    !g.equal(&g.op(x, y), &g.op(y, x))
  });
  match bad {
    Some((i, j)) => Err(violation(Law::Commutativity, (&witnesses[i], &witnesses[j]))),
    None => Ok(()),
  }
}

#[cfg(test)]
mod tests {
  use googletest::{expect_that, expect_true, gtest, prelude::*};
  use rstest::rstest;
  use rstest_reuse::{apply, template};

  use super::*;
  use crate::{
    direct_product,
    finite::Finite,
    group::{Cyclic, Dihedral, FnGroup, Integers, Symmetric, Trivial},
  };

  #[template]
  #[rstest]
  fn finite_groups(
    #[values(
      Trivial,
      Cyclic::<1>,
      Cyclic::<6>,
      Dihedral::<1>,
      Dihedral::<5>,
      Symmetric::new(4),
      direct_product!(Cyclic::<2>, Dihedral::<3>)
    )]
    group: impl Group + Finite,
  ) {
  }

  #[apply(finite_groups)]
  #[gtest]
  fn test_group_laws(group: impl Group + Finite) {
    let opts = CheckOptions::default();
    expect_true!(check_group(&group, &group.elements(), &opts).is_ok());
  }

  #[apply(finite_groups)]
  #[gtest]
  fn test_group_laws_sequential(group: impl Group + Finite) {
    let opts = CheckOptions::default().with_parallel(false);
    expect_true!(check_group(&group, &group.elements(), &opts).is_ok());
  }

  #[gtest]
  fn test_commutative() {
    let opts = CheckOptions::default();
    let k4 = direct_product!(Cyclic::<2>, Cyclic::<2>);
    expect_true!(check_commutative(&k4, &k4.elements(), &opts).is_ok());
    expect_true!(check_commutative(&Cyclic::<9>, &Cyclic::<9>.elements(), &opts).is_ok());
  }

  #[gtest]
  fn test_non_commutative_detected() {
    // Wrap S3 as a claimed commutative group to exercise the check.
    let s3 = Symmetric::new(3);
    let group = FnGroup::new(
      move |a, b| s3.op(a, b),
      s3.identity(),
      move |a| s3.inverse(a),
    );
    struct Claimed<G>(G);
    impl<G: Group> Semigroup for Claimed<G> {
      type Elem = G::Elem;
      fn op(&self, a: &G::Elem, b: &G::Elem) -> G::Elem {
        self.0.op(a, b)
      }
    }
    impl<G: Group> Monoid for Claimed<G> {
      fn identity(&self) -> G::Elem {
        self.0.identity()
      }
    }
    impl<G: Group> Group for Claimed<G> {
      fn inverse(&self, a: &G::Elem) -> G::Elem {
        self.0.inverse(a)
      }
    }
    impl<G: Group> CommGroup for Claimed<G> {}

    let res = check_commutative(&Claimed(group), &s3.elements(), &CheckOptions::default());
    expect_true!(matches!(
      res,
      Err(AlgebraError::LawViolation {
        law: Law::Commutativity,
        ..
      })
    ));
  }

  #[gtest]
  fn test_sampling_is_bounded_and_deterministic() {
    let opts = CheckOptions::default().with_max_checks(100);
    let first = triples(50, 50, 50, &opts);
    let second = triples(50, 50, 50, &opts);
    expect_that!(first.len(), eq(100));
    expect_true!(first == second);
    expect_that!(pairs(5, &opts).len(), eq(25));
    expect_that!(singles(1000, &opts).len(), eq(100));
  }

  #[gtest]
  fn test_integers_sampled() {
    let witnesses: Vec<i64> = (-40..40).collect();
    let opts = CheckOptions::default().with_max_checks(512);
    expect_true!(check_commutative(&Integers, &witnesses, &opts).is_ok());
  }
}
