use std::{
  collections::{HashSet, VecDeque},
  sync::{Mutex, PoisonError},
};

use dashmap::DashMap;
use tracing::{trace, warn};

use crate::monoid::Monoid;

struct Search<T> {
  seen: HashSet<T>,
  frontier: VecDeque<T>,
  truncated: bool,
}

/// Membership in the smallest set containing the identity and closed under
/// right multiplication by each step and conjugation by each conjugator,
/// decided on demand.
///
/// With no conjugators this is the submonoid generated by the steps. With
/// steps `r` and `r⁻¹` and conjugators `a`, `a⁻¹` for generators `a` of a
/// group, it is the normal closure of the `r`: any `x • g r g⁻¹` is reached
/// by conjugating `x` by `g⁻¹`, multiplying by `r` and conjugating back.
///
/// Elements are discovered breadth-first from the identity, and the search
/// only runs as far as the queries so far have required. Search state is shared between queries under a mutex, and
/// every answer is memoized per element. The search stops after discovering
/// `limit` elements; past that point unreached elements are reported as
/// non-members. For finite parents with `limit` at least the size of the
/// generated set, answers are exact.
pub(crate) struct Closure<'a, M: Monoid> {
  parent: &'a M,
  steps: Vec<M::Elem>,
  /// Pairs `(c, c⁻¹)`, applied as `x ↦ c • x • c⁻¹`.
  conjugators: Vec<(M::Elem, M::Elem)>,
  limit: usize,
  search: Mutex<Search<M::Elem>>,
  verdicts: DashMap<M::Elem, bool>,
}

impl<'a, M: Monoid> Closure<'a, M> {
  pub fn new(parent: &'a M, steps: Vec<M::Elem>, limit: usize) -> Self {
    Self::with_conjugators(parent, steps, Vec::new(), limit)
  }

  pub fn with_conjugators(
    parent: &'a M,
    steps: Vec<M::Elem>,
    conjugators: Vec<(M::Elem, M::Elem)>,
    limit: usize,
  ) -> Self {
    let identity = parent.normalize(parent.identity());
    Self {
      parent,
      steps: steps.into_iter().map(|s| parent.normalize(s)).collect(),
      conjugators,
      limit,
      search: Mutex::new(Search {
        seen: HashSet::from([identity.clone()]),
        frontier: VecDeque::from([identity]),
        truncated: false,
      }),
      verdicts: DashMap::new(),
    }
  }

  pub fn contains(&self, x: &M::Elem) -> bool {
    let x = self.parent.normalize(x.clone());
    if let Some(verdict) = self.verdicts.get(&x) {
      return *verdict;
    }

    let found = self.search(&x);
    self.verdicts.insert(x, found);
    found
  }

  fn search(&self, x: &M::Elem) -> bool {
    let mut guard = self.search.lock().unwrap_or_else(PoisonError::into_inner);
    let search = &mut *guard;

    if search.seen.contains(x) || search.seen.iter().any(|y| self.parent.equal(y, x)) {
      return true;
    }

    while search.seen.len() < self.limit {
      let Some(y) = search.frontier.pop_front() else {
        break;
      };

      let products = self.steps.iter().map(|step| self.parent.op(&y, step));
      let conjugates = self
        .conjugators
        .iter()
        .map(|(c, c_inv)| self.parent.op(&self.parent.op(c, &y), c_inv));

      let mut found = false;
      for z in products.chain(conjugates) {
        let z = self.parent.normalize(z);
        if search.seen.contains(&z) {
          continue;
        }
        found |= self.parent.equal(&z, x);
        search.seen.insert(z.clone());
        search.frontier.push_back(z);
      }

      if found {
        trace!(discovered = search.seen.len(), "closure search found element");
        return true;
      }
    }

    if !search.frontier.is_empty() && !search.truncated {
      search.truncated = true;
      warn!(
        limit = self.limit,
        "closure search reached its limit, membership answers are now partial"
      );
    }
    false
  }
}

#[cfg(test)]
mod tests {
  use googletest::{expect_false, expect_true, gtest};

  use super::*;
  use crate::{
    group::{Cyclic, Dihedral, Integers, Symmetry},
    semigroup::Semigroup,
  };

  #[gtest]
  fn test_finite_closure_is_exact() {
    let g = Cyclic::<12>;
    let closure = Closure::new(&g, vec![8], 100);
    for x in 0..12u16 {
      expect_true!(closure.contains(&x) == (x % 4 == 0));
    }
  }

  #[gtest]
  fn test_memoized_answers_are_stable() {
    let g = Cyclic::<12>;
    let closure = Closure::new(&g, vec![3], 100);
    expect_true!(closure.contains(&9));
    expect_false!(closure.contains(&10));
    expect_true!(closure.contains(&9));
    expect_false!(closure.contains(&10));
  }

  #[gtest]
  fn test_limit_bounds_infinite_search() {
    let z = Integers;
    let closure = Closure::new(&z, vec![1], 10);
    expect_true!(closure.contains(&5));
    expect_false!(closure.contains(&1000));
  }

  #[gtest]
  fn test_conjugation_moves_reach_normal_closure() {
    // The conjugates of a reflection s in D4 are s and r² s, which generate
    // {e, r², s, r² s}. Right multiplication alone only reaches {e, s}.
    let d4 = Dihedral::<4>;
    let r = Symmetry::Rot(1);
    let r_inv = Symmetry::Rot(3);
    let s = Symmetry::Rfl(0);

    let plain = Closure::new(&d4, vec![s], 100);
    let normal = Closure::with_conjugators(&d4, vec![s], vec![(r, r_inv), (r_inv, r)], 100);
    let conjugate = d4.op(&d4.op(&r, &s), &r_inv);

    expect_false!(plain.contains(&conjugate));
    expect_true!(normal.contains(&conjugate));
    expect_true!(normal.contains(&d4.op(&s, &conjugate)));
    expect_false!(normal.contains(&r));
  }
}
