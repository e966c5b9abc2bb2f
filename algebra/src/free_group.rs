//! Free groups over an explicit alphabet of generators.
//!
//! Elements are reduced words: sequences of letters `a` or `a⁻¹` with no
//! letter adjacent to its own inverse. Multiplication concatenates and then
//! cancels. Cancellation is confluent, so the order in which adjacent pairs
//! are removed never changes the result.

use std::fmt::Display;

use crate::{
  group::Group,
  monoid::Monoid,
  morphism::Morphism,
  semigroup::{Element, Semigroup},
};

/// A generator or its formal inverse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Letter<A> {
  generator: A,
  inverted: bool,
}

impl<A> Letter<A> {
  pub fn new(generator: A, inverted: bool) -> Self {
    Self {
      generator,
      inverted,
    }
  }

  pub fn generator(&self) -> &A {
    &self.generator
  }

  pub fn is_inverted(&self) -> bool {
    self.inverted
  }

  pub fn inverse(self) -> Self {
    Self {
      inverted: !self.inverted,
      ..self
    }
  }

  /// Whether `self` followed by `other` cancels to the empty word.
  pub fn cancels(&self, other: &Self) -> bool
  where
    A: PartialEq,
  {
    self.generator == other.generator && self.inverted != other.inverted
  }
}

impl<A: Display> Display for Letter<A> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.generator)?;
    if self.inverted {
      write!(f, "⁻¹")?;
    }
    Ok(())
  }
}

/// A reduced word. Only constructed through [`FreeGroup`] or [`reduce`], so
/// no two adjacent letters cancel.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Word<A>(Vec<Letter<A>>);

impl<A> Word<A> {
  pub fn empty() -> Self {
    Self(Vec::new())
  }

  pub fn letters(&self) -> &[Letter<A>] {
    &self.0
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl<A: Display> Display for Word<A> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    if self.is_empty() {
      return write!(f, "e");
    }
    for (idx, letter) in self.0.iter().enumerate() {
      if idx != 0 {
        write!(f, " ")?;
      }
      write!(f, "{letter}")?;
    }
    Ok(())
  }
}

/// Cancels adjacent inverse pairs until none remain, in a single left to
/// right pass.
pub fn reduce<A: PartialEq>(letters: impl IntoIterator<Item = Letter<A>>) -> Word<A> {
  let mut stack: Vec<Letter<A>> = Vec::new();
  for letter in letters {
    if stack.last().is_some_and(|top| top.cancels(&letter)) {
      stack.pop();
    } else {
      stack.push(letter);
    }
  }
  Word(stack)
}

/// Every index `i` where `letters[i]` and `letters[i + 1]` cancel.
pub fn cancellation_sites<A: PartialEq>(letters: &[Letter<A>]) -> Vec<usize> {
  letters
    .windows(2)
    .enumerate()
    .filter(|(_, pair)| pair[0].cancels(&pair[1]))
    .map(|(idx, _)| idx)
    .collect()
}

/// A single reduction step, removing the pair at `site`.
pub fn cancel_at<A: PartialEq + Clone>(letters: &[Letter<A>], site: usize) -> Vec<Letter<A>> {
  debug_assert!(letters[site].cancels(&letters[site + 1]));
  letters[..site]
    .iter()
    .chain(&letters[site + 2..])
    .cloned()
    .collect()
}

const DEFAULT_MAX_WORD_LEN: usize = 1 << 20;

/// The free group on a list of generators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FreeGroup<A> {
  generators: Vec<A>,
  max_word_len: usize,
}

impl<A: Element> FreeGroup<A> {
  pub fn new(generators: Vec<A>) -> Self {
    Self {
      generators,
      max_word_len: DEFAULT_MAX_WORD_LEN,
    }
  }

  /// Bounds the length of any word produced by the group operation. Products
  /// longer than this panic.
  pub fn with_max_word_len(self, max_word_len: usize) -> Self {
    Self {
      max_word_len,
      ..self
    }
  }

  pub fn generators(&self) -> &[A] {
    &self.generators
  }

  pub fn max_word_len(&self) -> usize {
    self.max_word_len
  }

  /// The one-letter word `a`.
  pub fn of(&self, a: A) -> Word<A> {
    debug_assert!(self.generators.contains(&a));
    Word(vec![Letter::new(a, false)])
  }

  /// The reduced form of `letters`.
  pub fn word(&self, letters: impl IntoIterator<Item = Letter<A>>) -> Word<A> {
    let word = reduce(letters);
    self.check_len(&word);
    word
  }

  fn check_len(&self, word: &Word<A>) {
    assert!(
      word.len() <= self.max_word_len,
      "reduced word of length {} exceeds the maximum of {}",
      word.len(),
      self.max_word_len
    );
  }

  fn alphabet(&self) -> impl Iterator<Item = Letter<A>> + '_ {
    self
      .generators
      .iter()
      .flat_map(|a| [Letter::new(a.clone(), false), Letter::new(a.clone(), true)])
  }

  /// Every reduced word of length at most `radius`, shortest first.
  pub fn ball(&self, radius: usize) -> Vec<Word<A>> {
    let alphabet: Vec<Letter<A>> = self.alphabet().collect();
    let mut layer = vec![Word::empty()];
    let mut ball = layer.clone();
    for _ in 0..radius {
      layer = layer
        .iter()
        .flat_map(|word| {
          alphabet
            .iter()
            .filter(|letter| !word.0.last().is_some_and(|last| last.cancels(letter)))
            .map(|letter| {
              let mut letters = word.0.clone();
              letters.push(letter.clone());
              Word(letters)
            })
        })
        .collect();
      ball.extend(layer.iter().cloned());
    }
    ball
  }

  /// The unique morphism into `target` sending each generator `a` to `f(a)`.
  /// Letters `a⁻¹` are sent to the inverse of `f(a)`.
  pub fn lift<'a, G: Group>(
    &'a self,
    target: &'a G,
    f: impl Fn(&A) -> G::Elem + Send + Sync + 'a,
  ) -> Morphism<'a, Self, G> {
    Morphism::new_unchecked(self, target, move |word: &Word<A>| {
      word.0.iter().fold(target.identity(), |acc, letter| {
        let image = f(&letter.generator);
        if letter.inverted {
          target.op(&acc, &target.inverse(&image))
        } else {
          target.op(&acc, &image)
        }
      })
    })
  }
}

impl<A: Element> Semigroup for FreeGroup<A> {
  type Elem = Word<A>;

  fn op(&self, a: &Word<A>, b: &Word<A>) -> Word<A> {
    let mut letters = a.0.clone();
    for letter in &b.0 {
      if letters.last().is_some_and(|top| top.cancels(letter)) {
        letters.pop();
      } else {
        letters.push(letter.clone());
      }
    }
    let word = Word(letters);
    self.check_len(&word);
    word
  }
}

impl<A: Element> Monoid for FreeGroup<A> {
  fn identity(&self) -> Word<A> {
    Word::empty()
  }
}

impl<A: Element> Group for FreeGroup<A> {
  fn inverse(&self, a: &Word<A>) -> Word<A> {
    Word(a.0.iter().rev().cloned().map(Letter::inverse).collect())
  }
}

#[cfg(test)]
mod tests {
  use googletest::{expect_that, expect_true, gtest, prelude::*};
  use rand::{rngs::StdRng, Rng, SeedableRng};
  use rstest::rstest;

  use super::*;
  use crate::{
    check_opts::CheckOptions,
    group::{Cyclic, Permutation, Symmetric},
    laws::check_group,
  };

  fn ab() -> FreeGroup<char> {
    FreeGroup::new(vec!['a', 'b'])
  }

  fn letter(c: char) -> Letter<char> {
    if c.is_uppercase() {
      Letter::new(c.to_ascii_lowercase(), true)
    } else {
      Letter::new(c, false)
    }
  }

  /// Reads `aB` as `a b⁻¹`.
  fn letters(s: &str) -> Vec<Letter<char>> {
    s.chars().map(letter).collect()
  }

  #[rstest]
  #[case("", "")]
  #[case("aA", "")]
  #[case("abBA", "")]
  #[case("abBa", "aa")]
  #[case("aBbAb", "b")]
  #[case("ab", "ab")]
  fn test_reduce(#[case] input: &str, #[case] reduced: &str) {
    assert_eq!(reduce(letters(input)), Word(letters(reduced)));
  }

  #[gtest]
  fn test_group_laws_on_ball() {
    let f = ab();
    let ball = f.ball(2);
    // 1 + 4 + 4 * 3 reduced words.
    expect_that!(ball.len(), eq(17));
    expect_true!(check_group(&f, &ball, &CheckOptions::default()).is_ok());
  }

  #[gtest]
  fn test_inverse() {
    let f = ab();
    let w = f.word(letters("abA"));
    expect_true!(f.is_identity(&f.op(&w, &f.inverse(&w))));
    assert_eq!(f.inverse(&w), Word(letters("aBA")));
  }

  #[gtest]
  fn test_display() {
    let f = ab();
    assert_eq!(f.word(letters("aB")).to_string(), "a b⁻¹");
    assert_eq!(f.identity().to_string(), "e");
  }

  #[gtest]
  fn test_reduction_is_confluent() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..200 {
      let len = rng.random_range(0..24);
      let input: Vec<Letter<char>> = (0..len)
        .map(|_| Letter::new(['a', 'b'][rng.random_range(0..2)], rng.random_bool(0.5)))
        .collect();

      let mut word = input.clone();
      loop {
        let sites = cancellation_sites(&word);
        if sites.is_empty() {
          break;
        }
        word = cancel_at(&word, sites[rng.random_range(0..sites.len())]);
      }
      expect_true!(Word(word) == reduce(input));
    }
  }

  #[gtest]
  fn test_lift_extends_generators() {
    let f = ab();
    let c5 = Cyclic::<5>;
    let phi = f.lift(&c5, |a: &char| if *a == 'a' { 1 } else { 2 });
    expect_that!(phi.apply(&f.of('a')), eq(1));
    expect_that!(phi.apply(&f.of('b')), eq(2));
    expect_that!(phi.apply(&f.word(letters("abB"))), eq(1));
    expect_that!(phi.apply(&f.word(letters("AAb"))), eq(0));
  }

  #[gtest]
  fn test_lift_is_homomorphism() {
    let f = ab();
    let s3 = Symmetric::new(3);
    let (Some(x), Some(y)) = (Permutation::cycle(3, &[0, 1, 2]), Permutation::cycle(3, &[0, 1])) else {
      panic!("invalid cycles");
    };
    let phi = f.lift(&s3, move |a: &char| if *a == 'a' { x.clone() } else { y.clone() });
    expect_true!(Morphism::new(&f, &s3, move |w: &Word<char>| phi.apply(w), &f.ball(2), &CheckOptions::default()).is_ok());
  }

  #[test]
  #[should_panic(expected = "exceeds the maximum")]
  fn test_word_length_guard() {
    let f = ab().with_max_word_len(3);
    let w = f.word(letters("ab"));
    f.op(&w, &w);
  }
}
