use std::fmt::Display;

use crate::{
  finite::Finite,
  group::Group,
  monoid::Monoid,
  ordinal::Ordinal,
  semigroup::Semigroup,
};

/// A bijection of `0..n`, stored as its list of images.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Permutation(Vec<usize>);

impl Permutation {
  pub fn identity(degree: usize) -> Self {
    Self((0..degree).collect())
  }

  /// Builds the permutation sending `i` to `images[i]`, or `None` if `images`
  /// is not a rearrangement of `0..images.len()`.
  pub fn from_images(images: Vec<usize>) -> Option<Self> {
    let mut seen = vec![false; images.len()];
    for &image in &images {
      if image >= images.len() || seen[image] {
        return None;
      }
      seen[image] = true;
    }
    Some(Self(images))
  }

  pub(crate) fn from_images_unchecked(images: Vec<usize>) -> Self {
    debug_assert!(Self::from_images(images.clone()).is_some());
    Self(images)
  }

  /// The cycle `points[0] → points[1] → ... → points[0]` on `0..degree`.
  pub fn cycle(degree: usize, points: &[usize]) -> Option<Self> {
    let mut images: Vec<usize> = (0..degree).collect();
    for (idx, &point) in points.iter().enumerate() {
      if point >= degree {
        return None;
      }
      images[point] = points[(idx + 1) % points.len()];
    }
    Self::from_images(images)
  }

  pub fn degree(&self) -> usize {
    self.0.len()
  }

  pub fn apply(&self, point: usize) -> usize {
    self.0[point]
  }

  pub fn images(&self) -> &[usize] {
    &self.0
  }
}

impl Display for Permutation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let mut visited = vec![false; self.degree()];
    let mut wrote_cycle = false;
    for start in 0..self.degree() {
      if visited[start] || self.0[start] == start {
        continue;
      }
      write!(f, "(")?;
      let mut point = start;
      loop {
        visited[point] = true;
        write!(f, "{point}")?;
        point = self.0[point];
        if point == start {
          break;
        }
        write!(f, " ")?;
      }
      write!(f, ")")?;
      wrote_cycle = true;
    }
    if !wrote_cycle {
      write!(f, "e")?;
    }
    Ok(())
  }
}

/// The symmetric group on `degree` points. Permutations compose right to left:
/// `op(a, b)` applies `b` first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Symmetric {
  degree: usize,
}

impl Symmetric {
  /// 20! is the largest factorial that fits in a u64.
  pub const MAX_DEGREE: usize = 20;

  /// Panics if `degree` exceeds [`Self::MAX_DEGREE`], past which the group's
  /// order and element ranks do not fit in a `u64`.
  pub fn new(degree: usize) -> Self {
    assert!(
      degree <= Self::MAX_DEGREE,
      "symmetric group of degree {degree} exceeds the maximum degree {}",
      Self::MAX_DEGREE
    );
    Self { degree }
  }

  pub fn degree(&self) -> usize {
    self.degree
  }
}

fn factorial(n: usize) -> usize {
  (1..=n).product()
}

impl Semigroup for Symmetric {
  type Elem = Permutation;

  fn op(&self, a: &Permutation, b: &Permutation) -> Permutation {
    debug_assert_eq!(a.degree(), self.degree);
    debug_assert_eq!(b.degree(), self.degree);
    Permutation(b.0.iter().map(|&i| a.0[i]).collect())
  }
}

impl Monoid for Symmetric {
  fn identity(&self) -> Permutation {
    Permutation::identity(self.degree)
  }
}

impl Group for Symmetric {
  fn inverse(&self, a: &Permutation) -> Permutation {
    let mut images = vec![0; a.degree()];
    for (point, &image) in a.0.iter().enumerate() {
      images[image] = point;
    }
    Permutation(images)
  }
}

impl Finite for Symmetric {
  fn size(&self) -> usize {
    factorial(self.degree)
  }

  fn for_each(&self) -> impl Iterator<Item = Permutation> + '_ {
    (0..self.size()).map(|ord| self.from_ord(ord))
  }
}

/// Permutations are ranked by their Lehmer code, so that ordinal 0 is the
/// identity and ordinals increase lexicographically in the image list.
impl Ordinal for Symmetric {
  fn ord(&self, a: &Permutation) -> usize {
    let n = a.degree();
    (0..n)
      .map(|i| {
        let smaller_after = a.0[i + 1..].iter().filter(|&&x| x < a.0[i]).count();
        smaller_after * factorial(n - 1 - i)
      })
      .sum()
  }

  fn from_ord(&self, mut ord: usize) -> Permutation {
    debug_assert!(ord < self.size());
    let mut remaining: Vec<usize> = (0..self.degree).collect();
    let mut images = Vec::with_capacity(self.degree);
    for i in 0..self.degree {
      let place = factorial(self.degree - 1 - i);
      images.push(remaining.remove(ord / place));
      ord %= place;
    }
    Permutation(images)
  }
}
