use std::sync::OnceLock;

use crate::{
  finite::Finite,
  group::{CommGroup, Group},
  monoid::Monoid,
  morphism::Morphism,
  ordinal::Ordinal,
  semigroup::Semigroup,
  subgroup::Subgroup,
};

/// An element of the parent group that has been checked to lie in a subgroup.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Member<T>(T);

impl<T> Member<T> {
  pub(crate) fn new(x: T) -> Self {
    Self(x)
  }

  pub fn get(&self) -> &T {
    &self.0
  }

  pub fn into_inner(self) -> T {
    self.0
  }
}

/// A subgroup viewed as a group in its own right, carried by [`Member`]s.
///
/// Products and inverses of members are members, so the operations forward
/// to the parent without rechecking membership.
pub struct Restricted<'s, 'a, G: Group> {
  subgroup: &'s Subgroup<'a, G>,
  table: OnceLock<Vec<Member<G::Elem>>>,
}

impl<'s, 'a, G: Group> Restricted<'s, 'a, G> {
  pub(crate) fn new(subgroup: &'s Subgroup<'a, G>) -> Self {
    Self {
      subgroup,
      table: OnceLock::new(),
    }
  }

  pub fn subgroup(&self) -> &'s Subgroup<'a, G> {
    self.subgroup
  }

  /// The inclusion of the subgroup into its parent.
  pub fn inclusion(&self) -> Morphism<'_, Self, G> {
    Morphism::new_unchecked(self, self.subgroup.parent(), |x: &Member<G::Elem>| {
      x.get().clone()
    })
  }
}

impl<G: Group + Finite> Restricted<'_, '_, G> {
  /// Members in the parent's enumeration order.
  fn table(&self) -> &[Member<G::Elem>] {
    self.table.get_or_init(|| {
      self
        .subgroup
        .members()
        .into_iter()
        .map(Member::new)
        .collect()
    })
  }
}

impl<G: Group> Semigroup for Restricted<'_, '_, G> {
  type Elem = Member<G::Elem>;

  fn op(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem {
    Member(self.subgroup.parent().op(&a.0, &b.0))
  }

  fn equal(&self, a: &Self::Elem, b: &Self::Elem) -> bool {
    self.subgroup.parent().equal(&a.0, &b.0)
  }

  fn normalize(&self, a: Self::Elem) -> Self::Elem {
    Member(self.subgroup.parent().normalize(a.0))
  }
}

impl<G: Group> Monoid for Restricted<'_, '_, G> {
  fn identity(&self) -> Self::Elem {
    Member(self.subgroup.parent().identity())
  }
}

impl<G: Group> Group for Restricted<'_, '_, G> {
  fn inverse(&self, a: &Self::Elem) -> Self::Elem {
    Member(self.subgroup.parent().inverse(&a.0))
  }
}

impl<G: CommGroup> CommGroup for Restricted<'_, '_, G> {}

impl<G: Group + Finite> Finite for Restricted<'_, '_, G> {
  fn size(&self) -> usize {
    self.table().len()
  }

  fn for_each(&self) -> impl Iterator<Item = Self::Elem> + '_ {
    self.table().iter().cloned()
  }
}

impl<G: Group + Ordinal> Ordinal for Restricted<'_, '_, G> {
  fn ord(&self, a: &Self::Elem) -> usize {
    let parent = self.subgroup.parent();
    let key = parent.ord(&a.0);
    match self.table().binary_search_by_key(&key, |m| parent.ord(&m.0)) {
      Ok(ord) => ord,
      Err(_) => panic!("{a:?} is not a member of the subgroup"),
    }
  }

  fn from_ord(&self, ord: usize) -> Self::Elem {
    self.table()[ord].clone()
  }
}
