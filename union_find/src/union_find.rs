#[derive(Clone, Copy)]
struct Node {
  /// The index of parent of this node (self if root).
  parent: usize,
  /// Size of the tree under this element if this is a root, otherwise this
  /// value is stale.
  size: usize,
}

/// A disjoint-set forest over the ids `0..capacity`.
pub struct UnionFind {
  unique_sets: usize,
  elements: Vec<Node>,
}

impl UnionFind {
  pub fn new(capacity: usize) -> Self {
    let elements = (0..capacity)
      .map(|parent| Node { parent, size: 1 })
      .collect();

    Self {
      unique_sets: capacity,
      elements,
    }
  }

  pub fn capacity(&self) -> usize {
    self.elements.len()
  }

  pub fn unique_sets(&self) -> usize {
    self.unique_sets
  }

  /// Gives id of the root of tree that node is in.
  pub fn find(&mut self, mut node_id: usize) -> usize {
    let mut node = self.elements[node_id];

    while node.parent != node_id {
      let parent = self.elements[node.parent];
      // Compress the path by pointing node at its grandparent.
      self.elements[node_id].parent = parent.parent;

      node_id = node.parent;
      node = parent;
    }

    node_id
  }

  pub fn same_set(&mut self, a_id: usize, b_id: usize) -> bool {
    self.find(a_id) == self.find(b_id)
  }

  /// Unions the two sets that a and b are in (noop if are already in the same
  /// set), returning the new set index of the two nodes.
  pub fn union(&mut self, a_id: usize, b_id: usize) -> usize {
    let mut a_root_id = self.find(a_id);
    let mut b_root_id = self.find(b_id);
    if a_root_id == b_root_id {
      return a_root_id;
    }

    // Attach the smaller tree under the larger.
    if self.elements[a_root_id].size < self.elements[b_root_id].size {
      std::mem::swap(&mut a_root_id, &mut b_root_id);
    }
    self.elements[a_root_id].size += self.elements[b_root_id].size;
    self.elements[b_root_id].parent = a_root_id;

    self.unique_sets -= 1;
    a_root_id
  }

  /// Every set, each listed in increasing id order, ordered by their smallest
  /// id.
  pub fn sets(&mut self) -> Vec<Vec<usize>> {
    let mut slot_of_root = vec![usize::MAX; self.capacity()];
    let mut sets: Vec<Vec<usize>> = Vec::with_capacity(self.unique_sets);
    for id in 0..self.capacity() {
      let root = self.find(id);
      if slot_of_root[root] == usize::MAX {
        slot_of_root[root] = sets.len();
        sets.push(Vec::new());
      }
      sets[slot_of_root[root]].push(id);
    }
    sets
  }
}
