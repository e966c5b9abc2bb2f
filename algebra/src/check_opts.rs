/// Bounds on the work done validating laws and searching lazy closures.
#[derive(Clone, Copy, Debug)]
pub struct CheckOptions {
  /// Maximum number of law instances (pairs, triples) checked per law. Above
  /// this, instances are sampled.
  pub max_checks: usize,
  /// Seed for instance sampling, so validation is deterministic.
  pub seed: u64,
  /// Whether law checks run on the rayon thread pool.
  pub parallel: bool,
  /// Maximum number of elements a closure search may discover.
  pub search_limit: usize,
}

impl CheckOptions {
  pub fn with_max_checks(&self, max_checks: usize) -> Self {
    Self {
      max_checks,
      ..*self
    }
  }

  pub fn with_seed(&self, seed: u64) -> Self {
    Self { seed, ..*self }
  }

  pub fn with_parallel(&self, parallel: bool) -> Self {
    Self { parallel, ..*self }
  }

  pub fn with_search_limit(&self, search_limit: usize) -> Self {
    Self {
      search_limit,
      ..*self
    }
  }
}

impl Default for CheckOptions {
  fn default() -> Self {
    Self {
      max_checks: 4096,
      seed: 0x6a09_e667_f3bc_c908,
      parallel: true,
      search_limit: 4096,
    }
  }
}
