use std::fmt::{Debug, Display};

use thiserror::Error;

/// The algebraic laws a supplied function can be checked against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Law {
  Associativity,
  LeftIdentity,
  RightIdentity,
  LeftInverse,
  RightInverse,
  Commutativity,
  /// `f(x • y) = f(x) • f(y)`.
  Homomorphism,
  /// `f(e) = e`, required separately for monoid morphisms.
  Unital,
  /// `act(e, x) = x`.
  ActionIdentity,
  /// `act(g, act(h, x)) = act(g • h, x)`.
  ActionCompatibility,
  /// Every point reached by the action lies in the acted-on set.
  ActionClosure,
  SubgroupIdentity,
  SubgroupProduct,
  SubgroupInverse,
  /// A pair of maps fails to be mutually inverse.
  RoundTrip,
}

impl Display for Law {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      Self::Associativity => "associativity",
      Self::LeftIdentity => "left identity",
      Self::RightIdentity => "right identity",
      Self::LeftInverse => "left inverse",
      Self::RightInverse => "right inverse",
      Self::Commutativity => "commutativity",
      Self::Homomorphism => "homomorphism law",
      Self::Unital => "identity preservation",
      Self::ActionIdentity => "action identity",
      Self::ActionCompatibility => "action compatibility",
      Self::ActionClosure => "action closure",
      Self::SubgroupIdentity => "subgroup identity",
      Self::SubgroupProduct => "subgroup product closure",
      Self::SubgroupInverse => "subgroup inverse closure",
      Self::RoundTrip => "round trip",
    };
    write!(f, "{name}")
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AlgebraError {
  /// A supplied function fails a required law on a validation witness.
  #[error("{law} fails at {witness}")]
  LawViolation { law: Law, witness: String },

  /// A quotient was requested by a subgroup that is not closed under
  /// conjugation.
  #[error("subgroup is not normal: {witness} escapes under conjugation")]
  NormalityRequired { witness: String },

  /// A universal-property lift was requested for a map that does not send the
  /// witness to the identity.
  #[error("lift obligation unmet: {witness} does not map to the identity")]
  LiftObligationUnmet { witness: String },

  /// The operation needs an explicit generating set, but the subgroup is only
  /// known through its membership predicate.
  #[error("operation requires a subgroup with a known generating set")]
  GeneratorsUnknown,

  #[error("expected a symmetric group of degree {expected}, found degree {actual}")]
  DegreeMismatch { expected: usize, actual: usize },
}

impl AlgebraError {
  pub(crate) fn law_violation(law: Law, witness: impl Debug) -> Self {
    Self::LawViolation {
      law,
      witness: format!("{witness:?}"),
    }
  }

  pub(crate) fn lift_obligation_unmet(witness: impl Debug) -> Self {
    Self::LiftObligationUnmet {
      witness: format!("{witness:?}"),
    }
  }
}

pub type AlgebraResult<T> = Result<T, AlgebraError>;
