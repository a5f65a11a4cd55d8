//! Per-call resolution errors.
//!
//! Every variant's `Display` implementation is one of the compatibility
//! message shapes the `test_message_shapes` table below pins down exactly.

use crate::ident::Ident;

/// Why a single candidate `Def` was rejected during matching, stored as
/// `(def, Mismatch.reason)` so the ranker can list a per-overload cause in
/// `NoOverloadMatches`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MismatchReason {
    #[error("wrong number of arguments for '{name}' (given {given}, expected {expected})")]
    WrongArity {
        name: Ident,
        given: usize,
        expected: ArityExpectation,
    },
    #[error("argument {slot} of type {actual} does not satisfy restriction {restriction}")]
    RestrictionFailed {
        slot: usize,
        actual: String,
        restriction: String,
    },
    #[error("block argument required but call has none, or vice versa")]
    BlockMismatch,
    #[error("no argument named '{0}'")]
    NamedArgUnknown(Ident),
    #[error("duplicate named argument '{0}'")]
    NamedArgDuplicate(Ident),
    #[error("named argument '{0}' falls within the splat parameter")]
    NamedArgCoversSplat(Ident),
    #[error("missing argument: {}", format_missing(.0))]
    MissingArg(Vec<Ident>),
    #[error("splat for '{name}' would absorb {absorbed} arguments, exceeding the configured cap of {max}")]
    SplatAbsorptionExceeded { name: Ident, absorbed: usize, max: usize },
}

fn format_missing(names: &[Ident]) -> String {
    names.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(", ")
}

/// How many effective arguments a def is willing to accept, for the
/// `WrongArity` message's "expected E" clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArityExpectation {
    Exact(usize),
    AtLeast(usize),
    Range(usize, usize),
}

impl std::fmt::Display for ArityExpectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArityExpectation::Exact(n) => write!(f, "{n}"),
            ArityExpectation::AtLeast(n) => write!(f, "{n}+"),
            ArityExpectation::Range(min, max) => write!(f, "{min}..{max}"),
        }
    }
}

/// A single rejected candidate, kept around so `NoOverloadMatches` can
/// enumerate the candidate defs and the reason each was rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedCandidate {
    pub def_signature: String,
    pub reason: MismatchReason,
}

/// The error a call resolution terminates with.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    #[error("undefined method '{0}'")]
    UndefinedMethod(Ident),

    #[error("wrong number of arguments for '{name}' (given {given}, expected {expected})")]
    WrongArity {
        name: Ident,
        given: usize,
        expected: ArityExpectation,
    },

    #[error("no overload matches '{name}' with types {}", .arg_types.join(", "))]
    NoOverloadMatches {
        name: Ident,
        arg_types: Vec<String>,
        candidates: Vec<RejectedCandidate>,
    },

    #[error("ambiguous call to '{name}': {} equally specific overloads match", .candidates.len())]
    Ambiguous { name: Ident, candidates: Vec<String> },

    #[error("argument to splat must be a tuple, not {actual_type}")]
    NotATuple { slot: usize, actual_type: String },

    #[error("splatting a union ({actual_type}) is not yet supported")]
    SplatUnion { actual_type: String },

    #[error("no argument named '{0}'")]
    NamedArgUnknown(Ident),

    #[error("duplicate named argument '{0}'")]
    NamedArgDuplicate(Ident),

    #[error("named argument '{0}' falls within the splat parameter")]
    NamedArgCoversSplat(Ident),

    #[error("missing argument: {}", format_missing(.0))]
    MissingArg(Vec<Ident>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        ResolveError::WrongArity { name: Ident::new("foo"), given: 3, expected: ArityExpectation::Exact(2) },
        "wrong number of arguments for 'foo' (given 3, expected 2)"
    )]
    #[case(
        ResolveError::NoOverloadMatches {
            name: Ident::new("foo"),
            arg_types: vec!["Int32".to_string(), "String".to_string()],
            candidates: vec![],
        },
        "no overload matches 'foo' with types Int32, String"
    )]
    #[case(
        ResolveError::NotATuple { slot: 0, actual_type: "Int32".to_string() },
        "argument to splat must be a tuple, not Int32"
    )]
    #[case(
        ResolveError::SplatUnion { actual_type: "(Int32, String) | (Float64)".to_string() },
        "splatting a union ((Int32, String) | (Float64)) is not yet supported"
    )]
    #[case(
        ResolveError::MissingArg(vec![Ident::new("b")]),
        "missing argument: b"
    )]
    #[case(
        ResolveError::NamedArgUnknown(Ident::new("z")),
        "no argument named 'z'"
    )]
    fn test_message_shapes(#[case] error: ResolveError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_splat_absorption_exceeded_message() {
        let reason = MismatchReason::SplatAbsorptionExceeded {
            name: Ident::new("foo"),
            absorbed: 5,
            max: 3,
        };
        assert_eq!(
            reason.to_string(),
            "splat for 'foo' would absorb 5 arguments, exceeding the configured cap of 3"
        );
    }
}
