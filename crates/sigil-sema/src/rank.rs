//! Overload ranker: picks the most specific match among candidates, or
//! reports `no overload matches` / `ambiguous`.

use crate::ast::{Def, DefId};
use crate::error::resolve::{RejectedCandidate, ResolveError};
use crate::ident::Ident;
use crate::matcher::{cmp_specificity, MatchedCandidate};
use crate::types::TypeRegistry;

/// One def's full match outcome, keyed by its handle for attaching back to
/// the call site.
pub struct CandidateEval<'a> {
    pub def_id: DefId,
    pub def: &'a Def,
    pub outcome: Result<MatchedCandidate, crate::error::resolve::MismatchReason>,
}

pub struct Resolved {
    pub def_id: DefId,
    pub matched: MatchedCandidate,
}

/// `ResolverOptions::ambiguous_redefinition_wins_on_later_decl` — see
/// `crate::config`.
pub fn rank(
    name: Ident,
    arg_type_names: Vec<String>,
    evals: Vec<CandidateEval<'_>>,
    types: &dyn TypeRegistry,
    redefinition_wins_on_later_decl: bool,
) -> Result<Resolved, ResolveError> {
    let mut matched = Vec::new();
    let mut rejected = Vec::new();

    for eval in evals {
        match eval.outcome {
            Ok(m) => matched.push((eval.def_id, eval.def, m)),
            Err(reason) => rejected.push(RejectedCandidate {
                def_signature: eval.def.signature(types),
                reason,
            }),
        }
    }

    if matched.is_empty() {
        return Err(ResolveError::NoOverloadMatches {
            name,
            arg_types: arg_type_names,
            candidates: rejected,
        });
    }

    if matched.len() == 1 {
        let (def_id, _, m) = matched.into_iter().next().unwrap();
        return Ok(Resolved { def_id, matched: m });
    }

    let best_score = matched
        .iter()
        .map(|(_, _, m)| m.score)
        .max_by(cmp_specificity)
        .expect("non-empty");

    let mut tied: Vec<_> = matched
        .into_iter()
        .filter(|(_, _, m)| cmp_specificity(&m.score, &best_score) == std::cmp::Ordering::Equal)
        .collect();

    if tied.len() == 1 {
        let (def_id, _, m) = tied.into_iter().next().unwrap();
        return Ok(Resolved { def_id, matched: m });
    }

    let all_identical = tied.windows(2).all(|pair| pair[0].1 == pair[1].1);

    if all_identical && redefinition_wins_on_later_decl {
        tied.sort_by_key(|(def_id, _, _)| *def_id);
        let (def_id, _, m) = tied.into_iter().next_back().unwrap();
        return Ok(Resolved { def_id, matched: m });
    }

    Err(ResolveError::Ambiguous {
        name,
        candidates: tied.iter().map(|(_, def, _)| def.signature(types)).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Arg, Restriction};
    use crate::matcher::Specificity;
    use crate::types::InMemoryTypeRegistry;

    fn matched_with(score: Specificity) -> MatchedCandidate {
        MatchedCandidate { bindings: vec![], score }
    }

    fn base_score() -> Specificity {
        Specificity {
            restricted_slots: 0,
            total_restriction_distance: 0,
            has_splat: false,
            splat_absorbed_count: 0,
        }
    }

    #[test]
    fn test_no_matches_reports_candidates() {
        let reg = InMemoryTypeRegistry::new();
        let def = Def::new("foo", vec![Arg::new("a")]);
        let evals = vec![CandidateEval {
            def_id: DefId::new(0),
            def: &def,
            outcome: Err(crate::error::resolve::MismatchReason::BlockMismatch),
        }];

        let err = rank(Ident::new("foo"), vec!["Int32".to_string()], evals, &reg, true).unwrap_err();
        assert!(matches!(err, ResolveError::NoOverloadMatches { .. }));
    }

    #[test]
    fn test_single_match_wins_unconditionally() {
        let reg = InMemoryTypeRegistry::new();
        let def = Def::new("foo", vec![Arg::new("a")]);
        let evals = vec![CandidateEval {
            def_id: DefId::new(0),
            def: &def,
            outcome: Ok(matched_with(base_score())),
        }];

        let resolved = rank(Ident::new("foo"), vec![], evals, &reg, true).unwrap();
        assert_eq!(resolved.def_id, DefId::new(0));
    }

    #[test]
    fn test_more_specific_candidate_wins() {
        // S3: foo(arg: Int32) beats foo(*args: Int32) for a single argument.
        let reg = InMemoryTypeRegistry::new();
        let def_exact = Def::new("foo", vec![Arg::new("arg")]);
        let def_splat = Def::new("foo", vec![Arg::new("args")]).with_splat(0);

        let exact_score = Specificity {
            restricted_slots: 1,
            total_restriction_distance: 0,
            has_splat: false,
            splat_absorbed_count: 0,
        };
        let splat_score = Specificity {
            restricted_slots: 1,
            total_restriction_distance: 0,
            has_splat: true,
            splat_absorbed_count: 1,
        };

        let evals = vec![
            CandidateEval {
                def_id: DefId::new(0),
                def: &def_exact,
                outcome: Ok(matched_with(exact_score)),
            },
            CandidateEval {
                def_id: DefId::new(1),
                def: &def_splat,
                outcome: Ok(matched_with(splat_score)),
            },
        ];

        let resolved = rank(Ident::new("foo"), vec![], evals, &reg, true).unwrap();
        assert_eq!(resolved.def_id, DefId::new(0));
    }

    #[test]
    fn test_redefinition_later_declaration_wins() {
        let reg = InMemoryTypeRegistry::new();
        let def_a = Def::new("foo", vec![Arg::new("a")]);
        let def_b = Def::new("foo", vec![Arg::new("a")]);

        let evals = vec![
            CandidateEval {
                def_id: DefId::new(0),
                def: &def_a,
                outcome: Ok(matched_with(base_score())),
            },
            CandidateEval {
                def_id: DefId::new(1),
                def: &def_b,
                outcome: Ok(matched_with(base_score())),
            },
        ];

        let resolved = rank(Ident::new("foo"), vec![], evals, &reg, true).unwrap();
        assert_eq!(resolved.def_id, DefId::new(1));
    }

    #[test]
    fn test_genuine_ambiguity_reported() {
        let reg = InMemoryTypeRegistry::new();
        let int32 = {
            let mut reg = InMemoryTypeRegistry::new();
            reg.declare("Int32")
        };
        let def_a = Def::new("foo", vec![Arg::new("a").with_restriction(Restriction(int32))]);
        let def_b = Def::new("foo", vec![Arg::new("b").with_restriction(Restriction(int32))]);

        let evals = vec![
            CandidateEval {
                def_id: DefId::new(0),
                def: &def_a,
                outcome: Ok(matched_with(base_score())),
            },
            CandidateEval {
                def_id: DefId::new(1),
                def: &def_b,
                outcome: Ok(matched_with(base_score())),
            },
        ];

        let err = rank(Ident::new("foo"), vec![], evals, &reg, true).unwrap_err();
        assert!(matches!(err, ResolveError::Ambiguous { .. }));
    }
}
