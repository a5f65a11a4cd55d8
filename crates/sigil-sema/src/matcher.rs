//! Overload matcher: decides whether one `Def` accepts a call's preprocessed
//! arguments, and if so, computes its specificity score.

use smallvec::SmallVec;

use crate::ast::Def;
use crate::error::resolve::{ArityExpectation, MismatchReason};
use crate::partition::partition;
use crate::preprocess::{EffectiveArg, Effective};
use crate::types::{ExprTypes, TypeRegistry};

/// One formal's bound actual(s); a splat formal may bind zero or more.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundArg {
    pub formal_index: usize,
    pub actuals: SmallVec<[EffectiveArg; 1]>,
}

/// The ranker's ordering key. Lower
/// `total_restriction_distance` and `splat_absorbed_count` are more
/// specific; comparisons only make sense between candidates for the same
/// call, via [`cmp_specificity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Specificity {
    pub restricted_slots: usize,
    pub total_restriction_distance: usize,
    pub has_splat: bool,
    pub splat_absorbed_count: usize,
}

/// `Greater` means `a` is more specific than `b`:
/// more restricted slots, then tighter restrictions, then no splat beats a
/// splat, then fewer splat-absorbed actuals beats more.
pub fn cmp_specificity(a: &Specificity, b: &Specificity) -> std::cmp::Ordering {
    a.restricted_slots
        .cmp(&b.restricted_slots)
        .then_with(|| b.total_restriction_distance.cmp(&a.total_restriction_distance))
        .then_with(|| b.has_splat.cmp(&a.has_splat))
        .then_with(|| b.splat_absorbed_count.cmp(&a.splat_absorbed_count))
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchedCandidate {
    pub bindings: Vec<BoundArg>,
    pub score: Specificity,
}

fn restriction_distance(types: &dyn TypeRegistry, actual: crate::types::TypeId, restriction: crate::types::TypeId) -> usize {
    let actual = types.remove_alias(actual);
    let restriction = types.remove_alias(restriction);
    if actual == restriction {
        return 0;
    }
    types
        .ancestors(actual)
        .iter()
        .position(|t| *t == restriction)
        .map(|i| i + 1)
        .unwrap_or(usize::MAX / 2)
}

/// Tries to match `def` against a call's preprocessed arguments.
///
/// `max_splat_absorbed` caps how many actuals `def`'s splat (if any) may
/// absorb in one call; `None` leaves it unbounded.
pub fn match_candidate(
    def: &Def,
    effective: &Effective,
    has_block: bool,
    types: &dyn TypeRegistry,
    expr_types: &dyn ExprTypes,
    max_splat_absorbed: Option<usize>,
) -> Result<MatchedCandidate, MismatchReason> {
    let n = def.args.len();
    let s = def.splat_index;

    // Step 1: arity check. A formal is "required" when it is neither the
    // splat slot nor defaulted.
    let required = def
        .args
        .iter()
        .enumerate()
        .filter(|(i, a)| Some(*i) != s && a.default_value.is_none())
        .count();
    let min_size = required;
    let max_size = if s.is_some() { usize::MAX } else { n };
    let given = effective.args.len() + effective.named_args.len();

    if given < min_size || given > max_size {
        let expected = if s.is_some() {
            ArityExpectation::AtLeast(min_size)
        } else if min_size == max_size {
            ArityExpectation::Exact(n)
        } else {
            ArityExpectation::Range(min_size, max_size)
        };
        return Err(MismatchReason::WrongArity {
            name: def.name,
            given,
            expected,
        });
    }

    // Step 2: partition the positional effective args across before/at/after.
    let m = effective.args.len();
    let part = partition(n, s, m).ok_or(MismatchReason::WrongArity {
        name: def.name,
        given,
        expected: if s.is_some() {
            ArityExpectation::AtLeast(min_size)
        } else {
            ArityExpectation::Exact(n)
        },
    })?;

    if let (Some(_), Some(max)) = (s, max_splat_absorbed) {
        let absorbed = part.at_actual.end - part.at_actual.start;
        if absorbed > max {
            return Err(MismatchReason::SplatAbsorptionExceeded {
                name: def.name,
                absorbed,
                max,
            });
        }
    }

    let mut bindings: Vec<Option<SmallVec<[EffectiveArg; 1]>>> = vec![None; n];

    for (fi, ai) in part.before_formal.clone().zip(part.before_actual.clone()) {
        bindings[fi] = Some(SmallVec::from_elem(effective.args[ai].clone(), 1));
    }
    if let Some(splat_formal) = s {
        let absorbed: SmallVec<[EffectiveArg; 1]> = part.at_actual.clone().map(|ai| effective.args[ai].clone()).collect();
        bindings[splat_formal] = Some(absorbed);
    }
    for (fi, ai) in part.after_formal.clone().zip(part.after_actual.clone()) {
        bindings[fi] = Some(SmallVec::from_elem(effective.args[ai].clone(), 1));
    }

    // Step 3: bind named args.
    for named in &effective.named_args {
        let formal_index = def.args.iter().position(|a| a.name == named.name);
        match formal_index {
            None => return Err(MismatchReason::NamedArgUnknown(named.name)),
            Some(fi) if Some(fi) == s => return Err(MismatchReason::NamedArgCoversSplat(named.name)),
            Some(fi) if bindings[fi].is_some() => return Err(MismatchReason::NamedArgDuplicate(named.name)),
            Some(fi) => bindings[fi] = Some(SmallVec::from_elem(named.value.clone(), 1)),
        }
    }

    // Step 4: bind defaults for anything still unbound before the splat.
    for (i, arg) in def.args.iter().enumerate() {
        if Some(i) == s {
            continue;
        }
        if bindings[i].is_none() {
            if let Some(default_node) = arg.default_value {
                let ty = expr_types.type_of(default_node).expect("default value must carry a type");
                bindings[i] = Some(SmallVec::from_elem(
                    EffectiveArg {
                        node: default_node,
                        ty,
                        source: crate::preprocess::ArgSource::Direct,
                    },
                    1,
                ));
            }
        }
    }
    if let Some(splat_formal) = s {
        bindings[splat_formal].get_or_insert_with(SmallVec::new);
    }

    let missing: Vec<_> = def
        .args
        .iter()
        .enumerate()
        .filter(|(i, _)| bindings[*i].is_none())
        .map(|(_, a)| a.name)
        .collect();
    if !missing.is_empty() {
        return Err(MismatchReason::MissingArg(missing));
    }

    // Step 5: restriction check.
    let mut restricted_slots = 0usize;
    let mut total_restriction_distance = 0usize;
    for (i, arg) in def.args.iter().enumerate() {
        let Some(restriction) = arg.restriction else { continue };
        restricted_slots += 1;
        for actual in bindings[i].as_ref().unwrap() {
            if !types.compatible(actual.ty, restriction) {
                return Err(MismatchReason::RestrictionFailed {
                    slot: i,
                    actual: types.type_name(actual.ty),
                    restriction: types.type_name(restriction.0),
                });
            }
            total_restriction_distance =
                total_restriction_distance.saturating_add(restriction_distance(types, actual.ty, restriction.0));
        }
    }

    // Step 6: block compatibility.
    if def.has_block_arg != has_block {
        return Err(MismatchReason::BlockMismatch);
    }

    let splat_absorbed_count = s.and_then(|si| bindings[si].as_ref()).map(|v| v.len()).unwrap_or(0);

    let score = Specificity {
        restricted_slots,
        total_restriction_distance,
        has_splat: s.is_some(),
        splat_absorbed_count,
    };

    let bound: Vec<BoundArg> = bindings
        .into_iter()
        .enumerate()
        .map(|(formal_index, actuals)| BoundArg {
            formal_index,
            actuals: actuals.unwrap_or_default(),
        })
        .collect();

    Ok(MatchedCandidate { bindings: bound, score })
}
