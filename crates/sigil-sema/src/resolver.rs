//! Call resolver: orchestrates preprocessing, matching, and ranking for a
//! single call, then binds the winner back onto the call site.
//!
//! `#[tracing::instrument]` is avoided in favor of manually placed
//! `tracing::debug!`/`tracing::trace!` calls so exactly the fields that
//! matter for diagnosing a resolution — call name, argument count,
//! candidate count — show up in the trace, rather than blanket-instrumenting
//! every function.

use crate::ast::{AstArena, Call, CallArg, DefId};
use crate::config::ResolverOptions;
use crate::defs::DefTable;
use crate::error::resolve::ResolveError;
use crate::matcher::match_candidate;
use crate::preprocess::{preprocess, ArgSource, EffectiveArg};
use crate::rank::{rank, CandidateEval};
use crate::types::{ExprTypes, TypeId, TypeRegistry};

/// Turns a bound actual back into the call's canonicalized positional form,
/// keeping the splat-element index so a later reader can still tell "element
/// k of the splatted operand" apart from a directly-supplied argument.
fn canonicalize_arg(actual: &EffectiveArg) -> CallArg {
    match actual.source {
        ArgSource::Direct => CallArg::direct(actual.node),
        ArgSource::SplatElement { element_index, .. } => CallArg {
            node: actual.node,
            element_index: Some(element_index),
        },
    }
}

/// The call's resolution state machine. Transitions are monotonic; any step may instead terminate into `Failed`,
/// modeled here as the `Err` side of `resolve`'s `Result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    Unresolved,
    Preprocessed,
    Matched,
    Bound,
    Typed,
}

/// Resolves a single call against the defs visible from its receiver's type
/// chain. On success, `call.target_defs` and `call.resolved_type` are
/// populated and `call.args`/`call.named_args` are rewritten to the
/// canonicalized positional form.
#[allow(clippy::too_many_arguments)]
pub fn resolve(
    call: &mut Call,
    arena: &AstArena,
    defs: &DefTable,
    types: &dyn TypeRegistry,
    expr_types: &dyn ExprTypes,
    return_type_of: impl Fn(DefId) -> Option<TypeId>,
    options: ResolverOptions,
) -> Result<CallState, ResolveError> {
    tracing::debug!(name = %call.name, "resolving call");

    let Some(receiver) = call.receiver_type else {
        return Err(ResolveError::UndefinedMethod(call.name));
    };

    let lookup_list = defs.lookup_list(types, receiver, call.name);
    if lookup_list.is_empty() {
        tracing::debug!(name = %call.name, "no candidates visible from receiver's type chain");
        return Err(ResolveError::UndefinedMethod(call.name));
    }

    let effective = preprocess(arena, call, types, expr_types)?;
    tracing::trace!(name = %call.name, effective_args = effective.args.len(), "preprocessed");

    let arg_type_names: Vec<String> = effective.args.iter().map(|a| types.type_name(a.ty)).collect();

    let mut evals = Vec::with_capacity(lookup_list.len());
    for def_id in lookup_list {
        let def = defs.get(def_id).expect("def in lookup list must exist");
        let outcome = match_candidate(def, &effective, call.has_block, types, expr_types, options.max_splat_absorbed);
        if let Err(reason) = &outcome {
            tracing::debug!(name = %call.name, candidate = %def.signature(types), reason = %reason, "candidate rejected");
        }
        evals.push(CandidateEval { def_id, def, outcome });
    }
    tracing::trace!(name = %call.name, candidates = evals.len(), "matched");

    let resolved = rank(
        call.name,
        arg_type_names,
        evals,
        types,
        options.ambiguous_redefinition_wins_on_later_decl,
    )?;

    // Attach the winner and rewrite args into canonicalized positional
    // order (declaration order), clearing named_args.
    let winner_def = defs.get(resolved.def_id).expect("ranked def must exist");
    let mut canonical_args = Vec::with_capacity(winner_def.args.len());
    for bound in &resolved.matched.bindings {
        for actual in &bound.actuals {
            canonical_args.push(canonicalize_arg(actual));
        }
    }
    call.args = smallvec::SmallVec::from_vec(canonical_args);
    call.named_args.clear();
    call.target_defs = vec![resolved.def_id];

    // Bind the chosen def's return type to the call.
    call.resolved_type = return_type_of(resolved.def_id);

    tracing::debug!(name = %call.name, winner = %winner_def.signature(types), "resolved");

    Ok(CallState::Typed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Arg, Expr, Literal, NodeData, Restriction};
    use crate::ident::Ident;
    use crate::range::Range;
    use crate::types::InMemoryTypeRegistry;
    use std::collections::HashMap;

    struct MapExprTypes(HashMap<crate::ast::NodeId, TypeId>);
    impl ExprTypes for MapExprTypes {
        fn type_of(&self, node: crate::ast::NodeId) -> Option<TypeId> {
            self.0.get(&node).copied()
        }
    }

    #[test]
    fn test_undefined_method_when_lookup_list_empty() {
        let mut reg = InMemoryTypeRegistry::new();
        let receiver = reg.declare("Foo");
        let defs = DefTable::new();
        let expr_types = MapExprTypes(HashMap::new());
        let arena = AstArena::new(1);

        let mut call = Call::new("bar").with_receiver_type(receiver);
        let err = resolve(&mut call, &arena, &defs, &reg, &expr_types, |_| None, ResolverOptions::default()).unwrap_err();
        assert!(matches!(err, ResolveError::UndefinedMethod(_)));
    }

    #[test]
    fn test_resolve_binds_target_def_and_rewrites_args() {
        let mut reg = InMemoryTypeRegistry::new();
        let int32 = reg.declare("Int32");
        let receiver = reg.declare("Foo");

        let mut arena = AstArena::new(4);
        let arg_node = arena.alloc(NodeData {
            range: Range::default(),
            expr: Expr::Literal(Literal::Number(1.0)),
        });

        let mut defs = DefTable::new();
        let def_id = defs.insert(
            crate::ast::Def::new("bar", vec![Arg::new("a").with_restriction(Restriction(int32))]).with_owner(receiver),
        );

        let mut types = HashMap::new();
        types.insert(arg_node, int32);
        let expr_types = MapExprTypes(types);

        let mut call = Call::new("bar").with_receiver_type(receiver).with_args(vec![arg_node]);

        let state = resolve(&mut call, &arena, &defs, &reg, &expr_types, |id| if id == def_id { Some(int32) } else { None }, ResolverOptions::default())
            .unwrap();

        assert_eq!(state, CallState::Typed);
        assert_eq!(call.target_defs, vec![def_id]);
        assert_eq!(call.resolved_type, Some(int32));
        assert_eq!(call.args.len(), 1);
        assert_eq!(call.args[0].node, arg_node);
        assert_eq!(call.args[0].element_index, None);
        assert!(call.named_args.is_empty());
    }

    #[test]
    fn test_ambiguous_call_when_no_receiver_type() {
        let reg = InMemoryTypeRegistry::new();
        let defs = DefTable::new();
        let expr_types = MapExprTypes(HashMap::new());
        let arena = AstArena::new(1);

        let mut call = Call::new("bar");
        let err = resolve(&mut call, &arena, &defs, &reg, &expr_types, |_| None, ResolverOptions::default()).unwrap_err();
        assert!(matches!(err, ResolveError::UndefinedMethod(_)));
    }
}
