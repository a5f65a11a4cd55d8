//! Argument preprocessor: expands call-site splats into an effective
//! argument vector and screens named arguments for call-site duplicates.

use smallvec::SmallVec;

use crate::ast::{AstArena, Call, Expr, NodeId};
use crate::error::resolve::ResolveError;
use crate::ident::Ident;
use crate::types::{ExprTypes, TypeId, TypeRegistry};

/// One slot of the effective argument vector built from a call's positional
/// and splat-expanded arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveArg {
    pub node: NodeId,
    pub ty: TypeId,
    pub source: ArgSource,
}

/// Where an effective argument came from, so downstream codegen can still
/// read "element k of the operand tuple" for splat-expanded slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgSource {
    Direct,
    SplatElement { splat_operand: NodeId, element_index: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveNamedArg {
    pub name: Ident,
    pub value: EffectiveArg,
}

/// Output of preprocessing a call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Effective {
    pub args: SmallVec<[EffectiveArg; 4]>,
    pub named_args: Vec<EffectiveNamedArg>,
}

pub fn preprocess(
    arena: &AstArena,
    call: &Call,
    types: &dyn TypeRegistry,
    expr_types: &dyn ExprTypes,
) -> Result<Effective, ResolveError> {
    let mut args = SmallVec::new();

    for (slot, call_arg) in call.args.iter().enumerate() {
        let node = call_arg.node;
        let data = arena.get(node).expect("call argument must live in the arena");
        match &data.expr {
            Expr::Splat(operand) => {
                let operand_ty = expr_types
                    .type_of(*operand)
                    .expect("splatted operand must already carry a type");
                let resolved = types.remove_alias(operand_ty);

                if let Some(elements) = types.tuple_elements(resolved) {
                    for (element_index, element_ty) in elements.into_iter().enumerate() {
                        args.push(EffectiveArg {
                            node: *operand,
                            ty: element_ty,
                            source: ArgSource::SplatElement {
                                splat_operand: *operand,
                                element_index,
                            },
                        });
                    }
                } else if types.is_union(resolved) {
                    return Err(ResolveError::SplatUnion {
                        actual_type: types.type_name(resolved),
                    });
                } else {
                    return Err(ResolveError::NotATuple {
                        slot,
                        actual_type: types.type_name(resolved),
                    });
                }
            }
            _ => {
                let ty = expr_types.type_of(node).expect("argument must already carry a type");
                args.push(EffectiveArg {
                    node,
                    ty,
                    source: ArgSource::Direct,
                });
            }
        }
    }

    let mut seen = rustc_hash::FxHashSet::default();
    let mut named_args = Vec::with_capacity(call.named_args.len());
    for named in &call.named_args {
        if !seen.insert(named.name) {
            return Err(ResolveError::NamedArgDuplicate(named.name));
        }
        let ty = expr_types
            .type_of(named.value)
            .expect("named argument value must already carry a type");
        named_args.push(EffectiveNamedArg {
            name: named.name,
            value: EffectiveArg {
                node: named.value,
                ty,
                source: ArgSource::Direct,
            },
        });
    }

    Ok(Effective { args, named_args })
}
