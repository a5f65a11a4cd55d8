use smallvec::SmallVec;

use crate::arena::{Arena, ArenaId};
use crate::ident::Ident;
use crate::range::Range;
use crate::types::TypeId;

/// Handle into an [`AstArena`], the same `ArenaId<T>` pattern
/// (`crate::arena`) applied to argument expressions instead of a full
/// language AST.
pub type NodeId = ArenaId<NodeData>;

/// The argument-expression arena a `Call`'s positional/named arguments index
/// into. Owned by whoever constructs the call site; the matcher only reads
/// from it.
pub type AstArena = Arena<NodeData>;

#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub range: Range,
    pub expr: Expr,
}

/// A type restriction on a formal parameter.
///
/// Kept as a thin wrapper around a registry `TypeId` rather than a rich
/// expression language — restriction *satisfaction* is delegated entirely to
/// `TypeRegistry::compatible`, so the matcher never needs to interpret the
/// shape of a restriction itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Restriction(pub TypeId);

/// An expression that can appear as a call argument, a default value, or the
/// operand of a `Splat`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    /// Reference to a variable or parameter already bound in scope.
    Ident(Ident),
    /// `*expr` — a call-site splat. The wrapped node must have a tuple type
    /// at resolution time, verified by the preprocessor.
    Splat(NodeId),
    /// A literal tuple expression, e.g. `{1, 2}`.
    TupleLiteral(SmallVec<[NodeId; 4]>),
    /// A nested call used as an argument expression (its own target_defs are
    /// resolved independently; only its static/declared type matters here).
    Call(Box<Call>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
    Bool(bool),
    None,
}

/// A formal parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    pub name: Ident,
    pub default_value: Option<NodeId>,
    pub restriction: Option<Restriction>,
}

impl Arg {
    pub fn new(name: &str) -> Self {
        Self {
            name: Ident::new(name),
            default_value: None,
            restriction: None,
        }
    }

    pub fn with_restriction(mut self, restriction: Restriction) -> Self {
        self.restriction = Some(restriction);
        self
    }

    pub fn with_default(mut self, default_value: NodeId) -> Self {
        self.default_value = Some(default_value);
        self
    }
}

/// Handle to a `Def`, shared by zero or more `Call`s. Defs themselves are
/// produced by an earlier declaration pass external to this crate;
/// `DefTable` (`crate::defs`) is a reference in-memory store for tests,
/// analogous to `InMemoryTypeRegistry`.
pub type DefId = ArenaId<Def>;

/// A method definition.
///
/// Invariant: `splat_index`, when present, is a valid index into `args`; at
/// most one splat per def. Default values are only ever attached to an `Arg`
/// that precedes the splat — callers that build a `Def` violating this are
/// misusing the type, not something the matcher re-validates at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct Def {
    pub name: Ident,
    pub args: SmallVec<[Arg; 4]>,
    pub splat_index: Option<usize>,
    pub has_block_arg: bool,
    pub return_type: Option<Restriction>,
    pub owner: Option<TypeId>,
}

impl Def {
    pub fn new(name: &str, args: impl IntoIterator<Item = Arg>) -> Self {
        Self {
            name: Ident::new(name),
            args: args.into_iter().collect(),
            splat_index: None,
            has_block_arg: false,
            return_type: None,
            owner: None,
        }
    }

    pub fn with_splat(mut self, index: usize) -> Self {
        self.splat_index = Some(index);
        self
    }

    pub fn with_block_arg(mut self) -> Self {
        self.has_block_arg = true;
        self
    }

    pub fn with_owner(mut self, owner: TypeId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// A human-readable signature for diagnostics, e.g. `foo(Int32, *Int32)`.
    pub fn signature(&self, registry: &dyn crate::types::TypeRegistry) -> String {
        let mut parts = Vec::with_capacity(self.args.len());
        for (i, arg) in self.args.iter().enumerate() {
            let mut part = String::new();
            if self.splat_index == Some(i) {
                part.push('*');
            }
            if let Some(restriction) = arg.restriction {
                part.push_str(&registry.type_name(restriction.0));
            } else {
                part.push_str(&arg.name.to_string());
            }
            parts.push(part);
        }
        format!("{}({})", self.name, parts.join(", "))
    }
}

/// One (name, expression) pair supplied at a call site.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedArg {
    pub name: Ident,
    pub value: NodeId,
}

/// One slot of a call's canonicalized positional argument list.
///
/// `element_index` is `None` for a directly-supplied argument and
/// `Some(k)` when this slot was bound from element `k` of a call-site
/// splat's tuple operand — `node` still points at the whole splatted
/// expression in that case, so codegen reads "element `k` of `node`"
/// rather than mistaking the slot for the tuple itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallArg {
    pub node: NodeId,
    pub element_index: Option<usize>,
}

impl CallArg {
    pub const fn direct(node: NodeId) -> Self {
        Self { node, element_index: None }
    }
}

impl From<NodeId> for CallArg {
    fn from(node: NodeId) -> Self {
        Self::direct(node)
    }
}

/// A call site.
///
/// `target_defs` and `resolved_type` start empty/`None` (state `Unresolved`)
/// and are filled in exactly once, atomically, by the call resolver — no
/// other field of a resolved call changes afterward except
/// `args`/`named_args`, rewritten in the same step.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub receiver_type: Option<TypeId>,
    pub name: Ident,
    pub args: SmallVec<[CallArg; 4]>,
    pub named_args: Vec<NamedArg>,
    pub has_block: bool,
    pub range: Range,
    pub target_defs: Vec<DefId>,
    pub resolved_type: Option<TypeId>,
}

impl Call {
    pub fn new(name: &str) -> Self {
        Self {
            receiver_type: None,
            name: Ident::new(name),
            args: SmallVec::new(),
            named_args: Vec::new(),
            has_block: false,
            range: Range::default(),
            target_defs: Vec::new(),
            resolved_type: None,
        }
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = NodeId>) -> Self {
        self.args = args.into_iter().map(CallArg::direct).collect();
        self
    }

    pub fn with_named_arg(mut self, name: &str, value: NodeId) -> Self {
        self.named_args.push(NamedArg {
            name: Ident::new(name),
            value,
        });
        self
    }

    pub fn with_receiver_type(mut self, receiver_type: TypeId) -> Self {
        self.receiver_type = Some(receiver_type);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_def_builder() {
        let def = Def::new("foo", vec![Arg::new("a"), Arg::new("b")]).with_splat(1);
        assert_eq!(def.args.len(), 2);
        assert_eq!(def.splat_index, Some(1));
    }

    #[test]
    fn test_call_builder() {
        let mut arena = AstArena::new(4);
        let a0 = arena.alloc(NodeData {
            range: Range::default(),
            expr: Expr::Literal(Literal::Number(1.0)),
        });
        let call = Call::new("foo").with_args(vec![a0]);
        assert_eq!(call.args.len(), 1);
        assert_eq!(call.name, Ident::new("foo"));
    }
}
