//! The type system boundary the matcher consults.
//!
//! `TypeRegistry` is a trait, not a concrete type: the real host compiler's
//! type checker implements it; this crate only calls through it. A small
//! in-memory reference implementation (`InMemoryTypeRegistry`) is provided so
//! the matcher/ranker/resolver can be unit- and property-tested without a
//! real front end.

use rustc_hash::FxHashMap;

use crate::ast::{NodeId, Restriction};

/// Opaque handle to a type, an `ArenaId`-style handle but owned by the type
/// registry rather than this crate — defs hold `TypeId`, never direct
/// pointers to types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Predicates the matcher needs from the type system.
pub trait TypeRegistry {
    /// Does `actual` satisfy `restriction`?
    fn compatible(&self, actual: TypeId, restriction: Restriction) -> bool;

    /// If `t` is a tuple type, its element types in order; `None` otherwise.
    fn tuple_elements(&self, t: TypeId) -> Option<Vec<TypeId>>;

    /// Strips a type alias down to its underlying type.
    fn remove_alias(&self, t: TypeId) -> TypeId;

    /// Is `t` a union type?
    fn is_union(&self, t: TypeId) -> bool;

    /// If `t` is a union, its member types; `None` for a non-union type.
    fn union_members(&self, t: TypeId) -> Option<Vec<TypeId>>;

    /// The type's own ancestor chain, nearest first, used to build a call's
    /// lookup list and to reconstruct `super`'s receiver chain.
    fn ancestors(&self, t: TypeId) -> Vec<TypeId>;

    /// A human-readable name for diagnostics.
    fn type_name(&self, t: TypeId) -> String;

    /// A restriction's own subtyping specificity, used by the ranker:
    /// `a` outranks `b` when `a` is a strict subtype of `b`.
    fn is_subtype_of(&self, a: TypeId, b: TypeId) -> bool;
}

/// The general type inference service this crate consumes but does not
/// implement, assumed available as an external service. The preprocessor
/// and matcher ask it for the static type of an argument expression already
/// produced by that service.
pub trait ExprTypes {
    fn type_of(&self, node: NodeId) -> Option<TypeId>;
}

/// A minimal nominal type registry for tests: named types with explicit
/// parent edges, tuple shapes, and unions, all pre-registered by the caller.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTypeRegistry {
    names: FxHashMap<TypeId, String>,
    parents: FxHashMap<TypeId, TypeId>,
    aliases: FxHashMap<TypeId, TypeId>,
    tuples: FxHashMap<TypeId, Vec<TypeId>>,
    unions: FxHashMap<TypeId, Vec<TypeId>>,
    next_id: u32,
}

impl InMemoryTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, name: &str) -> TypeId {
        let id = TypeId::new(self.next_id);
        self.next_id += 1;
        self.names.insert(id, name.to_string());
        id
    }

    pub fn declare_subtype_of(&mut self, name: &str, parent: TypeId) -> TypeId {
        let id = self.declare(name);
        self.parents.insert(id, parent);
        id
    }

    pub fn declare_alias(&mut self, name: &str, target: TypeId) -> TypeId {
        let id = self.declare(name);
        self.aliases.insert(id, target);
        id
    }

    pub fn declare_tuple(&mut self, elements: Vec<TypeId>) -> TypeId {
        let name = format!(
            "({})",
            elements
                .iter()
                .map(|e| self.names.get(e).cloned().unwrap_or_default())
                .collect::<Vec<_>>()
                .join(", ")
        );
        let id = self.declare(&name);
        self.tuples.insert(id, elements);
        id
    }

    pub fn declare_union(&mut self, members: Vec<TypeId>) -> TypeId {
        let name = members
            .iter()
            .map(|m| self.names.get(m).cloned().unwrap_or_default())
            .collect::<Vec<_>>()
            .join(" | ");
        let id = self.declare(&name);
        self.unions.insert(id, members);
        id
    }
}

impl TypeRegistry for InMemoryTypeRegistry {
    fn compatible(&self, actual: TypeId, restriction: Restriction) -> bool {
        let actual = self.remove_alias(actual);
        let restriction_ty = self.remove_alias(restriction.0);
        if let Some(members) = self.union_members(actual) {
            return members.iter().all(|m| self.compatible(*m, Restriction(restriction_ty)));
        }
        actual == restriction_ty || self.is_subtype_of(actual, restriction_ty)
    }

    fn tuple_elements(&self, t: TypeId) -> Option<Vec<TypeId>> {
        self.tuples.get(&self.remove_alias(t)).cloned()
    }

    fn remove_alias(&self, t: TypeId) -> TypeId {
        let mut current = t;
        while let Some(target) = self.aliases.get(&current) {
            current = *target;
        }
        current
    }

    fn is_union(&self, t: TypeId) -> bool {
        self.unions.contains_key(&self.remove_alias(t))
    }

    fn union_members(&self, t: TypeId) -> Option<Vec<TypeId>> {
        self.unions.get(&self.remove_alias(t)).cloned()
    }

    fn ancestors(&self, t: TypeId) -> Vec<TypeId> {
        let mut chain = Vec::new();
        let mut current = self.remove_alias(t);
        while let Some(parent) = self.parents.get(&current) {
            chain.push(*parent);
            current = *parent;
        }
        chain
    }

    fn type_name(&self, t: TypeId) -> String {
        self.names.get(&t).cloned().unwrap_or_else(|| format!("<type {}>", t.0))
    }

    fn is_subtype_of(&self, a: TypeId, b: TypeId) -> bool {
        let a = self.remove_alias(a);
        let b = self.remove_alias(b);
        if a == b {
            return false;
        }
        self.ancestors(a).contains(&b)
    }
}
