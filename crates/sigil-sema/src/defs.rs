//! Def storage and lookup-list construction: a type's own defs are tried
//! before inherited ones of the same name, though every def that bears the
//! name still enters ranking together (priority only orders the lookup
//! list, never narrows eligibility).

use crate::arena::{Arena, ArenaId};
use crate::ast::{Def, DefId};
use crate::ident::Ident;
use crate::types::TypeRegistry;

/// A reference in-memory store of `Def`s, analogous to `InMemoryTypeRegistry`.
/// A real host compiler's declaration pass owns its own storage and only
/// needs to hand the matcher a `&[&Def]` lookup list; this type exists to
/// make that convenient in tests.
#[derive(Debug, Clone)]
pub struct DefTable {
    arena: Arena<Def>,
}

impl DefTable {
    pub fn new() -> Self {
        Self { arena: Arena::new(16) }
    }

    pub fn insert(&mut self, def: Def) -> DefId {
        self.arena.alloc(def)
    }

    pub fn get(&self, id: DefId) -> Option<&Def> {
        self.arena.get(id)
    }

    /// Builds the lookup list for `name` visible from `receiver`'s type
    /// chain: `receiver`'s own defs first (in declaration order), then each
    /// ancestor's defs nearest-first.
    pub fn lookup_list(&self, types: &dyn TypeRegistry, receiver: crate::types::TypeId, name: Ident) -> Vec<DefId> {
        let mut chain = vec![receiver];
        chain.extend(types.ancestors(receiver));

        let mut result = Vec::new();
        for owner in chain {
            for (index, def) in self.iter() {
                if def.owner == Some(owner) && def.name == name {
                    result.push(index);
                }
            }
        }
        result
    }

    fn iter(&self) -> impl Iterator<Item = (DefId, &Def)> {
        (0..self.arena.len()).map(move |i| {
            let id = ArenaId::new(i as u32);
            (id, self.arena.get(id).unwrap())
        })
    }
}
