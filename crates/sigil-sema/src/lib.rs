//! Overload resolution core for a statically typed, object-oriented
//! language in the Ruby/Crystal family.
//!
//! This crate decides, at each call site, which method definition(s) a call
//! binds to: it matches a call's positional and named arguments against a
//! name's visible overloads, handling variadic ("splat") parameters, type
//! restrictions, named arguments, default values, and call-site splatting of
//! tuple-typed expressions, then ranks the matches by specificity.
//!
//! Parsing, code generation, and general type inference are external
//! collaborators; this crate only defines the trait boundary
//! ([`types::TypeRegistry`], [`types::ExprTypes`]) those collaborators
//! implement against, and the [`ast`] node shapes they must hand it.
//!
//! ## Example
//!
//! ```
//! use sigil_sema::ast::{AstArena, Arg, Call, Def, Expr, Literal, NodeData, Restriction};
//! use sigil_sema::config::ResolverOptions;
//! use sigil_sema::defs::DefTable;
//! use sigil_sema::range::Range;
//! use sigil_sema::types::{ExprTypes, InMemoryTypeRegistry, TypeId};
//! use std::collections::HashMap;
//!
//! struct Types(HashMap<sigil_sema::ast::NodeId, TypeId>);
//! impl ExprTypes for Types {
//!     fn type_of(&self, node: sigil_sema::ast::NodeId) -> Option<TypeId> {
//!         self.0.get(&node).copied()
//!     }
//! }
//!
//! let mut registry = InMemoryTypeRegistry::new();
//! let int32 = registry.declare("Int32");
//! let receiver = registry.declare("TopLevel");
//!
//! let mut arena = AstArena::new(4);
//! let one = arena.alloc(NodeData { range: Range::default(), expr: Expr::Literal(Literal::Number(1.0)) });
//!
//! let mut defs = DefTable::new();
//! defs.insert(Def::new("double", vec![Arg::new("x").with_restriction(Restriction(int32))]).with_owner(receiver));
//!
//! let mut types = HashMap::new();
//! types.insert(one, int32);
//! let expr_types = Types(types);
//!
//! let mut call = Call::new("double").with_receiver_type(receiver).with_args(vec![one]);
//!
//! let state = sigil_sema::resolver::resolve(
//!     &mut call,
//!     &arena,
//!     &defs,
//!     &registry,
//!     &expr_types,
//!     |_| Some(int32),
//!     ResolverOptions::default(),
//! ).unwrap();
//!
//! assert_eq!(state, sigil_sema::resolver::CallState::Typed);
//! assert_eq!(call.resolved_type, Some(int32));
//! ```

pub mod arena;
pub mod ast;
pub mod config;
pub mod defs;
pub mod error;
pub mod ident;
pub mod matcher;
pub mod partition;
pub mod preprocess;
pub mod rank;
pub mod range;
pub mod resolver;
pub mod types;

pub use arena::{Arena, ArenaId};
pub use config::ResolverOptions;
pub use defs::DefTable;
pub use error::Error;
pub use error::resolve::ResolveError;
pub use ident::Ident;
pub use range::{Position, Range};
pub use resolver::{resolve, CallState};
pub use types::{InMemoryTypeRegistry, TypeId, TypeRegistry};
