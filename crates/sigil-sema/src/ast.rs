//! The AST contract the matcher consumes.
//!
//! This is a closed sum over only the node kinds the overload matcher reads:
//! `Call`, `Def`, `Arg`, `NamedArg`, `Splat`, `TupleLiteral`, and leaf
//! literals. A real front end's grammar has many more node kinds (control
//! flow, literals beyond what restrictions need, etc.) — those are out of
//! scope and never reach this crate.
//!
//! `CallArg` is not an arena node kind; it's the element type of a resolved
//! `Call`'s positional argument list, carrying a splat-element index alongside
//! the `NodeId` it points at.

pub mod node;

pub use node::{Arg, AstArena, Call, CallArg, Def, DefId, Expr, Literal, NamedArg, NodeData, NodeId, Restriction};
