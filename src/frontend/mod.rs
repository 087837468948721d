//! Frontend: semantic-model snapshots, constant folding and the literal rule
//!
//! The compiler that produced the snapshot has already parsed and bound the
//! source; this module only consumes the slice of its semantic model the rule
//! needs (field declarations and their initializer expressions).

pub mod analysis;
pub mod const_eval;
pub mod model;
