//! Parses ksqlDB deployment scripts into an ordered object model.
//!
//! A script is split into statements, each statement is classified
//! ([`StatementKind`]) and its name, backing topic and query id are extracted
//! into a [`KsqlObject`]. [`ScriptModel`] keeps the objects in source order,
//! lets `INSERT INTO` statements inherit the topic of the object they write
//! into, and derives the lists and teardown statements used when deploying or
//! removing the script.

pub mod error;
pub mod kind;
pub mod object;
pub mod parser;
pub mod project;
pub mod script;
pub mod splitter;

pub use error::ScriptError;
pub use kind::{DropKind, StatementKind};
pub use object::KsqlObject;
pub use parser::{classify, Classified};
pub use project::ProjectScript;
pub use script::ScriptModel;
pub use splitter::split_statements;
