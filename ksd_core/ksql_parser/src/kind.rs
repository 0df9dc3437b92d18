use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatementKind {
    /// `CREATE TABLE ... AS SELECT`
    Ctas,
    /// `CREATE STREAM ... AS SELECT`
    Csas,
    CreateTable,
    CreateStream,
    Insert,
    /// Anything unclassified, e.g. `SET` or `DROP`.
    Other,
}

/// Object kind named in a `DROP` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DropKind {
    Table,
    Stream,
}

impl StatementKind {
    pub fn is_create_as_select(self) -> bool {
        matches!(self, StatementKind::Ctas | StatementKind::Csas)
    }

    pub fn is_create(self) -> bool {
        self.drop_kind().is_some()
    }

    pub fn is_insert(self) -> bool {
        self == StatementKind::Insert
    }

    /// Kinds that start a persistent query on the cluster.
    pub fn is_materialization(self) -> bool {
        self.is_create_as_select() || self.is_insert()
    }

    pub fn drop_kind(self) -> Option<DropKind> {
        match self {
            StatementKind::Ctas | StatementKind::CreateTable => Some(DropKind::Table),
            StatementKind::Csas | StatementKind::CreateStream => Some(DropKind::Stream),
            StatementKind::Insert | StatementKind::Other => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Ctas => "CTAS",
            StatementKind::Csas => "CSAS",
            StatementKind::CreateTable => "CREATE_TABLE",
            StatementKind::CreateStream => "CREATE_STREAM",
            StatementKind::Insert => "INSERT",
            StatementKind::Other => "OTHER",
        }
    }
}

impl Display for StatementKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DropKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DropKind::Table => "TABLE",
            DropKind::Stream => "STREAM",
        }
    }
}

impl Display for DropKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
