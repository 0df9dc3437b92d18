use crate::kind::StatementKind;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Metadata extracted from one script statement.
///
/// Serializes to `{"type", "name", "topic", "query_id"}` with `null` for
/// unset fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KsqlObject {
    #[serde(rename = "type")]
    kind: StatementKind,
    name: Option<String>,
    topic: Option<String>,
    query_id: Option<String>,
}

impl KsqlObject {
    /// Builds an object, normalizing `name`: backtick-quoted identifiers are kept
    /// verbatim, anything else is upper-cased.
    ///
    /// A plain `CREATE TABLE`/`CREATE STREAM` given no topic uses its name as
    /// the topic.
    pub fn new(
        kind: StatementKind,
        name: Option<&str>,
        topic: Option<&str>,
        query_id: Option<&str>,
    ) -> Self {
        let name = name.filter(|n| !n.is_empty());
        let topic = match topic {
            Some(topic) => Some(topic.to_string()),
            None if matches!(
                kind,
                StatementKind::CreateTable | StatementKind::CreateStream
            ) =>
            {
                name.map(str::to_string)
            }
            None => None,
        };

        Self {
            kind,
            name: name.map(normalize_name),
            topic,
            query_id: query_id.map(str::to_string),
        }
    }

    /// An unclassified statement, carrying no metadata.
    pub fn other() -> Self {
        Self::new(StatementKind::Other, None, None, None)
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn query_id(&self) -> Option<&str> {
        self.query_id.as_deref()
    }

    /// Topic inherited by an `INSERT INTO` from the object it writes into.
    pub(crate) fn with_inherited_topic(self, topic: Option<String>) -> Self {
        debug_assert!(self.kind.is_insert());
        Self { topic, ..self }
    }
}

fn normalize_name(raw: &str) -> String {
    if raw.starts_with('`') && raw.ends_with('`') {
        raw.to_string()
    } else {
        raw.to_uppercase()
    }
}

impl Display for KsqlObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = self.name().unwrap_or_default();
        match (self.kind, self.kind.drop_kind()) {
            (StatementKind::Insert, _) => write!(f, "INSERT INTO {name}"),
            (kind, Some(object)) if kind.is_create_as_select() => {
                write!(f, "CREATE {object} {name} AS SELECT")
            }
            (_, Some(object)) => write!(f, "CREATE {object} {name}"),
            (kind, None) => write!(f, "{kind}"),
        }
    }
}
