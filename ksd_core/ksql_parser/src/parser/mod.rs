mod properties;
mod scanner;

use crate::error::ScriptError;
use crate::kind::StatementKind;
use crate::object::KsqlObject;
use log::debug;
use scanner::{tokenize, Scanner};
use sqlparser::tokenizer::Token;

/// Result of classifying a single statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Complete(KsqlObject),
    /// An `INSERT INTO` whose topic comes from the object it writes into,
    /// resolved once the preceding statements are known.
    PendingTopic(KsqlObject),
}

impl Classified {
    pub fn into_object(self) -> KsqlObject {
        match self {
            Classified::Complete(obj) | Classified::PendingTopic(obj) => obj,
        }
    }
}

/// Parts of a statement a grammar captured.
struct Matched<'a> {
    name: String,
    with_clause: Option<&'a [Token]>,
}

type Grammar = for<'a> fn(&'a [Token]) -> Option<Matched<'a>>;

/// Grammars in priority order. The create-as-select forms go first so a
/// `CREATE ... AS SELECT` never reaches the plain create grammars.
const GRAMMARS: [(StatementKind, Grammar); 5] = [
    (StatementKind::Ctas, ctas),
    (StatementKind::Csas, csas),
    (StatementKind::CreateTable, create_table),
    (StatementKind::CreateStream, create_stream),
    (StatementKind::Insert, insert),
];

/// Classifies one normalized statement.
///
/// A statement no grammar fully matches, or one that does not lex, becomes
/// [`StatementKind::Other`]. A create statement whose `WITH` clause lacks
/// `KAFKA_TOPIC` is an error.
pub fn classify(statement: &str) -> Result<Classified, ScriptError> {
    let Some(tokens) = tokenize(statement) else {
        return Ok(Classified::Complete(KsqlObject::other()));
    };
    for (kind, grammar) in GRAMMARS {
        if let Some(matched) = grammar(&tokens) {
            debug!("classified {kind} `{}`", matched.name);
            return build(kind, matched, statement);
        }
    }
    debug!("unclassified statement `{statement}`");
    Ok(Classified::Complete(KsqlObject::other()))
}

fn build(
    kind: StatementKind,
    matched: Matched<'_>,
    statement: &str,
) -> Result<Classified, ScriptError> {
    if kind.is_insert() {
        let query_id = matched.with_clause.and_then(properties::query_id);
        let obj = KsqlObject::new(kind, Some(&matched.name), None, query_id);
        return Ok(Classified::PendingTopic(obj));
    }

    let topic = match matched.with_clause {
        Some(clause) => Some(
            properties::kafka_topic(clause)
                .ok_or_else(|| ScriptError::missing_topic(kind, statement))?,
        ),
        None => None,
    };
    Ok(Classified::Complete(KsqlObject::new(
        kind,
        Some(&matched.name),
        topic,
        None,
    )))
}

fn ctas(tokens: &[Token]) -> Option<Matched<'_>> {
    create_as_select(tokens, "TABLE")
}

fn csas(tokens: &[Token]) -> Option<Matched<'_>> {
    create_as_select(tokens, "STREAM")
}

fn create_table(tokens: &[Token]) -> Option<Matched<'_>> {
    plain_create(tokens, "TABLE")
}

fn create_stream(tokens: &[Token]) -> Option<Matched<'_>> {
    plain_create(tokens, "STREAM")
}

// CREATE [OR REPLACE] TABLE|STREAM [IF NOT EXISTS] name [WITH (...)] AS SELECT ...
fn create_as_select<'a>(tokens: &'a [Token], object: &str) -> Option<Matched<'a>> {
    let mut s = Scanner::new(tokens);
    if !s.parse_keyword("CREATE") {
        return None;
    }
    s.parse_keywords(&["OR", "REPLACE"]);
    if !s.parse_keyword(object) {
        return None;
    }
    s.parse_if_not_exists();
    let name = s.parse_object_name()?;
    let leading_with = s.parse_with_clause();
    if !s.parse_keywords(&["AS", "SELECT"]) || s.is_exhausted() {
        return None;
    }
    let with_clause = leading_with.or_else(|| s.trailing_with_clause());

    Some(Matched { name, with_clause })
}

// CREATE [OR REPLACE] [SOURCE] TABLE|STREAM [IF NOT EXISTS] name [(columns)] WITH (...)
fn plain_create<'a>(tokens: &'a [Token], object: &str) -> Option<Matched<'a>> {
    let mut s = Scanner::new(tokens);
    if !s.parse_keyword("CREATE") {
        return None;
    }
    s.parse_keywords(&["OR", "REPLACE"]);
    s.parse_keyword("SOURCE");
    if !s.parse_keyword(object) {
        return None;
    }
    s.parse_if_not_exists();
    let name = s.parse_object_name()?;
    s.parse_parenthesized();
    let with_clause = s.parse_with_clause()?;
    if !s.is_exhausted() {
        return None;
    }

    Some(Matched {
        name,
        with_clause: Some(with_clause),
    })
}

// INSERT INTO name [WITH (...)] SELECT ...
fn insert(tokens: &[Token]) -> Option<Matched<'_>> {
    let mut s = Scanner::new(tokens);
    if !s.parse_keywords(&["INSERT", "INTO"]) {
        return None;
    }
    let name = s.parse_object_name()?;
    let with_clause = s.parse_with_clause();
    if !s.parse_keyword("SELECT") || s.is_exhausted() {
        return None;
    }

    Some(Matched { name, with_clause })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn object(statement: &str) -> KsqlObject {
        classify(statement).unwrap().into_object()
    }

    #[test]
    fn plain_create_table_takes_topic_from_with_clause() {
        let obj = object(
            "CREATE TABLE FOO (ID INT) WITH (KAFKA_TOPIC='foo_topic', VALUE_FORMAT='JSON')",
        );
        assert_eq!(
            obj,
            KsqlObject::new(StatementKind::CreateTable, Some("FOO"), Some("foo_topic"), None)
        );
    }

    #[test]
    fn plain_create_accepts_optional_prefixes() {
        let obj = object(
            "create or replace source stream if not exists `Clicks` (id INT KEY, url STRING) \
             WITH (kafka_topic='clicks', value_format='AVRO')",
        );
        assert_eq!(obj.kind(), StatementKind::CreateStream);
        assert_eq!(obj.name(), Some("`Clicks`"));
        assert_eq!(obj.topic(), Some("clicks"));
    }

    #[test]
    fn plain_create_without_columns_relies_on_schema_inference() {
        let obj = object("CREATE STREAM pageviews WITH (KAFKA_TOPIC='pageviews', VALUE_FORMAT='AVRO')");
        assert_eq!(obj.kind(), StatementKind::CreateStream);
        assert_eq!(obj.name(), Some("PAGEVIEWS"));
    }

    #[test]
    fn create_as_select_with_leading_with_clause() {
        let obj = object(
            "CREATE OR REPLACE STREAM IF NOT EXISTS big_orders WITH (KAFKA_TOPIC='big') AS \
             SELECT * FROM orders WHERE amount > 100 EMIT CHANGES",
        );
        assert_eq!(
            obj,
            KsqlObject::new(StatementKind::Csas, Some("big_orders"), Some("big"), None)
        );
    }

    #[test]
    fn create_as_select_with_trailing_with_clause() {
        let obj = object("CREATE TABLE BAR AS SELECT * FROM FOO WITH (KAFKA_TOPIC='bar_topic')");
        assert_eq!(obj.kind(), StatementKind::Ctas);
        assert_eq!(obj.topic(), Some("bar_topic"));
    }

    #[test]
    fn create_as_select_without_with_clause_has_no_topic() {
        let obj = object("CREATE TABLE totals AS SELECT id, COUNT(*) FROM s GROUP BY id");
        assert_eq!(obj.kind(), StatementKind::Ctas);
        assert_eq!(obj.topic(), None);
    }

    #[test]
    fn insert_is_pending_topic_resolution() {
        let classified =
            classify("INSERT INTO bar WITH (QUERY_ID='INSERTQUERY_1') SELECT * FROM foo").unwrap();
        let Classified::PendingTopic(obj) = classified else {
            panic!("INSERT must wait for topic resolution");
        };
        assert_eq!(obj.name(), Some("BAR"));
        assert_eq!(obj.query_id(), Some("INSERTQUERY_1"));
        assert_eq!(obj.topic(), None);
    }

    #[test]
    fn insert_without_with_clause_has_no_query_id() {
        let obj = object("INSERT INTO bar SELECT * FROM foo");
        assert_eq!(obj.kind(), StatementKind::Insert);
        assert_eq!(obj.query_id(), None);
    }

    #[test]
    fn unrecognized_shapes_are_other() {
        for statement in [
            "SET 'auto.offset.reset'='earliest'",
            "DROP STREAM foo",
            "INSERT INTO foo VALUES (1, 'a')",
            "CREATE TABLE t AS SELECT",
            "CREATE TABLE t (id INT) WITH (KAFKA_TOPIC='t') EXTRA",
            "CREATE TYPE address AS STRUCT<street VARCHAR>",
            "CREATE TABLE t (id INT) WITH (KAFKA_TOPIC='t)",
        ] {
            assert_eq!(object(statement), KsqlObject::other(), "{statement}");
        }
    }

    #[test]
    fn plain_create_without_topic_fails() {
        let err = classify("CREATE STREAM S (ID INT) WITH (VALUE_FORMAT='JSON')").unwrap_err();
        assert!(matches!(
            err,
            ScriptError::MissingTopic {
                kind: StatementKind::CreateStream,
                ..
            }
        ));
    }

    #[test]
    fn create_as_select_with_clause_requires_topic() {
        let err = classify("CREATE TABLE t WITH (VALUE_FORMAT='JSON') AS SELECT * FROM s")
            .unwrap_err();
        assert!(matches!(
            err,
            ScriptError::MissingTopic {
                kind: StatementKind::Ctas,
                ..
            }
        ));
    }

    #[test]
    fn classification_is_idempotent() {
        let statement = "CREATE STREAM s WITH (KAFKA_TOPIC='s') AS SELECT * FROM t";
        assert_eq!(classify(statement).unwrap(), classify(statement).unwrap());
    }
}
