use crate::error::ScriptError;
use crate::object::KsqlObject;
use crate::parser::{classify, Classified};
use crate::splitter::split_statements;
use log::{debug, warn};
use serde::Serialize;
use std::collections::HashSet;

/// The classified statements of one script, in source order.
///
/// Built in two passes: every statement is classified first, so a malformed
/// statement fails the whole script, then each `INSERT INTO` takes the topic of
/// the first earlier object with the same name. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScriptModel {
    objects: Vec<KsqlObject>,
}

impl ScriptModel {
    /// Splits and classifies a whole script.
    pub fn parse(script: &str) -> Result<Self, ScriptError> {
        Self::from_statements(split_statements(script))
    }

    /// Builds the model from already split statements.
    pub fn from_statements<I, S>(statements: I) -> Result<Self, ScriptError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let classified = statements
            .into_iter()
            .map(|statement| classify(statement.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let objects = resolve_topics(classified);
        debug!("built script model with {} objects", objects.len());
        Ok(Self { objects })
    }

    pub fn objects(&self) -> &[KsqlObject] {
        &self.objects
    }

    pub fn iter(&self) -> impl Iterator<Item = &KsqlObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// First object, in source order, with the given (normalized) name.
    pub fn lookup(&self, name: &str) -> Option<&KsqlObject> {
        find_by_name(&self.objects, name)
    }

    /// Topics of all objects that have one, in source order.
    ///
    /// `unique` keeps the first occurrence of each topic; `sort` orders the
    /// result lexicographically.
    pub fn all_topics(&self, sort: bool, unique: bool) -> Vec<&str> {
        let topics = self.objects.iter().filter_map(KsqlObject::topic);
        let mut topics: Vec<&str> = if unique {
            dedup(topics)
        } else {
            topics.collect()
        };
        if sort {
            topics.sort_unstable();
        }
        topics
    }

    /// Query ids of all objects that have one, in source order.
    pub fn all_query_ids(&self) -> Vec<&str> {
        self.objects.iter().filter_map(KsqlObject::query_id).collect()
    }

    /// Distinct object names, in order of first appearance unless `sort` is set.
    pub fn all_names(&self, sort: bool) -> Vec<&str> {
        let mut names = dedup(self.objects.iter().filter_map(KsqlObject::name));
        if sort {
            names.sort_unstable();
        }
        names
    }

    /// Number of statements that start a persistent query.
    pub fn count_materializations(&self) -> usize {
        self.objects
            .iter()
            .filter(|obj| obj.kind().is_materialization())
            .count()
    }

    /// Teardown script for the model, one statement per object in source order.
    ///
    /// `INSERT INTO` becomes `TERMINATE <query_id>;` and every create becomes
    /// `DROP <TABLE|STREAM> IF EXISTS <name>;`. With `delete_topics`, drops of
    /// create-as-select objects also delete their topic. An `INSERT INTO`
    /// without a query id cannot be terminated by name and is skipped.
    pub fn drop_statements(&self, delete_topics: bool) -> Vec<String> {
        self.objects
            .iter()
            .filter_map(|obj| drop_statement(obj, delete_topics))
            .collect()
    }

    /// The serialized objects as a JSON array.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

impl<'a> IntoIterator for &'a ScriptModel {
    type Item = &'a KsqlObject;
    type IntoIter = std::slice::Iter<'a, KsqlObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}

fn resolve_topics(classified: Vec<Classified>) -> Vec<KsqlObject> {
    let mut resolved: Vec<KsqlObject> = Vec::with_capacity(classified.len());
    for entry in classified {
        let obj = match entry {
            Classified::Complete(obj) => obj,
            Classified::PendingTopic(obj) => {
                let topic = obj
                    .name()
                    .and_then(|name| find_by_name(&resolved, name))
                    .and_then(|target| target.topic())
                    .map(str::to_string);
                if topic.is_none() {
                    warn!("no topic resolved for `{obj}`; it is not declared earlier in the script");
                }
                obj.with_inherited_topic(topic)
            }
        };
        resolved.push(obj);
    }
    resolved
}

fn find_by_name<'a>(objects: &'a [KsqlObject], name: &str) -> Option<&'a KsqlObject> {
    objects.iter().find(|obj| obj.name() == Some(name))
}

fn dedup<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|value| seen.insert(*value)).collect()
}

fn drop_statement(obj: &KsqlObject, delete_topics: bool) -> Option<String> {
    let kind = obj.kind();
    if kind.is_insert() {
        return match obj.query_id() {
            Some(query_id) => Some(format!("TERMINATE {query_id};")),
            None => {
                warn!("`{obj}` has no QUERY_ID; it has to be terminated manually");
                None
            }
        };
    }

    let object = kind.drop_kind()?;
    let name = obj.name()?;
    let suffix = if delete_topics && kind.is_create_as_select() {
        " DELETE TOPIC"
    } else {
        ""
    };
    Some(format!("DROP {object} IF EXISTS {name}{suffix};"))
}
