use ksql_parser::{ProjectScript, ScriptError, ScriptModel, StatementKind};
use pretty_assertions::assert_eq;
use test_utils::{write_project, ORDERS_SCRIPT};

fn orders_model() -> ScriptModel {
    logging::init_logger();
    ScriptModel::parse(ORDERS_SCRIPT).expect("orders script parses")
}

#[test]
fn classifies_every_statement_in_order() {
    let model = orders_model();

    let summary: Vec<(StatementKind, Option<&str>, Option<&str>)> = model
        .iter()
        .map(|obj| (obj.kind(), obj.name(), obj.topic()))
        .collect();

    assert_eq!(
        summary,
        vec![
            (StatementKind::Other, None, None),
            (StatementKind::CreateStream, Some("ORDERS_RAW"), Some("orders")),
            (StatementKind::CreateTable, Some("CUSTOMERS"), Some("customers")),
            (StatementKind::Csas, Some("ORDERS_ENRICHED"), Some("orders_enriched")),
            (StatementKind::Ctas, Some("ORDER_TOTALS"), Some("order_totals")),
            (StatementKind::Insert, Some("ORDERS_ENRICHED"), Some("orders_enriched")),
        ]
    );
}

#[test]
fn derived_listings() {
    let model = orders_model();

    assert_eq!(
        model.all_topics(false, false),
        vec!["orders", "customers", "orders_enriched", "order_totals", "orders_enriched"]
    );
    assert_eq!(model.all_query_ids(), vec!["INSERTQUERY_LEGACY"]);
    assert_eq!(
        model.all_names(true),
        vec!["CUSTOMERS", "ORDERS_ENRICHED", "ORDERS_RAW", "ORDER_TOTALS"]
    );
    assert_eq!(model.count_materializations(), 3);
}

#[test]
fn lookup_returns_first_declaration() {
    let model = orders_model();

    let found = model.lookup("ORDERS_ENRICHED").expect("declared");
    assert_eq!(found.kind(), StatementKind::Csas);
    assert_eq!(found.to_string(), "CREATE STREAM ORDERS_ENRICHED AS SELECT");
    assert!(model.lookup("orders_enriched").is_none());
    assert!(model.lookup("MISSING").is_none());
}

#[test]
fn teardown_follows_source_order() {
    let model = orders_model();

    assert_eq!(
        model.drop_statements(true),
        vec![
            "DROP STREAM IF EXISTS ORDERS_RAW;",
            "DROP TABLE IF EXISTS CUSTOMERS;",
            "DROP STREAM IF EXISTS ORDERS_ENRICHED DELETE TOPIC;",
            "DROP TABLE IF EXISTS ORDER_TOTALS DELETE TOPIC;",
            "TERMINATE INSERTQUERY_LEGACY;",
        ]
    );
}

#[test]
fn reparsing_yields_an_equal_model() {
    assert_eq!(orders_model(), orders_model());
}

#[test]
fn model_is_shareable_across_threads() {
    let model = std::sync::Arc::new(orders_model());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let model = model.clone();
            std::thread::spawn(move || model.count_materializations())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 3);
    }
}

#[test]
fn missing_topic_aborts_the_parse() {
    let script = "CREATE STREAM ok (id INT) WITH (KAFKA_TOPIC='ok');\n\
                  CREATE STREAM S (ID INT) WITH (VALUE_FORMAT='JSON');";
    match ScriptModel::parse(script) {
        Err(ScriptError::MissingTopic { kind, .. }) => assert_eq!(kind, StatementKind::CreateStream),
        other => panic!("expected a missing topic error, got {other:?}"),
    }
}

#[test]
fn project_applies_configured_options() {
    let dir = tempfile::tempdir().unwrap();
    write_project(
        dir.path(),
        "name: orders\n\
         script: ksql/orders.ksql\n\
         teardown:\n  delete_topics: false\n\
         topics:\n  sort: true\n  unique: true\n",
        Some(("ksql/orders.ksql", ORDERS_SCRIPT)),
    );

    let project = ProjectScript::from_config_dir(Some(dir.path().to_path_buf())).unwrap();

    assert_eq!(project.config().name, "orders");
    assert_eq!(
        project.topics(),
        vec!["customers", "order_totals", "orders", "orders_enriched"]
    );
    assert_eq!(project.teardown()[2], "DROP STREAM IF EXISTS ORDERS_ENRICHED;");
    assert_eq!(project.model().len(), 6);
}

#[test]
fn project_with_missing_script_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path(), "name: orders\nscript: nowhere.ksql\n", None);

    let err = ProjectScript::from_config_dir(Some(dir.path().to_path_buf())).unwrap_err();
    assert!(matches!(err, ScriptError::Io { .. }));
}

#[test]
fn project_without_config_is_config_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = ProjectScript::from_config_dir(Some(dir.path().to_path_buf())).unwrap_err();
    assert!(matches!(err, ScriptError::Config { .. }));
}

#[test]
fn objects_serialize_in_source_order() {
    let model = ScriptModel::parse(
        "CREATE TABLE BAR AS SELECT * FROM FOO WITH (KAFKA_TOPIC='bar_topic');\n\
         INSERT INTO BAR WITH (QUERY_ID='INSERTQUERY_1') SELECT * FROM FOO;",
    )
    .unwrap();

    assert_eq!(
        model.to_json().unwrap(),
        serde_json::json!([
            {"type": "CTAS", "name": "BAR", "topic": "bar_topic", "query_id": null},
            {"type": "INSERT", "name": "BAR", "topic": "bar_topic", "query_id": "INSERTQUERY_1"}
        ])
    );
}
