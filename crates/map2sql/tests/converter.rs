use map2sql::{
    ConvertError, Converter, DialectKind, Document, MySql, Schema, StatementKind, Value,
    document_from_json,
};
use serde_json::json;
use std::path::PathBuf;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/model.js")
}

fn converter(kind: DialectKind) -> Converter {
    Converter::open(fixture(), kind).unwrap()
}

fn diana() -> Document {
    document_from_json(json!({
        "name": "Diana",
        "age": 12,
        "birthday": "2018-02-01 12:34:56",
        "career": { "company": "flicker" }
    }))
    .unwrap()
}

const ORACLE_DATE: &str = "to_date('2018-02-01 12:34:56','yyyy-MM-dd hh24:mi:ss')";

#[test]
fn fixture_loads_with_comments() {
    let conv = converter(DialectKind::MySql);
    let tables: Vec<&str> = conv.schema().table_names().collect();
    assert_eq!(tables, ["FOOBAR", "EVENTS", "EMPTY"]);
}

#[test]
fn mysql_insert() {
    let sql = converter(DialectKind::MySql).insert("FOOBAR", &diana()).unwrap();
    assert_eq!(
        sql,
        "INSERT INTO FOOBAR (name,age,birthday,company) VALUES('Diana',12,'2018-02-01 12:34:56','flicker')"
    );
}

#[test]
fn oracle_insert() {
    let sql = converter(DialectKind::Oracle).insert("FOOBAR", &diana()).unwrap();
    assert_eq!(
        sql,
        format!(
            "INSERT INTO FOOBAR (name,age,birthday,company) VALUES('Diana',12,{ORACLE_DATE},'flicker')"
        )
    );
}

#[test]
fn mysql_update() {
    let sql = converter(DialectKind::MySql)
        .update("FOOBAR", "name", &diana())
        .unwrap();
    assert_eq!(
        sql,
        "UPDATE FOOBAR SET name='Diana',age=12,birthday='2018-02-01 12:34:56',company='flicker' WHERE name='Diana'"
    );
}

#[test]
fn oracle_update() {
    let sql = converter(DialectKind::Oracle)
        .update("FOOBAR", "name", &diana())
        .unwrap();
    assert_eq!(
        sql,
        format!(
            "UPDATE FOOBAR SET name='Diana',age=12,birthday={ORACLE_DATE},company='flicker' WHERE name='Diana'"
        )
    );
}

#[test]
fn delete_both_dialects() {
    for kind in [DialectKind::MySql, DialectKind::Oracle] {
        let sql = converter(kind).delete("FOOBAR", "name", &diana()).unwrap();
        assert_eq!(sql, "DELETE FROM FOOBAR WHERE name='Diana'");
    }
}

#[test]
fn dialects_differ_only_in_date_literal() {
    let doc = diana();
    let mysql = converter(DialectKind::MySql);
    let oracle = converter(DialectKind::Oracle);

    let a = mysql.insert("FOOBAR", &doc).unwrap();
    let b = oracle.insert("FOOBAR", &doc).unwrap();
    assert_ne!(a, b);
    assert_eq!(a.replace("'2018-02-01 12:34:56'", ORACLE_DATE), b);

    let a = mysql.update("FOOBAR", "age", &doc).unwrap();
    let b = oracle.update("FOOBAR", "age", &doc).unwrap();
    assert_eq!(a.replace("'2018-02-01 12:34:56'", ORACLE_DATE), b);
}

#[test]
fn flattened_document_matches_nested_document() {
    let flat = document_from_json(json!({
        "name": "Diana",
        "age": 12,
        "birthday": "2018-02-01 12:34:56",
        "career.company": "flicker"
    }))
    .unwrap();

    let conv = converter(DialectKind::MySql);
    assert_eq!(
        conv.insert("FOOBAR", &flat).unwrap(),
        conv.insert("FOOBAR", &diana()).unwrap()
    );
    assert_eq!(
        conv.update("FOOBAR", "name", &flat).unwrap(),
        conv.update("FOOBAR", "name", &diana()).unwrap()
    );
}

#[test]
fn nested_object_wins_over_dotted_key() {
    // With an object present, dotted keys in the outer document are not consulted.
    let doc = document_from_json(json!({
        "name": "Diana",
        "career": {},
        "career.company": "ignored"
    }))
    .unwrap();

    let sql = converter(DialectKind::MySql).insert("FOOBAR", &doc).unwrap();
    assert_eq!(sql, "INSERT INTO FOOBAR (name) VALUES('Diana')");
}

#[test]
fn deep_nesting_both_styles() {
    let conv = converter(DialectKind::MySql);

    let nested = document_from_json(json!({
        "id": 1,
        "meta": { "source": "feed", "geo": { "city": "Oslo" } }
    }))
    .unwrap();
    assert_eq!(
        conv.insert("EVENTS", &nested).unwrap(),
        "INSERT INTO EVENTS (event_id,source,city) VALUES(1,'feed','Oslo')"
    );

    let flat = document_from_json(json!({
        "id": 1,
        "meta.source": "feed",
        "meta.geo.city": "Oslo"
    }))
    .unwrap();
    assert_eq!(
        conv.insert("EVENTS", &flat).unwrap(),
        conv.insert("EVENTS", &nested).unwrap()
    );

    let mixed = document_from_json(json!({
        "id": 1,
        "meta.source": "feed",
        "meta.geo": { "city": "Oslo" }
    }))
    .unwrap();
    assert_eq!(
        conv.insert("EVENTS", &mixed).unwrap(),
        conv.insert("EVENTS", &nested).unwrap()
    );
}

#[test]
fn scalar_types_and_raw_passthrough() {
    let doc = document_from_json(json!({
        "id": 9_000_000_000i64,
        "title": "It's here",
        "homepage": "http://example.com/a'b",
        "ratio": 0.25,
        "active": true,
        "expr": "NOW()"
    }))
    .unwrap();

    let sql = converter(DialectKind::MySql).insert("EVENTS", &doc).unwrap();
    assert_eq!(
        sql,
        "INSERT INTO EVENTS (event_id,title,url,ratio,active,computed) \
         VALUES(9000000000,'It''s here','http://example.com/a''b',0.25,true,NOW())"
    );
}

#[test]
fn insert_column_and_value_counts_match() {
    let conv = converter(DialectKind::MySql);
    let docs = [
        json!({ "name": "a" }),
        json!({ "age": null, "career": { "company": null } }),
        json!({ "birthday": "2020-01-01 00:00:00", "career.company": "x" }),
    ];

    for doc in docs {
        let sql = conv.insert("FOOBAR", &document_from_json(doc).unwrap()).unwrap();
        let (cols, vals) = sql
            .trim_start_matches("INSERT INTO FOOBAR (")
            .split_once(") VALUES(")
            .unwrap();
        let vals = vals.trim_end_matches(')');
        assert_eq!(cols.split(',').count(), vals.split(',').count(), "{sql}");
    }
}

#[test]
fn insert_null_vs_absent() {
    let doc = document_from_json(json!({ "name": null, "career": { "company": "x" } })).unwrap();
    let conv = converter(DialectKind::MySql);

    assert_eq!(
        conv.insert("FOOBAR", &doc).unwrap(),
        "INSERT INTO FOOBAR (name,company) VALUES(NULL,'x')"
    );
}

#[test]
fn update_null_vs_absent() {
    let doc = document_from_json(json!({ "name": "Diana", "age": null })).unwrap();
    assert_eq!(
        converter(DialectKind::MySql)
            .update("FOOBAR", "name", &doc)
            .unwrap(),
        "UPDATE FOOBAR SET name='Diana',age=NULL,birthday=NULL,company=NULL WHERE name='Diana'"
    );
}

#[test]
fn insert_nothing() {
    let conv = converter(DialectKind::MySql);

    let err = conv.insert("FOOBAR", &Document::new()).unwrap_err();
    assert!(matches!(err, ConvertError::EmptyStatement(StatementKind::Insert)));
    assert_eq!(err.to_string(), "Nothing to INSERT");

    let unrelated = document_from_json(json!({ "nickname": "D" })).unwrap();
    assert!(conv.insert("FOOBAR", &unrelated).unwrap_err().is_empty_statement());

    assert!(conv.insert("EMPTY", &diana()).unwrap_err().is_empty_statement());
}

#[test]
fn update_empty_schema() {
    let doc = document_from_json(json!({ "id": 1 })).unwrap();
    let err = converter(DialectKind::MySql)
        .update("EMPTY", "id", &doc)
        .unwrap_err();
    assert!(matches!(err, ConvertError::EmptyStatement(StatementKind::Update)));
}

#[test]
fn query_key_errors() {
    let conv = converter(DialectKind::MySql);

    // absent from the document
    let doc = document_from_json(json!({ "age": 3 })).unwrap();
    assert!(matches!(
        conv.update("FOOBAR", "name", &doc),
        Err(ConvertError::MissingQueryKey(_))
    ));
    assert!(matches!(
        conv.delete("FOOBAR", "name", &doc),
        Err(ConvertError::MissingQueryKey(_))
    ));

    // present in the document, absent from the schema
    let doc = document_from_json(json!({ "name": "Diana", "uid": 3 })).unwrap();
    assert!(matches!(
        conv.update("FOOBAR", "uid", &doc),
        Err(ConvertError::UnknownQueryKey(_))
    ));
    assert!(matches!(
        conv.delete("FOOBAR", "uid", &doc),
        Err(ConvertError::UnknownQueryKey(_))
    ));
}

#[test]
fn type_mismatch_aborts_insert_and_update() {
    let doc = document_from_json(json!({ "name": "Diana", "career": "flicker" })).unwrap();
    let conv = converter(DialectKind::MySql);

    let err = conv.insert("FOOBAR", &doc).unwrap_err();
    assert!(err.is_type_mismatch());
    assert_eq!(
        err.to_string(),
        "Type mismatch at 'career': expected an object, found string"
    );

    assert!(conv.update("FOOBAR", "name", &doc).unwrap_err().is_type_mismatch());
}

#[test]
fn unknown_table() {
    let conv = converter(DialectKind::MySql);
    assert!(matches!(
        conv.insert("NOPE", &diana()),
        Err(ConvertError::UnknownTable(t)) if t == "NOPE"
    ));
}

#[test]
fn unsupported_value_is_skipped() {
    let doc = document_from_json(json!({ "name": "Diana", "age": [1, 2] })).unwrap();
    let sql = converter(DialectKind::MySql).insert("FOOBAR", &doc).unwrap();
    assert_eq!(sql, "INSERT INTO FOOBAR (name) VALUES('Diana')");
}

#[test]
fn missing_schema_file() {
    let err = Converter::open("does/not/exist.js", DialectKind::MySql).unwrap_err();
    assert!(matches!(err, ConvertError::Config(_)));
}

#[test]
fn in_memory_schema_and_custom_doc() {
    let schema: Schema = r#"{ "t": { "k": "key,string", "v": "val,int" } }"#.parse().unwrap();
    let conv = Converter::new(schema, MySql);

    let mut doc = Document::new();
    doc.insert("k".into(), Value::from("a'b"));
    doc.insert("v".into(), Value::from(Some(5i64)));

    assert_eq!(
        conv.insert("t", &doc).unwrap(),
        "INSERT INTO t (key,val) VALUES('a''b',5)"
    );
    assert_eq!(
        conv.update("t", "k", &doc).unwrap(),
        "UPDATE t SET key='a''b',val=5 WHERE key='a''b'"
    );
}

#[test]
fn shared_across_threads() {
    let conv = converter(DialectKind::Oracle);
    let doc = diana();
    let expected = conv.insert("FOOBAR", &doc).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| conv.insert("FOOBAR", &doc).unwrap()))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}
