//! Basic usage: load a schema and print the three statement kinds for one
//! document in both dialects.
//!
//! Run with: `cargo run --example basic -p map2sql`

use map2sql::{ConvertResult, Converter, DialectKind, Schema, document_from_json};

const SCHEMA: &str = r#"
{
    // people table
    "FOOBAR": {
        "name": "name,string",
        "age": "age,int",
        "birthday": "birthday,DATE",
        "career": {
            "company": "company,string"
        }
    }
}
"#;

fn main() -> ConvertResult<()> {
    let doc = document_from_json(serde_json::json!({
        "name": "Diana",
        "age": 12,
        "birthday": "2018-02-01 12:34:56",
        "career": { "company": "flicker" }
    }))?;

    for kind in [DialectKind::MySql, DialectKind::Oracle] {
        let schema: Schema = SCHEMA.parse()?;
        let conv = Converter::with_kind(schema, kind);

        println!("-- {kind}");
        println!("{};", conv.insert("FOOBAR", &doc)?);
        println!("{};", conv.update("FOOBAR", "name", &doc)?);
        println!("{};", conv.delete("FOOBAR", "name", &doc)?);
    }

    Ok(())
}
