use anyhow::{Context, Result};
use log::info;
use serde_json::{Map, Value as JsonValue};

use crate::{
    cli::PreviewArgs, csv_source::CsvReader, data::Value, io_utils, render, schema::Schema,
    source::DataReader,
};

pub fn execute(args: &PreviewArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let schema = args
        .schema
        .as_deref()
        .map(|path| {
            Schema::load(path).with_context(|| format!("Loading schema from {path:?}"))
        })
        .transpose()?;
    let mut reader = CsvReader::from_path(&args.input, schema.as_ref(), args.delimiter, encoding)?;
    let headers = reader.schema().headers();

    let mut rows = Vec::new();
    while rows.len() < args.rows && reader.read()? {
        rows.push(reader.current().to_vec());
    }

    if args.json {
        for row in &rows {
            println!("{}", row_to_json(&headers, row)?);
        }
    } else {
        print!("{}", render::render_values(&headers, &rows));
    }
    info!("Displayed {} row(s) from {:?}", rows.len(), args.input);
    Ok(())
}

fn row_to_json(headers: &[String], row: &[Option<Value>]) -> Result<String> {
    let object = headers
        .iter()
        .zip(row)
        .map(|(header, cell)| {
            let json = match cell {
                None => JsonValue::Null,
                Some(Value::String(s)) => JsonValue::String(s.clone()),
                Some(Value::Integer(i)) => JsonValue::from(*i),
                Some(Value::Float(f)) => JsonValue::from(*f),
                Some(Value::Boolean(b)) => JsonValue::Bool(*b),
                Some(other) => JsonValue::String(other.as_display()),
            };
            (header.clone(), json)
        })
        .collect::<Map<_, _>>();
    serde_json::to_string(&object).context("Serializing preview row")
}
