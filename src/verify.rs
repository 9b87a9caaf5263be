use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::VerifyArgs, csv_source::CsvReader, io_utils, options::BindOptions, schema::Schema,
    source::DataReader,
};

pub fn execute(args: &VerifyArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let schema = Schema::load(&args.schema)
        .with_context(|| format!("Loading schema from {:?}", args.schema))?;
    let options = match &args.options {
        Some(path) => BindOptions::load(path)?,
        None => BindOptions::default(),
    };
    let mut reader = CsvReader::from_path(&args.input, Some(&schema), args.delimiter, encoding)?
        .with_locale(options.locale);

    let mut rows = 0usize;
    let mut nulls = 0usize;
    while reader
        .read()
        .with_context(|| format!("Verifying {:?}", args.input))?
    {
        rows += 1;
        nulls += reader.current().iter().filter(|cell| cell.is_none()).count();
    }
    info!(
        "✓ {:?} matches schema: {rows} row(s), {nulls} null cell(s)",
        args.input
    );
    Ok(())
}
