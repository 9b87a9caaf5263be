//! Binds tabular records onto statically typed Rust records.
//!
//! A source (a [`table::DataRow`], a whole [`table::DataTable`], or any forward
//! only [`source::DataReader`] such as [`csv_source::CsvReader`]) is bound onto a
//! [`record::Record`] type, usually declared with [`mapped_record!`]:
//!
//! ```
//! use rowbind::{Binder, data::Value, schema::{ColumnMeta, ColumnType}, table::DataTable};
//!
//! rowbind::mapped_record! {
//!     #[derive(Debug)]
//!     pub struct Customer {
//!         pub customer_id: i32 => "CustomerId",
//!         pub name: Option<String> => "Name",
//!         pub zip: i32 => "Zip",
//!     }
//! }
//!
//! let mut table = DataTable::new(vec![
//!     ColumnMeta::new("CustomerId", ColumnType::Integer),
//!     ColumnMeta::new("Name", ColumnType::String),
//!     ColumnMeta::new("Zip", ColumnType::String),
//! ]);
//! table.push_row(vec![Some(Value::Integer(1)), None, None]).unwrap();
//!
//! let customers: Vec<Customer> = Binder::default().bind_table(&table, None).unwrap();
//! assert_eq!(customers[0].customer_id, 1);
//! assert_eq!(customers[0].name.as_deref(), Some(""));
//! assert_eq!(customers[0].zip, 0);
//! ```

pub mod binder;
pub mod cli;
pub mod coerce;
pub mod csv_source;
pub mod data;
pub mod error;
pub mod field;
pub mod io_utils;
pub mod locale;
pub mod options;
pub mod record;
pub mod render;
pub mod schema;
pub mod source;
pub mod table;

mod preview;
mod verify;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

pub use crate::{
    binder::{Binder, is_assignable},
    data::Value,
    error::{BindError, ConversionError},
    field::{FieldDescriptor, FieldType, FieldValue},
    locale::Locale,
    options::BindOptions,
    record::{Record, clone_template, new_instance, normalize_null_strings},
    source::{DataReader, SourceRecord},
};

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("rowbind", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Preview(args) => preview::execute(&args),
        Commands::Verify(args) => verify::execute(&args),
    }
}
