#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use rowbind::data::Value;
use rowbind::schema::{ColumnMeta, ColumnType};
use rowbind::table::DataTable;
use tempfile::{TempDir, tempdir};

rowbind::mapped_record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Customer {
        pub customer_id: i64 => "CustomerId",
        pub first_name: Option<String> => "FirstName",
        pub last_name: Option<String> => "LastName",
        pub phone_number: Option<String> => "PhoneNumber",
        pub email: Option<String> => "Email",
        pub address: Option<String> => "Address",
        pub city: Option<String> => "City",
        pub state: Option<String> => "State",
        pub zip: i32 => "Zip",
        pub rewards_points: Option<Decimal> => "RewardsPoints",
    }
}

impl Customer {
    /// A template with every field at its zero value except `zip`.
    pub fn with_zip(zip: i32) -> Self {
        Customer {
            customer_id: 0,
            first_name: None,
            last_name: None,
            phone_number: None,
            email: None,
            address: None,
            city: None,
            state: None,
            zip,
            rewards_points: None,
        }
    }
}

pub fn decimal(text: &str) -> Decimal {
    Decimal::from_str(text).expect("decimal literal")
}

fn text(value: &str) -> Option<Value> {
    Some(Value::from(value))
}

/// Three customers; the second has null phone, zip, and rewards, the third a
/// null phone. `LoyaltyTier` has no counterpart on [`Customer`].
pub fn customer_table() -> DataTable {
    let mut table = DataTable::new(vec![
        ColumnMeta::new("CustomerId", ColumnType::Integer),
        ColumnMeta::new("FirstName", ColumnType::String),
        ColumnMeta::new("LastName", ColumnType::String),
        ColumnMeta::new("Email", ColumnType::String),
        ColumnMeta::new("PhoneNumber", ColumnType::String),
        ColumnMeta::new("Address", ColumnType::String),
        ColumnMeta::new("City", ColumnType::String),
        ColumnMeta::new("State", ColumnType::String),
        ColumnMeta::new("Zip", ColumnType::String),
        ColumnMeta::new("RewardsPoints", ColumnType::Decimal),
        ColumnMeta::new("LoyaltyTier", ColumnType::String),
    ]);
    table
        .push_row(vec![
            Some(Value::Integer(1)),
            text("John"),
            text("Doe"),
            text("johnDoe@maxmail.com"),
            text("345-231-9234"),
            text("312 Brackish Rd"),
            text("Boston"),
            text("MA"),
            text("34567"),
            Some(Value::Decimal(decimal("23.3"))),
            text("gold"),
        ])
        .expect("row 1");
    table
        .push_row(vec![
            Some(Value::Integer(2)),
            text("Jake"),
            text("McPhelson"),
            text("Jake123@mail.com"),
            None,
            text("64 Back Road Drive"),
            text("Houston"),
            text("TX"),
            None,
            None,
            None,
        ])
        .expect("row 2");
    table
        .push_row(vec![
            Some(Value::Integer(3)),
            text("Bob"),
            text("Jackson"),
            text("Jake123@vixmix.com"),
            None,
            text("2345 Cumberland St."),
            text("Nashville"),
            text("TN"),
            text("37210"),
            Some(Value::Decimal(Decimal::ZERO)),
            text("silver"),
        ])
        .expect("row 3");
    table
}

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}
