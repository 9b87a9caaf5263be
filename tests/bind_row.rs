mod common;

use common::{Customer, customer_table, decimal};
use rowbind::data::Value;
use rowbind::schema::{ColumnMeta, ColumnType};
use rowbind::table::DataTable;
use rowbind::{BindOptions, Binder, Locale};

#[test]
fn bind_row_populates_matching_fields() {
    let table = customer_table();
    let row = table
        .rows()
        .find(|row| row.get("CustomerId") == Some(&Value::Integer(1)))
        .expect("customer 1");

    let cust: Customer = Binder::default().bind_row(&row, None).expect("bind row");

    assert_eq!(cust.first_name.as_deref(), Some("John"));
    assert_eq!(cust.state.as_deref(), Some("MA"));
    assert_eq!(cust.zip, 34567);
    assert_eq!(cust.rewards_points, Some(decimal("23.3")));
}

#[test]
fn bind_row_null_optional_and_non_optional_fields() {
    let table = customer_table();
    let cust: Customer = Binder::default()
        .bind_row(&table.row(1).expect("row"), None)
        .expect("bind row");

    assert_eq!(cust.rewards_points, None);
    assert_eq!(cust.zip, 0);
}

#[test]
fn bind_row_null_uses_template_value() {
    let table = customer_table();
    let template = Customer::with_zip(0);
    let cust = Binder::default()
        .bind_row(&table.row(1).expect("row"), Some(&template))
        .expect("bind row");

    assert_eq!(cust.zip, 0);

    let template = Customer::with_zip(-1);
    let cust = Binder::default()
        .bind_row(&table.row(1).expect("row"), Some(&template))
        .expect("bind row");
    assert_eq!(cust.zip, -1);
    assert_eq!(template.customer_id, 0);
}

#[test]
fn bind_row_is_idempotent_for_same_template() {
    let table = customer_table();
    let row = table.row(0).expect("row");
    let template = Customer::with_zip(5);
    let binder = Binder::default();

    let first = binder.bind_row(&row, Some(&template)).expect("first");
    let second = binder.bind_row(&row, Some(&template)).expect("second");

    assert_eq!(first, second);
}

#[test]
fn bind_row_matches_columns_case_insensitively() {
    let mut table = DataTable::new(vec![
        ColumnMeta::new("customerid", ColumnType::Integer),
        ColumnMeta::new("ZIP", ColumnType::Integer),
    ]);
    table
        .push_row(vec![Some(Value::Integer(9)), Some(Value::Integer(12345))])
        .expect("row");

    let cust: Customer = Binder::default()
        .bind_row(&table.row(0).expect("row"), None)
        .expect("bind row");

    assert_eq!(cust.customer_id, 9);
    assert_eq!(cust.zip, 12345);
    assert_eq!(cust.first_name.as_deref(), Some(""));
}

#[test]
fn bind_row_scenario_with_null_name() {
    let mut table = DataTable::new(vec![
        ColumnMeta::new("CustomerId", ColumnType::Integer),
        ColumnMeta::new("FirstName", ColumnType::String),
        ColumnMeta::new("Zip", ColumnType::Integer),
    ]);
    table
        .push_row(vec![Some(Value::Integer(1)), None, None])
        .expect("row");
    let row = table.row(0).expect("row");

    let normalized: Customer = Binder::default().bind_row(&row, None).expect("bind");
    assert_eq!(normalized.customer_id, 1);
    assert_eq!(normalized.first_name.as_deref(), Some(""));
    assert_eq!(normalized.zip, 0);

    let raw: Customer = Binder::new(BindOptions::default().with_normalize_nulls(false))
        .bind_row(&row, None)
        .expect("bind");
    assert_eq!(raw.first_name, None);
}

#[test]
fn bind_row_applies_configured_locale() {
    let mut table = DataTable::new(vec![ColumnMeta::new("RewardsPoints", ColumnType::String)]);
    table
        .push_row(vec![Some(Value::from("1.023,5"))])
        .expect("row");
    let row = table.row(0).expect("row");

    let binder = Binder::new(BindOptions::default().with_locale(Locale::comma_decimal()));
    let cust: Customer = binder.bind_row(&row, None).expect("bind");
    assert_eq!(cust.rewards_points, Some(decimal("1023.5")));

    let err = Binder::default()
        .bind_row::<Customer, _>(&row, None)
        .expect_err("invariant locale rejects comma decimals");
    assert!(err.to_string().contains("RewardsPoints"));
}

rowbind::mapped_record! {
    #[record(default)]
    #[derive(Debug, Clone, PartialEq)]
    struct Account {
        id: i64 => "Id",
        zip: i32 => "Zip",
    }
}

impl Default for Account {
    fn default() -> Self {
        Account { id: 0, zip: -1 }
    }
}

#[test]
fn bind_row_without_template_keeps_default_for_null_cell() {
    let mut table = DataTable::new(vec![
        ColumnMeta::new("Id", ColumnType::Integer),
        ColumnMeta::new("Zip", ColumnType::Integer),
    ]);
    table
        .push_row(vec![Some(Value::Integer(1)), None])
        .expect("row");

    let bound: Account = Binder::default()
        .bind_row(&table.row(0).expect("row"), None)
        .expect("bind row");

    assert_eq!(bound, Account { id: 1, zip: -1 });
}
