mod common;

use common::{Customer, customer_table, decimal};
use rowbind::{BindOptions, Binder};

#[test]
fn bind_table_returns_one_record_per_row_in_order() {
    let customers: Vec<Customer> = Binder::default()
        .bind_table(&customer_table(), None)
        .expect("bind table");

    assert_eq!(customers.len(), 3);
    let ids = customers.iter().map(|c| c.customer_id).collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn bind_table_populates_first_record() {
    let customers: Vec<Customer> = Binder::default()
        .bind_table(&customer_table(), None)
        .expect("bind table");
    let cust = customers
        .iter()
        .find(|c| c.customer_id == 1)
        .expect("customer 1");

    assert_eq!(cust.first_name.as_deref(), Some("John"));
    assert_eq!(cust.last_name.as_deref(), Some("Doe"));
    assert_eq!(cust.email.as_deref(), Some("johnDoe@maxmail.com"));
    assert_eq!(cust.phone_number.as_deref(), Some("345-231-9234"));
    assert_eq!(cust.address.as_deref(), Some("312 Brackish Rd"));
    assert_eq!(cust.city.as_deref(), Some("Boston"));
    assert_eq!(cust.state.as_deref(), Some("MA"));
    assert_eq!(cust.zip, 34567);
    assert_eq!(cust.rewards_points, Some(decimal("23.3")));
}

#[test]
fn bind_table_leaves_null_optional_unset() {
    let customers: Vec<Customer> = Binder::default()
        .bind_table(&customer_table(), None)
        .expect("bind table");

    assert_eq!(customers[1].rewards_points, None);
    assert_eq!(customers[2].rewards_points, Some(decimal("0")));
}

#[test]
fn bind_table_defaults_null_non_optional_to_zero() {
    let customers: Vec<Customer> = Binder::default()
        .bind_table(&customer_table(), None)
        .expect("bind table");

    assert_eq!(customers[1].zip, 0);
}

#[test]
fn bind_table_null_falls_back_to_template() {
    let template = Customer::with_zip(-1);
    let customers = Binder::default()
        .bind_table(&customer_table(), Some(&template))
        .expect("bind table");

    assert_eq!(customers[0].zip, 34567);
    assert_eq!(customers[1].zip, -1);
    assert_eq!(customers[2].zip, 37210);
    assert_eq!(template, Customer::with_zip(-1));
}

#[test]
fn bind_table_normalizes_null_strings_by_default() {
    let customers: Vec<Customer> = Binder::default()
        .bind_table(&customer_table(), None)
        .expect("bind table");

    assert_eq!(customers[1].phone_number.as_deref(), Some(""));
    assert_eq!(customers[2].phone_number.as_deref(), Some(""));
}

#[test]
fn bind_table_keeps_null_strings_when_normalization_is_off() {
    let binder = Binder::new(BindOptions::default().with_normalize_nulls(false));
    let customers: Vec<Customer> = binder
        .bind_table(&customer_table(), None)
        .expect("bind table");

    assert_eq!(customers[1].phone_number, None);
    assert_eq!(customers[0].phone_number.as_deref(), Some("345-231-9234"));
}

#[test]
fn bind_table_keeps_template_strings_over_null_cells() {
    let mut template = Customer::with_zip(0);
    template.phone_number = Some("unlisted".to_string());
    let customers = Binder::default()
        .bind_table(&customer_table(), Some(&template))
        .expect("bind table");

    assert_eq!(customers[0].phone_number.as_deref(), Some("345-231-9234"));
    assert_eq!(customers[1].phone_number.as_deref(), Some("unlisted"));
}

#[test]
fn bind_table_stops_at_first_conversion_error() {
    let mut table = customer_table();
    let mut row = vec![None; table.column_count()];
    row[0] = Some(rowbind::Value::Integer(4));
    row[8] = Some(rowbind::Value::from("not-a-zip"));
    table.push_row(row).expect("row 4");

    let err = Binder::default()
        .bind_table::<Customer>(&table, None)
        .expect_err("zip cannot convert");

    assert!(err.to_string().contains("Field 'Zip'"));
    assert!(err.to_string().contains("not-a-zip"));
}
