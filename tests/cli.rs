//! End-to-end tests for the `entgen` binary

use assert_cmd::Command;
use entgen_schema::{Column, Schema, SchemaSet, Table, save_schema_set};
use predicates::prelude::*;

fn shop_schema_set() -> SchemaSet {
    SchemaSet::new().with_schema(
        Schema::new("dbo").with_table(
            Table::new("Customer")
                .with_column(
                    Column::new("Id", "int", "System.Int32")
                        .primary_key()
                        .identity(),
                )
                .with_column(Column::new("Name", "nvarchar", "System.String").nullable())
                .with_column(Column::new("Version", "rowversion", "System.Byte[]")),
        ),
    )
}

#[test]
fn build_writes_model_and_prints_summary() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("shop.entschema");
    let model_path = dir.path().join("shop.model.json");
    save_schema_set(&shop_schema_set(), &schema_path).unwrap();

    Command::cargo_bin("entgen")
        .unwrap()
        .args([
            "build",
            schema_path.to_str().unwrap(),
            "--unit-of-work",
            "Shop",
            "-o",
            model_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("ShopContext"))
        .stdout(predicate::str::contains("dbo.Customer"));

    let json = std::fs::read_to_string(&model_path).unwrap();
    assert!(json.contains("\"mapping_name\": \"CustomerMap\""));
}

#[test]
fn build_without_unit_of_work_fails() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("shop.entschema");
    save_schema_set(&shop_schema_set(), &schema_path).unwrap();

    Command::cargo_bin("entgen")
        .unwrap()
        .args(["build", schema_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("UnitOfWork"));
}

#[test]
fn validate_accepts_well_formed_schema() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("shop.entschema");
    save_schema_set(&shop_schema_set(), &schema_path).unwrap();

    Command::cargo_bin("entgen")
        .unwrap()
        .args(["validate", schema_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Valid"));
}

#[test]
fn validate_rejects_duplicate_tables() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("broken.entschema");
    let broken = SchemaSet::new().with_schema(
        Schema::new("dbo")
            .with_table(Table::new("Order"))
            .with_table(Table::new("Order")),
    );
    save_schema_set(&broken, &schema_path).unwrap();

    Command::cargo_bin("entgen")
        .unwrap()
        .args(["validate", schema_path.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Duplicate table"));
}

#[test]
fn info_lists_schemas_and_tables() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("shop.entschema");
    save_schema_set(&shop_schema_set(), &schema_path).unwrap();

    Command::cargo_bin("entgen")
        .unwrap()
        .args(["info", schema_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("dbo.Customer"));
}
