mod common;

use std::fs;

use predicates::prelude::*;
use rupeewise::advice::MISSING_KEY_MESSAGE;

#[test]
fn add_then_summarize_and_list() {
    let home = common::data_dir();
    common::cli(&home)
        .write_stdin(
            "add income 1000\n\
             add expense 300 Groceries --note \"Weekly veg\"\n\
             summary\n\
             list\n\
             exit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Added income ₹1,000 (Income)"))
        .stdout(predicate::str::contains("Current Balance : ₹700"))
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("Weekly veg"));

    assert_eq!(common::open_store(&home).len(), 2);
}

#[test]
fn expense_without_category_is_rejected() {
    let home = common::data_dir();
    common::cli(&home)
        .write_stdin("add expense 300\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Transaction not saved: category is required for expenses.",
        ));

    assert!(!home.join("rupeewise_data_v1.json").exists());
}

#[test]
fn delete_requires_confirmation_flag() {
    let home = common::data_dir();
    common::cli(&home)
        .write_stdin("add expense 80 Water\n")
        .assert()
        .success();

    let raw = fs::read_to_string(home.join("rupeewise_data_v1.json")).unwrap();
    let records: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let id = records[0]["id"].as_str().unwrap().to_string();

    common::cli(&home)
        .write_stdin(format!("delete {id}\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains("confirmation required"));
    assert_eq!(common::open_store(&home).len(), 1);

    common::cli(&home)
        .write_stdin(format!("delete {} --yes\n", &id[..8]))
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted expense ₹80 (Water)"));
    assert!(common::open_store(&home).is_empty());
}

#[test]
fn context_switch_is_remembered() {
    let home = common::data_dir();
    common::cli(&home)
        .write_stdin("context school\nadd expense 120 stationery\n")
        .assert()
        .success();

    common::cli(&home)
        .write_stdin("summary\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("School summary"))
        .stdout(predicate::str::contains("Total Expenses  : ₹120"));
}

#[test]
fn unknown_command_gets_a_suggestion() {
    let home = common::data_dir();
    common::cli(&home)
        .write_stdin("sumary\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Did you mean `summary`?"));
}

#[test]
fn advice_needs_data_and_a_key() {
    let home = common::data_dir();
    common::cli(&home)
        .write_stdin("advice\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Add some Home transactions before asking for advice.",
        ));

    common::cli(&home)
        .write_stdin("add expense 450 Internet/Phone\nadvice\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(MISSING_KEY_MESSAGE))
        .stdout(predicate::str::contains("Analyzing").not());
}

#[test]
fn export_writes_reports_into_the_given_directory() {
    let home = common::data_dir();
    let out = common::data_dir();
    common::cli(&home)
        .write_stdin(format!(
            "add income 500 --method bank\nexport csv {dir}\nexport pdf {dir}\n",
            dir = out.display()
        ))
        .assert()
        .success()
        .stdout(predicate::str::contains("Report saved to"));

    let csv = fs::read_to_string(out.join("Home_Expenses_Report.csv")).unwrap();
    assert!(csv.starts_with("Date,Item Name,Type,Category,Payment,Amount"));
    assert!(out.join("Home_Expenses_Report.pdf").exists());
}
