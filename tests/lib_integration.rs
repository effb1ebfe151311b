use std::fs;

use sales_report_lib::{process_sales, Config, EngineError, ReportKind};
use test_utils::{assert_unsorted_eq, create_report, read_output, InputTree};

extern crate test_utils;

const SELLERS: &str = "sellers_report.csv";
const PRODUCTS: &str = "products_by_quantity.csv";
const ERRORS: &str = "processing_errors.log";

const PRODUCTS_CSV: &str = "P001;Widget;9.99\nP002;Gadget;2.50\n";
const SALESMEN_CSV: &str = "CC;111;Ana;Ruiz\nCC;222;Luis;Gomez\n";

fn run(tree: &InputTree) -> sales_report_lib::RunSummary {
    process_sales(&Config::new(tree.input_dir(), tree.output_dir())).unwrap()
}

#[test]
fn basic_example() {
    let out = tempfile::tempdir().unwrap();
    let summary = process_sales(&Config::new("tests/resources/basic", out.path())).unwrap();

    assert!(summary.all_reports_written());
    assert_eq!(summary.sellers_written, 4);
    assert_eq!(summary.products_written, 2);
    assert_eq!(
        read_output(out.path(), SELLERS),
        create_report(vec![
            vec!["Ana Ruiz", "39.97"],
            vec!["Luis Gomez", "25.00"],
            vec!["CC 999", "19.98"],
            vec!["CC 444", "0.00"],
        ])
    );
    assert_eq!(
        read_output(out.path(), PRODUCTS),
        create_report(vec![vec!["Gadget", "2.50", "14"], vec!["Widget", "9.99", "5"]])
    );
    assert_unsorted_eq(
        &read_output(out.path(), ERRORS),
        "tests/resources/basic/sales/ana_2.csv: quantity <=0 at line 3\n\
         tests/resources/basic/sales/luis.csv: product does not exist P404 line 3\n\
         tests/resources/basic/sales/empty.csv: empty\n\
         tests/resources/basic/sales/bad_header.csv: invalid header\n\
         tests/resources/basic/sales/nobody.csv: product does not exist P005 line 2\n\
         tests/resources/basic/sales/nobody.csv: line 3 invalid\n\
         tests/resources/basic/sales/nobody.csv: line 4 invalid\n",
    );
}

#[test]
fn single_sale_is_reported() {
    let tree = InputTree::new("P001;Widget;9.99\n", "CC;111;Ana;Ruiz\n")
        .with_sale("ana.csv", "CC;111\nP001;3\n");

    let summary = run(&tree);

    assert!(summary.errors.is_empty());
    assert_eq!(
        read_output(&tree.output_dir(), SELLERS),
        create_report(vec![vec!["Ana Ruiz", "29.97"]])
    );
    assert_eq!(
        read_output(&tree.output_dir(), PRODUCTS),
        create_report(vec![vec!["Widget", "9.99", "3"]])
    );
    assert!(!tree.output_dir().join(ERRORS).exists());
}

#[test]
fn unknown_seller_gets_synthesized_name() {
    let tree = InputTree::new("P001;Widget;9.99\n", "CC;111;Ana;Ruiz\n")
        .with_sale("stranger.csv", "CC;999\nP001;2\n");

    run(&tree);

    assert_eq!(
        read_output(&tree.output_dir(), SELLERS),
        create_report(vec![vec!["CC 999", "19.98"]])
    );
}

#[test]
fn negative_quantity_only_opens_bucket() {
    let tree = InputTree::new(PRODUCTS_CSV, SALESMEN_CSV).with_sale("ana.csv", "CC;111\nP001;-1\n");

    let summary = run(&tree);

    assert_eq!(summary.errors.len(), 1);
    assert_eq!(
        read_output(&tree.output_dir(), SELLERS),
        create_report(vec![vec!["Ana Ruiz", "0.00"]])
    );
    assert_eq!(read_output(&tree.output_dir(), PRODUCTS), "");

    let log = read_output(&tree.output_dir(), ERRORS);
    assert_eq!(log.lines().count(), 1);
    assert!(log.contains("quantity"));
    assert!(log.contains("line 2"));
}

#[test]
fn empty_sales_directory_writes_empty_reports() {
    let tree = InputTree::new(PRODUCTS_CSV, SALESMEN_CSV);

    let summary = run(&tree);

    assert!(summary.all_reports_written());
    assert_eq!(read_output(&tree.output_dir(), SELLERS), "");
    assert_eq!(read_output(&tree.output_dir(), PRODUCTS), "");
    assert!(!tree.output_dir().join(ERRORS).exists());
}

#[test]
fn missing_sales_directory_is_not_fatal() {
    let tree = InputTree::new(PRODUCTS_CSV, SALESMEN_CSV);
    fs::remove_dir(tree.sales_dir()).unwrap();

    let summary = run(&tree);

    assert!(summary.errors.is_empty());
    assert_eq!(read_output(&tree.output_dir(), SELLERS), "");
}

#[test]
fn totals_do_not_depend_on_how_sales_are_split() {
    let one_file = InputTree::new(PRODUCTS_CSV, SALESMEN_CSV).with_sale(
        "all.csv",
        "CC;111\nP001;2\nP002;3\nP001;1\n",
    );
    let many_files = InputTree::new(PRODUCTS_CSV, SALESMEN_CSV)
        .with_sale("z.csv", "CC;111\nP001;1\n")
        .with_sale("m.csv", "CC;111\nP002;3\n")
        .with_sale("a.csv", "CC;111\nP001;2\n");

    run(&one_file);
    run(&many_files);

    for report in [SELLERS, PRODUCTS] {
        assert_eq!(
            read_output(&one_file.output_dir(), report),
            read_output(&many_files.output_dir(), report)
        );
    }
    assert_eq!(
        read_output(&one_file.output_dir(), SELLERS),
        create_report(vec![vec!["Ana Ruiz", "37.47"]])
    );
}

#[test]
fn equal_totals_are_ordered_by_name() {
    let tree = InputTree::new(
        "P001;Widget;5\nP002;Gadget;10\nP003;Bolt;1\n",
        "CC;111;Ana;Ruiz\nCC;222;Luis;Gomez\nCC;333;Ana;Diaz\n",
    )
    .with_sale("luis.csv", "CC;222\nP002;1\nP003;4\n")
    .with_sale("ana.csv", "CC;111\nP001;2\nP003;4\n")
    .with_sale("diaz.csv", "CC;333\nP002;1\n");

    run(&tree);

    assert_eq!(
        read_output(&tree.output_dir(), SELLERS),
        create_report(vec![
            vec!["Ana Ruiz", "14.00"],
            vec!["Luis Gomez", "14.00"],
            vec!["Ana Diaz", "10.00"],
        ])
    );
    assert_eq!(
        read_output(&tree.output_dir(), PRODUCTS),
        create_report(vec![
            vec!["Bolt", "1.00", "8"],
            vec!["Gadget", "10.00", "2"],
            vec!["Widget", "5.00", "2"],
        ])
    );
}

#[test]
fn unreadable_catalog_is_fatal() {
    let tree = InputTree::new(PRODUCTS_CSV, SALESMEN_CSV).with_sale("ana.csv", "CC;111\nP001;1\n");
    fs::remove_file(tree.input_dir().join("salesmen_info.csv")).unwrap();

    let result = process_sales(&Config::new(tree.input_dir(), tree.output_dir()));

    assert!(matches!(result, Err(EngineError::Catalog { .. })));
    assert!(!tree.output_dir().join(SELLERS).exists());
    assert!(!tree.output_dir().join(PRODUCTS).exists());
}

#[test]
fn uncreatable_output_directory_is_fatal() {
    let tree = InputTree::new(PRODUCTS_CSV, SALESMEN_CSV);
    let blocked = tree.root().join("blocked");
    fs::write(&blocked, "not a directory").unwrap();

    let result = process_sales(&Config::new(tree.input_dir(), blocked.join("output")));

    assert!(matches!(result, Err(EngineError::OutputDir { .. })));
}

#[test]
fn one_failed_report_does_not_stop_the_others() {
    let tree = InputTree::new(PRODUCTS_CSV, SALESMEN_CSV)
        .with_sale("ana.csv", "CC;111\nP001;1\nP404;1\n");
    fs::create_dir_all(tree.output_dir().join(SELLERS)).unwrap();

    let summary = run(&tree);

    assert!(!summary.all_reports_written());
    assert_eq!(summary.failed_reports.len(), 1);
    assert_eq!(summary.failed_reports[0].report, ReportKind::Sellers);
    assert_eq!(
        read_output(&tree.output_dir(), PRODUCTS),
        create_report(vec![vec!["Widget", "9.99", "1"]])
    );
    assert_eq!(read_output(&tree.output_dir(), ERRORS).lines().count(), 1);
}

#[test]
fn clean_run_removes_stale_error_log() {
    let tree = InputTree::new(PRODUCTS_CSV, SALESMEN_CSV).with_sale("ana.csv", "CC;111\nP001;1\n");
    fs::create_dir_all(tree.output_dir()).unwrap();
    fs::write(tree.output_dir().join(ERRORS), "old.csv: empty\n").unwrap();

    let summary = run(&tree);

    assert!(summary.all_reports_written());
    assert!(!tree.output_dir().join(ERRORS).exists());
}
