use std::fs;
use std::path::Path;

use flexwec_casegen::io::{self, VariableFormat, json_read};
use flexwec_casegen::substitute::substitute_line;
use flexwec_casegen::{CaseGenError, Scalar, Value, VariableSource};
use rust_xlsxwriter::Workbook;
use serde_json::json;
use tempfile::tempdir;

#[test]
fn json_object_becomes_named_source() {
    let document = json!({
        "draft": 2.5,
        "radius": 5,
        "periods": [4.0, 6.5, 9],
        "hull": [[1, 2], [3, 4]]
    });

    let source = json_read::parse_variables(&document).expect("variables parsed");

    let expected = VariableSource::named([
        ("draft", Value::Scalar(Scalar::Real(2.5))),
        ("radius", Value::Scalar(Scalar::Integer(5))),
        (
            "periods",
            Value::Vector(vec![Scalar::Real(4.0), Scalar::Real(6.5), Scalar::Integer(9)]),
        ),
        (
            "hull",
            Value::Matrix(vec![
                vec![Scalar::Integer(1), Scalar::Integer(2)],
                vec![Scalar::Integer(3), Scalar::Integer(4)],
            ]),
        ),
    ]);
    assert_eq!(source, expected);
}

#[test]
fn json_array_and_null_map_to_positional_and_absent() {
    let positional = json_read::parse_variables(&json!([0.5, 12])).expect("positional");
    assert_eq!(
        positional,
        VariableSource::Positional(vec![Scalar::Real(0.5), Scalar::Integer(12)])
    );

    let absent = json_read::parse_variables(&json!(null)).expect("absent");
    assert_eq!(absent, VariableSource::Absent);
}

#[test]
fn json_documents_of_the_wrong_shape_are_type_mismatches() {
    let documents = [
        json!("draft"),
        json!(true),
        json!([1, "two"]),
        json!([[1, 2]]),
        json!({ "name": "buoy" }),
        json!({ "hull": [[1, 2], [3]] }),
        json!({ "hull": [[1, 2], 3] }),
        json!({ "cube": [[[1]]] }),
    ];

    for document in documents {
        let error = json_read::parse_variables(&document).unwrap_err();
        assert!(
            matches!(error, CaseGenError::TypeMismatch(_)),
            "{document} produced {error}"
        );
    }
}

#[test]
fn read_variables_detects_json_by_extension() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("design.json");
    fs::write(&path, r#"{ "draft": 3.0 }"#).expect("variables written");

    let source = io::read_variables(&path, None).expect("variables read");
    assert_eq!(source, VariableSource::named([("draft", Scalar::Real(3.0))]));
}

#[test]
fn unknown_extension_without_format_is_rejected() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("design.yaml");
    fs::write(&path, "draft: 3.0\n").expect("variables written");

    let error = io::read_variables(&path, None).unwrap_err();
    assert!(matches!(error, CaseGenError::UnsupportedFormat(_)));

    assert_eq!(io::detect_format(Path::new("design.XLSX")), Some(VariableFormat::Excel));
    assert_eq!(io::detect_format(Path::new("design")), None);
}

#[test]
fn excel_rows_become_scalars_vectors_and_matrices() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("design.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Variables").expect("sheet named");
    sheet.write_string(0, 0, "name").expect("header");
    sheet.write_string(0, 1, "values").expect("header");
    sheet.write_string(1, 0, "draft").expect("name");
    sheet.write_number(1, 1, 2.5).expect("value");
    sheet.write_string(2, 0, "periods").expect("name");
    sheet.write_number(2, 1, 4.0).expect("value");
    sheet.write_number(2, 2, 6.5).expect("value");
    sheet.write_number(2, 3, 9.0).expect("value");
    sheet.write_string(3, 0, "hull").expect("name");
    sheet.write_number(3, 1, 1.0).expect("value");
    sheet.write_number(3, 2, 2.0).expect("value");
    sheet.write_string(4, 0, "hull").expect("name");
    sheet.write_number(4, 1, 3.0).expect("value");
    sheet.write_number(4, 2, 4.0).expect("value");
    sheet.write_string(6, 0, "count").expect("name");
    sheet.write_string(6, 1, "3").expect("value");
    workbook.save(&path).expect("workbook saved");

    let source = io::read_variables(&path, None).expect("variables read");

    let expected = VariableSource::named([
        ("count", Value::Scalar(Scalar::Integer(3))),
        ("draft", Value::Scalar(Scalar::Real(2.5))),
        (
            "hull",
            Value::Matrix(vec![
                vec![Scalar::Integer(1), Scalar::Integer(2)],
                vec![Scalar::Integer(3), Scalar::Integer(4)],
            ]),
        ),
        (
            "periods",
            Value::Vector(vec![Scalar::Integer(4), Scalar::Real(6.5), Scalar::Integer(9)]),
        ),
    ]);
    assert_eq!(source, expected);
}

#[test]
fn excel_without_variables_sheet_is_invalid() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("design.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Cases").expect("sheet named");
    sheet.write_string(0, 0, "name").expect("header");
    workbook.save(&path).expect("workbook saved");

    let error = io::read_variables(&path, Some(VariableFormat::Excel)).unwrap_err();
    assert!(matches!(error, CaseGenError::InvalidWorkbook(_)));
}

#[test]
fn excel_non_numeric_cells_are_type_mismatches() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("design.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Variables").expect("sheet named");
    sheet.write_string(0, 0, "name").expect("header");
    sheet.write_string(1, 0, "draft").expect("name");
    sheet.write_string(1, 1, "deep").expect("value");
    workbook.save(&path).expect("workbook saved");

    let error = io::read_variables(&path, None).unwrap_err();
    assert!(matches!(error, CaseGenError::TypeMismatch(message) if message.contains("deep")));
}

#[test]
fn excel_whole_numbers_substitute_as_integers() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("design.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Variables").expect("sheet named");
    sheet.write_string(0, 0, "name").expect("header");
    sheet.write_string(1, 0, "nper").expect("name");
    sheet.write_number(1, 1, 3.0).expect("value");
    sheet.write_string(2, 0, "depth").expect("name");
    sheet.write_number(2, 1, -12.75).expect("value");
    workbook.save(&path).expect("workbook saved");

    let source = io::read_variables(&path, None).expect("variables read");

    let line = substitute_line("NPER= ?nper? ?depth?\n", &source, "run.pot", 1)
        .expect("substituted");
    assert_eq!(line, "NPER= 3 -12.75\n");
}
