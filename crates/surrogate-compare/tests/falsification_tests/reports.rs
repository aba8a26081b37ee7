//! Falsification Tests: Category C - Reports (F021-F028)
//!
//! The report is what an assertion layer sees. These tests try to make
//! options leak findings they should gate, or hide findings they should
//! keep.

use surrogate_compare::{ApiComparer, CompareError, ComparisonOptions};
use surrogate_core::{Block, ClassShape, Param, Song, SurrogateClass, Value};

/// A surrogate with one extra song, one missing method, one kind drift and
/// one rename.
fn drifted() -> (SurrogateClass, ClassShape) {
    let surrogate = SurrogateClass::new("MockStore");
    surrogate
        .sing(
            "get",
            Song::new().block(Block::new([Param::required("key")], |_, _| Ok(Value::Nil))),
        )
        .sing(
            "put",
            Song::new().params([Param::required("k"), Param::required("v")]),
        )
        .sing("debug_dump", Song::new());
    let actual = ClassShape::new("Store")
        .instance_method("get", [Param::required("key"), Param::optional("default")])
        .instance_method("put", [Param::required("key"), Param::required("value")])
        .instance_method("delete", [Param::required("key")]);
    (surrogate, actual)
}

// =============================================================================
// F021-F025: Option gates
// =============================================================================

/// F021: Default options report presence and kinds, not names
///
/// # Falsification Attempt
/// Report the drifted store with default options.
#[test]
fn f021_default_gates() {
    let (surrogate, actual) = drifted();
    let report = ApiComparer::new(&surrogate, &actual).report(&ComparisonOptions::default());

    assert_eq!(report.extra_instance_methods, vec!["debug_dump"], "F021 FALSIFIED");
    assert_eq!(report.missing_instance_methods, vec!["delete"], "F021 FALSIFIED");
    assert_eq!(
        report.instance_type_mismatches.len(),
        1,
        "F021 FALSIFIED: kind drift on get should be kept"
    );
    assert!(
        report.instance_name_mismatches.is_empty(),
        "F021 FALSIFIED: names are off by default"
    );
}

/// F022: Subset mode drops missing methods but keeps extras
///
/// # Falsification Attempt
/// Report in subset mode; `delete` must vanish and `debug_dump` stay.
#[test]
fn f022_subset_keeps_extras() {
    let (surrogate, actual) = drifted();
    let report =
        ApiComparer::new(&surrogate, &actual).report(&ComparisonOptions::default().subset(true));

    assert!(
        report.missing_instance_methods.is_empty(),
        "F022 FALSIFIED: subset mode reported missing methods"
    );
    assert_eq!(
        report.extra_instance_methods,
        vec!["debug_dump"],
        "F022 FALSIFIED: subset mode hid an extra method"
    );
}

/// F023: Disabling types hides kind drift
#[test]
fn f023_types_gate() {
    let (surrogate, actual) = drifted();
    let report =
        ApiComparer::new(&surrogate, &actual).report(&ComparisonOptions::default().types(false));
    assert!(
        report.instance_type_mismatches.is_empty(),
        "F023 FALSIFIED: kind drift reported with types disabled"
    );
}

/// F024: Enabling names surfaces renames
///
/// # Falsification Attempt
/// `put(k, v)` vs `put(key, value)` appears only with names on. `get`
/// differs in kinds too and shows in both lists.
#[test]
fn f024_names_gate() {
    let (surrogate, actual) = drifted();
    let report =
        ApiComparer::new(&surrogate, &actual).report(&ComparisonOptions::default().names(true));
    let renamed: Vec<&str> = report
        .instance_name_mismatches
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(renamed, vec!["get", "put"], "F024 FALSIFIED");
}

/// F025: Options load from TOML with defaults for absent keys
///
/// # Falsification Attempt
/// Parse a document that only sets `subset`, then one with a bad type.
#[test]
fn f025_options_from_toml() {
    let options = ComparisonOptions::from_toml_str("subset = true\n").unwrap();
    assert_eq!(
        options,
        ComparisonOptions::default().subset(true),
        "F025 FALSIFIED: absent keys did not take defaults"
    );

    let err = ComparisonOptions::from_toml_str("types = \"yes\"\n").err();
    assert!(
        matches!(err, Some(CompareError::Options(_))),
        "F025 FALSIFIED: bad option type accepted"
    );
}

// =============================================================================
// F026-F028: Report output
// =============================================================================

/// F026: Substitutable iff nothing was found
///
/// # Falsification Attempt
/// Gate out everything the drifted store shows except the extra method.
#[test]
fn f026_substitutable_only_when_clean() {
    let (surrogate, actual) = drifted();
    let comparer = ApiComparer::new(&surrogate, &actual);
    let options = ComparisonOptions::default().subset(true).types(false);
    let report = comparer.report(&options);
    assert_eq!(report.finding_count(), 1, "F026 FALSIFIED");
    assert!(!report.is_substitutable(), "F026 FALSIFIED: extra ignored");

    let clean = SurrogateClass::new("MockStore");
    clean.sing("delete", Song::new().params([Param::required("key")]));
    let actual = ClassShape::new("Store").instance_method("delete", [Param::required("key")]);
    let report = ApiComparer::new(&clean, &actual).report(&ComparisonOptions::default());
    assert!(report.is_substitutable(), "F026 FALSIFIED: clean surrogate rejected");
}

/// F027: JSON carries the mismatch records
///
/// # Falsification Attempt
/// Serialize the default report and look for the kind drift on `get`.
#[test]
fn f027_json_report() {
    let (surrogate, actual) = drifted();
    let json = ApiComparer::new(&surrogate, &actual)
        .report(&ComparisonOptions::default())
        .to_json()
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed["surrogate"], "MockStore", "F027 FALSIFIED");
    assert_eq!(parsed["actual"], "Store", "F027 FALSIFIED");
    let mismatch = &parsed["instance_type_mismatches"][0];
    assert_eq!(mismatch["name"], "get", "F027 FALSIFIED");
    assert_eq!(mismatch["kind"], "instance", "F027 FALSIFIED");
    assert_eq!(
        mismatch["actual"],
        serde_json::json!(["required", "optional"]),
        "F027 FALSIFIED: kinds not snake_case"
    );
}

/// F028: Reports are reproducible
///
/// # Falsification Attempt
/// Report twice from the same comparer and from a fresh one.
#[test]
fn f028_report_is_deterministic() {
    let (surrogate, actual) = drifted();
    let options = ComparisonOptions::default().names(true);
    let first = ApiComparer::new(&surrogate, &actual).report(&options);
    let second = ApiComparer::new(&surrogate, &actual).report(&options);
    assert_eq!(first, second, "F028 FALSIFIED: reports differ");
}
