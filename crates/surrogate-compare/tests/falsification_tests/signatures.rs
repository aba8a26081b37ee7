//! Falsification Tests: Category B - Signature Drift (F011-F020)
//!
//! Matching names are not enough: a surrogate whose parameters drift from
//! the real method hides breakage. These tests try to slip drift past the
//! comparator, or make it report drift that is not there.

use surrogate_compare::{ApiComparer, CompareError, Method, Mismatch};
use surrogate_core::{
    Block, ClassShape, MethodKind, Param, ParamKind, Signature, Song, SurrogateClass, Value,
};

fn with_block(params: impl IntoIterator<Item = Param>) -> Song {
    Song::new().block(Block::new(params, |_, _| Ok(Value::Nil)))
}

// =============================================================================
// F011-F014: Kind and name drift
// =============================================================================

/// F011: An extra required parameter is a type mismatch
///
/// # Falsification Attempt
/// Surrogate `foo(a, b)` against actual `foo(a)`.
#[test]
fn f011_arity_drift_is_type_mismatch() {
    let surrogate = SurrogateClass::new("MockThing");
    surrogate.sing(
        "foo",
        with_block([Param::required("a"), Param::required("b")]),
    );
    let actual = ClassShape::new("Thing").instance_method("foo", [Param::required("a")]);

    let comparer = ApiComparer::new(&surrogate, &actual);
    assert_eq!(
        comparer.instance_type_mismatches(),
        vec![Mismatch {
            name: "foo".into(),
            kind: MethodKind::Instance,
            surrogate: vec![ParamKind::Required, ParamKind::Required],
            actual: vec![ParamKind::Required],
        }],
        "F011 FALSIFIED: arity drift not reported"
    );
}

/// F012: Renamed parameters are a name mismatch, not a type mismatch
///
/// # Falsification Attempt
/// Surrogate `foo(a, b)` against actual `foo(x, y)`.
#[test]
fn f012_renamed_params_are_name_mismatch_only() {
    let surrogate = SurrogateClass::new("MockThing");
    surrogate.sing(
        "foo",
        with_block([Param::required("a"), Param::required("b")]),
    );
    let actual = ClassShape::new("Thing")
        .instance_method("foo", [Param::required("x"), Param::required("y")]);

    let comparer = ApiComparer::new(&surrogate, &actual);
    assert!(
        comparer.instance_type_mismatches().is_empty(),
        "F012 FALSIFIED: same kinds reported as type mismatch"
    );
    let mismatches = comparer.instance_name_mismatches();
    assert_eq!(mismatches.len(), 1, "F012 FALSIFIED: rename not reported");
    assert_eq!(mismatches[0].surrogate, vec!["a", "b"], "F012 FALSIFIED");
    assert_eq!(mismatches[0].actual, vec!["x", "y"], "F012 FALSIFIED");
}

/// F013: Optional and keyword parameters are different kinds
///
/// # Falsification Attempt
/// Surrogate `foo(a, b = ..)` against actual `foo(a, b:)` with equal names.
#[test]
fn f013_optional_is_not_keyword() {
    let surrogate = SurrogateClass::new("MockThing");
    surrogate.sing(
        "foo",
        with_block([Param::required("a"), Param::optional("b")]),
    );
    let actual = ClassShape::new("Thing")
        .instance_method("foo", [Param::required("a"), Param::keyword("b")]);

    let comparer = ApiComparer::new(&surrogate, &actual);
    let mismatches = comparer.instance_type_mismatches();
    assert_eq!(mismatches.len(), 1, "F013 FALSIFIED: kind drift missed");
    assert_eq!(
        mismatches[0].actual,
        vec![ParamKind::Required, ParamKind::Keyword],
        "F013 FALSIFIED"
    );
    assert!(
        comparer.instance_name_mismatches().is_empty(),
        "F013 FALSIFIED: names are equal"
    );
}

/// F014: Class-level songs are checked on the class side
///
/// # Falsification Attempt
/// Drift a class song's block and expect only a class mismatch.
#[test]
fn f014_class_song_signature_checked() {
    let surrogate = SurrogateClass::new("MockClient");
    surrogate.sing_class("connect", with_block([Param::required("url")]));
    let actual = ClassShape::new("Client").class_method(
        "connect",
        [Param::required("url"), Param::keyword_rest("opts")],
    );

    let comparer = ApiComparer::new(&surrogate, &actual);
    assert_eq!(
        comparer.class_type_mismatches().len(),
        1,
        "F014 FALSIFIED: class drift missed"
    );
    assert!(
        comparer.instance_type_mismatches().is_empty(),
        "F014 FALSIFIED: class drift leaked into instance list"
    );
}

// =============================================================================
// F015-F017: What the surrogate side compares with
// =============================================================================

/// F015: A block-less song compares as `(*args)`
///
/// # Falsification Attempt
/// Compare a plain song against actual `(*args)` and against `(id)`.
#[test]
fn f015_blockless_song_is_catch_all() {
    let surrogate = SurrogateClass::new("MockRepo");
    surrogate.sing("find", Song::new());

    let splat = ClassShape::new("Repo").instance_method("find", [Param::rest("args")]);
    let comparer = ApiComparer::new(&surrogate, &splat);
    assert!(
        comparer.instance_type_mismatches().is_empty()
            && comparer.instance_name_mismatches().is_empty(),
        "F015 FALSIFIED: (*args) should match a block-less song"
    );

    let strict = ClassShape::new("Repo").instance_method("find", [Param::required("id")]);
    let comparer = ApiComparer::new(&surrogate, &strict);
    assert_eq!(
        comparer.instance_type_mismatches()[0].surrogate,
        vec![ParamKind::Rest],
        "F015 FALSIFIED: block-less song should compare as rest"
    );
}

/// F016: Declared parameters stand in for a block's
///
/// # Falsification Attempt
/// Declare `(id)` on a song with no block; it must match actual `(id)`.
#[test]
fn f016_declared_params_used() {
    let surrogate = SurrogateClass::new("MockRepo");
    surrogate.sing("find", Song::new().params([Param::required("id")]));
    let actual = ClassShape::new("Repo").instance_method("find", [Param::required("id")]);

    let method = Method::new(MethodKind::Instance, "find", &surrogate, &actual);
    assert_eq!(
        method.surrogate_parameters().ok(),
        Some(Signature::new([Param::required("id")])),
        "F016 FALSIFIED: declared params ignored"
    );
    assert!(method.types_match() && method.names_match(), "F016 FALSIFIED");
}

/// F017: Hand-written methods compare with their own signature
///
/// # Falsification Attempt
/// Define `preview(template)` and compare against `preview(template, locals)`.
#[test]
fn f017_defined_method_signature_used() {
    let surrogate = SurrogateClass::new("MockMailer");
    surrogate.define_method(
        "preview",
        Block::new([Param::required("template")], |_, _| Ok(Value::Nil)),
    );
    let actual = ClassShape::new("Mailer").instance_method(
        "preview",
        [Param::required("template"), Param::required("locals")],
    );

    let comparer = ApiComparer::new(&surrogate, &actual);
    assert_eq!(
        comparer.instance_type_mismatches().len(),
        1,
        "F017 FALSIFIED: defined method drift missed"
    );
}

// =============================================================================
// F018-F020: Unreflectable and absent signatures
// =============================================================================

/// F018: Unreflectable methods are excluded from both checks
///
/// # Falsification Attempt
/// Give the actual method a parameter with unknown kind and name.
#[test]
fn f018_unreflectable_excluded() {
    let surrogate = SurrogateClass::new("MockNative");
    surrogate.sing("call", with_block([Param::required("a")]));
    let actual = ClassShape::new("Native").instance_method("call", [Param::opaque()]);

    let comparer = ApiComparer::new(&surrogate, &actual);
    assert!(
        !comparer.all_methods()[0].reflectable(),
        "F018 FALSIFIED: opaque parameter treated as reflectable"
    );
    assert!(
        comparer.instance_type_mismatches().is_empty()
            && comparer.instance_name_mismatches().is_empty(),
        "F018 FALSIFIED: unreflectable method reported"
    );
}

/// F019: Missing methods have no signature to compare
///
/// # Falsification Attempt
/// Ask for the surrogate signature of a method only the actual class has.
#[test]
fn f019_absent_side_signature_is_error() {
    let surrogate = SurrogateClass::new("MockRepo");
    let actual = ClassShape::new("Repo").instance_method("save", [Param::required("record")]);

    let method = Method::new(MethodKind::Instance, "save", &surrogate, &actual);
    let err = method.surrogate_parameters().err();
    assert_eq!(
        err.map(|e| e.to_string()),
        Some("no method save to check the signature of".to_string()),
        "F019 FALSIFIED: wrong error for absent method"
    );
    assert!(!method.reflectable(), "F019 FALSIFIED");
}

/// F020: Unknown discriminators are rejected
///
/// # Falsification Attempt
/// Build a method record with `:module`.
#[test]
fn f020_bad_discriminator_rejected() {
    let surrogate = SurrogateClass::new("MockRepo");
    let actual = ClassShape::new("Repo");

    let result = Method::from_discriminator(":module", "find", &surrogate, &actual);
    assert!(
        matches!(result, Err(CompareError::Argument(_))),
        "F020 FALSIFIED: :module accepted"
    );
    let result = Method::from_discriminator(":instance", "find", &surrogate, &actual);
    assert!(result.is_ok(), "F020 FALSIFIED: :instance rejected");
}
