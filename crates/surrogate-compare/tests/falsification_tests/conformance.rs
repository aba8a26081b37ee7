//! Falsification Tests: Category A - Method Presence (F001-F010)
//!
//! A surrogate is only useful if it answers to the same names as the class
//! it replaces. These tests try to make the comparator miss a drifted name
//! or report one that does not exist.

use surrogate_compare::{ApiComparer, Method};
use surrogate_core::{
    Block, ClassShape, MethodKind, Param, Song, SurrogateClass, Value, Visibility,
};

fn names(methods: &[&Method]) -> Vec<String> {
    methods.iter().map(|m| m.name().to_string()).collect()
}

fn nil_block(params: impl IntoIterator<Item = Param>) -> Block {
    Block::new(params, |_, _| Ok(Value::Nil))
}

// =============================================================================
// F001-F004: Extra and missing methods
// =============================================================================

/// F001: A song the actual class lacks is reported as extra
///
/// # Falsification Attempt
/// Sing `flush` on a surrogate of a class without `flush`.
#[test]
fn f001_extra_instance_method_detected() {
    let surrogate = SurrogateClass::new("MockCache");
    surrogate.sing("get", Song::new()).sing("flush", Song::new());
    let actual = ClassShape::new("Cache").instance_method("get", [Param::rest("args")]);

    let comparer = ApiComparer::new(&surrogate, &actual);
    assert_eq!(
        names(&comparer.extra_instance_methods()),
        vec!["flush"],
        "F001 FALSIFIED: flush should be the only extra instance method"
    );
    assert!(
        comparer.missing_instance_methods().is_empty(),
        "F001 FALSIFIED: nothing is missing"
    );
}

/// F002: A class method the surrogate lacks is reported as missing
///
/// # Falsification Attempt
/// Give the actual class `.connect` and sing only instance songs.
#[test]
fn f002_missing_class_method_detected() {
    let surrogate = SurrogateClass::new("MockCache");
    surrogate.sing("get", Song::new());
    let actual = ClassShape::new("Cache")
        .instance_method("get", [Param::rest("args")])
        .class_method("connect", [Param::required("url")]);

    let comparer = ApiComparer::new(&surrogate, &actual);
    assert_eq!(
        names(&comparer.missing_class_methods()),
        vec!["connect"],
        "F002 FALSIFIED: connect should be missing"
    );
    assert!(
        comparer.missing_instance_methods().is_empty(),
        "F002 FALSIFIED: class and instance namespaces leaked into each other"
    );
}

/// F003: Same name on different levels is two methods
///
/// # Falsification Attempt
/// Sing `count` as an instance song while the actual class has `.count`.
#[test]
fn f003_levels_are_distinct() {
    let surrogate = SurrogateClass::new("MockRepo");
    surrogate.sing("count", Song::new());
    let actual = ClassShape::new("Repo").class_method("count", [Param::rest("args")]);

    let comparer = ApiComparer::new(&surrogate, &actual);
    assert_eq!(
        names(&comparer.extra_instance_methods()),
        vec!["count"],
        "F003 FALSIFIED: instance count should be extra"
    );
    assert_eq!(
        names(&comparer.missing_class_methods()),
        vec!["count"],
        "F003 FALSIFIED: class count should be missing"
    );
}

/// F004: Extra and missing never overlap
///
/// # Falsification Attempt
/// Build a mixed API and check every reported name against both lists.
#[test]
fn f004_extra_and_missing_disjoint() {
    let surrogate = SurrogateClass::new("MockRepo");
    surrogate
        .sing("find", Song::new())
        .sing("purge", Song::new())
        .sing_class("all", Song::new());
    let actual = ClassShape::new("Repo")
        .instance_method("find", [Param::rest("args")])
        .instance_method("save", [Param::required("record")])
        .class_method("all", [Param::rest("args")])
        .class_method("count", []);

    let comparer = ApiComparer::new(&surrogate, &actual);
    let extra = names(&comparer.extra_instance_methods());
    let missing = names(&comparer.missing_instance_methods());
    assert!(
        extra.iter().all(|name| !missing.contains(name)),
        "F004 FALSIFIED: {extra:?} overlaps {missing:?}"
    );
    assert_eq!(extra, vec!["purge"], "F004 FALSIFIED: wrong extra set");
    assert_eq!(missing, vec!["save"], "F004 FALSIFIED: wrong missing set");
}

// =============================================================================
// F005-F007: Generated helpers
// =============================================================================

/// F005: Generated helpers are never extra
///
/// # Falsification Attempt
/// Sing on both levels; `will_x`, `will_x_queue` and `invocations` exist on
/// the surrogate but not on the actual class.
#[test]
fn f005_helpers_never_extra() {
    let surrogate = SurrogateClass::new("MockMailer");
    surrogate
        .sing("deliver", Song::new())
        .sing_class("configure", Song::new());
    let actual = ClassShape::new("Mailer")
        .instance_method("deliver", [Param::rest("args")])
        .class_method("configure", [Param::rest("args")]);

    let comparer = ApiComparer::new(&surrogate, &actual);
    assert!(
        comparer.extra_instance_methods().is_empty(),
        "F005 FALSIFIED: instance helpers reported as extra"
    );
    assert!(
        comparer.extra_class_methods().is_empty(),
        "F005 FALSIFIED: class helpers reported as extra"
    );
}

/// F006: Helper names are excluded even when the actual class defines them
///
/// # Falsification Attempt
/// Give the actual class real `will_deliver` and `invocations` methods.
#[test]
fn f006_helpers_never_missing() {
    let surrogate = SurrogateClass::new("MockMailer");
    surrogate.sing("deliver", Song::new());
    let actual = ClassShape::new("Mailer")
        .instance_method("deliver", [Param::rest("args")])
        .instance_method("will_deliver", [Param::required("value")])
        .instance_method("will_deliver_queue", [Param::rest("values")])
        .instance_method("invocations", [Param::required("name")]);

    let comparer = ApiComparer::new(&surrogate, &actual);
    assert!(
        comparer.missing_instance_methods().is_empty(),
        "F006 FALSIFIED: helper names reported missing: {:?}",
        names(&comparer.missing_instance_methods())
    );
    let universe: Vec<&str> = comparer.all_methods().iter().map(Method::name).collect();
    assert_eq!(
        universe,
        vec!["deliver"],
        "F006 FALSIFIED: helper names entered the universe"
    );
}

/// F007: Hand-written methods are compared like any other
///
/// # Falsification Attempt
/// Define a public method that is not a song; it must count as extra.
#[test]
fn f007_defined_methods_participate() {
    let surrogate = SurrogateClass::new("MockMailer");
    surrogate
        .sing("deliver", Song::new())
        .define_method("preview", nil_block([]));
    let actual = ClassShape::new("Mailer").instance_method("deliver", [Param::rest("args")]);

    let comparer = ApiComparer::new(&surrogate, &actual);
    let extra = comparer.extra_instance_methods();
    assert_eq!(names(&extra), vec!["preview"], "F007 FALSIFIED");
    assert!(
        !extra[0].is_api_method(),
        "F007 FALSIFIED: a defined method is not a song"
    );
}

// =============================================================================
// F008-F010: Visibility and inheritance
// =============================================================================

/// F008: A private method on the surrogate does not satisfy a public one
///
/// # Falsification Attempt
/// Define `secret` privately while the actual class exposes it.
#[test]
fn f008_private_method_is_missing() {
    let surrogate = SurrogateClass::new("MockVault");
    surrogate.define(
        MethodKind::Instance,
        "secret",
        nil_block([]),
        Visibility::Private,
    );
    let actual = ClassShape::new("Vault").instance_method("secret", []);

    let comparer = ApiComparer::new(&surrogate, &actual);
    assert_eq!(
        names(&comparer.missing_instance_methods()),
        vec!["secret"],
        "F008 FALSIFIED: private method counted as public"
    );
}

/// F009: Inherited methods count as present on both sides
///
/// # Falsification Attempt
/// Put the actual method on a superclass and the surrogate song on the
/// class a reprise derives from.
#[test]
fn f009_inherited_methods_present() {
    let base = SurrogateClass::new("MockRepo");
    base.sing("find", Song::new());
    let surrogate = base.reprise();
    let actual = ClassShape::new("UserRepo")
        .superclass(ClassShape::new("Repo").instance_method("find", [Param::rest("args")]));

    let comparer = ApiComparer::new(&surrogate, &actual);
    assert!(
        comparer.extra_instance_methods().is_empty()
            && comparer.missing_instance_methods().is_empty(),
        "F009 FALSIFIED: inherited method reported as drift"
    );
    let find = &comparer.all_methods()[0];
    assert!(find.inherited_on_surrogate(), "F009 FALSIFIED: surrogate side");
    assert!(find.inherited_on_actual(), "F009 FALSIFIED: actual side");
}

/// F010: Comparing an instance compares its class
///
/// # Falsification Attempt
/// Build comparers from a class and from one of its instances.
#[test]
fn f010_instance_comparison_uses_class() {
    let surrogate = SurrogateClass::new("MockRepo");
    surrogate.sing("find", Song::new()).sing("purge", Song::new());
    let actual = ClassShape::new("Repo").instance_method("find", [Param::rest("args")]);
    let instance = surrogate.new_instance(&[]).unwrap();

    let from_class = ApiComparer::new(&surrogate, &actual);
    let from_instance = ApiComparer::for_instance(&instance, &actual);
    assert_eq!(
        names(&from_class.extra_instance_methods()),
        names(&from_instance.extra_instance_methods()),
        "F010 FALSIFIED: instance and class comparisons differ"
    );
    assert_eq!(from_instance.surrogate_name(), "MockRepo", "F010 FALSIFIED");
}
