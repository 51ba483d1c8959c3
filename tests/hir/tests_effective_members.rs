//! Effective member collection: parent chains, interfaces, de-duplication,
//! and cycle detection.

use memberscope::hir::{HierarchyError, Member};

use crate::helpers::host_helpers::{analysis_from_class, analysis_from_sources};
use crate::helpers::source_fixtures::*;

fn names(members: &[Member]) -> Vec<&str> {
    members.iter().map(|m| m.name.as_str()).collect()
}

// =============================================================================
// PARENT CHAIN ORDER
// =============================================================================

#[test]
fn test_own_members_only_when_not_inherited() {
    let host = analysis_from_sources(&[
        ("Top.cls", CHAIN_GRANDPARENT),
        ("Middle.cls", CHAIN_PARENT),
        ("Bottom.cls", CHAIN_CHILD),
    ]);
    let analysis = host.analysis();

    let fields = analysis.class_fields("my.app.Bottom", false).unwrap();
    assert_eq!(names(&fields), vec!["bottom"]);
}

#[test]
fn test_inherited_fields_nearest_first() {
    let host = analysis_from_sources(&[
        ("Top.cls", CHAIN_GRANDPARENT),
        ("Middle.cls", CHAIN_PARENT),
        ("Bottom.cls", CHAIN_CHILD),
    ]);
    let analysis = host.analysis();

    let fields = analysis.class_fields("my.app.Bottom", true).unwrap();
    assert_eq!(names(&fields), vec!["bottom", "middle", "root"]);
}

#[test]
fn test_overridden_method_keeps_nearest_owner() {
    let host = analysis_from_sources(&[
        ("Top.cls", CHAIN_GRANDPARENT),
        ("Middle.cls", CHAIN_PARENT),
        ("Bottom.cls", CHAIN_CHILD),
    ]);
    let analysis = host.analysis();

    // Both Middle and Top declare `describe`; the nearer one wins.
    let methods = analysis.class_methods("my.app.Bottom", true).unwrap();
    assert_eq!(names(&methods), vec!["describe"]);
    assert_eq!(methods[0].owner, "my.app.Middle");
}

#[test]
fn test_subclass_field_shadows_ancestor_field() {
    let host = analysis_from_sources(&[
        ("A.cls", PARENT_WITH_PRIVATE_COUNT),
        ("B.cls", CHILD_WITH_PUBLIC_COUNT),
    ]);
    let analysis = host.analysis();

    let fields = analysis.class_fields("my.app.B", true).unwrap();

    let count_entries: Vec<_> = fields.iter().filter(|m| m.name == "count").collect();
    assert_eq!(count_entries.len(), 1, "Got: {:?}", names(&fields));
    assert_eq!(count_entries[0].owner, "my.app.B");

    // The ancestor's other field still flows through.
    assert!(names(&fields).contains(&"shared"));
}

#[test]
fn test_fields_and_methods_deduplicate_independently() {
    let host = analysis_from_sources(&[
        (
            "P.cls",
            "package my.app; public class P { public var value = 1; }",
        ),
        (
            "C.cls",
            "package my.app; public class C extends P { public function value() {} }",
        ),
    ]);
    let analysis = host.analysis();

    // A field and a method may share a name; the two lists are collected
    // and de-duplicated separately.
    let fields = analysis.class_fields("my.app.C", true).unwrap();
    let methods = analysis.class_methods("my.app.C", true).unwrap();

    assert_eq!(names(&fields), vec!["value"]);
    assert_eq!(fields[0].owner, "my.app.P");
    assert_eq!(names(&methods), vec!["value"]);
    assert_eq!(methods[0].owner, "my.app.C");
}

#[test]
fn test_unknown_ancestor_contributes_nothing() {
    let (host, class_name) = analysis_from_class(
        "package my.app; public class B extends missing.Ghost { public var own = 1; }",
    );
    let analysis = host.analysis();

    let fields = analysis.class_fields(&class_name, true).unwrap();
    assert_eq!(names(&fields), vec!["own"]);
}

// =============================================================================
// INTERFACE CONTRIBUTIONS
// =============================================================================

#[test]
fn test_interfaces_come_after_parent_chain() {
    let host = analysis_from_sources(&[
        (
            "IExtra.cls",
            "package my.app; public interface IExtra { public function extra(); }",
        ),
        (
            "P.cls",
            "package my.app; public class P { public function inherited() {} }",
        ),
        (
            "C.cls",
            "package my.app; public class C extends P implements IExtra { public function own() {} }",
        ),
    ]);
    let analysis = host.analysis();

    let methods = analysis.class_methods("my.app.C", true).unwrap();
    assert_eq!(names(&methods), vec!["own", "inherited", "extra"]);
}

#[test]
fn test_interface_seeds_collected_nearest_first() {
    let host = analysis_from_sources(&[
        (
            "IChild.cls",
            "package my.app; public interface IChild { public function fromChild(); }",
        ),
        (
            "IParent.cls",
            "package my.app; public interface IParent { public function fromParent(); }",
        ),
        (
            "P.cls",
            "package my.app; public class P implements IParent {}",
        ),
        (
            "C.cls",
            "package my.app; public class C extends P implements IChild {}",
        ),
    ]);
    let analysis = host.analysis();

    // The class's own interfaces expand before the ones its ancestors
    // brought in.
    let methods = analysis.class_methods("my.app.C", true).unwrap();
    assert_eq!(names(&methods), vec!["fromChild", "fromParent"]);
}

#[test]
fn test_diamond_interface_counted_once() {
    let host = analysis_from_sources(&[
        ("ICommon.cls", DIAMOND_COMMON),
        ("Left.cls", DIAMOND_LEFT),
        ("Right.cls", DIAMOND_RIGHT),
        ("D.cls", DIAMOND_BOTTOM),
    ]);
    let analysis = host.analysis();

    let methods = analysis.class_methods("my.app.D", true).unwrap();
    assert_eq!(
        names(&methods),
        vec!["d", "fromLeft", "shared", "fromRight"],
        "depth-first in declared order, diamond expanded once"
    );
}

#[test]
fn test_interface_reaching_into_chain_deduplicates() {
    // IBack names the class's own parent; that back edge is a diamond,
    // not a cycle, because P is not on the interface expansion path.
    let host = analysis_from_sources(&[
        (
            "P.cls",
            "package my.app; public class P { public function fromParent() {} }",
        ),
        (
            "IBack.cls",
            "package my.app; public interface IBack extends P { public function fromBack(); }",
        ),
        (
            "C.cls",
            "package my.app; public class C extends P implements IBack {}",
        ),
    ]);
    let analysis = host.analysis();

    let methods = analysis.class_methods("my.app.C", true).unwrap();
    assert_eq!(names(&methods), vec!["fromParent", "fromBack"]);
}

#[test]
fn test_unknown_interface_is_skipped() {
    let (host, class_name) = analysis_from_class(
        "package my.app; public class C implements missing.IGhost { public var own = 1; }",
    );
    let analysis = host.analysis();

    let fields = analysis.class_fields(&class_name, true).unwrap();
    assert_eq!(names(&fields), vec!["own"]);
}

// =============================================================================
// CYCLES
// =============================================================================

#[test]
fn test_parent_cycle_is_reported() {
    let host = analysis_from_sources(&[("A.cls", CYCLE_A), ("B.cls", CYCLE_B)]);
    let analysis = host.analysis();

    let result = analysis.class_methods("my.app.A", true);
    assert!(
        matches!(result, Err(HierarchyError::CyclicHierarchy { .. })),
        "Got: {:?}",
        result
    );
}

#[test]
fn test_self_extension_is_reported() {
    let host = analysis_from_sources(&[(
        "Selfie.cls",
        "package my.app; public class Selfie extends Selfie {}",
    )]);
    let analysis = host.analysis();

    let result = analysis.class_fields("my.app.Selfie", true);
    assert!(matches!(
        result,
        Err(HierarchyError::CyclicHierarchy { .. })
    ));
}

#[test]
fn test_interface_cycle_is_reported() {
    let host = analysis_from_sources(&[
        (
            "IA.cls",
            "package my.app; public interface IA extends IB {}",
        ),
        (
            "IB.cls",
            "package my.app; public interface IB extends IA {}",
        ),
        (
            "C.cls",
            "package my.app; public class C implements IA {}",
        ),
    ]);
    let analysis = host.analysis();

    let result = analysis.class_methods("my.app.C", true);
    assert!(
        matches!(result, Err(HierarchyError::CyclicHierarchy { .. })),
        "Got: {:?}",
        result
    );
}

#[test]
fn test_cycle_error_names_the_loop() {
    let host = analysis_from_sources(&[("A.cls", CYCLE_A), ("B.cls", CYCLE_B)]);
    let analysis = host.analysis();

    let error = analysis.class_methods("my.app.A", true).unwrap_err();
    let message = error.to_string();
    assert!(message.contains("my.app.A"), "Got: {}", message);
    assert!(message.contains("my.app.B"), "Got: {}", message);
}

#[test]
fn test_registry_usable_after_cycle_error() {
    let host = analysis_from_sources(&[
        ("A.cls", CYCLE_A),
        ("B.cls", CYCLE_B),
        ("Simple.cls", SIMPLE_CLASS),
    ]);
    let analysis = host.analysis();

    assert!(analysis.class_methods("my.app.A", true).is_err());

    // The broken hierarchy must not poison unrelated queries.
    let fields = analysis.class_fields("my.app.Simple", true).unwrap();
    assert!(fields.is_empty());
    assert!(analysis.get_class("my.app.B").is_some());
}
