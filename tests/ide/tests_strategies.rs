//! Strategy applicability and dispatch order.

use std::path::Path;

use memberscope::base::TextSize;
use memberscope::base::constants::{INTERFACE_MARKER, OVERRIDE_MARKER};
use memberscope::ide::{
    InterfaceMemberStrategy, MemberStrategy, ParentMethodStrategy, StrategyContext,
    fields_and_methods_at,
};

use crate::helpers::host_helpers::{analysis_from_sources, offset_after, offset_of};
use crate::helpers::source_fixtures::*;

// =============================================================================
// APPLICABILITY GUARDS
// =============================================================================

#[test]
fn test_interface_strategy_requires_an_interface() {
    let host = analysis_from_sources(&[("A.cls", PARENT_WITH_QUX), ("B.cls", CHILD_OF_A)]);
    let registry = host.registry();
    let class = registry.get_class("my.app.B").unwrap();
    let ctx = StrategyContext {
        registry,
        class: &class,
        offset: offset_after(CHILD_OF_A, "function qu"),
    };

    // B extends A but implements nothing: only the override strategy holds.
    assert!(InterfaceMemberStrategy.fields_and_methods(&ctx).is_none());
    assert!(ParentMethodStrategy.fields_and_methods(&ctx).is_some());
}

#[test]
fn test_parent_strategy_requires_a_parent() {
    let host = analysis_from_sources(&[("I.cls", INTERFACE_I), ("A.cls", CLASS_A_IMPLEMENTS_I)]);
    let registry = host.registry();
    let class = registry.get_class("my.app.A").unwrap();
    let ctx = StrategyContext {
        registry,
        class: &class,
        offset: offset_after(CLASS_A_IMPLEMENTS_I, "function fo"),
    };

    // A implements I but extends nothing: only the interface strategy holds.
    assert!(ParentMethodStrategy.fields_and_methods(&ctx).is_none());
    assert!(InterfaceMemberStrategy.fields_and_methods(&ctx).is_some());
}

// =============================================================================
// CURSOR PREDICATE
// =============================================================================

#[test]
fn test_cursor_at_member_name_start_counts() {
    let host = analysis_from_sources(&[("I.cls", INTERFACE_I), ("A.cls", CLASS_A_IMPLEMENTS_I)]);

    let offset = offset_of(CLASS_A_IMPLEMENTS_I, "fo()");
    let result = fields_and_methods_at(host.registry(), Path::new("A.cls"), offset);
    assert!(result.is_some(), "name start is part of the name");
}

#[test]
fn test_cursor_in_keyword_does_not_count() {
    let host = analysis_from_sources(&[("I.cls", INTERFACE_I), ("A.cls", CLASS_A_IMPLEMENTS_I)]);

    let offset = offset_of(CLASS_A_IMPLEMENTS_I, "function fo");
    let result = fields_and_methods_at(host.registry(), Path::new("A.cls"), offset);
    assert!(result.is_none(), "Got: {:?}", result);
}

#[test]
fn test_no_strategy_applies_at_the_class_header() {
    let host = analysis_from_sources(&[("I.cls", INTERFACE_I), ("A.cls", CLASS_A_IMPLEMENTS_I)]);

    let offset = offset_of(CLASS_A_IMPLEMENTS_I, "class A");
    let result = fields_and_methods_at(host.registry(), Path::new("A.cls"), offset);
    assert!(result.is_none());
}

// =============================================================================
// DISPATCH ORDER
// =============================================================================

#[test]
fn test_interface_obligations_outrank_override_suggestions() {
    let both = r#"
package my.app;

public class Both extends A implements I {
    public function fo() {}
}
"#;
    let host = analysis_from_sources(&[
        ("I.cls", INTERFACE_I),
        ("A.cls", PARENT_WITH_QUX),
        ("Both.cls", both),
    ]);

    let offset = offset_after(both, "function fo");
    let result = fields_and_methods_at(host.registry(), Path::new("Both.cls"), offset)
        .expect("Should resolve a member set. Got nothing");

    assert_eq!(result.class_name, INTERFACE_MARKER);
    let names: Vec<_> = result.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["foo"], "parent members must not bleed in");
}

#[test]
fn test_defined_empty_result_stops_the_dispatch() {
    // The parent is unknown, so the override suggestion set is empty but
    // still defined; dispatch returns it rather than falling through.
    let orphan =
        "package my.app; public class Orphan extends missing.Ghost { public var own = 1; }";
    let host = analysis_from_sources(&[("Orphan.cls", orphan)]);

    let offset = offset_of(orphan, "own");
    let result = fields_and_methods_at(host.registry(), Path::new("Orphan.cls"), offset)
        .expect("Should resolve a member set. Got nothing");

    assert_eq!(result.class_name, OVERRIDE_MARKER);
    assert!(result.is_empty());
}

#[test]
fn test_unknown_path_resolves_nothing() {
    let host = analysis_from_sources(&[("A.cls", PARENT_WITH_QUX)]);

    let result = fields_and_methods_at(host.registry(), Path::new("other.cls"), TextSize::new(0));
    assert!(result.is_none());
}
