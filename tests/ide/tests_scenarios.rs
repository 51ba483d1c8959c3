//! End-to-end suggestion scenarios through the [`Analysis`] API.
//!
//! [`Analysis`]: memberscope::ide::Analysis

use memberscope::base::TextSize;
use memberscope::base::constants::{INTERFACE_MARKER, OVERRIDE_MARKER};
use memberscope::hir::Visibility;

use crate::helpers::host_helpers::{analysis_from_sources, offset_after, offset_of};
use crate::helpers::source_fixtures::*;

#[test]
fn test_implementing_class_suggests_interface_contract() {
    let host = analysis_from_sources(&[("I.cls", INTERFACE_I), ("A.cls", CLASS_A_IMPLEMENTS_I)]);
    let analysis = host.analysis();

    let result = analysis
        .fields_and_methods("A.cls", offset_after(CLASS_A_IMPLEMENTS_I, "function fo"))
        .expect("Should suggest interface members. Got nothing");

    assert_eq!(result.class_name, INTERFACE_MARKER);
    let names: Vec<_> = result.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["foo"]);
    assert_eq!(result.methods[0].visibility, Visibility::Public);
    assert_eq!(result.methods[0].owner, "my.app.I");
    // The contract's private `_bar` never reaches the implementor.
    assert!(result.fields.is_empty(), "Got: {:?}", result.fields);
}

#[test]
fn test_subclass_suggests_parent_method_to_override() {
    let host = analysis_from_sources(&[("A.cls", PARENT_WITH_QUX), ("B.cls", CHILD_OF_A)]);
    let analysis = host.analysis();

    let result = analysis
        .fields_and_methods("B.cls", offset_after(CHILD_OF_A, "function qu"))
        .expect("Should suggest parent members. Got nothing");

    assert_eq!(result.class_name, OVERRIDE_MARKER);
    let names: Vec<_> = result.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["qux"]);
    assert_eq!(result.methods[0].visibility, Visibility::Protected);
    assert_eq!(result.methods[0].owner, "my.app.A");
}

#[test]
fn test_parent_suggestions_are_not_narrowed() {
    let host = analysis_from_sources(&[
        ("A.cls", PARENT_WITH_PRIVATE_COUNT),
        ("B.cls", CHILD_WITH_PUBLIC_COUNT),
    ]);
    let analysis = host.analysis();

    let result = analysis
        .fields_and_methods("B.cls", offset_of(CHILD_WITH_PUBLIC_COUNT, "count"))
        .expect("Should suggest parent members. Got nothing");

    // Override candidates keep the parent's full declaration list, private
    // members included; the caller decides what to surface.
    assert_eq!(result.class_name, OVERRIDE_MARKER);
    let names: Vec<_> = result.fields.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["count", "shared"]);
    assert_eq!(result.fields[0].visibility, Visibility::Private);
    assert_eq!(result.fields[0].owner, "my.app.A");
}

#[test]
fn test_interface_union_uses_directly_declared_members_only() {
    let host = analysis_from_sources(&[
        ("ICommon.cls", DIAMOND_COMMON),
        ("Left.cls", DIAMOND_LEFT),
        ("Right.cls", DIAMOND_RIGHT),
        ("D.cls", DIAMOND_BOTTOM),
    ]);
    let analysis = host.analysis();

    let result = analysis
        .fields_and_methods("D.cls", offset_after(DIAMOND_BOTTOM, "function d"))
        .expect("Should suggest interface members. Got nothing");

    // Each implemented interface contributes what it declares itself;
    // interfaces it extends stay out of the union.
    let names: Vec<_> = result.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["fromLeft", "fromRight"]);
}

#[test]
fn test_interface_union_keeps_first_declaration_of_a_name() {
    let first = "package my.app; public interface IFirst { public function ping(); }";
    let second = r#"
package my.app;

public interface ISecond {
    public function ping();
    public function pong();
}
"#;
    let class = r#"
package my.app;

public class Impl implements IFirst, ISecond {
    public function pi() {}
}
"#;
    let host = analysis_from_sources(&[
        ("IFirst.cls", first),
        ("ISecond.cls", second),
        ("Impl.cls", class),
    ]);
    let analysis = host.analysis();

    let result = analysis
        .fields_and_methods("Impl.cls", offset_after(class, "function pi"))
        .expect("Should suggest interface members. Got nothing");

    let names: Vec<_> = result.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["ping", "pong"]);
    assert_eq!(result.methods[0].owner, "my.app.IFirst");
}

#[test]
fn test_missing_interface_definition_degrades_to_empty() {
    let source = r#"
package my.app;

public class A implements missing.IGhost {
    public function fo() {}
}
"#;
    let host = analysis_from_sources(&[("A.cls", source)]);
    let analysis = host.analysis();

    let result = analysis
        .fields_and_methods("A.cls", offset_after(source, "function fo"))
        .expect("Should still resolve to a defined set. Got nothing");

    assert_eq!(result.class_name, INTERFACE_MARKER);
    assert!(result.is_empty());
}

#[test]
fn test_edit_changes_the_suggestions() {
    let mut host = analysis_from_sources(&[("I.cls", INTERFACE_I), ("A.cls", CLASS_A_IMPLEMENTS_I)]);

    // The contract grows a method; the next query sees it without any
    // explicit invalidation call.
    let grown = r#"
package my.app;

public interface I {
    public function foo();
    public function fresh();
}
"#;
    let errors = host.set_file_content("I.cls", grown);
    assert!(errors.is_empty(), "Got: {:?}", errors);

    let result = host
        .analysis()
        .fields_and_methods("A.cls", offset_after(CLASS_A_IMPLEMENTS_I, "function fo"))
        .expect("Should suggest interface members. Got nothing");

    let names: Vec<_> = result.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["foo", "fresh"]);
}

#[test]
fn test_cursor_on_parent_reference_resolves_its_class() {
    let host = analysis_from_sources(&[("A.cls", PARENT_WITH_QUX), ("B.cls", CHILD_OF_A)]);
    let analysis = host.analysis();

    // `class B extends A`: the bare `A` resolves through the registry.
    let result = analysis.class_name_at("B.cls", offset_of(CHILD_OF_A, "A {"));
    assert_eq!(result.as_deref(), Some("my.app.A"));

    // A name the registry has never seen resolves to nothing.
    let result = analysis.class_name_at("B.cls", offset_of(CHILD_OF_A, "qu"));
    assert_eq!(result, None);
}

#[test]
fn test_unknown_file_yields_no_suggestions() {
    let host = analysis_from_sources(&[("A.cls", PARENT_WITH_QUX)]);

    let result = host
        .analysis()
        .fields_and_methods("other.cls", TextSize::new(0));
    assert!(result.is_none());
}
