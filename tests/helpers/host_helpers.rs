//! Test helpers for setting up analysis hosts and cursor positions.

use memberscope::TextSize;
use memberscope::hir::ClassName;
use memberscope::ide::AnalysisHost;

/// Creates an AnalysisHost with a single class file at `test.cls`.
///
/// Returns the host and the fully qualified name the file declared.
pub fn analysis_from_class(source: &str) -> (AnalysisHost, ClassName) {
    let mut host = AnalysisHost::new();
    let errors = host.set_file_content("test.cls", source);
    assert!(errors.is_empty(), "Parse errors in 'test.cls': {:?}", errors);

    let class_name = host
        .analysis()
        .class_name_from_path("test.cls")
        .expect("File should declare a class after set_file_content");

    (host, class_name)
}

/// Creates an AnalysisHost with multiple files.
pub fn analysis_from_sources(files: &[(&str, &str)]) -> AnalysisHost {
    let mut host = AnalysisHost::new();
    for (path, content) in files {
        let errors = host.set_file_content(path, content);
        assert!(errors.is_empty(), "Parse errors in '{}': {:?}", path, errors);
    }
    host
}

/// Byte offset of the first occurrence of `needle` in `source`.
pub fn offset_of(source: &str, needle: &str) -> TextSize {
    let at = source
        .find(needle)
        .unwrap_or_else(|| panic!("'{}' not found in source", needle));
    TextSize::new(at as u32)
}

/// Byte offset just past the first occurrence of `needle`, i.e. where
/// the cursor sits after typing it.
pub fn offset_after(source: &str, needle: &str) -> TextSize {
    offset_of(source, needle) + TextSize::of(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_from_class_works() {
        let (host, class_name) =
            analysis_from_class("package my.app; public class Controller {}");
        assert_eq!(class_name, "my.app.Controller");
        assert_eq!(host.file_count(), 1);
    }

    #[test]
    fn test_offset_helpers() {
        let source = "public var count = 0;";
        assert_eq!(offset_of(source, "count"), TextSize::new(11));
        assert_eq!(offset_after(source, "count"), TextSize::new(16));
    }
}
