//! Domain constants shared across the crate.

/// File extension for class script files (without the dot).
pub const CLASS_FILE_EXT: &str = "cls";

/// Directory containing the built-in class library, resolved relative
/// to the executable or the working directory.
pub const LIBRARY_DIR: &str = "script.lib";

/// Framework version assumed when the project does not configure one.
pub const DEFAULT_FRAMEWORK_VERSION: &str = "4.0";

/// Synthetic class name tagging results that list interface members
/// offered for implementation.
pub const INTERFACE_MARKER: &str = "__interface__";

/// Synthetic class name tagging results that list parent members
/// offered for overriding.
pub const OVERRIDE_MARKER: &str = "__override__";
