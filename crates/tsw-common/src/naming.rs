//! Identifier mangling conventions.
//!
//! Internal names are deterministic, path-qualified strings that identify
//! program elements uniquely. Downstream phases depend on these exact
//! strings, so the delimiters and prefixes here are wire format, not style.
//!
//! - `<sourcePath>/<name>` - a top-level declaration in a source file
//! - `<parent>.<name>` - a static member or namespace member
//! - `<parent>#<name>` - an instance member
//! - `get:<name>` / `set:<name>` - accessor simple names

/// Separates a source file's internal path from a simple name.
pub const PATH_DELIMITER: &str = "/";

/// Separates a class or namespace internal name from a static member name.
pub const STATIC_DELIMITER: &str = ".";

/// Separates a class internal name from an instance member name.
pub const INSTANCE_DELIMITER: &str = "#";

/// Prefix applied to a getter's simple name.
pub const GETTER_PREFIX: &str = "get:";

/// Prefix applied to a setter's simple name.
pub const SETTER_PREFIX: &str = "set:";

/// Internal name of a top-level declaration: `<sourcePath>/<name>`.
pub fn mangle_path(source_path: &str, name: &str) -> String {
    let mut out = String::with_capacity(source_path.len() + PATH_DELIMITER.len() + name.len());
    out.push_str(source_path);
    out.push_str(PATH_DELIMITER);
    out.push_str(name);
    out
}

/// Internal name of a static or namespace member: `<parent>.<name>`.
pub fn mangle_static(parent: &str, name: &str) -> String {
    let mut out = String::with_capacity(parent.len() + STATIC_DELIMITER.len() + name.len());
    out.push_str(parent);
    out.push_str(STATIC_DELIMITER);
    out.push_str(name);
    out
}

/// Internal name of an instance member: `<parent>#<name>`.
pub fn mangle_instance(parent: &str, name: &str) -> String {
    let mut out = String::with_capacity(parent.len() + INSTANCE_DELIMITER.len() + name.len());
    out.push_str(parent);
    out.push_str(INSTANCE_DELIMITER);
    out.push_str(name);
    out
}

/// Simple name of a getter for the property `name`.
pub fn getter_name(name: &str) -> String {
    format!("{GETTER_PREFIX}{name}")
}

/// Simple name of a setter for the property `name`.
pub fn setter_name(name: &str) -> String {
    format!("{SETTER_PREFIX}{name}")
}
