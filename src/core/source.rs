//! Call-site resolution for log records
//!
//! Every public emission entry point is `#[track_caller]`, so the location is
//! captured once at the application's call and passed down explicitly. Wrapper
//! layers inside the crate never shift the reported site.

use std::fmt;
use std::panic::Location;
use std::sync::OnceLock;

/// File and line of the application call that produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    file: &'static str,
    line: u32,
}

impl SourceLocation {
    pub fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Capture the caller of the outermost `#[track_caller]` frame
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Render as `path:line`, with `root` stripped from the front of the path
    /// when it matches.
    ///
    /// Paths captured by [`SourceLocation::caller`] are whatever the compiler
    /// was given: relative to the build's workspace root for the crate being
    /// built, absolute for dependencies built elsewhere (such as registry
    /// crates). Relative paths never match an absolute `root` and are rendered
    /// unchanged; absolute paths outside `root` stay absolute.
    pub fn relative_to(&self, root: &str) -> String {
        let file = self.file.replace('\\', "/");
        let file = if root.is_empty() {
            file.as_str()
        } else {
            file.strip_prefix(root).unwrap_or(&file)
        };
        format!("{}:{}", file, self.line)
    }
}

impl From<&'static Location<'static>> for SourceLocation {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// The process working directory at first use, `/`-separated and terminated.
///
/// Empty if the working directory cannot be read, in which case paths are
/// rendered as captured.
pub fn process_root() -> &'static str {
    static ROOT: OnceLock<String> = OnceLock::new();
    ROOT.get_or_init(|| match std::env::current_dir() {
        Ok(dir) => normalize_root(&dir.to_string_lossy()),
        Err(_) => String::new(),
    })
}

/// Normalize a directory path into a strip-able prefix
pub fn normalize_root(dir: &str) -> String {
    let mut root = dir.replace('\\', "/");
    if !root.is_empty() && !root.ends_with('/') {
        root.push('/');
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_reports_this_line() {
        let here = line!() + 1;
        let location = SourceLocation::caller();
        assert_eq!(location.line(), here);
        assert!(location.file().ends_with("source.rs"));
    }

    #[test]
    fn test_track_caller_skips_wrappers() {
        #[track_caller]
        fn inner() -> SourceLocation {
            SourceLocation::caller()
        }

        #[track_caller]
        fn outer() -> SourceLocation {
            inner()
        }

        let here = line!() + 1;
        let location = outer();
        assert_eq!(location.line(), here);
    }

    #[test]
    fn test_relative_to_strips_matching_root() {
        let location = SourceLocation::new("/srv/app/src/main.rs", 42);
        assert_eq!(location.relative_to("/srv/app/"), "src/main.rs:42");
        assert_eq!(location.relative_to("/opt/other/"), "/srv/app/src/main.rs:42");
        assert_eq!(location.relative_to(""), "/srv/app/src/main.rs:42");
    }

    #[test]
    fn test_relative_compiler_paths_are_unchanged() {
        let location = SourceLocation::new("src/main.rs", 9);
        assert_eq!(location.relative_to("/srv/app/"), "src/main.rs:9");
        assert_eq!(location.relative_to(""), "src/main.rs:9");
    }

    #[test]
    fn test_relative_to_normalizes_separators() {
        let location = SourceLocation::new("C:\\work\\app\\src\\lib.rs", 7);
        assert_eq!(location.relative_to("C:/work/app/"), "src/lib.rs:7");
    }

    #[test]
    fn test_normalize_root() {
        assert_eq!(normalize_root("/srv/app"), "/srv/app/");
        assert_eq!(normalize_root("/srv/app/"), "/srv/app/");
        assert_eq!(normalize_root("C:\\work"), "C:/work/");
        assert_eq!(normalize_root(""), "");
    }
}
