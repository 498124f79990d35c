//! Call-site capture
//!
//! Every public logging verb is `#[track_caller]`, so the location reported by
//! [`std::panic::Location::caller`] is the application's call rather than a
//! frame inside this crate. The macros in [`crate::macros`] also know the
//! enclosing function at compile time. For plain method calls the function is
//! found once per call site by walking the stack with `backtrace` and is then
//! cached.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::panic::Location;
use std::sync::OnceLock;

/// Reported when no frame of the stack can be attributed to the call site
pub const UNKNOWN_FUNCTION: &str = "unknown";

/// Frames whose symbols start with these belong to the logging machinery
const INTERNAL_PREFIXES: &[&str] = &[
    "backtrace::",
    "rust_pooled_logger::core::",
    "rust_pooled_logger::global::",
];

type FunctionCache = RwLock<HashMap<(&'static str, u32), &'static str>>;

static FUNCTIONS: OnceLock<FunctionCache> = OnceLock::new();

/// Where a log call was made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    /// Fully qualified path of the enclosing function, when known
    pub func: Option<&'static str>,
}

impl CallSite {
    pub const fn new(file: &'static str, line: u32, func: Option<&'static str>) -> Self {
        Self { file, line, func }
    }

    /// The location of the nearest caller not marked `#[track_caller]`
    #[track_caller]
    #[inline]
    pub fn caller() -> Self {
        Location::caller().into()
    }

    /// Fill in the enclosing function if it is not known yet.
    ///
    /// Must be called on the logging thread while the call that produced
    /// this site is still on the stack.
    pub fn resolved(self) -> Self {
        match self.func {
            Some(_) => self,
            None => Self {
                func: Some(resolve_function(self.file, self.line)),
                ..self
            },
        }
    }

    /// The enclosing function, or [`UNKNOWN_FUNCTION`]
    pub fn function(&self) -> &'static str {
        self.func.unwrap_or(UNKNOWN_FUNCTION)
    }

    /// `"<file>:<line>"`
    pub fn file_line(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }
}

impl From<&'static Location<'static>> for CallSite {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line(), None)
    }
}

/// Name of the function containing `file:line`, cached per call site.
fn resolve_function(file: &'static str, line: u32) -> &'static str {
    let cache = FUNCTIONS.get_or_init(Default::default);
    if let Some(name) = cache.read().get(&(file, line)).copied() {
        return name;
    }

    let name: &'static str = match walk_stack(file, line) {
        Some(name) => Box::leak(name.into_boxed_str()),
        None => UNKNOWN_FUNCTION,
    };
    *cache.write().entry((file, line)).or_insert(name)
}

/// Prefer the frame whose debug info points at `file:line`. Without debug
/// info, fall back to the first frame outside the logging machinery.
fn walk_stack(file: &str, line: u32) -> Option<String> {
    let mut at_site = None;
    let mut first_external = None;

    backtrace::trace(|frame| {
        backtrace::resolve_frame(frame, |symbol| {
            if at_site.is_some() {
                return;
            }
            let Some(name) = symbol.name().map(|n| format!("{:#}", n)) else {
                return;
            };

            let matches_site = symbol.lineno() == Some(line)
                && symbol.filename().is_some_and(|path| path.ends_with(file));
            if matches_site {
                at_site = Some(name);
            } else if first_external.is_none() && !is_internal(&name) {
                first_external = Some(name);
            }
        });
        at_site.is_none()
    });

    at_site
        .or(first_external)
        .map(|name| strip_closures(&name).to_owned())
}

fn is_internal(symbol: &str) -> bool {
    let path = symbol.trim_start_matches('<');
    INTERNAL_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) && !path.contains("::tests::")
}

fn strip_closures(mut name: &str) -> &str {
    while let Some(stripped) = name.strip_suffix("::{{closure}}") {
        name = stripped;
    }
    name
}

/// Strip the marker item and closure segments from a type name obtained
/// inside a function, leaving the enclosing function's path.
#[doc(hidden)]
pub fn enclosing_function(marker_type_name: &'static str) -> &'static str {
    let name = marker_type_name
        .rsplit_once("::")
        .map_or(marker_type_name, |(path, _marker)| path);
    strip_closures(name)
}

/// Capture the call site, including the enclosing function, at the macro
/// invocation point.
#[doc(hidden)]
#[macro_export]
macro_rules! __call_site {
    () => {{
        fn __here() {}
        $crate::CallSite::new(
            ::core::file!(),
            ::core::line!(),
            ::core::option::Option::Some($crate::core::caller::enclosing_function(
                ::std::any::type_name_of_val(&__here),
            )),
        )
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn tracked() -> CallSite {
        CallSite::caller()
    }

    #[test]
    fn test_track_caller_reports_call_line() {
        let expected = line!() + 1;
        let site = tracked();
        assert_eq!(site.line, expected);
        assert!(site.file.ends_with("caller.rs"));
        assert_eq!(site.func, None);
    }

    #[test]
    fn test_enclosing_function() {
        assert_eq!(enclosing_function("app::server::run::__here"), "app::server::run");
        assert_eq!(
            enclosing_function("app::main::{{closure}}::{{closure}}::__here"),
            "app::main"
        );
        assert_eq!(enclosing_function("__here"), "__here");
    }

    #[test]
    fn test_resolved_finds_enclosing_function() {
        let site = tracked().resolved();
        assert!(
            site.function().ends_with("test_resolved_finds_enclosing_function"),
            "{}",
            site.function()
        );

        // cached per call site
        let again = CallSite::new(site.file, site.line, None).resolved();
        assert!(std::ptr::eq(site.function(), again.function()));
    }

    #[test]
    fn test_resolved_keeps_known_function() {
        let site = CallSite::new("src/main.rs", 1, Some("app::main")).resolved();
        assert_eq!(site.func, Some("app::main"));
        assert_eq!(CallSite::new("src/main.rs", 1, None).function(), UNKNOWN_FUNCTION);
    }

    #[test]
    fn test_internal_frames() {
        assert!(is_internal("rust_pooled_logger::core::logger::Logger::info"));
        assert!(is_internal("<rust_pooled_logger::core::logger::LogWriter as std::io::Write>::write"));
        assert!(is_internal("backtrace::backtrace::trace"));
        assert!(!is_internal("rust_pooled_logger::core::logger::tests::test_level_gate"));
        assert!(!is_internal("app::main"));
        assert_eq!(strip_closures("app::main::{{closure}}::{{closure}}"), "app::main");
    }

    #[test]
    fn test_macro_captures_function() {
        let site = crate::__call_site!();
        let func = site.func.unwrap();
        assert!(func.ends_with("test_macro_captures_function"), "{}", func);
        assert_eq!(site.file_line(), format!("{}:{}", site.file, site.line));
    }
}
