//! Naming configuration.
//!
//! The extension name is process-wide configuration read once per component
//! construction to derive the component id prefix. The framework never
//! mutates it; drivers (and tests) may.

use std::cell::RefCell;

/// Extension name used when nothing else was configured.
pub const DEFAULT_EXTENSION_NAME: &str = "Suntzu";

thread_local! {
    static EXTENSION_NAME: RefCell<String> = RefCell::new(DEFAULT_EXTENSION_NAME.to_string());
}

/// Current extension name.
pub fn extension_name() -> String {
    EXTENSION_NAME.with(|name| name.borrow().clone())
}

/// Override the extension name for components created afterwards.
pub fn set_extension_name(name: impl Into<String>) {
    let name = name.into();
    EXTENSION_NAME.with(|current| *current.borrow_mut() = name);
}

/// Id prefix derived from the extension name.
///
/// Lowercased, trimmed, and with every whitespace run replaced by `-`.
pub fn id_prefix() -> String {
    slugify(&extension_name())
}

fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Restore default settings (for testing).
pub fn reset_settings() {
    set_extension_name(DEFAULT_EXTENSION_NAME);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefix() {
        reset_settings();
        assert_eq!(id_prefix(), "suntzu");
    }

    #[test]
    fn test_prefix_collapses_whitespace() {
        set_extension_name("  Sun Tzu \t Stats ");
        assert_eq!(id_prefix(), "sun-tzu-stats");
        reset_settings();
        assert_eq!(extension_name(), DEFAULT_EXTENSION_NAME);
    }
}
