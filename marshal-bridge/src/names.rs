// Type name transcoding for conversion macros and enum/flag type tags.

use std::sync::LazyLock;

use regex::Regex;

use crate::target::{PREFIX_MARKER, TYPE_TAG};

// One or two capitals followed by a run of non-capitals: "Gtk", "CList", "Box".
static SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[A-Z]{1,2}[^A-Z]*").expect("segment pattern is a valid literal"));

/// Splits a type name into its capitalized segments.
pub fn segments(typename: &str) -> Vec<&str> {
    SEGMENT.find_iter(typename).map(|m| m.as_str()).collect()
}

/// Converts a type name to the uppercased, underscored form used by
/// conversion macros: `GtkWidget` becomes `_GTK_WIDGET`.
pub fn canonicalize(typename: &str) -> String {
    format!("_{}", segments(typename).join("_").to_uppercase())
}

/// Builds the runtime type-tag macro for a type name.
///
/// Framework types have their prefix folded into the tag
/// (`GtkWidget` -> `GTK_TYPE_WIDGET`); anything else is appended
/// whole (`FooBar` -> `GTK_TYPE_FOO_BAR`).
pub fn lookup_macro(typename: &str) -> String {
    let proper = canonicalize(typename);
    match proper.strip_prefix(PREFIX_MARKER) {
        Some(rest) if !rest.is_empty() => format!("{TYPE_TAG}{rest}"),
        _ => format!("{TYPE_TAG}{proper}"),
    }
}

/// Name of the cast macro for an object type, `GTK_WIDGET` for `GtkWidget`.
pub fn cast_macro(typename: &str) -> String {
    let proper = canonicalize(typename);
    proper[1..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_canonicalize_framework_type() {
        assert_eq!(canonicalize("GtkWidget"), "_GTK_WIDGET");
        assert_eq!(canonicalize("GdkEventButton"), "_GDK_EVENT_BUTTON");
    }

    #[test]
    fn test_canonicalize_two_letter_heads() {
        // Two leading capitals stay in one segment with the lowercase run.
        assert_eq!(canonicalize("GtkCList"), "_GTK_CLIST");
        assert_eq!(canonicalize("GtkHBox"), "_GTK_HBOX");
    }

    #[test]
    fn test_canonicalize_without_capitals() {
        assert_eq!(canonicalize("gint"), "_");
        assert_eq!(canonicalize(""), "_");
    }

    #[test]
    fn test_canonical_output_resplits_to_same_segments() {
        for name in ["GtkWidget", "GtkCList", "GdkWindow", "FooBarBaz", "GtkHBox"] {
            let expected: Vec<String> = segments(name).iter().map(|s| s.to_uppercase()).collect();
            let canonical = canonicalize(name);
            let resplit: Vec<String> = canonical[1..].split('_').map(str::to_string).collect();
            assert_eq!(resplit, expected, "segments drifted for {name}");
            assert_eq!(canonicalize(name), canonical);
        }
    }

    #[test]
    fn test_lookup_macro() {
        assert_eq!(lookup_macro("GtkWidget"), "GTK_TYPE_WIDGET");
        assert_eq!(lookup_macro("GtkWindowType"), "GTK_TYPE_WINDOW_TYPE");
        assert_eq!(lookup_macro("FooBar"), "GTK_TYPE_FOO_BAR");
        assert_eq!(lookup_macro("GdkEventMask"), "GTK_TYPE_GDK_EVENT_MASK");
    }

    #[test]
    fn test_lookup_macro_bare_prefix() {
        // Nothing follows the marker, so it is kept as a regular name.
        assert_eq!(lookup_macro("Gtk"), "GTK_TYPE_GTK");
    }

    #[test]
    fn test_cast_macro() {
        assert_eq!(cast_macro("GtkWidget"), "GTK_WIDGET");
        assert_eq!(cast_macro("GtkCList"), "GTK_CLIST");
    }
}
