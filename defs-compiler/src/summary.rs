// Human-readable listing of a parsed definition set, and writing of the
// finished text to stdout or a file.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::definitions::{EnumKind, ObjectDef};
use crate::defs_parser::DefsParser;
use crate::error::DefsError;

/// `  GtkEntry : GtkWidget, new gtk_entry_new, 3 method(s)`
pub fn object_line<B>(parser: &DefsParser<B>, obj: &ObjectDef) -> String {
    let mut line = format!("  {}", obj.c_name);
    if let Some(parent) = parser.find_parent(obj) {
        line.push_str(&format!(" : {}", parent.c_name));
    } else if let Some(parent) = obj.parent_c_type() {
        line.push_str(&format!(" : {parent} (undefined)"));
    }
    match parser.find_constructor(obj) {
        Some(ctor) => line.push_str(&format!(", new {}", ctor.c_name)),
        None => line.push_str(", no constructor"),
    }
    line.push_str(&format!(", {} method(s)\n", parser.find_methods(obj).len()));
    line
}

/// Objects, functions and enums in registration order. With `object`, only
/// that object's line followed by its methods.
pub fn summary<B>(parser: &DefsParser<B>, object: Option<&str>) -> Result<String, DefsError> {
    let mut out = String::new();

    if let Some(name) = object {
        let obj = parser
            .find_object(name)
            .ok_or_else(|| DefsError::UnknownObject(name.to_string()))?;
        out.push_str(&object_line(parser, obj));
        for method in parser.find_methods(obj) {
            out.push_str(&format!("    {}\n", method.c_name));
        }
        return Ok(out);
    }

    out.push_str(&format!("objects ({}):\n", parser.objects().len()));
    for obj in parser.objects() {
        out.push_str(&object_line(parser, obj));
    }
    out.push_str(&format!("functions ({}):\n", parser.functions().len()));
    for func in parser.functions() {
        out.push_str(&format!("  {}\n", func.c_name));
    }
    out.push_str(&format!("enums ({}):\n", parser.enums().len()));
    for def in parser.enums() {
        let kind = match def.kind {
            EnumKind::Enum => "enum",
            EnumKind::Flags => "flags",
        };
        out.push_str(&format!("  {} [{}, {} value(s)]\n", def.c_name, kind, def.values.len()));
    }
    Ok(out)
}

/// Writes `text` to `out`, creating missing parent directories, or to
/// stdout when no path is given.
pub fn write_output(out: Option<&Path>, text: &str) -> Result<(), DefsError> {
    let Some(path) = out else {
        let mut stdout = std::io::stdout().lock();
        return stdout.write_all(text.as_bytes()).map_err(|source| DefsError::Io {
            path: "<stdout>".into(),
            source,
        });
    };

    let io_error = |source| DefsError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, text).map_err(io_error)?;
    info!(path = %path.display(), bytes = text.len(), "emitted output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DEFS: &str = r#"
(object Widget (in-module Gtk) (parent Object (Gtk)) (c-name GtkWidget))
(object Entry (in-module Gtk) (parent Widget (Gtk)) (c-name GtkEntry))
(function gtk_entry_new (is-constructor-of GtkEntry) (return-type GtkWidget*))
(method show (of-object Widget (Gtk)) (c-name gtk_widget_show))
(method set_text (of-object Entry (Gtk)) (c-name gtk_entry_set_text))
(method get_text (of-object Entry (Gtk)) (c-name gtk_entry_get_text))
(function gtk_main)
(enum StateType (in-module Gtk) (c-name GtkStateType)
  (value (name normal) (c-name GTK_STATE_NORMAL)))
(flags AttachOptions (in-module Gtk) (c-name GtkAttachOptions))
"#;

    fn parsed() -> DefsParser {
        let mut parser = DefsParser::new();
        parser.parse_str(DEFS, "gtk.defs").unwrap();
        parser
    }

    #[test]
    fn test_full_summary() {
        let text = summary(&parsed(), None).unwrap();
        assert_eq!(
            text,
            "objects (2):\n\
             \x20 GtkWidget : GtkObject (undefined), no constructor, 1 method(s)\n\
             \x20 GtkEntry : GtkWidget, new gtk_entry_new, 2 method(s)\n\
             functions (1):\n\
             \x20 gtk_main\n\
             enums (2):\n\
             \x20 GtkStateType [enum, 1 value(s)]\n\
             \x20 GtkAttachOptions [flags, 0 value(s)]\n"
        );
    }

    #[test]
    fn test_object_without_parent() {
        let mut parser = DefsParser::new();
        parser.parse_str("(object Object (in-module Gtk) (c-name GtkObject))", "o.defs").unwrap();
        let obj = parser.find_object("Object").unwrap();
        assert_eq!(object_line(&parser, obj), "  GtkObject, no constructor, 0 method(s)\n");
    }

    #[test]
    fn test_single_object_lists_methods() {
        let text = summary(&parsed(), Some("GtkEntry")).unwrap();
        assert_eq!(
            text,
            "  GtkEntry : GtkWidget, new gtk_entry_new, 2 method(s)\n\
             \x20   gtk_entry_set_text\n\
             \x20   gtk_entry_get_text\n"
        );
    }

    #[test]
    fn test_unknown_object() {
        let err = summary(&parsed(), Some("Button")).unwrap_err();
        assert!(matches!(err, DefsError::UnknownObject(ref name) if name == "Button"));
    }

    #[test]
    fn test_write_output_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build/out/gtk.json");
        write_output(Some(&path), "{}\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
    }

    #[test]
    fn test_write_output_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("blocker"), "").unwrap();
        let path = dir.path().join("blocker/gtk.json");
        match write_output(Some(&path), "{}") {
            Err(DefsError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }
}
