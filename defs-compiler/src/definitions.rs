// Definition records and the default builder that extracts them from
// `.defs` attribute lists.

use crate::reader::Record;
pub use marshal_bridge::arg_types::EnumKind;
use marshal_bridge::Param;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub ty: String,
    pub name: String,
    pub default: Option<String>,
    pub null_ok: bool,
}

impl Parameter {
    pub fn as_param(&self) -> Param<'_> {
        Param {
            ty: &self.ty,
            name: &self.name,
            default: self.default.as_deref(),
            null_ok: self.null_ok,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub ty: String,
    pub name: String,
}

/// `(object Widget (in-module Gtk) (parent Object (Gtk)) (c-name GtkWidget))`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDef {
    pub name: String,
    pub in_module: Option<String>,
    pub parent: Option<String>,
    pub parent_module: Option<String>,
    pub c_name: String,
    pub fields: Vec<Field>,
}

impl ObjectDef {
    /// Native type of the declared parent, module prefix included (`GtkBin`).
    pub fn parent_c_type(&self) -> Option<String> {
        let parent = self.parent.as_deref()?;
        Some(format!("{}{}", self.parent_module.as_deref().unwrap_or(""), parent))
    }
}

/// Free function; constructors carry `is_constructor_of`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    pub name: String,
    pub c_name: String,
    pub is_constructor_of: Option<String>,
    pub return_type: Option<String>,
    pub params: Vec<Parameter>,
    pub varargs: bool,
}

/// Owning object of a method, `(of-object Widget (Gtk))`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub name: String,
    pub module: Option<String>,
}

impl ObjectRef {
    /// Native type name of the owner: module prefix plus name (`GtkWidget`).
    pub fn c_type(&self) -> String {
        format!("{}{}", self.module.as_deref().unwrap_or(""), self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDef {
    pub name: String,
    pub c_name: String,
    pub of_object: ObjectRef,
    pub return_type: Option<String>,
    pub params: Vec<Parameter>,
    pub varargs: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub c_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    pub kind: EnumKind,
    pub name: String,
    pub in_module: Option<String>,
    pub c_name: String,
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    #[error("{kind} definition has no name")]
    MissingName { kind: &'static str },

    #[error("{kind} '{name}': malformed ({attr} ...) attribute")]
    BadAttribute {
        kind: &'static str,
        name: String,
        attr: &'static str,
    },

    #[error("method '{name}' does not name its object")]
    MissingOwner { name: String },
}

/// Builds typed definition records from the tail of a classified top-level
/// record (keyword already stripped).
pub trait DefinitionBuilder {
    fn object(&self, args: &[Record]) -> Result<ObjectDef, DefinitionError>;
    fn function(&self, args: &[Record]) -> Result<FunctionDef, DefinitionError>;
    fn method(&self, args: &[Record]) -> Result<MethodDef, DefinitionError>;
    fn enumeration(&self, kind: EnumKind, args: &[Record]) -> Result<EnumDef, DefinitionError>;
}

/// Builder for the classic `.defs` attribute syntax. Unknown attributes
/// are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefsBuilder;

fn split_name<'r>(kind: &'static str, args: &'r [Record]) -> Result<(String, &'r [Record]), DefinitionError> {
    match args.split_first() {
        Some((first, rest)) => match first.to_text() {
            Some(name) => Ok((name, rest)),
            None => Err(DefinitionError::MissingName { kind }),
        },
        None => Err(DefinitionError::MissingName { kind }),
    }
}

/// `(key value ...)` lists among the attributes; everything else is ignored.
fn attributes(rest: &[Record]) -> impl Iterator<Item = (&str, &[Record])> {
    rest.iter().filter_map(|record| {
        let items = record.as_list()?;
        let (key, values) = items.split_first()?;
        Some((key.as_text()?, values))
    })
}

fn first_text(values: &[Record]) -> Option<String> {
    values.first().and_then(Record::to_text)
}

/// `(Gtk)` after a type name: module given as a one-element list.
fn module_of(values: &[Record]) -> Option<String> {
    values.get(1).and_then(|m| match m {
        Record::List(items) => first_text(items),
        other => other.to_text(),
    })
}

/// `(type-and-name T N)`
fn type_and_name(values: &[Record]) -> Option<(String, String)> {
    for (key, inner) in attributes(values) {
        if key == "type-and-name" {
            let ty = inner.first()?.to_text()?;
            let name = inner.get(1)?.to_text()?;
            return Some((ty, name));
        }
    }
    None
}

fn parameter(values: &[Record]) -> Option<Parameter> {
    let (ty, name) = type_and_name(values)?;
    let mut param = Parameter {
        ty,
        name,
        default: None,
        null_ok: false,
    };
    for (key, inner) in attributes(values) {
        match key {
            "default" => param.default = first_text(inner),
            "null-ok" => param.null_ok = true,
            _ => {}
        }
    }
    Some(param)
}

struct Callable {
    c_name: Option<String>,
    return_type: Option<String>,
    params: Vec<Parameter>,
    varargs: bool,
}

fn callable(kind: &'static str, name: &str, rest: &[Record]) -> Result<Callable, DefinitionError> {
    let mut callable = Callable {
        c_name: None,
        return_type: None,
        params: Vec::new(),
        varargs: false,
    };
    for (key, values) in attributes(rest) {
        match key {
            "c-name" => callable.c_name = first_text(values),
            "return-type" => callable.return_type = first_text(values),
            "parameter" => {
                let param = parameter(values).ok_or_else(|| DefinitionError::BadAttribute {
                    kind,
                    name: name.to_string(),
                    attr: "parameter",
                })?;
                callable.params.push(param);
            }
            "varargs" => callable.varargs = true,
            _ => {}
        }
    }
    Ok(callable)
}

impl DefinitionBuilder for DefsBuilder {
    fn object(&self, args: &[Record]) -> Result<ObjectDef, DefinitionError> {
        let (name, rest) = split_name("object", args)?;
        let mut obj = ObjectDef {
            c_name: name.clone(),
            name,
            in_module: None,
            parent: None,
            parent_module: None,
            fields: Vec::new(),
        };
        for (key, values) in attributes(rest) {
            match key {
                "in-module" => obj.in_module = first_text(values),
                "parent" => {
                    obj.parent = first_text(values);
                    obj.parent_module = module_of(values);
                }
                "c-name" => {
                    if let Some(c_name) = first_text(values) {
                        obj.c_name = c_name;
                    }
                }
                "field" => {
                    let (ty, name) = type_and_name(values).ok_or_else(|| DefinitionError::BadAttribute {
                        kind: "object",
                        name: obj.name.clone(),
                        attr: "field",
                    })?;
                    obj.fields.push(Field { ty, name });
                }
                _ => {}
            }
        }
        Ok(obj)
    }

    fn function(&self, args: &[Record]) -> Result<FunctionDef, DefinitionError> {
        let (name, rest) = split_name("function", args)?;
        let callable = callable("function", &name, rest)?;
        let is_constructor_of = attributes(rest)
            .find(|(key, _)| *key == "is-constructor-of")
            .and_then(|(_, values)| first_text(values));
        Ok(FunctionDef {
            c_name: callable.c_name.unwrap_or_else(|| name.clone()),
            name,
            is_constructor_of,
            return_type: callable.return_type,
            params: callable.params,
            varargs: callable.varargs,
        })
    }

    fn method(&self, args: &[Record]) -> Result<MethodDef, DefinitionError> {
        let (name, rest) = split_name("method", args)?;
        let callable = callable("method", &name, rest)?;
        let of_object = attributes(rest)
            .find(|(key, _)| *key == "of-object")
            .and_then(|(_, values)| {
                Some(ObjectRef {
                    name: first_text(values)?,
                    module: module_of(values),
                })
            })
            .ok_or_else(|| DefinitionError::MissingOwner { name: name.clone() })?;
        Ok(MethodDef {
            c_name: callable.c_name.unwrap_or_else(|| name.clone()),
            name,
            of_object,
            return_type: callable.return_type,
            params: callable.params,
            varargs: callable.varargs,
        })
    }

    fn enumeration(&self, kind: EnumKind, args: &[Record]) -> Result<EnumDef, DefinitionError> {
        let label = match kind {
            EnumKind::Enum => "enum",
            EnumKind::Flags => "flags",
        };
        let (name, rest) = split_name(label, args)?;
        let mut def = EnumDef {
            kind,
            c_name: name.clone(),
            name,
            in_module: None,
            values: Vec::new(),
        };
        for (key, values) in attributes(rest) {
            match key {
                "in-module" => def.in_module = first_text(values),
                "c-name" => {
                    if let Some(c_name) = first_text(values) {
                        def.c_name = c_name;
                    }
                }
                "value" => {
                    let mut value_name = None;
                    let mut value_c_name = None;
                    for (vkey, vvalues) in attributes(values) {
                        match vkey {
                            "name" => value_name = first_text(vvalues),
                            "c-name" => value_c_name = first_text(vvalues),
                            _ => {}
                        }
                    }
                    match (value_name, value_c_name) {
                        (Some(name), Some(c_name)) => def.values.push(EnumValue { name, c_name }),
                        _ => {
                            return Err(DefinitionError::BadAttribute {
                                kind: label,
                                name: def.name.clone(),
                                attr: "value",
                            });
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_records;
    use pretty_assertions::assert_eq;

    fn tail(src: &str) -> Vec<Record> {
        let records = read_records(src).unwrap();
        records[0].as_list().unwrap()[1..].to_vec()
    }

    #[test]
    fn test_object() {
        let args = tail(
            "(object Window (in-module Gtk) (parent Bin (Gtk)) (c-name GtkWindow)
               (field (type-and-name gchar* title)))",
        );
        let obj = DefsBuilder.object(&args).unwrap();
        assert_eq!(
            obj,
            ObjectDef {
                name: "Window".into(),
                in_module: Some("Gtk".into()),
                parent: Some("Bin".into()),
                parent_module: Some("Gtk".into()),
                c_name: "GtkWindow".into(),
                fields: vec![Field {
                    ty: "gchar*".into(),
                    name: "title".into()
                }],
            }
        );
        assert_eq!(obj.parent_c_type().as_deref(), Some("GtkBin"));
    }

    #[test]
    fn test_object_without_parent_or_c_name() {
        let obj = DefsBuilder.object(&tail("(object Object (in-module Gtk))")).unwrap();
        assert_eq!(obj.parent, None);
        assert_eq!(obj.parent_c_type(), None);
        assert_eq!(obj.c_name, "Object");
    }

    #[test]
    fn test_constructor_function() {
        let args = tail(
            r#"(function gtk_window_new (is-constructor-of GtkWindow) (c-name gtk_window_new)
                 (return-type GtkWidget*)
                 (parameter (type-and-name GtkWindowType type) (default "GTK_WINDOW_TOPLEVEL")))"#,
        );
        let func = DefsBuilder.function(&args).unwrap();
        assert_eq!(func.is_constructor_of.as_deref(), Some("GtkWindow"));
        assert_eq!(func.return_type.as_deref(), Some("GtkWidget*"));
        assert_eq!(
            func.params,
            vec![Parameter {
                ty: "GtkWindowType".into(),
                name: "type".into(),
                default: Some("GTK_WINDOW_TOPLEVEL".into()),
                null_ok: false,
            }]
        );
    }

    #[test]
    fn test_numeric_default_and_null_ok() {
        let args = tail(
            "(function f (parameter (type-and-name gint n) (default 0))
                         (parameter (type-and-name GtkWidget* w) (null-ok)))",
        );
        let func = DefsBuilder.function(&args).unwrap();
        assert_eq!(func.c_name, "f");
        assert_eq!(func.return_type, None);
        assert_eq!(func.params[0].default.as_deref(), Some("0"));
        assert!(func.params[1].null_ok);
        assert_eq!(func.params[1].as_param().ty, "GtkWidget*");
    }

    #[test]
    fn test_large_numeric_default_is_not_rounded() {
        let args = tail("(function f (parameter (type-and-name gulong n) (default 18446744073709551615)))");
        let func = DefsBuilder.function(&args).unwrap();
        assert_eq!(func.params[0].default.as_deref(), Some("18446744073709551615"));
    }

    #[test]
    fn test_method() {
        let args = tail(
            "(method set_title (of-object Window (Gtk)) (c-name gtk_window_set_title)
               (return-type none) (parameter (type-and-name const-gchar* title)))",
        );
        let method = DefsBuilder.method(&args).unwrap();
        assert_eq!(
            method.of_object,
            ObjectRef {
                name: "Window".into(),
                module: Some("Gtk".into())
            }
        );
        assert_eq!(method.of_object.c_type(), "GtkWindow");
        assert_eq!(method.c_name, "gtk_window_set_title");
        assert_eq!(method.return_type.as_deref(), Some("none"));
    }

    #[test]
    fn test_method_requires_owner() {
        let err = DefsBuilder.method(&tail("(method orphan (c-name orphan))")).unwrap_err();
        assert_eq!(err, DefinitionError::MissingOwner { name: "orphan".into() });
    }

    #[test]
    fn test_malformed_parameter() {
        let err = DefsBuilder
            .function(&tail("(function f (parameter (default 1)))"))
            .unwrap_err();
        assert_eq!(err.to_string(), "function 'f': malformed (parameter ...) attribute");
    }

    #[test]
    fn test_enum_and_flags() {
        let args = tail(
            "(enum WindowType (in-module Gtk) (c-name GtkWindowType)
               (value (name toplevel) (c-name GTK_WINDOW_TOPLEVEL))
               (value (name dialog) (c-name GTK_WINDOW_DIALOG)))",
        );
        let def = DefsBuilder.enumeration(EnumKind::Enum, &args).unwrap();
        assert_eq!(def.c_name, "GtkWindowType");
        assert_eq!(def.values.len(), 2);
        assert_eq!(def.values[1].c_name, "GTK_WINDOW_DIALOG");

        let flags = DefsBuilder
            .enumeration(EnumKind::Flags, &tail("(flags AttachOptions (c-name GtkAttachOptions))"))
            .unwrap();
        assert_eq!(flags.kind, EnumKind::Flags);
    }

    #[test]
    fn test_missing_name() {
        let err = DefsBuilder.object(&[]).unwrap_err();
        assert_eq!(err, DefinitionError::MissingName { kind: "object" });
    }
}
