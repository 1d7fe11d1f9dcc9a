// Argument type handlers - one strategy per native type family.
// Each strategy writes into a CallContext owned by the caller for the
// duration of one generated function.

pub mod enums;
pub mod matcher;
pub mod objects;
pub mod scalars;
pub mod strings;


use std::fmt;

use crate::error::{MarshalError, Operation};
use crate::var_list::VarList;

pub use enums::{EnumArg, EnumKind};
pub use matcher::ArgMatcher;
pub use objects::{BoxedArg, ObjectArg, RectArg};
pub use scalars::{BoolArg, CharArg, DoubleArg, IntArg, NoneArg};
pub use strings::{IntRefArg, StringArg, StringRefArg};

/// One parameter as declared by a definition record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param<'a> {
    pub ty: &'a str,
    pub name: &'a str,
    pub default: Option<&'a str>,
    pub null_ok: bool,
}

impl<'a> Param<'a> {
    pub fn new(ty: &'a str, name: &'a str) -> Self {
        Self {
            ty,
            name,
            default: None,
            null_ok: false,
        }
    }

    pub fn with_default(mut self, default: &'a str) -> Self {
        self.default = Some(default);
        self
    }

    pub fn null_ok(mut self) -> Self {
        self.null_ok = true;
        self
    }
}

/// A target handed to the argument extraction step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSlot {
    pub target: String,
    /// The extracted zval is written back by the native call.
    pub by_ref: bool,
}

/// Everything generated for the parameters and return value of one call.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    pub vars: VarList,
    pub parse_slots: Vec<ParseSlot>,
    pub args: Vec<String>,
    pub extra_code: Vec<String>,
}

impl CallContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, c_type: impl Into<String>, name: impl Into<String>) {
        self.vars.add(c_type, name);
    }

    pub fn parse_into(&mut self, target: impl Into<String>) {
        self.parse_slots.push(ParseSlot {
            target: target.into(),
            by_ref: false,
        });
    }

    pub fn parse_by_ref(&mut self, target: impl Into<String>) {
        self.parse_slots.push(ParseSlot {
            target: target.into(),
            by_ref: true,
        });
    }

    pub fn arg(&mut self, expr: impl Into<String>) {
        self.args.push(expr.into());
    }

    pub fn extra(&mut self, code: impl Into<String>) {
        self.extra_code.push(code.into());
    }

    /// Native call expression built from the collected argument list.
    pub fn call_expr(&self, c_name: &str) -> String {
        format!("{}({})", c_name, self.args.join(", "))
    }
}

/// Statement template converting a native return value; `%s` stands for
/// the native call expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnTemplate(String);

impl ReturnTemplate {
    pub const PLACEHOLDER: &'static str = "%s";

    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn fill(&self, call: &str) -> String {
        self.0.replacen(Self::PLACEHOLDER, call, 1)
    }
}

impl fmt::Display for ReturnTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Marshaling strategy for one family of native types.
///
/// `write_param` returns the extraction specifier for the parameter
/// (`"s"`, `"O"`, `"iiii"`, ...). Both operations default to an
/// `Unsupported` error so strategies only implement what their type allows.
pub trait ArgType: fmt::Debug {
    fn kind(&self) -> &'static str;

    fn write_param(&self, param: &Param<'_>, _ctx: &mut CallContext) -> Result<String, MarshalError> {
        Err(MarshalError::unsupported(self.kind(), Operation::Param, param.ty))
    }

    fn write_return(&self, ty: &str, _ctx: &mut CallContext) -> Result<ReturnTemplate, MarshalError> {
        Err(MarshalError::unsupported(self.kind(), Operation::Return, ty))
    }
}

/// Declarator with an optional initializer: `name` or `name = value`.
pub(crate) fn declarator(name: &str, default: Option<&str>) -> String {
    match default {
        Some(value) => format!("{name} = {value}"),
        None => name.to_string(),
    }
}

/// Drops one trailing pointer marker from a type descriptor.
pub(crate) fn strip_pointer(ty: &str) -> &str {
    ty.strip_suffix('*').unwrap_or(ty)
}
