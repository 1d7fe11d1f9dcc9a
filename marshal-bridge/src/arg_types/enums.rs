// Enum and flag arguments. Values arrive as a zval holding either the
// symbolic nick or the number; the runtime helper resolves it against the
// type tag and writes the integer into the native local.

use super::{declarator, ArgType, CallContext, Param, ReturnTemplate};
use crate::error::MarshalError;
use crate::names::lookup_macro;
use crate::target::{ENUM_LOOKUP, FLAG_LOOKUP, NULL_LITERAL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumKind {
    Enum,
    Flags,
}

impl EnumKind {
    fn lookup_helper(self) -> &'static str {
        match self {
            EnumKind::Enum => ENUM_LOOKUP,
            EnumKind::Flags => FLAG_LOOKUP,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnumArg {
    kind: EnumKind,
    enum_name: String,
    type_code: String,
}

impl EnumArg {
    pub fn new(kind: EnumKind, enum_name: &str) -> Self {
        Self {
            kind,
            enum_name: enum_name.to_string(),
            type_code: lookup_macro(enum_name),
        }
    }

    pub fn enumeration(enum_name: &str) -> Self {
        Self::new(EnumKind::Enum, enum_name)
    }

    pub fn flags(flag_name: &str) -> Self {
        Self::new(EnumKind::Flags, flag_name)
    }
}

impl ArgType for EnumArg {
    fn kind(&self) -> &'static str {
        match self.kind {
            EnumKind::Enum => "enum",
            EnumKind::Flags => "flags",
        }
    }

    fn write_param(&self, param: &Param<'_>, ctx: &mut CallContext) -> Result<String, MarshalError> {
        let name = param.name;
        ctx.declare(self.enum_name.as_str(), declarator(name, param.default));
        ctx.declare("zval", declarator(&format!("*php_{name}"), Some(NULL_LITERAL)));
        ctx.parse_into(format!("&php_{name}"));
        ctx.arg(name);
        ctx.extra(format!(
            "\t{}({}, php_{name}, (gint *)&{name});\n\n",
            self.kind.lookup_helper(),
            self.type_code,
        ));
        Ok("V".to_string())
    }

    fn write_return(&self, _ty: &str, _ctx: &mut CallContext) -> Result<ReturnTemplate, MarshalError> {
        Ok(ReturnTemplate::new("\tRETURN_LONG(%s);"))
    }
}
