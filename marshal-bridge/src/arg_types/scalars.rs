// Void and plain scalar arguments: extracted straight into a native local.

use super::{declarator, ArgType, CallContext, Param, ReturnTemplate};
use crate::error::MarshalError;

/// `none`: only valid as a return type. The call is still evaluated.
#[derive(Debug, Default)]
pub struct NoneArg;

impl ArgType for NoneArg {
    fn kind(&self) -> &'static str {
        "none"
    }

    fn write_return(&self, _ty: &str, _ctx: &mut CallContext) -> Result<ReturnTemplate, MarshalError> {
        Ok(ReturnTemplate::new("\t%s;\n\tRETURN_NULL();"))
    }
}

#[derive(Debug, Default)]
pub struct CharArg;

impl ArgType for CharArg {
    fn kind(&self) -> &'static str {
        "char"
    }

    fn write_param(&self, param: &Param<'_>, ctx: &mut CallContext) -> Result<String, MarshalError> {
        let quoted = param.default.map(|value| format!("'{value}'"));
        ctx.declare("char", declarator(param.name, quoted.as_deref()));
        ctx.parse_into(format!("&{}", param.name));
        ctx.arg(param.name);
        Ok("c".to_string())
    }

    fn write_return(&self, _ty: &str, ctx: &mut CallContext) -> Result<ReturnTemplate, MarshalError> {
        ctx.declare("gchar", "ret[2]");
        Ok(ReturnTemplate::new(
            "\tret[0] = %s;\n\tret[1] = '\\0';\n\tRETURN_STRINGL(ret, 1, 1);",
        ))
    }
}

#[derive(Debug, Default)]
pub struct IntArg;

impl ArgType for IntArg {
    fn kind(&self) -> &'static str {
        "int"
    }

    fn write_param(&self, param: &Param<'_>, ctx: &mut CallContext) -> Result<String, MarshalError> {
        ctx.declare("long", declarator(param.name, param.default));
        ctx.parse_into(format!("&{}", param.name));
        ctx.arg(format!("({}){}", param.ty, param.name));
        Ok("i".to_string())
    }

    fn write_return(&self, _ty: &str, _ctx: &mut CallContext) -> Result<ReturnTemplate, MarshalError> {
        Ok(ReturnTemplate::new("\tRETURN_LONG(%s);"))
    }
}

#[derive(Debug, Default)]
pub struct BoolArg;

impl ArgType for BoolArg {
    fn kind(&self) -> &'static str {
        "bool"
    }

    fn write_param(&self, param: &Param<'_>, ctx: &mut CallContext) -> Result<String, MarshalError> {
        ctx.declare("int", declarator(param.name, param.default));
        ctx.parse_into(format!("&{}", param.name));
        ctx.arg(format!("({}){}", param.ty, param.name));
        Ok("b".to_string())
    }

    fn write_return(&self, _ty: &str, _ctx: &mut CallContext) -> Result<ReturnTemplate, MarshalError> {
        Ok(ReturnTemplate::new("\tRETURN_BOOL(%s);"))
    }
}

#[derive(Debug, Default)]
pub struct DoubleArg;

impl ArgType for DoubleArg {
    fn kind(&self) -> &'static str {
        "double"
    }

    fn write_param(&self, param: &Param<'_>, ctx: &mut CallContext) -> Result<String, MarshalError> {
        ctx.declare("double", declarator(param.name, param.default));
        ctx.parse_into(format!("&{}", param.name));
        ctx.arg(param.name);
        Ok("d".to_string())
    }

    fn write_return(&self, _ty: &str, _ctx: &mut CallContext) -> Result<ReturnTemplate, MarshalError> {
        Ok(ReturnTemplate::new("\tRETURN_DOUBLE(%s);"))
    }
}
