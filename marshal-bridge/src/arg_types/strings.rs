// String arguments and the by-reference output arguments.

use super::{declarator, ArgType, CallContext, Param, ReturnTemplate};
use crate::error::MarshalError;
use crate::target::{BORROWED_STRINGS, NULL_LITERAL};

#[derive(Debug, Default)]
pub struct StringArg;

impl ArgType for StringArg {
    fn kind(&self) -> &'static str {
        "string"
    }

    fn write_param(&self, param: &Param<'_>, ctx: &mut CallContext) -> Result<String, MarshalError> {
        let default = param.default.map(|value| {
            if value == NULL_LITERAL {
                value.to_string()
            } else {
                format!("\"{value}\"")
            }
        });
        ctx.declare("char", declarator(&format!("*{}", param.name), default.as_deref()));
        ctx.parse_into(format!("&{}", param.name));
        ctx.arg(param.name);
        Ok("s".to_string())
    }

    fn write_return(&self, ty: &str, ctx: &mut CallContext) -> Result<ReturnTemplate, MarshalError> {
        if BORROWED_STRINGS.contains(&ty) {
            ctx.declare("const gchar", "*ret");
            return Ok(ReturnTemplate::new(concat!(
                "\tret = %s;\n",
                "\tif (ret) {\n",
                "\t\tRETURN_STRING((char *)ret, 1);\n",
                "\t}\n",
                "\telse {\n",
                "\t\tRETURN_NULL();\n",
                "\t}",
            )));
        }

        // Owned buffer: copy into the return value first, then release it.
        ctx.declare("gchar", "*ret");
        Ok(ReturnTemplate::new(concat!(
            "\tret = %s;\n",
            "\tif (ret) {\n",
            "\t\tRETVAL_STRING(ret, 1);\n",
            "\t\tg_free(ret);\n",
            "\t} else\n",
            "\t\tRETVAL_NULL();",
        )))
    }
}

/// `gchar**` and friends: the caller passes a variable by reference and the
/// native function writes a string into it.
#[derive(Debug, Default)]
pub struct StringRefArg;

impl ArgType for StringRefArg {
    fn kind(&self) -> &'static str {
        "string reference"
    }

    fn write_param(&self, param: &Param<'_>, ctx: &mut CallContext) -> Result<String, MarshalError> {
        write_ref_param(param, ctx, "Z_STRVAL_P", "convert_to_string")
    }
}

/// `gint*` and friends: integer output through a by-reference variable.
#[derive(Debug, Default)]
pub struct IntRefArg;

impl ArgType for IntRefArg {
    fn kind(&self) -> &'static str {
        "int reference"
    }

    fn write_param(&self, param: &Param<'_>, ctx: &mut CallContext) -> Result<String, MarshalError> {
        write_ref_param(param, ctx, "Z_LVAL_P", "convert_to_long")
    }
}

fn write_ref_param(
    param: &Param<'_>,
    ctx: &mut CallContext,
    storage: &str,
    convert: &str,
) -> Result<String, MarshalError> {
    let name = param.name;
    ctx.declare("zval", declarator(&format!("*php_{name}"), Some(NULL_LITERAL)));
    ctx.parse_by_ref(format!("&php_{name}"));
    ctx.arg(format!("({})&{storage}(php_{name})", param.ty));
    ctx.extra(format!("\t{convert}(php_{name});\n"));
    Ok("V".to_string())
}
