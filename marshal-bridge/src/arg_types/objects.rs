// Object, boxed and struct-by-value arguments.

use super::{strip_pointer, ArgType, CallContext, Param, ReturnTemplate};
use crate::error::MarshalError;
use crate::names::cast_macro;
use crate::target::{CLASS_ENTRY_SUFFIX, NULL_LITERAL, OBJECT_BASE_TYPE, OBJECT_GETTER, OBJECT_WRAPPER_NEW};

/// Pointer to a wrapped native object such as `GtkWidget*`.
#[derive(Debug, Clone)]
pub struct ObjectArg {
    obj_name: String,
    cast: String,
}

impl ObjectArg {
    pub fn new(obj_name: &str) -> Self {
        Self {
            obj_name: obj_name.to_string(),
            cast: cast_macro(obj_name),
        }
    }

    /// Class entry checked during extraction (`gtk_widget_ce`).
    pub fn class_entry(&self) -> String {
        format!("{}{CLASS_ENTRY_SUFFIX}", self.cast.to_lowercase())
    }

    fn unwrap_expr(&self, zval: &str) -> String {
        format!("{}({OBJECT_GETTER}({zval}))", self.cast)
    }

    fn write_nullable(&self, param: &Param<'_>, ctx: &mut CallContext) {
        let name = param.name;
        let php = format!("php_{name}");
        match param.default {
            Some(default) => {
                ctx.declare(self.obj_name.as_str(), format!("*{name} = {default}"));
                ctx.declare("zval", format!("*{php} = {NULL_LITERAL}"));
                ctx.extra(format!(
                    "\tif ({php}) {{\n\
                     \t\tif (Z_TYPE_P({php}) == IS_NULL)\n\
                     \t\t\t{name} = {NULL_LITERAL};\n\
                     \t\telse\n\
                     \t\t\t{name} = {};\n\
                     \t}}\n",
                    self.unwrap_expr(&php),
                ));
            }
            None => {
                ctx.declare(self.obj_name.as_str(), format!("*{name} = {NULL_LITERAL}"));
                ctx.declare("zval", format!("*{php}"));
                ctx.extra(format!(
                    "\tif (Z_TYPE_P({php}) != IS_NULL)\n\
                     \t\t{name} = {};\n",
                    self.unwrap_expr(&php),
                ));
            }
        }
        ctx.parse_into(format!("&{php}, {}", self.class_entry()));
        ctx.arg(name);
    }

    fn write_required(&self, param: &Param<'_>, ctx: &mut CallContext) {
        let name = param.name;
        match param.default {
            Some(default) => {
                let php = format!("php_{name}");
                ctx.declare(self.obj_name.as_str(), format!("*{name} = {default}"));
                ctx.declare("zval", format!("*{php} = {NULL_LITERAL}"));
                ctx.parse_into(format!("&{php}, {}", self.class_entry()));
                ctx.arg(name);
                ctx.extra(format!(
                    "\tif ({php})\n\
                     \t\t{name} = {};\n",
                    self.unwrap_expr(&php),
                ));
            }
            None => {
                ctx.declare("zval", format!("*{name}"));
                ctx.parse_into(format!("&{name}, {}", self.class_entry()));
                ctx.arg(self.unwrap_expr(name));
            }
        }
    }
}

impl ArgType for ObjectArg {
    fn kind(&self) -> &'static str {
        "object"
    }

    fn write_param(&self, param: &Param<'_>, ctx: &mut CallContext) -> Result<String, MarshalError> {
        if param.null_ok {
            self.write_nullable(param, ctx);
            Ok("N".to_string())
        } else {
            self.write_required(param, ctx);
            Ok("O".to_string())
        }
    }

    fn write_return(&self, _ty: &str, ctx: &mut CallContext) -> Result<ReturnTemplate, MarshalError> {
        ctx.declare("zval", "*ret");
        Ok(ReturnTemplate::new(format!(
            "\tret = {OBJECT_WRAPPER_NEW}(({OBJECT_BASE_TYPE} *)%s);\n\
             \t*return_value = *ret;"
        )))
    }
}

/// Boxed value owned by a PHP wrapper family (`GdkColor*` -> `gdk_color`).
#[derive(Debug, Clone)]
pub struct BoxedArg {
    php_type: String,
}

impl BoxedArg {
    pub fn new(php_type: &str) -> Self {
        Self {
            php_type: php_type.to_string(),
        }
    }
}

impl ArgType for BoxedArg {
    fn kind(&self) -> &'static str {
        "boxed"
    }

    fn write_param(&self, param: &Param<'_>, ctx: &mut CallContext) -> Result<String, MarshalError> {
        let name = param.name;
        ctx.declare("zval", format!("*{name}"));
        ctx.parse_into(format!("&{name}, {}{CLASS_ENTRY_SUFFIX}", self.php_type));
        ctx.arg(format!("PHP_{}_GET({name})", self.php_type.to_uppercase()));
        Ok("O".to_string())
    }

    fn write_return(&self, ty: &str, ctx: &mut CallContext) -> Result<ReturnTemplate, MarshalError> {
        ctx.declare(strip_pointer(ty), "*ret");
        Ok(ReturnTemplate::new(format!(
            "\tret = %s;\n\
             \t*return_value = *php_{}_new(ret);",
            self.php_type
        )))
    }
}

/// Fixed four-integer struct passed by address (`GdkRectangle*`).
/// Each field is extracted on its own.
#[derive(Debug, Default)]
pub struct RectArg;

impl RectArg {
    const FIELDS: [&'static str; 4] = ["x", "y", "width", "height"];
}

impl ArgType for RectArg {
    fn kind(&self) -> &'static str {
        "rectangle"
    }

    fn write_param(&self, param: &Param<'_>, ctx: &mut CallContext) -> Result<String, MarshalError> {
        let name = param.name;
        ctx.declare(strip_pointer(param.ty), name);
        for field in Self::FIELDS {
            ctx.parse_into(format!("&({name}.{field})"));
        }
        ctx.arg(format!("&{name}"));
        Ok("i".repeat(Self::FIELDS.len()))
    }
}
