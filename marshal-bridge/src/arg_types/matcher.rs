// Type descriptor -> strategy registry.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::trace;

use super::{
    ArgType, BoolArg, BoxedArg, CallContext, CharArg, DoubleArg, EnumArg, IntArg, IntRefArg, NoneArg,
    ObjectArg, Param, RectArg, ReturnTemplate, StringArg, StringRefArg,
};
use crate::error::MarshalError;

/// Descriptor used when a definition declares no return type.
pub const VOID_TYPE: &str = "none";

/// Maps exact type descriptors to shared strategy instances.
///
/// Several descriptors may share one strategy (`gint` and `guint` both map
/// to the same integer handler). Strategies are never mutated once
/// registered.
#[derive(Debug, Default)]
pub struct ArgMatcher {
    arg_types: HashMap<String, Rc<dyn ArgType>>,
}

impl ArgMatcher {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in C and GLib type families.
    pub fn with_defaults() -> Self {
        let mut matcher = Self::new();

        let arg: Rc<dyn ArgType> = Rc::new(NoneArg);
        matcher.register_all(&[VOID_TYPE], &arg);

        let arg: Rc<dyn ArgType> = Rc::new(StringArg);
        matcher.register_all(
            &[
                "char*",
                "gchar*",
                "const-char*",
                "const-gchar*",
                "string",
                "static_string",
                "unsigned-char*",
                "guchar*",
            ],
            &arg,
        );

        let arg: Rc<dyn ArgType> = Rc::new(StringRefArg);
        matcher.register_all(&["char**", "gchar**"], &arg);

        let arg: Rc<dyn ArgType> = Rc::new(CharArg);
        matcher.register_all(&["char", "gchar", "guchar"], &arg);

        let arg: Rc<dyn ArgType> = Rc::new(IntArg);
        matcher.register_all(
            &[
                "int", "gint", "guint", "short", "gshort", "gushort", "long", "glong", "gulong", "guint8",
                "gint8", "guint16", "gint16", "guint32", "gint32", "GtkType",
            ],
            &arg,
        );

        let arg: Rc<dyn ArgType> = Rc::new(IntRefArg);
        matcher.register_all(&["gint*", "guint*", "guint8*"], &arg);

        let arg: Rc<dyn ArgType> = Rc::new(BoolArg);
        matcher.register_all(&["gboolean"], &arg);

        let arg: Rc<dyn ArgType> = Rc::new(DoubleArg);
        matcher.register_all(&["double", "gdouble", "float", "gfloat"], &arg);

        let arg: Rc<dyn ArgType> = Rc::new(RectArg);
        matcher.register_all(&["GdkRectangle*"], &arg);

        matcher.register_boxed("GdkEvent", "gdk_event");
        matcher.register_boxed("GdkWindow", "gdk_window");
        matcher.register_boxed("GdkColor", "gdk_color");

        matcher
    }

    pub fn register(&mut self, ty: &str, handler: Rc<dyn ArgType>) {
        trace!(ty = ty, kind = handler.kind(), "registering argument type");
        self.arg_types.insert(ty.to_string(), handler);
    }

    fn register_all(&mut self, types: &[&str], handler: &Rc<dyn ArgType>) {
        for ty in types {
            self.register(ty, Rc::clone(handler));
        }
    }

    pub fn register_enum(&mut self, ty: &str) {
        self.register(ty, Rc::new(EnumArg::enumeration(ty)));
    }

    pub fn register_flag(&mut self, ty: &str) {
        self.register(ty, Rc::new(EnumArg::flags(ty)));
    }

    /// Registers both `Name` and `Name*` to one object handler.
    pub fn register_object(&mut self, ty: &str) {
        let handler: Rc<dyn ArgType> = Rc::new(ObjectArg::new(ty));
        self.register(ty, Rc::clone(&handler));
        self.register(&format!("{ty}*"), handler);
    }

    /// Registers only the pointer spelling `Name*`.
    pub fn register_boxed(&mut self, ty: &str, php_type: &str) {
        self.register(&format!("{ty}*"), Rc::new(BoxedArg::new(php_type)));
    }

    pub fn contains(&self, ty: &str) -> bool {
        self.arg_types.contains_key(ty)
    }

    pub fn get(&self, ty: &str) -> Result<&dyn ArgType, MarshalError> {
        self.arg_types
            .get(ty)
            .map(|handler| &**handler)
            .ok_or_else(|| MarshalError::UnknownType(ty.to_string()))
    }

    /// Looks up the parameter's strategy and writes its binding into `ctx`.
    pub fn write_param(&self, param: &Param<'_>, ctx: &mut CallContext) -> Result<String, MarshalError> {
        self.get(param.ty)?.write_param(param, ctx)
    }

    /// Return conversion for `ty`; an absent return type means `none`.
    pub fn write_return(&self, ty: Option<&str>, ctx: &mut CallContext) -> Result<ReturnTemplate, MarshalError> {
        let ty = ty.unwrap_or(VOID_TYPE);
        self.get(ty)?.write_return(ty, ctx)
    }
}
