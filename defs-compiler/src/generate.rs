// Fragment generation: runs every callable of a parsed definition set
// through the argument type registry and collects the glue pieces the
// emitter splices into its templates.

use marshal_bridge::arg_types::EnumKind;
use marshal_bridge::names::cast_macro;
use marshal_bridge::target::{OBJECT_GETTER, THIS_PTR};
use marshal_bridge::{ArgMatcher, CallContext, MarshalError};
use serde::Serialize;
use tracing::{debug, warn};

use crate::definitions::{FunctionDef, MethodDef, ObjectRef, Parameter};
use crate::defs_parser::DefsParser;
use crate::error::DefsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallableKind {
    Function,
    Constructor,
    Method,
}

/// Generated glue for one native function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionFragments {
    pub c_name: String,
    pub kind: CallableKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub of_object: Option<String>,
    pub declarations: String,
    /// Extraction specifiers; `|` precedes the first defaulted parameter.
    pub format: String,
    pub parse_targets: Vec<String>,
    pub by_ref: Vec<bool>,
    pub extra_code: String,
    pub call: String,
    pub return_code: String,
}

/// Everything produced by one generation pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Bundle {
    pub sources: Vec<String>,
    pub callables: Vec<FunctionFragments>,
    /// C names left out because they take variable arguments.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

/// Registration of the types a definition set introduces.
pub trait RegisterDefinitions {
    /// Adds an object strategy per object and an enum or flag strategy per
    /// enumeration, keyed by C name.
    fn register_definitions<B>(&mut self, parser: &DefsParser<B>);
}

impl RegisterDefinitions for ArgMatcher {
    fn register_definitions<B>(&mut self, parser: &DefsParser<B>) {
        for obj in parser.objects() {
            self.register_object(&obj.c_name);
        }
        for def in parser.enums() {
            match def.kind {
                EnumKind::Enum => self.register_enum(&def.c_name),
                EnumKind::Flags => self.register_flag(&def.c_name),
            }
        }
        debug!(
            objects = parser.objects().len(),
            enums = parser.enums().len(),
            "registered definition types"
        );
    }
}

fn write_callable(
    matcher: &ArgMatcher,
    c_name: &str,
    owner: Option<&ObjectRef>,
    params: &[Parameter],
    return_type: Option<&str>,
) -> Result<(CallContext, String, String), MarshalError> {
    let mut ctx = CallContext::new();
    if let Some(owner) = owner {
        ctx.arg(format!("{}({OBJECT_GETTER}({THIS_PTR}))", cast_macro(&owner.c_type())));
    }

    let mut format = String::new();
    let mut optional = false;
    for param in params {
        if param.default.is_some() && !optional {
            format.push('|');
            optional = true;
        }
        format.push_str(&matcher.write_param(&param.as_param(), &mut ctx)?);
    }

    let template = matcher.write_return(return_type, &mut ctx)?;
    let return_code = template.fill(&ctx.call_expr(c_name));
    Ok((ctx, format, return_code))
}

fn fragments(
    matcher: &ArgMatcher,
    c_name: &str,
    kind: CallableKind,
    owner: Option<&ObjectRef>,
    params: &[Parameter],
    return_type: Option<&str>,
) -> Result<FunctionFragments, DefsError> {
    let (ctx, format, return_code) =
        write_callable(matcher, c_name, owner, params, return_type).map_err(|source| DefsError::Generate {
            c_name: c_name.to_string(),
            source,
        })?;

    Ok(FunctionFragments {
        c_name: c_name.to_string(),
        kind,
        of_object: owner.map(ObjectRef::c_type),
        declarations: ctx.vars.render(),
        format,
        parse_targets: ctx.parse_slots.iter().map(|slot| slot.target.clone()).collect(),
        by_ref: ctx.parse_slots.iter().map(|slot| slot.by_ref).collect(),
        extra_code: ctx.extra_code.concat(),
        call: ctx.call_expr(c_name),
        return_code,
    })
}

pub fn generate_function(matcher: &ArgMatcher, def: &FunctionDef) -> Result<FunctionFragments, DefsError> {
    let kind = if def.is_constructor_of.is_some() {
        CallableKind::Constructor
    } else {
        CallableKind::Function
    };
    fragments(matcher, &def.c_name, kind, None, &def.params, def.return_type.as_deref())
}

/// Methods receive the unwrapped `$this` object as their first native argument.
pub fn generate_method(matcher: &ArgMatcher, def: &MethodDef) -> Result<FunctionFragments, DefsError> {
    fragments(
        matcher,
        &def.c_name,
        CallableKind::Method,
        Some(&def.of_object),
        &def.params,
        def.return_type.as_deref(),
    )
}

struct BundleWriter<'m> {
    matcher: &'m ArgMatcher,
    bundle: Bundle,
}

impl BundleWriter<'_> {
    fn function(&mut self, def: &FunctionDef) -> Result<(), DefsError> {
        if def.varargs {
            warn!(c_name = %def.c_name, "skipping varargs function");
            self.bundle.skipped.push(def.c_name.clone());
            return Ok(());
        }
        let fragments = generate_function(self.matcher, def)?;
        self.bundle.callables.push(fragments);
        Ok(())
    }

    fn method(&mut self, def: &MethodDef) -> Result<(), DefsError> {
        if def.varargs {
            warn!(c_name = %def.c_name, "skipping varargs method");
            self.bundle.skipped.push(def.c_name.clone());
            return Ok(());
        }
        let fragments = generate_method(self.matcher, def)?;
        self.bundle.callables.push(fragments);
        Ok(())
    }
}

/// Generates fragments for every callable, or only for `object`'s
/// constructor and methods when a name is given.
///
/// The first definition that cannot be generated aborts the pass.
pub fn generate_bundle<B>(
    parser: &DefsParser<B>,
    matcher: &ArgMatcher,
    object: Option<&str>,
) -> Result<Bundle, DefsError> {
    let mut writer = BundleWriter {
        matcher,
        bundle: Bundle {
            sources: parser.sources().iter().map(|path| path.display().to_string()).collect(),
            ..Bundle::default()
        },
    };

    match object {
        Some(name) => {
            let obj = parser
                .find_object(name)
                .ok_or_else(|| DefsError::UnknownObject(name.to_string()))?;
            if let Some(ctor) = parser.find_constructor(obj) {
                writer.function(ctor)?;
            }
            for method in parser.find_methods(obj) {
                writer.method(method)?;
            }
        }
        None => {
            for ctor in parser.constructors() {
                writer.function(ctor)?;
            }
            for func in parser.functions() {
                writer.function(func)?;
            }
            for method in parser.methods() {
                writer.method(method)?;
            }
        }
    }

    debug!(
        callables = writer.bundle.callables.len(),
        skipped = writer.bundle.skipped.len(),
        "generated bundle"
    );
    Ok(writer.bundle)
}
