// Definition dispatcher: classifies top-level records, hands them to a
// DefinitionBuilder and keeps the resulting definitions per kind.
// Includes are inlined depth-first at the point they appear.

use std::fs;
use std::path::{Path, PathBuf};

use marshal_bridge::target::FRAMEWORK_PREFIX;
use tracing::{debug, info, warn};

use crate::definitions::{
    DefinitionBuilder, DefinitionError, DefsBuilder, EnumDef, EnumKind, FunctionDef, MethodDef, ObjectDef,
};
use crate::error::DefsError;
use crate::reader::{self, Record};

/// Classification keyword leading a top-level record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Object,
    Function,
    Method,
    Enum,
    Flags,
    Include,
    /// Anything newer than this reader understands; skipped.
    Unknown,
}

impl Keyword {
    pub fn classify(head: &str) -> Self {
        match dispatch_key(head).as_str() {
            "object" => Keyword::Object,
            "function" => Keyword::Function,
            "method" => Keyword::Method,
            "enum" => Keyword::Enum,
            "flags" => Keyword::Flags,
            "include" => Keyword::Include,
            _ => Keyword::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Object => "object",
            Keyword::Function => "function",
            Keyword::Method => "method",
            Keyword::Enum => "enum",
            Keyword::Flags => "flags",
            Keyword::Include => "include",
            Keyword::Unknown => "unknown",
        }
    }
}

/// Maps a record head to an identifier-safe key: anything other than an
/// ASCII letter, digit or underscore becomes `_`.
pub fn dispatch_key(head: &str) -> String {
    head.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Every definition read so far, in registration order.
#[derive(Debug)]
pub struct DefsParser<B = DefsBuilder> {
    builder: B,
    objects: Vec<ObjectDef>,
    functions: Vec<FunctionDef>,
    constructors: Vec<FunctionDef>,
    methods: Vec<MethodDef>,
    enums: Vec<EnumDef>,
    c_names: Vec<String>,
    sources: Vec<PathBuf>,
    // Files currently being parsed, outermost first.
    including: Vec<PathBuf>,
}

impl DefsParser {
    pub fn new() -> Self {
        Self::with_builder(DefsBuilder)
    }
}

impl Default for DefsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: DefinitionBuilder> DefsParser<B> {
    pub fn with_builder(builder: B) -> Self {
        Self {
            builder,
            objects: Vec::new(),
            functions: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            enums: Vec::new(),
            c_names: Vec::new(),
            sources: Vec::new(),
            including: Vec::new(),
        }
    }

    /// Reads `path` and dispatches its records, following includes.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<(), DefsError> {
        let path = path.as_ref();
        let key = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if self.including.contains(&key) {
            return Err(DefsError::IncludeCycle {
                path: path.to_path_buf(),
            });
        }

        info!(file = %path.display(), "parsing file");
        let source = fs::read_to_string(path).map_err(|source| DefsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tree = reader::parse_source(&source, &path.display().to_string())?;
        self.sources.push(path.to_path_buf());

        self.including.push(key);
        let result = self.start_parsing(&tree, path);
        self.including.pop();
        result
    }

    /// Dispatches records from in-memory text. `origin` names the source in
    /// errors and anchors relative includes.
    pub fn parse_str(&mut self, source: &str, origin: impl AsRef<Path>) -> Result<(), DefsError> {
        let origin = origin.as_ref();
        let tree = reader::parse_source(source, &origin.display().to_string())?;
        self.start_parsing(&tree, origin)
    }

    /// Dispatches already-read records in document order.
    pub fn start_parsing(&mut self, tree: &[Record], origin: &Path) -> Result<(), DefsError> {
        for node in tree {
            self.handle(node, origin)?;
        }
        Ok(())
    }

    fn handle(&mut self, node: &Record, origin: &Path) -> Result<(), DefsError> {
        let Some((head, args)) = node.as_list().and_then(|items| items.split_first()) else {
            debug!(record = %node, "skipping top-level record without a keyword");
            return Ok(());
        };
        let keyword = head.as_text().map_or(Keyword::Unknown, Keyword::classify);
        let invalid = |source: DefinitionError| DefsError::Definition {
            file: origin.display().to_string(),
            keyword: keyword.as_str(),
            source,
        };

        match keyword {
            Keyword::Object => {
                let def = self.builder.object(args).map_err(invalid)?;
                self.add_object(def);
            }
            Keyword::Function => {
                let def = self.builder.function(args).map_err(invalid)?;
                self.add_function(def);
            }
            Keyword::Method => {
                let def = self.builder.method(args).map_err(invalid)?;
                self.add_method(def);
            }
            Keyword::Enum => {
                let def = self.builder.enumeration(EnumKind::Enum, args).map_err(invalid)?;
                self.add_enum(def);
            }
            Keyword::Flags => {
                let def = self.builder.enumeration(EnumKind::Flags, args).map_err(invalid)?;
                self.add_enum(def);
            }
            Keyword::Include => self.handle_include(args, origin)?,
            Keyword::Unknown => {
                debug!(keyword = head.as_text().unwrap_or(""), "ignoring unknown definition");
            }
        }
        Ok(())
    }

    fn handle_include(&mut self, args: &[Record], origin: &Path) -> Result<(), DefsError> {
        let name = args
            .first()
            .and_then(Record::to_text)
            .ok_or_else(|| DefsError::MissingInclude {
                file: origin.display().to_string(),
            })?;
        let base_dir = origin.parent().unwrap_or(Path::new(""));
        let include_file = base_dir.join(name);
        debug!(from = %origin.display(), include = %include_file.display(), "following include");
        self.parse_file(include_file)
    }

    fn index_c_name(&mut self, c_name: &str) {
        if self.c_names.iter().any(|known| known == c_name) {
            warn!(c_name = %c_name, "c-name defined more than once");
        }
        self.c_names.push(c_name.to_string());
    }

    pub fn add_object(&mut self, def: ObjectDef) {
        self.index_c_name(&def.c_name);
        self.objects.push(def);
    }

    /// Functions marked `is-constructor-of` go to the constructor list.
    pub fn add_function(&mut self, def: FunctionDef) {
        self.index_c_name(&def.c_name);
        if def.is_constructor_of.is_some() {
            self.constructors.push(def);
        } else {
            self.functions.push(def);
        }
    }

    pub fn add_method(&mut self, def: MethodDef) {
        self.index_c_name(&def.c_name);
        self.methods.push(def);
    }

    pub fn add_enum(&mut self, def: EnumDef) {
        self.index_c_name(&def.c_name);
        self.enums.push(def);
    }
}

impl<B> DefsParser<B> {
    pub fn objects(&self) -> &[ObjectDef] {
        &self.objects
    }

    pub fn functions(&self) -> &[FunctionDef] {
        &self.functions
    }

    pub fn constructors(&self) -> &[FunctionDef] {
        &self.constructors
    }

    pub fn methods(&self) -> &[MethodDef] {
        &self.methods
    }

    pub fn enums(&self) -> &[EnumDef] {
        &self.enums
    }

    /// C names of every definition, duplicates included.
    pub fn c_names(&self) -> &[String] {
        &self.c_names
    }

    /// Files read so far, in the order they were opened.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Object by definition name or C name.
    pub fn find_object(&self, name: &str) -> Option<&ObjectDef> {
        self.objects.iter().find(|obj| obj.name == name || obj.c_name == name)
    }

    /// Methods whose `of-object` matches the object's name and module.
    pub fn find_methods(&self, obj: &ObjectDef) -> Vec<&MethodDef> {
        self.methods
            .iter()
            .filter(|method| method.of_object.name == obj.name && method.of_object.module == obj.in_module)
            .collect()
    }

    /// First constructor registered for `Name` or `GtkName`.
    pub fn find_constructor(&self, obj: &ObjectDef) -> Option<&FunctionDef> {
        self.constructors.iter().find(|ctor| {
            ctor.is_constructor_of.as_deref().is_some_and(|target| {
                target == obj.name || target.strip_prefix(FRAMEWORK_PREFIX) == Some(obj.name.as_str())
            })
        })
    }

    pub fn find_parent(&self, obj: &ObjectDef) -> Option<&ObjectDef> {
        let parent = obj.parent.as_deref()?;
        self.objects.iter().find(|candidate| candidate.name == parent)
    }
}
