// PHP-GTK vocabulary consumed by the argument strategies.
// Everything target-specific lives here; the strategies only splice these in.

/// Canonical prefix that marks a framework-owned type after `canonicalize`.
pub const PREFIX_MARKER: &str = "_GTK";

/// Infix used for runtime type-tag macros (`GTK_TYPE_WIDGET`).
pub const TYPE_TAG: &str = "GTK_TYPE";

/// Type-name prefix tolerated when matching constructors to objects.
pub const FRAMEWORK_PREFIX: &str = "Gtk";

/// Native null pointer literal; never quoted when used as a default.
pub const NULL_LITERAL: &str = "NULL";

/// Accessor that unwraps the native object held by a PHP wrapper.
pub const OBJECT_GETTER: &str = "PHP_GTK_GET";

/// Constructor for a PHP wrapper around a native object.
pub const OBJECT_WRAPPER_NEW: &str = "php_gtk_new";

/// Base type every native object is cast to before wrapping.
pub const OBJECT_BASE_TYPE: &str = "GtkObject";

/// Zval holding `$this` inside a generated method.
pub const THIS_PTR: &str = "this_ptr";

/// Suffix of the class entry used for class-identity checks (`gtk_widget_ce`).
pub const CLASS_ENTRY_SUFFIX: &str = "_ce";

pub const ENUM_LOOKUP: &str = "php_gtk_get_enum_value";
pub const FLAG_LOOKUP: &str = "php_gtk_get_flag_value";

/// Native types whose returned strings are borrowed and must not be freed.
pub const BORROWED_STRINGS: &[&str] = &["const-gchar*", "const-char*", "static_string"];
