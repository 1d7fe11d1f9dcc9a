// Marshaling bridge: turns native type descriptors into PHP-GTK glue fragments.
// Knows nothing about definition files; callers feed it descriptors and names.

pub mod arg_types;
pub mod error;
pub mod names;
pub mod target;
pub mod var_list;

pub use arg_types::{ArgMatcher, ArgType, CallContext, Param, ParseSlot, ReturnTemplate};
pub use error::{MarshalError, Operation};
pub use names::{canonicalize, lookup_macro};
pub use var_list::VarList;
