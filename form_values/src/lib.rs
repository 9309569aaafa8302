/* Form values
 *
 * Converts between a flat collection of bracket-named form controls and a nested
 * value tree, in both directions: reading control state into a tree (or a flat
 * map keyed by dotted paths) and writing a tree back into the matching controls.
 */

pub mod assign;
pub mod builder;
pub mod config;
pub mod control;
pub mod errors;
pub mod extract;
pub mod fieldname;
pub mod path;
pub mod tree;
pub mod value;
pub mod values;
pub mod walker;

pub use config::FormValuesConfig;
pub use control::{Control, ControlId, ControlKind, FileHandle, Form, FormSurface, SelectOption};
pub use errors::{FormValuesError, FormValuesResult};
pub use path::{parse_name, parse_path, InputInfo, ParsedName, PathSegment};
pub use tree::{convert_from_flat, flatten};
pub use value::{FlatMap, FormValue, ValueMap};
pub use values::{FormValues, ValuesState};
