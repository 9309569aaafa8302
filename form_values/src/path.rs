/* Bracket-name parsing and dotted path helpers */

use crate::value::FormValue;
use std::fmt;

/* Separator of canonical dotted paths */
pub const PATH_SEPARATOR: char = '.';

/* Largest numeric segment that still addresses an array slot; larger ones become keys */
pub const MAX_ARRAY_INDEX: usize = 1 << 16;

/* One step of a dotted path */
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /* Object member */
    Key(String),
    /* Array member */
    Index(usize),
}

impl PathSegment {
    /* Only canonical decimals address slots; `007` stays the key it was named with */
    fn parse(raw: &str) -> Self {
        let canonical = raw == "0" || !raw.starts_with('0');
        if canonical && !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = raw.parse::<usize>() {
                if index <= MAX_ARRAY_INDEX {
                    return PathSegment::Index(index);
                }
            }
        }
        PathSegment::Key(raw.to_string())
    }

    /* Member name when the segment addresses a keyed node */
    pub fn to_key(&self) -> String {
        match self {
            PathSegment::Key(key) => key.clone(),
            PathSegment::Index(index) => index.to_string(),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/* Canonical form of a raw control name */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /* Dotted path with the trailing array marker removed */
    pub path: String,
    /* The raw name ended in an empty bracket group */
    pub is_array: bool,
}

/* Dotted path paired with the value normalized for it */
#[derive(Debug, Clone, PartialEq)]
pub struct InputInfo {
    pub path: String,
    pub value: FormValue,
}

/* Rewrite bracket groups into separators: `a[b][]` becomes `a.b.` */
pub fn rewrite_brackets(name: &str) -> String {
    name.chars()
        .filter_map(|ch| match ch {
            '[' => Some(PATH_SEPARATOR),
            ']' => None,
            other => Some(other),
        })
        .collect()
}

/* Parse a raw control name into its dotted path, detecting a trailing `[]` */
pub fn parse_name(name: &str) -> ParsedName {
    let mut path = rewrite_brackets(name);
    let is_array = path.ends_with(PATH_SEPARATOR);
    if is_array {
        path.pop();
    }
    ParsedName { path, is_array }
}

/* Parse a raw control name and wrap the value in a sequence for array names */
pub fn parse_path(name: &str, value: FormValue) -> InputInfo {
    let parsed = parse_name(name);
    let value = if parsed.is_array && !value.is_array() {
        FormValue::Array(vec![value])
    } else {
        value
    };
    InputInfo {
        path: parsed.path,
        value,
    }
}

/* Split a dotted path into segments; numeric segments address array slots */
pub fn segments(path: &str) -> Vec<PathSegment> {
    if path.is_empty() {
        return Vec::new();
    }
    path.split(PATH_SEPARATOR).map(PathSegment::parse).collect()
}

/* Raw control name of a child node, `key` at the root and `prefix[key]` below it */
pub fn child_name(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}[{}]", prefix, key)
    }
}

/* Raw control name of bracket-array members below `prefix` */
pub fn array_name(prefix: &str) -> String {
    format!("{}[]", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name_is_single_segment() {
        let parsed = parse_name("email");
        assert_eq!(parsed.path, "email");
        assert!(!parsed.is_array);
        assert_eq!(segments(&parsed.path), vec![PathSegment::Key("email".into())]);
    }

    #[test]
    fn nested_groups_become_dotted() {
        let parsed = parse_name("a[b][c]");
        assert_eq!(parsed.path, "a.b.c");
        assert!(!parsed.is_array);
    }

    #[test]
    fn trailing_empty_group_marks_array() {
        let parsed = parse_name("tags[]");
        assert_eq!(parsed.path, "tags");
        assert!(parsed.is_array);

        let info = parse_path("tags[]", FormValue::string("a"));
        assert_eq!(info.value, FormValue::array(["a"]));
    }

    #[test]
    fn array_values_are_not_wrapped_twice() {
        let info = parse_path("tags[]", FormValue::array(["a", "b"]));
        assert_eq!(info.value, FormValue::array(["a", "b"]));
    }

    #[test]
    fn inner_empty_group_keeps_empty_segment() {
        let parsed = parse_name("rows[][name]");
        assert_eq!(parsed.path, "rows..name");
        assert_eq!(
            segments(&parsed.path),
            vec![
                PathSegment::Key("rows".into()),
                PathSegment::Key(String::new()),
                PathSegment::Key("name".into()),
            ]
        );
    }

    #[test]
    fn numeric_segments_are_indices() {
        assert_eq!(
            segments("rows.2.name"),
            vec![
                PathSegment::Key("rows".into()),
                PathSegment::Index(2),
                PathSegment::Key("name".into()),
            ]
        );
        assert_eq!(
            segments("ids.99999999"),
            vec![
                PathSegment::Key("ids".into()),
                PathSegment::Key("99999999".into()),
            ]
        );
    }

    #[test]
    fn padded_numeric_segments_stay_keys() {
        assert_eq!(
            segments("zip.007.0"),
            vec![
                PathSegment::Key("zip".into()),
                PathSegment::Key("007".into()),
                PathSegment::Index(0),
            ]
        );
        assert_eq!(segments("01"), vec![PathSegment::Key("01".into())]);
    }

    #[test]
    fn child_names_use_brackets_below_root() {
        assert_eq!(child_name("", "a"), "a");
        assert_eq!(child_name("a", "b"), "a[b]");
        assert_eq!(child_name("a[b]", "0"), "a[b][0]");
        assert_eq!(array_name("a[b]"), "a[b][]");
    }
}
