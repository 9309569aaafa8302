/* Path creation and lookup inside value trees, and flat map conversion */

use crate::path::{segments, PathSegment, PATH_SEPARATOR};
use crate::value::{FlatMap, FormValue, ValueMap};

/* Place `value` at the dotted `path` inside `root`, creating intermediate nodes.
 *
 * Missing intermediates become arrays when addressed by an index segment and maps
 * otherwise. An occupied leaf is only overwritten when `replace` is set. Returns false
 * when the value could not be placed, either because the leaf is occupied or because an
 * existing node along the path has the wrong shape. */
pub fn create(root: &mut ValueMap, path: &str, value: FormValue, replace: bool) -> bool {
    let segments = segments(path);
    let Some((first, rest)) = segments.split_first() else {
        return false;
    };
    let key = first.to_key();
    match root.get_mut(&key) {
        Some(slot) => place(slot, rest, value, replace),
        None => {
            root.insert(key, build(rest, value));
            true
        }
    }
}

fn place(slot: &mut FormValue, rest: &[PathSegment], value: FormValue, replace: bool) -> bool {
    let Some((segment, tail)) = rest.split_first() else {
        if replace || slot.is_undefined() {
            *slot = value;
            return true;
        }
        return false;
    };

    if slot.is_undefined() {
        *slot = build(rest, value);
        return true;
    }

    match slot {
        FormValue::Map(map) => {
            let key = segment.to_key();
            match map.get_mut(&key) {
                Some(child) => place(child, tail, value, replace),
                None => {
                    map.insert(key, build(tail, value));
                    true
                }
            }
        }
        FormValue::Array(items) => {
            let PathSegment::Index(index) = *segment else {
                return false;
            };
            if index >= items.len() {
                items.resize(index + 1, FormValue::Undefined);
            }
            place(&mut items[index], tail, value, replace)
        }
        _ => false,
    }
}

/* Fresh subtree holding `value` at the end of `rest` */
fn build(rest: &[PathSegment], value: FormValue) -> FormValue {
    match rest.split_first() {
        None => value,
        Some((PathSegment::Index(index), tail)) => {
            let mut items = vec![FormValue::Undefined; *index];
            items.push(build(tail, value));
            FormValue::Array(items)
        }
        Some((PathSegment::Key(key), tail)) => {
            let mut map = ValueMap::new();
            map.insert(key.clone(), build(tail, value));
            FormValue::Map(map)
        }
    }
}

/* Look up the node at `path`; holes count as absent */
pub fn access<'a>(root: &'a ValueMap, path: &str) -> Option<&'a FormValue> {
    let segments = segments(path);
    let (first, rest) = segments.split_first()?;
    let mut node = root.get(&first.to_key())?;
    for segment in rest {
        node = match (node, segment) {
            (FormValue::Map(map), segment) => map.get(&segment.to_key())?,
            (FormValue::Array(items), PathSegment::Index(index)) => items.get(*index)?,
            _ => return None,
        };
    }
    (!node.is_undefined()).then_some(node)
}

/* Mutable variant of [`access`] */
pub fn access_mut<'a>(root: &'a mut ValueMap, path: &str) -> Option<&'a mut FormValue> {
    let segments = segments(path);
    let (first, rest) = segments.split_first()?;
    let mut node = root.get_mut(&first.to_key())?;
    for segment in rest {
        node = match node {
            FormValue::Map(map) => map.get_mut(&segment.to_key())?,
            FormValue::Array(items) => match segment {
                PathSegment::Index(index) => items.get_mut(*index)?,
                PathSegment::Key(_) => return None,
            },
            _ => return None,
        };
    }
    if node.is_undefined() {
        None
    } else {
        Some(node)
    }
}

/* Expand a flat map into a value tree, in input iteration order */
pub fn convert_from_flat(values: &FlatMap) -> ValueMap {
    let mut tree = ValueMap::new();
    for (path, value) in values {
        if !create(&mut tree, path, value.clone(), false) {
            tracing::debug!(path = %path, "flat value conflicts with existing structure, dropped");
        }
    }
    tree
}

/* Flatten a value tree into dotted paths.
 *
 * Arrays made only of leaves stay a single array-valued entry; arrays holding
 * containers are addressed per index. Holes are skipped. */
pub fn flatten(tree: &ValueMap) -> FlatMap {
    let mut flat = FlatMap::new();
    for (key, value) in tree {
        flatten_into(&mut flat, key.clone(), value);
    }
    flat
}

fn flatten_into(flat: &mut FlatMap, path: String, value: &FormValue) {
    match value {
        FormValue::Undefined => {}
        FormValue::Map(map) => {
            for (key, child) in map {
                flatten_into(flat, join(&path, key), child);
            }
        }
        FormValue::Array(items) if items.iter().any(|item| !item.is_primitive()) => {
            for (index, item) in items.iter().enumerate() {
                flatten_into(flat, join(&path, &index.to_string()), item);
            }
        }
        leaf => {
            flat.insert(path, leaf.clone());
        }
    }
}

fn join(prefix: &str, key: &str) -> String {
    let mut path = String::with_capacity(prefix.len() + key.len() + 1);
    path.push_str(prefix);
    path.push(PATH_SEPARATOR);
    path.push_str(key);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_json(tree: &ValueMap) -> serde_json::Value {
        FormValue::Map(tree.clone()).to_json()
    }

    #[test]
    fn create_builds_nested_maps() {
        let mut tree = ValueMap::new();
        assert!(create(&mut tree, "a.b.c", FormValue::string("x"), false));
        assert_eq!(tree_json(&tree), serde_json::json!({ "a": { "b": { "c": "x" } } }));
    }

    #[test]
    fn index_segments_build_sparse_arrays() {
        let mut tree = ValueMap::new();
        assert!(create(&mut tree, "rows.1.name", FormValue::string("b"), false));
        let rows = tree["rows"].as_array().expect("array");
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_undefined());

        assert!(create(&mut tree, "rows.0.name", FormValue::string("a"), false));
        assert_eq!(
            tree_json(&tree),
            serde_json::json!({ "rows": [{ "name": "a" }, { "name": "b" }] })
        );
    }

    #[test]
    fn occupied_leaf_needs_replace() {
        let mut tree = ValueMap::new();
        assert!(create(&mut tree, "a", FormValue::string("first"), false));
        assert!(!create(&mut tree, "a", FormValue::string("second"), false));
        assert_eq!(tree["a"], FormValue::string("first"));
        assert!(create(&mut tree, "a", FormValue::string("second"), true));
        assert_eq!(tree["a"], FormValue::string("second"));
    }

    #[test]
    fn shape_conflicts_are_dropped() {
        let mut tree = ValueMap::new();
        assert!(create(&mut tree, "a", FormValue::string("leaf"), false));
        assert!(!create(&mut tree, "a.b", FormValue::string("child"), false));
        assert_eq!(tree["a"], FormValue::string("leaf"));

        assert!(create(&mut tree, "list.0", FormValue::string("x"), false));
        assert!(!create(&mut tree, "list.key", FormValue::string("y"), false));
    }

    #[test]
    fn numeric_keys_inside_maps_stay_keys() {
        let mut tree = ValueMap::new();
        assert!(create(&mut tree, "a.b", FormValue::string("x"), false));
        assert!(create(&mut tree, "a.0", FormValue::string("y"), false));
        let map = tree["a"].as_map().expect("map");
        assert_eq!(map["0"], FormValue::string("y"));
    }

    #[test]
    fn access_skips_holes() {
        let mut tree = ValueMap::new();
        create(&mut tree, "rows.2", FormValue::string("c"), false);
        assert!(access(&tree, "rows.0").is_none());
        assert_eq!(access(&tree, "rows.2"), Some(&FormValue::string("c")));
        assert!(access(&tree, "rows.9").is_none());
        assert!(access(&tree, "").is_none());
    }

    #[test]
    fn flatten_keeps_leaf_arrays_whole() {
        let mut tree = ValueMap::new();
        create(&mut tree, "tags", FormValue::array(["a", "b"]), false);
        create(&mut tree, "rows.0.name", FormValue::string("x"), false);
        create(&mut tree, "user.email", FormValue::string("u@example.com"), false);

        let flat = flatten(&tree);
        assert_eq!(flat["tags"], FormValue::array(["a", "b"]));
        assert_eq!(flat["rows.0.name"], FormValue::string("x"));
        assert_eq!(flat["user.email"], FormValue::string("u@example.com"));
        assert_eq!(flat.len(), 3);
    }

    #[test]
    fn later_flat_keys_extend_earlier_structure() {
        let mut flat = FlatMap::new();
        flat.insert("user.name".into(), FormValue::string("ada"));
        flat.insert("user.roles".into(), FormValue::array(["admin"]));
        flat.insert("user.name.first".into(), FormValue::string("dropped"));

        let tree = convert_from_flat(&flat);
        assert_eq!(
            tree_json(&tree),
            serde_json::json!({ "user": { "name": "ada", "roles": ["admin"] } })
        );
    }
}
