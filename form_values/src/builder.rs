/* Read direction: collect control values into a flat map or a value tree */

use crate::control::{Control, FormSurface};
use crate::extract::extract;
use crate::path::{parse_path, InputInfo};
use crate::tree::{access_mut, create};
use crate::value::{FormValue, ValueMap};
use tracing::debug;

/* Output shape of a collection pass */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /* Keys are full dotted paths */
    Flat,
    /* Nested maps and sequences */
    Tree,
}

impl OutputMode {
    pub fn from_flat(flat: bool) -> Self {
        if flat {
            OutputMode::Flat
        } else {
            OutputMode::Tree
        }
    }
}

/* Collects control values in document order */
pub struct ValueTreeBuilder {
    mode: OutputMode,
    include_disabled: bool,
    values: ValueMap,
}

impl ValueTreeBuilder {
    pub fn new(mode: OutputMode, include_disabled: bool) -> Self {
        Self {
            mode,
            include_disabled,
            values: ValueMap::new(),
        }
    }

    /* Visit every control accepted by `selector` */
    pub fn collect<S, F>(mut self, surface: &S, selector: F) -> ValueMap
    where
        S: FormSurface + ?Sized,
        F: Fn(&Control) -> bool,
    {
        for control in surface.controls().iter().filter(|control| selector(*control)) {
            self.visit(control);
        }
        self.values
    }

    pub fn visit(&mut self, control: &Control) {
        let Some(value) = extract(control, self.include_disabled) else {
            return;
        };
        let info = parse_path(&control.name, value);
        match self.mode {
            OutputMode::Flat => self.merge_flat(info),
            OutputMode::Tree => self.merge_tree(info),
        }
    }

    fn merge_flat(&mut self, info: InputInfo) {
        match self.values.get_mut(&info.path) {
            Some(existing) => append_or_keep(existing, info.value, &info.path),
            None => {
                self.values.insert(info.path, info.value);
            }
        }
    }

    fn merge_tree(&mut self, info: InputInfo) {
        match access_mut(&mut self.values, &info.path) {
            Some(existing) => append_or_keep(existing, info.value, &info.path),
            None => {
                if !create(&mut self.values, &info.path, info.value, false) {
                    debug!(path = %info.path, "value conflicts with existing structure, dropped");
                }
            }
        }
    }
}

/* Concatenate when both sides are sequences; otherwise the first write wins */
fn append_or_keep(existing: &mut FormValue, value: FormValue, path: &str) {
    match (existing, value) {
        (FormValue::Array(items), FormValue::Array(more)) => items.extend(more),
        _ => debug!(path = %path, "path already set, later value dropped"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Form;

    #[test]
    fn bracket_arrays_concatenate_in_document_order() {
        let form = Form::new(vec![
            Control::text("tags[]", "a"),
            Control::text("name", "x"),
            Control::text("tags[]", "b"),
        ]);
        let values = ValueTreeBuilder::new(OutputMode::Tree, false).collect(&form, |_| true);
        assert_eq!(values["tags"], FormValue::array(["a", "b"]));
    }

    #[test]
    fn scalar_collisions_keep_first_value() {
        let form = Form::new(vec![Control::text("a", "1"), Control::text("a", "2")]);
        for mode in [OutputMode::Flat, OutputMode::Tree] {
            let values = ValueTreeBuilder::new(mode, false).collect(&form, |_| true);
            assert_eq!(values["a"], FormValue::string("1"));
        }
    }

    #[test]
    fn flat_mode_keys_are_dotted() {
        let form = Form::new(vec![
            Control::text("user[name]", "ada"),
            Control::text("user[tags][]", "x"),
            Control::text("user[tags][]", "y"),
        ]);
        let values = ValueTreeBuilder::new(OutputMode::Flat, false).collect(&form, |_| true);
        assert_eq!(values["user.name"], FormValue::string("ada"));
        assert_eq!(values["user.tags"], FormValue::array(["x", "y"]));
    }

    #[test]
    fn selector_limits_visited_controls() {
        let form = Form::new(vec![Control::text("a", "1"), Control::textarea("b", "2")]);
        let values = ValueTreeBuilder::new(OutputMode::Tree, false)
            .collect(&form, |control| control.name == "b");
        assert_eq!(values.len(), 1);
        assert_eq!(values["b"], FormValue::string("2"));
    }
}
