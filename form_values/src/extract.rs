/* Per-kind value extraction */

use crate::control::{Control, ControlKind};
use crate::value::FormValue;

/* Logical value of one control, or None when it contributes nothing.
 *
 * Disabled controls and disabled select options are skipped unless
 * `include_disabled` is set. Unchecked checkable controls yield None, never false. */
pub fn extract(control: &Control, include_disabled: bool) -> Option<FormValue> {
    if control.disabled && !include_disabled {
        return None;
    }

    match control.kind {
        ControlKind::Checkbox | ControlKind::Radio => {
            if !control.checked {
                return None;
            }
            match control.value_attribute.as_deref() {
                Some(value) if !value.is_empty() => Some(FormValue::string(value)),
                _ => Some(FormValue::Bool(true)),
            }
        }
        ControlKind::File => control.files.first().cloned().map(FormValue::File),
        ControlKind::FileMultiple => {
            if control.files.is_empty() {
                None
            } else {
                Some(FormValue::Array(
                    control.files.iter().cloned().map(FormValue::File).collect(),
                ))
            }
        }
        ControlKind::Select => control
            .selected_values(include_disabled)
            .into_iter()
            .next()
            .map(FormValue::String),
        ControlKind::SelectMultiple => Some(FormValue::array(
            control.selected_values(include_disabled),
        )),
        ControlKind::Text | ControlKind::Textarea => Some(FormValue::string(control.value.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{FileHandle, SelectOption};

    #[test]
    fn text_keeps_empty_string() {
        let control = Control::text("name", "");
        assert_eq!(extract(&control, false), Some(FormValue::string("")));
    }

    #[test]
    fn disabled_controls_are_skipped_unless_included() {
        let control = Control::text("name", "x").disabled();
        assert_eq!(extract(&control, false), None);
        assert_eq!(extract(&control, true), Some(FormValue::string("x")));
    }

    #[test]
    fn checkbox_without_value_attribute_yields_true() {
        let checked = Control::checkbox("agree", None, true);
        let unchecked = Control::checkbox("agree", None, false);
        assert_eq!(extract(&checked, false), Some(FormValue::Bool(true)));
        assert_eq!(extract(&unchecked, false), None);
    }

    #[test]
    fn radio_yields_its_value_attribute() {
        let control = Control::radio("color", "red", true);
        assert_eq!(extract(&control, false), Some(FormValue::string("red")));
    }

    #[test]
    fn single_file_and_multiple_files() {
        let a = FileHandle::new("a.txt", 3);
        let b = FileHandle::new("b.txt", 5);

        let single = Control::file("upload", vec![a.clone(), b.clone()]);
        assert_eq!(extract(&single, false), Some(FormValue::File(a.clone())));

        let multiple = Control::file_multiple("uploads", vec![a.clone(), b.clone()]);
        assert_eq!(
            extract(&multiple, false),
            Some(FormValue::array([FormValue::File(a), FormValue::File(b)]))
        );

        assert_eq!(extract(&Control::file_multiple("uploads", vec![]), false), None);
        assert_eq!(extract(&Control::file("upload", vec![]), false), None);
    }

    #[test]
    fn select_uses_label_without_value_attribute() {
        let control = Control::select(
            "size",
            vec![SelectOption::labelled("Small"), SelectOption::labelled("Large").selected()],
        );
        assert_eq!(extract(&control, false), Some(FormValue::string("Large")));
    }

    #[test]
    fn select_with_disabled_selection_yields_none() {
        let control = Control::select("size", vec![SelectOption::new("s").selected().disabled()]);
        assert_eq!(extract(&control, false), None);
        assert_eq!(extract(&control, true), Some(FormValue::string("s")));
    }

    #[test]
    fn multi_select_yields_possibly_empty_array() {
        let control = Control::select_multiple(
            "tags",
            vec![SelectOption::new("a").selected(), SelectOption::new("b")],
        );
        assert_eq!(extract(&control, false), Some(FormValue::array(["a"])));

        let empty = Control::select_multiple("tags", vec![SelectOption::new("a")]);
        assert_eq!(extract(&empty, false), Some(FormValue::Array(Vec::new())));
    }
}
