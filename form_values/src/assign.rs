/* Per-kind value assignment */

use crate::control::{Control, ControlId, ControlKind};
use crate::value::FormValue;
use tracing::{debug, warn};

/* Write `value` into the controls matched for one tree node.
 *
 * A sequence written into a single select replaces its selection. Any other sequence is
 * distributed slot by slot over the matched controls, skipping holes and missing slots.
 * Scalars are written into every matched control. */
pub fn assign_values(controls: &mut [Control], ids: &[ControlId], value: &FormValue) {
    if let (FormValue::Array(items), [id]) = (value, ids) {
        if let Some(control) = controls.get_mut(id.0) {
            if control.kind.is_select() {
                select_all(control, items);
                debug!(name = %control.name, "select.array.value");
                return;
            }
        }
    }

    for (slot, id) in ids.iter().enumerate() {
        let Some(control) = controls.get_mut(id.0) else {
            continue;
        };
        let slot_value = match value {
            FormValue::Array(items) => match items.get(slot) {
                Some(FormValue::Undefined) | None => continue,
                Some(item) => item,
            },
            scalar => scalar,
        };
        if control.kind.is_checkable() {
            set_checked(control, slot_value);
        } else {
            assign(control, slot_value);
        }
    }
}

/* Select exactly the options whose effective value is contained in `items` */
fn select_all(control: &mut Control, items: &[FormValue]) {
    for option in &mut control.options {
        let hit = items
            .iter()
            .any(|item| item.as_str() == Some(option.effective_value()));
        option.selected = hit;
    }
}

/* Check or uncheck a radio or checkbox.
 *
 * Values that neither match nor explicitly clear the control leave it untouched, so a
 * value written across a radio group only flips the option it names. */
pub fn set_checked(control: &mut Control, value: &FormValue) {
    let matches_attribute = control.has_value_attribute()
        && value.as_str() == control.value_attribute.as_deref();

    let checked = if matches_attribute || value.is_true() || value.is_on() {
        true
    } else if value.is_off() {
        false
    } else {
        return;
    };

    control.checked = checked;
    debug!(name = %control.name, checked, "set_checked");
}

/* Assign a scalar into one control; checkables only change their checked state */
pub fn assign(control: &mut Control, value: &FormValue) {
    match control.kind {
        ControlKind::Select | ControlKind::SelectMultiple => {
            let wanted = value.to_control_text().filter(|_| value.is_primitive());
            let mut found = false;
            for option in &mut control.options {
                let hit = !found && wanted.as_deref() == Some(option.effective_value());
                option.selected = hit;
                found |= hit;
            }
            debug!(name = %control.name, found, "select.value");
        }
        ControlKind::File | ControlKind::FileMultiple => {
            if matches!(value, FormValue::Null) || value.as_str() == Some("") {
                control.files.clear();
                debug!(name = %control.name, "file.clear");
            } else {
                warn!(name = %control.name, "file controls cannot be assigned programmatically");
            }
        }
        ControlKind::Checkbox | ControlKind::Radio => set_checked(control, value),
        ControlKind::Text | ControlKind::Textarea => {
            match value.to_control_text() {
                Some(text) => {
                    debug!(name = %control.name, value = %text, "value");
                    control.value = text;
                }
                None => {
                    warn!(name = %control.name, "value has no text representation, skipped");
                }
            }
        }
    }
}
