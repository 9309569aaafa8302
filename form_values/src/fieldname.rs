/* Canonical dotted path of a live control */

use crate::control::{ControlId, FormSurface};
use crate::errors::{FormValuesError, FormValuesResult};
use crate::path::{rewrite_brackets, PATH_SEPARATOR};

/* Resolve the canonical path of the control at `id`.
 *
 * Names with two adjacent unknown positions (`rows[][name]`) need an explicit
 * fieldname. A single trailing `[]` resolves to the control's position among the
 * controls sharing its raw name. */
pub fn fieldname<S>(surface: &S, id: ControlId) -> FormValuesResult<String>
where
    S: FormSurface + ?Sized,
{
    let control = surface
        .control(id)
        .ok_or_else(|| FormValuesError::InvalidControlReference {
            reason: format!("no control at position {}", id),
        })?;
    if control.name.is_empty() {
        return Err(FormValuesError::InvalidControlReference {
            reason: format!("control {} has no name", id),
        });
    }

    let mut name = rewrite_brackets(&control.name);

    /* `a[][b]` rewrites to `a..b` */
    if name.contains("..") {
        return match control.fieldname.as_deref() {
            Some(explicit) if !explicit.is_empty() => Ok(explicit.to_string()),
            _ => Err(FormValuesError::AmbiguousFieldName {
                name: control.name.clone(),
            }),
        };
    }

    if name.ends_with(PATH_SEPARATOR) {
        name.pop();
        let position = surface
            .find_named(&control.name)
            .iter()
            .position(|candidate| *candidate == id)
            .unwrap_or_default();
        name.push(PATH_SEPARATOR);
        name.push_str(&position.to_string());
    }

    Ok(name)
}
