/* High-level form values API */

use crate::builder::{OutputMode, ValueTreeBuilder};
use crate::config::FormValuesConfig;
use crate::control::{Control, ControlId, FormSurface};
use crate::errors::{FormValuesError, FormValuesResult};
use crate::fieldname;
use crate::path::{self, InputInfo};
use crate::tree::{self, create};
use crate::value::{FormValue, ValueMap};
use crate::walker::ValueTreeWalker;

/* Reads values out of, and writes values into, a form surface.
 *
 * The engine never owns the controls; every operation borrows the surface for its
 * duration only. */
#[derive(Clone, Debug, Default)]
pub struct FormValues {
    config: FormValuesConfig,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FormValuesConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormValuesConfig {
        &self.config
    }

    pub fn include_disabled(&self) -> bool {
        self.config.include_disabled
    }

    pub fn set_include_disabled(&mut self, state: bool) {
        self.config.include_disabled = state;
    }

    /* Collect the values of every control */
    pub fn get<S>(&self, form: &S, flat: bool) -> ValueMap
    where
        S: FormSurface + ?Sized,
    {
        self.get_selected(form, flat, |_| true)
    }

    /* Collect the values of the controls accepted by `selector` */
    pub fn get_selected<S, F>(&self, form: &S, flat: bool, selector: F) -> ValueMap
    where
        S: FormSurface + ?Sized,
        F: Fn(&Control) -> bool,
    {
        ValueTreeBuilder::new(OutputMode::from_flat(flat), self.config.include_disabled)
            .collect(form, selector)
    }

    /* Write a value tree (or a flat map when `flat` is set) into the matching controls.
     *
     * With `strict` set, a leaf without a matching control fails with `MissingField`;
     * otherwise it is reported through tracing and skipped. */
    pub fn set<S>(
        &self,
        form: &mut S,
        values: &ValueMap,
        flat: bool,
        strict: bool,
    ) -> FormValuesResult<()>
    where
        S: FormSurface + ?Sized,
    {
        let expanded;
        let values = if flat {
            expanded = tree::convert_from_flat(values);
            &expanded
        } else {
            values
        };
        ValueTreeWalker::write(form, strict).walk_root(values)?;
        Ok(())
    }

    /* Controls holding the field at the dotted path `field`, without mutating them */
    pub fn inputs<S>(&self, form: &S, field: &str, strict: bool) -> FormValuesResult<Vec<ControlId>>
    where
        S: FormSurface + ?Sized,
    {
        let mut probe = ValueMap::new();
        if !create(&mut probe, field, FormValue::Bool(true), false) {
            return Err(FormValuesError::InvalidFieldPath {
                path: field.to_string(),
            });
        }
        ValueTreeWalker::probe(form, strict).walk_root(&probe)
    }

    /* Canonical dotted path of the control at `id` */
    pub fn fieldname<S>(&self, form: &S, id: ControlId) -> FormValuesResult<String>
    where
        S: FormSurface + ?Sized,
    {
        fieldname::fieldname(form, id)
    }

    /* Dotted path of a raw control name, wrapping `value` for array names */
    pub fn parse_path(name: &str, value: FormValue) -> InputInfo {
        path::parse_path(name, value)
    }

    /* Expand a flat map into a value tree */
    pub fn convert_from_flat(values: &ValueMap) -> ValueMap {
        tree::convert_from_flat(values)
    }
}

/* Snapshot of the flat values used to detect changes between two points in time */
#[derive(Clone, Debug, Default)]
pub struct ValuesState {
    last: Option<ValueMap>,
}

impl ValuesState {
    pub fn new() -> Self {
        Self::default()
    }

    /* Refresh the snapshot; a no-op unless change tracking is enabled */
    pub fn update<S>(&mut self, engine: &FormValues, form: &S)
    where
        S: FormSurface + ?Sized,
    {
        if engine.config().change_state {
            let current = engine.get(form, true);
            tracing::debug!(fields = current.len(), "updated values state");
            self.last = Some(current);
        }
    }

    /* Whether the current values differ from the snapshot; None when tracking is off */
    pub fn has_changes<S>(&self, engine: &FormValues, form: &S) -> Option<bool>
    where
        S: FormSurface + ?Sized,
    {
        if !engine.config().change_state {
            return None;
        }
        let current = engine.get(form, true);
        Some(self.last.as_ref() != Some(&current))
    }
}
