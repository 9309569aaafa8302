/* Write and probe direction: walk a value tree alongside the live controls */

use crate::assign::assign_values;
use crate::control::{ControlId, FormSurface};
use crate::errors::{FormValuesError, FormValuesResult};
use crate::path::{array_name, child_name};
use crate::value::{FormValue, ValueMap};
use tracing::error;

/* Controls a tree node maps onto, decided before anything is touched */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /* Hole in a sparse sequence */
    Hole,
    /* Sequence mapped index for index onto `prefix[]` controls */
    BracketArray(Vec<ControlId>),
    /* Whole sequence is the value of one control named `prefix` */
    MultiValued(ControlId),
    /* Sequence recursed per index as `prefix[i]` */
    Indexed,
    /* Map recursed per key as `prefix[key]` */
    Keyed,
    /* Leaf assigned into every control named `prefix` */
    Leaf(Vec<ControlId>),
    /* Leaf without any matching control */
    Missing,
}

/* Decide which controls `value` maps onto under the raw name `prefix`.
 *
 * Sequences prefer bracket-array controls, then a single control carrying the whole
 * sequence, then per-index recursion. */
pub fn resolve<S>(surface: &S, value: &FormValue, prefix: &str) -> Target
where
    S: FormSurface + ?Sized,
{
    match value {
        FormValue::Undefined => Target::Hole,
        FormValue::Array(_) => {
            let bracket = surface.find_named(&array_name(prefix));
            if !bracket.is_empty() {
                return Target::BracketArray(bracket);
            }
            match surface.find_named(prefix).as_slice() {
                [single] => Target::MultiValued(*single),
                _ => Target::Indexed,
            }
        }
        FormValue::Map(_) => Target::Keyed,
        _ => {
            let exact = surface.find_named(prefix);
            if exact.is_empty() {
                Target::Missing
            } else {
                Target::Leaf(exact)
            }
        }
    }
}

/* Outcome of walking one node */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Skipped,
    Assigned,
    Probed(Vec<ControlId>),
    Recursed(Vec<ControlId>),
}

impl Step {
    /* Controls reported by probe mode, in walk order */
    pub fn into_controls(self) -> Vec<ControlId> {
        match self {
            Step::Probed(ids) | Step::Recursed(ids) => ids,
            Step::Skipped | Step::Assigned => Vec::new(),
        }
    }
}

enum Access<'a, S: ?Sized> {
    Probe(&'a S),
    Write(&'a mut S),
}

/* Recursive walker shared by `set` and `inputs` */
pub struct ValueTreeWalker<'a, S: FormSurface + ?Sized> {
    access: Access<'a, S>,
    strict: bool,
}

impl<'a, S: FormSurface + ?Sized> ValueTreeWalker<'a, S> {
    /* Walker that reports matched controls without mutating them */
    pub fn probe(surface: &'a S, strict: bool) -> Self {
        Self {
            access: Access::Probe(surface),
            strict,
        }
    }

    /* Walker that assigns values into matched controls */
    pub fn write(surface: &'a mut S, strict: bool) -> Self {
        Self {
            access: Access::Write(surface),
            strict,
        }
    }

    fn surface(&self) -> &S {
        match &self.access {
            Access::Probe(surface) => *surface,
            Access::Write(surface) => &**surface,
        }
    }

    /* Walk a root map; keys are bare control names */
    pub fn walk_root(&mut self, values: &ValueMap) -> FormValuesResult<Vec<ControlId>> {
        let mut collected = Vec::new();
        for (key, value) in values {
            collected.extend(self.walk(value, key)?.into_controls());
        }
        Ok(collected)
    }

    pub fn walk(&mut self, value: &FormValue, prefix: &str) -> FormValuesResult<Step> {
        let target = resolve(self.surface(), value, prefix);
        match target {
            Target::Hole => Ok(Step::Skipped),
            Target::BracketArray(ids) => Ok(match &mut self.access {
                Access::Probe(_) => {
                    let items = value.as_array().unwrap_or_default();
                    Step::Probed(
                        ids.into_iter()
                            .zip(items)
                            .filter(|(_, item)| item.is_true())
                            .map(|(id, _)| id)
                            .collect(),
                    )
                }
                Access::Write(surface) => {
                    assign_values(surface.controls_mut(), &ids, value);
                    Step::Assigned
                }
            }),
            Target::MultiValued(id) => Ok(self.apply(vec![id], value)),
            Target::Leaf(ids) => Ok(self.apply(ids, value)),
            Target::Indexed => {
                let items = value.as_array().unwrap_or_default();
                let mut collected = Vec::new();
                for (index, item) in items.iter().enumerate() {
                    let name = child_name(prefix, &index.to_string());
                    collected.extend(self.walk(item, &name)?.into_controls());
                }
                Ok(Step::Recursed(collected))
            }
            Target::Keyed => {
                let mut collected = Vec::new();
                if let Some(map) = value.as_map() {
                    for (key, item) in map {
                        let name = child_name(prefix, key);
                        collected.extend(self.walk(item, &name)?.into_controls());
                    }
                }
                Ok(Step::Recursed(collected))
            }
            Target::Missing => {
                if self.strict {
                    return Err(FormValuesError::MissingField {
                        field: prefix.to_string(),
                    });
                }
                error!(field = %prefix, "undefined field");
                Ok(Step::Skipped)
            }
        }
    }

    fn apply(&mut self, ids: Vec<ControlId>, value: &FormValue) -> Step {
        match &mut self.access {
            Access::Probe(_) => Step::Probed(ids),
            Access::Write(surface) => {
                assign_values(surface.controls_mut(), &ids, value);
                Step::Assigned
            }
        }
    }
}
