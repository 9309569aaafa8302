/* Control model - the form surface the engine reads from and writes into */

use crate::errors::FormValuesResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/* Kind of an interactive control; selects the extraction and assignment rules */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlKind {
    /* Any single-line input (text, email, hidden, number, ...) */
    Text,
    Textarea,
    Select,
    SelectMultiple,
    Checkbox,
    Radio,
    File,
    FileMultiple,
}

impl ControlKind {
    pub fn is_checkable(self) -> bool {
        matches!(self, ControlKind::Checkbox | ControlKind::Radio)
    }

    pub fn is_select(self) -> bool {
        matches!(self, ControlKind::Select | ControlKind::SelectMultiple)
    }

    pub fn is_file(self) -> bool {
        matches!(self, ControlKind::File | ControlKind::FileMultiple)
    }
}

/* Option of a select control */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    /* Explicit value attribute */
    #[serde(default)]
    pub value: Option<String>,

    /* Visible label */
    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub selected: bool,

    #[serde(default)]
    pub disabled: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value: Some(value),
            selected: false,
            disabled: false,
        }
    }

    /* Option without a value attribute; its label doubles as the value */
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            value: None,
            label: label.into(),
            selected: false,
            disabled: false,
        }
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /* The value attribute when present and non-empty, otherwise the label */
    pub fn effective_value(&self) -> &str {
        match self.value.as_deref() {
            Some(value) if !value.is_empty() => value,
            _ => &self.label,
        }
    }
}

/* Handle of a file selected in a file control */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    pub name: String,

    #[serde(default)]
    pub size: u64,

    #[serde(default, rename = "type")]
    pub mime: Option<String>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            mime: None,
        }
    }
}

/* One interactive control of a form surface */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    /* Raw bracket-annotated name, e.g. `rows[0][title]` or `tags[]` */
    pub name: String,

    pub kind: ControlKind,

    #[serde(default)]
    pub disabled: bool,

    /* Current text value of text-like controls */
    #[serde(default)]
    pub value: String,

    /* Declared `value` attribute of checkbox and radio controls */
    #[serde(default)]
    pub value_attribute: Option<String>,

    #[serde(default)]
    pub checked: bool,

    #[serde(default)]
    pub options: Vec<SelectOption>,

    #[serde(default)]
    pub files: Vec<FileHandle>,

    /* Explicit canonical path for names that cannot be resolved by convention */
    #[serde(default)]
    pub fieldname: Option<String>,
}

impl Control {
    pub fn new(name: impl Into<String>, kind: ControlKind) -> Self {
        Self {
            name: name.into(),
            kind,
            disabled: false,
            value: String::new(),
            value_attribute: None,
            checked: false,
            options: Vec::new(),
            files: Vec::new(),
            fieldname: None,
        }
    }

    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut control = Self::new(name, ControlKind::Text);
        control.value = value.into();
        control
    }

    pub fn textarea(name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut control = Self::new(name, ControlKind::Textarea);
        control.value = value.into();
        control
    }

    pub fn checkbox(name: impl Into<String>, value_attribute: Option<&str>, checked: bool) -> Self {
        let mut control = Self::new(name, ControlKind::Checkbox);
        control.value_attribute = value_attribute.map(str::to_string);
        control.checked = checked;
        control
    }

    pub fn radio(name: impl Into<String>, value_attribute: &str, checked: bool) -> Self {
        let mut control = Self::new(name, ControlKind::Radio);
        control.value_attribute = Some(value_attribute.to_string());
        control.checked = checked;
        control
    }

    pub fn select(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        let mut control = Self::new(name, ControlKind::Select);
        control.options = options;
        control
    }

    pub fn select_multiple(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        let mut control = Self::new(name, ControlKind::SelectMultiple);
        control.options = options;
        control
    }

    pub fn file(name: impl Into<String>, files: Vec<FileHandle>) -> Self {
        let mut control = Self::new(name, ControlKind::File);
        control.files = files;
        control
    }

    pub fn file_multiple(name: impl Into<String>, files: Vec<FileHandle>) -> Self {
        let mut control = Self::new(name, ControlKind::FileMultiple);
        control.files = files;
        control
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn with_fieldname(mut self, fieldname: impl Into<String>) -> Self {
        self.fieldname = Some(fieldname.into());
        self
    }

    /* True when the declared value attribute exists; an empty attribute counts as absent */
    pub fn has_value_attribute(&self) -> bool {
        self.value_attribute
            .as_deref()
            .is_some_and(|value| !value.is_empty())
    }

    /* Effective values of all selected options, in option order */
    pub fn selected_values(&self, include_disabled: bool) -> Vec<String> {
        self.options
            .iter()
            .filter(|option| option.selected && (include_disabled || !option.disabled))
            .map(|option| option.effective_value().to_string())
            .collect()
    }
}

/* Document-order position of a control inside its surface */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlId(pub usize);

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/* The containing form surface; owns the controls in document order */
pub trait FormSurface {
    fn controls(&self) -> &[Control];

    fn controls_mut(&mut self) -> &mut [Control];

    fn control(&self, id: ControlId) -> Option<&Control> {
        self.controls().get(id.0)
    }

    /* Controls whose raw name equals `name`, in document order */
    fn find_named(&self, name: &str) -> Vec<ControlId> {
        self.find(|control| control.name == name)
    }

    /* Controls accepted by `selector`, in document order */
    fn find<F>(&self, selector: F) -> Vec<ControlId>
    where
        F: Fn(&Control) -> bool,
    {
        self.controls()
            .iter()
            .enumerate()
            .filter(|(_, control)| selector(*control))
            .map(|(idx, _)| ControlId(idx))
            .collect()
    }
}

/* In-memory form surface */
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Form {
    #[serde(default)]
    pub controls: Vec<Control>,
}

impl Form {
    pub fn new(controls: Vec<Control>) -> Self {
        Self { controls }
    }

    pub fn push(&mut self, control: Control) -> ControlId {
        self.controls.push(control);
        ControlId(self.controls.len() - 1)
    }

    pub fn from_json(input: &str) -> FormValuesResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_yaml(input: &str) -> FormValuesResult<Self> {
        Ok(serde_yml::from_str(input)?)
    }
}

impl FormSurface for Form {
    fn controls(&self) -> &[Control] {
        &self.controls
    }

    fn controls_mut(&mut self) -> &mut [Control] {
        &mut self.controls
    }
}

impl std::ops::Index<ControlId> for Form {
    type Output = Control;

    fn index(&self, id: ControlId) -> &Control {
        &self.controls[id.0]
    }
}
