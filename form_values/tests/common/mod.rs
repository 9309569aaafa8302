/* Shared fixture loading for the integration tests */

#![allow(dead_code)]

use form_values::{Control, Form};
use std::fs;
use std::path::Path;

fn crate_root() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}

pub fn load_form(relative_path: &str) -> Form {
    let path = crate_root().join(relative_path);
    let yaml = fs::read_to_string(&path).expect("read form fixture");
    Form::from_yaml(&yaml).expect("parse form fixture")
}

pub fn profile_form() -> Form {
    load_form("tests/fixtures/profile_form.yaml")
}

/* Same controls with every value, check and selection cleared */
pub fn reset(form: &Form) -> Form {
    let controls = form
        .controls
        .iter()
        .cloned()
        .map(|mut control: Control| {
            control.value.clear();
            control.checked = false;
            for option in &mut control.options {
                option.selected = false;
            }
            control
        })
        .collect();
    Form::new(controls)
}

pub fn json(values: &form_values::ValueMap) -> serde_json::Value {
    form_values::FormValue::Map(values.clone()).to_json()
}
