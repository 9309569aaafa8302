/* Engine configuration */

use crate::errors::FormValuesResult;
use serde::{Deserialize, Serialize};

/* Configuration toggles for the form values engine */
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FormValuesConfig {
    /* Collect values of disabled controls and disabled select options */
    pub include_disabled: bool,

    /* Track a snapshot of the flat values to answer change queries */
    pub change_state: bool,
}

impl FormValuesConfig {
    /* Parse a YAML (or JSON) configuration document */
    pub fn from_yaml(input: &str) -> FormValuesResult<Self> {
        Ok(serde_yml::from_str(input)?)
    }
}
