use std::collections::{BTreeMap, BTreeSet};

use gsync_rules::Headline;
use serde::Serialize;

/// What the session asks the host form to show or relax.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FormView {
    /// Field name -> description shown under it.
    pub descriptions: BTreeMap<String, String>,
    pub headline: Option<Headline>,
    /// Link fields whose target existence is not checked.
    pub ignore_link_validation: BTreeSet<String>,
    /// Fields excluded from link validation on save.
    pub ignore_validation: BTreeSet<String>,
}

impl FormView {
    pub fn description(&self, field: &str) -> Option<&str> {
        self.descriptions.get(field).map(String::as_str)
    }
}
