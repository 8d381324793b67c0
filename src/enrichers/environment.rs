//! `environment` property

use crate::core::{Enricher, LogEvent};
use crate::info::environment_name;

pub const ENVIRONMENT_PROPERTY_NAME: &str = "environment";

pub struct EnvironmentEnricher {
    environment: String,
}

impl EnvironmentEnricher {
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
        }
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::new(environment_name(lookup))
    }
}

impl Enricher for EnvironmentEnricher {
    fn enrich(&self, event: &mut LogEvent) {
        event.add_property_if_absent(ENVIRONMENT_PROPERTY_NAME, self.environment.as_str());
    }
}
