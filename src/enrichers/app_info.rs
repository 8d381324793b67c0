//! `app` property: service name, version and deployable

use crate::core::{Enricher, LogEvent, Structure, StructuredValue};
use crate::info::ServiceInfo;

pub const APP_PROPERTY_NAME: &str = "app";

pub struct AppInfoEnricher {
    value: StructuredValue,
}

impl AppInfoEnricher {
    pub fn new(info: &ServiceInfo) -> Self {
        let mut app = Structure::new()
            .with_field("name", info.name.as_str())
            .with_field("version", info.version.as_str());
        if let Some(deployable) = &info.deployable {
            app.push_field("deployable", deployable.as_str());
        }
        Self { value: app.into() }
    }

    pub fn from_lookup<F>(lookup: F, default_version: Option<&str>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::new(&ServiceInfo::from_lookup(lookup, default_version))
    }
}

impl Enricher for AppInfoEnricher {
    fn enrich(&self, event: &mut LogEvent) {
        event.add_property_if_absent(APP_PROPERTY_NAME, self.value.clone());
    }
}
