//! `infra` property: platform type and instance

use crate::core::{Enricher, LogEvent, Structure, StructuredValue};
use crate::info::InfrastructureInfo;

pub const INFRA_PROPERTY_NAME: &str = "infra";

pub struct InfrastructureEnricher {
    value: StructuredValue,
}

impl InfrastructureEnricher {
    pub fn new(info: &InfrastructureInfo) -> Self {
        Self {
            value: Structure::new()
                .with_field("type", info.kind.as_str())
                .with_field("instance", info.instance.as_str())
                .into(),
        }
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::new(&InfrastructureInfo::from_lookup(lookup))
    }
}

impl Enricher for InfrastructureEnricher {
    fn enrich(&self, event: &mut LogEvent) {
        event.add_property_if_absent(INFRA_PROPERTY_NAME, self.value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, ValueFormatter};
    use crate::info::test_env::lookup;

    #[test]
    fn test_infra_structure() {
        let enricher = InfrastructureEnricher::from_lookup(lookup(&[
            ("EKS", "true"),
            ("HOSTNAME", "test-jg-test-p0d42a"),
        ]));
        let mut event = LogEvent::new(LogLevel::Info, "m");
        enricher.enrich(&mut event);

        let infra = event.property("infra").unwrap();
        assert_eq!(
            ValueFormatter::new().to_json_string(infra).unwrap(),
            r#"{"type":"eks","instance":"test-jg-test-p0d42a"}"#
        );
    }
}
