//! Enricher implementations

pub mod app_info;
pub mod environment;
pub mod infrastructure;

pub use app_info::AppInfoEnricher;
pub use environment::EnvironmentEnricher;
pub use infrastructure::InfrastructureEnricher;

pub use crate::core::Enricher;

/// The app, environment and infrastructure enrichers, read through `lookup`
pub fn standard_enrichers<F>(lookup: F, default_version: Option<&str>) -> Vec<Box<dyn Enricher>>
where
    F: Fn(&str) -> Option<String>,
{
    vec![
        Box::new(AppInfoEnricher::from_lookup(&lookup, default_version)),
        Box::new(EnvironmentEnricher::from_lookup(&lookup)),
        Box::new(InfrastructureEnricher::from_lookup(&lookup)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogEvent, LogLevel};
    use crate::info::test_env::lookup;

    #[test]
    fn test_standard_enrichers_add_all_three() {
        let env = lookup(&[("SERVICE_NAME", "orders"), ("DEPLOY_ENV", "prod")]);
        let enrichers = standard_enrichers(env, Some("1.0.0"));
        assert_eq!(enrichers.len(), 3);

        let mut event = LogEvent::new(LogLevel::Info, "m");
        for enricher in &enrichers {
            enricher.enrich(&mut event);
        }

        let names: Vec<&str> = event.properties.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["app", "environment", "infra"]);
    }
}
