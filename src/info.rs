//! Static process metadata read from the environment
//!
//! Every reader takes a lookup function instead of touching `std::env`
//! directly, so callers and tests can supply their own variables.
//! [`process_env`] is the lookup backed by the real process environment.

/// Name of the running service
pub const SERVICE_NAME_ENV: &str = "SERVICE_NAME";
/// Version of the running service
pub const SERVICE_VERSION_ENV: &str = "SERVICE_VERSION";
/// Optional deployable unit name
pub const DEPLOYABLE_NAME_ENV: &str = "DEPLOYABLE_NAME";
/// Deployment environment, checked before [`ENVIRONMENT_ENV`]
pub const DEPLOY_ENV_ENV: &str = "DEPLOY_ENV";
pub const ENVIRONMENT_ENV: &str = "ENVIRONMENT";
/// `true` when running on Kubernetes (EKS)
pub const EKS_ENV: &str = "EKS";
pub const HOSTNAME_ENV: &str = "HOSTNAME";
/// Set by the serverless runtime; doubles as the component fallback
pub const LAMBDA_FUNCTION_NAME_ENV: &str = "AWS_LAMBDA_FUNCTION_NAME";

pub const UNKNOWN: &str = "unknown";

/// Read a variable from the process environment
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Name, version and deployable of the running service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub deployable: Option<String>,
}

impl ServiceInfo {
    /// `default_version` is used when `SERVICE_VERSION` is unset,
    /// typically `env!("CARGO_PKG_VERSION")` of the binary.
    pub fn from_lookup<F>(lookup: F, default_version: Option<&str>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            name: lookup(SERVICE_NAME_ENV).unwrap_or_else(|| UNKNOWN.to_string()),
            version: lookup(SERVICE_VERSION_ENV)
                .or_else(|| default_version.map(str::to_string))
                .unwrap_or_else(|| UNKNOWN.to_string()),
            deployable: lookup(DEPLOYABLE_NAME_ENV),
        }
    }
}

/// Deployment environment name, `local` when nothing is set
pub fn environment_name<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(DEPLOY_ENV_ENV)
        .or_else(|| lookup(ENVIRONMENT_ENV))
        .unwrap_or_else(|| "local".to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfrastructureType {
    Eks,
    Serverless,
    Unknown,
}

impl InfrastructureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfrastructureType::Eks => "eks",
            InfrastructureType::Serverless => "serverless",
            InfrastructureType::Unknown => UNKNOWN,
        }
    }
}

/// Where the process runs: platform kind plus instance name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfrastructureInfo {
    pub kind: InfrastructureType,
    pub instance: String,
}

impl InfrastructureInfo {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if lookup(EKS_ENV).as_deref() == Some("true") {
            return Self {
                kind: InfrastructureType::Eks,
                instance: lookup(HOSTNAME_ENV).unwrap_or_else(|| UNKNOWN.to_string()),
            };
        }

        match lookup(LAMBDA_FUNCTION_NAME_ENV) {
            Some(function_name) => Self {
                kind: InfrastructureType::Serverless,
                instance: function_name,
            },
            None => Self {
                kind: InfrastructureType::Unknown,
                instance: UNKNOWN.to_string(),
            },
        }
    }
}
