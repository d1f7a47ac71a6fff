use figment::providers::{Env, Format, Toml};
use figment::Figment;
use ranked_group_signup_domain::AssignmentMethod;
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct ResolverConfig {
    /// Fixed seed for resolve passes. Unset means entropy seeding; set it
    /// to make draws reproducible across runs.
    pub seed: Option<u64>,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Config {
    /// Method stamped on newly created campaigns.
    pub default_assignment_method: AssignmentMethod,
    pub resolver: ResolverConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_assignment_method: AssignmentMethod::Fcfs,
            resolver: ResolverConfig::default(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Figment(#[from] figment::Error),
}

pub fn get_config() -> Result<Config, ConfigError> {
    Ok(Figment::new()
        .merge(Toml::file("rgs.toml"))
        .merge(Env::prefixed("RGS_"))
        .extract()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_any_source() {
        figment::Jail::expect_with(|_jail| {
            let config = get_config().unwrap();
            assert_eq!(config.default_assignment_method, AssignmentMethod::Fcfs);
            assert_eq!(config.resolver.seed, None);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_the_toml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "rgs.toml",
                r#"
                default_assignment_method = "lottery"

                [resolver]
                seed = 7
                "#,
            )?;
            jail.set_env("RGS_DEFAULT_ASSIGNMENT_METHOD", "random");

            let config = get_config().unwrap();
            assert_eq!(config.default_assignment_method, AssignmentMethod::Random);
            assert_eq!(config.resolver.seed, Some(7));
            Ok(())
        });
    }
}
