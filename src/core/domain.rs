use serde::{Deserialize, Serialize};
use crate::core::config::{ConfigError, env_or};

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable : Sync + Send {
    fn id(&self) -> i64;
}


// Configuration abstracts the business rules of the library branch
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub(crate) struct Configuration {
    pub branch_id: String,
    pub max_borrowed: i64,
    pub loan_days: i64,
    pub fine_per_day: f64,
    pub suspension_threshold: i64,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            max_borrowed: 3,
            loan_days: 14,
            fine_per_day: 0.5,
            suspension_threshold: 3,
        }
    }

    // defaults overridden by LMS_* environment variables
    pub fn from_env(branch_id: &str) -> Result<Self, ConfigError> {
        let defaults = Configuration::new(branch_id);
        let config = Configuration {
            branch_id: branch_id.to_string(),
            max_borrowed: env_or("LMS_MAX_BORROWED", defaults.max_borrowed)?,
            loan_days: env_or("LMS_LOAN_DAYS", defaults.loan_days)?,
            fine_per_day: env_or("LMS_FINE_PER_DAY", defaults.fine_per_day)?,
            suspension_threshold: env_or("LMS_SUSPENSION_THRESHOLD", defaults.suspension_threshold)?,
        };
        if config.max_borrowed < 1 || config.loan_days < 1 || config.suspension_threshold < 1 {
            return Err(ConfigError::InvalidValue(
                "LMS_*".to_string(), "borrow limit, loan days and suspension threshold must be positive".to_string()));
        }
        if config.fine_per_day < 0.0 {
            return Err(ConfigError::InvalidValue(
                "LMS_FINE_PER_DAY".to_string(), "must not be negative".to_string()));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::domain::Configuration;

    #[tokio::test]
    async fn test_should_build_config() {
        let config = Configuration::new("test");
        assert_eq!("test", config.branch_id.as_str());
        assert_eq!(3, config.max_borrowed);
        assert_eq!(14, config.loan_days);
        assert_eq!(0.5, config.fine_per_day);
        assert_eq!(3, config.suspension_threshold);
    }
}
