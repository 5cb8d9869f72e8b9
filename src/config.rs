use std::env;
use std::path::PathBuf;

use anyhow::Context;
use dotenvy::dotenv;

use crate::payroll::{CompanyProfile, StatutoryRates};

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,
    pub log_dir: String,

    // Rate limiting
    pub rate_protected_per_min: u32,

    /// Optional JSON statutory rate table; defaults apply when unset.
    pub payroll_rates_path: Option<PathBuf>,
    pub company_name: String,
    pub company_address: String,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_addr: var_or("SERVER_ADDR", "127.0.0.1:8080"),
            api_prefix: var_or("API_PREFIX", "/api"),
            log_dir: var_or("LOG_DIR", "logs"),
            rate_protected_per_min: var_or("RATE_PROTECTED_PER_MIN", "1000")
                .parse()
                .context("RATE_PROTECTED_PER_MIN must be a whole number")?,
            payroll_rates_path: env::var("PAYROLL_RATES_PATH").ok().map(PathBuf::from),
            company_name: var_or("COMPANY_NAME", "Srinivasa Sales and Service Pvt Ltd"),
            company_address: var_or("COMPANY_ADDRESS", "Somajiguda, Hyderabad"),
        })
    }

    pub fn statutory_rates(&self) -> anyhow::Result<StatutoryRates> {
        match &self.payroll_rates_path {
            Some(path) => StatutoryRates::from_json_file(path),
            None => Ok(StatutoryRates::default()),
        }
    }

    pub fn company(&self) -> CompanyProfile {
        CompanyProfile {
            name: self.company_name.clone(),
            address: self.company_address.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rates_path: Option<PathBuf>) -> Config {
        Config {
            server_addr: "127.0.0.1:8080".into(),
            api_prefix: "/api".into(),
            log_dir: "logs".into(),
            rate_protected_per_min: 1000,
            payroll_rates_path: rates_path,
            company_name: "Srinivasa Sales and Service Pvt Ltd".into(),
            company_address: "Somajiguda, Hyderabad".into(),
        }
    }

    #[test]
    fn default_rates_without_path() {
        let rates = config(None).statutory_rates().unwrap();
        assert_eq!(rates, StatutoryRates::default());
    }

    #[test]
    fn missing_rate_file_is_an_error() {
        let path = PathBuf::from("/nonexistent/payroll-rates.json");
        assert!(config(Some(path)).statutory_rates().is_err());
    }

    #[test]
    fn company_profile_from_config() {
        let company = config(None).company();
        assert_eq!(company.address, "Somajiguda, Hyderabad");
    }
}
