use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub business_rules: BusinessRules,
}

/// Tunable marketplace policy. Rates are plain numbers here; they are
/// converted to `Decimal` at the point they enter money math.
#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    /// Platform commission percentage applied to new payments.
    #[serde(default = "default_commission_rate")]
    pub default_commission_rate: f64,
    /// Bookings close for cancellation this many hours before the service.
    #[serde(default = "default_cancellation_window")]
    pub cancellation_window_hours: i64,
    #[serde(default = "default_code_length")]
    pub confirmation_code_length: usize,
}

fn default_commission_rate() -> f64 {
    10.0
}

fn default_cancellation_window() -> i64 {
    24
}

fn default_code_length() -> usize {
    10
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            default_commission_rate: default_commission_rate(),
            cancellation_window_hours: default_cancellation_window(),
            confirmation_code_length: default_code_length(),
        }
    }
}

impl BusinessRules {
    /// Commission rate as a `Decimal` percentage, clamped into [0, 100].
    pub fn commission_rate(&self) -> Decimal {
        let rate = Decimal::from_f64_retain(self.default_commission_rate)
            .unwrap_or_else(|| Decimal::from(10))
            .round_dp(2);
        rate.clamp(Decimal::ZERO, Decimal::from(100))
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Environment-specific file, optional.
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in.
            .add_source(config::File::with_name("config/local").required(false))
            // SAFIRI__BUSINESS_RULES__CANCELLATION_WINDOW_HOURS=48 etc.
            .add_source(config::Environment::with_prefix("SAFIRI").separator("__"))
            .build()?;

        let cfg: Self = s.try_deserialize()?;
        tracing::info!(
            commission_rate = cfg.business_rules.default_commission_rate,
            window_hours = cfg.business_rules.cancellation_window_hours,
            "configuration loaded"
        );
        Ok(cfg)
    }
}
