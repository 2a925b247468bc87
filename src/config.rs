use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub enable_logging: bool,
    pub log_level: String,
    pub latency: LatencyConfig,
    pub ui_config: UIConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            enable_logging: true,
            log_level: "info".to_string(),
            latency: LatencyConfig::default(),
            ui_config: UIConfig::default(),
        }
    }
}

/// Latencias simuladas de la API mock (ms). 0 = sin espera.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyConfig {
    pub login_ms: u32,
    pub register_ms: u32,
    pub cep_ms: u32,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            login_ms: 1000,
            register_ms: 1200,
            cep_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UIConfig {
    pub theme_transition_ms: u32,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            theme_transition_ms: 300,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            environment: option_env!("RECICLA365_ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: parse_or(option_env!("RECICLA365_ENABLE_LOGGING"), defaults.enable_logging),
            log_level: option_env!("RECICLA365_LOG_LEVEL")
                .unwrap_or("info").to_string(),
            latency: LatencyConfig {
                login_ms: parse_or(option_env!("RECICLA365_LOGIN_LATENCY_MS"), defaults.latency.login_ms),
                register_ms: parse_or(option_env!("RECICLA365_REGISTER_LATENCY_MS"), defaults.latency.register_ms),
                cep_ms: parse_or(option_env!("RECICLA365_CEP_LATENCY_MS"), defaults.latency.cep_ms),
            },
            ui_config: UIConfig {
                theme_transition_ms: parse_or(
                    option_env!("RECICLA365_THEME_TRANSITION_MS"),
                    defaults.ui_config.theme_transition_ms,
                ),
            },
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Nivel de log efectivo; solo errores si el logging está deshabilitado
    pub fn log_level(&self) -> log::Level {
        if !self.enable_logging {
            return log::Level::Error;
        }
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, fallback: T) -> T {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(fallback)
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_falls_back_on_garbage() {
        assert_eq!(parse_or(Some("750"), 10u32), 750);
        assert_eq!(parse_or(Some(" 42 "), 10u32), 42);
        assert_eq!(parse_or(Some("abc"), 10u32), 10);
        assert_eq!(parse_or::<u32>(None, 10), 10);
        assert!(!parse_or(Some("false"), true));
    }

    #[test]
    fn log_level_respects_switch() {
        let mut config = AppConfig::default();
        config.log_level = "debug".to_string();
        assert_eq!(config.log_level(), log::Level::Debug);

        config.log_level = "nonsense".to_string();
        assert_eq!(config.log_level(), log::Level::Info);

        config.enable_logging = false;
        assert_eq!(config.log_level(), log::Level::Error);
    }

    #[test]
    fn production_flag_follows_environment() {
        let mut config = AppConfig::default();
        assert!(!config.is_production());

        config.environment = "production".to_string();
        assert!(config.is_production());
    }
}
