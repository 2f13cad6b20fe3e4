//! 설정 관리.
//!
//! 이 모듈은 스코어링 애플리케이션 설정을 정의하고 관리합니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 스크리닝 설정
    #[serde(default)]
    pub screening: ScreeningConfig,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨 (예: "info", "debug")
    pub level: String,
    /// 출력 형식 ("pretty", "json", "compact")
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 스크리닝 설정.
///
/// 스코어링 결과를 랭킹/필터링하는 호출자 측 컷오프 기준입니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScreeningConfig {
    /// 최소 종합 점수 (0~100)
    pub min_total_score: i32,
    /// 최소 거래대금 (십억 VND)
    pub min_trading_value: f64,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            min_total_score: 60,
            min_trading_value: 2.0,
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .set_default("screening.min_total_score", 60)?
            .set_default("screening.min_trading_value", 2.0)?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("VNSWING")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/default.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.screening.min_total_score, 60);
        assert_eq!(config.screening.min_trading_value, 2.0);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.screening.min_total_score, 60);
    }
}
