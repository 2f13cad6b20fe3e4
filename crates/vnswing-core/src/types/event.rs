//! 시그널 이벤트 및 기술적 스냅샷 타입.
//!
//! 상위 파이프라인(패턴 감지, 지표 계산, RS 레이팅)이 생성한 출력을
//! 스코어링 엔진의 입력 하나로 묶습니다.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SignalError;
use crate::types::Candle;

/// 스코어링에 필요한 최소 캔들 개수.
pub const MIN_BARS: usize = 60;

/// 스코어링에 필요한 최소 RS 관측치 개수.
pub const MIN_RS_POINTS: usize = 6;

/// 매매 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeDirection {
    /// 매수 (추세 추종)
    Buy,
    /// 매도
    Sell,
    /// 반등 매수 (역추세/평균 회귀)
    Bounce,
}

impl TradeDirection {
    /// 매도 방향 여부.
    ///
    /// BOUNCE는 매수 계열로 취급됩니다.
    pub fn is_sell_side(&self) -> bool {
        matches!(self, TradeDirection::Sell)
    }
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeDirection::Buy => write!(f, "BUY"),
            TradeDirection::Sell => write!(f, "SELL"),
            TradeDirection::Bounce => write!(f, "BOUNCE"),
        }
    }
}

impl FromStr for TradeDirection {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(TradeDirection::Buy),
            "SELL" => Ok(TradeDirection::Sell),
            "BOUNCE" => Ok(TradeDirection::Bounce),
            other => Err(SignalError::InvalidDirection(other.to_string())),
        }
    }
}

/// 종목별 기술적 지표 스냅샷.
///
/// 지표 계산은 상위 컴포넌트의 책임이며, 여기서는 이미 계산된 값만
/// 소비합니다. 누락된 필드는 역직렬화/생성 시점에 한 번만 기본값으로
/// 채워지고 각 스코어러는 별도의 기본값 처리를 하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalSnapshot {
    /// 당일 거래량 / 20일 평균 거래량
    #[serde(default = "default_ratio")]
    pub volume_ratio: f64,

    /// 당일 거래량 / 5일 평균 거래량
    #[serde(default = "default_ratio")]
    pub volume_ratio_5d: f64,

    /// ATR 14일
    #[serde(default)]
    pub atr_14: f64,

    /// 20일 평균 거래대금 (십억 VND)
    #[serde(default)]
    pub trading_value: f64,

    /// SMA20 대비 이격도 (%)
    #[serde(default)]
    pub pct_vs_sma20: f64,

    /// SMA50 대비 이격도 (%)
    #[serde(default)]
    pub pct_vs_sma50: f64,
}

fn default_ratio() -> f64 {
    1.0
}

impl Default for TechnicalSnapshot {
    fn default() -> Self {
        Self {
            volume_ratio: default_ratio(),
            volume_ratio_5d: default_ratio(),
            atr_14: 0.0,
            trading_value: 0.0,
            pct_vs_sma20: 0.0,
            pct_vs_sma50: 0.0,
        }
    }
}

/// RS 레이팅 일별 관측치.
///
/// 레이팅은 시장 유니버스 대비 가격 성과의 퍼센타일(1~99)입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsPoint {
    /// 관측일
    pub date: DateTime<Utc>,
    /// RS 레이팅 (1~99)
    pub rating: f64,
}

impl RsPoint {
    /// 새 관측치를 생성합니다.
    pub fn new(date: DateTime<Utc>, rating: f64) -> Self {
        Self { date, rating }
    }
}

/// 감지된 시그널 이벤트.
///
/// 스코어링 엔진의 단일 입력 단위입니다. 캔들은 과거 → 최신 순서로,
/// RS 시리즈는 최신 → 과거 순서로 저장됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalEvent {
    /// 종목 티커 (예: "HPG", "VNM")
    pub ticker: String,
    /// 감지된 패턴명 (정규화된 소문자)
    pub pattern: String,
    /// 매매 방향
    pub direction: TradeDirection,
    /// 현재가
    pub price: Decimal,
    /// 캔들 히스토리 (최신이 마지막)
    pub bars: Vec<Candle>,
    /// 기술적 지표 스냅샷
    pub snapshot: TechnicalSnapshot,
    /// RS 레이팅 시리즈 (최신이 처음)
    pub rs_history: Vec<RsPoint>,
}

impl SignalEvent {
    /// 새 시그널 이벤트를 생성합니다.
    ///
    /// 패턴명은 생성 시점에 정규화(trim + 소문자)됩니다.
    pub fn new(
        ticker: impl Into<String>,
        pattern: impl Into<String>,
        direction: TradeDirection,
        price: Decimal,
        bars: Vec<Candle>,
        snapshot: TechnicalSnapshot,
        rs_history: Vec<RsPoint>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            pattern: pattern.into().trim().to_lowercase(),
            direction,
            price,
            bars,
            snapshot,
            rs_history,
        }
    }

    /// 환경 계약(§데이터 게이트) 충족 여부를 검증합니다.
    ///
    /// 캔들 60개 이상, RS 관측치 6개 이상이 기준입니다. 미달 이벤트는
    /// 호출자가 스킵할 수 있습니다. 스코어링 자체는 미달 입력에 대해서도
    /// 문서화된 중립 폴백으로 동작합니다.
    pub fn validate(&self) -> Result<(), SignalError> {
        if self.bars.len() < MIN_BARS {
            return Err(SignalError::InsufficientData {
                required: MIN_BARS,
                provided: self.bars.len(),
            });
        }
        if self.rs_history.len() < MIN_RS_POINTS {
            return Err(SignalError::InsufficientData {
                required: MIN_RS_POINTS,
                provided: self.rs_history.len(),
            });
        }
        Ok(())
    }

    /// 가장 최근 캔들을 반환합니다.
    pub fn latest_bar(&self) -> Option<&Candle> {
        self.bars.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_event(bar_count: usize, rs_count: usize) -> SignalEvent {
        let bars: Vec<Candle> = (0..bar_count)
            .map(|i| {
                let price = dec!(100) + Decimal::from(i);
                Candle::new(
                    Utc::now(),
                    price,
                    price + dec!(2),
                    price - dec!(2),
                    price + dec!(1),
                    dec!(500_000),
                )
            })
            .collect();

        let rs_history: Vec<RsPoint> = (0..rs_count)
            .map(|i| RsPoint::new(Utc::now(), 70.0 - i as f64))
            .collect();

        SignalEvent::new(
            "HPG",
            "Hammer",
            TradeDirection::Buy,
            dec!(100),
            bars,
            TechnicalSnapshot::default(),
            rs_history,
        )
    }

    #[test]
    fn test_pattern_normalized_on_construction() {
        let event = sample_event(60, 6);
        assert_eq!(event.pattern, "hammer");
    }

    #[test]
    fn test_validate_data_gate() {
        assert!(sample_event(60, 6).validate().is_ok());
        assert!(matches!(
            sample_event(30, 6).validate(),
            Err(SignalError::InsufficientData {
                required: 60,
                provided: 30
            })
        ));
        assert!(sample_event(60, 3).validate().is_err());
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(
            "buy".parse::<TradeDirection>().unwrap(),
            TradeDirection::Buy
        );
        assert_eq!(
            "SELL".parse::<TradeDirection>().unwrap(),
            TradeDirection::Sell
        );
        assert!("HOLD".parse::<TradeDirection>().is_err());
    }

    #[test]
    fn test_snapshot_defaults() {
        // 누락 필드는 역직렬화 시점에 기본값으로 채워짐
        let snapshot: TechnicalSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot.volume_ratio, 1.0);
        assert_eq!(snapshot.volume_ratio_5d, 1.0);
        assert_eq!(snapshot.atr_14, 0.0);
        assert_eq!(snapshot.pct_vs_sma20, 0.0);
    }
}
