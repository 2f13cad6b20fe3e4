//! VSA (Volume Spread Analysis) 점수 계산 (최대 25점).
//!
//! 당일 봉의 거래량/스프레드/종가 위치 관계를 분류하여 매집·분산 압력을
//! 추정합니다.
//!
//! # 계산 단계
//!
//! 1. **분류**: 거래량 5단계, 스프레드 4단계, 종가 위치 3단계 버킷
//! 2. **서브 점수**: volume_score (0~10) + spread_score (0~8) + close_score (-2~7)
//! 3. **네임드 시그널 감지**: 우선순위 테이블, 첫 매치 적용
//! 4. **정합 보너스**: 시그널 방향성과 매매 방향 일치 +3 / 충돌 -5
//! 5. **충돌 배율**: 보너스 -4 이하 ×0.6, 음수 ×0.8, 그 외 ×1.0

use serde::{Deserialize, Serialize};
use tracing::debug;
use vnswing_core::{Candle, TechnicalSnapshot, TradeDirection, TrendState};

/// 거래량 분류 (20일 평균 대비 비율).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeClass {
    VeryHigh,
    High,
    Normal,
    Low,
    VeryLow,
}

impl VolumeClass {
    /// 거래량 비율을 버킷으로 분류합니다.
    pub fn classify(volume_ratio: f64) -> Self {
        if volume_ratio >= 2.5 {
            VolumeClass::VeryHigh
        } else if volume_ratio >= 1.5 {
            VolumeClass::High
        } else if volume_ratio >= 0.7 {
            VolumeClass::Normal
        } else if volume_ratio >= 0.5 {
            VolumeClass::Low
        } else {
            VolumeClass::VeryLow
        }
    }

    /// 고거래량 계열(HIGH/VERY_HIGH) 여부.
    pub fn is_high(&self) -> bool {
        matches!(self, VolumeClass::High | VolumeClass::VeryHigh)
    }

    /// 저거래량 계열(LOW/VERY_LOW) 여부.
    pub fn is_low(&self) -> bool {
        matches!(self, VolumeClass::Low | VolumeClass::VeryLow)
    }
}

/// 스프레드 분류 (당일 고저폭 / ATR14).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadClass {
    Wide,
    Normal,
    Narrow,
    VeryNarrow,
}

impl SpreadClass {
    /// 스프레드 비율을 버킷으로 분류합니다.
    pub fn classify(spread_ratio: f64) -> Self {
        if spread_ratio >= 1.3 {
            SpreadClass::Wide
        } else if spread_ratio >= 0.7 {
            SpreadClass::Normal
        } else if spread_ratio >= 0.5 {
            SpreadClass::Narrow
        } else {
            SpreadClass::VeryNarrow
        }
    }

    /// 좁은 스프레드 계열(NARROW/VERY_NARROW) 여부.
    pub fn is_narrow(&self) -> bool {
        matches!(self, SpreadClass::Narrow | SpreadClass::VeryNarrow)
    }
}

/// 종가 위치 분류 ((종가-저가)/(고가-저가)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseClass {
    High,
    Middle,
    Low,
}

impl CloseClass {
    /// 종가 위치를 버킷으로 분류합니다.
    pub fn classify(close_position: f64) -> Self {
        if close_position >= 0.7 {
            CloseClass::High
        } else if close_position >= 0.3 {
            CloseClass::Middle
        } else {
            CloseClass::Low
        }
    }
}

/// 시그널 방향성.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalBias {
    Bullish,
    Bearish,
    Neutral,
}

/// 네임드 VSA 시그널.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VsaSignal {
    /// 하락을 흡수하는 대량 매수 (저점 매집)
    StoppingVolume,
    /// 강한 매수 수요 유입
    DemandComingIn,
    /// 강한 매도 물량 출회
    SupplyComingIn,
    /// 매도 물량 소진 (하락 추세에서)
    NoSupply,
    /// 매수 수요 부재 (상승 추세에서)
    NoDemand,
    /// 상승 추세 고점의 가짜 돌파
    Upthrust,
    /// 노력 대비 결과 없음
    EffortNoResult,
}

impl VsaSignal {
    /// 와이어 라벨을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            VsaSignal::StoppingVolume => "stopping_volume",
            VsaSignal::DemandComingIn => "demand_coming_in",
            VsaSignal::SupplyComingIn => "supply_coming_in",
            VsaSignal::NoSupply => "no_supply",
            VsaSignal::NoDemand => "no_demand",
            VsaSignal::Upthrust => "upthrust",
            VsaSignal::EffortNoResult => "effort_no_result",
        }
    }

    /// 시그널의 방향성을 반환합니다.
    pub fn bias(&self) -> SignalBias {
        match self {
            VsaSignal::StoppingVolume | VsaSignal::DemandComingIn | VsaSignal::NoSupply => {
                SignalBias::Bullish
            }
            VsaSignal::SupplyComingIn | VsaSignal::NoDemand | VsaSignal::Upthrust => {
                SignalBias::Bearish
            }
            VsaSignal::EffortNoResult => SignalBias::Neutral,
        }
    }
}

/// VSA 점수 상세.
#[derive(Debug, Clone, PartialEq)]
pub struct VsaScore {
    /// 최종 점수 (0~25)
    pub score: i32,
    /// 거래량 서브 점수 (0~10)
    pub volume_score: i32,
    /// 스프레드 서브 점수 (0~8)
    pub spread_score: i32,
    /// 종가 위치 서브 점수 (-2~7)
    pub close_score: i32,
    /// 정합 보너스 (-5~+3)
    pub alignment_bonus: i32,
    /// 감지된 네임드 시그널
    pub signal: Option<VsaSignal>,
    /// 거래량 분류
    pub volume_class: VolumeClass,
    /// 스프레드 분류
    pub spread_class: SpreadClass,
    /// 종가 위치 분류
    pub close_class: CloseClass,
}

/// VSA 스코어러.
#[derive(Debug, Clone, Copy, Default)]
pub struct VsaScorer;

impl VsaScorer {
    /// 새로운 스코어러 인스턴스 생성.
    pub fn new() -> Self {
        Self
    }

    /// 당일 봉과 스냅샷으로부터 VSA 점수 계산.
    ///
    /// # 인자
    ///
    /// * `bar` - 당일 캔들
    /// * `snapshot` - 기술적 스냅샷 (volume_ratio, atr_14)
    /// * `direction` - 매매 방향
    /// * `trend` - 현재 추세 상태
    pub fn score(
        &self,
        bar: &Candle,
        snapshot: &TechnicalSnapshot,
        direction: TradeDirection,
        trend: TrendState,
    ) -> VsaScore {
        let volume_ratio = snapshot.volume_ratio;
        let spread_ratio = Self::spread_ratio(bar, snapshot.atr_14);
        let close_position = bar.close_position();

        let volume_class = VolumeClass::classify(volume_ratio);
        let spread_class = SpreadClass::classify(spread_ratio);
        let close_class = CloseClass::classify(close_position);

        let volume_score = Self::volume_score(volume_ratio);
        let spread_score = Self::spread_score(spread_ratio, volume_ratio, close_class);
        let close_score = Self::close_score(close_position, direction);

        let signal = Self::detect_signal(volume_class, spread_class, close_class, trend);
        let alignment_bonus = Self::alignment_bonus(signal, direction);

        let raw = volume_score + spread_score + close_score + alignment_bonus;
        let multiplier = if alignment_bonus <= -4 {
            0.6
        } else if alignment_bonus < 0 {
            0.8
        } else {
            1.0
        };
        let score = ((raw as f64 * multiplier) as i32).clamp(0, 25);

        debug!(
            volume_ratio = volume_ratio,
            spread_ratio = spread_ratio,
            close_position = close_position,
            signal = signal.map(|s| s.as_str()),
            bonus = alignment_bonus,
            score = score,
            "VSA score"
        );

        VsaScore {
            score,
            volume_score,
            spread_score,
            close_score,
            alignment_bonus,
            signal,
            volume_class,
            spread_class,
            close_class,
        }
    }

    /// 스프레드 비율 계산.
    ///
    /// ATR이 0 이하이면 중립값 1.0으로 폴백합니다.
    fn spread_ratio(bar: &Candle, atr_14: f64) -> f64 {
        if atr_14 <= 0.0 {
            return 1.0;
        }
        let range = bar.range().to_string().parse::<f64>().unwrap_or(0.0);
        range / atr_14
    }

    /// 거래량 서브 점수 (0~10).
    fn volume_score(volume_ratio: f64) -> i32 {
        if volume_ratio >= 3.0 {
            10
        } else if volume_ratio >= 2.5 {
            9
        } else if volume_ratio >= 2.0 {
            8
        } else if volume_ratio >= 1.5 {
            6
        } else if volume_ratio >= 1.2 {
            4
        } else if volume_ratio >= 1.0 {
            3
        } else if volume_ratio >= 0.7 {
            1
        } else {
            0
        }
    }

    /// 스프레드 서브 점수 (0~8).
    ///
    /// 넓은 스프레드는 종가 위치에 따라, 좁은 스프레드(비율 0.7 이하)는
    /// 거래량 흡수 여부에 따라 점수를 부여합니다.
    fn spread_score(spread_ratio: f64, volume_ratio: f64, close_class: CloseClass) -> i32 {
        if spread_ratio >= 1.3 {
            match close_class {
                CloseClass::High => 8,
                CloseClass::Low => 6,
                CloseClass::Middle => 5,
            }
        } else if spread_ratio <= 0.7 {
            // 좁은 스프레드 + 대량 거래 = 흡수(absorption)
            if volume_ratio >= 1.5 {
                6
            } else {
                2
            }
        } else {
            match close_class {
                CloseClass::High => 5,
                CloseClass::Low => 4,
                CloseClass::Middle => 3,
            }
        }
    }

    /// 종가 위치 서브 점수 (-2~7).
    ///
    /// 매수는 고가 근처 종가를, 매도는 저가 근처 종가를 선호합니다.
    fn close_score(close_position: f64, direction: TradeDirection) -> i32 {
        if direction.is_sell_side() {
            if close_position <= 0.3 {
                7
            } else if close_position <= 0.5 {
                4
            } else if close_position <= 0.7 {
                1
            } else {
                -2
            }
        } else {
            if close_position >= 0.7 {
                7
            } else if close_position >= 0.5 {
                4
            } else if close_position >= 0.3 {
                1
            } else {
                -2
            }
        }
    }

    /// 네임드 시그널 감지.
    ///
    /// 우선순위 테이블을 순서대로 평가하며 첫 번째 매치가 적용됩니다.
    fn detect_signal(
        volume: VolumeClass,
        spread: SpreadClass,
        close: CloseClass,
        trend: TrendState,
    ) -> Option<VsaSignal> {
        if volume.is_high() && spread.is_narrow() && close == CloseClass::Low {
            return Some(VsaSignal::StoppingVolume);
        }
        if volume.is_high() && spread == SpreadClass::Wide && close == CloseClass::High {
            return Some(VsaSignal::DemandComingIn);
        }
        if volume.is_high() && spread == SpreadClass::Wide && close == CloseClass::Low {
            return Some(VsaSignal::SupplyComingIn);
        }
        if volume.is_low() && spread.is_narrow() && trend.is_down() {
            return Some(VsaSignal::NoSupply);
        }
        if volume.is_low() && spread.is_narrow() && trend.is_up() {
            return Some(VsaSignal::NoDemand);
        }
        if volume.is_high()
            && spread == SpreadClass::Wide
            && close == CloseClass::Low
            && trend.is_up()
        {
            return Some(VsaSignal::Upthrust);
        }
        if volume.is_high() && spread.is_narrow() {
            return Some(VsaSignal::EffortNoResult);
        }
        None
    }

    /// 정합 보너스 (-5~+3).
    ///
    /// 시그널 방향성이 매매 방향과 일치하면 +3, 충돌하면 -5, 중립이면 0.
    fn alignment_bonus(signal: Option<VsaSignal>, direction: TradeDirection) -> i32 {
        let Some(signal) = signal else {
            return 0;
        };

        match signal.bias() {
            SignalBias::Neutral => 0,
            SignalBias::Bullish => {
                if direction.is_sell_side() {
                    -5
                } else {
                    3
                }
            }
            SignalBias::Bearish => {
                if direction.is_sell_side() {
                    3
                } else {
                    -5
                }
            }
        }
    }
}
