//! 지지/저항 점수 계산 (최대 15점).
//!
//! 최근 가격 히스토리에서 스윙/피보나치 레벨을 산출하고, 현재가와
//! 관련 레벨의 근접도 및 손익비(risk/reward)를 평가합니다.
//!
//! # 레벨 산출
//!
//! - **스윙 고점/저점**: 최근 20봉의 최고가/최저가
//! - **피보나치 되돌림**: 최근 30봉 범위의 23.6/38.2/50/61.8% 레벨.
//!   범위가 14봉 평균 실제 범위(true range)의 5배 이상일 때만 유효
//! - 현재가 ±0.5% 데드존 내 레벨은 지지/저항 어느 쪽에도 포함되지 않음

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use vnswing_core::{Candle, TradeDirection};

/// 피보나치 되돌림 비율.
const FIB_RATIOS: &[(f64, &str)] = &[
    (0.236, "Fib 23.6%"),
    (0.382, "Fib 38.2%"),
    (0.5, "Fib 50.0%"),
    (0.618, "Fib 61.8%"),
];

/// 스윙 레벨 탐색 기간.
const SWING_LOOKBACK: usize = 20;

/// 피보나치 범위 탐색 기간.
const FIB_LOOKBACK: usize = 30;

/// 평균 실제 범위 기간.
const ATR_LOOKBACK: usize = 14;

/// 히스토리가 이보다 적으면 중립 폴백 점수를 반환.
const MIN_HISTORY_BARS: usize = 14;

/// 현재가 주변 데드존 (0.5%).
const DEAD_ZONE: f64 = 0.005;

/// 지지/저항 가격 레벨.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SrLevel {
    /// 레벨 가격
    pub price: f64,
    /// 설명 라벨 (예: "Swing Low", "Fib 61.8%")
    pub label: String,
    /// 현재가 대비 부호 있는 거리 (%)
    pub distance_pct: f64,
}

/// 지지/저항 점수 상세.
#[derive(Debug, Clone, PartialEq)]
pub struct SrScore {
    /// 최종 점수 (0~15)
    pub score: i32,
    /// 근접도 점수 (0~12, 폴백 시 5)
    pub proximity: i32,
    /// 손익비 보너스 (-3~+3)
    pub rr_bonus: i32,
    /// 지지 레벨 (가까운 순, 최대 3개)
    pub supports: Vec<SrLevel>,
    /// 저항 레벨 (가까운 순, 최대 3개)
    pub resistances: Vec<SrLevel>,
}

/// 지지/저항 스코어러.
#[derive(Debug, Clone, Copy, Default)]
pub struct SupportResistanceScorer;

impl SupportResistanceScorer {
    /// 새로운 스코어러 인스턴스 생성.
    pub fn new() -> Self {
        Self
    }

    /// 가격 히스토리로부터 지지/저항 점수 계산.
    ///
    /// # 인자
    ///
    /// * `bars` - 캔들 히스토리 (최신이 마지막)
    /// * `price` - 현재가
    /// * `direction` - 매매 방향
    ///
    /// 히스토리가 14봉 미만이면 중립 폴백(5점)을 반환합니다.
    pub fn score(&self, bars: &[Candle], price: Decimal, direction: TradeDirection) -> SrScore {
        if bars.len() < MIN_HISTORY_BARS {
            return SrScore {
                score: 5,
                proximity: 5,
                rr_bonus: 0,
                supports: Vec::new(),
                resistances: Vec::new(),
            };
        }

        let current = price.to_string().parse::<f64>().unwrap_or(0.0);
        let (supports, resistances) = Self::collect_levels(bars, current);

        let relevant = if direction.is_sell_side() {
            resistances.first()
        } else {
            supports.first()
        };

        let proximity = match relevant {
            Some(level) => {
                let dist = level.distance_pct.abs();
                if dist < 2.0 {
                    12
                } else if dist < 4.0 {
                    10
                } else if dist < 6.0 {
                    7
                } else if dist < 10.0 {
                    4
                } else {
                    2
                }
            }
            None => 3,
        };

        let rr_bonus = Self::risk_reward_bonus(&supports, &resistances, current, direction);
        let score = (proximity + rr_bonus).clamp(0, 15);

        debug!(
            supports = supports.len(),
            resistances = resistances.len(),
            proximity = proximity,
            rr_bonus = rr_bonus,
            score = score,
            "Support/resistance score"
        );

        SrScore {
            score,
            proximity,
            rr_bonus,
            supports,
            resistances,
        }
    }

    /// 스윙/피보나치 레벨을 수집하여 지지/저항으로 분류합니다.
    fn collect_levels(bars: &[Candle], current: f64) -> (Vec<SrLevel>, Vec<SrLevel>) {
        let mut candidates: Vec<(f64, String)> = Vec::new();

        // 스윙 고점/저점 (최근 20봉)
        let swing_window = &bars[bars.len().saturating_sub(SWING_LOOKBACK)..];
        let swing_high = swing_window
            .iter()
            .map(|bar| bar.high.to_string().parse::<f64>().unwrap_or(0.0))
            .fold(f64::MIN, f64::max);
        let swing_low = swing_window
            .iter()
            .map(|bar| bar.low.to_string().parse::<f64>().unwrap_or(0.0))
            .fold(f64::MAX, f64::min);
        candidates.push((swing_high, "Swing High".to_string()));
        candidates.push((swing_low, "Swing Low".to_string()));

        // 피보나치 레벨 (최근 30봉, 범위 유효성 검증 후)
        let fib_window = &bars[bars.len().saturating_sub(FIB_LOOKBACK)..];
        let fib_high = fib_window
            .iter()
            .map(|bar| bar.high.to_string().parse::<f64>().unwrap_or(0.0))
            .fold(f64::MIN, f64::max);
        let fib_low = fib_window
            .iter()
            .map(|bar| bar.low.to_string().parse::<f64>().unwrap_or(0.0))
            .fold(f64::MAX, f64::min);
        let fib_range = fib_high - fib_low;

        if fib_range >= 5.0 * Self::average_true_range(bars) {
            for (ratio, label) in FIB_RATIOS {
                candidates.push((fib_low + fib_range * ratio, label.to_string()));
            }
        }

        // 데드존 밖의 레벨만 지지/저항으로 분류
        let mut supports: Vec<SrLevel> = Vec::new();
        let mut resistances: Vec<SrLevel> = Vec::new();

        for (level_price, label) in candidates {
            let distance_pct = (level_price - current) / current * 100.0;
            let level = SrLevel {
                price: level_price,
                label,
                distance_pct,
            };

            if level_price < current * (1.0 - DEAD_ZONE) {
                supports.push(level);
            } else if level_price > current * (1.0 + DEAD_ZONE) {
                resistances.push(level);
            }
        }

        // 지지는 내림차순(가까운 순), 저항은 오름차순(가까운 순)
        supports.sort_by(|a, b| b.price.partial_cmp(&a.price).unwrap_or(std::cmp::Ordering::Equal));
        resistances
            .sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(std::cmp::Ordering::Equal));
        supports.truncate(3);
        resistances.truncate(3);

        (supports, resistances)
    }

    /// 14봉 평균 실제 범위(true range) 계산.
    ///
    /// TR = max(고가-저가, |고가-전일종가|, |저가-전일종가|).
    /// 첫 봉은 당일 범위를 사용합니다.
    fn average_true_range(bars: &[Candle]) -> f64 {
        let window = &bars[bars.len().saturating_sub(ATR_LOOKBACK + 1)..];
        let mut true_ranges = Vec::with_capacity(window.len());

        for (i, bar) in window.iter().enumerate() {
            let high = bar.high.to_string().parse::<f64>().unwrap_or(0.0);
            let low = bar.low.to_string().parse::<f64>().unwrap_or(0.0);

            let tr = if i == 0 {
                high - low
            } else {
                let prev_close = window[i - 1].close.to_string().parse::<f64>().unwrap_or(0.0);
                (high - low)
                    .max((high - prev_close).abs())
                    .max((low - prev_close).abs())
            };
            true_ranges.push(tr);
        }

        let tail = &true_ranges[true_ranges.len().saturating_sub(ATR_LOOKBACK)..];
        if tail.is_empty() {
            return 0.0;
        }
        tail.iter().sum::<f64>() / tail.len() as f64
    }

    /// 손익비 보너스 (-3~+3).
    ///
    /// 손절 측 레벨까지의 거리(risk)와 목표 측 레벨까지의 거리(reward)의
    /// 비율로 평가합니다. 어느 한쪽 레벨이 없으면 0입니다.
    fn risk_reward_bonus(
        supports: &[SrLevel],
        resistances: &[SrLevel],
        current: f64,
        direction: TradeDirection,
    ) -> i32 {
        let (Some(support), Some(resistance)) = (supports.first(), resistances.first()) else {
            return 0;
        };

        let (risk, reward) = if direction.is_sell_side() {
            (resistance.price - current, current - support.price)
        } else {
            (current - support.price, resistance.price - current)
        };

        if risk <= 0.0 {
            return 0;
        }

        let ratio = reward / risk;
        if ratio >= 3.0 {
            3
        } else if ratio >= 2.0 {
            2
        } else if ratio >= 1.5 {
            1
        } else if ratio >= 1.0 {
            0
        } else {
            -3
        }
    }
}
