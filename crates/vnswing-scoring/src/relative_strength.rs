//! 상대강도(RS) 점수 계산 (최대 15점).
//!
//! 종목의 RS 퍼센타일 레벨, 5일 모멘텀, 매매 방향과의 정합을 평가합니다.
//! RS 데이터가 없으면 레이팅 50 / 5점의 중립 폴백을 반환합니다.

use tracing::debug;
use vnswing_core::{RsPoint, TradeDirection};

/// 5일 모멘텀 비교 대상 인덱스 (최신이 처음인 시리즈 기준).
const MOMENTUM_LOOKBACK: usize = 5;

/// RS 점수 상세.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RsScore {
    /// 최종 점수 (0~15)
    pub score: i32,
    /// 평가에 사용된 RS 레이팅
    pub rating: f64,
    /// 레벨 기본 점수 (0~10)
    pub base: i32,
    /// 모멘텀 점수 (-1~+2)
    pub momentum: i32,
    /// 방향 정합 점수 (-2~+2)
    pub alignment: i32,
}

/// 상대강도 스코어러.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelativeStrengthScorer;

impl RelativeStrengthScorer {
    /// 새로운 스코어러 인스턴스 생성.
    pub fn new() -> Self {
        Self
    }

    /// RS 시리즈로부터 점수 계산.
    ///
    /// # 인자
    ///
    /// * `rs_history` - RS 레이팅 시리즈 (최신이 처음)
    /// * `direction` - 매매 방향
    pub fn score(&self, rs_history: &[RsPoint], direction: TradeDirection) -> RsScore {
        let Some(latest) = rs_history.first() else {
            // RS 데이터 없음: 중립 폴백
            return RsScore {
                score: 5,
                rating: 50.0,
                base: 0,
                momentum: 0,
                alignment: 0,
            };
        };

        let rating = latest.rating;
        let base = Self::base_score(rating);

        // 5 거래일 전 대비 변화량 (관측치 부족 시 0)
        let delta = rs_history
            .get(MOMENTUM_LOOKBACK)
            .map(|past| rating - past.rating)
            .unwrap_or(0.0);
        let momentum = Self::momentum_score(delta);

        let alignment = Self::alignment_score(rating, direction);
        let score = (base + momentum + alignment).clamp(0, 15);

        debug!(
            rating = rating,
            delta = delta,
            base = base,
            momentum = momentum,
            alignment = alignment,
            score = score,
            "Relative strength score"
        );

        RsScore {
            score,
            rating,
            base,
            momentum,
            alignment,
        }
    }

    /// 레벨 기본 점수 (0~10).
    fn base_score(rating: f64) -> i32 {
        if rating >= 90.0 {
            10
        } else if rating >= 80.0 {
            9
        } else if rating >= 70.0 {
            8
        } else if rating >= 60.0 {
            7
        } else if rating >= 50.0 {
            5
        } else if rating >= 40.0 {
            4
        } else if rating >= 30.0 {
            3
        } else if rating >= 20.0 {
            2
        } else {
            1
        }
    }

    /// 모멘텀 점수 (-1~+2).
    fn momentum_score(delta: f64) -> i32 {
        if delta >= 8.0 {
            2
        } else if delta >= 4.0 {
            1
        } else if delta >= 0.0 {
            0
        } else {
            -1
        }
    }

    /// 방향 정합 점수 (-2~+2).
    ///
    /// 매수는 높은 RS를, 매도는 낮은 RS를 선호합니다.
    fn alignment_score(rating: f64, direction: TradeDirection) -> i32 {
        if direction.is_sell_side() {
            if rating <= 30.0 {
                2
            } else if rating <= 50.0 {
                1
            } else if rating <= 70.0 {
                0
            } else {
                -2
            }
        } else {
            if rating >= 70.0 {
                2
            } else if rating >= 50.0 {
                1
            } else if rating >= 30.0 {
                0
            } else {
                -2
            }
        }
    }
}
