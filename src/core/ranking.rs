//! Expert ranking score - weighted activity signals normalized to 0-1000.
//!
//! Each signal is capped before weighting so no single metric can dominate
//! beyond its allotted share. The rating term is deliberately uncapped: the
//! booking layer guarantees ratings stay in [0, 5].

use crate::domain::model::{ExpertStats, ScoreBreakdown, ScoreComponent};

const SESSIONS_WEIGHT: f64 = 400.0;
const RATING_WEIGHT: f64 = 300.0;
const REVIEWS_WEIGHT: f64 = 150.0;
const REPEAT_WEIGHT: f64 = 100.0;
const LIKES_WEIGHT: f64 = 50.0;

const SESSIONS_CAP: f64 = 100.0;
const REVIEWS_CAP: f64 = 50.0;
const LIKES_CAP: f64 = 100.0;
const RATING_MAX: f64 = 5.0;

/// Round to 2 decimal places on the cent boundary.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn sessions_score(stats: &ExpertStats) -> f64 {
    (f64::from(stats.total_sessions) / SESSIONS_CAP).min(1.0) * SESSIONS_WEIGHT
}

fn rating_score(stats: &ExpertStats) -> f64 {
    stats.avg_rating / RATING_MAX * RATING_WEIGHT
}

fn reviews_score(stats: &ExpertStats) -> f64 {
    (f64::from(stats.review_count) / REVIEWS_CAP).min(1.0) * REVIEWS_WEIGHT
}

fn repeat_rate(stats: &ExpertStats) -> f64 {
    // Guard the only division that can see a zero denominator.
    if stats.total_sessions == 0 {
        0.0
    } else {
        f64::from(stats.repeat_clients) / f64::from(stats.total_sessions)
    }
}

fn repeat_score(stats: &ExpertStats) -> f64 {
    repeat_rate(stats) * REPEAT_WEIGHT
}

fn likes_score(stats: &ExpertStats) -> f64 {
    (f64::from(stats.like_count) / LIKES_CAP).min(1.0) * LIKES_WEIGHT
}

/// Composite ranking score for one expert, rounded to 2 decimals.
///
/// Pure and infallible: missing counters are zero, the repeat term degrades to
/// zero without sessions, and inputs are taken as-is (range checks belong to
/// the caller). Stays within [0, 1000] for contract-valid stats.
pub fn calculate_ranking_score(stats: &ExpertStats) -> f64 {
    round2(
        sessions_score(stats)
            + rating_score(stats)
            + reviews_score(stats)
            + repeat_score(stats)
            + likes_score(stats),
    )
}

/// Per-component explanation of [`calculate_ranking_score`].
///
/// Components are rounded independently; `total_score` is computed from the
/// unrounded sum and may differ from adding the rounded components by up to
/// 0.04. That mismatch is part of the published behavior and is kept.
pub fn score_breakdown(stats: &ExpertStats) -> ScoreBreakdown {
    let sessions = sessions_score(stats);
    let rating = rating_score(stats);
    let reviews = reviews_score(stats);
    let repeat = repeat_score(stats);
    let likes = likes_score(stats);
    let total = sessions + rating + reviews + repeat + likes;

    ScoreBreakdown {
        sessions: ScoreComponent {
            score: round2(sessions),
            detail: format!(
                "{} completed sessions ({:.2} pts)",
                stats.total_sessions,
                round2(sessions)
            ),
        },
        rating: ScoreComponent {
            score: round2(rating),
            detail: format!(
                "average rating {}/5 ({:.2} pts)",
                stats.avg_rating,
                round2(rating)
            ),
        },
        reviews: ScoreComponent {
            score: round2(reviews),
            detail: format!("{} reviews ({:.2} pts)", stats.review_count, round2(reviews)),
        },
        repeat_rate: ScoreComponent {
            score: round2(repeat),
            detail: format!(
                "{}/{} repeat clients ({:.1}%, {:.2} pts)",
                stats.repeat_clients,
                stats.total_sessions,
                repeat_rate(stats) * 100.0,
                round2(repeat)
            ),
        },
        likes: ScoreComponent {
            score: round2(likes),
            detail: format!("{} likes ({:.2} pts)", stats.like_count, round2(likes)),
        },
        total_score: round2(total),
    }
}
