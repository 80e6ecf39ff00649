//! # Recovery scoring
//!
//! Turns a newest-first log history into a single 0-100 recovery percentage.
//!
//! Five components are normalized to [0, 1] and weighted:
//!
//! | component   | weight | target                                  |
//! |-------------|--------|-----------------------------------------|
//! | mood        | 0.4    | mean mood / 10                          |
//! | sleep       | 0.2    | 8h, reaching zero at 4h deviation       |
//! | social      | 0.2    | 5 interactions per day                  |
//! | consistency | 0.1    | one log per elapsed day since the oldest |
//! | activity    | 0.1    | 3 activities per log                    |
//!
//! A trend bonus of up to 0.1 rewards the three newest moods beating the
//! three oldest. With fewer than six logs those windows overlap, so the bonus
//! stays near zero until the history grows.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use crate::models::daily_log::DailyLog;
use crate::services::history::{mean_mood, recent_vs_older_mood, LogHistory};

const MOOD_WEIGHT: f64 = 0.4;
const SLEEP_WEIGHT: f64 = 0.2;
const SOCIAL_WEIGHT: f64 = 0.2;
const CONSISTENCY_WEIGHT: f64 = 0.1;
const ACTIVITY_WEIGHT: f64 = 0.1;

const OPTIMAL_SLEEP_HOURS: f64 = 8.0;
const SLEEP_TOLERANCE_HOURS: f64 = 4.0;
const SOCIAL_TARGET_PER_DAY: f64 = 5.0;
const ACTIVITY_TARGET_PER_DAY: f64 = 3.0;
const TREND_BONUS_SCALE: f64 = 0.1;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RecoveryBreakdown {
    pub mood_score: f64,
    pub sleep_score: f64,
    pub social_score: f64,
    pub consistency_score: f64,
    pub activity_score: f64,
    pub weighted_score: f64,
    pub trend_bonus: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub recovery: f64,
}

/// Recovery percentage for `logs` (newest first) as of `now`.
pub fn score(logs: &[DailyLog], now: DateTime<Utc>) -> f64 {
    breakdown(logs, now).percentage
}

pub fn breakdown(logs: &[DailyLog], now: DateTime<Utc>) -> RecoveryBreakdown {
    let Some(oldest) = logs.last() else {
        return RecoveryBreakdown::default();
    };
    let count = logs.len() as f64;

    let mood_score = mean_mood(logs) / 10.0;

    let avg_sleep = logs.iter().map(|l| l.sleep_hours).sum::<f64>() / count;
    let sleep_score =
        (1.0 - (OPTIMAL_SLEEP_HOURS - avg_sleep).abs() / SLEEP_TOLERANCE_HOURS).clamp(0.0, 1.0);

    let avg_social = logs.iter().map(|l| l.social_interactions as f64).sum::<f64>() / count;
    let social_score = (avg_social / SOCIAL_TARGET_PER_DAY).min(1.0);

    let consistency_score = (count / days_since(oldest.date, now)).min(1.0);

    let total_activities = logs.iter().map(|l| l.activities.len()).sum::<usize>() as f64;
    let activity_score = (total_activities / (count * ACTIVITY_TARGET_PER_DAY)).min(1.0);

    let weighted_score = mood_score * MOOD_WEIGHT
        + sleep_score * SLEEP_WEIGHT
        + social_score * SOCIAL_WEIGHT
        + consistency_score * CONSISTENCY_WEIGHT
        + activity_score * ACTIVITY_WEIGHT;

    let trend_bonus = recent_vs_older_mood(logs)
        .map(|(recent, older)| ((recent - older) / 10.0 * TREND_BONUS_SCALE).max(0.0))
        .unwrap_or(0.0);

    // Floor only matters for out-of-domain input such as negative moods.
    let percentage = ((weighted_score + trend_bonus) * 100.0).clamp(0.0, 100.0);

    RecoveryBreakdown {
        mood_score,
        sleep_score,
        social_score,
        consistency_score,
        activity_score,
        weighted_score,
        trend_bonus,
        percentage,
    }
}

/// Fractional days from midnight UTC of `start` to `now`, never below one.
fn days_since(start: NaiveDate, now: DateTime<Utc>) -> f64 {
    let start = Utc.from_utc_datetime(&start.and_time(NaiveTime::default()));
    let elapsed = (now - start).num_milliseconds() as f64 / MILLIS_PER_DAY;
    elapsed.max(1.0)
}

const MILESTONES: &[(f64, &str)] = &[
    (90.0, "🌟 Recovery Champion! You're absolutely crushing it!"),
    (80.0, "🚀 Amazing progress! You're in the final stretch!"),
    (70.0, "💪 Strong recovery! You're building serious resilience!"),
    (60.0, "🌱 Growing stronger! Keep up the fantastic work!"),
    (50.0, "🎯 Halfway there! You're on the right track!"),
    (40.0, "🌈 Making real progress! Every step counts!"),
    (30.0, "💚 Building momentum! You're doing great!"),
    (20.0, "🌸 Early progress! You've taken the hardest step!"),
    (10.0, "🌱 Starting strong! The journey has begun!"),
];

const FIRST_MILESTONE: &str = "💙 Just beginning! Every expert was once a beginner!";

/// Celebratory line for the highest milestone `percentage` has reached.
pub fn milestone(percentage: f64) -> &'static str {
    MILESTONES
        .iter()
        .find(|(threshold, _)| percentage >= *threshold)
        .map(|(_, text)| *text)
        .unwrap_or(FIRST_MILESTONE)
}

/// Recovery as it stood after each log, oldest point first.
///
/// Each point scores the logs up to and including that day against the same
/// `now`.
pub fn timeline(history: &LogHistory, now: DateTime<Utc>) -> Vec<TimelinePoint> {
    if history.is_empty() {
        return Vec::new();
    }
    let logs = history.as_slice();
    history
        .chronological()
        .enumerate()
        .map(|(i, log)| {
            // `log` and everything older, still newest first
            let prefix = &logs[logs.len() - 1 - i..];
            TimelinePoint {
                date: log.date,
                recovery: score(prefix, now),
            }
        })
        .collect()
}
