use serde::Serialize;

use crate::models::daily_log::DailyLog;
use crate::services::history::mean_mood;

/// Least-squares line `mood = slope * sleep_hours + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SleepMoodTrend {
    pub slope: f64,
    pub intercept: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardStats {
    pub log_count: usize,
    pub average_mood: f64,
    pub average_sleep: f64,
    pub total_social_interactions: u64,
    pub sleep_mood_trend: Option<SleepMoodTrend>,
}

pub fn summarize(logs: &[DailyLog]) -> DashboardStats {
    let average_sleep = if logs.is_empty() {
        0.0
    } else {
        logs.iter().map(|l| l.sleep_hours).sum::<f64>() / logs.len() as f64
    };

    DashboardStats {
        log_count: logs.len(),
        average_mood: mean_mood(logs),
        average_sleep,
        total_social_interactions: logs.iter().map(|l| l.social_interactions as u64).sum(),
        sleep_mood_trend: sleep_mood_trend(logs),
    }
}

/// Needs at least three logs and some spread in sleep hours.
pub fn sleep_mood_trend(logs: &[DailyLog]) -> Option<SleepMoodTrend> {
    if logs.len() <= 2 {
        return None;
    }
    let n = logs.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for l in logs {
        let (x, y) = (l.sleep_hours, l.mood as f64);
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator.abs() < f64::EPSILON {
        return None;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    Some(SleepMoodTrend { slope, intercept })
}
