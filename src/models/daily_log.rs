use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One day's entry as supplied by the log store.
///
/// Values are taken as-is: mood outside 1-10 or negative sleep are not
/// rejected here, they just flow through the scoring arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    #[serde(default = "new_log_id")]
    pub id: String,
    pub date: NaiveDate,
    pub mood: i32,
    pub sleep_hours: f64,
    pub social_interactions: u32,
    #[serde(default)]
    pub music_genres: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal_entry: Option<String>,
}

fn new_log_id() -> String {
    Uuid::new_v4().to_string()
}

impl DailyLog {
    pub fn has_genre(&self, genre: &str) -> bool {
        self.music_genres.iter().any(|g| g == genre)
    }

    pub fn has_activity(&self, activity: &str) -> bool {
        self.activities.iter().any(|a| a == activity)
    }
}
