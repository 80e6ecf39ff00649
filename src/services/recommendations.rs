//! Music recommendations from the static catalog.
//!
//! Ranking is "prioritize, then randomize": songs in genres the user has
//! logged are moved to the front, then the whole list is shuffled before
//! truncation. The shuffle means genre affinity is at most a soft bias; no
//! ordering guarantee is made to callers.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::models::daily_log::DailyLog;
use crate::models::recommendation::{MoodCategory, RecommendationItem};
use crate::services::history::mean_mood;

pub const MAX_RECOMMENDATIONS: usize = 9;

/// Entries used by `classify_mood`.
const CLASSIFY_WINDOW: usize = 5;

/// Occurrences needed before a genre earns a specific insight.
const INSIGHT_MIN_COUNT: usize = 3;

const fn song(
    id: &'static str,
    title: &'static str,
    artist: &'static str,
    genre: &'static str,
    mood_category: MoodCategory,
) -> RecommendationItem {
    RecommendationItem {
        id,
        title,
        artist,
        genre,
        mood_category,
    }
}

pub static CATALOG: [RecommendationItem; 23] = [
    song("someone-like-you", "Someone Like You", "Adele", "Pop", MoodCategory::Sad),
    song("hurt", "Hurt", "Johnny Cash", "Country", MoodCategory::Sad),
    song("breathe-me", "Breathe Me", "Sia", "Alternative", MoodCategory::Sad),
    song("mad-world", "Mad World", "Gary Jules", "Alternative", MoodCategory::Sad),
    song("hello", "Hello", "Adele", "Pop", MoodCategory::Sad),
    song("lose-you-to-love-me", "Lose You To Love Me", "Selena Gomez", "Pop", MoodCategory::Healing),
    song("stronger-than-before", "Stronger (What Doesn't Kill You)", "Kelly Clarkson", "Pop", MoodCategory::Healing),
    song("new-rules", "New Rules", "Dua Lipa", "Pop", MoodCategory::Healing),
    song("thank-you-next", "thank u, next", "Ariana Grande", "Pop", MoodCategory::Healing),
    song("good-as-hell", "Good as Hell", "Lizzo", "Pop", MoodCategory::Healing),
    song("praying", "Praying", "Kesha", "Pop", MoodCategory::Healing),
    song("fight-song", "Fight Song", "Rachel Platten", "Pop", MoodCategory::Empowering),
    song("roar", "Roar", "Katy Perry", "Pop", MoodCategory::Empowering),
    song("confident", "Confident", "Demi Lovato", "Pop", MoodCategory::Empowering),
    song("stronger-britney", "Stronger", "Britney Spears", "Pop", MoodCategory::Empowering),
    song("girl-on-fire", "Girl on Fire", "Alicia Keys", "R&B", MoodCategory::Empowering),
    song("independent-women", "Independent Women", "Destiny's Child", "R&B", MoodCategory::Empowering),
    song("good-4-u", "good 4 u", "Olivia Rodrigo", "Pop", MoodCategory::Happy),
    song("shake-it-off", "Shake It Off", "Taylor Swift", "Pop", MoodCategory::Happy),
    song("uptown-funk", "Uptown Funk", "Bruno Mars", "Pop", MoodCategory::Happy),
    song("dancing-queen", "Dancing Queen", "ABBA", "Pop", MoodCategory::Happy),
    song("good-vibes", "Good Vibes", "Chris Janson", "Country", MoodCategory::Happy),
    song("sunshine", "Sunshine", "OneRepublic", "Pop", MoodCategory::Happy),
];

/// Up to nine catalog songs for `category`.
pub fn recommend<R: Rng + ?Sized>(
    logs: &[DailyLog],
    category: MoodCategory,
    rng: &mut R,
) -> Vec<RecommendationItem> {
    let mut items: Vec<RecommendationItem> = CATALOG
        .iter()
        .filter(|item| item.mood_category == category)
        .copied()
        .collect();

    if !logs.is_empty() {
        let user_genres: HashSet<&str> = logs
            .iter()
            .flat_map(|l| l.music_genres.iter().map(String::as_str))
            .collect();
        // stable: relative order inside each half is kept
        items.sort_by_key(|item| !user_genres.contains(item.genre));
    }

    items.shuffle(rng);
    items.truncate(MAX_RECOMMENDATIONS);
    items
}

/// Category matching the mean mood of the five newest logs.
pub fn classify_mood(logs: &[DailyLog]) -> MoodCategory {
    if logs.is_empty() {
        return MoodCategory::default();
    }
    let recent = &logs[..logs.len().min(CLASSIFY_WINDOW)];
    let average = mean_mood(recent);

    if average <= 3.0 {
        MoodCategory::Sad
    } else if average <= 5.0 {
        MoodCategory::Healing
    } else if average <= 7.0 {
        MoodCategory::Empowering
    } else {
        MoodCategory::Happy
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MusicStats {
    /// Genre labels across all logs, counting repeats.
    pub genres_logged: usize,
    pub healing_music_days: usize,
    pub breakup_song_days: usize,
}

pub fn music_stats(logs: &[DailyLog]) -> MusicStats {
    MusicStats {
        genres_logged: logs.iter().map(|l| l.music_genres.len()).sum(),
        healing_music_days: logs.iter().filter(|l| l.has_genre("Healing Music")).count(),
        breakup_song_days: logs.iter().filter(|l| l.has_genre("Breakup Songs")).count(),
    }
}

fn genre_insight(genre: &str) -> Option<&'static str> {
    let text = match genre {
        "Sad Songs" => "You're using music to process emotions - that's actually super healthy! 🎵",
        "Breakup Songs" => "Those breakup songs are doing their job. You're healing through music! 💙",
        "Healing Music" => "Your music choice shows you're actively working on self-care. Amazing! ✨",
        "Pop" => "Pop music is keeping your spirits up - you know what works for you! 🎶",
        "Classical" => "Classical music? Your brain is getting those dopamine hits while you heal! 🎼",
        "Hip Hop" => "Hip hop beats are keeping you motivated. Keep that energy flowing! 🎤",
        "Rock" => "Rock music is channeling your emotions in a powerful way! 🤘",
        "Electronic" => "Electronic beats are keeping you moving forward. Dance it out! 🕺",
        _ => return None,
    };
    Some(text)
}

/// Most frequently logged genre with its count; ties go to the genre seen first.
fn top_genre(logs: &[DailyLog]) -> Option<(&str, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();
    for genre in logs.iter().flat_map(|l| l.music_genres.iter().map(String::as_str)) {
        let count = counts.entry(genre).or_insert(0);
        if *count == 0 {
            first_seen.push(genre);
        }
        *count += 1;
    }

    let mut top: Option<(&str, usize)> = None;
    for genre in first_seen {
        let count = counts[genre];
        if top.map_or(true, |(_, best)| count > best) {
            top = Some((genre, count));
        }
    }
    top
}

pub fn music_insight(logs: &[DailyLog]) -> String {
    if logs.is_empty() {
        return "Start logging to get personalized music insights!".into();
    }

    match top_genre(logs) {
        Some((genre, count)) if count >= INSIGHT_MIN_COUNT => match genre_insight(genre) {
            Some(text) => text.into(),
            None => format!(
                "You're exploring {} - music diversity shows emotional growth! 🌟",
                genre
            ),
        },
        _ => "You're exploring different music styles - variety is the spice of healing! 🌈".into(),
    }
}
