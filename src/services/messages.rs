//! Motivational message selection.
//!
//! Two tables with different policies:
//! - percentage tiers are checked highest first and the first match wins,
//!   ending in an unconditional tier so every input gets a message;
//! - behavioral rules are all evaluated against the history and one match is
//!   picked at random, so repeat visits don't keep showing the same line.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use crate::models::daily_log::DailyLog;
use crate::models::message::{Message, MessageKind};
use crate::services::history::recent_vs_older_mood;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Threshold {
    AtLeast(f64),
    Always,
}

impl Threshold {
    fn holds(&self, percentage: f64) -> bool {
        match self {
            Threshold::AtLeast(min) => percentage >= *min,
            Threshold::Always => true,
        }
    }
}

const PERCENTAGE_TIERS: &[(Threshold, Message)] = &[
    (
        Threshold::AtLeast(85.0),
        Message::new(
            "champion",
            "🏆 You're a recovery champion! Look how far you've come - you're absolutely incredible!",
            MessageKind::Motivational,
        ),
    ),
    (
        Threshold::AtLeast(70.0),
        Message::new(
            "crushing-it",
            "🚀 You're absolutely crushing this recovery journey! Your future self is so proud of you!",
            MessageKind::Motivational,
        ),
    ),
    (
        Threshold::AtLeast(55.0),
        Message::new(
            "strong-progress",
            "💪 Your progress is genuinely impressive. You're building a life that's even better than before!",
            MessageKind::Motivational,
        ),
    ),
    (
        Threshold::AtLeast(40.0),
        Message::new(
            "good-momentum",
            "🌟 You've got great momentum going! Every day you're proving how strong and resilient you are!",
            MessageKind::Encouraging,
        ),
    ),
    (
        Threshold::AtLeast(25.0),
        Message::new(
            "building-strength",
            "🌱 You're building strength every day. This process is creating the most authentic version of you!",
            MessageKind::Encouraging,
        ),
    ),
    (
        Threshold::AtLeast(10.0),
        Message::new(
            "brave-start",
            "💙 Starting this journey takes incredible courage. You're already winning by showing up for yourself!",
            MessageKind::Encouraging,
        ),
    ),
    (
        Threshold::Always,
        Message::new(
            "first-steps",
            "🌸 Every healing journey starts with a single step, and you've taken yours. That's beautiful!",
            MessageKind::Encouraging,
        ),
    ),
];

/// Message for the highest tier `percentage` reaches.
pub fn message_for_percentage(percentage: f64) -> Message {
    PERCENTAGE_TIERS
        .iter()
        .find(|(threshold, _)| threshold.holds(percentage))
        .map(|(_, message)| *message)
        // last tier is Always
        .unwrap_or(PERCENTAGE_TIERS[PERCENTAGE_TIERS.len() - 1].1)
}

/// Behavioral pattern a log history can exhibit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorRule {
    HeartbreakPlaylist,
    ShortSleep,
    SocialButterfly,
    ConsistentLogging,
    MoodImproving,
    SelfCare,
    RoughDay,
    VariedActivities,
    MusicTherapy,
}

pub const BEHAVIOR_RULES: [BehaviorRule; 9] = [
    BehaviorRule::HeartbreakPlaylist,
    BehaviorRule::ShortSleep,
    BehaviorRule::SocialButterfly,
    BehaviorRule::ConsistentLogging,
    BehaviorRule::MoodImproving,
    BehaviorRule::SelfCare,
    BehaviorRule::RoughDay,
    BehaviorRule::VariedActivities,
    BehaviorRule::MusicTherapy,
];

const SELF_CARE_ACTIVITIES: [&str; 3] = ["Exercise", "Meditation", "Therapy"];

impl BehaviorRule {
    pub fn matches(&self, logs: &[DailyLog]) -> bool {
        match self {
            BehaviorRule::HeartbreakPlaylist => logs
                .iter()
                .any(|l| l.has_genre("Sad Songs") || l.has_genre("Breakup Songs")),
            BehaviorRule::ShortSleep => logs.iter().any(|l| l.sleep_hours < 6.0),
            BehaviorRule::SocialButterfly => logs.iter().any(|l| l.social_interactions >= 5),
            BehaviorRule::ConsistentLogging => logs.len() >= 7,
            BehaviorRule::MoodImproving => {
                matches!(recent_vs_older_mood(logs), Some((recent, older)) if recent > older)
            }
            BehaviorRule::SelfCare => logs
                .iter()
                .any(|l| SELF_CARE_ACTIVITIES.iter().any(|a| l.has_activity(a))),
            BehaviorRule::RoughDay => logs.iter().any(|l| l.mood <= 4),
            BehaviorRule::VariedActivities => {
                let distinct: HashSet<&str> = logs
                    .iter()
                    .flat_map(|l| l.activities.iter().map(String::as_str))
                    .collect();
                distinct.len() >= 5
            }
            BehaviorRule::MusicTherapy => logs.iter().any(|l| l.has_genre("Healing Music")),
        }
    }

    pub fn message(&self) -> Message {
        match self {
            BehaviorRule::HeartbreakPlaylist => Message::new(
                "sad-songs",
                "Listened to 5+ sad songs today? That's 30% of your healing quota! 😅 You're basically a professional at processing emotions now!",
                MessageKind::Funny,
            ),
            BehaviorRule::ShortSleep => Message::new(
                "low-sleep",
                "Sleep schedule looking like your ex's commitment level? 😴 Let's get those Z's back on track!",
                MessageKind::Funny,
            ),
            BehaviorRule::SocialButterfly => Message::new(
                "social-butterfly",
                "Look at you being social! Your ex is missing out on this upgraded version of you! 🦋",
                MessageKind::Funny,
            ),
            BehaviorRule::ConsistentLogging => Message::new(
                "consistent-logging",
                "You've been consistently tracking your journey. This self-awareness is your superpower! 💪",
                MessageKind::Motivational,
            ),
            BehaviorRule::MoodImproving => Message::new(
                "mood-improvement",
                "Your mood has been trending upward. You're literally proof that things get better! 📈",
                MessageKind::Motivational,
            ),
            BehaviorRule::SelfCare => Message::new(
                "self-care",
                "You're actively working on yourself and that's incredibly brave. Keep investing in your happiness! ✨",
                MessageKind::Motivational,
            ),
            BehaviorRule::RoughDay => Message::new(
                "rough-day",
                "Having a tough day? That's okay. Healing isn't linear, and you're still moving forward. 🌱",
                MessageKind::Encouraging,
            ),
            BehaviorRule::VariedActivities => Message::new(
                "new-activities",
                "I love seeing you try new activities! This is how you discover the amazing person you're becoming! 🌟",
                MessageKind::Encouraging,
            ),
            BehaviorRule::MusicTherapy => Message::new(
                "music-therapy",
                "Music is your emotional processing toolkit. You're using it like a pro therapist! 🎵",
                MessageKind::Encouraging,
            ),
        }
    }
}

const FALLBACK_MESSAGES: [Message; 3] = [
    Message::new(
        "general-encouragement",
        "You're on a journey of growth and self-discovery. Every day is progress! 🌟",
        MessageKind::Encouraging,
    ),
    Message::new(
        "keep-going",
        "Healing takes time, and you're giving yourself that gift. Keep going! 💚",
        MessageKind::Motivational,
    ),
    Message::new(
        "proud-of-you",
        "Just by being here and tracking your journey, you're showing incredible self-love! ✨",
        MessageKind::Encouraging,
    ),
];

/// Rules that hold for `logs`, in table order.
pub fn matching_rules(logs: &[DailyLog]) -> Vec<BehaviorRule> {
    BEHAVIOR_RULES
        .iter()
        .copied()
        .filter(|rule| rule.matches(logs))
        .collect()
}

/// Uniformly random message among the rules `logs` matches, or among the
/// generic fallbacks when none do.
pub fn message_for_logs<R: Rng + ?Sized>(logs: &[DailyLog], rng: &mut R) -> Message {
    let matched = matching_rules(logs);
    match matched.choose(rng) {
        Some(rule) => rule.message(),
        None => {
            tracing::debug!(log_count = logs.len(), "No behavior rule matched, using fallback message");
            *FALLBACK_MESSAGES
                .choose(rng)
                .unwrap_or(&FALLBACK_MESSAGES[0])
        }
    }
}
