//! Achievement badges: clean streaks, first contribution, finished challenges.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use xpvision_core::{EmotionTag, Transaction};

/// Days a streak must last to earn a badge
pub const STREAK_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BadgeKind {
    #[serde(rename = "no_bet_7days")]
    NoBet7Days,
    #[serde(rename = "first_contribution")]
    FirstContribution,
    #[serde(rename = "no_impulse_7days")]
    NoImpulse7Days,
    #[serde(rename = "weekly_challenge")]
    WeeklyChallenge,
}

impl BadgeKind {
    /// Every badge, in display order
    pub const ALL: [BadgeKind; 4] = [
        BadgeKind::NoBet7Days,
        BadgeKind::FirstContribution,
        BadgeKind::NoImpulse7Days,
        BadgeKind::WeeklyChallenge,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            BadgeKind::NoBet7Days => "7 Dias Limpos",
            BadgeKind::FirstContribution => "Primeiro Passo",
            BadgeKind::NoImpulse7Days => "Controle Total",
            BadgeKind::WeeklyChallenge => "Desafiador",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BadgeKind::NoBet7Days => "Ficou 7 dias sem apostar",
            BadgeKind::FirstContribution => "Fez sua primeira contribuição",
            BadgeKind::NoImpulse7Days => "7 dias sem gastos impulsivos",
            BadgeKind::WeeklyChallenge => "Completou um desafio semanal",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            BadgeKind::NoBet7Days => "🎲",
            BadgeKind::FirstContribution => "🌟",
            BadgeKind::NoImpulse7Days => "💪",
            BadgeKind::WeeklyChallenge => "🏆",
        }
    }
}

/// A badge the user has earned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub kind: BadgeKind,
    pub earned_at: NaiveDate,
}

pub fn has_badge(earned: &[Badge], kind: BadgeKind) -> bool {
    earned.iter().any(|b| b.kind == kind)
}

/// Whole days without a matching expense. The streak starts at the last
/// match, or at the first recorded transaction when nothing ever matched.
fn clean_streak(txns: &[Transaction], today: NaiveDate, matches: impl Fn(&Transaction) -> bool) -> Option<i64> {
    let since = txns
        .iter()
        .filter(|t| t.is_expense() && matches(t))
        .map(|t| t.date)
        .max()
        .or_else(|| txns.iter().map(|t| t.date).min())?;
    Some((today - since).num_days().max(0))
}

pub fn earns_no_bet(txns: &[Transaction], today: NaiveDate) -> bool {
    clean_streak(txns, today, |t| t.is_bet).is_some_and(|d| d >= STREAK_DAYS)
}

pub fn earns_no_impulse(txns: &[Transaction], today: NaiveDate) -> bool {
    clean_streak(txns, today, |t| t.emotion_tag == Some(EmotionTag::Impulsive)).is_some_and(|d| d >= STREAK_DAYS)
}

/// Any deposit toward the dream counts
pub fn earns_first_contribution(txns: &[Transaction]) -> bool {
    txns.iter().any(Transaction::is_income)
}

/// Badges newly earned as of `today`, skipping those already in `earned`.
/// `challenge_completed` is the `just_completed` flag of the latest
/// challenge update.
pub fn evaluate(txns: &[Transaction], today: NaiveDate, challenge_completed: bool, earned: &[Badge]) -> Vec<Badge> {
    let new: Vec<Badge> = BadgeKind::ALL
        .into_iter()
        .filter(|kind| !has_badge(earned, *kind))
        .filter(|kind| match kind {
            BadgeKind::NoBet7Days => earns_no_bet(txns, today),
            BadgeKind::FirstContribution => earns_first_contribution(txns),
            BadgeKind::NoImpulse7Days => earns_no_impulse(txns, today),
            BadgeKind::WeeklyChallenge => challenge_completed,
        })
        .map(|kind| Badge { kind, earned_at: today })
        .collect();

    for b in &new {
        log::info!("badge earned: {} {}", b.kind.emoji(), b.kind.title());
    }
    new
}
