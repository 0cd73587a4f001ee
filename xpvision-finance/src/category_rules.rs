//! Deterministic bet detection and category rules.
//!
//! Plain case-insensitive substring matching, evaluated against an ordered
//! rule table. First match wins; anything unmatched lands in `Other`.

use serde::{Deserialize, Serialize};
use xpvision_core::{EmotionTag, SpendCategory};

/// Gambling brands and generic gambling terms
pub const BET_KEYWORDS: &[&str] = &[
    "bet",
    "bet365",
    "blaze",
    "cassino",
    "casino",
    "aposta",
    "pixbet",
    "sportingbet",
    "1xbet",
    "betano",
];

/// Result of classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub is_bet: bool,
    pub category: SpendCategory,
}

impl Classification {
    pub fn category_name(&self) -> &'static str {
        self.category.name()
    }
}

/// What a rule looks at
#[derive(Debug, Clone, Copy)]
enum Matcher {
    /// Bet keywords in description or category
    Bet,
    /// Any keyword in the category text
    CategoryKeywords(&'static [&'static str]),
    Emotion(EmotionTag),
}

#[derive(Debug, Clone, Copy)]
struct Rule {
    matcher: Matcher,
    category: SpendCategory,
}

/// Priority order. Bets always win over keyword categories.
const RULES: &[Rule] = &[
    Rule { matcher: Matcher::Bet, category: SpendCategory::Bets },
    Rule {
        matcher: Matcher::CategoryKeywords(&["delivery", "ifood"]),
        category: SpendCategory::Delivery,
    },
    Rule {
        matcher: Matcher::CategoryKeywords(&["transporte", "uber"]),
        category: SpendCategory::Transport,
    },
    Rule {
        matcher: Matcher::CategoryKeywords(&["assinatura"]),
        category: SpendCategory::Subscriptions,
    },
    Rule {
        matcher: Matcher::Emotion(EmotionTag::Impulsive),
        category: SpendCategory::ImpulsePurchases,
    },
];

/// Lowercased view of one transaction's text fields
struct Subject {
    description: String,
    category: String,
    emotion: Option<EmotionTag>,
    is_bet: bool,
}

impl Matcher {
    fn matches(&self, s: &Subject) -> bool {
        match self {
            Matcher::Bet => s.is_bet,
            Matcher::CategoryKeywords(words) => words.iter().any(|w| s.category.contains(w)),
            Matcher::Emotion(tag) => s.emotion == Some(*tag),
        }
    }
}

fn contains_bet_keyword(lower: &str) -> bool {
    BET_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// True if either text field mentions a gambling keyword
pub fn detect_bet(description: &str, category: &str) -> bool {
    contains_bet_keyword(&description.to_lowercase()) || contains_bet_keyword(&category.to_lowercase())
}

/// Classify without an emotion tag
pub fn classify(description: &str, category: &str) -> Classification {
    classify_with_emotion(description, category, None)
}

/// Classify with the user's emotion tag; an `Impulsive` tag catches
/// purchases no keyword rule claimed.
pub fn classify_with_emotion(
    description: &str,
    category: &str,
    emotion: Option<EmotionTag>,
) -> Classification {
    let is_bet = detect_bet(description, category);
    Classification {
        is_bet,
        category: resolve(description, category, emotion, is_bet),
    }
}

/// Resolve a category from an already-known bet flag, e.g. one stored on a
/// persisted transaction.
pub fn resolve_category(
    description: &str,
    category: &str,
    emotion: Option<EmotionTag>,
    is_bet: bool,
) -> SpendCategory {
    resolve(description, category, emotion, is_bet)
}

fn resolve(description: &str, category: &str, emotion: Option<EmotionTag>, is_bet: bool) -> SpendCategory {
    let subject = Subject {
        description: description.to_lowercase(),
        category: category.to_lowercase(),
        emotion,
        is_bet,
    };
    log::trace!("classifying {:?} / {:?}", subject.description, subject.category);

    RULES
        .iter()
        .find(|rule| rule.matcher.matches(&subject))
        .map(|rule| rule.category)
        .unwrap_or(SpendCategory::Other)
}
