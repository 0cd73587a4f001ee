//! xpvision-finance: bet/category classifier, transaction tagging, Saboteur
//! Map, bet protection, spend simulator, challenges, badges and CSV import

pub mod badges;
pub mod bet_protection;
pub mod category_rules;
pub mod challenges;
pub mod ledger_csv;
pub mod saboteur;
pub mod simulator;
pub mod tagger;

pub use badges::{evaluate as evaluate_badges, has_badge, Badge, BadgeKind};
pub use bet_protection::BetProtection;
pub use category_rules::{classify, classify_with_emotion, detect_bet, Classification};
pub use challenges::{Challenge, ChallengeKind};
pub use ledger_csv::parse_ledger_csv;
pub use saboteur::{CategorySummary, SaboteurMap};
pub use simulator::{simulate, Recommendation, SimulationResult};
pub use tagger::{RawTransaction, TransactionTagger};
