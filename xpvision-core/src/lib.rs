//! xpvision-core: dream progress and day-impact calculations plus the shared
//! record types. Everything here is pure; callers own persistence.

pub mod dream;
pub mod error;
pub mod finance;
pub mod impact;

pub use dream::{boost_days, progress, Dream, GoalProgress};
pub use error::{EngineError, Result};
pub use finance::{EmotionTag, SpendCategory, Transaction};
pub use impact::{impact_days, reality_trigger, ImpactModel, RealityTrigger, DAYS_PER_YEAR, MEAL_COST};
