mod gaps;
mod recommendations;
pub mod views;

pub use gaps::{prioritize, GapEntry, PrioritizedGaps};
pub use recommendations::{recommend, recommendation_for, RECOMMENDATION_CAP};
pub use views::AssessmentReport;
