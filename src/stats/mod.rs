mod charts;
mod month;
mod snapshot;

pub use charts::{category_breakdown, known_categories, monthly_trend, CategoryTotal, MonthlyTotal, DEFAULT_TREND_MONTHS, MAX_TREND_MONTHS};
pub use month::YearMonth;
pub use snapshot::{compute_stats, compute_stats_with_scope, StatsSnapshot, TotalsScope};
