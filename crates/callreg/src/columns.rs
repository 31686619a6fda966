//! Stable semantic column names for the annual panels.
//!
//! Source files arrive with vintage-specific headers (FRED series ids,
//! call-report field codes); everything downstream of ingestion speaks
//! these names instead.

/// Canonical name for a parsed observation date on ingested frames.
pub const DATE: &str = "date";

/// Calendar-year key every panel is joined on.
pub const YEAR: &str = "year";

/// Short-term rate (3-month constant maturity).
pub const SHORT_RATE: &str = "short_rate";

/// Long-term rate (10-year constant maturity).
pub const LONG_RATE: &str = "long_rate";

/// Real GDP growth rate.
pub const GDP_GROWTH: &str = "gdp_growth";

/// Yield-curve slope: long rate minus short rate.
pub const SLOPE: &str = "slope";

/// Net interest margin, the primary dependent variable.
pub const NIM: &str = "nimy";

/// Return on assets, the secondary dependent variable.
pub const ROA: &str = "roa";

/// Binary indicator for years at or after the structural-break year.
pub const POST_BREAK: &str = "post_break";

/// Interaction term: slope times the post-break indicator.
pub const SLOPE_POST: &str = "slope_post";

/// Name given to the intercept column of a design matrix.
pub const INTERCEPT: &str = "const";
