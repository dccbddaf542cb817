//! Fixed artifact filenames shared by the renderers and the completion banner.

/// Cleaned dataset written next to the charts.
pub const CLEAN_CSV: &str = "vgsales_clean.csv";

/// Static PNG charts, in render order.
pub const EXPLORATORY_OVERVIEW: &str = "exploratory_overview.png";
pub const CATEGORY_BREAKDOWN: &str = "category_breakdown.png";
pub const SALES_HISTOGRAMS: &str = "sales_histograms.png";

/// Interactive HTML charts, in render order.
pub const REGIONAL_SALES_OVER_TIME: &str = "regional_sales_over_time.html";
pub const TOP_20_GAMES: &str = "top_20_games.html";
pub const PLATFORM_GENRE_BREAKDOWN: &str = "platform_genre_breakdown.html";
pub const YEARLY_SALES_SCATTER: &str = "yearly_sales_scatter.html";
pub const PUBLISHER_MARKET_SHARE: &str = "publisher_market_share.html";
pub const SUCCESS_DISTRIBUTION: &str = "success_distribution.html";
