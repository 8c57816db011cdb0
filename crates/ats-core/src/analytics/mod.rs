//! Dashboard aggregation: counters, funnel rates, follow-ups, recruiter
//! performance and monthly trend series.

pub mod router;
pub mod service;
pub mod trends;
pub mod views;

pub use router::dashboard_router;
pub use service::{AnalyticsError, AnalyticsService, SUMMARY_ACTIVITY_LIMIT};
pub use trends::{monthly_buckets, TREND_WINDOW_MONTHS};
pub use views::{
    ActivityEntry, ApplicationStatusCount, ConversionRates, DashboardStats, DashboardSummary,
    FollowUpEntry, JobApplicationCount, JobStatusCount, MonthlyTrends, NoteView, RecentJob,
    RecruiterPerformance, StatusCount, TrendBucket,
};
