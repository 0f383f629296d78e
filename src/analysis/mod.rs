pub mod champion_stats;
pub mod exceedance;
pub mod kpi;
