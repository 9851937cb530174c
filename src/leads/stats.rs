use serde::Serialize;
use crate::models::LeadStats;
use crate::utils::format_currency;

const LEADS_TARGET: f64 = 10.0;
const CONVERSION_TARGET: f64 = 30.0;
const EARNINGS_TARGET: f64 = 350_000.0;

/// Hunter dashboard figures with progress toward the fixed targets.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsView {
    pub total_leads: u32,
    pub converted_leads: u32,
    pub total_earnings: f64,
    pub total_earnings_display: String,
    pub conversion_rate: f64,
    pub leads_progress: f64,
    pub conversion_progress: f64,
    pub earnings_progress: f64,
}

fn capped_percent(value: f64, target: f64) -> f64 {
    (value / target * 100.0).min(100.0)
}

impl From<LeadStats> for StatsView {
    fn from(stats: LeadStats) -> Self {
        let conversion_rate = if stats.total_leads > 0 {
            stats.converted_leads as f64 / stats.total_leads as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_leads: stats.total_leads,
            converted_leads: stats.converted_leads,
            total_earnings: stats.total_earnings,
            total_earnings_display: format_currency(stats.total_earnings, 2),
            conversion_rate,
            leads_progress: capped_percent(stats.total_leads as f64, LEADS_TARGET),
            conversion_progress: capped_percent(conversion_rate, CONVERSION_TARGET),
            earnings_progress: capped_percent(stats.total_earnings, EARNINGS_TARGET),
        }
    }
}
