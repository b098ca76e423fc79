// Revenue domain model
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueStats {
    #[serde(alias = "total_revenue")]
    pub total_revenue: f64,
    #[serde(alias = "today_revenue")]
    pub today_revenue: f64,
    #[serde(alias = "monthly_revenue")]
    pub monthly_revenue: f64,
    #[serde(alias = "average_per_user")]
    pub average_per_user: f64,
    pub growth: f64,
    pub transactions: u64,
}

/// Revenue attributed to one plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueLine {
    pub id: String,
    pub plan: String,
    pub revenue: f64,
    pub users: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueShare {
    #[serde(flatten)]
    pub line: RevenueLine,
    /// Share of total breakdown revenue, rounded to one decimal
    pub percentage: f64,
}

/// Attach each line's share of the whole breakdown. Shares are computed
/// against every line, not only the ones passed in, so filtering a view
/// never inflates the percentages.
pub fn revenue_shares<'a, I>(lines: I, all: &[RevenueLine]) -> Vec<RevenueShare>
where
    I: IntoIterator<Item = &'a RevenueLine>,
{
    let total: f64 = all.iter().map(|l| l.revenue).sum();

    lines
        .into_iter()
        .map(|line| {
            let percentage = if total > 0.0 {
                (line.revenue / total * 1000.0).round() / 10.0
            } else {
                0.0
            };
            RevenueShare {
                line: line.clone(),
                percentage,
            }
        })
        .collect()
}
