// Blended metrics across all channels, plus the commission and tax layers
// applied on top of them.
use super::roi;
use shared::models::{ChannelResult, CombinedResult, CommissionConfig, CommissionResult, TaxResult};

pub fn combine(channels: &[ChannelResult], deal_value: f64) -> CombinedResult {
    let total_meetings = channels.iter().fold(0u64, |acc, c| acc.saturating_add(c.meetings));
    let total_deals = channels.iter().fold(0u64, |acc, c| acc.saturating_add(c.deals));
    let total_revenue: f64 = channels.iter().map(|c| c.revenue).sum();
    let total_cost: f64 = channels.iter().map(|c| c.cost).sum();

    let combined_cac = if total_deals > 0 { total_cost / total_deals as f64 } else { 0.0 };
    let ltv_cac_ratio = if combined_cac > 0.0 { deal_value / combined_cac } else { 0.0 };

    CombinedResult {
        total_meetings,
        total_deals,
        total_revenue,
        total_cost,
        combined_roi: roi(total_revenue, total_cost),
        combined_cac,
        ltv_cac_ratio,
    }
}

// Commission is treated as one more cost line on top of the channel costs.
pub fn apply_commission(combined: &CombinedResult, config: &CommissionConfig, deals: u64, deal_value: f64) -> CommissionResult {
    let commission_cost = match config {
        CommissionConfig::Percentage { rate } => deals as f64 * deal_value * (rate / 100.0),
        CommissionConfig::Flat { amount } => deals as f64 * amount,
    };
    let total_cost_with_commission = combined.total_cost + commission_cost;

    CommissionResult {
        commission_cost,
        net_revenue: combined.total_revenue - commission_cost,
        total_cost_with_commission,
        roi_with_commission: roi(combined.total_revenue, total_cost_with_commission),
    }
}

// `rate` is a fraction. Losses are not taxed and produce no credit.
pub fn apply_tax(net_income_before_tax: f64, enabled: bool, rate: f64) -> TaxResult {
    let tax_amount = if enabled && net_income_before_tax > 0.0 {
        net_income_before_tax * rate
    } else {
        0.0
    };
    TaxResult {
        tax_amount,
        net_income_after_tax: net_income_before_tax - tax_amount,
    }
}
