// Funnel model: per-channel conversion funnels and their blended totals.
// Everything here is a pure function of one `FunnelInputs` record.
pub mod cold_calling;
pub mod cold_email;
pub mod combine;
pub mod inputs;
pub mod linkedin;
pub mod referrals;

pub use cold_email::compute_cold_email_funnel;
pub use combine::{apply_commission, apply_tax, combine};

use serde::{Deserialize, Serialize};
use shared::models::{ChannelConfig, ChannelKind, ChannelResult, FunnelInputs, FunnelReport, FunnelStage};

// How user-supplied percentages are treated before they enter a funnel.
// Negative rates are always floored at 0 so stage counts stay non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatePolicy {
    // Rates above 100% are used as given
    #[default]
    Permissive,
    // Every rate is clamped to [0, 100]
    Clamp,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ModelOptions {
    pub rate_policy: RatePolicy,
}

// Values every channel shares.
#[derive(Debug, Clone, Copy)]
pub struct FunnelContext {
    pub working_days: u32,
    pub close_rate: f64,
    pub deal_value: f64,
    pub rate_policy: RatePolicy,
}

impl FunnelContext {
    pub fn from_inputs(inputs: &FunnelInputs, options: &ModelOptions) -> Self {
        Self {
            working_days: inputs.working_days,
            close_rate: inputs.close_rate,
            deal_value: inputs.deal_value,
            rate_policy: options.rate_policy,
        }
    }

    // Percentage -> fraction under the active policy.
    pub fn fraction(&self, percent: f64) -> f64 {
        let percent = if percent.is_finite() { percent.max(0.0) } else { 0.0 };
        match self.rate_policy {
            RatePolicy::Permissive => percent / 100.0,
            RatePolicy::Clamp => percent.min(100.0) / 100.0,
        }
    }

    // Closed deals from booked meetings, using the global close rate.
    pub fn deals_from(&self, meetings: u64) -> u64 {
        stage_count(meetings as f64, self.fraction(self.close_rate))
    }

    pub fn revenue_from(&self, deals: u64) -> f64 {
        deals as f64 * self.deal_value
    }
}

// Rounds to the nearest whole count before the next stage uses it.
pub fn stage_count(base: f64, fraction: f64) -> u64 {
    let value = (base * fraction).round();
    if value.is_finite() && value > 0.0 {
        value as u64
    } else {
        0
    }
}

pub fn roi(revenue: f64, cost: f64) -> f64 {
    if cost > 0.0 {
        (revenue - cost) / cost * 100.0
    } else {
        0.0
    }
}

pub(crate) fn stage(name: &str, count: u64) -> FunnelStage {
    FunnelStage { name: name.to_string(), count }
}

// Optional channels. A disabled channel returns zeros without touching any of
// its rate or cost fields.
pub fn compute_channel_funnel(channel: &ChannelConfig, ctx: &FunnelContext) -> ChannelResult {
    if !channel.is_enabled() {
        return ChannelResult::disabled(channel.kind());
    }
    match channel {
        ChannelConfig::ColdCalling { calls_per_day, connect_rate, meeting_rate, costs, .. } => {
            cold_calling::compute(*calls_per_day, *connect_rate, *meeting_rate, costs, ctx)
        }
        ChannelConfig::LinkedIn { connections_per_day, accept_rate, reply_rate, meeting_rate, costs, .. } => {
            linkedin::compute(*connections_per_day, *accept_rate, *reply_rate, *meeting_rate, costs, ctx)
        }
        ChannelConfig::Referrals { referrals_per_month, conversion_rate, costs, .. } => {
            referrals::compute(*referrals_per_month, *conversion_rate, costs, ctx)
        }
    }
}

// Full recomputation of every derived figure from one input record.
pub fn compute(inputs: &FunnelInputs, options: &ModelOptions) -> FunnelReport {
    let ctx = FunnelContext::from_inputs(inputs, options);

    let cold_email = compute_cold_email_funnel(&inputs.cold_email, &ctx);
    let mut channels = Vec::with_capacity(4);
    channels.push(cold_email.result);
    channels.extend(inputs.channels.iter().map(|c| compute_channel_funnel(c, &ctx)));

    for result in &channels {
        tracing::trace!(
            channel = result.channel.label(),
            meetings = result.meetings,
            deals = result.deals,
            revenue = result.revenue,
            cost = result.cost,
            "Channel funnel computed"
        );
    }

    let combined = combine(&channels, inputs.deal_value);
    let commission = apply_commission(&combined, &inputs.commission, combined.total_deals, inputs.deal_value);
    let net_income_before_tax = combined.total_revenue - commission.total_cost_with_commission;
    let tax = apply_tax(net_income_before_tax, inputs.tax.enabled, inputs.tax.jurisdiction.rate());

    tracing::debug!(
        total_deals = combined.total_deals,
        total_revenue = combined.total_revenue,
        total_cost = combined.total_cost,
        combined_roi = combined.combined_roi,
        roi_with_commission = commission.roi_with_commission,
        "Funnel model recomputed"
    );

    FunnelReport {
        currency: inputs.currency,
        channels,
        combined,
        commission,
        net_income_before_tax,
        tax,
        prospects_reached: cold_email.prospects_reached,
        delivered: cold_email.delivered,
        opens: cold_email.opens,
        unsubscribes: cold_email.unsubscribes,
    }
}

// Same as `compute` but with a single optional channel switched on or off.
pub fn compute_with_toggle(inputs: &FunnelInputs, options: &ModelOptions, kind: ChannelKind, enabled: bool) -> FunnelReport {
    let mut toggled = inputs.clone();
    toggled.set_channel_enabled(kind, enabled);
    compute(&toggled, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{CommissionConfig, Jurisdiction, RiskLevel, TaxConfig};

    // Scenario 1 figures from the cold-email worked example.
    fn scenario_one() -> FunnelInputs {
        let mut inputs = FunnelInputs::default();
        inputs.working_days = 21;
        inputs.close_rate = 70.0;
        inputs.deal_value = 5000.0;
        inputs.cold_email.mailboxes = 40;
        inputs.cold_email.emails_per_day = 18;
        inputs.cold_email.bounce_rate = 5.0;
        inputs.cold_email.reply_rate = 2.0;
        inputs.cold_email.positive_reply_rate = 30.0;
        inputs.cold_email.meeting_book_rate = 50.0;
        inputs
    }

    fn all_enabled() -> FunnelInputs {
        let mut inputs = scenario_one();
        for kind in [ChannelKind::ColdCalling, ChannelKind::LinkedIn, ChannelKind::Referrals] {
            inputs.set_channel_enabled(kind, true);
        }
        inputs
    }

    #[test]
    fn test_stage_count_rounds_to_nearest() {
        assert_eq!(stage_count(15120.0, 0.02), 302);
        assert_eq!(stage_count(91.0, 0.5), 46);
        assert_eq!(stage_count(10.0, 0.0), 0);
        assert_eq!(stage_count(10.0, -1.0), 0);
    }

    #[test]
    fn test_roi_zero_cost_is_zero() {
        assert_eq!(roi(1_000_000.0, 0.0), 0.0);
        assert_eq!(roi(0.0, 100.0), -100.0);
        assert_eq!(roi(300.0, 100.0), 200.0);
    }

    #[test]
    fn test_fraction_policies() {
        let mut ctx = FunnelContext { working_days: 21, close_rate: 20.0, deal_value: 1.0, rate_policy: RatePolicy::Permissive };
        assert_eq!(ctx.fraction(150.0), 1.5);
        assert_eq!(ctx.fraction(-10.0), 0.0);
        assert_eq!(ctx.fraction(f64::NAN), 0.0);
        ctx.rate_policy = RatePolicy::Clamp;
        assert_eq!(ctx.fraction(150.0), 1.0);
        assert_eq!(ctx.fraction(50.0), 0.5);
    }

    #[test]
    fn test_disabled_channels_are_zero_regardless_of_inputs() {
        let ctx = FunnelContext { working_days: 21, close_rate: 100.0, deal_value: 1e9, rate_policy: RatePolicy::Permissive };
        let channels = vec![
            ChannelConfig::ColdCalling {
                enabled: false,
                calls_per_day: 1_000_000,
                connect_rate: 100.0,
                meeting_rate: 100.0,
                costs: shared::models::ColdCallingCosts { salary: 1e9, dialer_software: 1e9 },
            },
            ChannelConfig::LinkedIn {
                enabled: false,
                connections_per_day: 1_000_000,
                accept_rate: 100.0,
                reply_rate: 100.0,
                meeting_rate: 100.0,
                costs: shared::models::LinkedInCosts { tool: 1e9, salary: 1e9 },
            },
            ChannelConfig::Referrals {
                enabled: false,
                referrals_per_month: 1_000_000,
                conversion_rate: 100.0,
                costs: shared::models::ReferralCosts { program: 1e9, incentive_per_deal: 1e9 },
            },
        ];
        for channel in &channels {
            let result = compute_channel_funnel(channel, &ctx);
            assert_eq!(result, ChannelResult::disabled(channel.kind()));
        }
    }

    #[test]
    fn test_scenario_one_cold_email_only() {
        let report = compute(&scenario_one(), &ModelOptions::default());
        let email = report.channel(ChannelKind::ColdEmail).unwrap();
        assert_eq!(email.stage("sent"), Some(15120));
        assert_eq!(email.stage("replied"), Some(302));
        assert_eq!(email.stage("positive_replies"), Some(91));
        assert_eq!(email.meetings, 46);
        assert_eq!(email.deals, 32);
        assert_eq!(email.revenue, 160000.0);
        assert_eq!(report.combined.total_deals, 32);
        assert_eq!(report.combined.total_revenue, 160000.0);
    }

    #[test]
    fn test_combined_totals_are_sum_of_channels() {
        let report = compute(&all_enabled(), &ModelOptions::default());
        let revenue: f64 = report.channels.iter().map(|c| c.revenue).sum();
        let cost: f64 = report.channels.iter().map(|c| c.cost).sum();
        let deals: u64 = report.channels.iter().map(|c| c.deals).sum();
        let meetings: u64 = report.channels.iter().map(|c| c.meetings).sum();
        assert_eq!(report.combined.total_revenue, revenue);
        assert_eq!(report.combined.total_cost, cost);
        assert_eq!(report.combined.total_deals, deals);
        assert_eq!(report.combined.total_meetings, meetings);
    }

    #[test]
    fn test_linkedin_toggle_changes_totals_by_its_own_contribution() {
        let options = ModelOptions::default();
        let inputs = all_enabled();
        let with = compute_with_toggle(&inputs, &options, ChannelKind::LinkedIn, true);
        let without = compute_with_toggle(&inputs, &options, ChannelKind::LinkedIn, false);

        // LinkedIn isolated from everything else
        let ctx = FunnelContext::from_inputs(&inputs, &options);
        let linkedin = compute_channel_funnel(inputs.channel(ChannelKind::LinkedIn).unwrap(), &ctx);
        assert!(linkedin.cost > 0.0);

        let cost_delta = with.combined.total_cost - without.combined.total_cost;
        let revenue_delta = with.combined.total_revenue - without.combined.total_revenue;
        assert!((cost_delta - linkedin.cost).abs() < 1e-9);
        assert!((revenue_delta - linkedin.revenue).abs() < 1e-9);
        assert_eq!(with.combined.total_deals - without.combined.total_deals, linkedin.deals);

        // No leakage into the other channels
        for kind in [ChannelKind::ColdEmail, ChannelKind::ColdCalling, ChannelKind::Referrals] {
            assert_eq!(with.channel(kind), without.channel(kind));
        }
    }

    #[test]
    fn test_toggle_off_leaves_no_linkedin_cost() {
        let options = ModelOptions::default();
        let inputs = all_enabled();
        let off = compute_with_toggle(&inputs, &options, ChannelKind::LinkedIn, false);
        let linkedin_costs: Vec<f64> =
            off.channels.iter().filter(|c| c.channel == ChannelKind::LinkedIn).map(|c| c.cost).collect();
        assert_eq!(linkedin_costs, vec![0.0]);
        assert_eq!(off.channels.len(), 4);
    }

    #[test]
    fn test_huge_volumes_do_not_overflow() {
        let mut inputs = all_enabled();
        inputs.working_days = 4_000_000;
        inputs.cold_email.mailboxes = 4_000_000;
        inputs.cold_email.emails_per_day = 4_000_000;
        inputs.close_rate = 500.0;
        inputs.cold_email.reply_rate = 500.0;
        inputs.cold_email.positive_reply_rate = 500.0;
        inputs.cold_email.meeting_book_rate = 500.0;
        let mut calling = ChannelConfig::default_cold_calling();
        if let ChannelConfig::ColdCalling { enabled, calls_per_day, .. } = &mut calling {
            *enabled = true;
            *calls_per_day = u32::MAX;
        }
        inputs.channels.replace(calling);

        let report = compute(&inputs, &ModelOptions::default());
        let email = report.channel(ChannelKind::ColdEmail).unwrap();
        assert_eq!(email.stage("sent"), Some(u64::MAX));
        assert_eq!(email.deals, u64::MAX);
        assert_eq!(report.combined.total_deals, u64::MAX);
        assert!(report.combined.total_revenue.is_finite());
        assert!(report.combined.combined_roi.is_finite());
    }

    #[test]
    fn test_zero_deal_value_gives_minus_hundred_roi() {
        let mut inputs = all_enabled();
        inputs.deal_value = 0.0;
        let report = compute(&inputs, &ModelOptions::default());
        assert!(report.channels.iter().all(|c| c.revenue == 0.0));
        assert!(report.combined.total_cost > 0.0);
        assert_eq!(report.combined.combined_roi, -100.0);
    }

    #[test]
    fn test_zero_close_rate_gives_no_deals() {
        let mut inputs = all_enabled();
        inputs.close_rate = 0.0;
        let report = compute(&inputs, &ModelOptions::default());
        assert!(report.channels.iter().all(|c| c.deals == 0));
        assert_eq!(report.combined.total_deals, 0);
        assert_eq!(report.combined.total_revenue, 0.0);
        assert_eq!(report.combined.combined_cac, 0.0);
        assert_eq!(report.combined.ltv_cac_ratio, 0.0);
        assert_eq!(report.scenario_results().risk, RiskLevel::High);
        assert_eq!(report.scenario_results().payback_months, None);
    }

    #[test]
    fn test_funnel_is_monotonic_when_rates_are_clamped() {
        let mut inputs = all_enabled();
        inputs.close_rate = 180.0;
        inputs.cold_email.reply_rate = 250.0;
        inputs.cold_email.positive_reply_rate = 120.0;
        let mut linkedin = inputs.channel(ChannelKind::LinkedIn).cloned().unwrap();
        if let ChannelConfig::LinkedIn { accept_rate, .. } = &mut linkedin {
            *accept_rate = 400.0;
        }
        inputs.channels.replace(linkedin);
        let report = compute(&inputs, &ModelOptions { rate_policy: RatePolicy::Clamp });
        for channel in &report.channels {
            let counts: Vec<u64> = channel.stages.iter().map(|s| s.count).collect();
            assert!(counts.windows(2).all(|w| w[1] <= w[0]), "{:?} not monotonic: {:?}", channel.channel, counts);
            assert!(channel.deals <= channel.meetings);
        }
    }

    #[test]
    fn test_permissive_policy_keeps_rates_above_hundred() {
        let mut inputs = scenario_one();
        inputs.close_rate = 200.0;
        let report = compute(&inputs, &ModelOptions::default());
        let email = report.channel(ChannelKind::ColdEmail).unwrap();
        assert_eq!(email.deals, email.meetings * 2);
    }

    #[test]
    fn test_commission_and_tax_flow_into_report() {
        let mut inputs = scenario_one();
        inputs.commission = CommissionConfig::Flat { amount: 100.0 };
        inputs.tax = TaxConfig { enabled: true, jurisdiction: Jurisdiction::US };
        let report = compute(&inputs, &ModelOptions::default());

        assert_eq!(report.commission.commission_cost, 3200.0);
        let expected_before_tax = report.combined.total_revenue - report.combined.total_cost - 3200.0;
        assert!((report.net_income_before_tax - expected_before_tax).abs() < 1e-9);
        assert!((report.tax.tax_amount - expected_before_tax * 0.21).abs() < 1e-6);

        let summary = report.scenario_results();
        assert_eq!(summary.roi, report.commission.roi_with_commission);
        assert_eq!(summary.total_cost, report.commission.total_cost_with_commission);
        assert_eq!(summary.total_return, report.tax.net_income_after_tax);
        assert!(summary.payback_months.unwrap() < 1.0);
    }
}
