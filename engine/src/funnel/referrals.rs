// Referrals: monthly introductions -> meetings -> deals.
// Incentives are paid per closed deal, so the cost grows with the funnel.
use super::{roi, stage, stage_count, FunnelContext};
use shared::models::{ChannelKind, ChannelResult, ReferralCosts};

pub fn compute(referrals_per_month: u32, conversion_rate: f64, costs: &ReferralCosts, ctx: &FunnelContext) -> ChannelResult {
    let referrals = referrals_per_month as u64;
    let meetings = stage_count(referrals as f64, ctx.fraction(conversion_rate));
    let deals = ctx.deals_from(meetings);
    let revenue = ctx.revenue_from(deals);
    let cost = costs.program + costs.incentive_per_deal * deals as f64;

    ChannelResult {
        channel: ChannelKind::Referrals,
        stages: vec![
            stage("referrals", referrals),
            stage("meetings", meetings),
            stage("deals", deals),
        ],
        meetings,
        deals,
        revenue,
        cost,
        roi: roi(revenue, cost),
    }
}
