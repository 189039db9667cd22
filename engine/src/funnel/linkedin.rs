// LinkedIn outreach: connection requests -> accepted -> replies -> meetings -> deals.
use super::{roi, stage, stage_count, FunnelContext};
use shared::models::{ChannelKind, ChannelResult, LinkedInCosts};

pub fn compute(
    connections_per_day: u32,
    accept_rate: f64,
    reply_rate: f64,
    meeting_rate: f64,
    costs: &LinkedInCosts,
    ctx: &FunnelContext,
) -> ChannelResult {
    let requests = (connections_per_day as u64).saturating_mul(ctx.working_days as u64);
    let accepted = stage_count(requests as f64, ctx.fraction(accept_rate));
    let replies = stage_count(accepted as f64, ctx.fraction(reply_rate));
    let meetings = stage_count(replies as f64, ctx.fraction(meeting_rate));
    let deals = ctx.deals_from(meetings);
    let revenue = ctx.revenue_from(deals);
    let cost = costs.tool + costs.salary;

    ChannelResult {
        channel: ChannelKind::LinkedIn,
        stages: vec![
            stage("requests", requests),
            stage("accepted", accepted),
            stage("replies", replies),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funnel::RatePolicy;

    #[test]
    fn test_linkedin_funnel() {
        let ctx = FunnelContext { working_days: 20, close_rate: 50.0, deal_value: 3000.0, rate_policy: RatePolicy::Permissive };
        let costs = LinkedInCosts { tool: 100.0, salary: 900.0 };
        let result = compute(25, 40.0, 25.0, 50.0, &costs, &ctx);
        // 500 requests -> 200 accepted -> 50 replies -> 25 meetings -> round(12.5) = 13 deals
        assert_eq!(result.stage("requests"), Some(500));
        assert_eq!(result.stage("accepted"), Some(200));
        assert_eq!(result.stage("replies"), Some(50));
        assert_eq!(result.meetings, 25);
        assert_eq!(result.deals, 13);
        assert_eq!(result.revenue, 39000.0);
        assert_eq!(result.cost, 1000.0);
        assert_eq!(result.roi, 3800.0);
    }
}
