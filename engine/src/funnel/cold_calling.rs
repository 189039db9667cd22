// Cold calling: dials -> connected conversations -> meetings -> deals.
use super::{roi, stage, stage_count, FunnelContext};
use shared::models::{ChannelKind, ChannelResult, ColdCallingCosts};

pub fn compute(
    calls_per_day: u32,
    connect_rate: f64,
    meeting_rate: f64,
    costs: &ColdCallingCosts,
    ctx: &FunnelContext,
) -> ChannelResult {
    let calls = (calls_per_day as u64).saturating_mul(ctx.working_days as u64);
    let connects = stage_count(calls as f64, ctx.fraction(connect_rate));
    let meetings = stage_count(connects as f64, ctx.fraction(meeting_rate));
    let deals = ctx.deals_from(meetings);
    let revenue = ctx.revenue_from(deals);
    let cost = costs.salary + costs.dialer_software;

    ChannelResult {
        channel: ChannelKind::ColdCalling,
        stages: vec![
            stage("calls", calls),
            stage("connects", connects),
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
