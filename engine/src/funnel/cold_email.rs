// Cold email: the always-on channel.
//
// Reply rate is applied to every email sent, not to opens or deliveries, so
// deliverability and opens are reported alongside the funnel but never
// chained into it.
use super::{roi, stage, stage_count, FunnelContext};
use shared::models::{ChannelKind, ChannelResult, ColdEmailConfig, ColdEmailCosts};

#[derive(Debug, Clone, PartialEq)]
pub struct ColdEmailFunnel {
    pub result: ChannelResult,
    pub prospects_reached: u64,
    pub delivered: u64,
    pub opens: u64,
    pub unsubscribes: u64,
}

pub fn monthly_cost(config: &ColdEmailConfig) -> f64 {
    let ColdEmailCosts { mailbox_cost, software, sdr_salary, manager } = &config.costs;
    mailbox_cost * config.mailboxes as f64 + software + sdr_salary + manager
}

pub fn compute_cold_email_funnel(config: &ColdEmailConfig, ctx: &FunnelContext) -> ColdEmailFunnel {
    // Saturates rather than wrapping on absurd volumes
    let total_emails = (config.mailboxes as u64)
        .saturating_mul(config.emails_per_day as u64)
        .saturating_mul(ctx.working_days as u64);
    let sent = total_emails as f64;

    let delivered = stage_count(sent, 1.0 - ctx.fraction(config.bounce_rate).min(1.0));
    let opens = stage_count(delivered as f64, ctx.fraction(config.open_rate));
    let unsubscribes = stage_count(delivered as f64, ctx.fraction(config.unsubscribe_rate));
    let prospects_reached = if config.sequence_steps > 0 {
        total_emails / config.sequence_steps as u64
    } else {
        0
    };

    let replied = stage_count(sent, ctx.fraction(config.reply_rate));
    let positive_replies = stage_count(replied as f64, ctx.fraction(config.positive_reply_rate));
    let meetings = stage_count(positive_replies as f64, ctx.fraction(config.meeting_book_rate));
    let deals = ctx.deals_from(meetings);
    let revenue = ctx.revenue_from(deals);
    let cost = monthly_cost(config);

    ColdEmailFunnel {
        result: ChannelResult {
            channel: ChannelKind::ColdEmail,
            stages: vec![
                stage("sent", total_emails),
                stage("replied", replied),
                stage("positive_replies", positive_replies),
                stage("meetings", meetings),
                stage("deals", deals),
            ],
            meetings,
            deals,
            revenue,
            cost,
            roi: roi(revenue, cost),
        },
        prospects_reached,
        delivered,
        opens,
        unsubscribes,
    }
}
