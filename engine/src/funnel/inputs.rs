// Input-handling boundary: applies a raw field edit to an input record.
// Numeric text is coerced (anything unparseable becomes 0) so the model only
// ever sees numbers.
use crate::error::EngineError;
use shared::models::{ChannelConfig, ChannelKind, CommissionConfig, Currency, FunnelInputs, Jurisdiction};
use shared::utils::{coerce_count, coerce_number};

fn coerce_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

fn channel_kind(prefix: &str) -> Option<ChannelKind> {
    match prefix {
        "coldCalling" => Some(ChannelKind::ColdCalling),
        "linkedIn" => Some(ChannelKind::LinkedIn),
        "referrals" => Some(ChannelKind::Referrals),
        _ => None,
    }
}

// Field names use the persisted camelCase layout; channel fields are
// prefixed with the channel kind, e.g. `linkedIn.acceptRate`.
//
// `commission.rate` only applies to a percentage commission and
// `commission.amount` only to a flat one; set `commission.type` first to
// switch. `tax.jurisdiction` takes a known code or a numeric rate (fraction).
pub fn apply_override(inputs: &mut FunnelInputs, field: &str, raw: &str) -> Result<(), EngineError> {
    let unknown = || EngineError::UnknownField(field.to_string());
    let invalid = || EngineError::InvalidValue { field: field.to_string(), value: raw.to_string() };
    let email = &mut inputs.cold_email;

    match field {
        "workingDays" => inputs.working_days = coerce_count(raw),
        "closeRate" => inputs.close_rate = coerce_number(raw),
        "dealValue" => inputs.deal_value = coerce_number(raw),
        // Unknown codes keep the current currency
        "currency" => inputs.currency = Currency::from_code(raw).unwrap_or(inputs.currency),

        "mailboxes" => email.mailboxes = coerce_count(raw),
        "emailsPerDay" => email.emails_per_day = coerce_count(raw),
        "sequenceSteps" => email.sequence_steps = coerce_count(raw),
        "openRate" => email.open_rate = coerce_number(raw),
        "replyRate" => email.reply_rate = coerce_number(raw),
        "positiveReplyRate" => email.positive_reply_rate = coerce_number(raw),
        "meetingBookRate" => email.meeting_book_rate = coerce_number(raw),
        "bounceRate" => email.bounce_rate = coerce_number(raw),
        "unsubscribeRate" => email.unsubscribe_rate = coerce_number(raw),
        "mailboxCost" => email.costs.mailbox_cost = coerce_number(raw),
        "software" => email.costs.software = coerce_number(raw),
        "sdrSalary" => email.costs.sdr_salary = coerce_number(raw),
        "manager" => email.costs.manager = coerce_number(raw),

        "commission.type" => {
            inputs.commission = match raw.trim().to_lowercase().as_str() {
                "percentage" => CommissionConfig::Percentage { rate: 0.0 },
                "flat" => CommissionConfig::Flat { amount: 0.0 },
                _ => return Err(invalid()),
            }
        }
        "commission.rate" => match &mut inputs.commission {
            CommissionConfig::Percentage { rate } => *rate = coerce_number(raw),
            CommissionConfig::Flat { .. } => return Err(invalid()),
        },
        "commission.amount" => match &mut inputs.commission {
            CommissionConfig::Flat { amount } => *amount = coerce_number(raw),
            CommissionConfig::Percentage { .. } => return Err(invalid()),
        },

        "tax.enabled" => inputs.tax.enabled = coerce_flag(raw),
        "tax.jurisdiction" => {
            inputs.tax.jurisdiction = match raw.trim().to_uppercase().as_str() {
                "" | "NONE" => Jurisdiction::Unspecified,
                "US" => Jurisdiction::US,
                "UK" => Jurisdiction::UK,
                "DE" => Jurisdiction::DE,
                "FR" => Jurisdiction::FR,
                "CA" => Jurisdiction::CA,
                "AU" => Jurisdiction::AU,
                "IN" => Jurisdiction::IN,
                other => match other.parse::<f64>() {
                    Ok(rate) if rate.is_finite() => Jurisdiction::Custom(rate),
                    _ => return Err(invalid()),
                },
            }
        }

        _ => {
            let (prefix, name) = field.split_once('.').ok_or_else(unknown)?;
            let kind = channel_kind(prefix).ok_or_else(unknown)?;
            let mut channel = inputs.channel(kind).cloned().ok_or_else(unknown)?;
            apply_channel_override(&mut channel, name, raw).ok_or_else(unknown)?;
            inputs.channels.replace(channel);
        }
    }
    Ok(())
}

fn apply_channel_override(channel: &mut ChannelConfig, name: &str, raw: &str) -> Option<()> {
    if name == "enabled" {
        channel.set_enabled(coerce_flag(raw));
        return Some(());
    }
    match channel {
        ChannelConfig::ColdCalling { calls_per_day, connect_rate, meeting_rate, costs, .. } => match name {
            "callsPerDay" => *calls_per_day = coerce_count(raw),
            "connectRate" => *connect_rate = coerce_number(raw),
            "meetingRate" => *meeting_rate = coerce_number(raw),
            "salary" => costs.salary = coerce_number(raw),
            "dialerSoftware" => costs.dialer_software = coerce_number(raw),
            _ => return None,
        },
        ChannelConfig::LinkedIn { connections_per_day, accept_rate, reply_rate, meeting_rate, costs, .. } => match name {
            "connectionsPerDay" => *connections_per_day = coerce_count(raw),
            "acceptRate" => *accept_rate = coerce_number(raw),
            "replyRate" => *reply_rate = coerce_number(raw),
            "meetingRate" => *meeting_rate = coerce_number(raw),
            "tool" => costs.tool = coerce_number(raw),
            "salary" => costs.salary = coerce_number(raw),
            _ => return None,
        },
        ChannelConfig::Referrals { referrals_per_month, conversion_rate, costs, .. } => match name {
            "referralsPerMonth" => *referrals_per_month = coerce_count(raw),
            "conversionRate" => *conversion_rate = coerce_number(raw),
            "program" => costs.program = coerce_number(raw),
            "incentivePerDeal" => costs.incentive_per_deal = coerce_number(raw),
            _ => return None,
        },
    }
    Some(())
}

// Parses a `field=value` pair as given on the command line.
pub fn parse_assignment(assignment: &str) -> Result<(&str, &str), EngineError> {
    assignment
        .split_once('=')
        .map(|(field, value)| (field.trim(), value))
        .ok_or_else(|| EngineError::UnknownField(assignment.to_string()))
}
