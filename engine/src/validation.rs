// Minimum-value checks behind the "required fields missing" notice.
// They never stop the model from running.
use serde::Serialize;
use shared::models::FunnelInputs;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingField {
    pub field: &'static str,
    pub message: &'static str,
}

pub fn validate(inputs: &FunnelInputs) -> Vec<MissingField> {
    let mut missing = Vec::new();
    if inputs.cold_email.mailboxes < 1 {
        missing.push(MissingField { field: "mailboxes", message: "At least one mailbox is required" });
    }
    if inputs.cold_email.emails_per_day < 1 {
        missing.push(MissingField { field: "emailsPerDay", message: "Emails per day must be at least 1" });
    }
    if inputs.working_days < 1 {
        missing.push(MissingField { field: "workingDays", message: "Working days must be at least 1" });
    }
    if inputs.deal_value.is_nan() || inputs.deal_value <= 0.0 {
        missing.push(MissingField { field: "dealValue", message: "Deal value must be greater than 0" });
    }
    missing
}
