use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Display currency. Amounts are never converted between currencies; the code
// only selects the symbol used when formatting.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    INR,
    CAD,
    AUD,
    JPY,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::INR => "INR",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
            Currency::JPY => "JPY",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::INR => "₹",
            Currency::CAD => "C$",
            Currency::AUD => "A$",
            Currency::JPY => "¥",
        }
    }

    pub fn from_code(code: &str) -> Option<Currency> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "INR" => Some(Currency::INR),
            "CAD" => Some(Currency::CAD),
            "AUD" => Some(Currency::AUD),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ChannelKind {
    ColdEmail,
    ColdCalling,
    LinkedIn,
    Referrals,
}

impl ChannelKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChannelKind::ColdEmail => "Cold email",
            ChannelKind::ColdCalling => "Cold calling",
            ChannelKind::LinkedIn => "LinkedIn",
            ChannelKind::Referrals => "Referrals",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColdEmailCosts {
    // Monthly cost per sending mailbox (domain + inbox)
    pub mailbox_cost: f64,
    pub software: f64,
    pub sdr_salary: f64,
    pub manager: f64,
}

// The always-on channel. There is deliberately no `enabled` flag here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColdEmailConfig {
    pub mailboxes: u32,
    pub emails_per_day: u32,
    pub sequence_steps: u32,
    pub open_rate: f64,
    pub reply_rate: f64,
    pub positive_reply_rate: f64,
    pub meeting_book_rate: f64,
    pub bounce_rate: f64,
    pub unsubscribe_rate: f64,
    pub costs: ColdEmailCosts,
}

impl Default for ColdEmailConfig {
    fn default() -> Self {
        Self {
            mailboxes: 40,
            emails_per_day: 18,
            sequence_steps: 3,
            open_rate: 45.0,
            reply_rate: 2.0,
            positive_reply_rate: 30.0,
            meeting_book_rate: 50.0,
            bounce_rate: 5.0,
            unsubscribe_rate: 1.0,
            costs: ColdEmailCosts {
                mailbox_cost: 15.0,
                software: 300.0,
                sdr_salary: 4000.0,
                manager: 0.0,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColdCallingCosts {
    pub salary: f64,
    pub dialer_software: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LinkedInCosts {
    pub tool: f64,
    pub salary: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReferralCosts {
    pub program: f64,
    pub incentive_per_deal: f64,
}

// Optional acquisition channels. Each variant carries its own flag so a
// disabled channel still keeps the user's figures for when it is re-enabled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ChannelConfig {
    #[serde(rename_all = "camelCase")]
    ColdCalling {
        enabled: bool,
        calls_per_day: u32,
        connect_rate: f64,
        meeting_rate: f64,
        costs: ColdCallingCosts,
    },
    #[serde(rename_all = "camelCase")]
    LinkedIn {
        enabled: bool,
        connections_per_day: u32,
        accept_rate: f64,
        reply_rate: f64,
        meeting_rate: f64,
        costs: LinkedInCosts,
    },
    #[serde(rename_all = "camelCase")]
    Referrals {
        enabled: bool,
        referrals_per_month: u32,
        conversion_rate: f64,
        costs: ReferralCosts,
    },
}

impl ChannelConfig {
    pub fn kind(&self) -> ChannelKind {
        match self {
            ChannelConfig::ColdCalling { .. } => ChannelKind::ColdCalling,
            ChannelConfig::LinkedIn { .. } => ChannelKind::LinkedIn,
            ChannelConfig::Referrals { .. } => ChannelKind::Referrals,
        }
    }

    pub fn is_enabled(&self) -> bool {
        match self {
            ChannelConfig::ColdCalling { enabled, .. }
            | ChannelConfig::LinkedIn { enabled, .. }
            | ChannelConfig::Referrals { enabled, .. } => *enabled,
        }
    }

    pub fn set_enabled(&mut self, value: bool) {
        match self {
            ChannelConfig::ColdCalling { enabled, .. }
            | ChannelConfig::LinkedIn { enabled, .. }
            | ChannelConfig::Referrals { enabled, .. } => *enabled = value,
        }
    }

    pub fn default_cold_calling() -> Self {
        ChannelConfig::ColdCalling {
            enabled: false,
            calls_per_day: 60,
            connect_rate: 15.0,
            meeting_rate: 10.0,
            costs: ColdCallingCosts { salary: 4500.0, dialer_software: 150.0 },
        }
    }

    pub fn default_linkedin() -> Self {
        ChannelConfig::LinkedIn {
            enabled: false,
            connections_per_day: 20,
            accept_rate: 30.0,
            reply_rate: 15.0,
            meeting_rate: 25.0,
            costs: LinkedInCosts { tool: 100.0, salary: 0.0 },
        }
    }

    pub fn default_referrals() -> Self {
        ChannelConfig::Referrals {
            enabled: false,
            referrals_per_month: 5,
            conversion_rate: 40.0,
            costs: ReferralCosts { program: 200.0, incentive_per_deal: 500.0 },
        }
    }
}

// Exactly one config per optional channel kind. Persisted as the tagged list
// `[{kind: "coldCalling", ..}, ..]`; a list that repeats or omits a kind is
// rejected on load. Entries are only ever swapped for one of the same kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Vec<ChannelConfig>", into = "Vec<ChannelConfig>")]
pub struct ChannelSet {
    cold_calling: ChannelConfig,
    linkedin: ChannelConfig,
    referrals: ChannelConfig,
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self {
            cold_calling: ChannelConfig::default_cold_calling(),
            linkedin: ChannelConfig::default_linkedin(),
            referrals: ChannelConfig::default_referrals(),
        }
    }
}

impl ChannelSet {
    fn slot_mut(&mut self, kind: ChannelKind) -> Option<&mut ChannelConfig> {
        match kind {
            ChannelKind::ColdEmail => None,
            ChannelKind::ColdCalling => Some(&mut self.cold_calling),
            ChannelKind::LinkedIn => Some(&mut self.linkedin),
            ChannelKind::Referrals => Some(&mut self.referrals),
        }
    }

    // None for cold email, which is not an optional channel.
    pub fn get(&self, kind: ChannelKind) -> Option<&ChannelConfig> {
        match kind {
            ChannelKind::ColdEmail => None,
            ChannelKind::ColdCalling => Some(&self.cold_calling),
            ChannelKind::LinkedIn => Some(&self.linkedin),
            ChannelKind::Referrals => Some(&self.referrals),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChannelConfig> {
        [&self.cold_calling, &self.linkedin, &self.referrals].into_iter()
    }

    // Replaces the entry of the same kind and returns the old one.
    pub fn replace(&mut self, config: ChannelConfig) -> ChannelConfig {
        let slot = match &config {
            ChannelConfig::ColdCalling { .. } => &mut self.cold_calling,
            ChannelConfig::LinkedIn { .. } => &mut self.linkedin,
            ChannelConfig::Referrals { .. } => &mut self.referrals,
        };
        std::mem::replace(slot, config)
    }

    // Returns false for cold email, which cannot be switched off.
    pub fn set_enabled(&mut self, kind: ChannelKind, enabled: bool) -> bool {
        match self.slot_mut(kind) {
            Some(channel) => {
                channel.set_enabled(enabled);
                true
            }
            None => false,
        }
    }
}

impl TryFrom<Vec<ChannelConfig>> for ChannelSet {
    type Error = String;

    fn try_from(configs: Vec<ChannelConfig>) -> Result<Self, Self::Error> {
        let mut cold_calling = None;
        let mut linkedin = None;
        let mut referrals = None;
        for config in configs {
            let kind = config.kind();
            let slot = match &config {
                ChannelConfig::ColdCalling { .. } => &mut cold_calling,
                ChannelConfig::LinkedIn { .. } => &mut linkedin,
                ChannelConfig::Referrals { .. } => &mut referrals,
            };
            if slot.replace(config).is_some() {
                return Err(format!("channel '{}' is configured more than once", kind.label()));
            }
        }
        let missing = |kind: ChannelKind| format!("channel '{}' is missing", kind.label());
        Ok(Self {
            cold_calling: cold_calling.ok_or_else(|| missing(ChannelKind::ColdCalling))?,
            linkedin: linkedin.ok_or_else(|| missing(ChannelKind::LinkedIn))?,
            referrals: referrals.ok_or_else(|| missing(ChannelKind::Referrals))?,
        })
    }
}

impl From<ChannelSet> for Vec<ChannelConfig> {
    fn from(set: ChannelSet) -> Self {
        vec![set.cold_calling, set.linkedin, set.referrals]
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CommissionConfig {
    // Percentage of each closed deal's value
    Percentage { rate: f64 },
    // Fixed amount per closed deal
    Flat { amount: f64 },
}

impl Default for CommissionConfig {
    fn default() -> Self {
        CommissionConfig::Percentage { rate: 0.0 }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub enum Jurisdiction {
    #[default]
    Unspecified,
    US,
    UK,
    DE,
    FR,
    CA,
    AU,
    IN,
    Custom(f64),
}

impl Jurisdiction {
    // Flat corporate rate used for the after-tax figure, as a fraction.
    pub fn rate(&self) -> f64 {
        match self {
            Jurisdiction::Unspecified => 0.0,
            Jurisdiction::US => 0.21,
            Jurisdiction::UK => 0.25,
            Jurisdiction::DE => 0.30,
            Jurisdiction::FR => 0.25,
            Jurisdiction::CA => 0.265,
            Jurisdiction::AU => 0.30,
            Jurisdiction::IN => 0.25,
            Jurisdiction::Custom(rate) => *rate,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaxConfig {
    pub enabled: bool,
    pub jurisdiction: Jurisdiction,
}

// One flat record per calculator instance, as persisted between sessions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FunnelInputs {
    pub working_days: u32,
    // Shared by every channel
    pub close_rate: f64,
    // Lifetime value of one closed deal
    pub deal_value: f64,
    pub currency: Currency,
    pub cold_email: ColdEmailConfig,
    pub channels: ChannelSet,
    pub commission: CommissionConfig,
    pub tax: TaxConfig,
}

impl Default for FunnelInputs {
    fn default() -> Self {
        Self {
            working_days: 21,
            close_rate: 20.0,
            deal_value: 5000.0,
            currency: Currency::default(),
            cold_email: ColdEmailConfig::default(),
            channels: ChannelSet::default(),
            commission: CommissionConfig::default(),
            tax: TaxConfig::default(),
        }
    }
}

impl FunnelInputs {
    pub fn channel(&self, kind: ChannelKind) -> Option<&ChannelConfig> {
        self.channels.get(kind)
    }

    // Returns false for cold email, which is always on.
    pub fn set_channel_enabled(&mut self, kind: ChannelKind, enabled: bool) -> bool {
        self.channels.set_enabled(kind, enabled)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunnelStage {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelResult {
    pub channel: ChannelKind,
    // Ordered from initial volume down to deals; empty for a disabled channel
    pub stages: Vec<FunnelStage>,
    pub meetings: u64,
    pub deals: u64,
    pub revenue: f64,
    pub cost: f64,
    pub roi: f64,
}

impl ChannelResult {
    pub fn disabled(channel: ChannelKind) -> Self {
        Self {
            channel,
            stages: Vec::new(),
            meetings: 0,
            deals: 0,
            revenue: 0.0,
            cost: 0.0,
            roi: 0.0,
        }
    }

    pub fn stage(&self, name: &str) -> Option<u64> {
        self.stages.iter().find(|s| s.name == name).map(|s| s.count)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CombinedResult {
    pub total_meetings: u64,
    pub total_deals: u64,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub combined_roi: f64,
    pub combined_cac: f64,
    pub ltv_cac_ratio: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommissionResult {
    pub commission_cost: f64,
    pub net_revenue: f64,
    pub total_cost_with_commission: f64,
    pub roi_with_commission: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaxResult {
    pub tax_amount: f64,
    pub net_income_after_tax: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FunnelReport {
    pub currency: Currency,
    pub channels: Vec<ChannelResult>,
    pub combined: CombinedResult,
    pub commission: CommissionResult,
    pub net_income_before_tax: f64,
    pub tax: TaxResult,
    // Cold-email side metrics that do not feed the funnel
    pub prospects_reached: u64,
    pub delivered: u64,
    pub opens: u64,
    pub unsubscribes: u64,
}

impl FunnelReport {
    pub fn channel(&self, kind: ChannelKind) -> Option<&ChannelResult> {
        self.channels.iter().find(|c| c.channel == kind)
    }

    // Summary stored alongside a saved scenario.
    pub fn scenario_results(&self) -> ScenarioResults {
        let total_cost = self.commission.total_cost_with_commission;
        let payback_months = if self.combined.total_revenue > 0.0 {
            Some(total_cost / self.combined.total_revenue)
        } else {
            None
        };
        ScenarioResults {
            roi: self.commission.roi_with_commission,
            total_cost,
            payback_months,
            total_return: self.tax.net_income_after_tax,
            risk: RiskLevel::from_combined(&self.combined),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    // A run that closes deals at no cost has no CAC to compare against and
    // cannot lose money, so it reads as low risk.
    pub fn from_combined(combined: &CombinedResult) -> Self {
        if combined.total_deals > 0 && combined.total_cost <= 0.0 {
            return RiskLevel::Low;
        }
        RiskLevel::from_ltv_cac(combined.ltv_cac_ratio, combined.total_deals)
    }

    pub fn from_ltv_cac(ratio: f64, deals: u64) -> Self {
        if deals == 0 {
            RiskLevel::High
        } else if ratio >= 3.0 {
            RiskLevel::Low
        } else if ratio >= 1.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum CalculatorType {
    ColdEmailRoi,
    ProcessAutomation,
    EmployeeTraining,
    CacPayback,
    SalesHiring,
}

impl CalculatorType {
    pub fn label(&self) -> &'static str {
        match self {
            CalculatorType::ColdEmailRoi => "Cold Email ROI",
            CalculatorType::ProcessAutomation => "Process Automation",
            CalculatorType::EmployeeTraining => "Employee Training",
            CalculatorType::CacPayback => "CAC Payback",
            CalculatorType::SalesHiring => "Sales Hiring",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            CalculatorType::ColdEmailRoi => "📧",
            CalculatorType::ProcessAutomation => "⚙️",
            CalculatorType::EmployeeTraining => "🎓",
            CalculatorType::CacPayback => "💰",
            CalculatorType::SalesHiring => "🤝",
        }
    }

    // Fixed storage key for the calculator's input snapshot
    pub fn storage_key(&self) -> &'static str {
        match self {
            CalculatorType::ColdEmailRoi => "cold_email_roi",
            CalculatorType::ProcessAutomation => "process_automation",
            CalculatorType::EmployeeTraining => "employee_training",
            CalculatorType::CacPayback => "cac_payback",
            CalculatorType::SalesHiring => "sales_hiring",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResults {
    pub roi: f64,
    pub total_cost: f64,
    // None when the run never earns its cost back
    pub payback_months: Option<f64>,
    pub total_return: f64,
    pub risk: RiskLevel,
}

// Saved snapshot of one calculator run. Immutable once created: the planner
// only reads these and the store only inserts or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    id: Uuid,
    name: String,
    calculator_type: CalculatorType,
    inputs: serde_json::Value,
    results: ScenarioResults,
    created_at: DateTime<Utc>,
}

impl Scenario {
    pub fn new(
        name: impl Into<String>,
        calculator_type: CalculatorType,
        inputs: serde_json::Value,
        results: ScenarioResults,
    ) -> Self {
        Self::with_timestamp(name, calculator_type, inputs, results, Utc::now())
    }

    pub fn with_timestamp(
        name: impl Into<String>,
        calculator_type: CalculatorType,
        inputs: serde_json::Value,
        results: ScenarioResults,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            calculator_type,
            inputs,
            results,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn calculator_type(&self) -> CalculatorType {
        self.calculator_type
    }

    pub fn inputs(&self) -> &serde_json::Value {
        &self.inputs
    }

    pub fn results(&self) -> &ScenarioResults {
        &self.results
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
