// Scenario planner: compares saved runs from any calculator. It only reads
// the summary results; `calculator_type` is used for display, never for math.
pub mod ranking;

pub use ranking::{compare, rank, Comparison, RankBy};

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use shared::models::{CalculatorType, FunnelInputs, FunnelReport, RiskLevel, Scenario, ScenarioResults};

// Weights for the recommendation score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerWeights {
    pub roi: f64,
    pub efficiency: f64,
    pub payback: f64,
    pub risk: f64,
}

impl Default for PlannerWeights {
    fn default() -> Self {
        PlannerWeights {
            roi: 0.4,
            efficiency: 0.3,
            payback: 0.2,
            risk: 0.1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub count: usize,
    pub average_roi: f64,
    pub total_investment: f64,
    pub total_return: f64,
}

// Return per unit of cost; 0 when nothing was spent.
pub fn efficiency(results: &ScenarioResults) -> f64 {
    if results.total_cost > 0.0 {
        results.total_return / results.total_cost
    } else {
        0.0
    }
}

fn risk_score(risk: RiskLevel) -> f64 {
    match risk {
        RiskLevel::Low => 1.0,
        RiskLevel::Medium => 0.5,
        RiskLevel::High => 0.0,
    }
}

// Faster payback scores closer to 1; never paying back scores 0.
fn payback_score(payback_months: Option<f64>) -> f64 {
    match payback_months {
        Some(months) if months >= 0.0 => 1.0 / (1.0 + months),
        _ => 0.0,
    }
}

pub fn score(results: &ScenarioResults, weights: &PlannerWeights) -> f64 {
    weights.roi * (results.roi / 100.0)
        + weights.efficiency * efficiency(results)
        + weights.payback * payback_score(results.payback_months)
        + weights.risk * risk_score(results.risk)
}

pub fn summarize(scenarios: &[Scenario]) -> PortfolioSummary {
    if scenarios.is_empty() {
        return PortfolioSummary::default();
    }
    let count = scenarios.len();
    let roi_sum: f64 = scenarios.iter().map(|s| s.results().roi).sum();
    PortfolioSummary {
        count,
        average_roi: roi_sum / count as f64,
        total_investment: scenarios.iter().map(|s| s.results().total_cost).sum(),
        total_return: scenarios.iter().map(|s| s.results().total_return).sum(),
    }
}

// Snapshot of a funnel run, ready to hand to a `ScenarioStore`.
pub fn scenario_from_report(name: &str, inputs: &FunnelInputs, report: &FunnelReport) -> Result<Scenario, EngineError> {
    Ok(Scenario::new(
        name,
        CalculatorType::ColdEmailRoi,
        serde_json::to_value(inputs)?,
        report.scenario_results(),
    ))
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{TimeZone, Utc};
    use shared::models::{CalculatorType, RiskLevel, Scenario, ScenarioResults};

    pub fn scenario(
        name: &str,
        roi: f64,
        total_cost: f64,
        total_return: f64,
        payback_months: Option<f64>,
        risk: RiskLevel,
        minute: u32,
    ) -> Scenario {
        let results = ScenarioResults { roi, total_cost, payback_months, total_return, risk };
        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 9, minute, 0).unwrap();
        Scenario::with_timestamp(name, CalculatorType::ColdEmailRoi, serde_json::json!({}), results, created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::scenario;
    use super::*;

    #[test]
    fn test_summarize() {
        let scenarios = vec![
            scenario("a", 100.0, 1000.0, 1000.0, Some(1.0), RiskLevel::Low, 0),
            scenario("b", -50.0, 3000.0, -1500.0, None, RiskLevel::High, 1),
        ];
        let summary = summarize(&scenarios);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.average_roi, 25.0);
        assert_eq!(summary.total_investment, 4000.0);
        assert_eq!(summary.total_return, -500.0);
    }

    #[test]
    fn test_scenario_from_report() {
        use crate::funnel::{compute, ModelOptions};
        let inputs = FunnelInputs::default();
        let report = compute(&inputs, &ModelOptions::default());
        let saved = scenario_from_report("baseline", &inputs, &report).unwrap();
        assert_eq!(saved.name(), "baseline");
        assert_eq!(saved.calculator_type(), CalculatorType::ColdEmailRoi);
        assert_eq!(saved.results(), &report.scenario_results());
        let restored: FunnelInputs = serde_json::from_value(saved.inputs().clone()).unwrap();
        assert_eq!(restored, inputs);
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), PortfolioSummary::default());
    }

    #[test]
    fn test_efficiency_guards_zero_cost() {
        let free = scenario("free", 0.0, 0.0, 500.0, None, RiskLevel::Low, 0);
        assert_eq!(efficiency(free.results()), 0.0);
        let paid = scenario("paid", 0.0, 200.0, 500.0, None, RiskLevel::Low, 0);
        assert_eq!(efficiency(paid.results()), 2.5);
    }

    #[test]
    fn test_score_components() {
        let weights = PlannerWeights::default();
        let s = scenario("s", 100.0, 100.0, 200.0, Some(1.0), RiskLevel::Medium, 0);
        // 0.4 * 1.0 + 0.3 * 2.0 + 0.2 * 0.5 + 0.1 * 0.5
        assert!((score(s.results(), &weights) - 1.15).abs() < 1e-9);
    }
}
