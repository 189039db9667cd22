// Ordering and head-to-head comparison of saved scenarios.
use super::{efficiency, score, PlannerWeights};
use serde::Serialize;
use shared::models::Scenario;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankBy {
    // Highest first
    Roi,
    // Shortest first; never paying back sorts last
    Payback,
    // Lowest first
    Risk,
    // Highest return per unit of cost first
    Efficiency,
}

#[derive(Debug, Clone, Serialize)]
pub struct Comparison<'a> {
    pub best_roi: &'a Scenario,
    pub fastest_payback: Option<&'a Scenario>,
    pub lowest_risk: &'a Scenario,
    pub most_efficient: &'a Scenario,
    pub recommended: &'a Scenario,
    pub recommended_score: f64,
    pub reasons: Vec<String>,
}

fn payback_order(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn primary_order(a: &Scenario, b: &Scenario, by: RankBy) -> Ordering {
    let (ra, rb) = (a.results(), b.results());
    match by {
        RankBy::Roi => rb.roi.total_cmp(&ra.roi),
        RankBy::Payback => payback_order(ra.payback_months, rb.payback_months),
        RankBy::Risk => ra.risk.cmp(&rb.risk),
        RankBy::Efficiency => efficiency(rb).total_cmp(&efficiency(ra)),
    }
}

// Ties fall back to creation time, then name, so output is deterministic.
pub fn rank(scenarios: &[Scenario], by: RankBy) -> Vec<&Scenario> {
    let mut ranked: Vec<&Scenario> = scenarios.iter().collect();
    ranked.sort_by(|a, b| {
        primary_order(a, b, by)
            .then_with(|| a.created_at().cmp(&b.created_at()))
            .then_with(|| a.name().cmp(b.name()))
    });
    ranked
}

// None when there is nothing to compare.
pub fn compare<'a>(scenarios: &'a [Scenario], weights: &PlannerWeights) -> Option<Comparison<'a>> {
    let best_roi = *rank(scenarios, RankBy::Roi).first()?;
    let lowest_risk = *rank(scenarios, RankBy::Risk).first()?;
    let most_efficient = *rank(scenarios, RankBy::Efficiency).first()?;
    let fastest_payback = rank(scenarios, RankBy::Payback)
        .into_iter()
        .next()
        .filter(|s| s.results().payback_months.is_some());

    // Earlier scenarios win exact score ties
    let (recommended, recommended_score) = rank(scenarios, RankBy::Roi)
        .into_iter()
        .map(|s| (s, score(s.results(), weights)))
        .fold(None::<(&'a Scenario, f64)>, |best, (s, sc)| match best {
            Some((_, best_score)) if best_score >= sc => best,
            _ => Some((s, sc)),
        })?;

    let mut reasons = Vec::new();
    if recommended.id() == best_roi.id() {
        reasons.push(format!("Highest ROI ({:.1}%)", recommended.results().roi));
    }
    if fastest_payback.map(|s| s.id()) == Some(recommended.id()) {
        if let Some(months) = recommended.results().payback_months {
            reasons.push(format!("Fastest payback ({:.1} months)", months));
        }
    }
    if recommended.id() == lowest_risk.id() {
        reasons.push(format!("Lowest risk ({})", recommended.results().risk.as_str()));
    }
    if recommended.id() == most_efficient.id() {
        reasons.push(format!("Best return per unit of cost ({:.2}x)", efficiency(recommended.results())));
    }
    if reasons.is_empty() {
        reasons.push("Best overall balance of ROI, payback, risk and efficiency".to_string());
    }

    tracing::debug!(
        scenarios = scenarios.len(),
        recommended = %recommended.name(),
        score = recommended_score,
        "Scenario comparison complete"
    );

    Some(Comparison {
        best_roi,
        fastest_payback,
        lowest_risk,
        most_efficient,
        recommended,
        recommended_score,
        reasons,
    })
}
