// Plain-text rendering for the command line. JSON output is the serde form
// of the same records.
use crate::planner::{efficiency, Comparison, PortfolioSummary};
use crate::validation::MissingField;
use shared::models::{Currency, FunnelReport, Scenario};
use shared::utils::{format_currency, format_percent, format_ratio};

pub fn render_report(report: &FunnelReport, missing: &[MissingField]) -> String {
    let cur = report.currency;
    let mut out = String::new();

    if !missing.is_empty() {
        out.push_str("Required fields missing:\n");
        for m in missing {
            out.push_str(&format!("  - {}: {}\n", m.field, m.message));
        }
        out.push('\n');
    }

    for channel in &report.channels {
        if channel.stages.is_empty() {
            out.push_str(&format!("{} (disabled)\n", channel.channel.label()));
            continue;
        }
        let funnel: Vec<String> = channel.stages.iter().map(|s| format!("{} {}", s.count, s.name)).collect();
        out.push_str(&format!("{}\n", channel.channel.label()));
        out.push_str(&format!("  {}\n", funnel.join(" -> ")));
        out.push_str(&format!(
            "  revenue {}  cost {}  ROI {}\n",
            format_currency(channel.revenue, cur),
            format_currency(channel.cost, cur),
            format_percent(channel.roi)
        ));
    }

    let c = &report.combined;
    out.push_str("\nCombined\n");
    out.push_str(&format!("  meetings {}  deals {}\n", c.total_meetings, c.total_deals));
    out.push_str(&format!(
        "  revenue {}  cost {}\n",
        format_currency(c.total_revenue, cur),
        format_currency(c.total_cost, cur)
    ));
    out.push_str(&format!(
        "  ROI {}  CAC {}  LTV:CAC {}\n",
        format_percent(c.combined_roi),
        format_currency(c.combined_cac, cur),
        format_ratio(c.ltv_cac_ratio)
    ));

    let commission = &report.commission;
    if commission.commission_cost > 0.0 {
        out.push_str(&format!(
            "  commission {}  ROI after commission {}\n",
            format_currency(commission.commission_cost, cur),
            format_percent(commission.roi_with_commission)
        ));
    }
    out.push_str(&format!("  net income before tax {}\n", format_currency(report.net_income_before_tax, cur)));
    if report.tax.tax_amount > 0.0 {
        out.push_str(&format!("  tax {}\n", format_currency(report.tax.tax_amount, cur)));
    }
    out.push_str(&format!("  net income after tax {}\n", format_currency(report.tax.net_income_after_tax, cur)));
    out.push_str(&format!(
        "  delivered {}  opens {}  unsubscribes {}  prospects reached {}\n",
        report.delivered, report.opens, report.unsubscribes, report.prospects_reached
    ));
    out
}

fn scenario_line(scenario: &Scenario, currency: Currency) -> String {
    let r = scenario.results();
    let payback = r
        .payback_months
        .map(|m| format!("{:.1} mo", m))
        .unwrap_or_else(|| "never".to_string());
    format!(
        "{} {} [{}] {}  ROI {}  cost {}  return {}  payback {}  risk {}  efficiency {:.2}x  ({})",
        scenario.calculator_type().icon(),
        scenario.name(),
        scenario.calculator_type().label(),
        scenario.id(),
        format_percent(r.roi),
        format_currency(r.total_cost, currency),
        format_currency(r.total_return, currency),
        payback,
        r.risk.as_str(),
        efficiency(r),
        scenario.created_at().format("%Y-%m-%d %H:%M"),
    )
}

pub fn render_scenarios(scenarios: &[&Scenario], currency: Currency) -> String {
    if scenarios.is_empty() {
        return "No saved scenarios.\n".to_string();
    }
    scenarios
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{:>3}. {}\n", i + 1, scenario_line(s, currency)))
        .collect()
}

pub fn render_comparison(comparison: &Comparison<'_>, summary: &PortfolioSummary, currency: Currency) -> String {
    let mut out = format!(
        "{} scenarios  average ROI {}  invested {}  returned {}\n",
        summary.count,
        format_percent(summary.average_roi),
        format_currency(summary.total_investment, currency),
        format_currency(summary.total_return, currency)
    );
    let fastest = comparison.fastest_payback.map(|s| s.name()).unwrap_or("none");
    out.push_str(&format!("Best ROI:        {}\n", comparison.best_roi.name()));
    out.push_str(&format!("Fastest payback: {}\n", fastest));
    out.push_str(&format!("Lowest risk:     {}\n", comparison.lowest_risk.name()));
    out.push_str(&format!("Most efficient:  {}\n", comparison.most_efficient.name()));
    out.push_str(&format!(
        "Recommended:     {} (score {:.3})\n",
        comparison.recommended.name(),
        comparison.recommended_score
    ));
    for reason in &comparison.reasons {
        out.push_str(&format!("  - {}\n", reason));
    }
    out
}
