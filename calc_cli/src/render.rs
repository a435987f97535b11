//! Human-readable output for calculation results.

use calc_core::calculations::elapsed::ElapsedResult;
use calc_core::calculations::savings_goal::MAX_MONTHS;
use calc_core::calculations::CalculationOutput;
use calc_core::catalog::CatalogEntry;
use calc_core::chart::{self, ChartSeries};
use calc_core::format::{format_currency, format_fixed, format_number, format_percent};
use calc_core::temperature::OvenChartRow;
use calc_core::units::{Quantity, UnitDefinition};
use calc_core::Settings;

const RULE_WIDTH: usize = 44;

fn rule() {
    println!("{}", "─".repeat(RULE_WIDTH));
}

fn row(label: &str, value: impl AsRef<str>) {
    println!("  {:<22} {:>18}", label, value.as_ref());
}

/// Text bar chart, scaled to the largest point
fn bars(series: &ChartSeries, settings: &Settings) {
    const WIDTH: f64 = 24.0;
    let Some(max) = series.max_value().filter(|m| *m > 0.0) else {
        return;
    };
    println!();
    println!("  {} ({})", series.label, series.kind);
    for point in &series.points {
        let len = (point.value / max * WIDTH).round().max(0.0) as usize;
        println!(
            "  {:<10} {:<24} {}",
            point.label,
            "█".repeat(len),
            format_currency(point.value, &settings.currency_symbol)
        );
    }
}

pub fn elapsed_line(result: &ElapsedResult) -> String {
    let direction = if result.in_future { "until" } else { "since" };
    format!(
        "{} ({}y {}m {}d) {direction}",
        result.clock(),
        result.calendar_years,
        result.calendar_months,
        result.calendar_days
    )
}

pub fn output(output: &CalculationOutput, settings: &Settings) {
    let money = |v: f64| format_currency(v, &settings.currency_symbol);
    let places = settings.decimal_places;

    match output {
        CalculationOutput::Conversion(c) => {
            println!(
                "{} {} = {}",
                format_number(c.value, places),
                c.from.display_label,
                c.display
            );
        }
        CalculationOutput::Temperature(t) => {
            println!(
                "{} {} = {} {}",
                format_fixed(t.value, places),
                t.from.symbol(),
                format_fixed(t.converted, places),
                t.to.symbol()
            );
        }
        CalculationOutput::SimpleInterest(r) => {
            row("Interest", money(r.interest));
            row("Total", money(r.total));
        }
        CalculationOutput::CompoundInterest(r) => {
            println!("  {:>4} {:>14} {:>12} {:>14}", "Year", "Deposits", "Interest", "Balance");
            rule();
            for y in &r.breakdown {
                println!(
                    "  {:>4} {:>14} {:>12} {:>14}",
                    y.year,
                    money(y.total_deposits),
                    money(y.interest_this_year),
                    money(y.balance)
                );
            }
            rule();
            row("Final balance", money(r.final_balance));
            row("Total interest", money(r.total_interest));
            row("APY", format_percent(r.apy, 3));
            if let Some(balance) = chart::compound_growth(r).first() {
                bars(balance, settings);
            }
        }
        CalculationOutput::Loan(r) => {
            row("Payment", money(r.payment));
            row("Payments", r.payment_count.to_string());
            row("Total paid", money(r.total_paid));
            row("Total interest", money(r.total_interest));
            println!();
            println!("  {:>4} {:>14} {:>12} {:>14}", "Year", "Principal", "Interest", "Balance");
            rule();
            for y in &r.schedule {
                println!(
                    "  {:>4} {:>14} {:>12} {:>14}",
                    y.year,
                    money(y.principal_paid),
                    money(y.interest_paid),
                    money(y.ending_balance)
                );
            }
            bars(&chart::loan_totals(r), settings);
        }
        CalculationOutput::Irr(r) => {
            row("IRR", format_percent(r.irr, places));
            row("Iterations", r.iterations.to_string());
            row("Total inflow", money(r.total_inflow));
            row("Total outflow", money(r.total_outflow));
            row("Net cash flow", money(r.net_cash_flow));
        }
        CalculationOutput::SavingsGoal(r) => {
            let (years, months) = r.years_and_months();
            if r.reached {
                row("Time to goal", format!("{years}y {months}m"));
            } else {
                row("Time to goal", format!("not reached in {} years", MAX_MONTHS / 12));
            }
            row("Final balance", money(r.final_balance));
            row("Contributions", money(r.total_contributions));
            row("Interest earned", money(r.total_interest));
            bars(&chart::savings_trajectory(r), settings);
        }
        CalculationOutput::Bmi(r) => {
            row("BMI", format_fixed(r.bmi, 1));
            row("Category", r.category.display_name());
            row(
                "Healthy weight",
                format!(
                    "{}–{} kg",
                    format_fixed(r.healthy_weight_min_kg, 1),
                    format_fixed(r.healthy_weight_max_kg, 1)
                ),
            );
        }
        CalculationOutput::Whr(r) => {
            row("Waist-to-hip ratio", format_fixed(r.ratio, 2));
            row("Risk", r.risk.display_name());
        }
        CalculationOutput::EnergyCost(r) => {
            row("Power", format!("{} W", format_number(r.watts, 0)));
            row("Energy per day", format!("{} kWh", format_fixed(r.kwh_per_day, 3)));
            bars(&chart::energy_cost(r), settings);
        }
        CalculationOutput::Percentage(r) => match r.ratio {
            Some((a, b)) => println!("{}:{}", format_number(a, 0), format_number(b, 0)),
            None => println!("{}", format_number(r.value, places)),
        },
        CalculationOutput::Elapsed(r) => println!("{}", elapsed_line(r)),
    }
}

pub fn unit_table(quantity: Quantity, defs: &[UnitDefinition]) {
    println!("{} units", quantity.display_name());
    rule();
    for def in defs {
        println!("  {:<10} {:<28} {}", def.display_label, def.full_name, def.factor);
    }
}

pub fn oven_chart(rows: &[OvenChartRow]) {
    println!("  {:>8} {:>6} {:>6} {:>6}", "Gas mark", "°F", "°C", "Fan °C");
    rule();
    for r in rows {
        println!(
            "  {:>8} {:>6.0} {:>6.0} {:>6.0}",
            r.gas_mark.label(),
            r.fahrenheit,
            r.celsius,
            r.fan_celsius
        );
    }
}

pub fn catalog<'a>(entries: impl Iterator<Item = &'a CatalogEntry>) {
    for entry in entries {
        println!("  {:<20} {:<32} {}", entry.id, entry.name, entry.category);
    }
}
