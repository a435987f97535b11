//! # Tally CLI Application
//!
//! Terminal front-end for the `calc_core` calculators. Every subcommand builds
//! the same JSON-serializable request a web front-end would send, runs it, and
//! prints either a readable summary or (with `--json`) the raw result.

mod render;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use calc_core::calculations::bmi::{BmiInput, BodyMeasurements};
use calc_core::calculations::elapsed::{self, ElapsedInput};
use calc_core::calculations::energy_cost::{Appliance, EnergyCostInput};
use calc_core::calculations::interest::{CompoundInterestInput, Compounding, SimpleInterestInput};
use calc_core::calculations::irr::IrrInput;
use calc_core::calculations::loan::LoanInput;
use calc_core::calculations::percentage::{PercentageInput, PercentageOp};
use calc_core::calculations::savings_goal::SavingsGoalInput;
use calc_core::calculations::whr::{Sex, WhrInput};
use calc_core::calculations::{ConversionInput, TemperatureInput};
use calc_core::density::{mass_to_volume, volume_to_mass, Ingredient};
use calc_core::format::format_with_unit;
use calc_core::input::{normalize, parse_or_zero};
use calc_core::temperature::{celsius_to_gas_mark, fan_oven_celsius, oven_chart, GasMark, TemperatureScale};
use calc_core::ticker::{Ticker, ONE_SECOND};
use calc_core::units::{MassUnit, Quantity, UnitFamily, VolumeUnit};
use calc_core::{calculate_item, catalog, CalcError, CalcResult, CalculationItem, CalculationOutput, Settings};

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Unit converters and everyday money and health calculators")]
#[command(version)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Path to a settings JSON file
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a value between units of one quantity
    Convert {
        /// Quantity (length, area, volume, mass, speed, time, data, energy, power, pressure, butter)
        quantity: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
        from: String,
        to: String,
        /// Decimal places in the display string
        #[arg(short, long)]
        precision: Option<usize>,
    },

    /// List the units of a quantity
    Units {
        quantity: String,
    },

    /// Convert a temperature between scales
    Temp {
        #[arg(allow_hyphen_values = true)]
        value: String,
        from: String,
        to: String,
    },

    /// Gas mark / oven temperature chart, or a single lookup
    Oven {
        /// Gas mark (e.g., "4", "1/2") to convert
        #[arg(long, conflicts_with = "celsius")]
        mark: Option<String>,

        /// Conventional oven temperature in °C to convert to a gas mark
        #[arg(long)]
        celsius: Option<String>,
    },

    /// Convert an ingredient between volume and mass
    Density {
        ingredient: String,
        value: String,
        from: String,
        to: String,
    },

    /// Body mass index
    Bmi {
        /// Weight (kg, or lb with --imperial)
        weight: String,
        /// Height (cm, or feet with --imperial)
        height: String,
        /// Extra inches with --imperial
        #[arg(long, default_value = "0")]
        inches: String,
        #[arg(long)]
        imperial: bool,
    },

    /// Waist-to-hip ratio
    Whr {
        waist: String,
        hip: String,
        /// male or female
        #[arg(long, default_value = "female")]
        sex: String,
    },

    /// Compound interest with optional yearly contribution
    Interest {
        principal: String,
        /// Annual rate in percent
        rate: String,
        years: u32,
        #[arg(short, long, default_value = "monthly")]
        compounding: String,
        #[arg(long, default_value = "0")]
        contribution: String,
    },

    /// Simple interest
    Simple {
        principal: String,
        rate: String,
        years: String,
    },

    /// Loan payment and amortization
    Loan {
        principal: String,
        rate: String,
        years: u32,
        #[arg(long, default_value_t = 12)]
        payments_per_year: u32,
    },

    /// Internal rate of return of yearly cash flows (year 0 first)
    Irr {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        flows: Vec<String>,
    },

    /// Months to reach a savings target
    Savings {
        target: String,
        monthly: String,
        #[arg(long, default_value = "0")]
        initial: String,
        #[arg(long, default_value = "0")]
        rate: String,
    },

    /// Appliance running cost
    Energy {
        /// Appliance name (e.g., "space heater")
        appliance: String,
        hours_per_day: String,
        price_per_kwh: String,
        /// Measured wattage instead of the typical value
        #[arg(long)]
        watts: Option<String>,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },

    /// Percent-of, what-percent, change, or ratio
    Percent {
        /// of | what | change | ratio
        operation: String,
        #[arg(allow_hyphen_values = true)]
        a: String,
        #[arg(allow_hyphen_values = true)]
        b: String,
    },

    /// Time elapsed since a date (YYYY-MM-DD or RFC 3339)
    Elapsed {
        since: String,
        /// Refresh every second until Enter is pressed
        #[arg(short, long)]
        watch: bool,
    },

    /// List calculators
    List,

    /// Search calculators by keyword
    Search {
        query: String,
    },

    /// Run a JSON calculation request (file path, or "-" for stdin)
    Eval {
        #[arg(default_value = "-")]
        input: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Parse a numeric argument through the same normalizer the input fields use.
fn number(field: &str, raw: &str, allow_negative: bool) -> Result<f64> {
    let text = normalize(raw.trim(), allow_negative).ok_or_else(|| {
        CalcError::invalid_input(field, raw, "Not a valid number")
    })?;
    Ok(parse_or_zero(&text))
}

fn parse_quantity(s: &str) -> Result<Quantity> {
    let wanted = s.trim().to_lowercase();
    Quantity::ALL
        .iter()
        .copied()
        .find(|q| {
            let name = q.display_name().to_lowercase();
            name == wanted || name.split_whitespace().next() == Some(wanted.as_str())
        })
        .ok_or_else(|| CalcError::invalid_input("quantity", s, "Unknown quantity").into())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => Settings::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Settings::default(),
    };
    let signed = settings.allow_negative;

    let item = match cli.command {
        Commands::Convert {
            quantity,
            value,
            from,
            to,
            precision,
        } => CalculationItem::Conversion(ConversionInput {
            label: String::new(),
            quantity: parse_quantity(&quantity)?,
            value: number("value", &value, signed)?,
            from,
            to,
            precision: precision.unwrap_or(settings.decimal_places),
        }),

        Commands::Temp { value, from, to } => CalculationItem::Temperature(TemperatureInput {
            label: String::new(),
            value: number("value", &value, true)?,
            from: TemperatureScale::from_str_flexible(&from)?,
            to: TemperatureScale::from_str_flexible(&to)?,
        }),

        Commands::Simple { principal, rate, years } => CalculationItem::SimpleInterest(SimpleInterestInput {
            label: String::new(),
            principal: number("principal", &principal, false)?,
            annual_rate_percent: number("rate", &rate, false)?,
            years: number("years", &years, false)?,
        }),

        Commands::Interest {
            principal,
            rate,
            years,
            compounding,
            contribution,
        } => CalculationItem::CompoundInterest(CompoundInterestInput {
            label: String::new(),
            principal: number("principal", &principal, false)?,
            annual_rate_percent: number("rate", &rate, false)?,
            years,
            compounding: Compounding::from_str_flexible(&compounding)?,
            annual_contribution: number("contribution", &contribution, false)?,
        }),

        Commands::Loan {
            principal,
            rate,
            years,
            payments_per_year,
        } => CalculationItem::Loan(LoanInput {
            label: String::new(),
            principal: number("principal", &principal, false)?,
            annual_rate_percent: number("rate", &rate, false)?,
            term_years: years,
            payments_per_year,
        }),

        Commands::Irr { flows } => CalculationItem::Irr(IrrInput {
            label: String::new(),
            cash_flows: flows
                .iter()
                .flat_map(|f| f.split(','))
                .filter(|f| !f.trim().is_empty())
                .map(|f| number("cash_flows", f, true))
                .collect::<Result<_>>()?,
        }),

        Commands::Savings {
            target,
            monthly,
            initial,
            rate,
        } => CalculationItem::SavingsGoal(SavingsGoalInput {
            label: String::new(),
            target: number("target", &target, false)?,
            initial_balance: number("initial", &initial, false)?,
            monthly_contribution: number("monthly", &monthly, false)?,
            annual_rate_percent: number("rate", &rate, false)?,
        }),

        Commands::Bmi {
            weight,
            height,
            inches,
            imperial,
        } => {
            let measurements = if imperial {
                BodyMeasurements::Imperial {
                    weight_lb: number("weight", &weight, false)?,
                    height_ft: number("height", &height, false)?,
                    height_in: number("inches", &inches, false)?,
                }
            } else {
                BodyMeasurements::Metric {
                    weight_kg: number("weight", &weight, false)?,
                    height_cm: number("height", &height, false)?,
                }
            };
            CalculationItem::Bmi(BmiInput {
                label: String::new(),
                measurements,
            })
        }

        Commands::Whr { waist, hip, sex } => CalculationItem::Whr(WhrInput {
            label: String::new(),
            waist: number("waist", &waist, false)?,
            hip: number("hip", &hip, false)?,
            sex: Sex::from_str_flexible(&sex)?,
        }),

        Commands::Energy {
            appliance,
            hours_per_day,
            price_per_kwh,
            watts,
            quantity,
        } => CalculationItem::EnergyCost(EnergyCostInput {
            label: String::new(),
            appliance: Appliance::from_str_flexible(&appliance)?,
            watts_override: watts.map(|w| number("watts", &w, false)).transpose()?,
            hours_per_day: number("hours_per_day", &hours_per_day, false)?,
            price_per_kwh: number("price_per_kwh", &price_per_kwh, false)?,
            quantity,
        }),

        Commands::Percent { operation, a, b } => CalculationItem::Percentage(PercentageInput {
            label: String::new(),
            operation: PercentageOp::from_str_flexible(&operation)?,
            a: number("a", &a, true)?,
            b: number("b", &b, true)?,
        }),

        Commands::Elapsed { since, watch } => {
            let since = elapsed::parse_since(&since)?;
            if watch && !cli.json {
                return watch_elapsed(since);
            }
            CalculationItem::Elapsed(ElapsedInput {
                label: String::new(),
                since,
            })
        }

        Commands::Eval { input } => {
            let json = if input == "-" {
                io::read_to_string(io::stdin()).context("reading stdin")?
            } else {
                std::fs::read_to_string(&input).with_context(|| format!("reading {input}"))?
            };
            serde_json::from_str::<CalculationItem>(&json).map_err(|e| CalcError::SerializationError {
                reason: format!("Invalid calculation request: {e}"),
            })?
        }

        Commands::Units { quantity } => {
            let quantity = parse_quantity(&quantity)?;
            let defs = quantity.definitions();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&defs)?);
            } else {
                render::unit_table(quantity, &defs);
            }
            return Ok(());
        }

        Commands::Oven { mark, celsius } => return oven(mark, celsius, cli.json),

        Commands::Density {
            ingredient,
            value,
            from,
            to,
        } => return density(&ingredient, number("value", &value, false)?, &from, &to, &settings),

        Commands::List => {
            let entries = catalog::entries();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(entries)?);
            } else {
                render::catalog(entries.iter());
            }
            return Ok(());
        }

        Commands::Search { query } => {
            let hits = catalog::search(&query);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else if hits.is_empty() {
                println!("No calculators match '{query}'.");
            } else {
                render::catalog(hits.into_iter());
            }
            return Ok(());
        }
    };

    if !report(calculate_item(&item), cli.json, &settings)? {
        // The JSON error is already on stderr; anyhow would print it again.
        std::process::exit(1);
    }
    Ok(())
}

/// Print a calculation outcome. Returns `Ok(false)` when a failure was
/// reported as JSON and the process should exit non-zero without more output.
fn report(outcome: CalcResult<CalculationOutput>, json: bool, settings: &Settings) -> Result<bool> {
    match outcome {
        Ok(output) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                render::output(&output, settings);
            }
            Ok(true)
        }
        Err(e) if json => {
            eprintln!("{}", error_json(&e)?);
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

fn error_json(error: &CalcError) -> serde_json::Result<String> {
    serde_json::to_string_pretty(error)
}

fn oven(mark: Option<String>, celsius: Option<String>, json: bool) -> Result<()> {
    if let Some(mark) = mark {
        let mark = GasMark::from_str_flexible(&mark)?;
        if json {
            let row = oven_chart().into_iter().find(|row| row.gas_mark == mark);
            println!("{}", serde_json::to_string_pretty(&row)?);
        } else {
            println!(
                "Gas mark {} = {:.0} °F = {:.0} °C (fan {:.0} °C)",
                mark.label(),
                mark.fahrenheit(),
                mark.celsius(),
                fan_oven_celsius(mark.celsius())
            );
        }
        return Ok(());
    }

    if let Some(celsius) = celsius {
        let value = number("celsius", &celsius, false)?;
        match celsius_to_gas_mark(value) {
            Some(mark) if json => println!("{}", serde_json::to_string(&mark)?),
            Some(mark) => println!("{value:.0} °C ≈ gas mark {}", mark.label()),
            None => bail!("{value} °C is outside the gas mark range"),
        }
        return Ok(());
    }

    let chart = oven_chart();
    if json {
        println!("{}", serde_json::to_string_pretty(&chart)?);
    } else {
        render::oven_chart(&chart);
    }
    Ok(())
}

fn density(ingredient: &str, value: f64, from: &str, to: &str, settings: &Settings) -> Result<()> {
    let ingredient = Ingredient::from_str_flexible(ingredient)?;
    let places = settings.decimal_places;

    let line = match (VolumeUnit::from_str_flexible(from), MassUnit::from_str_flexible(to)) {
        (Ok(volume), Ok(mass)) => {
            let grams = volume_to_mass(value, volume, mass, ingredient);
            format!(
                "{} of {} = {}",
                format_with_unit(value, places, volume.symbol()),
                ingredient.display_name().to_lowercase(),
                format_with_unit(grams, places, mass.symbol())
            )
        }
        _ => {
            let mass = MassUnit::from_str_flexible(from)?;
            let volume = VolumeUnit::from_str_flexible(to)?;
            let amount = mass_to_volume(value, mass, volume, ingredient);
            format!(
                "{} of {} = {}",
                format_with_unit(value, places, mass.symbol()),
                ingredient.display_name().to_lowercase(),
                format_with_unit(amount, places, volume.symbol())
            )
        }
    };
    println!("{line}");
    Ok(())
}

/// Redraw the elapsed time once per second until Enter (or EOF) on stdin.
fn watch_elapsed(since: chrono::DateTime<Utc>) -> Result<()> {
    let draw = move || {
        let result = elapsed::elapsed_between(since, Utc::now());
        let mut out = io::stdout().lock();
        let _ = write!(out, "\r{}  ", render::elapsed_line(&result));
        let _ = out.flush();
    };
    draw();

    let ticks = Arc::new(Mutex::new(0u64));
    let counter = Arc::clone(&ticks);
    let ticker = Ticker::start(ONE_SECOND, move || {
        draw();
        if let Ok(mut n) = counter.lock() {
            *n += 1;
        }
    });

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("waiting for Enter")?;
    ticker.stop();

    let total = ticks.lock().map(|n| *n).unwrap_or(0);
    tracing::debug!(ticks = total, "elapsed watch finished");
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_failure_is_reported_once() {
        let settings = Settings::default();
        let failure = || Err(CalcError::undefined("BMI", "height is zero"));

        // JSON mode prints the error itself and only asks for a failing exit
        assert!(!report(failure(), true, &settings).unwrap());

        // Text mode hands the error to anyhow for its single report
        let err = report(failure(), false, &settings).unwrap_err();
        assert!(err.to_string().contains("height is zero"));
    }

    #[test]
    fn test_error_json_shape() {
        let json = error_json(&CalcError::unknown_unit("length", "cubit")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "UnknownUnit");
        assert_eq!(value["details"]["unit"], "cubit");
    }

    #[test]
    fn test_success_reports_true() {
        let item = CalculationItem::Percentage(PercentageInput {
            label: String::new(),
            operation: PercentageOp::Ratio,
            a: 1920.0,
            b: 1080.0,
        });
        assert!(report(calculate_item(&item), true, &Settings::default()).unwrap());
    }
}
