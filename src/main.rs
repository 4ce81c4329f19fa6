use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use ai_roi_engine::assessment::sample::sample_assessment;
use ai_roi_engine::assessment::{run_assessment, AssessmentInput, AssessmentOptions};
use ai_roi_engine::benefit::{calculate_benefits, calculate_benefits_with_trace, BenefitInputs};
use ai_roi_engine::config::{Config, ConfigOverrides};
use ai_roi_engine::format::{clamp_input, format_currency, parse_currency_string};
use ai_roi_engine::output::csv::{assessment_to_csv, projection_to_csv};
use ai_roi_engine::output::json::render_json;
use ai_roi_engine::output::table::{
    render_assessment_table, render_benefit_table, render_clamp_table, render_projection_table,
    render_readiness_table,
};
use ai_roi_engine::projection::{project, ProjectionInputs};
use ai_roi_engine::readiness::{assess_readiness, ReadinessInputs};
use ai_roi_engine::scenario::{apply_scenario, ScenarioKind};
use ai_roi_engine::server::run_server;
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "ai-roi",
    about = "Deterministic business-case calculations for AI use cases"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[arg(short, long, global = true)]
    scenario: Option<ScenarioKind>,
    #[arg(long = "discount-rate")]
    discount_rate: Option<f64>,
    #[arg(long)]
    years: Option<u32>,
    #[arg(long = "scale-to-guardrail")]
    scale_to_guardrail: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Args, Clone)]
struct BenefitArgs {
    #[arg(long = "hours-saved", default_value_t = 0.0)]
    hours_saved: f64,
    #[arg(long = "hourly-rate", default_value_t = 0.0)]
    loaded_hourly_rate: f64,
    #[arg(long = "loading-factor", default_value_t = 1.0)]
    benefits_loading_factor: f64,
    #[arg(long = "adoption", default_value_t = 0.0)]
    adoption_rate: f64,
    #[arg(long = "data-maturity", default_value_t = 1.0)]
    data_maturity_multiplier: f64,
    #[arg(long = "revenue-uplift", default_value_t = 0.0)]
    revenue_uplift_pct: f64,
    #[arg(long = "revenue-at-risk", default_value_t = 0.0)]
    revenue_at_risk: f64,
    #[arg(long = "realization")]
    realization_factor: Option<f64>,
    #[arg(long = "risk-reduction", default_value_t = 0.0)]
    risk_reduction_pct: f64,
    #[arg(long = "risk-exposure", default_value_t = 0.0)]
    risk_exposure: f64,
    #[arg(long = "annual-revenue", default_value_t = 0.0)]
    annual_revenue: f64,
    #[arg(long = "days-improved", default_value_t = 0.0)]
    days_improved: f64,
    #[arg(long = "cost-of-capital", default_value_t = 0.0)]
    cost_of_capital: f64,
}

impl From<BenefitArgs> for BenefitInputs {
    fn from(value: BenefitArgs) -> Self {
        Self {
            hours_saved: value.hours_saved,
            loaded_hourly_rate: value.loaded_hourly_rate,
            benefits_loading_factor: value.benefits_loading_factor,
            adoption_rate: value.adoption_rate,
            data_maturity_multiplier: value.data_maturity_multiplier,
            revenue_uplift_pct: value.revenue_uplift_pct,
            revenue_at_risk: value.revenue_at_risk,
            realization_factor: value.realization_factor,
            risk_reduction_pct: value.risk_reduction_pct,
            risk_exposure: value.risk_exposure,
            annual_revenue: value.annual_revenue,
            days_improved: value.days_improved,
            cost_of_capital: value.cost_of_capital,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    Assess {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    Benefit {
        #[command(flatten)]
        inputs: BenefitArgs,
        #[arg(long, default_value_t = 1.0)]
        probability: f64,
        #[arg(long)]
        trace: bool,
    },
    Readiness {
        #[arg(long, default_value_t = 5)]
        data: u8,
        #[arg(long, default_value_t = 5)]
        tech: u8,
        #[arg(long, default_value_t = 5)]
        org: u8,
        #[arg(long, default_value_t = 5)]
        governance: u8,
        #[arg(long, default_value_t = 0.0)]
        runs: f64,
        #[arg(long = "input-tokens", default_value_t = 0.0)]
        input_tokens: f64,
        #[arg(long = "output-tokens", default_value_t = 0.0)]
        output_tokens: f64,
    },
    Project {
        #[arg(long = "annual-benefit")]
        annual_benefit: f64,
        #[arg(long)]
        investment: Option<f64>,
    },
    Currency {
        #[command(subcommand)]
        action: CurrencyCommand,
    },
    /// Clamp `field=value` pairs to their accepted range.
    Clamp {
        #[arg(required = true)]
        values: Vec<String>,
    },
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[derive(Debug, Subcommand)]
enum CurrencyCommand {
    Format {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    Parse {
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    config.apply_overrides(ConfigOverrides {
        default_scenario: cli.scenario.map(|s| s.as_slug().to_string()),
        apply_guardrail_scaling: cli.scale_to_guardrail.then_some(true),
        discount_rate: cli.discount_rate,
        years: cli.years,
    });

    match &cli.command {
        Commands::Config { init, show } => {
            handle_config_command(*init, *show, &config, &config_path)?;
        }
        Commands::Serve { host, port } => {
            let host = host.clone().unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let bind = format!("{host}:{port}");
            let addr: SocketAddr = bind
                .parse()
                .map_err(|e| anyhow!("invalid bind address {bind}: {e}"))?;
            run_server(config, addr).await?;
        }
        Commands::Assess { input } => {
            let mut assessment = load_assessment(input.as_deref())?;
            if cli.scenario.is_some() {
                assessment.scenario = cli.scenario;
            }
            let report = run_assessment(&assessment, &AssessmentOptions::from(&config));
            match cli.output {
                OutputFormat::Table => println!("{}", render_assessment_table(&report)),
                OutputFormat::Json => println!("{}", render_json(&report)?),
                OutputFormat::Csv => println!("{}", assessment_to_csv(&report)?),
            }
        }
        Commands::Benefit {
            inputs,
            probability,
            trace,
        } => {
            let inputs: BenefitInputs = inputs.clone().into();
            let scenario = config.default_scenario();
            let (base, traces) = if *trace {
                let (result, traces) = calculate_benefits_with_trace(&inputs, *probability);
                (result, Some(traces))
            } else {
                (calculate_benefits(&inputs, *probability), None)
            };
            let adjusted = apply_scenario(&base, *probability, scenario);
            match cli.output {
                OutputFormat::Table => println!(
                    "{}",
                    render_benefit_table(&adjusted.benefits, traces.as_ref())
                ),
                OutputFormat::Json => {
                    println!("{}", render_json(&(adjusted, traces))?)
                }
                OutputFormat::Csv => print_json_fallback("benefit", &(adjusted, traces))?,
            }
        }
        Commands::Readiness {
            data,
            tech,
            org,
            governance,
            runs,
            input_tokens,
            output_tokens,
        } => {
            let result = assess_readiness(&ReadinessInputs {
                data_availability: *data,
                technical_infrastructure: *tech,
                organizational_capacity: *org,
                governance: *governance,
                runs_per_month: *runs,
                input_tokens_per_run: *input_tokens,
                output_tokens_per_run: *output_tokens,
                ..ReadinessInputs::default()
            });
            match cli.output {
                OutputFormat::Table => println!("{}", render_readiness_table(&result)),
                OutputFormat::Json => println!("{}", render_json(&result)?),
                OutputFormat::Csv => print_json_fallback("readiness", &result)?,
            }
        }
        Commands::Project {
            annual_benefit,
            investment,
        } => {
            let result = project(&ProjectionInputs {
                annual_benefit: *annual_benefit,
                years: config.projection.years,
                discount_rate: config.projection.discount_rate,
                initial_investment: investment.unwrap_or(config.projection.initial_investment),
            });
            match cli.output {
                OutputFormat::Table => println!("{}", render_projection_table(&result)),
                OutputFormat::Json => println!("{}", render_json(&result)?),
                OutputFormat::Csv => println!("{}", projection_to_csv(&result)?),
            }
        }
        Commands::Currency { action } => match action {
            CurrencyCommand::Format { value } => println!("{}", format_currency(*value)),
            CurrencyCommand::Parse { text } => println!("{}", parse_currency_string(text)),
        },
        Commands::Clamp { values } => {
            let rows = values
                .iter()
                .map(|raw| {
                    let (field, value) = parse_field_value(raw)?;
                    let clamped = clamp_input(&field, value);
                    Ok((field, value, clamped))
                })
                .collect::<Result<Vec<_>>>()?;
            match cli.output {
                OutputFormat::Table => println!("{}", render_clamp_table(&rows)),
                OutputFormat::Json => println!("{}", render_json(&rows)?),
                OutputFormat::Csv => print_json_fallback("clamp", &rows)?,
            }
        }
    }

    Ok(())
}

fn handle_config_command(init: bool, show: bool, config: &Config, config_path: &Path) -> Result<()> {
    if init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if show || !init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

fn load_assessment(path: Option<&Path>) -> Result<AssessmentInput> {
    let Some(path) = path else {
        info!("no --input given, assessing the built-in sample portfolio");
        return Ok(sample_assessment());
    };
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed reading assessment input: {}", path.display()))?;
    let input: AssessmentInput = serde_json::from_str(&data)
        .with_context(|| format!("failed parsing assessment JSON: {}", path.display()))?;
    if input.use_cases.is_empty() {
        return Err(anyhow!("{} contains no use cases", path.display()));
    }
    Ok(input)
}

fn parse_field_value(raw: &str) -> Result<(String, f64)> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected field=value, got {raw}"))?;
    let value: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("invalid number for {field}: {value}"))?;
    Ok((field.trim().to_string(), value))
}

fn print_json_fallback<T: Serialize + ?Sized>(what: &str, value: &T) -> Result<()> {
    warn!("CSV output for {what} not implemented, using JSON");
    println!("{}", render_json(value)?);
    Ok(())
}
