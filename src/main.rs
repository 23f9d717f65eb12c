use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::{theme::ColorfulTheme, Input, Password, Select};
use serde::Serialize;
use tracing::{info, warn};

use farmtech_monitor::config::Config;
use farmtech_monitor::dashboard::DashboardState;
use farmtech_monitor::irrigation::{self, IrrigationDecision, NoDataPolicy};
use farmtech_monitor::report;
use farmtech_monitor::sensors::{SensorDataset, ViewPeriod};
use farmtech_monitor::weather::{WeatherAdvisor, WeatherOutcome};

#[derive(Parser, Debug)]
#[command(name = "farmtech_monitor")]
#[command(about = "Simulated soil-sensor dashboard with forecast-based irrigation advice", long_about = None)]
struct Args {
    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// City to fetch the forecast for
    #[arg(long)]
    city: Option<String>,

    /// Two-letter country code (e.g. BR)
    #[arg(long)]
    country: Option<String>,

    /// Number of simulated sensor readings
    #[arg(long)]
    readings: Option<usize>,

    /// Period used for the sensor table and summary
    #[arg(long, value_enum, default_value = "6h")]
    period: ViewPeriod,

    /// Decision when no forecast can be fetched
    #[arg(long, value_enum)]
    no_data_policy: Option<NoDataPolicy>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Generate and show simulated sensor readings
    Sensors,
    /// Fetch the forecast and decide whether to irrigate
    Weather,
    /// Sensors followed by the weather advisory (default)
    Dashboard,
    /// Menu-driven session with regenerate and fetch actions
    Interactive,
}

#[derive(Serialize)]
struct WeatherReport<'a> {
    outcome: &'a WeatherOutcome,
    decision: IrrigationDecision,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("farmtech_monitor=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let args = Args::parse();
    let config = build_config(&args)?;

    let mut state = DashboardState::new(config.sensors.clone());

    match args.command.unwrap_or(Command::Dashboard) {
        Command::Sensors => show_sensors(state.sensor_data(), args.period, args.json)?,
        Command::Weather => {
            run_weather(&config, args.json).await?;
        }
        Command::Dashboard => {
            show_sensors(state.sensor_data(), args.period, args.json)?;
            println!();
            run_weather(&config, args.json).await?;
        }
        Command::Interactive => run_interactive(config, state, args.period).await?,
    }

    Ok(())
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config = Config::from_env().context("loading configuration from environment")?;

    if let Some(key) = &args.api_key {
        config.weather.api_key = Some(key.clone());
    }
    if let Some(city) = &args.city {
        config.weather.city = city.clone();
    }
    if let Some(country) = &args.country {
        config.weather.country_code = country.clone();
    }
    if let Some(readings) = args.readings {
        config.sensors.reading_count = readings;
    }
    if let Some(policy) = args.no_data_policy {
        config.no_data_policy = policy;
    }

    config.sensors.validate()?;
    Ok(config)
}

fn show_sensors(dataset: &SensorDataset, period: ViewPeriod, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(dataset)?);
        return Ok(());
    }

    println!("== Current indicators ==");
    if let Some(latest) = dataset.latest() {
        println!("{}", report::render_kpis(latest));
    }

    println!("\n== Sensor readings ({}) ==", period.label());
    print!("{}", report::render_sensor_table(dataset.window(period)));

    if let Some(summary) = dataset.summary(period) {
        println!("{}", report::render_summary(&summary, period));
    }
    Ok(())
}

/// Fetch, evaluate and print. Configuration problems are reported as errors;
/// network problems become a "no data" outcome.
async fn run_weather(config: &Config, json: bool) -> Result<IrrigationDecision> {
    let location = config.weather.location()?;
    let advisor = match WeatherAdvisor::new(&config.weather) {
        Ok(advisor) => advisor,
        Err(e) => {
            if let Some(hint) = e.hint() {
                eprintln!("{}", hint);
            }
            return Err(e).context("weather advisor not configured");
        }
    };

    let outcome = advisor.advise(&location).await;
    let decision = irrigation::decide(&outcome, config.no_data_policy);

    if json {
        let report = WeatherReport {
            outcome: &outcome,
            decision,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(decision);
    }

    match &outcome {
        WeatherOutcome::Available(advisory) => {
            let place = advisory
                .city
                .as_ref()
                .and_then(|c| c.name.clone())
                .unwrap_or_else(|| location.city.clone());
            println!("== Forecast for {} ==", place);
            println!("{}", report::render_current_conditions(&advisory.nearest));
            println!(
                "\n== Irrigation analysis (next {} hours) ==",
                config.weather.thresholds.window_hours
            );
            for line in report::advisory_log(advisory) {
                println!("{}", line);
            }
        }
        WeatherOutcome::NoData { reason } => {
            println!("Could not fetch weather data: {}", reason);
        }
    }
    println!("\n{}", report::render_decision(decision));

    Ok(decision)
}

async fn run_interactive(mut config: Config, mut state: DashboardState, period: ViewPeriod) -> Result<()> {
    let theme = ColorfulTheme::default();
    let actions = [
        "Show sensor dashboard",
        "Regenerate sensor data",
        "Fetch weather and decide irrigation",
        "Change location",
        "Quit",
    ];

    loop {
        let choice = Select::with_theme(&theme)
            .with_prompt(format!("FarmTech monitor ({}, {})", config.weather.city, config.weather.country_code))
            .items(&actions)
            .default(0)
            .interact()?;

        match choice {
            0 => show_sensors(state.sensor_data(), period, false)?,
            1 => {
                state.regenerate();
                show_sensors(state.sensor_data(), period, false)?;
            }
            2 => {
                if config.weather.require_api_key().is_err() {
                    let key: String = Password::with_theme(&theme)
                        .with_prompt("OpenWeatherMap API key")
                        .interact()?;
                    config.weather.api_key = Some(key);
                }
                if let Err(e) = run_weather(&config, false).await {
                    warn!("{:#}", e);
                    eprintln!("Could not fetch weather data: {:#}", e);
                }
            }
            3 => {
                config.weather.city = Input::with_theme(&theme)
                    .with_prompt("City")
                    .default(config.weather.city.clone())
                    .interact_text()?;
                config.weather.country_code = Input::with_theme(&theme)
                    .with_prompt("Country code (e.g. BR)")
                    .default(config.weather.country_code.clone())
                    .interact_text()?;
                if let Err(e) = config.weather.location() {
                    eprintln!("{}", e);
                }
            }
            _ => {
                info!("Leaving interactive session after {} dataset(s)", state.generation());
                return Ok(());
            }
        }
        println!();
    }
}
