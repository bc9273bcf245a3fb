use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use generator::profile::GeneratorConfig;
use session::DashboardSession;
use std::path::PathBuf;
use std::sync::Arc;
use turtlecore::math::UnitSystem;
use turtlecore::prelude::DEFAULT_MAX_SPEED_CUTOFF_KPH;
use turtlecore::processing::parse_timestamp;
use view::sidebar::Sidebar;
use workflow::config::DashboardConfig;
use workflow::runner::Runner;

mod generator;
mod session;
mod view;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Sea turtle migration dashboard (terminal edition)")]
struct Args {
    /// CSV export of movement segments
    #[arg(long)]
    data: Option<PathBuf>,
    /// Load a dashboard config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Generate a seeded demo dataset instead of reading a CSV
    #[arg(long, default_value_t = false)]
    synthetic: bool,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Entity id or alias to show
    #[arg(long)]
    entity: Option<String>,
    /// Window start (e.g. "2003-01-01 00:00:00")
    #[arg(long)]
    start: Option<String>,
    /// Window end, inclusive
    #[arg(long)]
    end: Option<String>,
    /// metric or imperial
    #[arg(long)]
    units: Option<UnitSystem>,
    #[arg(long, default_value_t = false)]
    show_midpoint: bool,
    /// Speeds above this (km/h) are ignored for the max-speed figure
    #[arg(long)]
    max_speed: Option<f64>,
    /// Fail instead of skipping rows with null fields
    #[arg(long, default_value_t = false)]
    strict: bool,
    /// Print the selectable entities and exit
    #[arg(long, default_value_t = false)]
    list: bool,
    /// Emit the view model as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn parse_bound(value: Option<&str>, label: &str) -> anyhow::Result<Option<DateTime<Utc>>> {
    value
        .map(|raw| {
            parse_timestamp(raw).with_context(|| format!("parsing {} time '{}'", label, raw))
        })
        .transpose()
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = if let Some(path) = args.config.as_ref() {
        DashboardConfig::load(path)?
    } else {
        DashboardConfig::from_args(
            args.data.clone(),
            args.units.unwrap_or_default(),
            args.max_speed.unwrap_or(DEFAULT_MAX_SPEED_CUTOFF_KPH),
        )
    };
    if let Some(units) = args.units {
        config.units = units;
    }
    if let Some(cutoff) = args.max_speed {
        config.max_speed_cutoff_kph = cutoff;
    }
    if args.entity.is_some() {
        config.entity = args.entity.clone();
    }
    config.override_window(args.start.clone(), args.end.clone());
    config.show_midpoint |= args.show_midpoint;
    config.strict |= args.strict;
    if args.synthetic && config.synthetic.is_none() {
        config.synthetic = Some(GeneratorConfig {
            seed: args.seed,
            ..Default::default()
        });
    }

    let runner = Arc::new(Runner::load(&config)?);

    if args.list {
        for option in runner.entities() {
            match option.alias {
                Some(alias) => println!("{} ({})", option.entity_id, alias),
                None => println!("{}", option.entity_id),
            }
        }
        return Ok(());
    }

    let mut session = DashboardSession::new(runner.clone());
    if let Some(entity) = config.entity.as_deref() {
        session.select_entity(entity);
    }
    session.set_window(
        parse_bound(config.start.as_deref(), "start")?,
        parse_bound(config.end.as_deref(), "end")?,
    );
    session.set_units(config.units);
    session.set_show_midpoint(config.show_midpoint);

    let model = session.refresh();
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&model).context("serializing dashboard model")?
        );
    } else {
        print!("{}", Sidebar(&model));
        if runner.records().dropped_rows > 0 {
            println!(
                "({} incomplete row(s) were excluded at load time)",
                runner.records().dropped_rows
            );
        }
    }

    Ok(())
}
