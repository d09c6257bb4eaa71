use anyhow::Result;
use clap::Parser;
use terrarium_core::init_logging;
use terrarium_lib::app::App;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mode to run the simulation in
    #[arg(short, long, value_enum, default_value = "headless")]
    mode: Mode,

    /// Custom config file path
    #[arg(short, long, default_value = "terrarium.toml")]
    config: String,

    /// Number of ticks to simulate (0 = until Ctrl+C or extinction)
    #[arg(short, long, default_value_t = 0)]
    ticks: u64,

    /// Override the world seed from the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Trigger a disease outbreak after this many ticks
    #[arg(long)]
    outbreak_at: Option<u64>,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum Mode {
    /// Run as fast as possible
    Headless,
    /// Hold the configured target FPS
    Paced,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = App::load_config(&args.config);
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }

    let mut app = App::new(config)?;
    app.paced = matches!(args.mode, Mode::Paced);
    tracing::info!(mode = ?args.mode, ticks = args.ticks, "Starting simulation");

    if let Some(at) = args.outbreak_at {
        let stop = if args.ticks > 0 { at.min(args.ticks) } else { at };
        while app.tick_count < stop && app.ecosystem.total_population() > 0 {
            app.step();
        }
        if app.tick_count < at {
            tracing::warn!(at, ticks = args.ticks, "Outbreak tick never reached");
        } else if let Some(patient_zero) = app.trigger_outbreak() {
            println!("Outbreak started at tick {} in {}", app.tick_count, patient_zero);
        }
    }

    app.run(args.ticks).await?;

    println!("{}", app.status_line());
    println!("{}", serde_json::to_string_pretty(&app.ecosystem.stats())?);
    Ok(())
}
