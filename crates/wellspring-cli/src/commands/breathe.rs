use clap::Subcommand;
use wellspring_core::{BreathingDriver, BreathingEngine, Config, Database};

const ENGINE_KEY: &str = "breathing_engine";

#[derive(Subcommand)]
pub enum BreatheAction {
    /// Run the exercise, printing one snapshot per second
    Run {
        /// How long to run (one full 4-4-6-2 cycle by default)
        #[arg(long, default_value = "16")]
        seconds: u64,
    },
    /// Print the persisted timer state as JSON
    Status,
    /// Reset the persisted timer state
    Stop,
}

fn load_engine(db: &Database, config: &Config) -> BreathingEngine {
    if let Ok(Some(json)) = db.kv_get(ENGINE_KEY) {
        if let Ok(engine) = serde_json::from_str::<BreathingEngine>(&json) {
            return engine;
        }
    }
    BreathingEngine::new().with_guide(config.breathing.guide_base, config.breathing.guide_peak)
}

fn save_engine(db: &Database, engine: &BreathingEngine) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(engine)?;
    db.kv_set(ENGINE_KEY, &json)?;
    Ok(())
}

pub fn run(action: BreatheAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load()?;

    match action {
        BreatheAction::Run { seconds } => {
            let engine = load_engine(&db, &config);
            let runtime = tokio::runtime::Runtime::new()?;
            let engine = runtime.block_on(async move {
                let mut driver = BreathingDriver::new(engine);
                let mut snapshots = driver.subscribe();
                driver.start();
                // The start snapshot is printed here; mark it seen so the
                // loop below only waits on real ticks.
                let _ = snapshots.borrow_and_update();
                println!("{}", serde_json::to_string(&driver.snapshot())?);

                let mut ticks = 0;
                while ticks < seconds {
                    snapshots.changed().await?;
                    let snapshot = snapshots.borrow_and_update().clone();
                    println!("{}", serde_json::to_string(&snapshot)?);
                    ticks += 1;
                }

                // Hand back the engine mid-cycle: the persisted state keeps
                // its phase and elapsed seconds, so `status` shows where the
                // exercise left off and the next `run` resumes there. Only
                // an explicit `stop` resets.
                Ok::<_, Box<dyn std::error::Error>>(driver.into_inner())
            })?;
            save_engine(&db, &engine)?;
        }
        BreatheAction::Status => {
            let engine = load_engine(&db, &config);
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        BreatheAction::Stop => {
            let mut engine = load_engine(&db, &config);
            engine.stop();
            save_engine(&db, &engine)?;
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
    }
    Ok(())
}
