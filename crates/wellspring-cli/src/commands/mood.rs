use std::collections::BTreeSet;

use clap::Subcommand;
use wellspring_core::{
    ConsoleNotifier, Database, FallbackStore, LocalAuth, Mood, MoodEntry, PersistenceGateway,
    SaveOutcome, Trigger, Weather,
};

#[derive(Subcommand)]
pub enum MoodAction {
    /// Log how you are feeling
    Log {
        /// One of: great, good, okay, low, bad
        mood: String,
        /// Contributing factor (repeatable): work, relationships, health, sleep, other
        #[arg(long = "trigger")]
        triggers: Vec<String>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
        /// One of: sunny, cloudy, rainy, windy, night
        #[arg(long)]
        weather: Option<String>,
    },
}

pub fn run(action: MoodAction) -> Result<(), Box<dyn std::error::Error>> {
    let MoodAction::Log {
        mood,
        triggers,
        notes,
        weather,
    } = action;

    let mood: Mood = mood.parse()?;
    let triggers: BTreeSet<Trigger> = triggers
        .iter()
        .map(|t| t.parse::<Trigger>())
        .collect::<Result<_, _>>()?;
    let weather: Option<Weather> = weather.map(|w| w.parse()).transpose()?;

    let db = Database::open()?;
    let auth = LocalAuth::new(&db);
    let notifier = ConsoleNotifier;
    let fallback = FallbackStore::open_default()?;
    let mut gateway = PersistenceGateway::new(&db, &auth, &notifier, fallback);

    let entry = MoodEntry::new(mood, triggers, notes, weather);
    match gateway.save_mood(&entry) {
        SaveOutcome::Saved => Ok(()),
        SaveOutcome::Unauthenticated => {
            // The gateway already told the user to sign in.
            Ok(())
        }
        _ => Err("mood entry was not saved".into()),
    }
}
