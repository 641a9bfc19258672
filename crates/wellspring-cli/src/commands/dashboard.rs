use clap::Subcommand;
use wellspring_core::{
    ConsoleNotifier, Database, DashboardAggregator, LocalAuth, SessionProvider,
};

#[derive(Subcommand)]
pub enum DashboardAction {
    /// Show your wellness history
    Show {
        /// Print the raw aggregate as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: DashboardAction) -> Result<(), Box<dyn std::error::Error>> {
    let DashboardAction::Show { json } = action;

    let db = Database::open()?;
    let auth = LocalAuth::new(&db);
    let Some(session) = auth.current_session() else {
        return Err("not signed in; run `wellspring-cli auth login` first".into());
    };

    let notifier = ConsoleNotifier;
    let aggregator = DashboardAggregator::new(&db, &notifier);
    let data = aggregator.load_all(session.user_id);

    if json {
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    println!("Wellness history for {}", session.email);

    println!("\nMoods ({})", data.moods.len());
    for entry in &data.moods {
        let triggers: Vec<&str> = entry.triggers.iter().map(|t| t.as_str()).collect();
        println!(
            "  {}  {:5}  [{}]{}",
            entry.created_at.format("%Y-%m-%d %H:%M"),
            entry.mood.as_str(),
            triggers.join(", "),
            entry
                .notes
                .as_deref()
                .map(|n| format!("  {n}"))
                .unwrap_or_default(),
        );
    }

    println!("\nJournal ({})", data.journals.len());
    for (day, entries) in data.journals_by_day() {
        println!("  {day}");
        for entry in entries {
            let preview: String = entry.content.chars().take(60).collect();
            println!("    {preview}");
        }
    }

    println!("\nQuiz results ({})", data.quizzes.len());
    for result in &data.quizzes {
        println!(
            "  {}  score {:2}  {}",
            result.created_at.format("%Y-%m-%d"),
            result.score,
            result.level,
        );
    }

    Ok(())
}
