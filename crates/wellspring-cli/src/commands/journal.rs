use clap::Subcommand;
use wellspring_core::{
    records, ConsoleNotifier, Database, FallbackStore, JournalEntry, LocalAuth,
    PersistenceGateway, SaveOutcome,
};

#[derive(Subcommand)]
pub enum JournalAction {
    /// Save a journal entry
    Write {
        /// The entry text
        content: String,
        /// The prompt the entry responds to, if any
        #[arg(long)]
        prompt: Option<String>,
    },
    /// Suggest a random journal prompt
    Prompt,
}

pub fn run(action: JournalAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        JournalAction::Write { content, prompt } => {
            if content.trim().is_empty() {
                return Err("journal entry is empty".into());
            }

            let db = Database::open()?;
            let auth = LocalAuth::new(&db);
            let notifier = ConsoleNotifier;
            let fallback = FallbackStore::open_default()?;
            let mut gateway = PersistenceGateway::new(&db, &auth, &notifier, fallback);

            let entry = JournalEntry::new(content, prompt);
            match gateway.save_journal(&entry) {
                SaveOutcome::Saved | SaveOutcome::Unauthenticated => Ok(()),
                _ => Err("journal entry was not saved".into()),
            }
        }
        JournalAction::Prompt => {
            println!("{}", records::random_prompt());
            Ok(())
        }
    }
}
