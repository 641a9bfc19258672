use std::io::Write;

use clap::Subcommand;
use wellspring_core::{
    assessment, AssessmentEngine, ConsoleNotifier, Database, FallbackStore, LocalAuth,
    PersistenceGateway, QuizResult,
};

#[derive(Subcommand)]
pub enum QuizAction {
    /// Take the wellness check
    Take {
        /// Comma-separated answers (0-3 per question) instead of prompting
        #[arg(long)]
        answers: Option<String>,
        /// Save the result to your account when finished
        #[arg(long)]
        save: bool,
    },
    /// Print the question list as JSON
    Questions,
}

pub fn run(action: QuizAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        QuizAction::Take { answers, save } => take(answers, save),
        QuizAction::Questions => {
            let questions: Vec<_> = assessment::questions()
                .iter()
                .map(|q| {
                    serde_json::json!({
                        "id": q.id,
                        "text": q.text,
                        "options": q.options,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&questions)?);
            Ok(())
        }
    }
}

fn take(answers: Option<String>, save: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = AssessmentEngine::new();

    match answers {
        Some(list) => {
            for part in list.split(',') {
                let option: u8 = part.trim().parse()?;
                if !engine.answer(option) {
                    return Err(format!("invalid or extra answer '{part}'").into());
                }
            }
        }
        None => {
            while let Some(question) = engine.current_question() {
                println!(
                    "\nQuestion {} of {} ({:.0}%)",
                    engine.current_index() + 1,
                    assessment::QUESTION_COUNT,
                    engine.progress_pct(),
                );
                println!("{}", question.text);
                for (i, option) in question.options.iter().enumerate() {
                    println!("  {i}) {option}");
                }
                print!("> ");
                std::io::stdout().flush()?;

                let mut line = String::new();
                if std::io::stdin().read_line(&mut line)? == 0 {
                    return Err("unexpected end of input".into());
                }
                match line.trim().parse::<u8>() {
                    Ok(option) if engine.answer(option) => {}
                    _ => println!("Please answer with a number from 0 to 3."),
                }
            }
        }
    }

    let outcome = engine.result()?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if save {
        let db = Database::open()?;
        let auth = LocalAuth::new(&db);
        let notifier = ConsoleNotifier;
        let fallback = FallbackStore::open_default()?;
        let mut gateway = PersistenceGateway::new(&db, &auth, &notifier, fallback);
        gateway.save_quiz(&QuizResult::from_outcome(&outcome));
    }
    Ok(())
}
