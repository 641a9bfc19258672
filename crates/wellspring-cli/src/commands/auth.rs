use clap::Subcommand;
use wellspring_core::{
    ConsoleNotifier, Database, FallbackStore, LocalAuth, PersistenceGateway, SessionProvider,
};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Create an account and sign in
    Register {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in to an existing account
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out of the current session
    Logout,
    /// Show the current session
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let auth = LocalAuth::new(&db);

    match action {
        AuthAction::Register { email, password } => {
            let session = auth.sign_up(&email, &password)?;
            println!("Signed up as {}", session.email);
        }
        AuthAction::Login { email, password } => {
            let session = auth.sign_in(&email, &password)?;
            println!("Signed in as {}", session.email);

            // Retry any quiz result kept on this device while signed out.
            let notifier = ConsoleNotifier;
            let fallback = FallbackStore::open_default()?;
            let mut gateway = PersistenceGateway::new(&db, &auth, &notifier, fallback);
            gateway.resync();
        }
        AuthAction::Logout => {
            auth.sign_out()?;
            println!("Signed out");
        }
        AuthAction::Status => match auth.current_session() {
            Some(session) => println!("signed in as {}", session.email),
            None => println!("not signed in"),
        },
    }
    Ok(())
}
