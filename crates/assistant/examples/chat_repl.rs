//! Interactive chat assistant example.
//!
//! Reads utterances from stdin and prints the assistant's replies.
//! One utterance is processed at a time (the read loop is the busy
//! flag), matching the UI contract the command layer assumes.
//!
//! Run with: cargo run -p assistant --example chat_repl
//!
//! Configuration via .env file or environment variables:
//!   GEMINI_API_KEY     - Google AI Studio API key (required)
//!   TASK_SERVER_URL    - Task backend URL (default: http://localhost:3001)
//!   VAULT_SECRET_KEY   - 32-byte vault key, hex or base64 (required)
//!   VAULT_DATA_DIR     - Vault storage directory (default: .vault)
//!
//! Vault commands (handled by this shell, not the assistant):
//!   /pin <6 digits>    - unlock (or initialize) the vault
//!   /lock              - lock the vault
//!   /salir             - quit

use std::io::{self, BufRead, Write};

use assistant::{Assistant, ConversationContext, Severity};
use gemini_brain::GeminiModel;
use task_client::TaskServerClient;
use tracing::info;
use vault_store::{EncryptedFileStore, UnlockOutcome, Vault};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "assistant=info".into()),
        )
        .init();

    let tasks = TaskServerClient::from_env()?;
    if tasks.ping().await {
        info!("Task backend reachable at {}", tasks.config().base_url);
    } else {
        eprintln!(
            "⚠️ No se puede conectar al servidor de tareas en {}. ¿Está corriendo?",
            tasks.config().base_url
        );
    }

    let vault = Vault::new(EncryptedFileStore::from_env()?);
    let model = GeminiModel::from_env()?;

    let assistant = Assistant::new(tasks, vault, model);
    let mut ctx = ConversationContext::new();

    println!("¡Hola! Soy tu asistente de tareas. Escribe un mensaje (/salir para terminar).");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        if line.is_empty() {
            continue;
        }
        if line == "/salir" {
            break;
        }
        if line == "/lock" {
            assistant.vault().lock();
            println!("🔒 Bóveda bloqueada.");
            continue;
        }
        if let Some(pin) = line.strip_prefix("/pin ") {
            match assistant.vault().unlock(pin.trim()).await? {
                UnlockOutcome::Initialized => println!("🔐 PIN creado y bóveda desbloqueada."),
                UnlockOutcome::Unlocked => println!("🔐 Bóveda desbloqueada."),
                UnlockOutcome::WrongPin => println!("❌ PIN incorrecto."),
                UnlockOutcome::InvalidPin => println!("⚠️ El PIN debe tener 6 dígitos."),
            }
            continue;
        }

        let reply = assistant.handle(line, &mut ctx).await;
        let marker = match reply.severity {
            Severity::Info => "·",
            Severity::Success => "✓",
            Severity::Error => "✗",
            Severity::Warning => "!",
        };
        println!("[{}] {}", marker, reply.text);
    }

    println!("¡Hasta luego!");
    Ok(())
}
