//! Simple test for Gemini chat completion.
//!
//! Run with: cargo run -p gemini-brain --example test_chat
//! Or with a custom message: cargo run -p gemini-brain --example test_chat -- "Tu mensaje aquí"
//!
//! Make sure to set environment variables in .env:
//!   GEMINI_API_KEY - Google AI Studio API key

use gemini_brain::{ChatModel, GeminiModel};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Get message from command line args or use default
    let args: Vec<String> = env::args().collect();
    let prompt = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "¡Hola! Responde con un saludo corto.".to_string()
    };

    println!("Initializing GeminiModel...");
    let model = GeminiModel::from_env()?;

    println!("Model initialized: {}", model.name());
    println!("API URL: {}", model.config().api_url);
    println!("Model: {}", model.config().model);
    if let Some(ref instruction) = model.config().system_instruction {
        let preview: String = instruction.chars().take(50).collect();
        let suffix = if instruction.len() > 50 { "..." } else { "" };
        println!("System instruction: \"{}{}\"", preview, suffix);
    } else {
        println!("System instruction: (none)");
    }
    println!();

    println!("Sending: \"{}\"", prompt);
    println!("Waiting for response...\n");

    let response = model.complete(&prompt).await?;

    println!("=== Response ===");
    println!("{}", response);
    println!("================");

    Ok(())
}
