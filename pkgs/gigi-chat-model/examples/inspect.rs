use anyhow::Context;
use clap::Parser;
use gigi_chat_model::{validation, ModelConfig, Snapshot};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect a chat snapshot", long_about = None)]
struct Args {
    /// Snapshot JSON file with conversations, participants and messages
    snapshot: PathBuf,

    /// Show the chat list as this user (unread counts, previews)
    #[arg(short, long)]
    viewer: Option<String>,

    /// Maximum distinct users in a direct conversation
    #[arg(long, default_value = "2")]
    max_direct_participants: usize,

    /// Characters of the last message to show
    #[arg(long, default_value = "40")]
    preview_chars: usize,

    /// Print the composed conversation list as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let args = Args::parse();

    let config = ModelConfig {
        max_direct_participants: args.max_direct_participants,
        ..Default::default()
    };
    config.validate().context("Invalid validation settings")?;

    let snapshot = Snapshot::load(&args.snapshot)
        .with_context(|| format!("Failed to load {}", args.snapshot.display()))?;

    let violations = validation::violations(&snapshot, &config);
    if violations.is_empty() {
        eprintln!("✓ Snapshot is consistent");
    } else {
        eprintln!("✗ {} violations:", violations.len());
        for violation in &violations {
            eprintln!("  - {}", violation);
        }
    }

    if args.json {
        let list = snapshot.conversation_list();
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    match args.viewer {
        Some(viewer) => {
            for summary in snapshot.summaries(&viewer, args.preview_chars) {
                let chat = &summary.conversation;
                let peers: Vec<&str> = chat.others(&viewer).map(|p| p.user_id.as_str()).collect();
                let fallback = peers.join(", ");
                println!(
                    "{} [{}] {}",
                    chat.conversation.display_name(&fallback),
                    summary.unread_count,
                    summary.last_message.as_deref().unwrap_or("")
                );
            }
        }
        None => {
            for chat in snapshot.conversation_list() {
                let kind = if chat.is_direct() { "direct" } else { "group" };
                println!(
                    "{} ({}, {} members, last activity {})",
                    chat.conversation.display_name(chat.id()),
                    kind,
                    chat.user_ids().len(),
                    chat.conversation.last_message_at.to_rfc3339()
                );
            }
        }
    }

    Ok(())
}
