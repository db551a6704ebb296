//! Interactive loop driving the orchestrator
//!
//! Stays deliberately plain: committed replies and errors are printed when
//! a turn settles. Input is read concurrently with generation so /stop can
//! interrupt an in-flight turn.

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

use tandem_chat::{ChatError, ChatStore, DualOrchestrator, ProviderId, Role};

pub async fn run(orchestrator: Arc<DualOrchestrator>) -> Result<()> {
    println!("tandem - one prompt, two replies");
    println!("commands: /retry <gemini|openai>, /stop, /clear, /stick, /quit");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut turns = JoinSet::new();

    while let Some(line) = lines.next_line().await? {
        // Reap turns that already settled
        while turns.try_join_next().is_some() {}

        let line = line.trim().to_string();
        match line.as_str() {
            "" => {}
            "/quit" | "/exit" => break,
            "/stop" => orchestrator.stop_all(),
            "/clear" => {
                orchestrator.clear();
                println!("history cleared");
            }
            "/stick" => {
                let store = orchestrator.store();
                let stick = !store.stick_to_bottom();
                store.set_stick_to_bottom(stick);
                println!("stick to bottom: {stick}");
            }
            cmd if cmd.starts_with("/retry") => {
                match cmd.trim_start_matches("/retry").trim().parse::<ProviderId>() {
                    Ok(id) => {
                        let orchestrator = orchestrator.clone();
                        turns.spawn(async move {
                            run_turn(&orchestrator, Turn::Retry(id)).await;
                        });
                    }
                    Err(e) => eprintln!("{e}"),
                }
            }
            cmd if cmd.starts_with('/') => eprintln!("unknown command: {cmd}"),
            _ => {
                let orchestrator = orchestrator.clone();
                turns.spawn(async move {
                    run_turn(&orchestrator, Turn::Submit(line)).await;
                });
            }
        }
    }

    // Cancel anything still streaming and let the sessions archive their
    // partial drafts before the caller snapshots the store
    orchestrator.stop_all();
    while turns.join_next().await.is_some() {}

    Ok(())
}

enum Turn {
    Submit(String),
    Retry(ProviderId),
}

async fn run_turn(orchestrator: &DualOrchestrator, turn: Turn) {
    let result = match &turn {
        Turn::Submit(text) => orchestrator.submit(text).await,
        Turn::Retry(id) => orchestrator.retry(*id).await,
    };

    match result {
        Ok(()) => match turn {
            Turn::Submit(_) => {
                print_lane(orchestrator.store(), ProviderId::Gemini);
                print_lane(orchestrator.store(), ProviderId::OpenAi);
            }
            Turn::Retry(id) => print_lane(orchestrator.store(), id),
        },
        Err(ChatError::SessionBusy) => {
            eprintln!("still generating; use /stop first");
        }
        Err(ChatError::EmptyInput) => {}
        Err(e) => eprintln!("{e}"),
    }
}

fn print_lane(store: &ChatStore, id: ProviderId) {
    let label = match id {
        ProviderId::Gemini => id.key().blue().bold(),
        ProviderId::OpenAi => id.key().green().bold(),
    };

    if let Some(error) = store.error(id) {
        eprintln!(
            "[{label}] {} {}: {} (use /retry {id})",
            "error".red(),
            error.code,
            error.message
        );
        return;
    }

    match store.conversation(id).last() {
        Some(msg) if msg.role == Role::Assistant => println!("[{label}] {}", msg.content),
        _ => println!("[{label}] (no reply)"),
    }
}
