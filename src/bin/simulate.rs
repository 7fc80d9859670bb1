//! Offline dialog simulator: walks a vocabulary in the terminal through
//! the full engine (matcher, renderer, controller) with the built-in
//! normalizer and a console gateway. For vocabulary authoring; no network.

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use std::io::{BufRead, Write};
use std::sync::Arc;
use vocabot::engine::{ButtonAction, Presentation};
use vocabot::gateway::Gateway;
use vocabot::morph::SimpleNormalizer;
use vocabot::voc::NodeType;
use vocabot::{Dialog, Event, Vocabulary};

#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(about = "Walk a dialog vocabulary in the terminal")]
struct Args {
    /// Path to the YAML vocabulary file
    voc: std::path::PathBuf,

    /// Skip the eager vocabulary lint
    #[arg(long)]
    no_lint: bool,
}

/// Gateway that renders to stdout. Buttons print as a numbered list; the
/// user replies with the number.
struct ConsoleGateway;

#[async_trait]
impl Gateway for ConsoleGateway {
    async fn send(&self, _chat: &str, presentation: Presentation) -> vocabot::Result<()> {
        if let Some(photo) = &presentation.photo {
            println!("[photo: {}]", photo);
        }
        println!("bot> {}", presentation.text);

        if let Some(buttons) = &presentation.buttons {
            for button in buttons {
                match &button.action {
                    ButtonAction::Goto(i) => println!("  [{}] {}", i, button.label),
                    ButtonAction::OpenLink(url) => println!("  [-] {} -> {}", button.label, url),
                }
            }
        }
        Ok(())
    }

    async fn send_text(&self, _chat: &str, text: &str) -> vocabot::Result<()> {
        println!("bot> {}", text);
        Ok(())
    }

    async fn typing(&self, _chat: &str) -> vocabot::Result<()> {
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "warn")).init();

    let args = Args::parse();

    let voc = Arc::new(Vocabulary::load(&args.voc)?);
    if !args.no_lint {
        for finding in voc.validate() {
            eprintln!("lint: {}", finding);
        }
    }

    let dialog = Arc::new(Dialog::new(
        voc.clone(),
        Arc::new(ConsoleGateway),
        Arc::new(SimpleNormalizer),
    ));

    const CHAT: &str = "console";
    println!("Simulating {} (Ctrl-D to quit)", args.voc.display());

    // Kick off the dialog the way a first inbound message would.
    dialog.handle(Event::text(CHAT, "/start")).await;

    let stdin = std::io::stdin();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // On a variant node a bare number means pressing that button.
        let at_variant = dialog
            .sessions()
            .current(CHAT)
            .and_then(|name| voc.node(&name).ok().map(|n| n.node_type))
            .map(|t| t == NodeType::Variant)
            .unwrap_or(false);

        let event = if at_variant && line.parse::<usize>().is_ok() {
            Event::button(CHAT, line)
        } else {
            Event::text(CHAT, line)
        };

        dialog.handle(event).await;
    }

    Ok(())
}
