//! Ask and chat commands - answer questions through the intent classifier.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use invq_core::{Dispatcher, InvoiceStore, OpenAiClassifier};

/// Arguments for the ask command.
#[derive(Args)]
pub struct AskArgs {
    /// Question about the invoices
    #[arg(required = true)]
    question: String,

    /// Invoice dataset (default: dataset path from config)
    #[arg(short, long)]
    dataset: Option<PathBuf>,
}

/// Arguments for the chat command.
#[derive(Args)]
pub struct ChatArgs {
    /// Invoice dataset (default: dataset path from config)
    #[arg(short, long)]
    dataset: Option<PathBuf>,
}

fn dispatcher(
    dataset: Option<&PathBuf>,
    config_path: Option<&str>,
) -> anyhow::Result<Dispatcher<OpenAiClassifier>> {
    let config = super::load_config(config_path)?;
    let store = InvoiceStore::load_or_empty(&super::dataset_path(dataset, &config));
    let classifier = OpenAiClassifier::from_env(&config.llm)?;
    Ok(Dispatcher::new(classifier, Arc::new(store)))
}

pub async fn run(args: AskArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let dispatcher = dispatcher(args.dataset.as_ref(), config_path)?;
    let answer = dispatcher.resolve(&args.question).await?;
    println!("{}", answer);
    Ok(())
}

fn is_exit(line: &str) -> bool {
    matches!(line.to_lowercase().as_str(), "quit" | "exit")
}

pub async fn chat(args: ChatArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let dispatcher = dispatcher(args.dataset.as_ref(), config_path)?;

    eprintln!(
        "{} {} invoices loaded. Type 'quit' or 'exit' to stop.",
        style("ℹ").blue(),
        dispatcher.store().len()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", style("You:").bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if is_exit(question) {
            break;
        }

        match dispatcher.resolve(question).await {
            Ok(answer) => println!("{} {}", style("Bot:").bold().cyan(), answer),
            Err(e) => eprintln!("{} {}", style("✗").red(), e),
        }
    }

    info!("Chat session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_words() {
        assert!(is_exit("quit"));
        assert!(is_exit("EXIT"));
        assert!(!is_exit("quitting time?"));
    }
}
