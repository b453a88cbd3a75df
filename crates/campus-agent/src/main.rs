//! campusctl - command-line client for the campus assistant.

use anyhow::Result;
use campus_agent::{logging, CampusAgent, Config, ProcessResponse};
use campus_shared::KnowledgeSource;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "campusctl")]
#[command(about = "Campus Assistant - schedules, menus, buses, events and more", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (overrides $CAMPUS_CONFIG and the system path)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Answer from fixture data without calling the backend
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a single question
    Ask {
        /// The question
        #[arg(required = true)]
        text: Vec<String>,

        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive conversation
    Chat,

    /// Show how a message is classified
    Classify {
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Look up the knowledge base
    Lookup {
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if cli.offline {
        config.agent.offline = true;
    }

    match cli.command {
        Commands::Ask { text, json } => ask(&config, &text.join(" "), json).await,
        Commands::Chat => chat(&config).await,
        Commands::Classify { text } => classify(&config, &text.join(" ")),
        Commands::Lookup { query } => lookup(&config, &query.join(" ")),
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

async fn ask(config: &Config, text: &str, json: bool) -> Result<()> {
    let agent = CampusAgent::from_config(config)?;
    let resp = agent.process_message(text).await;
    if json {
        println!("{}", serde_json::to_string_pretty(&resp)?);
    } else {
        println!("{}", resp.response);
    }
    if !resp.success {
        std::process::exit(1);
    }
    Ok(())
}

fn classify(config: &Config, text: &str) -> Result<()> {
    let agent = CampusAgent::from_config(config)?;
    let analysis = agent.classifier().classify(text);
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

fn lookup(config: &Config, query: &str) -> Result<()> {
    let agent = CampusAgent::from_config(config)?;
    let answer = agent.knowledge().answer(query);
    match &answer.source {
        KnowledgeSource::Entry { key } => println!("{} {}", "entry:".dimmed(), key),
        KnowledgeSource::Template { bucket } => println!("{} {}", "template:".dimmed(), bucket),
    }
    println!("{}", answer.answer);
    Ok(())
}

fn print_reply(resp: &ProcessResponse) {
    let label = if resp.success {
        "campus>".green().bold().to_string()
    } else {
        "campus>".red().bold().to_string()
    };
    println!("{} {}", label, resp.response);
    if resp.degraded {
        println!("{}", "(some information came from cached data)".dimmed());
    }
    println!();
}

async fn chat(config: &Config) -> Result<()> {
    let agent = CampusAgent::from_config(config)?;
    println!("{}", "Campus Assistant".bold().cyan());
    println!(
        "{}",
        "Ask about classes, dining, buses, events, updates or FAQs. Commands: history, clear, exit".dimmed()
    );
    println!();

    repl(&agent, BufReader::new(tokio::io::stdin())).await
}

/// Line loop shared by `chat`; reads until EOF or `exit`
async fn repl<R: AsyncBufRead + Unpin>(agent: &CampusAgent, input: R) -> Result<()> {
    let mut lines = input.lines();

    loop {
        print!("{} ", "you>".bold());
        io::stdout().flush()?;

        let input = match lines.next_line().await {
            Ok(Some(line)) => line.trim().to_string(),
            Ok(None) => break, // EOF
            Err(e) => {
                eprintln!("{} {}", "Error reading input:".red(), e);
                break;
            }
        };

        match input.as_str() {
            "" => continue,
            "exit" | "quit" => {
                println!("{}", "Goodbye!".cyan());
                break;
            }
            "history" => {
                let history = agent.history();
                if history.is_empty() {
                    println!("{}", "No conversation yet.".dimmed());
                }
                for turn in history {
                    println!(
                        "{} {} {}",
                        turn.timestamp.format("%H:%M:%S").to_string().dimmed(),
                        format!("[{}]", turn.intent).yellow(),
                        turn.user_text
                    );
                }
                println!();
            }
            "clear" => {
                agent.clear_history();
                println!("{}", "History cleared.".dimmed());
                println!();
            }
            text => print_reply(&agent.process_message(text).await),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_agent::{OfflineDataAccess, StaticFixtures};
    use std::sync::Arc;

    fn offline_agent() -> CampusAgent {
        CampusAgent::new(Arc::new(OfflineDataAccess), Arc::new(StaticFixtures::new()))
    }

    #[tokio::test]
    async fn test_repl_stops_at_exit() {
        let agent = offline_agent();
        let input: &[u8] = b"Hello!\n\n  \nhistory\nexit\nWhat's for lunch today?\n";
        repl(&agent, input).await.unwrap();
        let history = agent.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].user_text, "Hello!");
    }

    #[tokio::test]
    async fn test_repl_clear_and_eof() {
        let agent = offline_agent();
        let input: &[u8] = b"hi\nclear\nthanks";
        repl(&agent, input).await.unwrap();
        let history = agent.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].user_text, "thanks");
    }
}
