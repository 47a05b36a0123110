use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use talk_client::{HttpClientOptions, HttpTalkClient, TalkClient};
use talk_config::AppConfig;
use talk_thread::{LoadOutcome, ReloadPolicy, SessionState, TopicSession};
use tokio::io::{AsyncBufReadExt, BufReader};

mod cli;
mod commands;
mod logger;
mod render;

use cli::Cli;
use commands::{Command, HELP};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_file = logger::init(cli.log_file.clone())?;

    log::info!("Starting talk-topic");

    let config = AppConfig::load();
    let client = HttpTalkClient::new(HttpClientOptions {
        host: cli.host.unwrap_or(config.wiki_host),
        user_agent: config.user_agent,
        timeout: Duration::from_secs(config.request_timeout_secs),
    })?;

    let reload_policy = if config.preserve_expand_state {
        ReloadPolicy::PreserveExpanded
    } else {
        ReloadPolicy::Reset
    };
    let mut session = TopicSession::new(cli.page).with_reload_policy(reload_policy);

    let mut phases = session.subscribe();
    tokio::spawn(async move {
        while phases.changed().await.is_ok() {
            let phase = phases.borrow_and_update().clone();
            log::debug!("Session phase: {:?}", phase);
        }
    });

    println!("Loading {} from {}...", session.page_title(), client.host());
    let outcome = session.load(&client, cli.topic).await;
    print_outcome(&session, outcome);
    println!("{}", HELP);

    let result = run(&mut session, &client).await;

    log::info!("Exiting talk-topic (log: {})", log_file.display());
    result
}

async fn run(session: &mut TopicSession, client: &dyn TalkClient) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        match command {
            Command::Toggle(id) => {
                let script = session.toggle_expand(&id);
                println!("{}", render::render_ranges(&script.ranges()));
                print_view(session);
            }
            Command::List => print_view(session),
            Command::Reload => match session.reload(client).await {
                Some(outcome) => print_outcome(session, outcome),
                None => eprintln!("No topic to reload"),
            },
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
        }
    }

    Ok(())
}

fn print_outcome(session: &TopicSession, outcome: LoadOutcome) {
    match (outcome, session.state()) {
        (LoadOutcome::Applied, SessionState::Loaded(topic)) => {
            println!(
                "Topic #{}: {} ({} replies)",
                topic.section_index(),
                topic.topic_id(),
                topic.tree().len()
            );
            print_view(session);
        }
        (_, SessionState::Error(err)) => eprintln!("{}", err),
        (LoadOutcome::Discarded, _) => log::debug!("Load result discarded"),
        (_, state) => log::warn!("Unexpected state after load: {:?}", state.phase()),
    }
}

fn print_view(session: &TopicSession) {
    match session.flat_view() {
        Some([]) => println!("(no replies)"),
        Some(rows) => println!("{}", render::render_view(rows)),
        None => eprintln!("No topic loaded"),
    }
}
