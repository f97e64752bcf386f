use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use eyre::{Result, bail};
use log::info;

mod cli;

use cli::{Cli, OutputFormat};
use ytq::session::{ExtractState, Notice, Session};

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytq.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytq")
        .join("logs")
}

fn read_url_from_stdin() -> Result<String> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            return Ok(line.trim().to_string());
        }
    }
    bail!("no URL provided\n\nUsage: ytq <URL>\n       echo <URL> | ytq");
}

fn show_notice(notice: &Notice) {
    if notice.destructive {
        eprintln!("error: {}", notice.text);
    } else {
        eprintln!("{}", notice.text);
    }
}

async fn chat_loop(
    client: &reqwest::Client,
    config: &ytq::config::Config,
    session: &mut Session,
) -> Result<()> {
    if !session.start_new_chat() {
        bail!("chat requires an extracted transcript");
    }
    eprintln!("Chat started. Ask questions about the transcript (Ctrl-D to quit).");

    let stdin = io::stdin();
    loop {
        eprint!("> ");
        io::stderr().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let Some(request) = session.begin_send(&line) else {
            continue;
        };

        let result = ytq::chat::answer(client, config, &request).await;
        let notice = session.finish_send(result);
        if let Some(notice) = notice {
            show_notice(&notice);
        }

        if let Some(message) = session.messages().last() {
            println!("{}", message.content);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let cli = <Cli as clap::Parser>::parse();

    // Load config file (non-fatal if missing/invalid)
    let mut config = ytq::config::Config::load().unwrap_or_default();
    if cli.model.is_some() {
        config.gemini_model = cli.model.clone();
    }

    if cli.verbose {
        let config_path = ytq::config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
    }

    let client = reqwest::Client::new();
    let mut session = Session::new();

    let url = match cli.url {
        Some(ref url) => url.trim().to_string(),
        None => read_url_from_stdin()?,
    };

    // Local validation first; nothing goes on the wire for a bad URL
    if !session.submit_url(&url) {
        let message = session.error().unwrap_or("invalid input").to_string();
        bail!(
            "{message}\n\nSupported formats:\n  https://www.youtube.com/watch?v=ID\n  https://youtu.be/ID\n  https://www.youtube.com/embed/ID"
        );
    }

    let result = ytq::transcript::fetch(&client, &config, &url).await;
    let notice = session.finish_extract(result);

    if let ExtractState::Failed(message) = session.state() {
        show_notice(&notice);
        bail!("{message}");
    }
    if cli.verbose {
        show_notice(&notice);
    }

    let transcript = session.transcript().expect("extracted state holds a transcript");

    if cli.verbose {
        eprintln!(
            "Video: {} ({})\nSegments: {}",
            transcript.title(),
            transcript.video_id.as_deref().unwrap_or("unknown"),
            transcript.segments.len(),
        );
    }

    let rendered = match cli.format {
        OutputFormat::Text => ytq::output::render_text(transcript),
        OutputFormat::Timestamps => ytq::output::render_timestamps(transcript),
        OutputFormat::Json => ytq::output::render_json(transcript),
    };

    if let Some(ref path) = cli.output {
        std::fs::write(path, &rendered)?;
        if cli.verbose {
            eprintln!("Output written to: {}", path.display());
        }
    } else {
        println!("{rendered}");
    }

    if cli.chat {
        chat_loop(&client, &config, &mut session).await?;
    }

    Ok(())
}
