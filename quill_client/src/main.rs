use pico_args::Arguments;
use quill::{CUSTOM_STYLE, ContentType, DEFAULT_LANGUAGE};
use quill_client::{FormState, GenerationClient, Outcome, TerminalSurface, form::FieldHints};
use rustyline::{DefaultEditor, error::ReadlineError};
use std::{path::PathBuf, thread};
use tokio::sync::mpsc::{Receiver, Sender};
use tracing_subscriber::EnvFilter;

mod models;

use models::repl::UserRequest;

const STYLES: [&str; 7] = [
    "funny",
    "scary",
    "romantic",
    "mysterious",
    "adventurous",
    "heartwarming",
    CUSTOM_STYLE,
];

const COMMANDS: &str = "\
Commands:
  generate, g      Fill in the form and generate
  regenerate, r    Generate again from the last request
  help, h          Show this message
  CTRL+D           Quit
";

fn ask(rl: &mut DefaultEditor, label: &str) -> Result<String, ReadlineError> {
    rl.readline(&format!("{label}: "))
}

/// Walks the user through every form field. Fields whose meaning depends on
/// the content type are labelled accordingly.
fn read_form(rl: &mut DefaultEditor) -> Result<FormState, ReadlineError> {
    let topic = ask(rl, "Topic")?;
    let style = ask(rl, &format!("Style ({})", STYLES.join("/")))?
        .trim()
        .to_lowercase();
    let custom_style = if style == CUSTOM_STYLE {
        ask(rl, "Custom style")?
    } else {
        String::new()
    };
    let content_type = ask(rl, "Content type (poem/story)")?.trim().to_lowercase();
    let language = ask(rl, &format!("Language [{DEFAULT_LANGUAGE}]"))?
        .trim()
        .to_string();

    let (length, author) = match content_type.parse::<ContentType>() {
        Ok(content_type) => {
            let hints = FieldHints::for_content_type(content_type);
            let length = ask(
                rl,
                &format!(
                    "{} ({}, {}-{}) [{}]",
                    hints.length_label,
                    hints.length_help,
                    hints.length_min,
                    hints.length_max,
                    hints.length_placeholder
                ),
            )?;
            let author = ask(
                rl,
                &format!("{} ({}, optional)", hints.author_label, hints.author_help),
            )?;
            (length, author)
        }
        // The form gets rejected anyway, so don't bother asking.
        Err(_) => (String::new(), String::new()),
    };

    Ok(FormState {
        topic,
        style,
        custom_style,
        content_type,
        language,
        length,
        author,
    })
}

fn quit(rl: &mut DefaultEditor, history_path: Option<&PathBuf>) -> ! {
    if let Some(path) = history_path {
        let _ = rl.save_history(path);
    }
    std::process::exit(0);
}

/// User REPL loop. Waits for a prompt from the main loop, then reads
/// commands until one produces a request. The REPL stays inactive while
/// the request is handled.
fn repl(
    mut rx: Receiver<String>,
    tx: Sender<UserRequest>,
    history_path: Option<PathBuf>,
) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;
    if let Some(path) = &history_path {
        let _ = rl.load_history(path);
    }

    while let Some(prompt) = rx.blocking_recv() {
        loop {
            let request = match rl.readline(&prompt) {
                Ok(input) => {
                    let command = input.trim().to_lowercase();
                    if !command.is_empty() {
                        let _ = rl.add_history_entry(&command);
                    }
                    match command.as_str() {
                        "generate" | "g" => match read_form(&mut rl) {
                            Ok(form) => UserRequest::Generate(form),
                            Err(ReadlineError::Interrupted) => {
                                println!("^C");
                                continue;
                            }
                            Err(ReadlineError::Eof) => quit(&mut rl, history_path.as_ref()),
                            Err(err) => return Err(err),
                        },
                        "regenerate" | "r" => UserRequest::Regenerate,
                        "help" | "h" => {
                            println!("{COMMANDS}");
                            continue;
                        }
                        "" => continue,
                        other => {
                            println!("Unknown command '{other}'. Type 'help' for commands.");
                            continue;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => quit(&mut rl, history_path.as_ref()),
                Err(err) => return Err(err),
            };
            tx.blocking_send(request)
                .expect("user request channel closed");
            break;
        }
    }
    Ok(())
}

fn prompt(surface: &TerminalSurface) -> String {
    match surface.visible_notice() {
        Some(message) => format!("[{message}] >> "),
        None => ">> ".to_string(),
    }
}

const HELP: &str = "\
Generate poems and short stories

USAGE:
  quill_client [OPTIONS]

OPTIONS:
  --url     Generation server URL  [default: $QUILL_URL or http://127.0.0.1:8000]

FLAGS:
  -h, --help    Print help information
";

struct Args {
    url: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        println!("{}", HELP);
        std::process::exit(0);
    }

    let args = Args {
        url: pargs.value_from_str("--url").unwrap_or_else(|_| {
            dotenvy::var("QUILL_URL").unwrap_or("http://127.0.0.1:8000".into())
        }),
    };
    let Args { url } = args;

    // Logs go to stderr so they don't interleave with generated content.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let (start_repl_sender, start_repl_receiver) = tokio::sync::mpsc::channel(1);
    let (user_request_sender, mut user_request_receiver): (
        Sender<UserRequest>,
        Receiver<UserRequest>,
    ) = tokio::sync::mpsc::channel(1);

    let history_path = dirs_next::home_dir().map(|home| home.join(".quill_history"));
    thread::spawn(|| repl(start_repl_receiver, user_request_sender, history_path));

    let client = GenerationClient::new(&url, TerminalSurface::new());
    println!("{COMMANDS}");
    start_repl_sender.send(prompt(client.surface())).await?;

    while let Some(user_request) = user_request_receiver.recv().await {
        match user_request {
            UserRequest::Generate(form) => {
                client.submit(&form).await;
            }
            UserRequest::Regenerate => {
                if let Outcome::Ignored = client.regenerate().await {
                    println!("Nothing to regenerate yet.");
                }
            }
        }
        println!();
        start_repl_sender.send(prompt(client.surface())).await?;
    }
    Ok(())
}
