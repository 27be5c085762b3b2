//! chatbox CLI: Terminal support widget backed by an answering service

use chatbox_engine::{
    answerer_from_config, floating_text, Config, ConversationController, IntentsDocument, Message,
    PresentationAdapter, Role, CHATBOX_DIR,
};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Support chat widget for the terminal
#[derive(Parser)]
#[command(name = "chatbox")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: .chatbox/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Answering service URL, overriding the config
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Answer from the intents file's patterns instead of the service
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat widget (default when no command specified)
    Tui,

    /// Send one message and print the reply
    Ask {
        /// Message to send
        message: String,

        /// Print the whole conversation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the floating text the widget would show
    Greeting {
        /// Intents file or URL, overriding the config
        #[arg(long)]
        intents: Option<String>,
    },

    /// Write a default config to .chatbox/config.json
    Init,
}

const LOG_FILE: &str = "chatbox.log";
const DEFAULT_LOG_FILTER: &str = "chatbox=info";

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);

    match cli.command {
        None | Some(Commands::Tui) => {
            init_file_logging();
            let config = load_config(&config_path, cli.endpoint, cli.offline);
            let rt = runtime();
            if let Err(e) = rt.block_on(chatbox_tui::run_tui(&config)) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Ask { message, json }) => {
            init_stderr_logging();
            let config = load_config(&config_path, cli.endpoint, cli.offline);
            cmd_ask(&config, &message, json);
        }
        Some(Commands::Greeting { intents }) => {
            init_stderr_logging();
            let config = load_config(&config_path, cli.endpoint, cli.offline);
            cmd_greeting(&config, intents);
        }
        Some(Commands::Init) => {
            init_stderr_logging();
            cmd_init(&config_path);
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env("CHATBOX_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into())
}

fn init_stderr_logging() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Log to a file, since the TUI owns the terminal.
fn init_file_logging() {
    let dir = Path::new(CHATBOX_DIR);
    let file = std::fs::create_dir_all(dir).and_then(|()| File::create(dir.join(LOG_FILE)));

    match file {
        Ok(file) => {
            tracing_subscriber::registry()
                .with(env_filter())
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        // Logging is best effort; the widget runs without it.
        Err(e) => eprintln!("Warning: cannot open log file: {e}"),
    }
}

fn runtime() -> tokio::runtime::Runtime {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    }
}

fn load_config(path: &Path, endpoint: Option<String>, offline: bool) -> Config {
    let mut config = match Config::load_or_default(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config from {}: {e}", path.display());
            std::process::exit(1);
        }
    };

    if let Some(endpoint) = endpoint {
        config.endpoint = endpoint;
    }
    config.offline |= offline;
    config
}

/// Prints new messages as they are appended, and the typing indicator.
struct ConsoleAdapter {
    shown: usize,
    quiet: bool,
}

impl ConsoleAdapter {
    fn new(quiet: bool) -> Self {
        Self { shown: 0, quiet }
    }
}

impl PresentationAdapter for ConsoleAdapter {
    fn render(&mut self, log: &[Message]) {
        if !self.quiet {
            for message in log.iter().skip(self.shown) {
                println!("{}: {}", message.sender().display_name(), message.text());
            }
        }
        self.shown = log.len();
    }

    fn show_pending_indicator(&mut self) {
        if !self.quiet {
            eprintln!("{} is typing...", Role::Assistant.display_name());
        }
    }

    fn hide_pending_indicator(&mut self) {}

    fn set_input_enabled(&mut self, _enabled: bool) {}
}

fn cmd_ask(config: &Config, message: &str, json: bool) {
    let rt = runtime();
    let answerer = match rt.block_on(answerer_from_config(config)) {
        Ok(answerer) => answerer,
        Err(e) => {
            eprintln!("Failed to create answerer: {e}");
            std::process::exit(1);
        }
    };

    let mut controller =
        ConversationController::from_config(config, ConsoleAdapter::new(json), answerer);
    controller.initialize();

    let outcome = rt.block_on(controller.submit(message));

    if outcome.is_ignored() {
        eprintln!("Nothing to send: message is blank");
        std::process::exit(1);
    }

    if json {
        match serde_json::to_string_pretty(controller.log()) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Failed to serialize conversation: {e}");
                std::process::exit(1);
            }
        }
    }

    if outcome.is_failed() {
        std::process::exit(1);
    }
}

fn cmd_greeting(config: &Config, intents: Option<String>) {
    let Some(source) = intents.or_else(|| config.intents.clone()) else {
        println!("{}", floating_text(None));
        return;
    };

    let rt = runtime();
    let doc = rt.block_on(IntentsDocument::load_from(&source));
    println!("{}", floating_text(doc.as_ref()));
}

fn cmd_init(config_path: &Path) {
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return;
    }

    match Config::default().save(config_path) {
        Ok(()) => println!("Created {}", config_path.display()),
        Err(e) => {
            eprintln!("Failed to write config: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_command_is_tui() {
        let cli = Cli::parse_from(["chatbox"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_overrides_after_subcommand() {
        let cli = Cli::parse_from([
            "chatbox",
            "ask",
            "where is my order?",
            "--json",
            "--endpoint",
            "http://localhost:9000/predict",
        ]);

        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost:9000/predict"));
        match cli.command {
            Some(Commands::Ask { message, json }) => {
                assert_eq!(message, "where is my order?");
                assert!(json);
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn test_console_adapter_tracks_shown_messages() {
        let mut adapter = ConsoleAdapter::new(true);
        let log = vec![Message::assistant("hi"), Message::user("hello")];

        adapter.render(&log[..1]);
        assert_eq!(adapter.shown, 1);
        adapter.render(&log);
        assert_eq!(adapter.shown, 2);
    }

    #[test]
    fn test_load_config_applies_endpoint_override() {
        let dir = TempDir::new().unwrap();
        let config = load_config(
            &dir.path().join("none.json"),
            Some("http://example.test/predict".into()),
            false,
        );
        assert_eq!(config.endpoint, "http://example.test/predict");
        assert_eq!(config.min_reply_delay_ms, 3000);
        assert!(!config.offline);
    }

    #[test]
    fn test_offline_flag_overrides_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        Config::default().save(&path).unwrap();

        let cli = Cli::parse_from(["chatbox", "ask", "hi", "--offline"]);
        let config = load_config(&path, cli.endpoint, cli.offline);
        assert!(config.offline);
    }
}
