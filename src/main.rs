use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use nova_bot::client::{ChatClient, HttpTransport, MessageTransport, UiMessage};
use nova_bot::domains::chat::Sender;
use nova_bot::employees::EmployeeTable;
use nova_bot::error::{NovaBotError, Result};

const GREETING: &str = "👋 Hey there! I’m Nova.\nAsk me anything, anytime.";

#[derive(Parser, Debug)]
#[command(name = "nova-bot")]
#[command(about = "Nova terminal front ends")]
#[command(version = nova_bot::BUILD_VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Chat with a running nova-botd.
    Chat {
        #[arg(long, env = "NOVA_SERVER", default_value = "http://localhost:4002")]
        server: String,

        #[arg(long, default_value_t = 60)]
        timeout_seconds: u64,
    },
    /// Browse and delete rows of the demo employee table.
    Employees,
}

#[tokio::main]
async fn main() -> Result<()> {
    nova_bot::logging::init_cli_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Chat {
            server,
            timeout_seconds,
        } => run_chat(&server, Duration::from_secs(timeout_seconds.max(1))).await,
        Command::Employees => run_employees().await,
    }
}

async fn run_chat(server: &str, timeout: Duration) -> Result<()> {
    let transport = HttpTransport::new(server, timeout)?;
    let mut client = ChatClient::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{GREETING}");
    prompt("Ask Nova...").await?;
    while let Some(line) = lines.next_line().await.map_err(io_error)? {
        if matches!(line.trim(), "/quit" | "/exit") {
            break;
        }
        client.set_input(line);
        let Some(pending) = client.begin_send() else {
            prompt("Ask Nova...").await?;
            continue;
        };
        let seen = client.messages().len();
        if let Some(placeholder) = client.messages().get(pending.placeholder_id) {
            println!("{}", render_bubble(placeholder));
        }

        let result = transport.post_message(&pending.text).await;
        client.complete(pending, result);

        // The placeholder is either replaced in place or followed by an
        // error bubble; print whatever changed since the send started.
        for message in client.messages().iter().skip(seen - 1) {
            if !message.temp {
                println!("{}", render_bubble(message));
            }
        }
        prompt("Ask Nova...").await?;
    }
    Ok(())
}

async fn run_employees() -> Result<()> {
    let mut table = EmployeeTable::seeded();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Employees\n\n{}", table.render());
    prompt("list | delete <id> | quit").await?;
    while let Some(line) = lines.next_line().await.map_err(io_error)? {
        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (Some("quit" | "exit"), _) => break,
            (Some("list"), _) => println!("{}", table.render()),
            (Some("delete"), Some(id)) => match id.parse::<u32>() {
                Ok(id) => {
                    if table.delete(id) == 0 {
                        println!("No employee with id {id}.");
                    }
                    println!("{}", table.render());
                }
                Err(_) => println!("Not an id: {id}"),
            },
            (None, _) => {}
            _ => println!("Unknown command: {}", line.trim()),
        }
        prompt("list | delete <id> | quit").await?;
    }
    Ok(())
}

fn render_bubble(message: &UiMessage) -> String {
    match (message.sender, message.temp) {
        (Sender::User, _) => format!("you> {}", message.text),
        (Sender::Bot, true) => format!("nova… {}", message.text),
        (Sender::Bot, false) => format!("nova> {}", message.text),
    }
}

async fn prompt(hint: &str) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(format!("[{hint}] > ").as_bytes())
        .await
        .map_err(io_error)?;
    stdout.flush().await.map_err(io_error)
}

fn io_error(err: std::io::Error) -> NovaBotError {
    NovaBotError::Runtime(err.to_string())
}
