//! kvlink CLI Client
//!
//! Command-line interface for RESP key-value servers. Prints one JSON
//! envelope on stdout; logs go to stderr.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use kvlink::client::DEFAULT_KEYS_LIMIT;
use kvlink::output::{DelView, Envelope, InfoView, PingView, SetView, ValueView};
use kvlink::{Client, ClientConfig, KvError};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

/// kvlink CLI
#[derive(Parser, Debug)]
#[command(name = "kvlink-cli")]
#[command(about = "Query a RESP key-value server and print JSON")]
#[command(version)]
struct Args {
    /// Server address (host:port)
    #[arg(short, long, env = "KVLINK_ADDR", default_value = "localhost:6379")]
    addr: String,

    /// Password sent with AUTH after connecting
    #[arg(short, long, env = "KVLINK_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Connect timeout in milliseconds
    #[arg(long, default_value = "5000")]
    connect_timeout_ms: u64,

    /// Per read/write timeout in milliseconds
    #[arg(long, default_value = "10000")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,

        /// Expiry in seconds
        #[arg(long)]
        ttl: Option<u64>,
    },

    /// Delete one or more keys
    Del {
        /// The keys to delete
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// List keys matching a pattern
    Keys {
        /// Glob-style pattern
        #[arg(default_value = "*")]
        pattern: String,

        /// Maximum number of keys to return (0 = unlimited)
        #[arg(long, default_value_t = DEFAULT_KEYS_LIMIT)]
        limit: usize,
    },

    /// Show server status
    Info,

    /// Ping the server
    Ping,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Get { .. } => "get",
            Commands::Set { .. } => "set",
            Commands::Del { .. } => "del",
            Commands::Keys { .. } => "keys",
            Commands::Info => "info",
            Commands::Ping => "ping",
        }
    }
}

fn main() -> ExitCode {
    // Initialize tracing/logging on stderr so stdout stays machine-readable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let name = args.command.name();

    let config = ClientConfig::builder()
        .addr(&args.addr)
        .password(args.password.clone())
        .connect_timeout_ms(args.connect_timeout_ms)
        .op_timeout_ms(args.timeout_ms)
        .build();

    tracing::debug!("kvlink v{} -> {}", kvlink::VERSION, config.addr);

    let outcome = Client::connect(&config).and_then(|mut client| run(&mut client, args.command));

    match outcome {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!("{} failed: {}", name, e);
            print_json(&Envelope::failure(name, &e));
            ExitCode::FAILURE
        }
    }
}

/// Execute one subcommand; the client is dropped (socket closed) afterwards
fn run(client: &mut Client, command: Commands) -> Result<String, KvError> {
    let name = command.name();
    match command {
        Commands::Get { key } => {
            let value = client.get(key.clone())?;
            render(name, ValueView::new(key, value))
        }
        Commands::Set { key, value, ttl } => {
            let status = client.set(key.clone(), value, ttl)?;
            render(
                name,
                SetView {
                    key,
                    status,
                    ttl_secs: ttl,
                },
            )
        }
        Commands::Del { keys } => {
            let deleted = client.del(keys.clone())?;
            render(name, DelView { keys, deleted })
        }
        Commands::Keys { pattern, limit } => render(name, client.keys(&pattern, limit)?),
        Commands::Info => render(
            name,
            InfoView {
                fields: client.info()?,
            },
        ),
        Commands::Ping => render(
            name,
            PingView {
                reply: client.ping()?,
            },
        ),
    }
}

fn render<T: Serialize>(name: &'static str, data: T) -> Result<String, KvError> {
    Envelope::success(name, data)
        .to_json()
        .map_err(|e| KvError::Io(e.into()))
}

fn print_json<T: Serialize>(envelope: &Envelope<T>) {
    match envelope.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("failed to render output: {}", e),
    }
}
