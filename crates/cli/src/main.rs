//! `alfresco-rest` command-line entry point.
//!
//! This binary is the composition root of the workspace. Responsibilities:
//!
//! 1. **Wire observability**: configure `tracing-subscriber` with an
//!    `EnvFilter` (`RUST_LOG` wins over `--log-level`) and either a human or a
//!    JSON formatting layer on stderr. Spans and events from every crate in the
//!    workspace flow through it.
//! 2. **Inspect the codecs offline**: `decode` strips the envelope of a saved
//!    response body, `join` / `split` run the multi-value parameter codec.
//! 3. **Issue a request**: `get` builds a [`client::RestClient`] from flags and
//!    decodes the live response.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use client::{ClientConfig, QueryParams, RestClient};
use codec::envelope::{self, Shape};
use codec::{multi_value, MultiValue};
use model::{PaginatedList, Ticket};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "alfresco-rest")]
#[command(about = "Alfresco v1 REST API wire codec and client tool")]
#[command(version)]
struct Cli {
    /// Default log filter when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode an enveloped response body and print the unwrapped value
    Decode {
        /// Shape the body is expected to have
        #[arg(long, value_enum)]
        shape: ShapeArg,
        /// File holding the body (stdin when omitted)
        input: Option<PathBuf>,
    },
    /// Join values into one multi-valued parameter token
    Join {
        /// Values in order; none yields the empty token
        values: Vec<String>,
    },
    /// Split a multi-valued parameter token into its values
    Split {
        /// Token to split; omitted means the parameter is absent
        token: Option<String>,
    },
    /// GET an API path and print the unwrapped response
    Get {
        /// Repository root, e.g. http://localhost:8080/alfresco
        #[arg(long)]
        base_url: String,
        /// API path appended to the base URL
        #[arg(long)]
        path: String,
        /// Shape the response is expected to have
        #[arg(long, value_enum)]
        shape: ShapeArg,
        /// Single-valued query parameter as name=value (repeatable)
        #[arg(long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,
        /// One value of a multi-valued parameter as name=value (repeatable)
        #[arg(long = "multi", value_name = "NAME=VALUE")]
        multi: Vec<String>,
        /// Request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout_secs: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ShapeArg {
    /// `{"entry": {...}}` authentication ticket
    Ticket,
    /// `{"list": {...}}` of ticket entries
    Tickets,
    /// `{"list": {...}}` of arbitrary JSON entries
    List,
    /// Bare JSON, no envelope
    Raw,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_json)?;

    match cli.command {
        Commands::Decode { shape, input } => {
            let bytes = read_input(input.as_deref())?;
            let value = decode_as(shape, &bytes)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Commands::Join { values } => {
            let token = join_values(values);
            println!("{token}");
        }
        Commands::Split { token } => match multi_value::decode(token.as_deref()) {
            Some(values) => {
                for value in values.values() {
                    println!("{value}");
                }
            }
            None => eprintln!("(absent)"),
        },
        Commands::Get {
            base_url,
            path,
            shape,
            params,
            multi,
            timeout_secs,
        } => {
            let mut config = ClientConfig::new(base_url)?;
            config.timeout_secs = timeout_secs;
            let query = build_query(&params, &multi)?;

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("failed to start async runtime")?;
            let value = runtime.block_on(fetch(config, &path, &query, shape))?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}

fn init_tracing(default_level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("invalid log filter")?;

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

fn read_input(path: Option<&std::path::Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Decodes `bytes` as `shape` and returns its un-enveloped representation.
fn decode_as(shape: ShapeArg, bytes: &[u8]) -> Result<Value> {
    match shape {
        ShapeArg::Ticket => unwrapped::<Ticket>(bytes),
        ShapeArg::Tickets => unwrapped::<PaginatedList<Ticket>>(bytes),
        ShapeArg::List => unwrapped::<PaginatedList<Value>>(bytes),
        ShapeArg::Raw => unwrapped::<Value>(bytes),
    }
}

fn unwrapped<S: Shape>(bytes: &[u8]) -> Result<Value> {
    let value: S = envelope::decode_slice(bytes)?;
    Ok(value.encode_structural(serde_json::value::Serializer)?)
}

fn join_values(values: Vec<String>) -> String {
    MultiValue::new(values).to_string()
}

/// Builds query parameters from `name=value` flags.
///
/// `--multi` values sharing a name are collected, in order, into one
/// multi-valued parameter.
fn build_query(params: &[String], multi: &[String]) -> Result<QueryParams> {
    let mut query = QueryParams::new();
    for param in params {
        let (name, value) = split_pair(param)?;
        query.push(name, value);
    }

    let mut grouped: Vec<(&str, Vec<&str>)> = Vec::new();
    for entry in multi {
        let (name, value) = split_pair(entry)?;
        match grouped.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => grouped.push((name, vec![value])),
        }
    }
    for (name, values) in grouped {
        query.push_multi(name, Some(&MultiValue::new(values)));
    }
    Ok(query)
}

fn split_pair(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => bail!("expected NAME=VALUE, got '{raw}'"),
    }
}

async fn fetch(
    config: ClientConfig,
    path: &str,
    query: &QueryParams,
    shape: ShapeArg,
) -> Result<Value> {
    let client = RestClient::new(config)?;
    info!(path, "fetching");
    let value = match shape {
        ShapeArg::Ticket => structural(client.get::<Ticket>(path, query).await?)?,
        ShapeArg::Tickets => {
            structural(client.get::<PaginatedList<Ticket>>(path, query).await?)?
        }
        ShapeArg::List => {
            structural(client.get::<PaginatedList<Value>>(path, query).await?)?
        }
        ShapeArg::Raw => client.get::<Value>(path, query).await?,
    };
    Ok(value)
}

fn structural<S: Shape>(value: S) -> Result<Value> {
    Ok(value.encode_structural(serde_json::value::Serializer)?)
}
