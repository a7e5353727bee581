//! Asynchronous multi-room chat server.
//!
//! Every port given on the command line becomes its own isolated room.

use async_std::task;
use roomcast::server;
use roomcast::utils::ChatResult;
use tracing_subscriber::EnvFilter;

fn main() -> ChatResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let (ports, workers) = parse_args()?;
    tracing::info!(?ports, workers, "server starting");

    task::block_on(server::run(ports, workers))
}

fn parse_args() -> ChatResult<(Vec<u16>, usize)> {
    let mut ports = Vec::new();
    let mut workers = 1;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--workers" {
            let value = args.next().ok_or("--workers needs a value")?;
            workers = value.parse()?;
        } else {
            ports.push(arg.parse()?);
        }
    }

    if ports.is_empty() {
        eprintln!("Usage: server [--workers N] <port> [<port> ...]");
        std::process::exit(1);
    }

    Ok((ports, workers))
}
