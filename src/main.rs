mod cli;
mod codec;
mod errors;
mod handler;
mod parsers;
mod protocol;
mod resolver;
mod response_builder;

use std::sync::Arc;

use resolver::RecordTable;
use tokio::net::UdpSocket;
use tracing::{debug, error, info, warn, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let args = cli::Args::parse_args();

    // The table is built once and never mutated afterwards, so handler
    // tasks share it behind a plain Arc with no lock.
    let table: RecordTable = args.records.into_iter().collect();
    let table = Arc::new(table);
    if table.is_empty() {
        warn!("No records configured; every lookup will answer NXDOMAIN");
    } else {
        info!("Serving {} static A record(s)", table.len());
    }

    let sock = Arc::new(UdpSocket::bind(args.bind).await?);
    info!("DNS server listening on {}", args.bind);

    let mut buf = [0; 1024];

    loop {
        let (len, addr) = sock.recv_from(&mut buf).await?;
        debug!("Received {} bytes from {}", len, addr);

        let datagram = buf[..len].to_vec();
        let sock = Arc::clone(&sock);
        let table = Arc::clone(&table);

        // `handle` never fails and never blocks, so each datagram gets a
        // fire-and-forget task.
        tokio::spawn(async move {
            let reply = handler::handle(&datagram, &table);
            match sock.send_to(&reply, addr).await {
                Ok(sent) => info!("Sent DNS response ({} bytes) to {}", sent, addr),
                Err(e) => error!("Failed to send DNS response to {}: {}", addr, e),
            }
        });
    }
}
