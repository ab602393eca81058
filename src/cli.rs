use clap::Parser;
use std::net::{Ipv4Addr, SocketAddr};

#[derive(Parser, Debug)]
#[command(name = "static-dns-server")]
#[command(about = "An authoritative DNS server for a static record table", long_about = None)]
pub struct Args {
    /// Address to listen on, of the form <ip>:<port>
    #[arg(short, long, default_value = "0.0.0.0:2053", value_parser = parse_socket_addr)]
    pub bind: SocketAddr,

    /// Static A record of the form <name>=<ipv4>; may be repeated
    #[arg(short, long = "record", value_parser = parse_record)]
    pub records: Vec<(String, Ipv4Addr)>,
}

fn parse_socket_addr(s: &str) -> Result<SocketAddr, String> {
    s.parse::<SocketAddr>().map_err(|_| {
        format!(
            "Invalid address format: '{}'. Expected format: <ip>:<port>",
            s
        )
    })
}

fn parse_record(s: &str) -> Result<(String, Ipv4Addr), String> {
    let (name, addr) = s.split_once('=').ok_or_else(|| {
        format!(
            "Invalid record format: '{}'. Expected format: <name>=<ipv4>",
            s
        )
    })?;
    if name.is_empty() {
        return Err(format!("Invalid record '{}': empty name", s));
    }
    let addr = addr
        .parse::<Ipv4Addr>()
        .map_err(|_| format!("Invalid record '{}': '{}' is not an IPv4 address", s, addr))?;
    Ok((name.to_string(), addr))
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
