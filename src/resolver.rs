//! Static record table and the pure lookup over it.

use std::collections::HashMap;
use std::net::Ipv4Addr;

use crate::protocol::{CLASS_IN, TYPE_A};

/// Immutable hostname -> IPv4 table.
///
/// Built once before the server starts and shared read-only across handler
/// invocations, so lookups need no synchronization. Keys are stored folded
/// to lowercase; `lookup` folds the queried name the same way.
#[derive(Debug, Clone, Default)]
pub struct RecordTable {
    records: HashMap<String, [u8; 4]>,
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, addr: Ipv4Addr) {
        self.records.insert(name.to_ascii_lowercase(), addr.octets());
    }

    pub fn lookup(&self, name: &str) -> Option<[u8; 4]> {
        self.records.get(&name.to_ascii_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<(String, Ipv4Addr)> for RecordTable {
    fn from_iter<I: IntoIterator<Item = (String, Ipv4Addr)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, addr) in iter {
            table.insert(&name, addr);
        }
        table
    }
}

/// Result of resolving one question against the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success([u8; 4]),
    NameNotFound,
    TypeNotSupported,
}

/// Look a question up in the table. Only A/IN questions are served; anything
/// else is reported as unsupported rather than missing.
pub fn resolve(table: &RecordTable, name: &str, qtype: u16, qclass: u16) -> Outcome {
    if qtype != TYPE_A || qclass != CLASS_IN {
        return Outcome::TypeNotSupported;
    }
    match table.lookup(name) {
        Some(addr) => Outcome::Success(addr),
        None => Outcome::NameNotFound,
    }
}
