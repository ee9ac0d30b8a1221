//! Plain-text rendering of controller responses.

use std::fmt::Write;

use oc_peer_registry::{HealthBody, PeerRecord};

const HEADERS: [&str; 4] = ["NODE", "VIRTUAL IP", "ENDPOINT", "PUBKEY"];

/// Render the roster as an aligned table, ordered by virtual address.
pub fn roster_table(peers: &[PeerRecord]) -> String {
    if peers.is_empty() {
        return "No peers registered.\n".to_string();
    }

    let mut sorted: Vec<&PeerRecord> = peers.iter().collect();
    sorted.sort_by_key(|p| p.virtual_ip);

    let rows: Vec<[String; 4]> = sorted
        .iter()
        .map(|p| {
            [
                p.node_id.to_string(),
                p.virtual_ip.to_string(),
                p.endpoint.to_string(),
                p.public_key.short(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    let _ = writeln!(out, "\n{} peer(s)", rows.len());
    out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

pub fn health_summary(health: &HealthBody) -> String {
    format!(
        "{} {} ({})\npeers: {}\naddresses: {} allocated, {} remaining\n",
        health.service,
        health.version,
        health.status,
        health.peers,
        health.addresses_allocated,
        health.addresses_remaining,
    )
}
