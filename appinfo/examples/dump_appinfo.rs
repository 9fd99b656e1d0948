// SPDX-License-Identifier: MIT
//! Dump an appinfo.vdf as JSON lines
//!
//! Usage: `cargo run --example dump_appinfo -- <path/to/appinfo.vdf> [app id]`

use appinfo::Container;
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .ok_or("usage: dump_appinfo <appinfo.vdf> [app id]")?;
    let only: Option<u32> = args.next().map(|id| id.parse()).transpose()?;

    let container = Container::open(&path)?;
    eprintln!(
        "{}: universe {}, {} apps, {} unreadable",
        path,
        container.header().universe,
        container.len(),
        container.failed_ids().len()
    );

    for entry in &container {
        if only.is_some_and(|id| id != entry.id) {
            continue;
        }

        let line = json!({
            "appid": entry.id,
            "change_number": entry.header.change_number,
            "last_updated": entry.header.last_updated_at().map(|at| at.to_rfc3339()),
            "data_hash": entry.header.data_hash,
            "name": entry.document["common"]["name"].as_str(),
            "type": entry.document["common"]["type"].as_str(),
            "logo_position": &entry.document["common"]["library_assets"]["logo_position"],
        });
        println!("{}", serde_json::to_string(&line)?);
    }

    Ok(())
}
