#[macro_use]
extern crate clap;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::{Context, Result};

use hpsdr_api as api;
use api::fields::registration;

mod commands;
mod config;
mod decoder;
mod input;
mod logger;

fn main() -> Result<()> {
    logger::init()?;
    let root_cmd = commands::new_root_command();
    let cfg = config::parse_args(root_cmd)?;
    log::set_max_level(logger::level(&cfg));

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cfg.dump_fields {
        writeln!(out, "{}", serde_json::to_string_pretty(&registration())?)?;
        return Ok(());
    }

    let reader: Box<dyn BufRead> = if cfg.input_file.is_empty() {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(&cfg.input_file)
            .with_context(|| format!("Failed to open {}", cfg.input_file))?;
        Box::new(BufReader::new(file))
    };

    let dump_ports = cfg.dump_ports;
    let decoder = decoder::new_decoder(cfg)?;

    let (mut decoded, mut skipped) = (0usize, 0usize);
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let pkt = match input::parse_line(&line) {
            Ok(Some(pkt)) => pkt,
            Ok(None) => continue,
            Err(e) => {
                log::warn!("line {}: {:#}", i + 1, e);
                skipped += 1;
                continue;
            }
        };

        match decoder.decode(&pkt) {
            Some(rec) => {
                writeln!(out, "{}", serde_json::to_string(&rec)?)?;
                decoded += 1;
            }
            None => writeln!(out, "not-ours")?,
        }
    }

    if dump_ports {
        writeln!(out, "{}", serde_json::to_string(&*decoder.ports().snapshot())?)?;
    }

    log::info!("{} datagram(s) decoded, {} line(s) skipped", decoded, skipped);
    Ok(())
}
