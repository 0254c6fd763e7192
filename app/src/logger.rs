use anyhow::{anyhow, Result};
use log::{Level, LevelFilter, Log, Metadata, Record};

use hpsdr_api::config::Config;

/// Writes every enabled log record to stderr
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match record.level() {
            Level::Error | Level::Warn | Level::Info => {
                eprintln!("{:<5} {}", record.level(), record.args())
            }
            _ => eprintln!("{:<5} [{}] {}", record.level(), record.target(), record.args()),
        }
    }

    fn flush(&self) {}
}

pub fn level(cfg: &Config) -> LevelFilter {
    if cfg.quiet {
        LevelFilter::Error
    } else if cfg.verbose_mode {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the logger at info level, configuration warnings show up before the
/// command line sets the final level
pub fn init() -> Result<()> {
    log::set_logger(&LOGGER).map_err(|e| anyhow!("{}", e))?;
    log::set_max_level(LevelFilter::Info);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn levels() {
        let mut cfg = Config::default();
        assert_eq!(level(&cfg), LevelFilter::Info);
        cfg.verbose_mode = true;
        assert_eq!(level(&cfg), LevelFilter::Debug);
        cfg.quiet = true;
        assert_eq!(level(&cfg), LevelFilter::Error);
    }
}
