use anyhow::Result;

use crate::config::Config;

pub mod processor;

/// General Plugin trait
pub trait Plugin {
    /// Plugin name
    fn name(&self) -> &str;

    /// Initialize plugin required global resources
    fn init(&self, _cfg: &Config) -> Result<()> {
        Ok(())
    }
}
