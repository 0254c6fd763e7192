use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use hpsdr_api as api;
use api::config::Config;

use super::commands::CliArg;

/// Parse command line arguments and set configuration
pub fn parse_args(root_cmd: clap::App) -> Result<Config> {
    let matches = root_cmd.get_matches();
    config_from_matches(&matches)
}

fn config_from_matches(matches: &clap::ArgMatches) -> Result<Config> {
    let mut config: Config = Default::default();

    if let Some(config_file) = matches.value_of(CliArg::Config.as_ref()) {
        parse_config_file(config_file, &mut config)?;
    }

    set_config_by_cli_args(&mut config, matches);

    Ok(config)
}

fn parse_config_file(config_file: &str, config: &mut Config) -> Result<()> {
    let cfg_path = Path::new(config_file);
    if !cfg_path.exists() {
        return Err(anyhow!("\"{}\" does not exist", config_file));
    }

    let mut s = String::new();
    File::open(cfg_path)
        .and_then(|mut f| f.read_to_string(&mut s))
        .with_context(|| format!("Failed to read {}", config_file))?;

    *config = Config::from_yaml_str(&s).with_context(|| format!("Invalid config file {}", config_file))?;
    config.fpath = config_file.to_string();
    Ok(())
}

/// Use command arguments overrides config file settings
fn set_config_by_cli_args(config: &mut Config, matches: &clap::ArgMatches) {
    config.quiet = matches.is_present(CliArg::Quiet.as_ref());
    config.verbose_mode = matches.is_present(CliArg::Verbose.as_ref());
    config.dump_fields = matches.is_present(CliArg::Fields.as_ref());
    config.dump_ports = matches.is_present(CliArg::Ports.as_ref());

    if matches.is_present(CliArg::RelaxedSize.as_ref()) {
        config.strict_size = false;
    }
    if matches.is_present(CliArg::RelaxedPad.as_ref()) {
        config.strict_pad = false;
    }
    if matches.is_present(CliArg::RelaxedProgramSize.as_ref()) {
        config.strict_program_data_size = false;
    }

    if let Some(input) = matches.value_of(CliArg::Input.as_ref()) {
        config.input_file = String::from(input);
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;
    use crate::commands::new_root_command;

    #[test]
    fn cli_overrides() -> Result<()> {
        let matches = new_root_command().get_matches_from_safe(vec![
            "hpsdr",
            "--relaxed-size",
            "--relaxed-program-size",
            "--ports",
        ])?;
        let cfg = config_from_matches(&matches)?;
        assert!(!cfg.strict_size);
        assert!(cfg.strict_pad);
        assert!(!cfg.strict_program_data_size);
        assert!(cfg.dump_ports);
        assert!(!cfg.dump_fields);
        assert!(cfg.input_file.is_empty());
        Ok(())
    }

    #[test]
    fn config_file() -> Result<()> {
        let path = std::env::temp_dir().join(format!("hpsdr-config-{}.yml", std::process::id()));
        File::create(&path)?.write_all(b"openhpsdr.strict.pad: false\n")?;
        let fpath = path.to_string_lossy().to_string();

        let matches = new_root_command().get_matches_from_safe(vec!["hpsdr", "-c", fpath.as_str()])?;
        let cfg = config_from_matches(&matches);
        std::fs::remove_file(&path)?;
        let cfg = cfg?;
        assert!(!cfg.strict_pad);
        assert!(cfg.strict_size);
        assert_eq!(cfg.fpath, fpath);
        Ok(())
    }

    #[test]
    fn missing_config_file() -> Result<()> {
        let matches = new_root_command()
            .get_matches_from_safe(vec!["hpsdr", "-c", "/nonexistent/hpsdr.yml"])?;
        assert!(config_from_matches(&matches).is_err());
        Ok(())
    }
}
