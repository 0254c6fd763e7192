use anyhow::{anyhow, Result};
use yaml_rust::YamlLoader;

pub const STRICT_SIZE_KEY: &str = "openhpsdr.strict.size";
pub const STRICT_PAD_KEY: &str = "openhpsdr.strict.pad";
pub const STRICT_PROGRAM_DATA_SIZE_KEY: &str = "openhpsdr.strict.program.data.size";

#[derive(Clone, Debug)]
pub struct Config {
    /// Configure file dist location
    pub fpath: String,
    /// Warn about bytes after the expected end of a Command-Reply datagram
    pub strict_size: bool,
    /// Emit pad fields over their whole length so non-zero pad gets flagged
    pub strict_pad: bool,
    /// Warn when a Program datagram carries more than one block of data
    pub strict_program_data_size: bool,
    /// Datagram list to decode, stdin when empty
    pub input_file: String,
    pub quiet: bool,
    pub verbose_mode: bool,
    /// Print the registration surface and exit
    pub dump_fields: bool,
    /// Print the learned port table once every datagram is decoded
    pub dump_ports: bool,
    pub doc: Yaml,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            fpath: String::new(),
            strict_size: true,
            strict_pad: true,
            strict_program_data_size: true,
            input_file: String::new(),
            quiet: false,
            verbose_mode: false,
            dump_fields: false,
            dump_ports: false,
            doc: Yaml::default(),
        }
    }
}

impl Config {
    /// Build a configuration from a yaml document, missing options keep their defaults
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let docs = YamlLoader::load_from_str(s)?;
        let doc = docs
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Empty configuration document"))?;

        let mut config = Config::default();
        config.doc = Yaml(doc);
        config.strict_size = config.get_boolean(STRICT_SIZE_KEY, true);
        config.strict_pad = config.get_boolean(STRICT_PAD_KEY, true);
        config.strict_program_data_size = config.get_boolean(STRICT_PROGRAM_DATA_SIZE_KEY, true);
        Ok(config)
    }

    pub fn get_integer(&self, key: &str, default: i64, min: i64, max: i64) -> i64 {
        get_integer(self.doc.as_ref(), key, default, min, max)
    }

    pub fn get_str(&self, key: &str, default: &str) -> String {
        get_str(self.doc.as_ref(), key, default)
    }

    pub fn get_boolean(&self, key: &str, default: bool) -> bool {
        get_boolean(self.doc.as_ref(), key, default)
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
/// Simple wrapper struct to implement Default trait for yaml_rust::Yaml
pub struct Yaml(pub yaml_rust::Yaml);

impl Default for Yaml {
    fn default() -> Self {
        Self(yaml_rust::Yaml::Null)
    }
}

impl AsRef<yaml_rust::Yaml> for Yaml {
    fn as_ref(&self) -> &yaml_rust::Yaml {
        &self.0
    }
}

impl AsMut<yaml_rust::Yaml> for Yaml {
    fn as_mut(&mut self) -> &mut yaml_rust::Yaml {
        &mut self.0
    }
}

fn get_str(doc: &yaml_rust::Yaml, key: &str, default: &str) -> String {
    match &doc[key] {
        yaml_rust::Yaml::String(s) => s.clone(),
        yaml_rust::Yaml::BadValue => {
            log::warn!(
                "Option {} not found or bad string value, set {} to {}",
                key,
                key,
                default
            );
            default.to_string()
        }
        _ => {
            log::warn!(
                "Wrong value type for {}, expecting string, set {} to {}",
                key,
                key,
                default
            );
            default.to_string()
        }
    }
}

fn get_boolean(doc: &yaml_rust::Yaml, key: &str, default: bool) -> bool {
    match doc[key] {
        yaml_rust::Yaml::Boolean(b) => b,
        yaml_rust::Yaml::BadValue => {
            log::warn!(
                "Option {} not found or bad boolean value, set {} to {}",
                key,
                key,
                default
            );
            default
        }
        _ => {
            log::warn!(
                "Wrong value type for {}, expecting boolean, set {} to {}",
                key,
                key,
                default
            );
            default
        }
    }
}

fn get_integer(doc: &yaml_rust::Yaml, key: &str, default: i64, min: i64, max: i64) -> i64 {
    match doc[key] {
        yaml_rust::Yaml::Integer(i) => {
            if i < min || i > max {
                log::warn!(
                    "Option {} is less/greater than min/max value {}/{}, set {} to {}",
                    key,
                    min,
                    max,
                    key,
                    default
                );
                default
            } else {
                i
            }
        }
        yaml_rust::Yaml::BadValue => {
            log::warn!(
                "Option {} not found or bad integer value, set {} to {}",
                key,
                key,
                default
            );
            default
        }
        _ => {
            log::warn!(
                "Wrong value type for {}, expecting integer, set {} to {}",
                key,
                key,
                default
            );
            default
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_are_strict() {
        let cfg = Config::default();
        assert!(cfg.strict_size);
        assert!(cfg.strict_pad);
        assert!(cfg.strict_program_data_size);
    }

    #[test]
    fn load_policies() -> Result<()> {
        let cfg = Config::from_yaml_str(
            "openhpsdr.strict.size: false\nopenhpsdr.strict.program.data.size: false\n",
        )?;
        assert!(!cfg.strict_size);
        assert!(cfg.strict_pad);
        assert!(!cfg.strict_program_data_size);
        Ok(())
    }

    #[test]
    fn wrong_types_fall_back() -> Result<()> {
        let cfg = Config::from_yaml_str(
            "openhpsdr.strict.pad: \"no\"\nopenhpsdr.strict.size: 0\nlimit: 70000\n",
        )?;
        assert!(cfg.strict_pad);
        assert!(cfg.strict_size);
        assert_eq!(cfg.get_integer("limit", 10, 0, 65535), 10);
        assert_eq!(cfg.get_str("node", "radio"), "radio");
        Ok(())
    }

    #[test]
    fn empty_document() {
        assert!(Config::from_yaml_str("").is_err());
    }
}
