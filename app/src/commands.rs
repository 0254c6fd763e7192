use clap::{App, Arg};
use strum::AsRefStr;

/// Avaliable command line arguments
#[derive(AsRefStr, Clone, Copy, Debug)]
#[strum(serialize_all = "kebab-case")]
pub enum CliArg {
    Config,
    Fields,
    Input,
    Ports,
    Quiet,
    RelaxedPad,
    RelaxedProgramSize,
    RelaxedSize,
    Verbose,
}

/// Construct a new clap root command
pub fn new_root_command<'a>() -> clap::App<'a, 'static> {
    App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about("Decode openHPSDR Ethernet (protocol 2) UDP datagrams")
        .args(&[
            Arg::with_name(CliArg::Config.as_ref())
                .short("c")
                .value_name("FILE")
                .help("Use a specific config file")
                .takes_value(true),
            Arg::with_name(CliArg::Fields.as_ref())
                .long("fields")
                .help("Print every field and expert info the decoder registers, then exit"),
            Arg::with_name(CliArg::Input.as_ref())
                .short("r")
                .value_name("FILE")
                .help("Datagram list, one '<src-port> <dst-port> <hex payload>' per line, stdin by default")
                .takes_value(true),
            Arg::with_name(CliArg::Ports.as_ref())
                .long("ports")
                .help("Print the learned port table after decoding"),
            Arg::with_name(CliArg::Quiet.as_ref())
                .short("q")
                .long("quiet")
                .help("Turn off info level logging")
                .conflicts_with(CliArg::Verbose.as_ref()),
            Arg::with_name(CliArg::RelaxedPad.as_ref())
                .long("relaxed-pad")
                .help("Only check the first byte of pad regions"),
            Arg::with_name(CliArg::RelaxedProgramSize.as_ref())
                .long("relaxed-program-size")
                .help("Do not warn when Program data rolls over a block"),
            Arg::with_name(CliArg::RelaxedSize.as_ref())
                .long("relaxed-size")
                .help("Do not warn about extra bytes after a Command-Reply datagram"),
            Arg::with_name(CliArg::Verbose.as_ref())
                .short("v")
                .long("verbose")
                .help("Turn on debug logging"),
        ])
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn arg_names() {
        assert_eq!(CliArg::RelaxedProgramSize.as_ref(), "relaxed-program-size");
        assert_eq!(CliArg::Config.as_ref(), "config");
    }

    #[test]
    fn parse_flags() -> anyhow::Result<()> {
        let matches = new_root_command().get_matches_from_safe(vec![
            "hpsdr",
            "-r",
            "capture.txt",
            "--relaxed-pad",
            "-v",
        ])?;
        assert_eq!(matches.value_of(CliArg::Input.as_ref()), Some("capture.txt"));
        assert!(matches.is_present(CliArg::RelaxedPad.as_ref()));
        assert!(!matches.is_present(CliArg::RelaxedSize.as_ref()));
        assert!(matches.is_present(CliArg::Verbose.as_ref()));

        let err = new_root_command().get_matches_from_safe(vec!["hpsdr", "-q", "-v"]);
        assert!(err.is_err());
        Ok(())
    }
}
