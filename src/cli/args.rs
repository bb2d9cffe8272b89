// CLASSIFICATION: COMMUNITY
// Filename: args.rs v0.1
// Date Modified: 2026-10-18
// Author: Lukas Bower

use clap::{value_parser, Arg, ArgAction, ArgGroup, Command};

/// Builds and returns the argument parser for `pwmctl`.
pub fn build_cli() -> Command {
    Command::new("pwmctl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Configure a sysfs PWM channel")
        .arg(
            Arg::new("chip")
                .long("chip")
                .value_name("N")
                .help("PWM chip index (pwmchip<N>)")
                .value_parser(value_parser!(u32))
                .default_value("0"),
        )
        .arg(
            Arg::new("channel")
                .short('c')
                .long("channel")
                .value_name("N")
                .help("Channel index on the chip (pwm<N>)")
                .value_parser(value_parser!(u32))
                .required(true),
        )
        .arg(
            Arg::new("freq")
                .short('f')
                .long("freq")
                .value_name("MILLIHERTZ")
                .help("Frequency in millihertz; 0 disables the channel")
                .value_parser(value_parser!(i64).range(0..))
                .required(true),
        )
        .arg(
            Arg::new("duty")
                .short('d')
                .long("duty")
                .value_name("PERCENT")
                .help("Duty cycle in percent")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("duty-raw")
                .long("duty-raw")
                .value_name("VALUE")
                .help("Duty cycle as a fraction of 16777216")
                .value_parser(value_parser!(i32)),
        )
        .group(ArgGroup::new("duty-value").args(["duty", "duty-raw"]))
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("TOML configuration file")
                .value_parser(value_parser!(std::path::PathBuf)),
        )
        .arg(
            Arg::new("trace")
                .long("trace")
                .help("Log every attribute write at trace level")
                .action(ArgAction::SetTrue),
        )
}
