use std::process::ExitCode;
use clap::Parser as ClapParser;
use loxscript::Config;

fn main() -> ExitCode {
    let config: Config = Config::parse();
    loxscript::run(&config)
}
