use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command tree from src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
const FORMATS: &[&str] = &["amd", "latex", "pdf", "form", "tree"];

fn input() -> Arg {
    Arg::new("input")
        .help("Path to the memo")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn format_arg(name: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_parser(clap::builder::PossibleValuesParser::new(FORMATS))
        .value_hint(ValueHint::Other)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("amd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Army Markdown: write memorandums in plain text, get AR 25-50 LaTeX")
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .arg(input())
                .arg(format_arg("from"))
                .arg(format_arg("to").required(true))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(Command::new("check").arg(input()).arg(format_arg("from")))
        .subcommand(
            Command::new("inspect")
                .arg(input())
                .arg(
                    Arg::new("view")
                        .index(2)
                        .value_parser(clap::builder::PossibleValuesParser::new(["tree", "json"])),
                )
                .arg(format_arg("from")),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "amd", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "amd", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "amd", &outdir)?;

    Ok(())
}
