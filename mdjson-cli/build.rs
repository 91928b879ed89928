use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the format names registered by FormatRegistry::with_defaults
// Build scripts can't reach the library, so the list is duplicated here
const AVAILABLE_FORMATS: &[&str] = &["json", "markdown"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("mdjson")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render markdown documents as JSON node trees")
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Input file path, or - for stdin")
                .required_unless_present("list-formats")
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("from")
                .long("from")
                .value_parser(clap::builder::PossibleValuesParser::new(AVAILABLE_FORMATS))
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .value_parser(clap::builder::PossibleValuesParser::new(AVAILABLE_FORMATS))
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "mdjson", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "mdjson", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "mdjson", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
