// Command-line interface for mdjson
//
// This binary renders markdown documents into JSON node trees, and can write those trees back out
// as markdown. All the work happens in the mdjson crate; this is a thin shell around its
// FormatRegistry plus configuration loading from mdjson-config.
//
// Converting:
//
// The conversion needs a to and from pair. The from is auto-detected from the file extension (or
// assumed to be markdown when reading stdin), while being overwrittable by an explicit --from flag.
// The to defaults to json.
// Usage:
//  mdjson <input> [--to <format>] [--from <format>] [--output <file>] [--seed <file>]
//  mdjson convert <input> ...             - Same as above (explicit)
//  mdjson --list-formats                  - List available formats
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// Parameters that name a configuration key (pretty, keep-html, sanitize-urls, ...) override the
// configuration; the rest are passed to the target format.
// Example:
//  mdjson README.md --extra-pretty --extra-keep-html false

use clap::{Arg, ArgAction, Command, ValueHint};
use mdjson::common::container::merge_document;
use mdjson::{Container, FormatRegistry, MarkdownOptions};
use mdjson_config::{Loader, MdjsonConfig};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io::Read;

const STDIN_PATH: &str = "-";

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            // A following value only counts if it doesn't look like another flag
            let has_value = args
                .get(i + 1)
                .is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("mdjson")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render markdown documents as JSON node trees")
        .long_about(
            "mdjson renders markdown into a JSON document tree instead of HTML.\n\n\
            Every block becomes one node in the top-level \"content\" array; inline\n\
            formatting nests inside it. Raw HTML is kept as \"html\" nodes and dangerous\n\
            link targets are replaced, both configurable.\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to override configuration or pass format options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            mdjson README.md                          # JSON on stdout\n  \
            mdjson README.md --extra-pretty           # Indented JSON\n  \
            cat notes.md | mdjson -                   # Read from stdin\n  \
            mdjson doc.json --to markdown             # Back to markdown\n  \
            mdjson README.md --seed meta.json -o out.json",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an mdjson.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log rendering details to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between formats.\n\n\
                    Supported formats:\n  \
                    - markdown: CommonMark Markdown (.md, .markdown)\n  \
                    - json:     JSON document tree (.json)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    mdjson convert input.md                      # Render to JSON (stdout)\n  \
                    mdjson convert input.md -o output.json       # Render to a file\n  \
                    mdjson convert doc.json --to markdown        # JSON back to markdown\n  \
                    mdjson input.md --to json                    # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path, or - for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .long_help(
                            "Source format to convert from.\n\n\
                            If not specified, the format is auto-detected from the file extension.\n\
                            Input read from stdin is assumed to be markdown.",
                        )
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (defaults to json)")
                        .default_value("json")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_name("PATH")
                        .help("JSON object whose keys are kept alongside the rendered content")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A first argument that isn't a flag or a known subcommand is an input path
            if cleaned_args.len() > 1
                && (!cleaned_args[1].starts_with('-') || cleaned_args[1] == STDIN_PATH)
                && cleaned_args[1] != "convert"
                && cleaned_args[1] != "help"
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_logging(matches.get_flag("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                eprintln!("Error: an input path is required");
                std::process::exit(1);
            };
            let to = sub_matches
                .get_one::<String>("to")
                .map(|s| s.as_str())
                .unwrap_or("json");

            let registry = FormatRegistry::default();
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None if input == STDIN_PATH => "markdown".to_string(),
                None => match registry.detect_format_from_filename(input) {
                    Some(detected) => detected,
                    None => {
                        eprintln!("Error: Could not detect format from filename '{input}'");
                        eprintln!("Please specify --from explicitly");
                        std::process::exit(1);
                    }
                },
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let seed = sub_matches
                .get_one::<String>("seed")
                .map(|path| load_seed(path));
            handle_convert_command(input, &from, to, output, seed, &extra_params, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    use log::LevelFilter::*;

    let level = if verbose { Debug } else { Warn };
    let _ = env_logger::builder()
        .filter_module("mdjson", level)
        .try_init();
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    seed: Option<Container>,
    extra_params: &HashMap<String, String>,
    config: &MdjsonConfig,
) {
    let registry = FormatRegistry::with_markdown_options(MarkdownOptions::from(config));

    // Validate formats exist
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = read_input(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let mut doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    if let Some(seed) = seed {
        // Keys already carried by a parsed JSON document win over the seed
        let parsed_extra = std::mem::take(&mut doc.extra);
        doc = merge_document(Some(&seed), std::mem::take(&mut doc.content));
        doc.extra.extend(parsed_extra);
    }

    let mut format_options = HashMap::new();
    if to == "json" && config.output.pretty {
        format_options.insert("pretty".to_string(), "true".to_string());
    }
    for (key, value) in extra_params {
        format_options.insert(key.clone(), value.clone());
    }

    let mut result = registry
        .serialize_with_options(&doc, to, &format_options)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
            log::debug!("wrote {to} output to {path}");
        }
        None => {
            if !result.ends_with('\n') {
                result.push('\n');
            }
            print!("{result}");
        }
    }
}

fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available formats:\n");
    for format_name in registry.list_formats() {
        let description = registry
            .get(&format_name)
            .map(|format| format.description().to_string())
            .unwrap_or_default();
        println!("  {format_name:<10} {description}");
    }
}

fn read_input(input: &str) -> std::io::Result<String> {
    if input == STDIN_PATH {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        fs::read_to_string(input)
    }
}

fn load_seed(path: &str) -> Container {
    let raw = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading seed file '{path}': {e}");
        std::process::exit(1);
    });

    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            eprintln!("Error: seed file '{path}' must contain a JSON object");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error parsing seed file '{path}': {e}");
            std::process::exit(1);
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> MdjsonConfig {
    let loader = Loader::new().with_optional_file("mdjson.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut MdjsonConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove("strikethrough") {
        config.parse.strikethrough = parse_bool_arg("strikethrough", &raw);
    }
    if let Some(raw) = extra_params.remove("autolink") {
        config.parse.autolink = parse_bool_arg("autolink", &raw);
    }
    if let Some(raw) = extra_params.remove("smart") {
        config.parse.smart = parse_bool_arg("smart", &raw);
    }

    if let Some(raw) = take_override(extra_params, &["keep-html", "keep_html"]) {
        config.render.keep_html = parse_bool_arg("keep-html", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["sanitize-urls", "sanitize_urls"]) {
        config.render.sanitize_urls = parse_bool_arg("sanitize-urls", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["harmful-link", "harmful_link"]) {
        config.render.harmful_link = raw;
    }

    if let Some(raw) = extra_params.remove("pretty") {
        config.output.pretty = parse_bool_arg("pretty", &raw);
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
