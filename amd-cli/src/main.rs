// Command-line interface for Army Markdown
//
// The amd program turns Army Markdown memorandums into LaTeX (and PDF), checks their
// headers, and shows how a memo was understood. All the real work happens in amd-babel;
// this crate only wires files, configuration and flags to it.
//
// Converting:
//
// The conversion needs a to and from pair. The from is auto-detected from the file extension,
// while being overwrittable by an explicit --from flag.
// Usage:
//  amd <input> --to <format> [--from <format>] [--output <file>]          - Convert between formats (default)
//  amd convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  amd check <input>                                                      - Parse and lint the header
//  amd inspect <input> [tree|json]                                        - Show the parsed document
//  amd --list-formats                                                     - List available formats
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// Example:
//  amd memo.Amd --to pdf -o memo.pdf --extra-engine /usr/bin/lualatex

use amd_babel::formats::{AmdFormat, LatexFormat, PdfFormat};
use amd_babel::{check, Document, FormatRegistry, SerializedDocument};
use amd_config::{AmdConfig, Loader, LOCAL_CONFIG_FILE};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `AMD_LOG=amd_babel=trace`)
const LOG_ENV: &str = "AMD_LOG";

const SUBCOMMANDS: &[&str] = &["convert", "check", "inspect", "help"];

/// Exit status of `amd check` when the memo parses but has lint findings
const EXIT_DIAGNOSTICS: i32 = 2;

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if let Some(key) = arg.strip_prefix("--extra-") {
            let has_value = args
                .get(i + 1)
                .map(|next| !next.starts_with('-'))
                .unwrap_or(false);

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

fn input_arg(name: &'static str) -> Arg {
    Arg::new(name)
        .help("Path to the memo")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn from_arg() -> Arg {
    Arg::new("from")
        .long("from")
        .help("Source format (auto-detected from file extension if not specified)")
        .value_hint(ValueHint::Other)
}

fn build_cli() -> Command {
    Command::new("amd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Army Markdown: write memorandums in plain text, get AR 25-50 LaTeX")
        .long_about(
            "amd converts Army Markdown memorandums for the armymemo LaTeX class.\n\n\
            Commands:\n  \
            - convert: Transform between formats (Army Markdown, LaTeX, PDF, JSON form)\n  \
            - check:   Parse a memo and lint its header\n  \
            - inspect: Show how a memo was parsed\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options:\n  \
            document-class, engine, class-dir (latex/pdf) and indent (amd).\n\n\
            Examples:\n  \
            amd memo.Amd --to latex                  # LaTeX on stdout\n  \
            amd memo.Amd --to pdf -o memo.pdf        # Compile with lualatex\n  \
            amd memo.json --to amd                   # Form payload back to Army Markdown\n  \
            amd check memo.Amd                       # Lint the header",
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
                .help("Path to an amd.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log progress to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between formats (default command)")
                .long_about(
                    "Convert a memo between formats.\n\n\
                    Supported formats:\n  \
                    - amd:   Army Markdown (.Amd, .amd)\n  \
                    - latex: LaTeX for the armymemo class (.tex)\n  \
                    - pdf:   PDF compiled with lualatex (.pdf)\n  \
                    - form:  JSON form payload (.json)\n  \
                    - tree:  Debug tree view\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.",
                )
                .arg(input_arg("input"))
                .arg(from_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Parse a memo and lint its header")
                .long_about(
                    "Parse a memo and report header problems such as a badly formatted\n\
                    DATE or an unknown BRANCH.\n\n\
                    Exit status: 0 when clean, 1 when the memo does not parse,\n\
                    2 when it parses with findings.",
                )
                .arg(input_arg("input"))
                .arg(from_arg()),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show how a memo was parsed")
                .arg(input_arg("input"))
                .arg(
                    Arg::new("view")
                        .help("Output view. Defaults to 'tree'")
                        .required(false)
                        .index(2)
                        .value_parser(["tree", "json"])
                        .value_hint(ValueHint::Other),
                )
                .arg(from_arg()),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A bare path as first argument means convert
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
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

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    let registry = build_registry(&config);

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&registry);
        return;
    }

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = required(sub_matches, "input");
            let to = required(sub_matches, "to");
            let from = source_format(&registry, sub_matches);
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(&registry, input, &from, to, output, &extra_params);
        }
        Some(("check", sub_matches)) => {
            let input = required(sub_matches, "input");
            let from = source_format(&registry, sub_matches);
            handle_check_command(&registry, input, &from);
        }
        Some(("inspect", sub_matches)) => {
            let input = required(sub_matches, "input");
            let from = source_format(&registry, sub_matches);
            let view = sub_matches
                .get_one::<String>("view")
                .map(|s| s.as_str())
                .unwrap_or("tree");
            handle_inspect_command(&registry, input, &from, view);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            process::exit(1);
        }
    }
}

/// Logs go to stderr so they never mix with converted output on stdout.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    // clap enforces these arguments
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .unwrap_or_default()
}

fn source_format(registry: &FormatRegistry, matches: &ArgMatches) -> String {
    if let Some(from) = matches.get_one::<String>("from") {
        return from.clone();
    }
    let input = required(matches, "input");
    registry
        .detect_format_from_filename(input)
        .unwrap_or_else(|| {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            process::exit(1);
        })
}

fn read_document(registry: &FormatRegistry, input: &str, from: &str) -> Document {
    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        process::exit(1);
    });
    debug!(input, from, "parsing");
    registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error in '{input}': {e}");
        process::exit(1);
    })
}

/// Handle the convert command
fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
) {
    // Validate formats exist
    for name in [from, to] {
        if let Err(e) = registry.get(name) {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }

    let doc = read_document(registry, input, from);

    let result = registry
        .serialize_with_options(&doc, to, extra_params)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            process::exit(1);
        });

    match (output, result) {
        (Some(path), data) => {
            fs::write(path, data.into_bytes()).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                process::exit(1);
            });
        }
        (None, SerializedDocument::Text(text)) => {
            print!("{text}");
        }
        (None, SerializedDocument::Binary(_)) => {
            eprintln!("Binary formats (like PDF) require an output file. Use -o <path>.");
            process::exit(1);
        }
    }
}

/// Handle the check command
fn handle_check_command(registry: &FormatRegistry, input: &str, from: &str) {
    let doc = read_document(registry, input, from);
    let diagnostics = check(&doc);
    if diagnostics.is_empty() {
        println!("{input}: no problems found");
        return;
    }
    for diagnostic in &diagnostics {
        println!("{input}: {diagnostic}");
    }
    process::exit(EXIT_DIAGNOSTICS);
}

/// Handle the inspect command
fn handle_inspect_command(registry: &FormatRegistry, input: &str, from: &str, view: &str) {
    let doc = read_document(registry, input, from);
    let output = match view {
        "json" => serde_json::to_string_pretty(&doc)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| e.to_string()),
        _ => registry.serialize(&doc, "tree").map_err(|e| e.to_string()),
    };
    let output = output.unwrap_or_else(|e| {
        eprintln!("Inspect error: {e}");
        process::exit(1);
    });
    print!("{output}");
}

/// Handle the list-formats command
fn handle_list_formats_command(registry: &FormatRegistry) {
    println!("Available formats:\n");
    for format in registry.formats() {
        let mut modes = Vec::new();
        if format.supports_parsing() {
            modes.push("read");
        }
        if format.supports_serialization() {
            modes.push("write");
        }
        println!(
            "  {:<8} {:<36} [{}] .{}",
            format.name(),
            format.description(),
            modes.join("/"),
            format.file_extensions().join(", .")
        );
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> AmdConfig {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        process::exit(1);
    })
}

/// Default registry with the configurable formats replaced by configured ones.
fn build_registry(config: &AmdConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::default();
    registry.register(AmdFormat::new((&config.writer).into()));
    registry.register(LatexFormat::new((&config.render).into()));

    let mut pdf = PdfFormat::new((&config.render).into());
    if let Some(engine) = config.pdf.engine() {
        pdf = pdf.with_engine(engine);
    }
    if let Some(dir) = config.pdf.class_dir() {
        pdf = pdf.with_class_dir(dir);
    }
    registry.register(pdf);
    registry
}
