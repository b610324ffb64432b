use std::env;
use std::fs;
use std::process;

use chordgen::{GeneratedChords, GeneratorConfig, Instrument};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

const USAGE: &str = "Usage: chordgen <ROOT|all> [--instrument guitar|piano] [--config FILE] [--verbose]";

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        eprintln!("{}", USAGE);
        process::exit(1);
    }

    let mut root: Option<&String> = None;
    let mut instrument = Instrument::Guitar;
    let mut config_path: Option<&String> = None;
    let mut verbose = false;

    // Parse flags
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--instrument" | "-i" => {
                let Some(name) = iter.next() else {
                    eprintln!("{}", USAGE);
                    process::exit(1);
                };
                instrument = match name.parse() {
                    Ok(instrument) => instrument,
                    Err(e) => {
                        eprintln!("{}", e);
                        process::exit(1);
                    }
                };
            }
            "--config" | "-c" => {
                config_path = iter.next();
                if config_path.is_none() {
                    eprintln!("{}", USAGE);
                    process::exit(1);
                }
            }
            "--verbose" | "-v" => verbose = true,
            "--help" | "-h" => {
                println!("{}", USAGE);
                return;
            }
            _ if root.is_none() => root = Some(arg),
            _ => {
                eprintln!("Unexpected argument '{}'", arg);
                eprintln!("{}", USAGE);
                process::exit(1);
            }
        }
    }

    let Some(root) = root else {
        eprintln!("{}", USAGE);
        process::exit(1);
    };

    TermLogger::init(
        if verbose { LevelFilter::Debug } else { LevelFilter::Warn },
        ConfigBuilder::default().build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .unwrap_or_else(|err| eprintln!("init_logger error: {:?}", err));

    // Read config
    let config = match config_path {
        Some(path) => {
            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("Error reading config '{}': {}", path, e);
                    process::exit(1);
                }
            };
            match GeneratorConfig::from_yaml(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("{}", e);
                    process::exit(1);
                }
            }
        }
        None => GeneratorConfig::default(),
    };

    // Generate
    let result = if root.eq_ignore_ascii_case("all") {
        chordgen::generate_all_roots(instrument, &config)
    } else {
        chordgen::generate_voicings_for_root(root, instrument, &config)
    };

    let json = match result.and_then(|chords: GeneratedChords| chords.to_json()) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Generation error: {}", e);
            process::exit(1);
        }
    };

    println!("{}", json);
}
