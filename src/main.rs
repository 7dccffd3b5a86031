//! forge – command-line HTML email builder.
//!
//! Usage:
//!   forge <email.json> [output.html] [--button]
//!
//! If `output.html` is omitted the markup is written next to the input file
//! with the same stem (e.g. `welcome.json` → `welcome.html`). With `--button`
//! the input is a single button config and only the button fragment is
//! produced.

use std::{env, fs, path::PathBuf, process};

use mail_forge::button::ButtonConfig;
use mail_forge::pipeline::{generate_button, generate_email_from_json};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut input_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut button_only = false;
    let mut positional = 0usize;

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--button" | "-b" => button_only = true,
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            path => {
                if positional == 0 {
                    input_path = Some(PathBuf::from(path));
                } else if positional == 1 {
                    output_path = Some(PathBuf::from(path));
                } else {
                    eprintln!("Unexpected argument: {path}");
                    print_usage(&args[0]);
                    process::exit(1);
                }
                positional += 1;
            }
        }
    }

    let input = match input_path {
        Some(p) => p,
        None => {
            eprintln!("Error: no input file specified.");
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    // Default output: same directory + same stem as input, but with .html
    let output = output_path.unwrap_or_else(|| {
        let mut o = input.clone();
        o.set_extension("html");
        o
    });

    let json = match fs::read_to_string(&input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading '{}': {e}", input.display());
            process::exit(1);
        }
    };

    let result = if button_only {
        serde_json::from_str::<ButtonConfig>(&json)
            .map_err(|e| e.to_string())
            .and_then(|cfg| generate_button(&cfg).map_err(|e| e.to_string()))
    } else {
        generate_email_from_json(&json).map_err(|e| e.to_string())
    };

    match result {
        Ok(html) => {
            // Create output directory if necessary.
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() {
                    if let Err(e) = fs::create_dir_all(parent) {
                        eprintln!("Error creating output directory: {e}");
                        process::exit(1);
                    }
                }
            }
            if let Err(e) = fs::write(&output, &html) {
                eprintln!("Error writing '{}': {e}", output.display());
                process::exit(1);
            }
            eprintln!("Wrote '{}' ({} bytes)", output.display(), html.len());
        }
        Err(e) => {
            eprintln!("Error generating markup: {e}");
            process::exit(1);
        }
    }
}

fn print_usage(prog: &str) {
    eprintln!("forge – HTML email builder (mail-forge)");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <email.json> [output.html] [--button]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <email.json>   Email config (container + blocks), or a button config with --button");
    eprintln!("  [output.html]  Output path  (default: same stem as input with .html)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --button, -b   Treat the input as a single button config");
    eprintln!("  --help         Print this message");
    eprintln!();
    eprintln!("Set RUST_LOG=debug to see render decisions.");
}
