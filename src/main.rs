use clap::{Arg, Command};
use owo_colors::OwoColorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use gloss::fixup;
use gloss::godoc;
use gloss::highlighting::Theme;
use gloss::parsing::Grammar;
use gloss::rendering;

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("gloss")
        .version(VERSION)
        .about("Syntax highlighting for go doc output.")
        .arg(
            Arg::new("arguments")
                .num_args(0..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true)
                .value_name("ARGS")
                .help("Arguments passed through to go doc, such as a package or symbol name."),
        )
        .get_matches();

    let arguments: Vec<String> = matches
        .get_many::<String>("arguments")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    // The renderer cannot function without its query compiled, so fail
    // here before the generator is ever run.
    let mut grammar = match Grammar::load() {
        Ok(grammar) => grammar,
        Err(error) => {
            eprintln!("{} {}", "ERROR:".bright_red().bold(), error);
            std::process::exit(1);
        }
    };
    let theme = Theme::standard();

    let text = match godoc::invoke(&arguments) {
        Ok(text) => text,
        Err(error) => {
            eprintln!(
                "{} {}\n\n{}",
                "ERROR:".bright_red().bold(),
                error.problem,
                error.output
            );
            std::process::exit(1);
        }
    };

    let lines = fixup::repair(&text);
    debug!("repaired {} lines", lines.len());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for block in fixup::segments(&lines) {
        let resolved = rendering::highlight(&block, &mut grammar, &theme);
        rendering::print(&mut out, &resolved).expect("write highlighted output to stdout");
    }
}
