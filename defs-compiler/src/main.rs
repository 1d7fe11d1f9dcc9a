use std::time::Instant;

use defs_compiler::config::{self, GeneratorConfig};
use defs_compiler::summary::{summary, write_output};
use defs_compiler::trace::init_tracing;
use defs_compiler::{DefsError, DefsParser, RegisterDefinitions, generate_bundle};
use marshal_bridge::ArgMatcher;
use tracing::{debug, info};

fn main() {
    let config = GeneratorConfig::from_matches(&config::command().get_matches());
    if let Err(e) = init_tracing(config.quiet, config.verbose) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let phase_start = Instant::now();
    let exit_code = match run(&config) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };
    debug!(elapsed_ms = phase_start.elapsed().as_millis() as u64, exit_code = exit_code, "defs-compiler done");
    std::process::exit(exit_code);
}

fn run(config: &GeneratorConfig) -> Result<(), DefsError> {
    let mut parser = DefsParser::new();
    parser.parse_file(&config.input)?;
    info!(
        sources = parser.sources().len(),
        definitions = parser.c_names().len(),
        "definitions loaded"
    );

    if config.summary {
        let text = summary(&parser, config.object.as_deref())?;
        return write_output(config.out.as_deref(), &text);
    }

    let mut matcher = ArgMatcher::with_defaults();
    matcher.register_definitions(&parser);
    let bundle = generate_bundle(&parser, &matcher, config.object.as_deref())?;

    let mut json = serde_json::to_string_pretty(&bundle)?;
    json.push('\n');
    write_output(config.out.as_deref(), &json)
}
