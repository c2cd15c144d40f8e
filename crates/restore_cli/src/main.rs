use std::path::PathBuf;
use std::process;

use clap::Parser;
use restore_core::core_api::{Engine, RestoreConfig, RestoreMode};
use restore_core::profile::Profile;
use restore_render::{JsonStyle, render_outcome_json, render_outcome_text, render_section_table};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Player whose document should be restored.
    #[arg(value_name = "NAME", required_unless_present = "sections")]
    name: Option<String>,
    /// Directory holding one document per player.
    #[arg(long, value_name = "DIR")]
    store: Option<PathBuf>,
    #[arg(long, value_name = "EXT")]
    extension: Option<String>,
    /// Apply nothing unless every section restores.
    #[arg(long)]
    staged: bool,
    #[arg(long)]
    json: bool,
    /// Print the section table and exit.
    #[arg(long, conflicts_with = "name")]
    sections: bool,
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> RestoreConfig {
        let defaults = RestoreConfig::default();
        RestoreConfig {
            store_root: self.store.clone().unwrap_or(defaults.store_root),
            extension: self.extension.clone().unwrap_or(defaults.extension),
            mode: if self.staged {
                RestoreMode::Staged
            } else {
                RestoreMode::Partial
            },
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config();
    let engine = Engine::new(&config).unwrap_or_else(|e| {
        eprintln!("Error building section registry: {e}");
        process::exit(1);
    });

    if cli.sections {
        print!("{}", render_section_table(engine.orchestrator().registry()));
        return;
    }

    let Some(name) = cli.name.as_deref() else {
        eprintln!("a player NAME is required unless --sections is given");
        process::exit(2);
    };

    log::debug!(
        "restoring {name:?} from {} ({:?} mode)",
        config.store_root.display(),
        config.mode
    );
    let mut profile = Profile::new(name);
    let outcome = engine.restore_subject(name, &mut profile);

    if cli.json {
        let value = render_outcome_json(name, &outcome, &profile, JsonStyle::CanonicalV1);
        match serde_json::to_string_pretty(&value) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error serializing outcome: {e}");
                process::exit(1);
            }
        }
    } else {
        print!("{}", render_outcome_text(name, &outcome, &profile));
    }

    if !outcome.is_complete() {
        process::exit(1);
    }
}
