use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use dict_core::{
    DictError, MaintenanceEngine, MergeSummary, PendingWords, SanitizeReport, Settings,
    VocabularyImporter,
};
use std::io::{self, stdin, stdout, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dict_maint",
    about = "Maintain a spelling dictionary: add words, import vocabularies, sort and deduplicate"
)]
struct Cli {
    /// Settings file holding the dictionary path and encoding
    #[arg(long, global = true, default_value = "settings.json")]
    settings: PathBuf,

    /// Dictionary file, overriding the settings
    #[arg(long, global = true)]
    dictionary: Option<PathBuf>,

    /// Text encoding of the dictionary (e.g. utf-8, iso-8859-1), overriding the settings
    #[arg(long, global = true)]
    encoding: Option<String>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(flatten)]
    Dictionary(DictionaryCommand),
    /// Show or change the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Commands that run against the dictionary file.
#[derive(Subcommand)]
enum DictionaryCommand {
    /// Sort the dictionary, remove duplicates and recount
    Sanitize {
        /// Write the result back to the dictionary
        #[arg(long)]
        commit: bool,
        /// Print the counts as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add words to the dictionary
    Add {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Add every word form from a Joukahainen XML export
    Import {
        xml: PathBuf,
        /// Only report how many words the file holds
        #[arg(long)]
        dry_run: bool,
    },
    /// Type words interactively, then save them
    Edit,
}

#[derive(Subcommand)]
enum ConfigAction {
    Show,
    Set {
        #[arg(long)]
        dictionary: Option<PathBuf>,
        #[arg(long)]
        encoding: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} [{:?}] {}", "error:".red().bold(), e.kind(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dict_core={level},dict_maint={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), DictError> {
    let Cli {
        settings: settings_path,
        dictionary,
        encoding,
        command,
        ..
    } = cli;
    let mut settings = Settings::load_or_default(&settings_path)?;

    let action = match command {
        Command::Config { action } => action,
        Command::Dictionary(command) => {
            if let Some(dictionary) = dictionary {
                settings.dictionary = dictionary;
            }
            if let Some(encoding) = encoding {
                settings.encoding = encoding;
            }
            let mut engine = settings.engine()?;
            return execute(command, &mut engine);
        }
    };

    if let ConfigAction::Set {
        dictionary,
        encoding,
    } = action
    {
        if let Some(dictionary) = dictionary {
            settings.dictionary = dictionary;
        }
        if let Some(encoding) = encoding {
            settings.encoding = encoding;
        }
        // Refuse to store a label we could not use.
        settings.text_encoding()?;
        settings.save(&settings_path)?;
    }
    print_settings(&settings);
    Ok(())
}

fn execute(command: DictionaryCommand, engine: &mut MaintenanceEngine) -> Result<(), DictError> {
    match command {
        DictionaryCommand::Sanitize { commit, json } => {
            let report = engine.sanitize()?;
            if json {
                let line = serde_json::to_string(&report).map_err(DictError::Report)?;
                println!("{line}");
            } else {
                print_report(engine, &report);
            }
            if commit {
                engine.commit()?;
                if !json {
                    println!("{}", "Dictionary saved.".green());
                }
            }
        }
        DictionaryCommand::Add { words } => {
            let summary = engine.add_words(&words)?;
            print_summary(&summary);
        }
        DictionaryCommand::Import { xml, dry_run: true } => {
            let batch = VocabularyImporter::new().import_from(&xml)?;
            println!(
                "{} entries, {} word forms in {}",
                batch.entries_read,
                batch.len(),
                xml.display()
            );
        }
        DictionaryCommand::Import { xml, dry_run: false } => {
            let summary = engine.import_vocabulary(&xml)?;
            print_summary(&summary);
        }
        DictionaryCommand::Edit => interactive(engine)?,
    }
    Ok(())
}

fn print_settings(settings: &Settings) {
    println!("dictionary: {}", settings.dictionary.display());
    println!("encoding:   {}", settings.encoding);
}

fn print_report(engine: &MaintenanceEngine, report: &SanitizeReport) {
    println!("{}", engine.dictionary_path().display().to_string().bold());
    let declared = report.original_count.to_string();
    let declared = if report.header_drift() {
        declared.yellow()
    } else {
        declared.stylize()
    };
    println!("  Words in header: {declared}");
    println!("  Lines in file:   {}", report.sorted_count);
    println!("  After cleanup:   {}", report.final_count.to_string().green());
    if report.duplicates_removed() > 0 {
        println!("  ({} duplicates removed)", report.duplicates_removed());
    }
}

fn print_summary(summary: &MergeSummary) {
    println!(
        "Added {}, already present {}, rejected {}. Dictionary now has {} words.",
        summary.added.to_string().green(),
        summary.already_present,
        summary.rejected,
        summary.total
    );
}

/// Line-oriented word entry. Plain lines are queued; commands start with ':'.
fn interactive(engine: &MaintenanceEngine) -> Result<(), DictError> {
    let mut pending = PendingWords::new();
    let stdin = stdin();
    let mut lines = stdin.lock().lines();

    println!("Type a word and press [Enter] to queue it.");
    println!(":list  :edit N  :save  :save N,M  exit\n");

    loop {
        print!("> ");
        let _ = stdout().flush();
        let Some(line) = lines.next() else { break };
        let line = line.map_err(|e| DictError::io(engine.dictionary_path(), e))?;
        let cmd = line.trim();

        match cmd {
            "exit" => break,
            ":list" => print_pending(&pending),
            ":save" => {
                if pending.is_empty() {
                    println!("Nothing to save.");
                } else {
                    report_save(pending.save_with(None, |words| engine.add_words(words)));
                }
            }
            s if s.starts_with(":save ") => {
                let selected = parse_rows(&s[":save ".len()..]);
                if pending.has_any(&selected) {
                    report_save(pending.save_with(Some(&selected), |words| engine.add_words(words)));
                } else {
                    println!("No such rows.");
                }
            }
            s if s.starts_with(":edit ") => {
                let row = s[":edit ".len()..].trim().parse::<usize>().ok();
                match row.and_then(|n| n.checked_sub(1)).and_then(|i| pending.take(i)) {
                    Some(word) => println!("Removed '{}' from the queue, retype it to re-add.", word),
                    None => println!("No such row."),
                }
            }
            s => {
                if pending.push(s) {
                    println!("Queued ({} waiting)", pending.len());
                }
            }
        }
    }

    if !pending.is_empty() {
        println!(
            "{}",
            format!("{} queued words were not saved.", pending.len()).yellow()
        );
    }
    Ok(())
}

/// A failed save is reported and the session goes on with the queue intact.
fn report_save(result: Result<MergeSummary, DictError>) {
    match result {
        Ok(summary) => print_summary(&summary),
        Err(e) => {
            eprintln!("{} [{:?}] {}", "error:".red().bold(), e.kind(), e);
            println!("{}", "Nothing was saved, the words are still queued.".yellow());
        }
    }
}

fn print_pending(pending: &PendingWords) {
    if pending.is_empty() {
        println!("Queue is empty.");
        return;
    }
    for (i, word) in pending.iter().enumerate() {
        println!("  {}: {}", i + 1, word);
    }
}

/// "1,3 4" -> [0, 2, 3]. Rows are numbered from 1 on screen.
fn parse_rows(spec: &str) -> Vec<usize> {
    spec.split([',', ' '])
        .filter_map(|part| part.trim().parse::<usize>().ok())
        .filter_map(|n| n.checked_sub(1))
        .collect()
}
