//! Command-line interface for docfreq
//!
//! Usage:
//!   docfreq count `<document>` [--output `<path>`]                 - All word frequencies
//!   docfreq select `<document>` --words `<list>` [--output `<path>`] - Frequencies of chosen words
//!   docfreq filter `<document>` [--output `<path>`]                - Frequencies without stop words
//!   docfreq languages                                          - Built-in stop-word lists
//!   docfreq config [--language `<code>`] [--save]                  - Show or store settings
use std::{
    path::{
        Path,
        PathBuf,
    },
    process,
};

use clap::{
    value_parser,
    Arg,
    ArgAction,
    ArgMatches,
    Command,
};
use docfreq::{
    analysis::{
        analyze_file,
        derive_view,
        export_table,
        parse_selection,
        AnalysisView,
        ExportFormat,
        ExportOutcome,
        FrequencyTable,
        Language,
        StopWordSet,
    },
    core::DocFreqError,
    logging,
    settings::Settings,
};

fn document_command(name: &'static str, about: &'static str) -> Command {
    let command = Command::new(name)
        .about(about)
        .arg(
            Arg::new("document")
                .help("Path to the document (txt, md, srt, docx, pdf)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Write the resulting table to this file")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("top")
                .long("top")
                .short('n')
                .help("Only print the N most frequent words (export is not limited)")
                .value_parser(value_parser!(usize)),
        );

    with_settings_args(command)
}

/// Flags that override stored settings.
fn with_settings_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Export format: json or csv (default from settings)"),
        )
        .arg(
            Arg::new("compact")
                .long("compact")
                .help("Write JSON without indentation")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stop-words")
                .long("stop-words")
                .help("Additional stop-word file, one word per line (repeatable)")
                .value_parser(value_parser!(PathBuf))
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("language")
                .long("language")
                .short('l')
                .help("Built-in stop-word language to use: en, ru, de (repeatable)")
                .action(ArgAction::Append),
        )
}

fn main() {
    let matches = Command::new("docfreq")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Count word frequencies in documents and export them")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
        .subcommand(document_command("count", "Count and show word frequencies"))
        .subcommand(
            document_command("select", "Show frequencies of selected words only").arg(
                Arg::new("words")
                    .long("words")
                    .short('w')
                    .required(true)
                    .help("Comma-separated list of target words (e.g. \"data, analysis, test\")"),
            ),
        )
        .subcommand(document_command("filter", "Show word frequencies excluding stop words"))
        .subcommand(Command::new("languages").about("List built-in stop-word languages"))
        .subcommand(
            with_settings_args(
                Command::new("config").about("Show the effective settings, optionally storing them"),
            )
            .arg(
                Arg::new("save")
                    .long("save")
                    .help("Store the settings shown as the new defaults")
                    .action(ArgAction::SetTrue),
            ),
        )
        .get_matches();

    logging::init(matches.get_flag("verbose"));

    let result = match matches.subcommand() {
        Some(("count", sub)) => handle_document_command(sub, AnalysisView::All),
        Some(("select", sub)) => {
            let words = sub.get_one::<String>("words").map(String::as_str).unwrap_or_default();
            let selection = parse_selection(words);
            if selection.is_empty() {
                Err(DocFreqError::Custom("No valid words entered.".to_string()))
            } else {
                handle_document_command(sub, AnalysisView::Selected(selection))
            }
        }
        Some(("filter", sub)) => handle_document_command(sub, AnalysisView::ExcludingStopWords),
        Some(("languages", _)) => {
            handle_languages_command();
            Ok(())
        }
        Some(("config", sub)) => handle_config_command(sub),
        _ => unreachable!(),
    };

    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Settings file values overridden by whatever was given on the command line.
fn resolve_settings(matches: &ArgMatches) -> Result<Settings, DocFreqError> {
    let mut settings = Settings::load();

    if let Some(languages) = matches.get_many::<String>("language") {
        settings.languages =
            languages.map(|code| code.parse::<Language>()).collect::<Result<Vec<_>, _>>()?;
    }
    if let Some(files) = matches.get_many::<PathBuf>("stop-words") {
        settings.stop_word_files.extend(files.cloned());
    }
    if let Some(name) = matches.get_one::<String>("format") {
        settings.default_format = ExportFormat::from_name(name)
            .ok_or_else(|| DocFreqError::Custom(format!("Unknown export format '{}'", name)))?;
    }
    if matches.get_flag("compact") {
        settings.pretty_json = false;
    }

    Ok(settings)
}

fn handle_document_command(matches: &ArgMatches, view: AnalysisView) -> Result<(), DocFreqError> {
    let document = matches
        .get_one::<String>("document")
        .map(PathBuf::from)
        .ok_or_else(|| DocFreqError::Custom("Missing document path".to_string()))?;
    let settings = resolve_settings(matches)?;

    let stop_words = match view {
        AnalysisView::ExcludingStopWords => settings.stop_words()?,
        _ => StopWordSet::empty(),
    };

    let result = analyze_file(&document)?;
    let table = derive_view(&result.table, &view, &stop_words);

    print_table(view.label(), &table, matches.get_one::<usize>("top").copied());
    println!(
        "\n{} pages, {} tokens ({} discarded), {} unique words",
        result.pages,
        result.total_tokens,
        result.discarded_tokens,
        result.table.len()
    );

    if let Some(output) = matches.get_one::<PathBuf>("output") {
        export(&table, output, &settings)?;
    }

    Ok(())
}

fn print_table(label: &str, table: &FrequencyTable, top: Option<usize>) {
    println!("\n{}:", label);

    if table.is_empty() {
        println!("(no words)");
        return;
    }

    let shown = top.map(|n| table.top(n)).unwrap_or(table.entries());
    for entry in shown {
        println!("{} — {}", entry.word, entry.count);
    }
    if shown.len() < table.len() {
        println!("... {} more", table.len() - shown.len());
    }
}

fn export(table: &FrequencyTable, output: &Path, settings: &Settings) -> Result<(), DocFreqError> {
    match export_table(table, output, &settings.export_options())? {
        ExportOutcome::Written { path, entries } => {
            println!("Exported {} words to {}", entries, path.display());
        }
        ExportOutcome::Skipped => {
            println!("No word frequency data to export.");
        }
    }
    Ok(())
}

fn handle_languages_command() {
    for language in Language::ALL {
        println!("{} ({}): {} stop words", language, language.code(), language.stop_words().len());
    }
}

fn handle_config_command(matches: &ArgMatches) -> Result<(), DocFreqError> {
    let settings = resolve_settings(matches)?;
    println!("{}", serde_json::to_string_pretty(&settings)?);

    if matches.get_flag("save") {
        let path = settings.save()?;
        println!("Settings saved to {}", path.display());
    }
    Ok(())
}
