//! `fosslog` - CLI for fossillog
//!
//! Loads the catalog, runs one session in memory and prints views of it.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use fossillog::cli::{
    Cli, CollectionCommand, Command, ConfigCommand, OutputFormat, RecordCommand, RegionCommand,
    ReplayCommand,
};
use fossillog::session::{ScriptStep, StepOutcome};
use fossillog::{init_logging, Catalog, Config, Partition, Session};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    let catalog = cli.catalog.as_deref();
    match cli.command {
        Command::Config(cmd) => handle_config(&config, cmd),
        Command::Regions(cmd) => handle_regions(&open_session(catalog, &config)?, cmd.format),
        Command::Region(cmd) => handle_region(&mut open_session(catalog, &config)?, &cmd),
        Command::Fossils(cmd) => handle_fossils(&open_session(catalog, &config)?, cmd.format),
        Command::Collection(cmd) => {
            handle_collection(&mut open_session(catalog, &config)?, &cmd)
        }
        Command::Record(cmd) => handle_record(&mut open_session(catalog, &config)?, &cmd),
        Command::Replay(cmd) => handle_replay(&mut open_session(catalog, &config)?, &cmd),
    }
}

fn open_session(catalog_override: Option<&Path>, config: &Config) -> Result<Session> {
    let catalog = match catalog_override {
        Some(path) => Catalog::load(path),
        None => config.load_catalog(),
    }
    .context("loading catalog")?;
    Ok(Session::with_form_config(catalog, config.form.clone()))
}

fn load_script(path: &Path) -> Result<Vec<ScriptStep>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing script {}", path.display()))
}

fn replay_optional(session: &mut Session, script: Option<&Path>) -> Result<()> {
    if let Some(path) = script {
        let steps = load_script(path)?;
        for (i, outcome) in session.run_script(steps).iter().enumerate() {
            if let Some(notice) = outcome.rejection_notice(i + 1) {
                eprintln!("{notice}");
            }
        }
    }
    Ok(())
}

fn handle_regions(session: &Session, format: OutputFormat) -> Result<()> {
    let regions = session.catalog().list_regions();
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(regions)?);
        return Ok(());
    }
    for region in regions {
        println!(
            "{:<12} {:<20} {} fossils, {} locations",
            region.id,
            region.name,
            region.fossils.len(),
            region.locations.len()
        );
    }
    Ok(())
}

fn handle_region(session: &mut Session, cmd: &RegionCommand) -> Result<()> {
    replay_optional(session, cmd.script.as_deref())?;
    let progress = session
        .region_progress(&cmd.id)
        .with_context(|| format!("unknown region '{}'", cmd.id))?;

    if cmd.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&progress)?);
        return Ok(());
    }
    println!(
        "{} ({}/{} collected)",
        progress.region.name,
        progress.collected_count(),
        progress.fossils.len()
    );
    for fossil in &progress.fossils {
        let mark = if fossil.collected { "collected" } else { "to collect" };
        println!("  {:<28} {mark}", fossil.name);
    }
    if !progress.region.locations.is_empty() {
        println!();
        println!("Locations:");
        for location in &progress.region.locations {
            println!("  {:<16} {}", location.id, location.name);
        }
    }
    Ok(())
}

fn handle_fossils(session: &Session, format: OutputFormat) -> Result<()> {
    let names = session.catalog().all_fossil_names();
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(names)?);
    } else {
        for name in names {
            println!("{name}");
        }
    }
    Ok(())
}

fn handle_collection(session: &mut Session, cmd: &CollectionCommand) -> Result<()> {
    replay_optional(session, cmd.script.as_deref())?;
    let partition = session.collection();
    if cmd.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&partition)?);
    } else {
        print_partition(&partition);
    }
    Ok(())
}

fn print_partition(partition: &Partition) {
    println!("Collected ({})", partition.collected.len());
    for name in &partition.collected {
        println!("  {name}");
    }
    println!("To collect ({})", partition.to_collect.len());
    for name in &partition.to_collect {
        println!("  {name}");
    }
}

fn handle_record(session: &mut Session, cmd: &RecordCommand) -> Result<()> {
    let draft = cmd
        .edits()
        .into_iter()
        .fold(session.new_draft(), |draft, edit| {
            draft.apply(edit, session.catalog())
        });

    let notice = draft.typicality_notice(session.catalog());
    let find = session.submit(&draft)?.clone();

    if cmd.format == OutputFormat::Json {
        let out = serde_json::json!({
            "find": find,
            "notice": notice.map(|n| n.to_string()),
            "collection": session.collection(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if let Some(notice) = notice {
        println!("{notice}");
    }
    println!("Recorded find {}", find.id);
    println!("{}", serde_json::to_string_pretty(&find)?);
    let partition = session.collection();
    println!(
        "Collection: {}/{} fossils collected",
        partition.collected.len(),
        partition.total()
    );
    Ok(())
}

fn handle_replay(session: &mut Session, cmd: &ReplayCommand) -> Result<()> {
    let steps = load_script(&cmd.script)?;
    let outcomes = session.run_script(steps);

    if cmd.format == OutputFormat::Json {
        let out = serde_json::json!({
            "outcomes": outcomes,
            "archive": session.archive(),
            "collection": session.collection(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for (i, outcome) in outcomes.iter().enumerate() {
        match outcome {
            StepOutcome::Edited { notice: Some(notice) } => println!("{:>3}  {notice}", i + 1),
            StepOutcome::Edited { notice: None } => {}
            StepOutcome::Submitted { id } => println!("{:>3}  recorded find {id}", i + 1),
            StepOutcome::Rejected { field, message } => {
                println!("{:>3}  rejected ({field}): {message}", i + 1);
            }
            StepOutcome::Discarded => println!("{:>3}  draft discarded", i + 1),
        }
    }

    println!();
    println!("Archive ({})", session.log().len());
    for entry in session.archive() {
        let find = entry.find;
        let mut line = format!("  {}  {}", find.id, find.fossil());
        let _ = write!(line, " in {}", entry.region_name.unwrap_or(find.region_id()));
        if let Some(location) = entry.location_name {
            let suffix = if entry.is_new_location { " (new)" } else { "" };
            let _ = write!(line, ", {location}{suffix}");
        }
        if let Some(date) = &find.record.date {
            let _ = write!(line, ", {date}");
        }
        if let Some(note) = &find.record.note {
            let _ = write!(line, " - {note}");
        }
        println!("{line}");
    }

    println!();
    print_partition(&session.collection());
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Catalog]");
                match &config.catalog.path {
                    Some(path) => println!("  Path:               {}", path.display()),
                    None => println!("  Path:               (bundled)"),
                }
                println!();
                println!("[Form]");
                println!("  Prefill today:      {}", config.form.prefill_today);
                println!("  Earliest year:      {}", config.form.earliest_year);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path)).context("configuration is invalid")?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
