//! `rsvp` - CLI for wedding-rsvp
//!
//! Drives the RSVP page over the on-device `SQLite` store: submit a response,
//! list saved responses, export them as CSV, or clear them.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;

use wedding_rsvp::cli::{
    Cli, Command, ConfigCommand, ExportCommand, OutputFormat, StatusCommand, TerminalDialogs,
};
use wedding_rsvp::{
    init_logging, Config, ExportController, ExportOutcome, FileDownload, RecordStore, Renderer,
    RsvpPage, SqliteStorage, SubmitOutcome,
};

type Page = RsvpPage<SqliteStorage>;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Submit(cmd) => {
            let mut page = open_page(&config)?;
            page.fill_form(cmd.to_form());
            handle_submit(&mut page)
        }
        Command::List(cmd) => handle_list(&open_page(&config)?, cmd.format),
        Command::Export(cmd) => handle_export(&config, &open_page(&config)?, &cmd),
        Command::Clear(cmd) => {
            let mut page = open_page(&config)?;
            let mut dialogs = TerminalDialogs::stdio(cmd.yes);
            page.clear_all(&mut dialogs)?;
            Ok(())
        }
        Command::Status(cmd) => handle_status(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_storage(config: &Config) -> anyhow::Result<SqliteStorage> {
    let path = config.database_path();
    SqliteStorage::open(&path).with_context(|| format!("opening store at {}", path.display()))
}

fn open_page(config: &Config) -> anyhow::Result<Page> {
    let store = RecordStore::with_key(open_storage(config)?, &config.storage.storage_key);
    Ok(RsvpPage::new(
        store,
        Renderer::new(&config.display.timestamp_format),
        ExportController::new(&config.export.file_name),
    ))
}

fn handle_submit(page: &mut Page) -> anyhow::Result<()> {
    let outcome = page.submit();
    println!("{}", page.status());
    match outcome {
        SubmitOutcome::Saved(_) => {
            println!();
            print!("{}", page.list().to_text());
            Ok(())
        }
        SubmitOutcome::Rejected(status) => anyhow::bail!("RSVP not saved: {status}"),
    }
}

fn handle_list(page: &Page, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Plain => print!("{}", page.list().to_text()),
        OutputFormat::Html => println!("{}", page.list().to_html()),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&page.store().load())?);
        }
    }
    Ok(())
}

fn handle_export(config: &Config, page: &Page, cmd: &ExportCommand) -> anyhow::Result<()> {
    let dir = cmd.output.clone().unwrap_or_else(|| config.output_dir());
    let mut sink = FileDownload::new(dir);
    let mut dialogs = TerminalDialogs::stdio(false);

    if let ExportOutcome::Exported { rows } = page.export_csv(&mut dialogs, &mut sink)? {
        if let Some(path) = sink.last_written() {
            println!("Exported {rows} RSVPs to {}", path.display());
        }
    }
    Ok(())
}

fn handle_status(config: &Config, cmd: &StatusCommand) -> anyhow::Result<()> {
    let storage = open_storage(config)?;
    let stats = storage.stats()?;
    let store = RecordStore::with_key(storage, &config.storage.storage_key);
    let rsvps = store.try_load()?.len();

    if cmd.json {
        let status = serde_json::json!({
            "database_path": config.database_path(),
            "storage_key": store.key(),
            "rsvps": rsvps,
            "items": stats.item_count,
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("rsvp status");
        println!("-----------");
        println!("Database:      {}", config.database_path().display());
        println!("Storage key:   {}", store.key());
        println!("RSVPs:         {rsvps}");
        println!("Size (bytes):  {}", stats.db_size_bytes);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Storage key:        {}", config.storage.storage_key);
                println!();
                println!("[Export]");
                println!("  Output directory:   {}", config.output_dir().display());
                println!("  File name:          {}", config.export.file_name);
                println!();
                println!("[Display]");
                println!("  Timestamp format:   {}", config.display.timestamp_format);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
