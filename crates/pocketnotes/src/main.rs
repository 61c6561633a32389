//! `pnotes` - CLI for pocketnotes
//!
//! Each invocation loads the stored groups, applies one command and writes
//! any change back before exiting.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use clap::Parser;

use pocketnotes::cli::{Cli, Command, ConfigCommand, GroupCommand, NoteCommand, ShowCommand};
use pocketnotes::{
    init_logging, view, Color, Config, Error, GroupForm, GroupId, NoteComposer, NotesStore,
    SqliteStore,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult {
    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Group(cmd) => handle_group(&config, cmd),
        Command::Note(cmd) => handle_note(&config, cmd),
        Command::Show(cmd) => handle_show(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_store(config: &Config) -> pocketnotes::Result<NotesStore<SqliteStore>> {
    let backend = SqliteStore::open(config.database_path())?;
    NotesStore::with_config(backend, config)
}

fn lookup(store: &NotesStore<SqliteStore>, name: &str) -> pocketnotes::Result<GroupId> {
    store
        .find_by_name(name)
        .map(|g| g.id)
        .ok_or_else(|| Error::GroupNameNotFound {
            name: name.to_string(),
        })
}

fn handle_group(config: &Config, cmd: GroupCommand) -> CliResult {
    let mut store = open_store(config)?;

    match cmd {
        GroupCommand::Create { name, color } => {
            let mut form = GroupForm::new(store.rules());
            form.set_name(&name);
            form.set_color(Color::from(color));

            match form.submit(&mut store)? {
                Some(id) => {
                    if let Some(group) = store.group(id) {
                        println!("Created {} {}", view::render_avatar(group), group.name);
                    }
                }
                None => {
                    let reason = form
                        .error()
                        .map_or_else(String::new, |e| e.to_string());
                    return Err(reason.into());
                }
            }
        }
        GroupCommand::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(store.groups())?);
            } else {
                print!("{}", view::render_sidebar(store.groups(), None));
            }
        }
    }

    store.flush()?;
    Ok(())
}

fn handle_note(config: &Config, cmd: NoteCommand) -> CliResult {
    let mut store = open_store(config)?;

    match cmd {
        NoteCommand::Add { group, text } => {
            let id = lookup(&store, &group)?;
            store.select_group(Some(id))?;

            let mut composer = NoteComposer::new();
            composer.set_text(&text);
            if composer.submit(&mut store)?.is_none() {
                let reason = composer
                    .error()
                    .map_or_else(String::new, |e| e.to_string());
                return Err(reason.into());
            }

            if let Some(note) = store.selected().and_then(|g| g.last_note()) {
                print!("{}", view::render_note(note));
            }
        }
    }

    store.flush()?;
    Ok(())
}

fn handle_show(config: &Config, cmd: &ShowCommand) -> CliResult {
    let mut store = open_store(config)?;

    if let Some(name) = &cmd.group {
        let id = lookup(&store, name)?;
        store.select_group(Some(id))?;
    }

    if cmd.json {
        match store.selected() {
            Some(group) => println!("{}", serde_json::to_string_pretty(group)?),
            None => println!("{}", serde_json::to_string_pretty(store.groups())?),
        }
    } else {
        print!("{}", view::render_store(&store));
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> CliResult {
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
                println!("  Key:                {}", config.storage.key);
                println!("  Persist empty:      {}", config.storage.persist_empty);
                println!();
                println!("[Groups]");
                println!("  Min name length:    {}", config.groups.min_name_length);
                println!("  Max name length:    {}", config.groups.max_name_length);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
