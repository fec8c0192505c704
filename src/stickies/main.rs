use chrono::Utc;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::path::PathBuf;
use std::time::Duration;
use stickies::api::{CmdMessage, ConfigAction, MessageLevel, NotesApi};
use stickies::clock::SystemClock;
use stickies::config::StickiesConfig;
use stickies::editor::edit_text;
use stickies::error::{NotesError, Result};
use stickies::model::{hex_rgb, Note};
use stickies::store::fs::FileStorage;
use stickies::store::NoteStore;
use timeago::Formatter;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: NotesApi<FileStorage, SystemClock>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Add { text, no_editor }) => handle_add(&mut ctx, text, no_editor),
        Some(Commands::View { position }) => handle_view(&mut ctx, position),
        Some(Commands::Edit { position }) => handle_edit(&mut ctx, position),
        Some(Commands::Set { position, text }) => handle_set(&mut ctx, position, text),
        Some(Commands::Delete { positions }) => handle_delete(&mut ctx, positions),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        Some(Commands::List) | None => handle_list(&mut ctx),
    }
}

fn init_context() -> Result<AppContext> {
    let data_dir = match std::env::var_os("STICKIES_HOME") {
        Some(dir) => PathBuf::from(dir),
        None => ProjectDirs::from("com", "stickies", "stickies")
            .ok_or_else(|| NotesError::Store("Could not determine data dir".to_string()))?
            .data_dir()
            .to_path_buf(),
    };

    let config = StickiesConfig::load(&data_dir).unwrap_or_default();
    let store = NoteStore::open(FileStorage::new(data_dir.clone()), SystemClock)
        .with_palette(config.palette.clone())
        .with_debounce_ms(config.debounce_ms);
    let api = NotesApi::new(store, data_dir);

    Ok(AppContext { api })
}

fn handle_add(ctx: &mut AppContext, text: Option<String>, no_editor: bool) -> Result<()> {
    let final_text = if no_editor {
        text
    } else {
        Some(edit_text(&text.unwrap_or_default())?)
    };

    let result = ctx.api.create_note(final_text)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.list_notes()?;
    print_notes(&result.notes);
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &mut AppContext, position: usize) -> Result<()> {
    let id = ctx.api.resolve_position(position)?;
    let note = ctx
        .api
        .get_note(id)
        .ok_or_else(|| NotesError::Api(format!("No note at position {}", position)))?;
    print_full_note(position, &note);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, position: usize) -> Result<()> {
    let id = ctx.api.resolve_position(position)?;
    let note = ctx
        .api
        .get_note(id)
        .ok_or_else(|| NotesError::Api(format!("No note at position {}", position)))?;

    let edited = edit_text(&note.text)?;
    let result = ctx.api.update_note(id, edited)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_set(ctx: &mut AppContext, position: usize, text: String) -> Result<()> {
    let id = ctx.api.resolve_position(position)?;
    let result = ctx.api.update_note(id, text)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, positions: Vec<usize>) -> Result<()> {
    // Resolve every position up front; deleting shifts the list.
    let ids = positions
        .iter()
        .map(|&p| ctx.api.resolve_position(p))
        .collect::<Result<Vec<_>>>()?;

    for id in ids {
        let result = ctx.api.delete_note(id)?;
        print_messages(&result.messages);
    }
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if let Some(config) = &result.config {
        for key in ["debounce-ms", "palette"] {
            if let Some(val) = config.get(key) {
                println!("{} = {}", key, val);
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 80;
const TIME_WIDTH: usize = 14;

fn print_notes(notes: &[Note]) {
    if notes.is_empty() {
        println!("No notes yet.");
        return;
    }

    for (i, note) in notes.iter().enumerate() {
        let idx_str = format!("{:>2}. ", i + 1);
        let swatch = color_swatch(&note.color);

        let preview = note.preview();
        let fixed_width = idx_str.width() + 2 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let preview_display = truncate_to_width(&preview, available);
        let padding = available.saturating_sub(preview_display.width());

        let preview_colored = if note.text.is_empty() {
            preview_display.dimmed()
        } else {
            preview_display.normal()
        };

        println!(
            "{}{} {}{}{}",
            idx_str,
            swatch,
            preview_colored,
            " ".repeat(padding),
            format_time_ago(note.time).dimmed()
        );
    }
}

fn print_full_note(position: usize, note: &Note) {
    println!(
        "{} {} {}",
        format!("{}.", position).yellow(),
        color_swatch(&note.color),
        format_time_ago(note.time).dimmed()
    );
    println!("--------------------------------");
    if note.text.is_empty() {
        println!("{}", "Empty note".dimmed());
    } else {
        println!("{}", note.text);
    }
}

fn color_swatch(color: &str) -> ColoredString {
    match hex_rgb(color) {
        Some((r, g, b)) => "■".truecolor(r, g, b),
        None => "■".normal(),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(time_ms: i64) -> String {
    let now_ms = Utc::now().timestamp_millis();
    let elapsed = Duration::from_millis((now_ms - time_ms).max(0) as u64);

    let formatter = Formatter::new();
    format!("{:>width$}", formatter.convert(elapsed), width = TIME_WIDTH)
}
