//! CLI interface for postdeck.
//!
//! The presentation layer of the scheduling dashboard: it owns all
//! mutation of ledger entries and drives the store, while the
//! `calendar` and `model` modules stay pure. Each subcommand is
//! non-interactive: arguments in, lines out.
//!
//! Mutating commands load state, change it in memory, and persist
//! best-effort — a failed write is logged and never aborts the command,
//! so the session's in-memory result still gets reported.

mod format;

use clap::{Parser, Subcommand};
use serde::Serialize;
use uuid::Uuid;

use crate::calendar::{self, DayKey, Ledger, days_in_month};
use crate::config::Config;
use crate::model::{CalendarEvent, Draft, Platform};
use crate::store::Store;

use format::{format_event, format_month_row};

/// Store keys for the independent pieces of persisted UI state.
const LEDGER_KEY: &str = "ledger";
const DRAFTS_KEY: &str = "drafts";
const LANGUAGE_KEY: &str = "language";

const DEFAULT_LANGUAGE: &str = "en";

/// Postdeck — plan posts across platforms, one calendar day at a time.
#[derive(Debug, Parser)]
#[command(name = "postdeck", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow: getting a post out
  1. postdeck schedule 2026-08-24 x instagram
  2. postdeck write 2026-08-24 x "Launch day! Here's what we built..."
  3. postdeck plan 2026-08-24 x "9:00 AM"
  4. postdeck month 2026 8        # +x means ready, ~instagram needs work
  5. postdeck publish 2026-08-24 x

Drafts:
  postdeck draft new x "Half-formed thought..."
  postdeck draft attach 3fa8 2026-08-30 --time "1:00 PM""#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Queue a post for a day on one or more platforms.
    ///
    /// With no platforms given, uses `default-platforms` from config.
    Schedule {
        /// Calendar day, e.g. `2026-08-24`.
        date: DayKey,

        /// Platform ids (e.g. `x`, `instagram`). Open set.
        platforms: Vec<String>,

        /// Publish time as display text, e.g. `"9:00 AM"`.
        #[arg(long)]
        time: Option<String>,

        /// Post body, if already written.
        #[arg(long)]
        content: Option<String>,
    },

    /// Author (or replace) the post body for a scheduled entry.
    Write {
        date: DayKey,
        platform: String,
        content: String,
    },

    /// Fix the publish time for a scheduled entry.
    Plan {
        date: DayKey,
        platform: String,
        /// Display text, e.g. `"9:00 AM"`.
        time: String,
    },

    /// Record that the platform confirmed delivery.
    Publish { date: DayKey, platform: String },

    /// Record that delivery was attempted and rejected.
    Fail {
        date: DayKey,
        platform: String,

        /// Status label to show, e.g. `"rate limited"`.
        #[arg(long)]
        status: Option<String>,
    },

    /// Remove a platform's entry from a day.
    ///
    /// The only way entries leave the ledger.
    Unschedule { date: DayKey, platform: String },

    /// Show everything scheduled for one day.
    Day { date: DayKey },

    /// Show the whole month, one row per day.
    Month {
        year: i16,
        /// Month number, 1-12.
        month: i8,
    },

    /// Manage draft posts not yet on the calendar.
    Draft {
        #[command(subcommand)]
        command: DraftCommand,
    },

    /// Show or set the dashboard language preference.
    Lang {
        /// Language code (e.g. `en`, `de`). Omit to show the current one.
        code: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum DraftCommand {
    /// Create a draft. Prints the draft ID.
    New { platform: String, content: String },

    /// List drafts.
    List,

    /// Delete a draft.
    Rm {
        /// Draft ID: full UUID or unambiguous prefix (e.g. `3fa8`).
        id: String,
    },

    /// Put a draft on the calendar, removing it from the draft list.
    Attach {
        /// Draft ID: full UUID or unambiguous prefix.
        id: String,
        date: DayKey,

        /// Publish time as display text.
        #[arg(long)]
        time: Option<String>,
    },
}

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config, store: &Store) -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Schedule {
            date,
            platforms,
            time,
            content,
        } => cmd_schedule(config, store, date, &platforms, time, content),
        Command::Write {
            date,
            platform,
            content,
        } => cmd_write(store, date, &platform, content),
        Command::Plan {
            date,
            platform,
            time,
        } => cmd_plan(store, date, &platform, time),
        Command::Publish { date, platform } => cmd_publish(store, date, &platform),
        Command::Fail {
            date,
            platform,
            status,
        } => cmd_fail(store, date, &platform, status.as_deref()),
        Command::Unschedule { date, platform } => cmd_unschedule(store, date, &platform),
        Command::Day { date } => cmd_day(store, date),
        Command::Month { year, month } => cmd_month(store, year, month),
        Command::Draft { command } => match command {
            DraftCommand::New { platform, content } => cmd_draft_new(store, &platform, content),
            DraftCommand::List => cmd_draft_list(store),
            DraftCommand::Rm { id } => cmd_draft_rm(store, &id),
            DraftCommand::Attach { id, date, time } => cmd_draft_attach(store, &id, date, time),
        },
        Command::Lang { code } => cmd_lang(store, code),
    }
}

/// Persist one piece of state, logging and moving on if the write
/// fails. The in-memory state already reflects the change and stays
/// authoritative for this session.
fn persist<T: Serialize>(store: &Store, key: &str, value: &T) {
    if let Err(e) = store.save(key, value) {
        log::warn!("failed to persist '{key}': {e}");
    }
}

fn load_ledger(store: &Store) -> Ledger {
    store.load_or(LEDGER_KEY, Ledger::default())
}

fn load_drafts(store: &Store) -> Vec<Draft> {
    store.load_or(DRAFTS_KEY, Vec::new())
}

fn cmd_schedule(
    config: &Config,
    store: &Store,
    date: DayKey,
    platforms: &[String],
    time: Option<String>,
    content: Option<String>,
) -> Result<(), String> {
    let platforms: Vec<Platform> = if platforms.is_empty() {
        config.default_platforms()
    } else {
        platforms.iter().map(|id| Platform::new(id)).collect()
    };
    if platforms.is_empty() {
        return Err(
            "specify at least one platform, or set default-platforms in config".to_string(),
        );
    }

    let mut ledger = load_ledger(store);
    for platform in platforms {
        if ledger.event_mut(date, &platform).is_some() {
            eprintln!("{} already scheduled on {date}, skipping", platform);
            continue;
        }
        let mut event = CalendarEvent::queued(platform.clone());
        event.scheduled_time = time.clone();
        event.content = content.clone();
        ledger.schedule(date, event);
        eprintln!("Scheduled {platform} on {date}");
    }
    persist(store, LEDGER_KEY, &ledger);
    Ok(())
}

fn cmd_write(store: &Store, date: DayKey, platform: &str, content: String) -> Result<(), String> {
    let platform = Platform::new(platform);
    let mut ledger = load_ledger(store);
    let event = require_event(&mut ledger, date, &platform)?;
    event.content = Some(content);

    let note = event.note_type().label();
    eprintln!("Content set for {platform} on {date} [{note}]");
    persist(store, LEDGER_KEY, &ledger);
    Ok(())
}

fn cmd_plan(store: &Store, date: DayKey, platform: &str, time: String) -> Result<(), String> {
    let platform = Platform::new(platform);
    let mut ledger = load_ledger(store);
    let event = require_event(&mut ledger, date, &platform)?;
    event.scheduled_time = Some(time.clone());

    let note = event.note_type().label();
    eprintln!("{platform} on {date} planned for {time} [{note}]");
    persist(store, LEDGER_KEY, &ledger);
    Ok(())
}

fn cmd_publish(store: &Store, date: DayKey, platform: &str) -> Result<(), String> {
    let platform = Platform::new(platform);
    let mut ledger = load_ledger(store);
    require_event(&mut ledger, date, &platform)?.mark_published();

    eprintln!("{platform} on {date} marked published");
    persist(store, LEDGER_KEY, &ledger);
    Ok(())
}

fn cmd_fail(
    store: &Store,
    date: DayKey,
    platform: &str,
    status: Option<&str>,
) -> Result<(), String> {
    let platform = Platform::new(platform);
    let mut ledger = load_ledger(store);
    require_event(&mut ledger, date, &platform)?.mark_failed(status);

    eprintln!("{platform} on {date} marked failed");
    persist(store, LEDGER_KEY, &ledger);
    Ok(())
}

fn cmd_unschedule(store: &Store, date: DayKey, platform: &str) -> Result<(), String> {
    let platform = Platform::new(platform);
    let mut ledger = load_ledger(store);
    if !ledger.remove(date, &platform) {
        return Err(format!("nothing scheduled for {platform} on {date}"));
    }

    eprintln!("Removed {platform} from {date}");
    persist(store, LEDGER_KEY, &ledger);
    Ok(())
}

fn cmd_day(store: &Store, date: DayKey) -> Result<(), String> {
    let ledger = load_ledger(store);
    let events = ledger.events_for_day(date);

    println!("{date}");
    if events.is_empty() {
        println!("  nothing scheduled");
        return Ok(());
    }
    for event in events {
        println!("  {}", format_event(event).replace('\n', "\n  "));
    }
    Ok(())
}

fn cmd_month(store: &Store, year: i16, month: i8) -> Result<(), String> {
    // `days_in_month` assumes a valid year and month; the boundary validates.
    if !(calendar::MIN_YEAR..=calendar::MAX_YEAR).contains(&year) {
        return Err(format!(
            "year must be {}..{}, got {year}",
            calendar::MIN_YEAR,
            calendar::MAX_YEAR
        ));
    }
    if !(1..=12).contains(&month) {
        return Err(format!("month must be 1-12, got {month}"));
    }

    let ledger = load_ledger(store);
    println!("{year}-{month:02}  (+ ready  ~ needs work  ! failed)");
    for day in 1..=days_in_month(year, month) {
        let key = DayKey::new(year, month, day);
        println!("{}", format_month_row(key, ledger.events_for_day(key)));
    }
    Ok(())
}

fn cmd_draft_new(store: &Store, platform: &str, content: String) -> Result<(), String> {
    let draft = Draft::new(Platform::new(platform), content);
    let mut drafts = load_drafts(store);
    let id = draft.id;
    drafts.push(draft);

    persist(store, DRAFTS_KEY, &drafts);
    println!("{id}");
    Ok(())
}

fn cmd_draft_list(store: &Store) -> Result<(), String> {
    let drafts = load_drafts(store);
    if drafts.is_empty() {
        println!("No drafts");
        return Ok(());
    }
    for draft in &drafts {
        let short_id = &draft.id.to_string()[..8];
        let first_line = draft.content.lines().next().unwrap_or("");
        println!("{short_id}  [{}]  {first_line}", draft.platform);
    }
    Ok(())
}

fn cmd_draft_rm(store: &Store, reference: &str) -> Result<(), String> {
    let mut drafts = load_drafts(store);
    let id = resolve_draft(&drafts, reference)?;
    drafts.retain(|d| d.id != id);

    persist(store, DRAFTS_KEY, &drafts);
    eprintln!("Deleted draft {}", &id.to_string()[..8]);
    Ok(())
}

fn cmd_draft_attach(
    store: &Store,
    reference: &str,
    date: DayKey,
    time: Option<String>,
) -> Result<(), String> {
    let mut drafts = load_drafts(store);
    let id = resolve_draft(&drafts, reference)?;
    let pos = drafts
        .iter()
        .position(|d| d.id == id)
        .ok_or("draft disappeared while resolving")?;
    let draft = drafts.remove(pos);

    let mut ledger = load_ledger(store);
    if ledger.event_mut(date, &draft.platform).is_some() {
        return Err(format!(
            "{} already scheduled on {date} — unschedule it first",
            draft.platform
        ));
    }

    let mut event = CalendarEvent::queued(draft.platform.clone());
    event.content = Some(draft.content);
    event.scheduled_time = time;
    let note = event.note_type().label();
    ledger.schedule(date, event);

    persist(store, LEDGER_KEY, &ledger);
    persist(store, DRAFTS_KEY, &drafts);
    eprintln!("Attached draft to {} on {date} [{note}]", draft.platform);
    Ok(())
}

fn cmd_lang(store: &Store, code: Option<String>) -> Result<(), String> {
    match code {
        Some(code) => {
            persist(store, LANGUAGE_KEY, &code);
            eprintln!("Language set to {code}");
        }
        None => {
            let current: String = store.load_or(LANGUAGE_KEY, DEFAULT_LANGUAGE.to_string());
            println!("{current}");
        }
    }
    Ok(())
}

/// Look up a platform's entry on a day, or explain what's missing.
fn require_event<'a>(
    ledger: &'a mut Ledger,
    date: DayKey,
    platform: &Platform,
) -> Result<&'a mut CalendarEvent, String> {
    ledger.event_mut(date, platform).ok_or_else(|| {
        format!("nothing scheduled for {platform} on {date} — run `postdeck schedule` first")
    })
}

/// Resolve a draft reference (full UUID or unambiguous prefix) to an ID.
fn resolve_draft(drafts: &[Draft], reference: &str) -> Result<Uuid, String> {
    if reference.is_empty() {
        return Err("empty draft reference".to_string());
    }
    if let Ok(id) = reference.parse::<Uuid>() {
        if drafts.iter().any(|d| d.id == id) {
            return Ok(id);
        }
        return Err(format!("draft not found: {reference}"));
    }

    let matches: Vec<Uuid> = drafts
        .iter()
        .filter(|d| d.id.to_string().starts_with(reference))
        .map(|d| d.id)
        .collect();
    match matches.as_slice() {
        [] => Err(format!("draft not found: {reference}")),
        [id] => Ok(*id),
        _ => Err(format!("ambiguous draft prefix: {reference}")),
    }
}
