use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use folio_core::model::{QuestionBank, TargetId, Theme};
use services::animation::{AnimationEngine, EngineConfig, ManualObserver, run_until_settled};
use services::quiz::{AdvanceResult, ControlPress, QuizState, load_bank_json, shuffled_bank};
use services::{Clock, Outcome, QuizService, ThemeService};
use storage::repository::Storage;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidThemeAction { raw: String },
    NoStatValues,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidThemeAction { raw } => write!(f, "invalid theme action: {raw}"),
            ArgsError::NoStatValues => write!(f, "stats needs at least one value"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

const USAGE: &str = "\
Usage:
  folio quiz  [--questions <bank.json>] [--shuffle]
  folio theme [show|toggle|dark|light] [--db <sqlite_url>]
  folio stats <value>...        # e.g. 150 1200 80%

Defaults:
  --db sqlite:folio.sqlite3

Environment:
  FOLIO_DB_URL, FOLIO_QUESTIONS, RUST_LOG
";

fn print_usage() {
    eprint!("{USAGE}");
}

/// Text printed when the binary fails; argument errors also get the usage.
fn failure_report(err: &(dyn std::error::Error + 'static)) -> String {
    if err.is::<ArgsError>() {
        format!("{err}\n\n{USAGE}")
    } else {
        err.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ThemeAction {
    Show,
    Toggle,
    Set(Theme),
}

#[derive(Debug)]
enum Command {
    Quiz {
        questions: Option<String>,
        shuffle: bool,
    },
    Theme {
        db_url: String,
        action: ThemeAction,
    },
    Stats {
        values: Vec<String>,
    },
}

impl Command {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let Some(first) = args.next() else {
            return Ok(Some(Self::parse_quiz(&mut args)?));
        };
        match first.as_str() {
            "--help" | "-h" => Ok(None),
            "quiz" => Ok(Some(Self::parse_quiz(&mut args)?)),
            "theme" => Ok(Some(Self::parse_theme(&mut args)?)),
            "stats" => {
                let values: Vec<String> = args.collect();
                if values.is_empty() {
                    return Err(ArgsError::NoStatValues);
                }
                Ok(Some(Self::Stats { values }))
            }
            _ => Err(ArgsError::UnknownArg(first)),
        }
    }

    fn parse_quiz(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut questions = std::env::var("FOLIO_QUESTIONS").ok();
        let mut shuffle = false;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--questions" => questions = Some(require_value(args, "--questions")?),
                "--shuffle" => shuffle = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(Self::Quiz { questions, shuffle })
    }

    fn parse_theme(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("FOLIO_DB_URL")
            .ok()
            .map_or_else(|| normalize_sqlite_url("folio.sqlite3".into()), normalize_sqlite_url);
        let mut action = ThemeAction::Show;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "show" => action = ThemeAction::Show,
                "toggle" => action = ThemeAction::Toggle,
                other if other.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                other => {
                    let theme = other
                        .parse::<Theme>()
                        .map_err(|_| ArgsError::InvalidThemeAction { raw: arg.clone() })?;
                    action = ThemeAction::Set(theme);
                }
            }
        }

        Ok(Self::Theme { db_url, action })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }
    Ok(())
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

fn load_bank(
    questions: Option<&str>,
    shuffle: bool,
) -> Result<QuestionBank, Box<dyn std::error::Error>> {
    let bank = match questions {
        Some(path) => load_bank_json(&std::fs::read_to_string(path)?)?,
        None => QuestionBank::builtin(),
    };
    Ok(if shuffle {
        shuffled_bank(bank, &mut rand::rng())
    } else {
        bank
    })
}

fn render_quiz(quiz: &QuizService, out: &mut impl Write) -> io::Result<()> {
    let view = quiz.view();
    let progress = quiz.progress();
    writeln!(out)?;
    if progress.is_complete() {
        writeln!(out, "{}", view.prompt)?;
    } else {
        writeln!(
            out,
            "[{}/{}] {}",
            progress.position(),
            view.total_text,
            view.prompt
        )?;
    }
    for (index, option) in view.options.iter().enumerate().filter(|(_, o)| o.visible) {
        let marker = match option.marker {
            Some(services::quiz::OptionMarker::Correct) => " (correct)",
            Some(services::quiz::OptionMarker::Wrong) => " (wrong)",
            None => "",
        };
        writeln!(out, "  {}. {}{marker}", index + 1, option.label)?;
    }
    if let Some(feedback) = &view.feedback {
        writeln!(out, "{}", feedback.text)?;
    }
    writeln!(out, "Score: {}", view.score_text)?;
    if let Some(label) = view.control.label() {
        writeln!(out, "[enter] {label}  [q] quit")?;
    } else {
        writeln!(out, "Pick 1-{}  [q] quit", view.options.len())?;
    }
    out.flush()
}

fn run_quiz(bank: QuestionBank) -> Result<(), Box<dyn std::error::Error>> {
    let mut quiz = QuizService::new(Arc::new(bank), Clock::default());
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    render_quiz(&quiz, &mut stdout)?;
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") {
            break;
        }

        match quiz.state() {
            QuizState::Unanswered => {
                let selected = input.parse::<usize>().ok().and_then(|n| n.checked_sub(1));
                if let Some(selected) = selected {
                    if let Outcome::Ignored(reason) = quiz.submit_answer(selected) {
                        writeln!(stdout, "ignored: {reason:?}")?;
                    }
                }
            }
            QuizState::Answered | QuizState::Completed => match quiz.press_control() {
                Outcome::Applied(ControlPress::Advanced(AdvanceResult::Completed(summary))) => {
                    tracing::info!(score = summary.score(), total = summary.total(), "quiz finished");
                }
                Outcome::Applied(_) => {}
                Outcome::Ignored(reason) => writeln!(stdout, "ignored: {reason:?}")?,
            },
        }
        render_quiz(&quiz, &mut stdout)?;
    }
    Ok(())
}

//
// ─── THEME ─────────────────────────────────────────────────────────────────────
//

async fn run_theme(db_url: &str, action: ThemeAction) -> Result<(), Box<dyn std::error::Error>> {
    // Open + migrate SQLite here so core/services stay pure.
    prepare_sqlite_file(db_url)?;
    let storage = Storage::sqlite(db_url).await?;
    let themes = ThemeService::new(Clock::default(), Arc::clone(&storage.preferences));

    let current = themes.load().await?;
    let theme = match action {
        ThemeAction::Show => current,
        ThemeAction::Toggle => themes.toggle(current).await?,
        ThemeAction::Set(theme) => themes.save(theme).await?,
    };
    println!("{theme}");
    Ok(())
}

//
// ─── STATS ─────────────────────────────────────────────────────────────────────
//

async fn run_stats(values: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let mut skills = AnimationEngine::new(EngineConfig::skill_bars(), ManualObserver::new());
    let mut counters = AnimationEngine::new(EngineConfig::stat_counters(), ManualObserver::new());

    let mut skill_ids = Vec::new();
    let mut counter_ids = Vec::new();
    for (n, raw) in (1_u64..).zip(values) {
        let id = TargetId::new(n);
        if raw.trim_end().ends_with('%') {
            skills.register_target(id, Some(raw.as_str()))?;
            skill_ids.push(id);
        } else {
            counters.register_target(id, Some(raw.as_str()))?;
            counter_ids.push(id);
        }
    }

    // Everything is "on screen" in a terminal.
    for (engine, ids) in [(&mut skills, &skill_ids), (&mut counters, &counter_ids)] {
        let events: Vec<_> = ids
            .iter()
            .filter_map(|id| engine.observer().fire(*id, 1.0))
            .collect();
        for frame in engine.handle_visibility(&events) {
            if let Some(width) = frame.width_percent {
                println!("#{} bar width {width}%", frame.target);
            }
        }
    }

    let print_final = |frame: services::Frame| {
        if frame.finished {
            if let Some(text) = frame.text {
                println!("#{} {text}", frame.target);
            }
        }
    };
    tokio::join!(
        run_until_settled(&mut skills, print_final),
        run_until_settled(&mut counters, print_final),
    );

    tracing::debug!(targets = values.len(), "stats settled");
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let Some(command) = Command::parse(std::env::args().skip(1))? else {
        print_usage();
        return Ok(());
    };

    match command {
        Command::Quiz { questions, shuffle } => run_quiz(load_bank(questions.as_deref(), shuffle)?),
        Command::Theme { db_url, action } => run_theme(&db_url, action).await,
        Command::Stats { values } => run_stats(&values).await,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run().await {
        eprintln!("{}", failure_report(err.as_ref()));
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> impl Iterator<Item = String> {
        raw.iter().map(ToString::to_string).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn argument_error_is_reported_once_with_usage() {
        let err = Command::parse(args(&["quiz", "--bogus"])).unwrap_err();
        let report = failure_report(&err);
        assert_eq!(report.matches("unknown argument: --bogus").count(), 1);
        assert!(report.ends_with(USAGE));
    }

    #[test]
    fn other_errors_skip_usage() {
        let err = QuestionBank::from_drafts(Vec::new()).unwrap_err();
        assert_eq!(failure_report(&err), err.to_string());
    }

    #[test]
    fn stats_needs_values() {
        assert!(matches!(
            Command::parse(args(&["stats"])),
            Err(ArgsError::NoStatValues)
        ));
    }
}
