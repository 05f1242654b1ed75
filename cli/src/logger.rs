use colored::*;
use globalcursor_core::paths;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

pub struct GlobalCursorLogger {
    max_level: Level,
    log_file: Mutex<Option<File>>,
}

impl GlobalCursorLogger {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        let log_file = paths::log_file_path().and_then(|path| {
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)
                .map_err(|e| eprintln!("Warning: Failed to open log file at {:?}: {}", path, e))
                .ok()
        });

        Self {
            max_level: Self::level_for(quiet, verbose),
            log_file: Mutex::new(log_file),
        }
    }

    fn level_for(quiet: bool, verbose: bool) -> Level {
        if quiet {
            Level::Info
        } else if verbose {
            Level::Trace
        } else {
            Level::Debug
        }
    }

    fn level_tag(level: Level) -> &'static str {
        match level {
            Level::Error => "[E]",
            Level::Warn => "[W]",
            Level::Info => "[I]",
            Level::Debug => "[D]",
            Level::Trace => "[T]",
        }
    }

    fn short_target<'a>(record: &Record<'a>) -> &'a str {
        let target = record.target();
        target.rsplit("::").next().unwrap_or(target)
    }

    fn format_log(&self, record: &Record) -> String {
        let tag = Self::level_tag(record.level());
        let message = format!(
            "{} [{}] {}",
            tag,
            Self::short_target(record).dimmed(),
            record.args()
        );

        match record.level() {
            Level::Error => message.red().bold().to_string(),
            Level::Warn => message.yellow().bold().to_string(),
            Level::Info => message.replacen(tag, &tag.green().bold().to_string(), 1),
            Level::Debug => message.replacen(tag, &tag.blue().bold().to_string(), 1),
            Level::Trace => message.replacen(tag, &tag.white().bold().to_string(), 1),
        }
    }

    fn format_log_plain(record: &Record) -> String {
        format!(
            "{} [{}] {}",
            Self::level_tag(record.level()),
            Self::short_target(record),
            record.args()
        )
    }
}

impl Log for GlobalCursorLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        eprintln!("{}", self.format_log(record));

        if let Ok(mut file) = self.log_file.lock() {
            if let Some(file) = file.as_mut() {
                let _ = writeln!(file, "{}", Self::format_log_plain(record));
                let _ = file.flush();
            }
        }
    }

    fn flush(&self) {}
}

pub fn init_logger(quiet: bool, verbose: bool) -> Result<(), log::SetLoggerError> {
    let logger = GlobalCursorLogger::new(quiet, verbose);
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}
