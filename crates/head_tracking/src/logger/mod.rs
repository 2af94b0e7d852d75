//! Глобальный logger для head tracking
//!
//! Хост (игровой движок, тест, headless demo) подключает свой `LogPrinter`,
//! по умолчанию — `ConsoleLogger` (stdout).

use once_cell::sync::Lazy;
use std::sync::{Mutex, MutexGuard};

// Потокобезопасный глобальный logger (Arc не нужен для static)
static LOGGER: Lazy<Mutex<Option<Box<dyn LogPrinter>>>> = Lazy::new(|| Mutex::new(None));

pub static LOGGER_LEVEL: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Debug));

/// Poisoned mutex не должен ронять per-frame систему — забираем guard как есть
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn set_logger(logger: Box<dyn LogPrinter>) {
    *lock(&LOGGER) = Some(logger);
}

pub fn set_log_level(level: LogLevel) {
    *lock(&LOGGER_LEVEL) = level;
}

pub fn set_logger_if_needed(logger: Box<dyn LogPrinter>) {
    let mut slot = lock(&LOGGER);
    if slot.is_none() {
        *slot = Some(logger);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

pub trait LogPrinter: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

pub fn log(message: &str) {
    log_with_level(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(LogLevel::Error, message);
}

pub fn log_with_level(level: LogLevel, message: &str) {
    if level < *lock(&LOGGER_LEVEL) {
        return;
    }

    // Timestamp добавляем здесь, а не в конкретном LogPrinter
    if let Some(logger) = lock(&LOGGER).as_ref() {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        logger.log(level, &format!("[{}] {}", timestamp, message));
    }
}

pub struct ConsoleLogger;

impl LogPrinter for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        println!("[{}] {}", level.as_str(), message);
    }
}

pub fn init_logger() {
    set_logger_if_needed(Box::new(ConsoleLogger));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct CapturingLogger {
        lines: Arc<Mutex<Vec<(LogLevel, String)>>>,
    }

    impl LogPrinter for CapturingLogger {
        fn log(&self, level: LogLevel, message: &str) {
            lock(&self.lines).push((level, message.to_string()));
        }
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
        assert_eq!(LogLevel::Warning.as_str(), "WARNING");
    }

    /// Один тест на всё глобальное состояние (иначе тесты гоняются параллельно за LOGGER)
    #[test]
    fn test_global_logger_filters_and_timestamps() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        set_logger(Box::new(CapturingLogger { lines: lines.clone() }));
        set_log_level(LogLevel::Info);

        log("hidden debug line");
        log_info("follower attached");
        log_error("something broke");

        // Другие тесты в этом бинаре тоже могут писать в logger — ищем свои строки
        let contains = |needle: &str| {
            lock(&lines)
                .iter()
                .any(|(_, line)| line.ends_with(needle))
        };

        assert!(!contains("hidden debug line"));
        assert!(contains("follower attached"));
        assert!(contains("something broke"));
        assert!(lock(&lines)
            .iter()
            .filter(|(_, line)| line.ends_with("follower attached"))
            .all(|(level, line)| *level == LogLevel::Info && line.starts_with('[')));

        // set_logger_if_needed не перезаписывает уже установленный logger
        set_logger_if_needed(Box::new(ConsoleLogger));
        log_warning("still captured");
        assert!(contains("still captured"));

        set_log_level(LogLevel::Debug);
    }
}
