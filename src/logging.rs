//! Optional file logger for the terminal binary.
//!
//! The terminal is in raw mode while the game runs, so nothing is logged to
//! stdout/stderr. When `BLOCKFALL_LOG_PATH` is set, records are formatted on
//! the calling thread and appended to that file by a background task.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use log::{LevelFilter, Log, Metadata, Record};
use tokio::sync::mpsc;

use blockfall::engine::EngineConfig;

struct FileLogger {
    level: LevelFilter,
    tx: mpsc::UnboundedSender<String>,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let line = format!(
            "{millis} {:<5} {}: {}\n",
            record.level(),
            record.target(),
            record.args()
        );
        // The writer task is gone only during runtime shutdown.
        let _ = self.tx.send(line);
    }

    fn flush(&self) {}
}

/// Parse a level name, falling back to `info`.
pub fn parse_level(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Install the file logger if the config names a log file.
///
/// Must be called within a tokio runtime context.
pub fn init(config: &EngineConfig) -> Result<()> {
    let Some(path) = config.log_path.clone() else {
        return Ok(());
    };
    let level = parse_level(&config.log_level);
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        use tokio::fs::OpenOptions;
        use tokio::io::AsyncWriteExt;

        let mut file = match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
        {
            Ok(f) => f,
            Err(_) => return,
        };
        while let Some(line) = rx.recv().await {
            if file.write_all(line.as_bytes()).await.is_err() {
                break;
            }
        }
        let _ = file.flush().await;
    });

    log::set_boxed_logger(Box::new(FileLogger { level, tx }))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" TRACE "), LevelFilter::Trace);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }
}
