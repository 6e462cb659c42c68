//! Tabular, human readable output for records, repository information and
//! sensor lists.

/// Where [`Logger`] writes its lines.
#[derive(Debug, Clone)]
pub enum LogOutput {
    Log(log::Level),
    LogTarget(log::Level, String),
    StdOut,
    StdErr,
    #[cfg(feature = "log-to-file")]
    File(std::sync::Arc<parking_lot::Mutex<std::fs::File>>),
}

impl From<log::Level> for LogOutput {
    fn from(value: log::Level) -> Self {
        Self::Log(value)
    }
}

impl LogOutput {
    /// Write `line`. Failures to write to a file are ignored.
    fn write_line(&self, line: &str) {
        match self {
            Self::Log(level) => log::log!(*level, "{line}"),
            Self::LogTarget(level, target) => log::log!(target: target, *level, "{line}"),
            Self::StdOut => println!("{line}"),
            Self::StdErr => eprintln!("{line}"),
            #[cfg(feature = "log-to-file")]
            Self::File(file) => {
                use std::io::Write;

                writeln!(file.lock(), "{line}").ok();
            }
        }
    }
}

/// A single line of output: a title at an indentation level, optionally
/// followed by a value.
#[derive(Debug, Clone, PartialEq)]
pub struct LogItem {
    level: usize,
    title: String,
    value: Option<String>,
}

impl LogItem {
    pub fn new<T: Into<String>, V: Into<String>>(level: usize, title: T, value: Option<V>) -> Self {
        Self {
            level,
            title: title.into(),
            value: value.map(Into::into),
        }
    }
}

impl<T: ToString, V: ToString> From<(usize, T, V)> for LogItem {
    fn from((level, title, value): (usize, T, V)) -> Self {
        Self::new(level, title.to_string(), Some(value.to_string()))
    }
}

impl<T: ToString> From<(usize, T)> for LogItem {
    fn from((level, value): (usize, T)) -> Self {
        Self::new::<_, String>(level, value.to_string(), None)
    }
}

/// Renders [`Loggable`] values line by line to a [`LogOutput`].
pub struct Logger;

impl Logger {
    pub fn log<T>(output: &LogOutput, loggable: &T)
    where
        T: Loggable + ?Sized,
    {
        for line in Self::render(&loggable.as_log()) {
            output.write_line(&line);
        }
    }

    /// Render `items` into lines. The first item is a heading. Values of the
    /// remaining items are aligned per indentation level.
    fn render(items: &[LogItem]) -> Vec<String> {
        let mut lines = Vec::with_capacity(items.len());

        let (heading, rest) = match items.split_first() {
            Some(split) => split,
            None => return lines,
        };

        lines.push(heading.title.clone());

        let title_width = |level: usize| {
            rest.iter()
                .filter(|i| i.level == level && i.value.is_some())
                .map(|i| i.title.len())
                .max()
                .unwrap_or(0)
        };

        for LogItem {
            level,
            title,
            value,
        } in rest
        {
            let indent = " ".repeat(level * 2);

            let line = match value {
                Some(value) => {
                    let padding = " ".repeat(title_width(*level).saturating_sub(title.len()));
                    format!("{indent}{title}: {padding}{value}")
                }
                None => format!("{indent}{title}"),
            };

            lines.push(line);
        }

        lines
    }
}

/// A value that can describe itself as a list of [`LogItem`]s.
pub trait Loggable {
    fn as_log(&self) -> Vec<LogItem>;
}

/// Build a `Vec<LogItem>` from `(level, title)` and `(level, title, value)`
/// tuples.
#[macro_export]
macro_rules! log_vec {
    [$(($level:literal, $($part:expr),+)),* $(,)?] => {
        vec![$($crate::LogItem::from(($level, $($part),+))),*]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fan;

    impl Loggable for Fan {
        fn as_log(&self) -> Vec<LogItem> {
            log_vec![
                (0, "Sensor \"FAN1\""),
                (1, "Value", "6000.00 RPM"),
                (1, "Status", "ok"),
                (1, "Thresholds"),
                (2, "Lower Critical", 300)
            ]
        }
    }

    #[test]
    fn renders_aligned_lines() {
        assert_eq!(
            vec![
                "Sensor \"FAN1\"",
                "  Value:  6000.00 RPM",
                "  Status: ok",
                "  Thresholds",
                "    Lower Critical: 300",
            ],
            Logger::render(&Fan.as_log())
        );
    }

    #[test]
    fn empty_log() {
        assert!(Logger::render(&[]).is_empty());
    }
}
