use std::collections::{HashMap, HashSet};

pub mod advice;
pub mod config;
pub mod context;
pub mod report;
pub mod summary;
pub mod system;
pub mod transaction;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let groups = [
        context::definitions(),
        transaction::definitions(),
        summary::definitions(),
        report::definitions(),
        advice::definitions(),
        config::definitions(),
        system::definitions(),
    ];
    for entry in groups.into_iter().flatten() {
        registry.register(entry);
    }
}

/// Positional arguments plus `--name value` options and bare `--switch`es.
#[derive(Debug, Default)]
pub(crate) struct Options<'a> {
    pub positional: Vec<&'a str>,
    values: HashMap<&'static str, &'a str>,
    switches: HashSet<&'static str>,
}

impl<'a> Options<'a> {
    pub fn value(&self, name: &str) -> Option<&'a str> {
        self.values.get(name).copied()
    }

    pub fn has(&self, name: &str) -> bool {
        self.switches.contains(name)
    }
}

pub(crate) fn parse_options<'a>(
    args: &[&'a str],
    valued: &[&'static str],
    switches: &[&'static str],
) -> Result<Options<'a>, CommandError> {
    let mut options = Options::default();
    let mut iter = args.iter().copied();
    while let Some(arg) = iter.next() {
        if !arg.starts_with("--") {
            options.positional.push(arg);
            continue;
        }
        let flag = arg.to_ascii_lowercase();
        if let Some(name) = valued.iter().find(|name| **name == flag) {
            let value = iter.next().ok_or_else(|| {
                CommandError::InvalidArguments(format!("missing value for `{}`", name))
            })?;
            options.values.insert(name, value);
        } else if let Some(name) = switches.iter().find(|name| **name == flag) {
            options.switches.insert(name);
        } else {
            return Err(CommandError::InvalidArguments(format!(
                "unknown option `{}`",
                arg
            )));
        }
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_positional_values_and_switches() {
        let options = parse_options(
            &["expense", "300", "--DATE", "2024-06-01", "Groceries", "--yes"],
            &["--date"],
            &["--yes"],
        )
        .unwrap();
        assert_eq!(options.positional, ["expense", "300", "Groceries"]);
        assert_eq!(options.value("--date"), Some("2024-06-01"));
        assert!(options.has("--yes"));
    }

    #[test]
    fn rejects_unknown_or_incomplete_options() {
        assert!(parse_options(&["--force"], &[], &["--yes"]).is_err());
        assert!(parse_options(&["--note"], &["--note"], &[]).is_err());
    }
}
