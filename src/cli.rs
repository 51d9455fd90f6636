//! Command-line interface for inspecting and editing shortcut overrides
//!
//! Supports:
//! - Listing the resolved table grouped by category
//! - Reporting conflicts
//! - Setting and resetting overrides
//! - Checking how a binding parses and displays

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::error::ShortcutError;
use crate::shortcuts::{
    categories, definition, parse, ActionId, KeyBinding, PlatformInfo, ShortcutSession,
};

/// Manage keyboard shortcut bindings
#[derive(Parser, Debug)]
#[command(name = "shortcut-kit", version, about = "Manage keyboard shortcut bindings")]
pub struct CliArgs {
    /// Platform description override (e.g. "MacIntel", "linux")
    #[arg(long, global = true, value_name = "DESCRIPTION")]
    pub platform: Option<String>,

    /// Path to config.json
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show every action with its effective binding
    List,
    /// Show bindings claimed by more than one action
    Conflicts,
    /// Override the binding for an action
    Set {
        /// Action id, e.g. `newTab`
        action: String,
        /// Binding, e.g. `meta+shift+n`
        binding: String,
    },
    /// Restore the default binding for an action
    Reset {
        /// Action id, e.g. `newTab`
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        action: Option<String>,
        /// Restore every default
        #[arg(long)]
        all: bool,
    },
    /// Parse a binding and show how it displays
    Check { binding: String },
}

/// Run one command against `session`, writing human-readable output to `out`.
pub fn run(
    command: &Command,
    session: &mut ShortcutSession,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::List => list(session, out)?,
        Command::Conflicts => conflicts(session, out)?,
        Command::Set { action, binding } => {
            let id: ActionId = action.parse().map_err(ShortcutError::from)?;
            let binding = parse_arg(binding)?;
            set(session, id, &binding, out)?;
        }
        Command::Reset { action: _, all: true } => {
            if session.reset_all() {
                info!("All shortcut overrides cleared");
                writeln!(out, "Restored all default shortcuts")?;
            } else {
                writeln!(out, "No shortcuts were customized")?;
            }
        }
        Command::Reset { action, all: false } => {
            let Some(action) = action else {
                anyhow::bail!("reset needs an action id or --all");
            };
            let id: ActionId = action.parse().map_err(ShortcutError::from)?;
            if session.reset(id) {
                writeln!(out, "{} restored to {}", id, session.binding(id))?;
            } else {
                writeln!(out, "{} already uses its default {}", id, session.binding(id))?;
            }
        }
        Command::Check { binding } => check(session, &parse_arg(binding)?, out)?,
    }
    Ok(())
}

fn parse_arg(input: &str) -> Result<KeyBinding, ShortcutError> {
    parse(input).map_err(|e| ShortcutError::invalid_binding(input, e))
}

fn list(session: &ShortcutSession, out: &mut impl Write) -> std::io::Result<()> {
    let resolved = session.resolved();
    for (category, ids) in categories() {
        writeln!(out, "{}", category.label())?;
        for id in ids {
            let binding = resolved.get(id);
            let marker = if session.is_customized(id) { " *" } else { "" };
            writeln!(
                out,
                "  {:<20} {:<14} {}{}",
                definition(id).label,
                binding.display_for(session.platform()),
                binding,
                marker
            )?;
        }
    }
    Ok(())
}

fn conflicts(session: &ShortcutSession, out: &mut impl Write) -> std::io::Result<()> {
    let table = session.conflicts();
    if table.is_empty() {
        return writeln!(out, "No conflicts");
    }
    for (binding, ids) in table.iter() {
        writeln!(out, "{}: {}", binding, join_ids(ids))?;
    }
    Ok(())
}

fn set(
    session: &mut ShortcutSession,
    id: ActionId,
    binding: &KeyBinding,
    out: &mut impl Write,
) -> std::io::Result<()> {
    let clashes = session.would_conflict(id, binding);
    if !session.set_override(id, binding) {
        return writeln!(out, "{} is already bound to {}", id, binding);
    }
    writeln!(out, "{} set to {}", id, binding)?;
    if !clashes.is_empty() {
        writeln!(out, "warning: {} is also bound to {}", binding, join_ids(&clashes))?;
    }
    Ok(())
}

fn check(
    session: &ShortcutSession,
    binding: &KeyBinding,
    out: &mut impl Write,
) -> std::io::Result<()> {
    writeln!(out, "canonical: {}", binding)?;
    writeln!(out, "mac:       {}", binding.display_for(&PlatformInfo::mac()))?;
    writeln!(out, "other:     {}", binding.display_for(&PlatformInfo::other()))?;

    let bound: Vec<ActionId> = session
        .resolved()
        .iter()
        .filter(|(_, b)| *b == binding)
        .map(|(id, _)| id)
        .collect();
    if bound.is_empty() {
        writeln!(out, "bound to:  (nothing)")
    } else {
        writeln!(out, "bound to:  {}", join_ids(&bound))
    }
}

fn join_ids(ids: &[ActionId]) -> String {
    ids.iter()
        .map(ActionId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn session() -> ShortcutSession {
        ShortcutSession::in_memory(Arc::new(PlatformInfo::mac()))
    }

    fn run_to_string(command: Command, session: &mut ShortcutSession) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run(&command, session, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let args = CliArgs::try_parse_from([
            "shortcut-kit",
            "set",
            "newTab",
            "meta+alt+n",
            "--platform",
            "linux",
        ])
        .unwrap();
        assert_eq!(args.platform.as_deref(), Some("linux"));
        assert_eq!(
            args.command,
            Command::Set {
                action: "newTab".to_string(),
                binding: "meta+alt+n".to_string(),
            }
        );
    }

    #[test]
    fn reset_requires_action_or_all() {
        assert!(CliArgs::try_parse_from(["shortcut-kit", "reset"]).is_err());
        assert!(CliArgs::try_parse_from(["shortcut-kit", "reset", "newTab", "--all"]).is_err());
        assert!(CliArgs::try_parse_from(["shortcut-kit", "reset", "--all"]).is_ok());
    }

    #[test]
    fn list_marks_customized_actions() {
        let mut session = session();
        session.set_override_str(ActionId::NewTab, "meta+alt+n").unwrap();
        let output = run_to_string(Command::List, &mut session).unwrap();

        assert!(output.starts_with("Tabs\n"));
        let new_tab = output
            .lines()
            .find(|line| line.contains("meta+alt+n"))
            .unwrap();
        assert!(new_tab.contains("⌘⌥N"));
        assert!(new_tab.ends_with(" *"));
        let close_tab = output.lines().find(|line| line.contains("meta+w")).unwrap();
        assert!(!close_tab.ends_with(" *"));
    }

    #[test]
    fn set_reports_conflicts() {
        let mut session = session();
        let output = run_to_string(
            Command::Set {
                action: "newTab".to_string(),
                binding: "meta+w".to_string(),
            },
            &mut session,
        )
        .unwrap();
        assert!(output.contains("newTab set to meta+w"));
        assert!(output.contains("also bound to closeTab"));

        let conflicts = run_to_string(Command::Conflicts, &mut session).unwrap();
        assert_eq!(conflicts, "meta+w: newTab, closeTab\n");
    }

    #[test]
    fn set_rejects_unknown_action_and_bad_binding() {
        let mut session = session();
        let err = run_to_string(
            Command::Set {
                action: "bogus".to_string(),
                binding: "meta+k".to_string(),
            },
            &mut session,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown action id 'bogus'"));

        let err = run_to_string(
            Command::Set {
                action: "newTab".to_string(),
                binding: "k".to_string(),
            },
            &mut session,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid binding 'k'"));
        assert!(session.overrides().is_empty());
    }

    #[test]
    fn reset_all_restores_defaults() {
        let mut session = session();
        session.set_override_str(ActionId::FocusSearch, "meta+alt+f").unwrap();
        let output = run_to_string(
            Command::Reset {
                action: None,
                all: true,
            },
            &mut session,
        )
        .unwrap();
        assert_eq!(output, "Restored all default shortcuts\n");
        assert!(session.overrides().is_empty());
    }

    #[test]
    fn reset_single_action() {
        let mut session = session();
        session.set_override_str(ActionId::FocusSearch, "meta+alt+f").unwrap();
        let output = run_to_string(
            Command::Reset {
                action: Some("focusSearch".to_string()),
                all: false,
            },
            &mut session,
        )
        .unwrap();
        assert_eq!(output, "focusSearch restored to meta+f\n");
    }

    #[test]
    fn check_shows_both_displays_and_owner() {
        let mut session = session();
        let output = run_to_string(
            Command::Check {
                binding: "Shift+Meta+K".to_string(),
            },
            &mut session,
        )
        .unwrap();
        assert!(output.contains("canonical: meta+shift+k"));
        assert!(output.contains("mac:       ⌘⇧K"));
        assert!(output.contains("other:     Ctrl+Shift+K"));
        assert!(output.contains("bound to:  toggleKanban"));
    }
}
