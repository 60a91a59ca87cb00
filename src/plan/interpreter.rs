// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Directive interpretation.
//!
//! ```text
//!              Accumulator { destinations, priority, actions }
//! directives --try_fold(step)-->  |
//!   load     priority = last token, truncated
//!   to       destinations = operands
//!   import   push(Text,  Append)      top    push(Text|Xml|Sjson, Top)
//!   xml      push(Xml,   Append)      sjson  push(Sjson, Append)
//!   map      push(Sjson, Append)
//!   include  expand other modfile with the same accumulator (guarded)
//! ```

use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use super::include::IncludeGuard;
use super::{MergeAction, MergeFormat, Placement};
use crate::config::types::LayoutConfig;
use crate::error::ModfileError;
use crate::game::Game;
use crate::modfile::{Command, Directive, ModFile};

/// Running state threaded through the directive fold.
#[derive(Debug)]
struct Accumulator {
    destinations: Vec<PathBuf>,
    priority: i64,
    actions: Vec<MergeAction>,
}

impl Accumulator {
    fn push(&mut self, mod_name: &str, source: PathBuf, format: MergeFormat, placement: Placement) {
        if self.destinations.is_empty() {
            warn!(
                mod_name,
                source = %source.display(),
                "no destination for import (use 'to' first), skipping"
            );
            return;
        }
        for destination in &self.destinations {
            self.actions.push(MergeAction {
                mod_name: mod_name.to_string(),
                source: source.clone(),
                destination: destination.clone(),
                format,
                placement,
                priority: self.priority,
                sequence: 0,
            });
        }
    }
}

struct Interpreter<'a> {
    game_root: &'a Path,
    /// Top-level folders owned by the manager, never valid destinations.
    reserved: [&'a str; 2],
    guard: IncludeGuard,
}

/// Interprets one mod's modfile (and its includes) into merge actions, in
/// declaration order.
///
/// Destinations start as `game`'s default script paths and priority at 0.
/// Sources must stay inside the folder of the modfile naming them, and
/// destinations inside the game root but outside `layout`'s mods and backup
/// folders.
///
/// # Errors
///
/// Returns the first [`ModfileError`] hit anywhere in the include tree; the
/// mod's partial actions are discarded.
pub fn interpret(
    modfile: &ModFile,
    game: Game,
    game_root: &Path,
    layout: &LayoutConfig,
) -> Result<Vec<MergeAction>, ModfileError> {
    let acc = Accumulator {
        destinations: game
            .default_script_paths()
            .iter()
            .map(PathBuf::from)
            .collect(),
        priority: 0,
        actions: Vec::new(),
    };
    let mut interpreter = Interpreter {
        game_root,
        reserved: [layout.mods_dir.as_str(), layout.backup_dir.as_str()],
        guard: IncludeGuard::default(),
    };
    interpreter.expand(modfile, acc).map(|acc| acc.actions)
}

impl Interpreter<'_> {
    fn expand(&mut self, modfile: &ModFile, acc: Accumulator) -> Result<Accumulator, ModfileError> {
        self.guard.enter(&modfile.mod_name, &modfile.path)?;
        debug!(
            mod_name = %modfile.mod_name,
            path = %modfile.path.display(),
            depth = self.guard.depth(),
            "reading modfile"
        );

        let acc = modfile
            .directives()?
            .iter()
            .try_fold(acc, |acc, directive| self.step(modfile, acc, directive))?;

        self.guard.leave();
        Ok(acc)
    }

    fn step(
        &mut self,
        modfile: &ModFile,
        mut acc: Accumulator,
        directive: &Directive,
    ) -> Result<Accumulator, ModfileError> {
        let mod_name = modfile.mod_name.as_str();
        let source = |operand: &str| {
            resolve_source(operand)
                .map(|relative| modfile.folder().join(relative))
                .map_err(|message| malformed(modfile, directive, message))
        };

        match &directive.command {
            Command::Load => {
                acc.priority = parse_priority(modfile, directive)?;
                debug!(mod_name, priority = acc.priority, "loading following imports");
            }
            Command::To => {
                acc.destinations = std::iter::once(&directive.operand)
                    .chain(&directive.args)
                    .map(|operand| {
                        resolve_destination(self.game_root, operand)
                            .and_then(|destination| self.check_reserved(operand, destination))
                            .map_err(|message| malformed(modfile, directive, message))
                    })
                    .collect::<Result<_, _>>()?;
                debug!(mod_name, destinations = ?acc.destinations, "changing destination");
            }
            Command::Import => {
                debug!(mod_name, source = %directive.operand, "importing");
                acc.push(mod_name, source(&directive.operand)?, MergeFormat::Text, Placement::Append);
            }
            Command::Top => {
                let (format, operand) = match (Command::parse(&directive.operand), directive.args.first()) {
                    (Command::Import, Some(path)) => (MergeFormat::Text, path),
                    (Command::Xml, Some(path)) => (MergeFormat::Xml, path),
                    (Command::Sjson | Command::Map, Some(path)) => (MergeFormat::Sjson, path),
                    _ => (MergeFormat::Text, &directive.operand),
                };
                debug!(mod_name, source = %operand, %format, "importing at top");
                acc.push(mod_name, source(operand)?, format, Placement::Top);
            }
            Command::Xml => {
                acc.push(mod_name, source(&directive.operand)?, MergeFormat::Xml, Placement::Append);
            }
            Command::Sjson | Command::Map => {
                acc.push(mod_name, source(&directive.operand)?, MergeFormat::Sjson, Placement::Append);
            }
            Command::Include => {
                let included = ModFile::load(mod_name, &source(&directive.operand)?)?;
                return self.expand(&included, acc);
            }
            Command::Unknown(command) => {
                warn!(
                    mod_name,
                    line = directive.line,
                    path = %modfile.path.display(),
                    "command \"{command}\" is not supported, skipping"
                );
            }
        }

        Ok(acc)
    }

    fn check_reserved(&self, operand: &str, destination: PathBuf) -> Result<PathBuf, String> {
        let reserved = destination.components().next().and_then(|first| {
            let first = first.as_os_str().to_string_lossy();
            self.reserved
                .into_iter()
                .find(|dir| first.eq_ignore_ascii_case(dir))
        });
        match reserved {
            Some(dir) => Err(format!(
                "destination '{operand}' is inside the manager's '{dir}' folder"
            )),
            None => Ok(destination),
        }
    }
}

fn malformed(modfile: &ModFile, directive: &Directive, message: String) -> ModfileError {
    ModfileError::MalformedDirective {
        mod_name: modfile.mod_name.clone(),
        file: modfile.path.clone(),
        line: directive.line,
        message,
    }
}

/// Priority is the last token of a `load` line, parsed as a float and
/// truncated toward zero (`Load Priority 2.7` is 2).
fn parse_priority(modfile: &ModFile, directive: &Directive) -> Result<i64, ModfileError> {
    let token = directive.last_token();
    match token.parse::<f64>() {
        #[allow(clippy::cast_possible_truncation)]
        Ok(value) if value.is_finite() => Ok(value.trunc() as i64),
        _ => Err(malformed(
            modfile,
            directive,
            format!("'{token}' is not a numeric priority"),
        )),
    }
}

fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Resolves an import or include operand to a path relative to the folder
/// of the modfile naming it.
fn resolve_source(operand: &str) -> Result<PathBuf, String> {
    let normalized = normalize_separators(operand);
    let mut resolved = PathBuf::new();
    for component in Path::new(&normalized).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(format!("source '{operand}' must stay inside the mod folder"));
            }
        }
    }

    if resolved.as_os_str().is_empty() {
        return Err(format!("source '{operand}' does not name a file"));
    }
    Ok(resolved)
}

/// Resolves a `to` operand to a path relative to the game root.
///
/// Accepts game-relative paths and absolute paths inside `game_root`;
/// backslashes are treated as separators and `.` components dropped.
///
/// # Errors
///
/// Returns a message when the path is empty or leaves the game root.
///
/// ```
/// use sggmm::plan::resolve_destination;
/// use std::path::{Path, PathBuf};
///
/// let root = Path::new("/games/Hades/Content");
/// assert_eq!(
///     resolve_destination(root, "Scripts\\RoomManager.lua").unwrap(),
///     PathBuf::from("Scripts/RoomManager.lua"),
/// );
/// assert!(resolve_destination(root, "../Hades.exe").is_err());
/// ```
pub fn resolve_destination(game_root: &Path, operand: &str) -> Result<PathBuf, String> {
    let normalized = normalize_separators(operand);
    let path = Path::new(&normalized);

    let relative = if path.is_absolute() {
        path.strip_prefix(game_root).map_err(|_| {
            format!(
                "destination '{operand}' is outside the game folder '{}'",
                game_root.display()
            )
        })?
    } else {
        path
    };

    let mut resolved = PathBuf::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(format!(
                    "destination '{operand}' must stay inside the game folder"
                ));
            }
        }
    }

    if resolved.as_os_str().is_empty() {
        return Err(format!("destination '{operand}' does not name a file"));
    }
    Ok(resolved)
}
