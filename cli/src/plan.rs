//! plan.rs
//! Turns positional arguments into a pack or unpack job.
//!
//! Accepted forms:
//! - `<file>`: unpack when it ends in `.z`, otherwise pack to `<file>.z`
//! - `pack <file>` / `unpack <file>`
//! - `<a> <b>`: direction from whichever side ends in `.z`
//! - `pack <src> <dst>` / `unpack <src> <dst>`

use std::fmt;
use std::path::PathBuf;

pub const SUFFIX: &str = ".z";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Pack,
    Unpack,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Pack => f.write_str("pack"),
            Mode::Unpack => f.write_str("unpack"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub mode: Mode,
    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("no file given")]
    Missing,

    #[error("what do you want me to do with {}?", .0.join(", "))]
    Ambiguous(Vec<String>),

    #[error("too many arguments")]
    TooMany,
}

/// `name` ends in the suffix and has something before it.
fn has_suffix(name: &str) -> bool {
    name.len() > SUFFIX.len() && name.ends_with(SUFFIX)
}

fn strip(name: &str) -> &str {
    &name[..name.len() - SUFFIX.len()]
}

fn with_suffix(name: &str) -> String {
    format!("{name}{SUFFIX}")
}

fn pack(input: &str, output: impl Into<PathBuf>) -> Plan {
    Plan { mode: Mode::Pack, input: input.into(), output: output.into() }
}

fn unpack(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Plan {
    Plan { mode: Mode::Unpack, input: input.into(), output: output.into() }
}

pub fn plan(args: &[String]) -> Result<Plan, UsageError> {
    match args {
        [] => Err(UsageError::Missing),
        [a] if has_suffix(a) => Ok(unpack(a.as_str(), strip(a))),
        [a] => Ok(pack(a, with_suffix(a))),
        [cmd, f] if cmd == "pack" => Ok(pack(f, with_suffix(f))),
        [cmd, f] if cmd == "unpack" => {
            if has_suffix(f) {
                Ok(unpack(f.as_str(), strip(f)))
            } else {
                Ok(unpack(with_suffix(f), f.as_str()))
            }
        }
        [a, b] if has_suffix(a) => Ok(unpack(a.as_str(), b.as_str())),
        [a, b] if has_suffix(b) => Ok(pack(a, b.as_str())),
        [cmd, src, dst] if cmd == "pack" => {
            let dst = if has_suffix(dst) { dst.clone() } else { with_suffix(dst) };
            Ok(pack(src, dst))
        }
        [cmd, src, dst] if cmd == "unpack" => {
            let src = if has_suffix(src) { src.clone() } else { with_suffix(src) };
            Ok(unpack(src, dst.as_str()))
        }
        [_, _] | [_, _, _] => Err(UsageError::Ambiguous(args.to_vec())),
        _ => Err(UsageError::TooMany),
    }
}
