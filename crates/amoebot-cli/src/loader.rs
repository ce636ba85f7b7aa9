//! Model and ASCII grid files.
//!
//! A model file is line oriented. `#` starts a comment, blank lines are
//! ignored:
//!
//! ```text
//! pins 2                     # pins per edge
//! 0,0,0                      # id,q,r          contracted amoebot
//! 1,1,0,2,0                  # id,q,r,q2,r2    expanded amoebot (head, tail)
//! bond 0 1                   # explicit neighbor claim
//! link 1 W.0 E.0 | W.1 E.1   # partition sets
//! link 2 *                   # all pins joined
//! beep 0 E.0                 # beep source
//! value 0 E.0 7              # numeric source
//! ```
//!
//! Only syntax is checked here. Geometry and pin addressing are validated
//! when the structure is built.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;

use amoebot_circuits::{AmoebotId, AmoebotSpec, PartitionLayout, PinRef, StructureSpec};
use amoebot_topology::Cell;
use tracing::{debug, warn};

use crate::error::LoadError;

/// A parsed model: the structure plus the signals to inject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    pub spec: StructureSpec,
    pub beeps: Vec<(AmoebotId, PinRef)>,
    pub values: Vec<(AmoebotId, PinRef, i64)>,
}

/// Read and parse a model file.
pub fn load_model(path: impl AsRef<Path>, default_pins: u8) -> Result<Model, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let model = parse_model(&text, default_pins)?;
    debug!(path = %path.display(), amoebots = model.spec.amoebots.len(), "model loaded");
    Ok(model)
}

fn number<T: FromStr>(token: &str, line: usize, what: &str) -> Result<T, LoadError> {
    token
        .trim()
        .parse()
        .map_err(|_| LoadError::syntax(line, format!("invalid {what} {token:?}")))
}

fn pin(token: &str, line: usize) -> Result<PinRef, LoadError> {
    token.parse().map_err(|e| LoadError::syntax(line, format!("{e}")))
}

fn amoebot_line(body: &str, line: usize) -> Result<AmoebotSpec, LoadError> {
    let fields: Vec<&str> = body.split(',').collect();
    let id = || number::<u32>(fields[0], line, "amoebot id");
    let coord = |i: usize| number::<i64>(fields[i], line, "coordinate");
    match fields.len() {
        3 => Ok(AmoebotSpec::contracted(id()?, Cell::new(coord(1)?, coord(2)?))),
        5 => Ok(AmoebotSpec::expanded(
            id()?,
            Cell::new(coord(1)?, coord(2)?),
            Cell::new(coord(3)?, coord(4)?),
        )),
        n => Err(LoadError::syntax(
            line,
            format!("expected id,q,r or id,q,r,q2,r2, found {n} fields"),
        )),
    }
}

fn layout(tokens: &[&str], line: usize) -> Result<PartitionLayout, LoadError> {
    if tokens == ["*"] {
        return Ok(PartitionLayout::Joined);
    }
    // `E.0|W.0` without spaces is accepted too
    let mut sets: Vec<Vec<&str>> = vec![Vec::new()];
    for &token in tokens {
        for (i, part) in token.split('|').enumerate() {
            if i > 0 {
                sets.push(Vec::new());
            }
            if let Some(set) = sets.last_mut().filter(|_| !part.is_empty()) {
                set.push(part);
            }
        }
    }
    let sets = sets
        .into_iter()
        .filter(|set| !set.is_empty())
        .map(|set| set.into_iter().map(|t| pin(t, line)).collect::<Result<Vec<_>, _>>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PartitionLayout::Sets(sets))
}

/// Parse model text. `default_pins` applies unless a `pins` line overrides it.
pub fn parse_model(text: &str, default_pins: u8) -> Result<Model, LoadError> {
    let mut spec = StructureSpec {
        pins_per_edge: default_pins,
        ..StructureSpec::default()
    };
    let mut layouts: BTreeMap<AmoebotId, (usize, PartitionLayout)> = BTreeMap::new();
    let mut beeps = Vec::new();
    let mut values: Vec<(AmoebotId, PinRef, i64)> = Vec::new();
    let mut pins_declared = false;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let body = raw.split('#').next().unwrap_or_default().trim();
        if body.is_empty() {
            continue;
        }
        let tokens: Vec<&str> = body.split_whitespace().collect();
        match tokens.as_slice() {
            ["pins", count] => {
                if pins_declared {
                    warn!(line, "pins declared more than once; last one wins");
                }
                spec.pins_per_edge = number(count, line, "pin count")?;
                pins_declared = true;
            }
            ["bond", a, b] => {
                spec.bonds.push((
                    AmoebotId(number(a, line, "amoebot id")?),
                    AmoebotId(number(b, line, "amoebot id")?),
                ));
            }
            ["link", id, rest @ ..] if !rest.is_empty() => {
                let id = AmoebotId(number(id, line, "amoebot id")?);
                let layout = layout(rest, line)?;
                if layouts.insert(id, (line, layout)).is_some() {
                    warn!(line, amoebot = %id, "amoebot linked more than once; last one wins");
                }
            }
            ["beep", id, p] => {
                beeps.push((AmoebotId(number(id, line, "amoebot id")?), pin(p, line)?));
            }
            ["value", id, p, v] => {
                values.push((
                    AmoebotId(number(id, line, "amoebot id")?),
                    pin(p, line)?,
                    number(v, line, "value")?,
                ));
            }
            [keyword, ..] if keyword.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) => {
                return Err(LoadError::syntax(line, format!("unknown or malformed directive {keyword:?}")));
            }
            _ => spec.amoebots.push(amoebot_line(&tokens.concat(), line)?),
        }
    }

    for (id, (line, layout)) in layouts {
        let member = spec
            .amoebots
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| LoadError::syntax(line, format!("link for undeclared amoebot {id}")))?;
        member.layout = layout;
    }

    Ok(Model { spec, beeps, values })
}

/// Convert an ASCII grid into model text.
///
/// Every `1` becomes a contracted amoebot, numbered row by row, with
/// `q = column` and `r = row - floor(column / 2)`.
pub fn ascii_to_model(grid: &str) -> Result<String, LoadError> {
    let rows: Vec<&str> = grid.lines().collect();
    let width = rows
        .first()
        .map(|r| r.chars().count())
        .ok_or_else(|| LoadError::syntax(1, "grid is empty"))?;

    let mut out = String::from("# Amoebot model generated from an ASCII grid\n# id,q,r\n");
    let mut next_id = 0u32;
    for (row, text) in rows.iter().enumerate() {
        if text.chars().count() < width {
            warn!(row, width, "grid row shorter than the first");
        }
        for (col, c) in text.chars().enumerate().take(width) {
            if c != '1' {
                continue;
            }
            let q = col as i64;
            let r = row as i64 - q.div_euclid(2);
            // Writing to a String cannot fail
            let _ = writeln!(out, "{next_id},{q},{r}");
            next_id += 1;
        }
    }
    debug!(amoebots = next_id, rows = rows.len(), "grid converted");
    Ok(out)
}

/// Read a grid file and convert it.
pub fn load_ascii(path: impl AsRef<Path>) -> Result<String, LoadError> {
    ascii_to_model(&std::fs::read_to_string(path)?)
}
