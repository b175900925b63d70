//! Classifier for single lines of the `_settings[]` table.
//!
//! A line looks like a macro call terminated by a comma:
//!
//! ```text
//! SDT_NULL(4, SL_MIN_VERSION, SLV_143),
//! SDT_VAR(GameSettings, difficulty.max_loan, SLE_UINT32, …, SLV_97, SL_MAX_VERSION, …),
//! ```
//!
//! The leading keyword picks the `Kind`; the arguments are split on
//! top-level commas (nested parentheses and string literals are kept
//! intact) and the fields each kind needs are picked by position.

use regex::Regex;

use crate::error::{GenError, GenResult};
use crate::model::{Descriptor, Kind};

pub struct Classifier {
    keyword: Regex,
    call: Regex,
    token: Regex,
}

impl Classifier {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            keyword: Regex::new(r"^\s*(\w+)")?,
            call: Regex::new(r"^\s*\w+\s*\((.*)\)\s*,?\s*$")?,
            token: Regex::new(r"^\w+$")?,
        })
    }

    pub fn classify(&self, line: &str) -> GenResult<Descriptor> {
        let keyword = self
            .keyword
            .captures(line)
            .and_then(|c| c.get(1))
            .map_or("", |m| m.as_str());

        let Some(kind) = Kind::from_keyword(keyword) else {
            return Err(GenError::UnknownDescriptorKind {
                keyword: keyword.to_string(),
                line: line.trim().to_string(),
            });
        };

        let malformed = || GenError::MalformedDescriptorLine {
            keyword: keyword.to_string(),
            line: line.trim().to_string(),
        };

        let body = self
            .call
            .captures(line)
            .and_then(|c| c.get(1))
            .ok_or_else(malformed)?
            .as_str();
        let args = split_args(body).ok_or_else(malformed)?;
        let n = args.len();

        // Every picked field must be a single identifier or number.
        let pick = |idx: usize| -> GenResult<String> {
            let arg = &args[idx];
            if self.token.is_match(arg) {
                Ok(arg.clone())
            } else {
                Err(malformed())
            }
        };

        let desc = match kind {
            Kind::Null => {
                if n != 3 {
                    return Err(malformed());
                }
                let width = pick(0)?.parse::<u32>().map_err(|_| malformed())?;
                Descriptor::Null {
                    width,
                    from: pick(1)?,
                    to: pick(2)?,
                }
            }
            Kind::Var => {
                if n < 6 {
                    return Err(malformed());
                }
                Descriptor::Var {
                    ty: pick(2)?,
                    from: pick(n - 3)?,
                    to: pick(n - 2)?,
                }
            }
            Kind::Bool => {
                if n < 3 {
                    return Err(malformed());
                }
                Descriptor::Bool {
                    from: pick(n - 3)?,
                    to: pick(n - 2)?,
                }
            }
            Kind::GlobalVar => {
                if n < 6 {
                    return Err(malformed());
                }
                Descriptor::GlobalVar {
                    ty: pick(1)?,
                    from: pick(n - 3)?,
                    to: pick(n - 2)?,
                }
            }
            Kind::OneOfMany => {
                if n < 8 {
                    return Err(malformed());
                }
                Descriptor::OneOfMany {
                    ty: pick(2)?,
                    from: pick(n - 4)?,
                    to: pick(n - 3)?,
                }
            }
        };

        Ok(desc)
    }
}

/// Split a macro argument list on top-level commas, trimming each argument.
///
/// Returns `None` for unbalanced parentheses or an unterminated string.
fn split_args(body: &str) -> Option<Vec<String>> {
    let mut args = Vec::new();
    let mut cur = String::new();
    let mut depth = 0usize;
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' => {
                cur.push(c);
                let mut closed = false;
                while let Some(s) = chars.next() {
                    cur.push(s);
                    if s == '\\' {
                        cur.push(chars.next()?);
                    } else if s == c {
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return None;
                }
            }
            '(' => {
                depth += 1;
                cur.push(c);
            }
            ')' => {
                depth = depth.checked_sub(1)?;
                cur.push(c);
            }
            ',' if depth == 0 => {
                args.push(cur.trim().to_string());
                cur.clear();
            }
            _ => cur.push(c),
        }
    }

    if depth != 0 {
        return None;
    }
    args.push(cur.trim().to_string());
    Some(args)
}
