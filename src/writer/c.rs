//! Emit the C skip directives for a folded `SkipTable`.

use std::fmt;
use std::io::{self, Write};

use crate::model::VersionRange;
use crate::processor::SkipTable;

/// Names used in the generated C statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Function that reads and discards `n` bytes, `fn(handle, n)`.
    pub skip_fn: String,
    pub handle: String,
    pub version_var: String,
    /// Comment written before the first directive.
    pub banner: Option<String>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            skip_fn: "ottd_skip".to_string(),
            handle: "fp".to_string(),
            version_var: "version".to_string(),
            banner: Some(format!("// skip generated with {}", env!("CARGO_PKG_NAME"))),
        }
    }
}

/// Version test guarding a conditional skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    AtMost(u32),
    AtLeast(u32),
    Between(u32, u32),
}

impl Guard {
    /// Pick the guard for `range` given the global bounds.
    /// Returns `None` for the global range itself, which is never guarded.
    pub fn for_range(range: VersionRange, global: VersionRange) -> Option<Guard> {
        if range == global {
            None
        } else if range.from == global.from {
            Some(Guard::AtMost(range.to))
        } else if range.to == global.to {
            Some(Guard::AtLeast(range.from))
        } else {
            Some(Guard::Between(range.from, range.to))
        }
    }

    fn display<'a>(&'a self, var: &'a str) -> impl fmt::Display + 'a {
        GuardDisplay { guard: self, var }
    }
}

struct GuardDisplay<'a> {
    guard: &'a Guard,
    var: &'a str,
}

impl fmt::Display for GuardDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.var;
        match *self.guard {
            Guard::AtMost(to) => write!(f, "{v} <= {to}"),
            Guard::AtLeast(from) => write!(f, "{v} >= {from}"),
            Guard::Between(from, to) => write!(f, "{v} >= {from} && {v} <= {to}"),
        }
    }
}

/// Render every directive as a line of C.
///
/// The global range is always first and always present (0 bytes if no
/// descriptor covered it); the remaining ranges follow in ascending order.
pub fn render(mut skips: SkipTable, global: VersionRange, opts: &EmitOptions) -> Vec<String> {
    let call = |bytes: u32| format!("{}({}, {});", opts.skip_fn, opts.handle, bytes);

    let mut lines = Vec::with_capacity(skips.len() + 2);
    if let Some(banner) = &opts.banner {
        lines.push(banner.clone());
    }
    lines.push(call(skips.take(global)));

    for (range, bytes) in skips {
        // `take` already removed the global range
        if let Some(guard) = Guard::for_range(range, global) {
            lines.push(format!(
                "if ({}) {}",
                guard.display(&opts.version_var),
                call(bytes)
            ));
        }
    }
    lines
}

pub fn emit<W: Write>(
    skips: SkipTable,
    global: VersionRange,
    opts: &EmitOptions,
    out: &mut W,
) -> io::Result<()> {
    for line in render(skips, global, opts) {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GLOBAL: VersionRange = VersionRange {
        from: 0,
        to: 65535,
    };

    fn no_banner() -> EmitOptions {
        EmitOptions {
            banner: None,
            ..EmitOptions::default()
        }
    }

    #[test]
    fn test_guard_shapes() {
        assert_eq!(Guard::for_range(GLOBAL, GLOBAL), None);
        assert_eq!(
            Guard::for_range(VersionRange::new(0, 199), GLOBAL),
            Some(Guard::AtMost(199))
        );
        assert_eq!(
            Guard::for_range(VersionRange::new(200, 65535), GLOBAL),
            Some(Guard::AtLeast(200))
        );
        assert_eq!(
            Guard::for_range(VersionRange::new(28, 86), GLOBAL),
            Some(Guard::Between(28, 86))
        );
    }

    #[test]
    fn test_global_range_absent_emits_zero() {
        let mut skips = SkipTable::new();
        skips.add(1, 0, 199).unwrap();
        skips.add(2, 0, 199).unwrap();
        skips.add(4, 200, 65535).unwrap();

        let lines = render(skips, GLOBAL, &no_banner());
        assert_eq!(lines[0], "ottd_skip(fp, 0);");
        assert_eq!(lines.len(), 3);
        assert!(lines.contains(&"if (version <= 199) ottd_skip(fp, 3);".to_string()));
        assert!(lines.contains(&"if (version >= 200) ottd_skip(fp, 4);".to_string()));
    }

    #[test]
    fn test_global_range_emitted_once_first() {
        let mut skips = SkipTable::new();
        skips.add(3, 28, 86).unwrap();
        skips.add(28, 0, 65535).unwrap();

        let lines = render(skips, GLOBAL, &EmitOptions::default());
        assert_eq!(
            lines,
            vec![
                "// skip generated with pats-skipgen",
                "ottd_skip(fp, 28);",
                "if (version >= 28 && version <= 86) ottd_skip(fp, 3);",
            ]
        );
    }

    #[test]
    fn test_custom_names() {
        let mut skips = SkipTable::new();
        skips.add(5, 10, 65535).unwrap();
        let opts = EmitOptions {
            skip_fn: "skip".into(),
            handle: "handle".into(),
            version_var: "ver".into(),
            banner: None,
        };

        let mut out = Vec::new();
        emit(skips, GLOBAL, &opts, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "skip(handle, 0);\nif (ver >= 10) skip(handle, 5);\n"
        );
    }
}
