use std::fmt;

use crate::error::{GenError, GenResult};

/// Integer save types and their on-disk width in bytes.
pub const TYPE_WIDTHS: &[(&str, u32)] = &[("SLE_UINT8", 1), ("SLE_UINT16", 2), ("SLE_UINT32", 4)];

/// Width of every boolean setting, stored as `SLE_UINT8`.
pub const BOOL_WIDTH: u32 = 1;

/// Look up the byte width of a `SLE_*` type token.
pub fn type_width(name: &str) -> Option<u32> {
    TYPE_WIDTHS
        .iter()
        .find_map(|&(ty, width)| (ty == name).then_some(width))
}

/// Inclusive `[from, to]` interval of save-format versions.
///
/// Ordering is by `from` first, then `to`, which is also the order the
/// writer emits conditional directives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionRange {
    pub from: u32,
    pub to: u32,
}

impl VersionRange {
    pub fn new(from: u32, to: u32) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.from, self.to)
    }
}

/// The closed set of descriptor macros understood by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// `SDT_NULL` – padding with an explicit byte count.
    Null,
    /// `SDT_VAR` – typed member of a settings struct.
    Var,
    /// `SDT_BOOL`, `SDTG_BOOL`, `SDTC_BOOL`.
    Bool,
    /// `SDTG_VAR` – typed global variable.
    GlobalVar,
    /// `SDT_OMANY` – one-of-many enumerated setting.
    OneOfMany,
}

impl Kind {
    pub fn from_keyword(keyword: &str) -> Option<Kind> {
        match keyword {
            "SDT_NULL" => Some(Kind::Null),
            "SDT_VAR" => Some(Kind::Var),
            "SDT_BOOL" | "SDTG_BOOL" | "SDTC_BOOL" => Some(Kind::Bool),
            "SDTG_VAR" => Some(Kind::GlobalVar),
            "SDT_OMANY" => Some(Kind::OneOfMany),
            _ => None,
        }
    }
}

/// One classified table line, carrying only what its kind needs.
/// Version tokens are still unresolved at this stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptor {
    Null { width: u32, from: String, to: String },
    Var { ty: String, from: String, to: String },
    Bool { from: String, to: String },
    GlobalVar { ty: String, from: String, to: String },
    OneOfMany { ty: String, from: String, to: String },
}

/// A descriptor with its width resolved, ready for the accumulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub kind: Kind,
    pub width: u32,
    pub from: String,
    pub to: String,
}

impl Descriptor {
    pub fn kind(&self) -> Kind {
        match self {
            Descriptor::Null { .. } => Kind::Null,
            Descriptor::Var { .. } => Kind::Var,
            Descriptor::Bool { .. } => Kind::Bool,
            Descriptor::GlobalVar { .. } => Kind::GlobalVar,
            Descriptor::OneOfMany { .. } => Kind::OneOfMany,
        }
    }

    /// Resolve the byte width, consuming the descriptor.
    pub fn into_field(self) -> GenResult<FieldDescriptor> {
        let kind = self.kind();
        let (width, from, to) = match self {
            Descriptor::Null { width, from, to } => (width, from, to),
            Descriptor::Bool { from, to } => (BOOL_WIDTH, from, to),
            Descriptor::Var { ty, from, to }
            | Descriptor::GlobalVar { ty, from, to }
            | Descriptor::OneOfMany { ty, from, to } => {
                let width = type_width(&ty).ok_or(GenError::UnknownTypeName { name: ty })?;
                (width, from, to)
            }
        };
        Ok(FieldDescriptor {
            kind,
            width,
            from,
            to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_widths() {
        assert_eq!(type_width("SLE_UINT8"), Some(1));
        assert_eq!(type_width("SLE_UINT16"), Some(2));
        assert_eq!(type_width("SLE_UINT32"), Some(4));
        assert_eq!(type_width("SLE_INT64"), None);
        assert_eq!(type_width("sle_uint8"), None);
    }

    #[test]
    fn test_bool_keyword_variants() {
        for kw in ["SDT_BOOL", "SDTG_BOOL", "SDTC_BOOL"] {
            assert_eq!(Kind::from_keyword(kw), Some(Kind::Bool), "{kw}");
        }
        assert_eq!(Kind::from_keyword("SDT_STR"), None);
    }

    #[test]
    fn test_into_field_widths() {
        let var = Descriptor::Var {
            ty: "SLE_UINT16".into(),
            from: "SLV_97".into(),
            to: "SL_MAX_VERSION".into(),
        };
        let field = var.into_field().unwrap();
        assert_eq!(field.kind, Kind::Var);
        assert_eq!(field.width, 2);
        assert_eq!(field.from, "SLV_97");

        let b = Descriptor::Bool {
            from: "SL_MIN_VERSION".into(),
            to: "SLV_86".into(),
        };
        assert_eq!(b.into_field().unwrap().width, BOOL_WIDTH);

        let null = Descriptor::Null {
            width: 3,
            from: "SLV_28".into(),
            to: "SLV_86".into(),
        };
        assert_eq!(null.into_field().unwrap().width, 3);
    }

    #[test]
    fn test_unknown_type_names_token() {
        let omany = Descriptor::OneOfMany {
            ty: "SLE_FOO".into(),
            from: "SLV_1".into(),
            to: "SLV_2".into(),
        };
        let err = omany.into_field().unwrap_err();
        assert!(matches!(&err, GenError::UnknownTypeName { name } if name == "SLE_FOO"));
        assert_eq!(err.to_string(), "unknown type SLE_FOO");
    }

    #[test]
    fn test_range_ordering() {
        let mut ranges = vec![
            VersionRange::new(200, 65535),
            VersionRange::new(0, 199),
            VersionRange::new(0, 86),
        ];
        ranges.sort();
        assert_eq!(
            ranges,
            vec![
                VersionRange::new(0, 86),
                VersionRange::new(0, 199),
                VersionRange::new(200, 65535),
            ]
        );
    }
}
