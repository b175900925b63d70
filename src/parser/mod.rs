use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::error::{GenError, GenResult};

/// Location of the generated table inside an OpenTTD build tree
/// (`settings_gen` writes it from `src/table/settings.ini`).
pub const SETTINGS_HEADER: &str = "objs/setting/table/settings.h";

/// The table we read starts right after this line.
pub const BLOCK_START: &str = "const SettingDesc _settings[] = {\n";

/// First entry past the end of the `PATS` chunk prefix we skip. No `#if`
/// blocks occur before it, so none are handled.
pub const BLOCK_END: &str = "\nSDT_VAR(GameSettings, game_creation.starting_year";

pub fn header_path(source_root: &Path) -> PathBuf {
    source_root.join(SETTINGS_HEADER)
}

/// Read the settings header, normalising CRLF line endings.
pub fn load(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(GenError::MissingInput {
            path: path.to_path_buf(),
        }
        .into());
    }
    let text =
        std::fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
    info!("File loaded, size: {} bytes", text.len());
    Ok(text.replace("\r\n", "\n"))
}

/// Return the descriptor lines between `BLOCK_START` and `BLOCK_END`.
pub fn extract_block(text: &str) -> GenResult<&str> {
    let start = text
        .find(BLOCK_START)
        .ok_or(GenError::MissingMarker {
            marker: BLOCK_START,
        })?
        + BLOCK_START.len();

    let len = text[start..]
        .find(BLOCK_END)
        .ok_or(GenError::MissingMarker { marker: BLOCK_END })?;

    Ok(&text[start..start + len])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_block() {
        let text = "\
#include \"x.h\"
const SettingDesc _settings[] = {
SDT_NULL(1, SL_MIN_VERSION, SLV_5),
SDT_NULL(2, SLV_6, SL_MAX_VERSION),
SDT_VAR(GameSettings, game_creation.starting_year, SLE_INT32, 0),
SDT_END()
};
";
        assert_eq!(
            extract_block(text).unwrap(),
            "SDT_NULL(1, SL_MIN_VERSION, SLV_5),\nSDT_NULL(2, SLV_6, SL_MAX_VERSION),"
        );
    }

    #[test]
    fn test_missing_markers() {
        let err = extract_block("nothing here").unwrap_err();
        assert!(matches!(err, GenError::MissingMarker { marker: BLOCK_START }));

        let err = extract_block("const SettingDesc _settings[] = {\nSDT_END()\n").unwrap_err();
        assert!(matches!(err, GenError::MissingMarker { marker: BLOCK_END }));
    }

    #[test]
    fn test_end_marker_before_start_is_ignored() {
        let text = "\nSDT_VAR(GameSettings, game_creation.starting_year\nfoo";
        assert!(extract_block(text).is_err());
    }

    #[test]
    fn test_missing_header() {
        let path = header_path(Path::new("/definitely/not/an/openttd/tree"));
        let err = load(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GenError>(),
            Some(GenError::MissingInput { .. })
        ));
        assert!(err.to_string().starts_with("file not found: "));
    }
}
