use anyhow::{Context, Result};
use log::{debug, trace};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::constants::IMPORT_PREFIX;

/// Reads `file` line by line and returns every trimmed line that starts with `import `.
///
/// `\n`, `\r\n` and a lone `\r` all end a line. Lines are returned in file order,
/// already stripped of surrounding whitespace. Opening or reading failures
/// (including invalid UTF-8) are returned as errors naming the file.
pub fn scan_imports(file: &Path) -> Result<Vec<String>> {
    trace!("Scanning file for imports: {}", file.display());
    let handle = File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let mut reader = BufReader::new(handle);

    let mut imports = Vec::new();
    let mut chunk = Vec::new();
    loop {
        chunk.clear();
        let read = reader
            .read_until(b'\n', &mut chunk)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        if read == 0 {
            break;
        }
        let text = std::str::from_utf8(&chunk)
            .with_context(|| format!("{} is not valid UTF-8", file.display()))?;

        // A chunk ends at `\n`; any `\r` inside it is a line break of its own.
        for line in text.split('\r') {
            let stripped = line.trim();
            if stripped.starts_with(IMPORT_PREFIX) {
                trace!("Found import line '{}' in {}", stripped, file.display());
                imports.push(stripped.to_string());
            }
        }
    }

    debug!("Found {} import lines in {}", imports.len(), file.display());
    Ok(imports)
}

/// Like [`scan_imports`], but an unreadable file counts as having no imports.
pub fn imports_or_empty(file: &Path) -> Vec<String> {
    match scan_imports(file) {
        Ok(imports) => imports,
        Err(e) => {
            debug!("Treating {} as import-free: {:#}", file.display(), e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_source(dir: &Path, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    #[test]
    fn test_extracts_trimmed_import_lines() {
        let temp_dir = TempDir::new().unwrap();
        let file = write_source(
            temp_dir.path(),
            "app.js",
            b"import foo\nconst x = 1\n  import bar \nimport baz",
        );

        let imports = scan_imports(&file).unwrap();
        assert_eq!(imports, vec!["import foo", "import bar", "import baz"]);
    }

    #[test]
    fn test_prefix_requires_trailing_space() {
        let temp_dir = TempDir::new().unwrap();
        let file = write_source(
            temp_dir.path(),
            "app.ts",
            b"importantThing = 5\nimport\nimports.push(x)\nimport { a } from './a'\n",
        );

        let imports = scan_imports(&file).unwrap();
        assert_eq!(imports, vec!["import { a } from './a'"]);
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        let temp_dir = TempDir::new().unwrap();
        let file = write_source(temp_dir.path(), "app.ts", b"Import foo\nIMPORT bar\n");

        assert!(scan_imports(&file).unwrap().is_empty());
    }

    #[test]
    fn test_crlf_and_tab_indentation() {
        let temp_dir = TempDir::new().unwrap();
        let file = write_source(
            temp_dir.path(),
            "win.js",
            b"\timport React from 'react';\r\nexport default 1;\r\n",
        );

        let imports = scan_imports(&file).unwrap();
        assert_eq!(imports, vec!["import React from 'react';"]);
    }

    #[test]
    fn test_lone_carriage_return_ends_line() {
        let temp_dir = TempDir::new().unwrap();
        let file = write_source(temp_dir.path(), "mac.js", b"import a\rimport b\rconst x = 1\r");

        let imports = scan_imports(&file).unwrap();
        assert_eq!(imports, vec!["import a", "import b"]);
    }

    #[test]
    fn test_mixed_line_endings() {
        let temp_dir = TempDir::new().unwrap();
        let file = write_source(
            temp_dir.path(),
            "mixed.ts",
            b"import a\r\nlet y = 2; import no\rimport b\nimport c\r\n",
        );

        let imports = scan_imports(&file).unwrap();
        assert_eq!(imports, vec!["import a", "import b", "import c"]);
    }

    #[test]
    fn test_require_and_dynamic_import_not_captured() {
        let temp_dir = TempDir::new().unwrap();
        let file = write_source(
            temp_dir.path(),
            "server.js",
            b"const express = require('express');\nconst m = await import('./m');\n",
        );

        assert!(scan_imports(&file).unwrap().is_empty());
    }

    #[test]
    fn test_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = write_source(temp_dir.path(), "empty.ts", b"");

        assert!(scan_imports(&file).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("gone.js");

        let err = scan_imports(&missing).unwrap_err();
        assert!(format!("{:#}", err).contains("gone.js"));
        assert!(imports_or_empty(&missing).is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let file = write_source(temp_dir.path(), "binary.js", b"import a\n\xff\xfe\nimport b\n");

        assert!(scan_imports(&file).is_err());
        assert!(imports_or_empty(&file).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_permission_denied_yields_empty() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let file = write_source(temp_dir.path(), "locked.js", b"import secret from './s'\n");
        fs::set_permissions(&file, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can still open the file; nothing to check then.
        if File::open(&file).is_ok() {
            return;
        }
        assert!(scan_imports(&file).is_err());
        assert!(imports_or_empty(&file).is_empty());
    }

    #[test]
    fn test_directory_path_is_error() {
        let temp_dir = TempDir::new().unwrap();

        assert!(scan_imports(temp_dir.path()).is_err());
        assert!(imports_or_empty(temp_dir.path()).is_empty());
    }
}
