//! Source governance lock tests.
//!
//! Proves:
//! 1. Hash domains are unique, null-terminated, and follow the
//!    `PERMAFROST::*::V1\0` convention
//! 2. No raw `PERMAFROST::` domain literal exists outside `proof/hash.rs`
//! 3. Library code in kernel/, engine/, api/ never calls `unwrap()` or
//!    `expect(`

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use permafrost_kernel::proof::hash::{DOMAIN_REPORT, DOMAIN_SNAPSHOT};

const ALL_DOMAINS: &[&[u8]] = &[DOMAIN_SNAPSHOT, DOMAIN_REPORT];

// ---------------------------------------------------------------------------
// 1. Domain constants
// ---------------------------------------------------------------------------

#[test]
fn hash_domains_are_unique() {
    let unique: BTreeSet<&[u8]> = ALL_DOMAINS.iter().copied().collect();
    assert_eq!(unique.len(), ALL_DOMAINS.len());
}

#[test]
fn hash_domains_follow_naming_convention() {
    for domain in ALL_DOMAINS {
        let shown = String::from_utf8_lossy(domain);
        assert!(domain.starts_with(b"PERMAFROST::"), "{shown}");
        assert!(domain.ends_with(b"::V1\0"), "{shown}");
        assert_eq!(
            domain.iter().filter(|b| **b == 0).count(),
            1,
            "{shown} has an interior null"
        );
    }
}

// ---------------------------------------------------------------------------
// 2-3. Source scans
// ---------------------------------------------------------------------------

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .canonicalize()
        .expect("workspace root exists")
}

fn rust_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            rust_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            out.push(path);
        }
    }
}

/// Non-comment production lines of every library source file: scanning of a
/// file stops at its `#[cfg(test)]` module, which sits at the end.
fn production_lines() -> Vec<(PathBuf, usize, String)> {
    let root = workspace_root();
    let mut files = Vec::new();
    for krate in ["kernel/src", "engine/src", "api/src"] {
        rust_files(&root.join(krate), &mut files);
    }
    assert!(!files.is_empty(), "no sources found under {}", root.display());

    let mut lines = Vec::new();
    for path in files {
        let content = std::fs::read_to_string(&path).expect("source is readable");
        for (no, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.starts_with("#[cfg(test)]") {
                break;
            }
            if trimmed.starts_with("//") {
                continue;
            }
            lines.push((path.clone(), no + 1, line.to_string()));
        }
    }
    lines
}

#[test]
fn no_raw_domain_literals_outside_hash_module() {
    let violations: Vec<String> = production_lines()
        .into_iter()
        .filter(|(path, _, _)| !path.ends_with("proof/hash.rs"))
        .filter(|(_, _, line)| line.contains("b\"PERMAFROST::"))
        .map(|(path, no, line)| format!("{}:{no}: {line}", path.display()))
        .collect();
    assert!(violations.is_empty(), "{}", violations.join("\n"));
}

#[test]
fn library_code_propagates_instead_of_panicking() {
    let violations: Vec<String> = production_lines()
        .into_iter()
        .filter(|(_, _, line)| line.contains(".unwrap()") || line.contains(".expect("))
        .map(|(path, no, line)| format!("{}:{no}: {line}", path.display()))
        .collect();
    assert!(violations.is_empty(), "{}", violations.join("\n"));
}
