//! Merged output rendering

pub mod report;

pub use report::write_report;

use crate::domain::{Dialect, Registry};
use crate::error::{MergeError, Result};
use crate::extract::trim_line;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Union of every unit's dependencies, first-seen order, exact-string dedup.
pub fn dependency_union(registry: &Registry) -> Vec<&[u8]> {
    let mut seen: HashSet<&[u8]> = HashSet::new();
    let mut union = Vec::new();
    for dep in registry.iter().flat_map(|u| u.dependencies.iter()) {
        if seen.insert(dep.as_slice()) {
            union.push(dep.as_slice());
        }
    }
    union
}

/// True when any body line, trimmed, starts with the entry point signature.
pub fn has_entry_point(registry: &Registry, dialect: &Dialect) -> bool {
    registry
        .iter()
        .flat_map(|u| u.body.iter())
        .any(|line| trim_line(line).starts_with(dialect.entry_point.as_bytes()))
}

/// Stream the merged file to `out`. Body and import lines are written
/// byte-for-byte as extracted.
///
/// Returns whether a placeholder entry point was appended.
pub fn render_merged<W: Write>(
    out: &mut W,
    registry: &Registry,
    dialect: &Dialect,
) -> std::io::Result<bool> {
    writeln!(out, "{}{}", dialect.package_prefix, dialect.output_package)?;
    writeln!(out)?;

    writeln!(out, "{}", dialect.block_opener)?;
    for dep in dependency_union(registry) {
        out.write_all(b"\t")?;
        out.write_all(dep)?;
        out.write_all(b"\n")?;
    }
    writeln!(out, "{}", dialect.block_closer)?;
    writeln!(out)?;

    for (i, unit) in registry.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        out.write_all(dialect.annotation_prefix.as_bytes())?;
        out.write_all(&unit.module_name)?;
        out.write_all(b"\n")?;
        for line in &unit.body {
            out.write_all(line)?;
            out.write_all(b"\n")?;
        }
    }

    let synthesize = !has_entry_point(registry, dialect);
    if synthesize {
        writeln!(out)?;
        for line in &dialect.entry_point_stub {
            writeln!(out, "{line}")?;
        }
    }

    Ok(synthesize)
}

/// Render the merged file into memory.
pub fn render_merged_bytes(registry: &Registry, dialect: &Dialect) -> (Vec<u8>, bool) {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let synthesized = render_merged(&mut buf, registry, dialect).unwrap_or(false);
    (buf, synthesized)
}

/// Create (or truncate) `path` and write the merged file into it.
///
/// No atomic rename: a failure midway leaves a partial file behind.
pub fn write_merged(path: &Path, registry: &Registry, dialect: &Dialect) -> Result<bool> {
    let file = File::create(path).map_err(|e| MergeError::emit(path, e))?;
    let mut writer = BufWriter::new(file);
    let synthesized =
        render_merged(&mut writer, registry, dialect).map_err(|e| MergeError::emit(path, e))?;
    writer.flush().map_err(|e| MergeError::emit(path, e))?;
    Ok(synthesized)
}

#[cfg(test)]
mod tests {
    use super::{dependency_union, has_entry_point, render_merged_bytes, write_merged};
    use crate::domain::{Dialect, Registry, Unit};
    use tempfile::TempDir;

    fn unit(name: &str, deps: &[&str], body: &[&str]) -> Unit {
        Unit {
            module_name: name.as_bytes().to_vec(),
            dependencies: deps.iter().map(|s| s.as_bytes().to_vec()).collect(),
            body: body.iter().map(|s| s.as_bytes().to_vec()).collect(),
        }
    }

    fn render_text(registry: &Registry, dialect: &Dialect) -> (String, bool) {
        let (bytes, synthesized) = render_merged_bytes(registry, dialect);
        (String::from_utf8(bytes).expect("utf8 output"), synthesized)
    }

    fn registry(units: Vec<Unit>) -> Registry {
        let mut registry = Registry::new();
        for u in units {
            registry.push(u);
        }
        registry
    }

    #[test]
    fn union_keeps_first_seen_order() {
        let reg = registry(vec![
            unit("a", &["\"os\"", "\"fmt\"", "\"os\""], &[]),
            unit("b", &["\"strings\"", "\"fmt\""], &[]),
            unit("c", &["\"io\"", "\"os\""], &[]),
        ]);
        let union: Vec<&str> = dependency_union(&reg)
            .into_iter()
            .map(|d| std::str::from_utf8(d).expect("utf8"))
            .collect();
        assert_eq!(union, vec!["\"os\"", "\"fmt\"", "\"strings\"", "\"io\""]);
    }

    #[test]
    fn entry_point_detected_after_trimming() {
        let dialect = Dialect::default();
        let with_main = registry(vec![unit("a", &[], &["   func main() {", "}"])]);
        assert!(has_entry_point(&with_main, &dialect));

        let without = registry(vec![unit("a", &[], &["func mainly() {}", "// func main()x"])]);
        assert!(!has_entry_point(&without, &dialect));
    }

    #[test]
    fn renders_sections_and_skips_stub_when_main_exists() {
        let reg = registry(vec![
            unit("pkgA", &["\"fmt\""], &["x := 1"]),
            unit("pkgB", &["\"fmt\""], &["func main() {", "}"]),
        ]);
        let (text, synthesized) = render_text(&reg, &Dialect::default());
        assert!(!synthesized);
        assert_eq!(
            text,
            "package main\n\nimport (\n\t\"fmt\"\n)\n\n\
             // Original package: pkgA\nx := 1\n\n\
             // Original package: pkgB\nfunc main() {\n}\n"
        );
    }

    #[test]
    fn appends_stub_when_no_main() {
        let reg = registry(vec![unit("pkgA", &[], &["", "var x = 1"])]);
        let (text, synthesized) = render_text(&reg, &Dialect::default());
        assert!(synthesized);
        assert_eq!(
            text,
            "package main\n\nimport (\n)\n\n\
             // Original package: pkgA\n\nvar x = 1\n\
             \nfunc main() {\n\t// TODO: Add main logic here\n}\n"
        );
    }

    #[test]
    fn empty_registry_still_has_block_and_stub() {
        let (text, synthesized) = render_text(&Registry::new(), &Dialect::default());
        assert!(synthesized);
        assert_eq!(
            text,
            "package main\n\nimport (\n)\n\n\nfunc main() {\n\t// TODO: Add main logic here\n}\n"
        );
    }

    #[test]
    fn write_merged_overwrites_existing_file() {
        let tmp = TempDir::new().expect("tmp");
        let out = tmp.path().join("merged_project.go");
        std::fs::write(&out, "stale content that is much longer than the new output\n")
            .expect("write stale");

        let reg = registry(vec![unit("p", &[], &["func main() {}"])]);
        write_merged(&out, &reg, &Dialect::default()).expect("write merged");

        let written = std::fs::read_to_string(&out).expect("read");
        assert!(!written.contains("stale"));
        assert!(written.ends_with("func main() {}\n"));
    }

    #[test]
    fn non_utf8_lines_are_written_byte_for_byte() {
        let tmp = TempDir::new().expect("tmp");
        let out = tmp.path().join("merged_project.go");
        let reg = registry(vec![Unit {
            module_name: b"a".to_vec(),
            dependencies: vec![b"\"caf\xe9\"".to_vec()],
            body: vec![b"// caf\xe9".to_vec(), b"func main() {}".to_vec()],
        }]);

        write_merged(&out, &reg, &Dialect::default()).expect("write merged");

        let written = std::fs::read(&out).expect("read");
        assert_eq!(
            written,
            b"package main\n\nimport (\n\t\"caf\xe9\"\n)\n\n// Original package: a\n// caf\xe9\nfunc main() {}\n"
                .to_vec()
        );
    }

    #[test]
    fn write_merged_reports_emit_error() {
        let tmp = TempDir::new().expect("tmp");
        let out = tmp.path().join("missing-dir").join("out.go");
        let err = write_merged(&out, &Registry::new(), &Dialect::default()).expect_err("fail");
        assert!(matches!(err, crate::error::MergeError::Emit { .. }));
    }
}
