//! Import extraction and import-path resolution.
//!
//! Source files are never executed or type-checked; only their import
//! surface matters. Extraction is two-tier: a structural parse with swc,
//! and a regex scan as the safety net when parsing fails (Astro/Vue SFCs,
//! syntax the parser rejects).

use std::{
    fs,
    path::{Component, Path, PathBuf},
    sync::OnceLock,
};

use anyhow::{Result, anyhow};
use regex::Regex;
use swc_common::{FileName, GLOBALS, Globals, SourceMap};
use swc_ecma_ast::{CallExpr, Callee, ExportAll, Expr, ImportDecl, Lit, NamedExport};
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};
use swc_ecma_visit::{Visit, VisitWith};

use crate::logger::Logger;

/// Extensions eligible for import extraction.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "astro", "vue"];

/// Collects import specifiers from a parsed module, in source order.
#[derive(Default)]
struct ImportCollector {
    specifiers: Vec<String>,
}

impl ImportCollector {
    fn push(&mut self, raw: &str) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            self.specifiers.push(trimmed.to_string());
        }
    }
}

impl Visit for ImportCollector {
    fn visit_import_decl(&mut self, node: &ImportDecl) {
        self.push(&node.src.value.to_string_lossy());
    }

    fn visit_named_export(&mut self, node: &NamedExport) {
        // Only re-exports carry a source module
        if let Some(src) = &node.src {
            self.push(&src.value.to_string_lossy());
        }
    }

    fn visit_export_all(&mut self, node: &ExportAll) {
        self.push(&node.src.value.to_string_lossy());
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if matches!(node.callee, Callee::Import(_))
            && let Some(arg) = node.args.first()
            && let Expr::Lit(Lit::Str(s)) = &*arg.expr
        {
            self.push(&s.value.to_string_lossy());
        }
        node.visit_children_with(self);
    }
}

/// Parse `code` as a TS/TSX module and collect its import specifiers.
fn parse_module_imports(code: String, file_path: &str) -> Result<Vec<String>> {
    GLOBALS.set(&Globals::new(), || {
        let source_map = SourceMap::default();
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        });

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);
        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse module: {:?}", e))?;

        let mut collector = ImportCollector::default();
        module.visit_with(&mut collector);
        Ok(collector.specifiers)
    })
}

fn import_regex() -> &'static Regex {
    static IMPORT_RE: OnceLock<Regex> = OnceLock::new();
    IMPORT_RE.get_or_init(|| {
        Regex::new(r#"import\s+(?:.+\s+from\s+)?['"]([^'"]+)['"];?"#)
            .expect("import fallback regex compiles")
    })
}

/// Regex-based fallback: matches `import x from "pkg"` and
/// `import {a, b} from "pkg"` forms. Not every ES module form is
/// recognized; this only runs when structural parsing failed.
fn fallback_imports(content: &str) -> Vec<String> {
    import_regex()
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Extract import specifiers from a source file.
///
/// Fails soft: a nonexistent file, a non-source extension, or a read error
/// yields an empty list. A parse failure falls back to regex scanning.
pub fn extract_imports(file_path: &Path, logger: &Logger) -> Vec<String> {
    if !file_path.exists() {
        logger.debug(&format!("File not found: {}", file_path.display()));
        return Vec::new();
    }

    let extension = file_path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if !SOURCE_EXTENSIONS.contains(&extension.as_str()) {
        return Vec::new();
    }

    let content = match fs::read_to_string(file_path) {
        Ok(content) => content,
        Err(err) => {
            logger.error(&format!(
                "Error extracting imports from {}: {}",
                file_path.display(),
                err
            ));
            return Vec::new();
        }
    };

    match parse_module_imports(content.clone(), &file_path.to_string_lossy()) {
        Ok(specifiers) => specifiers,
        Err(_) => {
            logger.warn(&format!(
                "Using fallback import extraction for {} due to parsing error",
                file_path.display()
            ));
            fallback_imports(&content)
        }
    }
}

/// Whether a specifier names an external package.
///
/// Anything that is not relative, absolute, alias-prefixed, or
/// scheme-qualified (`node:`, `https:`) counts as a package import.
pub fn is_package_import(specifier: &str) -> bool {
    !specifier.starts_with('.')
        && !specifier.starts_with('/')
        && !specifier.starts_with("@/")
        && !specifier.starts_with("@components/")
        && !specifier.contains(':')
}

/// Package name of a specifier: its first path segment.
///
/// Scoped packages (`@scope/pkg`) yield `@scope`; see DESIGN.md.
pub fn package_name(specifier: &str) -> &str {
    specifier.split('/').next().unwrap_or(specifier)
}

/// Lexically normalize a path, collapsing `.` and `..` segments.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Keep leading ".." on relative paths; never escape the root
                if !out.pop() && out.as_os_str().is_empty() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Resolve an import specifier to a project path.
///
/// Relative specifiers resolve against the importing file's directory,
/// `@/` against `<root>/src`, `@components/` against
/// `<root>/src/components`. Package specifiers are returned unchanged.
pub fn resolve_import_path(
    specifier: &str,
    current_file: &Path,
    project_root: &Path,
) -> PathBuf {
    if specifier.starts_with('.') {
        let current_dir = current_file.parent().unwrap_or_else(|| Path::new(""));
        return normalize_path(&current_dir.join(specifier));
    }

    if let Some(rest) = specifier.strip_prefix("@/") {
        return normalize_path(&project_root.join("src").join(rest));
    }

    if let Some(rest) = specifier.strip_prefix("@components/") {
        return normalize_path(&project_root.join("src/components").join(rest));
    }

    PathBuf::from(specifier)
}
