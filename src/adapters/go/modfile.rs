use crate::domain::ports::{ModuleInfo, ModuleSource};
use anyhow::{Context, Result, anyhow};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

fn module_directive_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)^\s*module\s+("(?:[^"\\]|\\.)*"|`[^`]*`|[^\s"`]+)\s*$"#)
            .expect("module directive regex")
    })
}

/// `go.mod` manifest; the directory holding it is the project root.
pub struct GoModFile {
    path: PathBuf,
}

impl GoModFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ModuleSource for GoModFile {
    fn load(&self) -> Result<ModuleInfo> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let module_path = parse_module_path(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;

        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let project_root = std::fs::canonicalize(parent)
            .with_context(|| format!("Failed to resolve project root {}", parent.display()))?;

        Ok(ModuleInfo {
            module_path,
            project_root,
        })
    }
}

/// Extract the module path from the `module` directive of a go.mod file.
pub fn parse_module_path(content: &str) -> Result<String> {
    let stripped: String = content
        .lines()
        .map(strip_line_comment)
        .collect::<Vec<_>>()
        .join("\n");

    let caps = module_directive_regex()
        .captures(&stripped)
        .ok_or_else(|| anyhow!("no module directive"))?;
    let raw = &caps[1];

    let path = if raw.starts_with('"') {
        serde_json::from_str::<String>(raw)
            .with_context(|| format!("invalid quoted module path {raw}"))?
    } else if let Some(inner) = raw.strip_prefix('`') {
        inner.trim_end_matches('`').to_string()
    } else {
        raw.to_string()
    };

    if path.is_empty() {
        return Err(anyhow!("empty module path"));
    }
    Ok(path)
}

/// Drop a trailing `//` comment unless it sits inside a quoted string.
fn strip_line_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match quote {
            Some('"') if escaped => escaped = false,
            Some('"') if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '`' => quote = Some(c),
            None if c == '/' && line[i + 1..].starts_with('/') => return &line[..i],
            None => {}
        }
    }
    line
}
