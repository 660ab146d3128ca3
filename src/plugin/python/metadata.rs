//! Dependencies declared by a project's own packaging metadata
//!
//! `pyproject.toml` is read statically. A bare `setup.py` is never executed:
//! a separate interpreter (isolated mode, no site packages, empty environment)
//! parses it with `ast` and literal-evaluates the `install_requires` keyword of
//! the `setup(...)` call. A keyword bound to a module-level name is resolved
//! when that name is assigned a literal. Anything computed at runtime is out of
//! reach and counts as undeclared.
//!
//! Extraction fails soft: any error means "no dependencies discovered" and is
//! reported as a warning, never as a fatal error.

use std::path::Path;
use std::process::{Command, Stdio};

use serde::Deserialize;
use tracing::{debug, warn};

const RESULT_MARKER: &str = "vendorize-install-requires:";

const SETUP_PY_EXTRACTOR: &str = r#"
import ast, json

with open("setup.py", "rb") as f:
    tree = ast.parse(f.read(), "setup.py")

literals = {}
for node in tree.body:
    if isinstance(node, ast.Assign) and len(node.targets) == 1 and isinstance(node.targets[0], ast.Name):
        try:
            literals[node.targets[0].id] = ast.literal_eval(node.value)
        except ValueError:
            pass

def is_setup(func):
    return (isinstance(func, ast.Name) and func.id == "setup") or (
        isinstance(func, ast.Attribute) and func.attr == "setup")

requires = []
for node in ast.walk(tree):
    if isinstance(node, ast.Call) and is_setup(node.func):
        for keyword in node.keywords:
            if keyword.arg != "install_requires":
                continue
            if isinstance(keyword.value, ast.Name):
                requires = literals.get(keyword.value.id, [])
            else:
                requires = ast.literal_eval(keyword.value)

if isinstance(requires, str):
    requires = requires.splitlines()
requires = [str(r).strip() for r in requires if str(r).strip()]
print("vendorize-install-requires:" + json.dumps(requires))
"#;

#[derive(Debug, Deserialize)]
struct PyProject {
    project: Option<ProjectTable>,
}

#[derive(Debug, Deserialize)]
struct ProjectTable {
    dependencies: Option<Vec<String>>,
}

/// Static `[project].dependencies` from `pyproject.toml`, if declared
fn pyproject_dependencies(source_dir: &Path) -> Option<Vec<String>> {
    let path = source_dir.join("pyproject.toml");
    let content = std::fs::read_to_string(&path).ok()?;
    match toml::from_str::<PyProject>(&content) {
        Ok(pyproject) => pyproject.project?.dependencies,
        Err(e) => {
            warn!(file = %path.display(), "failed to parse: {e}");
            None
        }
    }
}

fn parse_extractor_output(stdout: &str) -> Option<Vec<String>> {
    let payload = stdout
        .lines()
        .rev()
        .find_map(|line| line.strip_prefix(RESULT_MARKER))?;
    serde_json::from_str(payload).ok()
}

/// `install_requires` read from the syntax tree of `setup.py`
fn setup_py_dependencies(source_dir: &Path, python: &str) -> Option<Vec<String>> {
    let setup_py = source_dir.join("setup.py");
    if !setup_py.is_file() {
        return None;
    }

    let output = Command::new(python)
        .args(["-I", "-S", "-B", "-c", SETUP_PY_EXTRACTOR])
        .current_dir(source_dir)
        .env_clear()
        .stdin(Stdio::null())
        .output();

    let output = match output {
        Ok(output) => output,
        Err(e) => {
            warn!(file = %setup_py.display(), "failed to run {python}: {e}");
            return None;
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!(
            file = %setup_py.display(),
            "failed to read, assuming no dependencies: {}",
            stderr.lines().last().unwrap_or_default()
        );
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let dependencies = parse_extractor_output(&stdout);
    if dependencies.is_none() {
        warn!(file = %setup_py.display(), "no dependency list reported");
    }
    dependencies
}

/// Dependencies declared by the project metadata in `source_dir`
pub fn declared_dependencies(source_dir: &Path, python: &str) -> Vec<String> {
    let dependencies = pyproject_dependencies(source_dir)
        .or_else(|| setup_py_dependencies(source_dir, python))
        .unwrap_or_default();
    if !dependencies.is_empty() {
        debug!(
            dir = %source_dir.display(),
            "metadata declares: {}",
            dependencies.join(", ")
        );
    }
    dependencies
}
