//! Per-file static analysis.
//!
//! Extracts the function inventory of a single source file: names, line
//! ranges, declared parameters and a branch-counting cyclomatic complexity
//! estimate. The output is a [`FileRecord`] ready for graph construction.
//!
//! Complexity here is an estimate, not a full control-flow analysis: we
//! count branching constructs (conditionals, loops, exception handlers,
//! match/switch arms) inside the function body and add one.

use crate::error::{Result, ScanError};
use crate::record::{FileRecord, FunctionRecord};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor};

/// Analyzes individual source files with Tree-sitter.
///
/// Queries are compiled once per recognized extension and reused across
/// files, so one analyzer instance can process a whole directory walk.
pub struct FileAnalyzer {
    /// Tree-sitter parser instance, reconfigured per file.
    parser: Parser,
    /// Compiled per-extension language support.
    languages: HashMap<&'static str, LanguageSupport>,
}

/// Compiled query plus branch vocabulary for one language.
struct LanguageSupport {
    language: Language,
    /// Matches named function and method definitions.
    functions: Query,
    /// Node kinds that count toward cyclomatic complexity.
    branch_kinds: &'static [&'static str],
}

/// Extensions the analyzer recognizes, in scanner-visible form.
pub const RECOGNIZED_EXTENSIONS: &[&str] = &["py", "pyw", "rs", "js", "jsx", "ts", "tsx"];

const PYTHON_FUNCTIONS: &str = r#"
    (function_definition name: (identifier) @name) @function
"#;

const PYTHON_BRANCH_KINDS: &[&str] = &[
    "if_statement",
    "elif_clause",
    "for_statement",
    "while_statement",
    "except_clause",
    "case_clause",
    "conditional_expression",
    "boolean_operator",
];

const RUST_FUNCTIONS: &str = r#"
    (function_item name: (identifier) @name) @function
"#;

const RUST_BRANCH_KINDS: &[&str] = &[
    "if_expression",
    "match_arm",
    "while_expression",
    "for_expression",
];

const TYPESCRIPT_FUNCTIONS: &str = r#"
    (function_declaration name: (identifier) @name) @function
    (generator_function_declaration name: (identifier) @name) @function
    (method_definition name: (property_identifier) @name) @function
"#;

const TYPESCRIPT_BRANCH_KINDS: &[&str] = &[
    "if_statement",
    "for_statement",
    "for_in_statement",
    "while_statement",
    "do_statement",
    "switch_case",
    "catch_clause",
    "ternary_expression",
];

impl FileAnalyzer {
    /// Creates an analyzer with pre-compiled queries for every recognized
    /// extension.
    ///
    /// Returns an error if any language query fails to compile.
    pub fn new() -> Result<Self> {
        let parser = Parser::new();
        let mut languages = HashMap::new();

        // Queries are not Clone, so each extension gets its own compile.
        for ext in ["py", "pyw"] {
            languages.insert(
                ext,
                Self::compile(tree_sitter_python::language(), PYTHON_FUNCTIONS, PYTHON_BRANCH_KINDS)?,
            );
        }

        languages.insert(
            "rs",
            Self::compile(tree_sitter_rust::language(), RUST_FUNCTIONS, RUST_BRANCH_KINDS)?,
        );

        // Plain JS/TS parse fine with the TypeScript grammar; JSX/TSX need
        // the TSX variant.
        for ext in ["js", "ts"] {
            languages.insert(
                ext,
                Self::compile(
                    tree_sitter_typescript::language_typescript(),
                    TYPESCRIPT_FUNCTIONS,
                    TYPESCRIPT_BRANCH_KINDS,
                )?,
            );
        }
        for ext in ["jsx", "tsx"] {
            languages.insert(
                ext,
                Self::compile(
                    tree_sitter_typescript::language_tsx(),
                    TYPESCRIPT_FUNCTIONS,
                    TYPESCRIPT_BRANCH_KINDS,
                )?,
            );
        }

        Ok(Self { parser, languages })
    }

    fn compile(
        language: Language,
        functions: &str,
        branch_kinds: &'static [&'static str],
    ) -> Result<LanguageSupport> {
        let functions =
            Query::new(&language, functions).map_err(|e| ScanError::Parser(e.to_string()))?;
        Ok(LanguageSupport {
            language,
            functions,
            branch_kinds,
        })
    }

    /// Returns true if the path has a recognized source extension.
    pub fn supports(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| RECOGNIZED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false)
    }

    /// Analyzes a file on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is empty, has an
    /// unrecognized extension, or the parser fails outright. Syntax errors
    /// inside the file are tolerated; whatever parses is extracted.
    pub fn analyze_file(&mut self, path: &Path) -> Result<FileRecord> {
        let source = fs::read_to_string(path).map_err(|e| ScanError::io(path, e))?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| ScanError::UnsupportedLanguage(path.to_path_buf()))?;

        let file_path = path.to_string_lossy().to_string();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        self.analyze_source(&source, &file_path, &file_name, &ext)
    }

    /// Analyzes source text directly (also the test seam).
    pub fn analyze_source(
        &mut self,
        source: &str,
        file_path: &str,
        file_name: &str,
        ext: &str,
    ) -> Result<FileRecord> {
        if source.is_empty() {
            return Err(ScanError::EmptyFile(file_path.into()));
        }

        let support = self
            .languages
            .get(ext)
            .ok_or_else(|| ScanError::UnsupportedLanguage(file_path.into()))?;

        self.parser
            .set_language(&support.language)
            .map_err(|e| ScanError::Parser(e.to_string()))?;

        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ScanError::Parser("tree-sitter returned no tree".into()))?;

        let mut record = FileRecord::new(file_path, file_name);
        let mut cursor = QueryCursor::new();
        let matches = cursor.matches(&support.functions, tree.root_node(), source.as_bytes());

        for match_ in matches {
            let mut name: Option<&str> = None;
            let mut definition: Option<Node> = None;

            for capture in match_.captures {
                let capture_name = support.functions.capture_names()[capture.index as usize];
                match capture_name {
                    "name" => {
                        name = capture.node.utf8_text(source.as_bytes()).ok();
                    }
                    "function" => {
                        definition = Some(capture.node);
                    }
                    _ => {}
                }
            }

            if let (Some(name), Some(node)) = (name, definition) {
                record.functions.push(FunctionRecord {
                    name: name.to_string(),
                    start_line: node.start_position().row as u32 + 1,
                    end_line: node.end_position().row as u32 + 1,
                    complexity: complexity(node, support.branch_kinds),
                    parameters: parameters(node, source),
                });
            }
        }

        record.functions.sort_by_key(|f| f.start_line);
        Ok(record)
    }
}

/// Branch-counting complexity: one plus the number of branching constructs
/// in the definition's subtree.
fn complexity(node: Node, branch_kinds: &[&str]) -> u32 {
    1 + count_branches(node, branch_kinds)
}

fn count_branches(node: Node, branch_kinds: &[&str]) -> u32 {
    let mut count = 0;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if branch_kinds.contains(&child.kind()) {
            count += 1;
        }
        count += count_branches(child, branch_kinds);
    }
    count
}

/// Collects the declared parameter names of a definition node.
fn parameters(node: Node, source: &str) -> Vec<String> {
    let Some(list) = node.child_by_field_name("parameters") else {
        return Vec::new();
    };

    let mut names = Vec::new();
    let mut cursor = list.walk();
    for child in list.named_children(&mut cursor) {
        if child.kind() == "comment" {
            continue;
        }
        // Rust's receiver has no inner identifier node.
        if child.kind() == "self_parameter" {
            names.push("self".to_string());
            continue;
        }
        if let Some(name) = first_identifier(child, source) {
            names.push(name);
        }
    }
    names
}

/// Finds the first identifier-like node in a parameter subtree.
fn first_identifier(node: Node, source: &str) -> Option<String> {
    const IDENT_KINDS: &[&str] = &[
        "identifier",
        "property_identifier",
        "shorthand_property_identifier_pattern",
    ];

    if IDENT_KINDS.contains(&node.kind()) {
        return node
            .utf8_text(source.as_bytes())
            .ok()
            .map(|s| s.to_string());
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(name) = first_identifier(child, source) {
            return Some(name);
        }
    }
    None
}
