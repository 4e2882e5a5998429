//! AST parser for JavaScript and TypeScript test files
//!
//! Wraps swc's parser with syntax auto-detection and keeps the source map
//! around so analyzer spans can be turned back into line/column positions.
//! A parser owns every source it has parsed; use one per file.

use crate::error::{Error, Result};
use crate::models::Location;
use std::path::Path;

use swc_core::common::{sync::Lrc, FileName, FilePathMapping, SourceMap, Span, Spanned};
use swc_core::ecma::ast::Module;
use swc_core::ecma::parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

/// AST parser with TypeScript and JSX support
pub struct AstParser {
    source_map: Lrc<SourceMap>,
}

impl AstParser {
    /// Create a new AST parser
    pub fn new() -> Self {
        Self {
            source_map: Lrc::new(SourceMap::new(FilePathMapping::empty())),
        }
    }

    /// Parse a test file into a module
    ///
    /// Automatically detects the syntax based on file extension:
    /// - `.ts`, `.mts`, `.cts` → TypeScript
    /// - `.tsx` → TypeScript with JSX
    /// - `.jsx` → JavaScript with JSX
    /// - `.js` or other → JavaScript
    pub fn parse(&self, code: &str, path: &Path) -> Result<Module> {
        use swc_core::common::GLOBALS;

        GLOBALS.set(&Default::default(), || {
            let syntax = self.detect_syntax(path);

            let source_file = self
                .source_map
                .new_source_file(FileName::Real(path.to_path_buf()).into(), code.to_string());

            let input = StringInput::from(&*source_file);
            let mut parser = Parser::new(syntax, input, None);

            parser.parse_module().map_err(|e| Error::Parse {
                path: path.to_path_buf(),
                message: format!("{} at {}", e.kind().msg(), self.locate(e.span())),
            })
        })
    }

    /// Resolve the start of `span` to a 1-based line and column
    pub fn locate(&self, span: Span) -> Location {
        let loc = self.source_map.lookup_char_pos(span.lo);
        Location {
            line: loc.line,
            column: loc.col_display + 1,
        }
    }

    /// Detect syntax mode based on file extension
    fn detect_syntax(&self, path: &Path) -> Syntax {
        match path.extension().and_then(|s| s.to_str()) {
            Some("ts") | Some("mts") | Some("cts") => Syntax::Typescript(TsSyntax {
                tsx: false,
                decorators: true,
                no_early_errors: true,
                ..Default::default()
            }),
            Some("tsx") => Syntax::Typescript(TsSyntax {
                tsx: true,
                decorators: true,
                no_early_errors: true,
                ..Default::default()
            }),
            Some("jsx") => Syntax::Es(EsSyntax {
                jsx: true,
                ..Default::default()
            }),
            _ => Syntax::Es(EsSyntax {
                jsx: false,
                ..Default::default()
            }),
        }
    }
}

impl Default for AstParser {
    fn default() -> Self {
        Self::new()
    }
}
