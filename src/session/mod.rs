// Analysis sessions: the tokenize → parse → render pipeline and its history

use crate::parser::ast::Program;
use crate::parser::lexer::{tokenize, LexWarning, Token};
use crate::parser::parse::{parse, ParseError};
use crate::parser::profile::Profile;
use crate::parser::validate::{check_program, Diagnostic};
use crate::render::{outline, render};
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// Number of analyses the shell keeps by default
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// Number of transcript lines the shell keeps by default
pub const DEFAULT_TRANSCRIPT_CAPACITY: usize = 4096;

/// Everything produced from one line of input
#[derive(Debug, Clone)]
pub struct Analysis {
    pub source: String,
    pub profile: Profile,
    pub tokens: Vec<Token>,
    pub warnings: Vec<LexWarning>,
    pub outcome: Result<Program, ParseError>,
    /// Canonical text, present when parsing succeeded
    pub rendering: Option<String>,
    pub notes: Vec<Diagnostic>,
}

/// Tokenize, parse, render and validate `source` under `profile`
#[instrument(level = "debug", skip(source), fields(len = source.len()))]
pub fn analyze(source: &str, profile: Profile) -> Analysis {
    let lexed = tokenize(source, profile);
    let outcome = parse(&lexed.tokens, profile);

    let (rendering, notes) = match &outcome {
        Ok(program) => (Some(render(program)), check_program(program)),
        Err(_) => (None, Vec::new()),
    };

    debug!(
        tokens = lexed.tokens.len(),
        warnings = lexed.warnings.len(),
        ok = outcome.is_ok(),
        notes = notes.len(),
        "analyzed"
    );

    Analysis {
        source: source.to_string(),
        profile,
        tokens: lexed.tokens,
        warnings: lexed.warnings,
        outcome,
        rendering,
        notes,
    }
}

impl Analysis {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn program(&self) -> Option<&Program> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ParseError> {
        self.outcome.as_ref().err()
    }

    /// The token listing, one `Token: KIND, Value: v` line per token
    pub fn token_lines(&self) -> Vec<String> {
        self.tokens
            .iter()
            .map(|t| format!("Token: {}, Value: {}", t.kind.name(), t.value_text()))
            .collect()
    }

    /// Indented syntax tree, empty when parsing failed
    pub fn tree_lines(&self) -> Vec<String> {
        self.program().map(outline).unwrap_or_default()
    }

    /// Full report: token listing with warnings in source order, then the
    /// parse result
    pub fn report_lines(&self) -> Vec<String> {
        let mut entries: Vec<(usize, String)> = self
            .tokens
            .iter()
            .map(|t| t.location.offset)
            .zip(self.token_lines())
            .collect();
        entries.extend(
            self.warnings
                .iter()
                .map(|w| (w.location().offset, w.to_string())),
        );
        // Stable: a warning at a token's offset stays after it
        entries.sort_by_key(|(offset, _)| *offset);

        let mut lines: Vec<String> = entries.into_iter().map(|(_, line)| line).collect();
        lines.push("Parsing code...".to_string());

        match &self.outcome {
            Ok(program) if program.statements.is_empty() => {
                lines.push("Parsed: (empty program)".to_string());
            }
            Ok(program) => {
                for stmt in &program.statements {
                    lines.push(format!("Parsed: {}", stmt));
                }
                for note in &self.notes {
                    lines.push(format!("Note: {}", note));
                }
            }
            Err(err) => lines.push(err.to_string()),
        }

        lines
    }
}

/// Output lines of the most recent analyses, oldest lines dropped first
#[derive(Debug, Clone)]
pub struct Transcript {
    lines: Vec<String>,
    max_lines: usize,
}

impl Transcript {
    pub fn new() -> Self {
        Self::bounded(DEFAULT_TRANSCRIPT_CAPACITY)
    }

    /// A transcript that keeps at most `max_lines` lines
    pub fn bounded(max_lines: usize) -> Self {
        Transcript {
            lines: Vec::new(),
            max_lines,
        }
    }

    /// Echo the input line, then append the analysis report
    pub fn record(&mut self, analysis: &Analysis) {
        self.lines
            .push(format!("[{}] > {}", analysis.profile, analysis.source));
        self.lines.extend(analysis.report_lines());

        if self.lines.len() > self.max_lines {
            let excess = self.lines.len() - self.max_lines;
            self.lines.drain(..excess);
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

/// Bounded history of analyses, oldest evicted first
#[derive(Debug)]
pub struct History {
    entries: VecDeque<Analysis>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        History {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Add an analysis, returning the one evicted to make room
    pub fn push(&mut self, analysis: Analysis) -> Option<Analysis> {
        if self.capacity == 0 {
            return Some(analysis);
        }
        let evicted = if self.entries.len() == self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(analysis);
        evicted
    }

    /// Most recent analysis
    pub fn latest(&self) -> Option<&Analysis> {
        self.entries.back()
    }

    /// Analysis by age, 0 being the oldest kept
    pub fn get(&self, index: usize) -> Option<&Analysis> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Analysis> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
