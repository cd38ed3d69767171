//! SQL syntax highlighting
//!
//! Line-by-line tokenizer for the query editor. Keywords are loaded from
//! `data/sql_keywords.txt` (embedded at compile time via `include_str!()`).
//!
//! Tokenizing is total: every character of the input lands in exactly one
//! token, so concatenating the token texts gives back the line.

use crate::ui::theme::Theme;
use ratatui::text::Span;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Token classification for syntax highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Number,
    String,
    Comment,
    Symbol,
}

/// A classified slice of a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    fn new(kind: TokenKind, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
        }
    }
}

/// SQL keywords from `data/sql_keywords.txt`, embedded at compile time.
static SQL_KEYWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    include_str!("../../data/sql_keywords.txt")
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
});

/// Single-character tokens that also end a pending word
const SYMBOLS: &[char] = &[
    '(', ')', '{', '}', '[', ']', ',', '.', ';', '+', '-', '/', '*', '=', '<', '>', '&',
];

pub fn is_keyword(word: &str) -> bool {
    SQL_KEYWORDS.contains(word.to_ascii_uppercase().as_str())
}

/// Tokenize a single line.
///
/// Words are flushed at whitespace, symbols and quotes, then classified
/// keyword > number > identifier. Each whitespace or symbol character is its
/// own `Symbol` token. A quote runs to the matching quote of the same kind,
/// or to end of line. `--` outside a string comments out the rest.
pub fn tokenize(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;
    let mut chars = line.char_indices();

    while let Some((i, c)) = chars.next() {
        // ── Line comment: -- to end of line ──────────────────
        if c == '-' && line[i + 1..].starts_with('-') {
            flush_word(line, &mut word_start, i, &mut tokens);
            tokens.push(Token::new(TokenKind::Comment, &line[i..]));
            return tokens;
        }

        // ── String literal ───────────────────────────────────
        if c == '\'' || c == '"' {
            flush_word(line, &mut word_start, i, &mut tokens);
            let mut end = line.len();
            for (j, d) in chars.by_ref() {
                if d == c {
                    end = j + d.len_utf8();
                    break;
                }
            }
            tokens.push(Token::new(TokenKind::String, &line[i..end]));
            continue;
        }

        // ── Delimiters ───────────────────────────────────────
        if c.is_whitespace() || SYMBOLS.contains(&c) {
            flush_word(line, &mut word_start, i, &mut tokens);
            tokens.push(Token::new(TokenKind::Symbol, &line[i..i + c.len_utf8()]));
            continue;
        }

        word_start.get_or_insert(i);
    }

    flush_word(line, &mut word_start, line.len(), &mut tokens);
    tokens
}

fn flush_word(line: &str, start: &mut Option<usize>, end: usize, tokens: &mut Vec<Token>) {
    if let Some(s) = start.take() {
        let word = &line[s..end];
        tokens.push(Token::new(classify_word(word), word));
    }
}

fn classify_word(word: &str) -> TokenKind {
    if is_keyword(word) {
        TokenKind::Keyword
    } else if word.bytes().all(|b| b.is_ascii_digit()) {
        TokenKind::Number
    } else {
        TokenKind::Identifier
    }
}

/// Tokenize a line and style each token with the theme
pub fn highlight_line(line: &str, theme: &Theme) -> Vec<Span<'static>> {
    tokenize(line)
        .into_iter()
        .map(|token| Span::styled(token.text, theme.token_style(token.kind)))
        .collect()
}
