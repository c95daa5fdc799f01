// Yava - A compiler for a small Java-like language emitting JVM assembly
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Token definitions for the Yava language.

use std::fmt;

use crate::error::Position;

/// Reserved words of the language family. `true`, `false` and `null` are
/// literals and not part of this list.
pub const KEYWORDS: &[&str] = &[
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "try",
    "void",
    "volatile",
    "while",
];

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Names and literals
    /// Identifier (type, variable, field or method name).
    Identifier,
    /// Reserved word, see [`KEYWORDS`].
    Keyword,
    /// Integer literal (decimal, hex, octal or binary).
    IntegerLiteral,
    /// Floating-point literal.
    FloatingPointLiteral,
    /// Character literal.
    CharLiteral,
    /// String literal.
    StringLiteral,
    /// `true` or `false`.
    BooleanLiteral,
    /// `null`.
    NullLiteral,

    // Separators
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,

    // Arithmetic operators
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `++`
    Increment,
    /// `--`
    Decrement,

    // Relational operators
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `==`
    EqualEqual,
    /// `!=`
    NotEqual,

    // Bitwise operators
    /// `&`
    Ampersand,
    /// `|`
    Pipe,
    /// `^`
    Caret,
    /// `~`
    Tilde,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
    /// `>>>`
    UnsignedShiftRight,

    // Logical operators
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    /// `!`
    Bang,

    // Assignment operators
    /// `=`
    Assign,
    /// `+=`
    PlusAssign,
    /// `-=`
    MinusAssign,
    /// `*=`
    StarAssign,
    /// `/=`
    SlashAssign,
    /// `%=`
    PercentAssign,
    /// `&=`
    AmpersandAssign,
    /// `|=`
    PipeAssign,
    /// `^=`
    CaretAssign,
    /// `<<=`
    ShiftLeftAssign,
    /// `>>=`
    ShiftRightAssign,
    /// `>>>=`
    UnsignedShiftRightAssign,

    // Conditional operator
    /// `?`
    Question,
    /// `:`
    Colon,
}

impl TokenKind {
    /// Operators and separators with their fixed spelling, longest first.
    pub const SYMBOLS: &'static [(&'static str, TokenKind)] = &[
        (">>>=", TokenKind::UnsignedShiftRightAssign),
        (">>>", TokenKind::UnsignedShiftRight),
        ("<<=", TokenKind::ShiftLeftAssign),
        (">>=", TokenKind::ShiftRightAssign),
        ("<<", TokenKind::ShiftLeft),
        (">>", TokenKind::ShiftRight),
        ("<=", TokenKind::LessEqual),
        (">=", TokenKind::GreaterEqual),
        ("==", TokenKind::EqualEqual),
        ("!=", TokenKind::NotEqual),
        ("&&", TokenKind::AndAnd),
        ("||", TokenKind::OrOr),
        ("++", TokenKind::Increment),
        ("--", TokenKind::Decrement),
        ("+=", TokenKind::PlusAssign),
        ("-=", TokenKind::MinusAssign),
        ("*=", TokenKind::StarAssign),
        ("/=", TokenKind::SlashAssign),
        ("%=", TokenKind::PercentAssign),
        ("&=", TokenKind::AmpersandAssign),
        ("|=", TokenKind::PipeAssign),
        ("^=", TokenKind::CaretAssign),
        ("+", TokenKind::Plus),
        ("-", TokenKind::Minus),
        ("*", TokenKind::Star),
        ("/", TokenKind::Slash),
        ("%", TokenKind::Percent),
        ("<", TokenKind::Less),
        (">", TokenKind::Greater),
        ("=", TokenKind::Assign),
        ("!", TokenKind::Bang),
        ("~", TokenKind::Tilde),
        ("&", TokenKind::Ampersand),
        ("|", TokenKind::Pipe),
        ("^", TokenKind::Caret),
        ("?", TokenKind::Question),
        (":", TokenKind::Colon),
        (";", TokenKind::Semicolon),
        (",", TokenKind::Comma),
        (".", TokenKind::Dot),
        ("(", TokenKind::LeftParen),
        (")", TokenKind::RightParen),
        ("[", TokenKind::LeftBracket),
        ("]", TokenKind::RightBracket),
        ("{", TokenKind::LeftBrace),
        ("}", TokenKind::RightBrace),
    ];

    /// The fixed spelling of an operator or separator.
    pub fn symbol(&self) -> Option<&'static str> {
        Self::SYMBOLS
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(text, _)| *text)
    }

    /// Check if this kind is one of the separators.
    pub fn is_separator(&self) -> bool {
        matches!(
            self,
            TokenKind::Semicolon
                | TokenKind::Comma
                | TokenKind::Dot
                | TokenKind::LeftParen
                | TokenKind::RightParen
                | TokenKind::LeftBracket
                | TokenKind::RightBracket
                | TokenKind::LeftBrace
                | TokenKind::RightBrace
        )
    }

    /// Check if this kind is a literal.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::IntegerLiteral
                | TokenKind::FloatingPointLiteral
                | TokenKind::CharLiteral
                | TokenKind::StringLiteral
                | TokenKind::BooleanLiteral
                | TokenKind::NullLiteral
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::Keyword => write!(f, "keyword"),
            TokenKind::IntegerLiteral => write!(f, "integer literal"),
            TokenKind::FloatingPointLiteral => write!(f, "floating-point literal"),
            TokenKind::CharLiteral => write!(f, "character literal"),
            TokenKind::StringLiteral => write!(f, "string literal"),
            TokenKind::BooleanLiteral => write!(f, "boolean literal"),
            TokenKind::NullLiteral => write!(f, "null"),
            other => write!(f, "'{}'", other.symbol().unwrap_or("?")),
        }
    }
}

/// A token with its literal text and the position of its first character.
///
/// For string and character literals `text` holds the decoded value,
/// without quotes and with escapes resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token kind.
    pub kind: TokenKind,
    /// The literal text of the token.
    pub text: String,
    /// Where the token starts.
    pub position: Position,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    /// Create an operator or separator token with its fixed spelling.
    pub fn symbol(kind: TokenKind, position: Position) -> Self {
        Self::new(kind, kind.symbol().unwrap_or_default(), position)
    }

    /// Classify a scanned word as keyword, literal or identifier.
    pub fn from_word(word: String, position: Position) -> Self {
        let kind = match word.as_str() {
            "true" | "false" => TokenKind::BooleanLiteral,
            "null" => TokenKind::NullLiteral,
            w if KEYWORDS.contains(&w) => TokenKind::Keyword,
            _ => TokenKind::Identifier,
        };
        Self::new(kind, word, position)
    }

    /// Check if this token is the given keyword.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == keyword
    }

    /// Reconstruct source text that lexes back to this token.
    pub fn source_text(&self) -> String {
        match self.kind {
            TokenKind::StringLiteral => {
                let mut out = String::from("\"");
                for c in self.text.chars() {
                    push_escaped(&mut out, c, '"');
                }
                out.push('"');
                out
            }
            TokenKind::CharLiteral => {
                let mut out = String::from("'");
                for c in self.text.chars() {
                    push_escaped(&mut out, c, '\'');
                }
                out.push('\'');
                out
            }
            _ => self.text.clone(),
        }
    }
}

/// Append a character to literal source, escaping it when required.
fn push_escaped(out: &mut String, c: char, quote: char) {
    match c {
        '\u{8}' => out.push_str("\\b"),
        '\t' => out.push_str("\\t"),
        '\n' => out.push_str("\\n"),
        '\u{c}' => out.push_str("\\f"),
        '\r' => out.push_str("\\r"),
        '\\' => out.push_str("\\\\"),
        c if c == quote => {
            out.push('\\');
            out.push(c);
        }
        c => out.push(c),
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::Keyword => write!(f, "keyword '{}'", self.text),
            TokenKind::BooleanLiteral | TokenKind::NullLiteral => write!(f, "'{}'", self.text),
            TokenKind::IntegerLiteral | TokenKind::FloatingPointLiteral => {
                write!(f, "{} '{}'", self.kind, self.text)
            }
            TokenKind::CharLiteral | TokenKind::StringLiteral => {
                write!(f, "{} {}", self.kind, self.source_text())
            }
            _ => write!(f, "{}", self.kind),
        }
    }
}
