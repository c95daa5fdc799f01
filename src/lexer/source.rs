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

//! Character stream decoding that runs before tokenization.
//!
//! This module handles:
//! - Unicode escapes (`\uXXXX`, with any number of `u`)
//! - Line terminator normalization (CRLF to LF, bare CR rejected)
//! - Line and column tracking, tabs count as [`TAB_WIDTH`] columns

use crate::error::{CompileError, ErrorCode, Position, TAB_WIDTH};

/// A decoded character together with the position of its raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceChar {
    /// The decoded character.
    pub ch: char,
    /// Position of the first raw character that produced it.
    pub position: Position,
}

/// Result of decoding a source text.
#[derive(Debug, Clone, Default)]
pub struct DecodedSource {
    /// Characters decoded before the first error (or all of them).
    pub chars: Vec<SourceChar>,
    /// Position just behind the last decoded character.
    pub end: Position,
    /// First decoding error, if any. Decoding stops there.
    pub error: Option<CompileError>,
}

/// Decode the raw source into the character stream seen by the lexer.
///
/// A backslash starts a unicode escape only if it is preceded by an even
/// number of raw backslashes. Backslashes produced by an escape never
/// start another one.
pub fn decode(source: &str) -> DecodedSource {
    let raw: Vec<char> = source.chars().collect();
    let mut decoded = DecodedSource::default();
    let mut line = 1;
    let mut column = 0;
    let mut backslash_run = 0usize;
    let mut i = 0;

    while i < raw.len() {
        let position = Position::new(line, column);
        let c = raw[i];

        if c == '\\' && backslash_run % 2 == 0 && raw.get(i + 1) == Some(&'u') {
            let mut j = i + 1;
            while raw.get(j) == Some(&'u') {
                j += 1;
            }

            let digits: String = raw[j..].iter().take(4).collect();
            let value = if digits.len() == 4 && digits.chars().all(|d| d.is_ascii_hexdigit()) {
                u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32)
            } else {
                None
            };

            let Some(ch) = value else {
                decoded.error = Some(
                    CompileError::new(
                        ErrorCode::InvalidUnicodeEscape,
                        "Invalid unicode escape",
                        position,
                    )
                    .with_hint("A unicode escape needs exactly 4 hexadecimal digits, e.g. \\u0041"),
                );
                break;
            };

            let raw_len = j + 4 - i;
            decoded.chars.push(SourceChar { ch, position });
            column += raw_len;
            backslash_run = 0;
            i += raw_len;
            continue;
        }

        match c {
            '\r' => {
                if raw.get(i + 1) != Some(&'\n') {
                    decoded.error = Some(
                        CompileError::new(
                            ErrorCode::InvalidLineTerminator,
                            "Carriage return must be followed by a line feed",
                            position,
                        )
                        .with_hint("Use LF or CRLF line endings"),
                    );
                    break;
                }
                decoded.chars.push(SourceChar { ch: '\n', position });
                line += 1;
                column = 0;
                i += 2;
            }
            '\n' => {
                decoded.chars.push(SourceChar { ch: c, position });
                line += 1;
                column = 0;
                i += 1;
            }
            '\t' => {
                decoded.chars.push(SourceChar { ch: c, position });
                column += TAB_WIDTH;
                i += 1;
            }
            _ => {
                decoded.chars.push(SourceChar { ch: c, position });
                column += 1;
                i += 1;
            }
        }

        backslash_run = if c == '\\' { backslash_run + 1 } else { 0 };
    }

    decoded.end = Position::new(line, column);
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(decoded: &DecodedSource) -> String {
        decoded.chars.iter().map(|c| c.ch).collect()
    }

    #[test]
    fn test_plain_text() {
        let decoded = decode("ab\ncd");
        assert!(decoded.error.is_none());
        assert_eq!(text(&decoded), "ab\ncd");
        assert_eq!(decoded.chars[3].position, Position::new(2, 0));
        assert_eq!(decoded.end, Position::new(2, 2));
    }

    #[test]
    fn test_tab_width() {
        let decoded = decode("\tx");
        assert_eq!(decoded.chars[1].position, Position::new(1, 4));
    }

    #[test]
    fn test_crlf_is_one_newline() {
        let decoded = decode("a\r\nb");
        assert_eq!(text(&decoded), "a\nb");
        assert_eq!(decoded.chars[2].position, Position::new(2, 0));
    }

    #[test]
    fn test_bare_cr_is_error() {
        let decoded = decode("a\rb");
        let error = decoded.error.expect("expected error");
        assert_eq!(error.code, ErrorCode::InvalidLineTerminator);
        assert_eq!(error.position, Position::new(1, 1));
    }

    #[test]
    fn test_unicode_escape() {
        let decoded = decode("\\u0041\\uuu0042");
        assert!(decoded.error.is_none());
        assert_eq!(text(&decoded), "AB");
        assert_eq!(decoded.chars[1].position, Position::new(1, 6));
    }

    #[test]
    fn test_escaped_backslash_is_not_reexamined() {
        // the decoded backslash must not start another escape
        let decoded = decode("\\u005cu0041");
        assert!(decoded.error.is_none());
        assert_eq!(text(&decoded), "\\u0041");
    }

    #[test]
    fn test_even_backslash_rule() {
        let decoded = decode("\\\\u0041");
        assert!(decoded.error.is_none());
        assert_eq!(text(&decoded), "\\\\u0041");
    }

    #[test]
    fn test_short_escape_is_error() {
        let decoded = decode("x\\u12G4");
        let error = decoded.error.as_ref().expect("expected error");
        assert_eq!(error.code, ErrorCode::InvalidUnicodeEscape);
        assert_eq!(error.position, Position::new(1, 1));
        assert_eq!(text(&decoded), "x");
    }
}
