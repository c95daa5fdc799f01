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

//! Fuzz target for the Yava lexer.
//!
//! Feeds random text to the lexer. Whatever lexes must lex again, to the
//! same tokens, from its reconstructed source text.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_lexer
//!
//! Run for a specific duration:
//!   cargo +nightly fuzz run fuzz_lexer -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(tokens) = yava::lexer::tokenize(source) else {
        return;
    };

    let rebuilt: Vec<String> = tokens.iter().map(|t| t.source_text()).collect();
    let relexed = yava::lexer::tokenize(&rebuilt.join(" ")).expect("rebuilt source must lex");

    assert_eq!(tokens.len(), relexed.len());
    for (a, b) in tokens.iter().zip(&relexed) {
        assert_eq!((a.kind, &a.text), (b.kind, &b.text));
    }
});
