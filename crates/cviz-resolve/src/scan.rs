#![forbid(unsafe_code)]

//! Description scanners: small total functions that pull structure out of
//! semi-structured step descriptions.
//!
//! Each scanner is a single pass over the char stream with an explicit
//! cursor. No scanner panics or allocates beyond its result; all are pure,
//! so resolving the same text twice yields identical output.

use cviz_core::Cell;

/// Quote characters accepted around a single-character subject.
const QUOTES: &[char] = &['\'', '"', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}'];

/// Extract single quoted characters: a quote, exactly one non-quote char,
/// a closing quote. Multi-char quoted runs are skipped, not truncated.
#[must_use]
pub fn quoted_chars(text: &str) -> Vec<char> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if QUOTES.contains(&chars[i]) {
            // Candidate: quote, one char, quote.
            if i + 2 < chars.len() && !QUOTES.contains(&chars[i + 1]) && QUOTES.contains(&chars[i + 2])
            {
                out.push(chars[i + 1]);
                i += 3;
                continue;
            }
        }
        i += 1;
    }
    out
}

/// Extract cell pairs anchored to a preceding quoted character: a quoted
/// single char followed, possibly after filler words, by a parenthesized
/// pair — `'H' is at (1, 2)`. Each quoted char anchors at most one pair; a
/// later quoted char replaces an unconsumed anchor. Pairs with no anchor in
/// front of them are not returned.
#[must_use]
pub fn anchored_pairs(text: &str) -> Vec<Cell> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    let mut anchored = false;
    let mut i = 0;
    while i < chars.len() {
        if QUOTES.contains(&chars[i])
            && i + 2 < chars.len()
            && !QUOTES.contains(&chars[i + 1])
            && QUOTES.contains(&chars[i + 2])
        {
            anchored = true;
            i += 3;
            continue;
        }
        if chars[i] == '(' {
            if let Some((cell, next)) = parse_pair(&chars, i + 1) {
                if anchored {
                    out.push(cell);
                    anchored = false;
                }
                i = next;
                continue;
            }
        }
        i += 1;
    }
    out
}

/// Extract every parenthesized integer pair: `(` digits `,` digits `)`,
/// with optional ASCII whitespace around each token, anchored or not.
/// Anything else inside the parentheses disqualifies the candidate.
#[must_use]
pub fn cell_pairs(text: &str) -> Vec<Cell> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '(' {
            if let Some((cell, next)) = parse_pair(&chars, i + 1) {
                out.push(cell);
                i = next;
                continue;
            }
        }
        i += 1;
    }
    out
}

/// Parse `digits , digits )` starting at `start`. Returns the cell and the
/// index one past the closing paren.
fn parse_pair(chars: &[char], start: usize) -> Option<(Cell, usize)> {
    let mut i = start;
    let (row, next) = parse_int(chars, i)?;
    i = next;
    i = skip_ws(chars, i);
    if chars.get(i) != Some(&',') {
        return None;
    }
    i += 1;
    let (col, next) = parse_int(chars, i)?;
    i = next;
    i = skip_ws(chars, i);
    if chars.get(i) != Some(&')') {
        return None;
    }
    Some((Cell::new(row, col), i + 1))
}

fn skip_ws(chars: &[char], mut i: usize) -> usize {
    while chars.get(i).is_some_and(|c| c.is_ascii_whitespace()) {
        i += 1;
    }
    i
}

/// Parse an unsigned decimal integer (bounded to avoid overflow on
/// adversarial input). Returns the value and the index past the last digit.
fn parse_int(chars: &[char], start: usize) -> Option<(i32, usize)> {
    let mut i = skip_ws(chars, start);
    let digits_start = i;
    let mut value: i32 = 0;
    while let Some(c) = chars.get(i) {
        let Some(d) = c.to_digit(10) else { break };
        value = value.checked_mul(10)?.checked_add(d as i32)?;
        i += 1;
    }
    if i == digits_start { None } else { Some((value, i)) }
}

/// Whether the text contains a transformation arrow (`->`, `=>`, or `→`).
#[must_use]
pub fn has_arrow(text: &str) -> bool {
    text.contains("->") || text.contains("=>") || text.contains('→')
}

/// Split the text at the first arrow marker. `None` when there is no arrow.
#[must_use]
pub fn split_at_arrow(text: &str) -> Option<(&str, &str)> {
    for marker in ["->", "=>", "→"] {
        if let Some(pos) = text.find(marker) {
            return Some((&text[..pos], &text[pos + marker.len()..]));
        }
    }
    None
}
