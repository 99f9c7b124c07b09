//! Numeric-aware string ordering for barcodes and location codes.
//!
//! Runs of ASCII digits compare by numeric value, so `A2 < A10`. Letters
//! compare case-insensitively, punctuation sorts before digits and digits
//! before letters. Strings that compare equal under these rules fall back
//! to plain byte order so the result is a total order.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::CharIndices;

#[derive(Debug, Clone, Copy)]
enum Token<'a> {
    Symbol(char),
    Number(&'a str),
    Letter(char),
}

impl Token<'_> {
    fn rank(&self) -> u8 {
        match self {
            Token::Symbol(_) => 0,
            Token::Number(_) => 1,
            Token::Letter(_) => 2,
        }
    }
}

struct Tokens<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Tokens<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (start, c) = self.chars.next()?;
        if c.is_ascii_digit() {
            let mut end = start + 1;
            while let Some(&(idx, d)) = self.chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                end = idx + 1;
                self.chars.next();
            }
            return Some(Token::Number(&self.source[start..end]));
        }
        if c.is_alphabetic() {
            Some(Token::Letter(c))
        } else {
            Some(Token::Symbol(c))
        }
    }
}

fn compare_numbers(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn compare_letters(a: char, b: char) -> Ordering {
    a.to_lowercase().cmp(b.to_lowercase())
}

fn compare_tokens(a: Token<'_>, b: Token<'_>) -> Ordering {
    match (a, b) {
        (Token::Number(x), Token::Number(y)) => compare_numbers(x, y),
        (Token::Letter(x), Token::Letter(y)) => compare_letters(x, y),
        (Token::Symbol(x), Token::Symbol(y)) => x.cmp(&y),
        _ => a.rank().cmp(&b.rank()),
    }
}

/// Compare two strings in natural order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Tokens::new(a);
    let mut right = Tokens::new(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match compare_tokens(x, y) {
                Ordering::Equal => continue,
                other => return other,
            },
        }
    }
}
