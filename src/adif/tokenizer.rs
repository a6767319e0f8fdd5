//! ADI text tokenizer.
//!
//! Splits `<name:len[:type]>data` fields into [`RawRecord`]s. Lengths count
//! characters, so multi-byte data in `_intl` fields is taken whole.

use super::{AdifDocument, AdifError, record::RawRecord, split_header};

enum Token<'a> {
    Field { name: &'a str, value: &'a str },
    EndOfRecord,
    EndOfHeader,
}

struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    base: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str, base: usize) -> Self {
        Self { text, pos: 0, base }
    }

    fn next_token(&mut self) -> Result<Option<Token<'a>>, AdifError> {
        loop {
            let Some(rel) = self.text[self.pos..].find('<') else {
                self.pos = self.text.len();
                return Ok(None);
            };
            let open = self.pos + rel;
            let offset = self.base + open;
            let close = self.text[open..]
                .find('>')
                .map(|r| open + r)
                .ok_or(AdifError::UnterminatedTag { offset })?;
            let markup = &self.text[open + 1..close];
            self.pos = close + 1;

            let mut parts = markup.splitn(3, ':');
            let name = parts.next().unwrap_or_default().trim();
            let Some(len_text) = parts.next() else {
                if name.eq_ignore_ascii_case("eor") {
                    return Ok(Some(Token::EndOfRecord));
                }
                if name.eq_ignore_ascii_case("eoh") {
                    return Ok(Some(Token::EndOfHeader));
                }
                // Bare markup without a length carries no data.
                continue;
            };

            let len: usize = len_text.trim().parse().map_err(|_| AdifError::InvalidLength {
                tag: name.to_ascii_lowercase(),
                value: len_text.to_string(),
                offset,
            })?;
            let value = self.take_chars(len).ok_or_else(|| AdifError::Truncated {
                tag: name.to_ascii_lowercase(),
                offset,
            })?;
            return Ok(Some(Token::Field { name, value }));
        }
    }

    fn take_chars(&mut self, n: usize) -> Option<&'a str> {
        let rest = &self.text[self.pos..];
        let end = if n == 0 {
            0
        } else {
            let (idx, ch) = rest.char_indices().nth(n - 1)?;
            idx + ch.len_utf8()
        };
        self.pos += end;
        Some(&rest[..end])
    }
}

/// Tokenizes ADI text into a header and ordered records.
pub fn tokenize(text: &str) -> Result<AdifDocument, AdifError> {
    let (header_text, body_start) = split_header(text);

    let mut header = RawRecord::new();
    if let Some(header_text) = header_text {
        let mut scanner = Scanner::new(header_text, 0);
        while let Some(token) = scanner.next_token()? {
            if let Token::Field { name, value } = token {
                header.insert(name, value);
            }
        }
    }

    let mut records = Vec::new();
    let mut current = RawRecord::new();
    let mut scanner = Scanner::new(&text[body_start..], body_start);
    while let Some(token) = scanner.next_token()? {
        match token {
            Token::Field { name, value } => current.insert(name, value),
            Token::EndOfRecord => {
                if !current.is_empty() {
                    records.push(std::mem::take(&mut current));
                }
            }
            Token::EndOfHeader => {}
        }
    }
    if !current.is_empty() {
        records.push(current);
    }

    Ok(AdifDocument { header, records })
}
