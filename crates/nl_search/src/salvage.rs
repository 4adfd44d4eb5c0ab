//! Best-effort recovery of article candidates from model output that
//! failed strict JSON parsing. A single-pass tolerant scanner walks the
//! raw text, delimits object-like spans, and collects their string and
//! string-array fields without caring about field order. A span only
//! becomes a candidate once its closing brace is seen and it carries a
//! non-empty title, source and url, so an unterminated trailing object
//! is dropped rather than guessed at.

use crate::normalize::RawArticle;

/// Hard cap on recovered candidates per response.
pub const SALVAGE_CAP: usize = 4;

/// Scan `text` for article-shaped objects, in order of appearance, up to
/// `cap`. Nested objects (e.g. inside an `articles` array) are found too.
pub fn scan_articles(text: &str, cap: usize) -> Vec<RawArticle> {
    let mut out = Vec::new();
    let mut pos = 0;
    while out.len() < cap && pos < text.len() {
        let Some(offset) = text[pos..].find('{') else {
            break;
        };
        let start = pos + offset;
        let mut scanner = Scanner { text, pos: start };
        let _ = scanner.object(cap, &mut out);
        // Resume after whatever the scanner consumed, even on a bailout,
        // so completed inner objects are not collected twice.
        pos = scanner.pos.max(start + 1);
    }
    out
}

struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl Scanner<'_> {
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws_and_commas(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == ',' {
                self.bump();
            } else {
                break;
            }
        }
    }

    /// Cursor on the opening quote. Backslash escapes are handled
    /// tolerantly; unknown escapes keep the escaped character.
    fn string(&mut self) -> Option<String> {
        self.bump()?;
        let mut out = String::new();
        loop {
            match self.bump()? {
                '"' => return Some(out),
                '\\' => match self.bump()? {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    other => out.push(other),
                },
                other => out.push(other),
            }
        }
    }

    /// Consume a bare scalar (number, bool, null) up to the next delimiter.
    fn scalar(&mut self) {
        while let Some(c) = self.peek() {
            if c == ',' || c == '}' || c == ']' {
                break;
            }
            self.bump();
        }
    }

    /// Cursor on `[`. Returns the string elements; objects found inside
    /// feed the candidate list directly.
    fn array(&mut self, cap: usize, out: &mut Vec<RawArticle>) -> Option<Vec<String>> {
        self.bump()?;
        let mut items = Vec::new();
        loop {
            self.skip_ws_and_commas();
            match self.peek()? {
                ']' => {
                    self.bump();
                    return Some(items);
                }
                '"' => items.push(self.string()?),
                '{' => {
                    self.object(cap, out)?;
                }
                '[' => {
                    self.array(cap, out)?;
                }
                _ => self.scalar(),
            }
        }
    }

    /// Cursor on `{`. Collects the object's own fields; a closed object
    /// with non-empty title, source and url becomes a candidate. Returns
    /// None when the text runs out or stops looking object-like.
    fn object(&mut self, cap: usize, out: &mut Vec<RawArticle>) -> Option<()> {
        self.bump()?;
        let mut candidate = RawArticle::default();
        loop {
            self.skip_ws_and_commas();
            match self.peek()? {
                '}' => {
                    self.bump();
                    if is_candidate(&candidate) && out.len() < cap {
                        out.push(candidate);
                    }
                    return Some(());
                }
                '"' => {
                    let key = self.string()?;
                    self.skip_ws_and_commas();
                    if self.peek()? != ':' {
                        return None;
                    }
                    self.bump();
                    self.skip_ws_and_commas();
                    match self.peek()? {
                        '"' => {
                            let value = self.string()?;
                            assign_string(&mut candidate, &key, value);
                        }
                        '[' => {
                            let values = self.array(cap, out)?;
                            assign_array(&mut candidate, &key, values);
                        }
                        '{' => {
                            self.object(cap, out)?;
                        }
                        _ => self.scalar(),
                    }
                }
                _ => return None,
            }
        }
    }
}

fn is_candidate(candidate: &RawArticle) -> bool {
    !candidate.title.trim().is_empty()
        && !candidate.source.trim().is_empty()
        && !candidate.url.trim().is_empty()
}

fn assign_string(candidate: &mut RawArticle, key: &str, value: String) {
    match key {
        "title" => candidate.title = value,
        "source" => candidate.source = value,
        "url" => candidate.url = value,
        "publishedDate" => candidate.published_date = value,
        "mainClaim" => candidate.main_claim = value,
        "summary" => candidate.summary = value,
        _ => {}
    }
}

fn assign_array(candidate: &mut RawArticle, key: &str, values: Vec<String>) {
    match key {
        "keywords" => candidate.keywords = values,
        "evidence" => candidate.evidence = values,
        _ => {}
    }
}
