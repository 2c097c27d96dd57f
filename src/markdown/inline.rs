//! Inline span parsing
//!
//! A single left-to-right scan over one line of text. Delimiters that
//! never close before the end of the line are kept as literal text; the
//! parser has no state that outlives the line.
//!
//! A run of three or more asterisks is read bold first: the extra
//! asterisks stay literal, so `***x***` is `*`, bold `x`, `*`.

/// Piece of inline content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSpan {
    Plain(String),
    Code(String),
    Bold(String),
    Italic(String),
    Link { text: String, url: String },
}

impl InlineSpan {
    /// Visible text of the span, delimiters removed
    pub fn text(&self) -> &str {
        match self {
            InlineSpan::Plain(s)
            | InlineSpan::Code(s)
            | InlineSpan::Bold(s)
            | InlineSpan::Italic(s) => s,
            InlineSpan::Link { text, .. } => text,
        }
    }
}

/// Outcome of trying a delimiter at the current position
enum Scan {
    /// Parsed span and the bytes it consumed
    Span(InlineSpan, usize),
    /// Not a span: keep this many bytes as literal text
    Literal(usize),
}

/// Split one line of text into styled spans
pub fn inline(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        let scan = match rest.as_bytes()[0] {
            b'`' => code_span(rest),
            b'*' => emphasis(rest),
            b'[' => link(rest),
            _ => Scan::Literal(rest.chars().next().map_or(1, char::len_utf8)),
        };

        match scan {
            Scan::Span(span, consumed) => {
                if !plain.is_empty() {
                    spans.push(InlineSpan::Plain(std::mem::take(&mut plain)));
                }
                spans.push(span);
                pos += consumed;
            }
            Scan::Literal(len) => {
                plain.push_str(&rest[..len]);
                pos += len;
            }
        }
    }

    if !plain.is_empty() {
        spans.push(InlineSpan::Plain(plain));
    }
    spans
}

fn code_span(rest: &str) -> Scan {
    match rest[1..].find('`') {
        Some(0) | None => Scan::Literal(1),
        Some(end) => Scan::Span(InlineSpan::Code(rest[1..1 + end].to_string()), end + 2),
    }
}

fn emphasis(rest: &str) -> Scan {
    let run = rest.bytes().take_while(|&b| b == b'*').count();
    match run {
        1 => italic(rest),
        2 => bold(rest),
        _ => Scan::Literal(run - 2),
    }
}

fn bold(rest: &str) -> Scan {
    match rest[2..].find("**") {
        Some(0) | None => Scan::Literal(2),
        Some(end) => Scan::Span(InlineSpan::Bold(rest[2..2 + end].to_string()), end + 4),
    }
}

fn italic(rest: &str) -> Scan {
    let bytes = rest.as_bytes();
    if bytes.len() < 3 || bytes[1].is_ascii_whitespace() {
        return Scan::Literal(1);
    }

    // Closer must be a lone asterisk that does not follow whitespace
    for (offset, _) in rest.match_indices('*').skip(1) {
        let before = bytes[offset - 1];
        let after = bytes.get(offset + 1).copied();
        if before == b'*' || after == Some(b'*') || before.is_ascii_whitespace() {
            continue;
        }
        return Scan::Span(InlineSpan::Italic(rest[1..offset].to_string()), offset + 1);
    }
    Scan::Literal(1)
}

fn link(rest: &str) -> Scan {
    let Some(close) = rest.find("](") else {
        return Scan::Literal(1);
    };
    let Some(url_len) = rest[close + 2..].find(')') else {
        return Scan::Literal(1);
    };

    let text = &rest[1..close];
    let url = &rest[close + 2..close + 2 + url_len];
    if text.is_empty() || url.is_empty() || text.contains('[') {
        return Scan::Literal(1);
    }

    let span = InlineSpan::Link {
        text: text.to_string(),
        url: url.to_string(),
    };
    Scan::Span(span, close + 3 + url_len)
}
