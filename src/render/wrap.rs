//! Width-aware word wrapping of styled text
//!
//! Input is a list of styled segments; output is one string per screen
//! line. Each line is encoded on its own, so every styled run is closed
//! with a reset before the line ends.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::{Segment, Style};

/// Display width of a run of segments
pub fn segments_width(segments: &[Segment]) -> usize {
    segments.iter().map(|s| s.text.width()).sum()
}

/// Encode segments as text with SGR escapes
///
/// Neighbours with the same style share one escape and one reset.
pub fn to_ansi(segments: &[Segment]) -> String {
    let mut out = String::new();
    let mut rest = segments;
    while let Some(first) = rest.first() {
        let run = rest.iter().take_while(|s| s.style == first.style).count();
        let text: String = rest[..run].iter().map(|s| s.text.as_str()).collect();
        out.push_str(&first.style.paint(&text));
        rest = &rest[run..];
    }
    out
}

/// A word or a whitespace run, carrying its style
struct Atom<'a> {
    text: &'a str,
    style: Style,
    width: usize,
    space: bool,
}

fn atom(text: &str, style: Style, space: bool) -> Atom<'_> {
    Atom {
        text,
        style,
        width: text.width(),
        space,
    }
}

fn atoms(segments: &[Segment]) -> Vec<Atom<'_>> {
    let mut out = Vec::new();
    for segment in segments {
        let text = segment.text.as_str();
        let mut start = 0;
        let mut kind: Option<bool> = None;
        for (i, c) in text.char_indices() {
            let space = c.is_whitespace();
            if kind.is_some_and(|k| k != space) {
                out.push(atom(&text[start..i], segment.style, !space));
                start = i;
            }
            kind = Some(space);
        }
        if let Some(space) = kind {
            out.push(atom(&text[start..], segment.style, space));
        }
    }
    out
}

/// Lines being assembled
struct Lines<'p> {
    done: Vec<String>,
    current: Vec<Segment>,
    used: usize,
    /// Width taken by the prefix of the current line
    base: usize,
    width: usize,
    continuation: &'p [Segment],
}

impl<'p> Lines<'p> {
    fn push(&mut self, text: &str, style: Style, width: usize) {
        match self.current.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.current.push(Segment::new(text, style)),
        }
        self.used += width;
    }

    fn is_empty(&self) -> bool {
        self.used == self.base
    }

    fn room(&self) -> usize {
        self.width.saturating_sub(self.used)
    }

    fn break_line(&mut self) {
        self.done.push(to_ansi(&self.current));
        self.current = self.continuation.to_vec();
        self.base = segments_width(self.continuation);
        self.used = self.base;
    }

    /// Hard-split a word that is wider than a line, filling each line to the edge
    fn split_word(&mut self, mut text: &str, style: Style) {
        while !text.is_empty() {
            let mut taken = 0;
            let mut split = 0;
            for (i, c) in text.char_indices() {
                let w = c.width().unwrap_or(0);
                // An empty line always takes at least one character
                if taken + w > self.room() && (split > 0 || !self.is_empty()) {
                    break;
                }
                taken += w;
                split = i + c.len_utf8();
            }
            if split == 0 {
                self.break_line();
                continue;
            }
            self.push(&text[..split], style, taken);
            text = &text[split..];
        }
    }
}

/// Wrap `body` to `width` columns
///
/// `prefix` starts the first line and `continuation` every following
/// line. A body that fits is returned as a single, unaltered line.
/// Whitespace at a break is dropped.
pub fn wrap(prefix: &[Segment], body: &[Segment], continuation: &[Segment], width: usize) -> Vec<String> {
    let prefix_width = segments_width(prefix);
    if prefix_width + segments_width(body) <= width {
        let mut all = prefix.to_vec();
        all.extend_from_slice(body);
        return vec![to_ansi(&all)];
    }

    let mut lines = Lines {
        done: Vec::new(),
        current: prefix.to_vec(),
        used: prefix_width,
        base: prefix_width,
        width,
        continuation,
    };
    let mut pending: Vec<&Atom<'_>> = Vec::new();
    let mut seen_word = false;

    let atoms = atoms(body);
    let mut rest = atoms.as_slice();
    while let Some(first) = rest.first() {
        if first.space {
            // Leading indentation of the first line is content
            if !seen_word {
                lines.push(first.text, first.style, first.width);
            } else {
                pending.push(first);
            }
            rest = &rest[1..];
            continue;
        }
        seen_word = true;

        // A word may span several segments when its style changes midway
        let len = rest.iter().take_while(|a| !a.space).count();
        let word = &rest[..len];
        rest = &rest[len..];
        let word_width: usize = word.iter().map(|a| a.width).sum();

        let pending_width: usize = pending.iter().map(|a| a.width).sum();
        if !lines.is_empty() && pending_width + word_width <= lines.room() {
            for space in pending.drain(..) {
                lines.push(space.text, space.style, space.width);
            }
        } else if !lines.is_empty() {
            pending.clear();
            lines.break_line();
        } else {
            pending.clear();
        }

        if word_width <= lines.room() {
            for piece in word {
                lines.push(piece.text, piece.style, piece.width);
            }
        } else {
            for piece in word {
                lines.split_word(piece.text, piece.style);
            }
        }
    }

    lines.done.push(to_ansi(&lines.current));
    lines.done
}
