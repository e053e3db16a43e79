//! Markdown rendering for the result view.
//!
//! Converts Markdown text into styled ratatui lines already word-wrapped to a
//! column width, so that scroll offsets count exactly the rows on screen.
//! Rendering is a pure function of the text, the width and the theme.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::Theme;

/// Narrowest width the wrapper will lay text out in.
const MIN_WIDTH: usize = 10;

/// Renders `text` as styled lines no wider than `width` columns.
#[must_use]
pub fn render(text: &str, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let width = width.max(MIN_WIDTH);
    Renderer::new(theme, width)
        .run(text)
        .into_iter()
        .flat_map(|line| wrap_line(line, width))
        .collect()
}

/// A line before wrapping. `hang` is the indent for continuation rows.
struct LogicalLine {
    spans: Vec<Span<'static>>,
    hang: usize,
}

struct Renderer<'t> {
    theme: &'t Theme,
    width: usize,
    lines: Vec<LogicalLine>,
    spans: Vec<Span<'static>>,
    hang: usize,
    style_stack: Vec<Style>,
    /// One entry per open list; `Some(n)` is the next ordered-list number.
    list_stack: Vec<Option<u64>>,
    quote_depth: usize,
    in_code_block: bool,
}

impl<'t> Renderer<'t> {
    fn new(theme: &'t Theme, width: usize) -> Self {
        Self {
            theme,
            width,
            lines: Vec::new(),
            spans: Vec::new(),
            hang: 0,
            style_stack: vec![theme.normal_style()],
            list_stack: Vec::new(),
            quote_depth: 0,
            in_code_block: false,
        }
    }

    fn style(&self) -> Style {
        self.style_stack.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, f: impl FnOnce(Style) -> Style) {
        let next = f(self.style());
        self.style_stack.push(next);
    }

    fn pop_style(&mut self) {
        if self.style_stack.len() > 1 {
            self.style_stack.pop();
        }
    }

    /// Ends the current line, if it has content.
    fn flush(&mut self) {
        if !self.spans.is_empty() {
            let spans = std::mem::take(&mut self.spans);
            self.lines.push(LogicalLine {
                spans,
                hang: self.hang,
            });
        }
        self.hang = 0;
    }

    /// Separates a new block from the previous one with a blank line.
    fn start_block(&mut self) {
        self.flush();
        let last_blank = self.lines.last().is_none_or(|l| l.spans.is_empty());
        if !last_blank && self.list_stack.is_empty() {
            self.lines.push(LogicalLine {
                spans: Vec::new(),
                hang: 0,
            });
        }
    }

    /// Starts a line with the blockquote gutter, if any.
    fn begin_line(&mut self) {
        if self.spans.is_empty() && self.quote_depth > 0 {
            let gutter = "│ ".repeat(self.quote_depth);
            self.hang = gutter.width();
            self.spans.push(Span::styled(gutter, self.theme.muted_style()));
        }
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.begin_line();
        let style = self.style();
        self.spans.push(Span::styled(text.to_string(), style));
    }

    fn run(mut self, text: &str) -> Vec<LogicalLine> {
        let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
        for event in Parser::new_ext(text, options) {
            match event {
                Event::Start(tag) => self.start(tag),
                Event::End(tag) => self.end(tag),
                Event::Text(content) => self.text(&content),
                Event::Code(code) => {
                    self.begin_line();
                    let style = self.theme.code_style();
                    self.spans.push(Span::styled(code.to_string(), style));
                }
                Event::SoftBreak => self.push_text(" "),
                Event::HardBreak => {
                    let hang = self.hang;
                    self.flush();
                    self.hang = hang;
                }
                Event::Rule => {
                    self.start_block();
                    let rule = "─".repeat(self.width);
                    self.lines.push(LogicalLine {
                        spans: vec![Span::styled(rule, self.theme.muted_style())],
                        hang: 0,
                    });
                }
                Event::TaskListMarker(checked) => {
                    self.push_text(if checked { "[x] " } else { "[ ] " });
                }
                Event::Html(html) | Event::InlineHtml(html) => self.text(&html),
                _ => {}
            }
        }
        self.flush();
        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.start_block(),
            Tag::Heading { level, .. } => {
                self.start_block();
                let style = self.theme.heading_style(level as u8);
                self.style_stack.push(style);
            }
            Tag::BlockQuote { .. } => {
                self.start_block();
                self.quote_depth += 1;
                self.push_style(|s| s.add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(_) => {
                self.start_block();
                self.in_code_block = true;
                self.style_stack.push(self.theme.code_style());
            }
            Tag::List(start) => {
                if self.list_stack.is_empty() {
                    self.start_block();
                } else {
                    self.flush();
                }
                self.list_stack.push(start);
            }
            Tag::Item => {
                self.flush();
                let depth = self.list_stack.len().saturating_sub(1);
                let marker = match self.list_stack.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                let prefix = format!("{}{marker}", "  ".repeat(depth));
                self.begin_line();
                self.hang += prefix.width();
                let style = self.theme.highlight_style();
                self.spans.push(Span::styled(prefix, style));
            }
            Tag::Emphasis => self.push_style(|s| s.add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(|s| s.add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => self.push_style(|s| s.add_modifier(Modifier::CROSSED_OUT)),
            Tag::Link { .. } => {
                let accent = self.theme.accent;
                self.push_style(|s| s.fg(accent).add_modifier(Modifier::UNDERLINED));
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph | TagEnd::Item => self.flush(),
            TagEnd::Heading(_) => {
                self.flush();
                self.pop_style();
            }
            TagEnd::BlockQuote { .. } => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.pop_style();
            }
            TagEnd::CodeBlock => {
                self.flush();
                self.in_code_block = false;
                self.pop_style();
            }
            TagEnd::List(_) => {
                self.flush();
                self.list_stack.pop();
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link => {
                self.pop_style();
            }
            _ => {}
        }
    }

    fn text(&mut self, content: &str) {
        if self.in_code_block {
            let style = self.style();
            for line in content.trim_end_matches('\n').split('\n') {
                self.begin_line();
                self.hang += 2;
                self.spans.push(Span::styled(format!("  {line}"), style));
                self.flush();
            }
            return;
        }

        let mut parts = content.split('\n');
        if let Some(first) = parts.next() {
            self.push_text(first);
        }
        for part in parts {
            let hang = self.hang;
            self.flush();
            self.hang = hang;
            self.push_text(part);
        }
    }
}

/// Appends `text` to `spans`, merging into the last span when styles match.
fn append(spans: &mut Vec<Span<'static>>, text: &str, style: Style) {
    if let Some(last) = spans.last_mut() {
        if last.style == style {
            last.content.to_mut().push_str(text);
            return;
        }
    }
    spans.push(Span::styled(text.to_string(), style));
}

fn finish_row(spans: &mut Vec<Span<'static>>) -> Line<'static> {
    if let Some(last) = spans.last_mut() {
        let trimmed = last.content.trim_end().len();
        last.content.to_mut().truncate(trimmed);
    }
    Line::from(std::mem::take(spans))
}

/// Greedy word wrap. Words wider than the row are split by character.
fn wrap_line(line: LogicalLine, width: usize) -> Vec<Line<'static>> {
    if line.spans.is_empty() {
        return vec![Line::default()];
    }

    let hang = line.hang.min(width / 2);
    let mut rows = Vec::new();
    let mut row: Vec<Span<'static>> = Vec::new();
    let mut row_width = 0;
    let mut row_start = 0;

    let new_row = |rows: &mut Vec<Line<'static>>, row: &mut Vec<Span<'static>>| {
        rows.push(finish_row(row));
        if hang > 0 {
            row.push(Span::raw(" ".repeat(hang)));
        }
    };

    for span in &line.spans {
        for token in split_words(&span.content) {
            let token_width = token.width();
            if row_width + token_width <= width {
                append(&mut row, token, span.style);
                row_width += token_width;
                continue;
            }

            if token.chars().all(char::is_whitespace) {
                new_row(&mut rows, &mut row);
                row_width = hang;
                row_start = hang;
                continue;
            }

            if row_width > row_start {
                new_row(&mut rows, &mut row);
                row_width = hang;
                row_start = hang;
            }

            for ch in token.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if row_width + ch_width > width && row_width > row_start {
                    new_row(&mut rows, &mut row);
                    row_width = hang;
                    row_start = hang;
                }
                let mut buf = [0u8; 4];
                append(&mut row, ch.encode_utf8(&mut buf), span.style);
                row_width += ch_width;
            }
        }
    }

    rows.push(finish_row(&mut row));
    rows
}

/// Splits into alternating runs of whitespace and non-whitespace.
fn split_words(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space = None;
    for (i, ch) in text.char_indices() {
        let space = ch.is_whitespace();
        if in_space.is_some_and(|s| s != space) {
            tokens.push(&text[start..i]);
            start = i;
        }
        in_space = Some(space);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}
