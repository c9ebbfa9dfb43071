//! Note-content parsing with comrak.
//!
//! Note bodies are a small markdown subset: paragraphs, bullet and numbered
//! lists, and inline bold / italic / underline. Parsing walks the comrak AST
//! against that allow-list; raw HTML (block or inline) is dropped outright,
//! so nothing ever reaches the screen that the model cannot express.

use comrak::nodes::{AstNode, NodeValue};
use comrak::{Arena, Options, parse_document};

use super::types::{Document, InlineSpan, InlineStyle, LineType, RenderedLine};

impl Document {
    /// Parse note content at the default layout width.
    pub fn parse(source: &str) -> Self {
        parse_with_layout(source, 80)
    }

    /// Parse note content, wrapping rendered lines to `width` columns.
    pub fn parse_with_layout(source: &str, width: u16) -> Self {
        parse_with_layout(source, width)
    }
}

fn create_options() -> Options {
    let mut options = Options::default();
    // `__text__` becomes underline rather than a second bold syntax,
    // matching the underline format command.
    options.extension.underline = true;
    options
}

/// Parse note content into a [`Document`] wrapped to `width` columns.
pub fn parse_with_layout(source: &str, width: u16) -> Document {
    let arena = Arena::new();
    let options = create_options();
    let root = parse_document(&arena, source, &options);

    let mut lines = Vec::new();
    let wrap_width = width.max(1) as usize;
    process_node(root, &mut lines, 0, wrap_width, None);

    // Parsing appends a separator after each block; the final one is noise.
    while lines
        .last()
        .is_some_and(|line| matches!(line.line_type(), LineType::Empty))
    {
        lines.pop();
    }

    Document::from_parts(source.to_string(), lines)
}

/// Extract the plain text of note content, with blocks separated by
/// newlines. This is what word counting, the summarizer and sidebar
/// previews operate on.
pub fn plain_text(source: &str) -> String {
    let arena = Arena::new();
    let options = create_options();
    let root = parse_document(&arena, source, &options);

    let mut blocks: Vec<String> = Vec::new();
    collect_block_text(root, &mut blocks);
    blocks.join("\n")
}

fn collect_block_text<'a>(node: &'a AstNode<'a>, blocks: &mut Vec<String>) {
    match &node.data.borrow().value {
        NodeValue::Paragraph | NodeValue::Heading(_) | NodeValue::TableCell => {
            let text = extract_text(node);
            if !text.trim().is_empty() {
                blocks.push(text);
            }
        }
        NodeValue::CodeBlock(block) => {
            let literal = block.literal.trim_end();
            if !literal.is_empty() {
                blocks.push(literal.to_string());
            }
        }
        NodeValue::HtmlBlock(_) => {}
        _ => {
            for child in node.children() {
                collect_block_text(child, blocks);
            }
        }
    }
}

fn process_node<'a>(
    node: &'a AstNode<'a>,
    lines: &mut Vec<RenderedLine>,
    depth: usize,
    wrap_width: usize,
    list_marker: Option<String>,
) {
    match &node.data.borrow().value {
        NodeValue::Document => {
            for child in node.children() {
                process_node(child, lines, depth, wrap_width, None);
            }
        }

        NodeValue::Paragraph => {
            let spans = collect_inline_spans(node);
            push_wrapped(lines, &spans, wrap_width, "", "", LineType::Paragraph);
            lines.push(RenderedLine::new(String::new(), LineType::Empty));
        }

        NodeValue::List(list) => {
            let list_depth = depth + 1;
            let start = list.start;
            let list_len = node.children().count();
            let max_number = start + list_len.saturating_sub(1);
            let number_width = max_number.to_string().len();

            for (index, child) in node.children().enumerate() {
                let base_marker = match list.list_type {
                    comrak::nodes::ListType::Bullet => "•".to_string(),
                    comrak::nodes::ListType::Ordered => {
                        format!("{:>width$}.", start + index, width = number_width)
                    }
                };
                process_node(
                    child,
                    lines,
                    list_depth,
                    wrap_width,
                    Some(format!("{base_marker} ")),
                );
            }
            if depth == 0 {
                lines.push(RenderedLine::new(String::new(), LineType::Empty));
            }
        }

        NodeValue::Item(_) => {
            let indent = "  ".repeat(depth.saturating_sub(1));
            let marker = list_marker.unwrap_or_else(|| "• ".to_string());
            let prefix_first = format!("{indent}{marker}");
            let prefix_next = format!("{}{}", indent, " ".repeat(marker.chars().count()));
            let mut rendered_any = false;

            for child in node.children() {
                match &child.data.borrow().value {
                    NodeValue::Paragraph => {
                        let spans = collect_inline_spans(child);
                        let prefix = if rendered_any {
                            &prefix_next
                        } else {
                            &prefix_first
                        };
                        push_wrapped(
                            lines,
                            &spans,
                            wrap_width,
                            prefix,
                            &prefix_next,
                            LineType::ListItem(depth),
                        );
                        rendered_any = true;
                    }
                    _ => {
                        process_node(child, lines, depth, wrap_width, None);
                    }
                }
            }

            if !rendered_any {
                let spans = collect_inline_spans(node);
                push_wrapped(
                    lines,
                    &spans,
                    wrap_width,
                    &prefix_first,
                    &prefix_next,
                    LineType::ListItem(depth),
                );
            }
        }

        // Code fences are outside the style allow-list; their text still
        // renders verbatim so view and word count agree.
        NodeValue::CodeBlock(block) => {
            for raw_line in block.literal.lines() {
                lines.push(RenderedLine::new(
                    raw_line.to_string(),
                    LineType::Paragraph,
                ));
            }
            lines.push(RenderedLine::new(String::new(), LineType::Empty));
        }

        // Raw HTML never renders. Dropping the nodes here is the
        // sanitization boundary for untrusted content.
        NodeValue::HtmlBlock(_) | NodeValue::HtmlInline(_) => {}

        _ => {
            // Anything outside the allow-list contributes its text only.
            let has_block_children = node
                .children()
                .any(|child| child.data.borrow().value.block());
            if has_block_children {
                for child in node.children() {
                    process_node(child, lines, depth, wrap_width, list_marker.clone());
                }
            } else {
                let text = extract_text(node);
                if !text.trim().is_empty() {
                    let spans = vec![InlineSpan::new(text, InlineStyle::default())];
                    push_wrapped(lines, &spans, wrap_width, "", "", LineType::Paragraph);
                    lines.push(RenderedLine::new(String::new(), LineType::Empty));
                }
            }
        }
    }
}

fn push_wrapped(
    lines: &mut Vec<RenderedLine>,
    spans: &[InlineSpan],
    wrap_width: usize,
    prefix_first: &str,
    prefix_next: &str,
    line_type: LineType,
) {
    for line_spans in wrap_spans(spans, wrap_width, prefix_first, prefix_next) {
        let content = spans_to_string(&line_spans);
        lines.push(RenderedLine::with_spans(content, line_type, line_spans));
    }
}

fn spans_to_string(spans: &[InlineSpan]) -> String {
    let mut content = String::new();
    for span in spans {
        content.push_str(span.text());
    }
    content
}

fn collect_inline_spans<'a>(node: &'a AstNode<'a>) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    collect_inline_spans_recursive(node, InlineStyle::default(), &mut spans);
    spans
}

fn collect_inline_spans_recursive<'a>(
    node: &'a AstNode<'a>,
    style: InlineStyle,
    spans: &mut Vec<InlineSpan>,
) {
    match &node.data.borrow().value {
        // Nested lists are handled at block level.
        NodeValue::List(_) | NodeValue::Item(_) => {}
        NodeValue::Text(t) => {
            spans.push(InlineSpan::new(t.clone(), style));
        }
        NodeValue::Strong => {
            let mut next = style;
            next.strong = true;
            for child in node.children() {
                collect_inline_spans_recursive(child, next, spans);
            }
        }
        NodeValue::Emph => {
            let mut next = style;
            next.emphasis = true;
            for child in node.children() {
                collect_inline_spans_recursive(child, next, spans);
            }
        }
        NodeValue::Underline => {
            let mut next = style;
            next.underline = true;
            for child in node.children() {
                collect_inline_spans_recursive(child, next, spans);
            }
        }
        // Code spans carry no style of their own here; the literal text
        // still counts as content.
        NodeValue::Code(code) => {
            spans.push(InlineSpan::new(code.literal.clone(), style));
        }
        NodeValue::SoftBreak | NodeValue::LineBreak => {
            spans.push(InlineSpan::new(" ".to_string(), style));
        }
        NodeValue::HtmlInline(_) => {}
        _ => {
            for child in node.children() {
                collect_inline_spans_recursive(child, style, spans);
            }
        }
    }
}

fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    extract_text_recursive(node, &mut text);
    text
}

fn extract_text_recursive<'a>(node: &'a AstNode<'a>, text: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(t) => text.push_str(t),
        NodeValue::Code(c) => text.push_str(&c.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
        NodeValue::HtmlInline(_) | NodeValue::HtmlBlock(_) => {}
        _ => {
            for child in node.children() {
                extract_text_recursive(child, text);
            }
        }
    }
}

fn wrap_spans(
    spans: &[InlineSpan],
    width: usize,
    prefix_first: &str,
    prefix_next: &str,
) -> Vec<Vec<InlineSpan>> {
    let mut tokens: Vec<InlineSpan> = Vec::new();
    for span in spans {
        tokens.extend(split_inline_tokens(span));
    }

    let mut lines: Vec<Vec<InlineSpan>> = Vec::new();
    let mut current: Vec<InlineSpan> = Vec::new();
    let mut current_len = 0usize;
    let mut has_word = false;

    let start_new_line = |prefix: &str,
                          current: &mut Vec<InlineSpan>,
                          current_len: &mut usize,
                          has_word: &mut bool| {
        current.clear();
        if prefix.is_empty() {
            *current_len = 0;
        } else {
            current.push(InlineSpan::new(prefix.to_string(), InlineStyle::default()));
            *current_len = prefix.chars().count();
        }
        *has_word = false;
    };

    start_new_line(prefix_first, &mut current, &mut current_len, &mut has_word);

    for token in tokens {
        let token_len = token.text().chars().count();
        let token_is_ws = token.text().chars().all(char::is_whitespace);

        if current_len + token_len > width && has_word {
            lines.push(current.clone());
            start_new_line(prefix_next, &mut current, &mut current_len, &mut has_word);
        }

        if token_is_ws && !has_word {
            // Drop leading whitespace at wrapped line starts.
            continue;
        }

        current_len += token_len;
        current.push(token);
        if !token_is_ws {
            has_word = true;
        }
    }

    if current.is_empty() && !prefix_first.is_empty() {
        current.push(InlineSpan::new(
            prefix_first.to_string(),
            InlineStyle::default(),
        ));
    }

    lines.push(current);
    lines
}

fn split_inline_tokens(span: &InlineSpan) -> Vec<InlineSpan> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut ws_state: Option<bool> = None;

    for ch in span.text().chars() {
        let is_ws = ch.is_whitespace();
        match ws_state {
            Some(state) if state == is_ws => buf.push(ch),
            Some(_) => {
                out.push(InlineSpan::new(std::mem::take(&mut buf), span.style()));
                buf.push(ch);
                ws_state = Some(is_ws);
            }
            None => {
                buf.push(ch);
                ws_state = Some(is_ws);
            }
        }
    }
    if !buf.is_empty() {
        out.push(InlineSpan::new(buf, span.style()));
    }
    out
}
