use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TextMergeStream};

use super::{DocumentTree, NodeId, TreeError};

/// Renders Markdown into a [`DocumentTree`] rooted at a `div`.
///
/// Block and inline constructs become structural elements named after their
/// HTML counterparts; text, inline code and line breaks become text leaves.
/// Raw HTML is dropped.
pub fn render(markdown: &str) -> Result<DocumentTree, TreeError> {
    let mut tree = DocumentTree::new("div");
    let mut stack: Vec<NodeId> = vec![tree.root()];

    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;
    for event in TextMergeStream::new(Parser::new_ext(markdown, options)) {
        let top = *stack.last().unwrap_or(&tree.root());
        match event {
            Event::Start(tag) => {
                let element = tree.append_element(top, tag_name(&tag))?;
                stack.push(element);
            }
            Event::End(_) => {
                if stack.len() > 1 {
                    stack.pop();
                }
            }
            Event::Text(text) | Event::InlineMath(text) | Event::DisplayMath(text) => {
                tree.append_text(top, text.into_string())?;
            }
            Event::Code(code) => {
                let element = tree.append_element(top, "code")?;
                tree.append_text(element, code.into_string())?;
            }
            Event::SoftBreak | Event::HardBreak => {
                tree.append_text(top, "\n")?;
            }
            Event::Rule => {
                tree.append_element(top, "hr")?;
            }
            _ => {}
        }
    }

    Ok(tree)
}

fn tag_name(tag: &Tag<'_>) -> &'static str {
    match tag {
        Tag::Paragraph => "p",
        Tag::Heading { level, .. } => match level {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
            HeadingLevel::H5 => "h5",
            HeadingLevel::H6 => "h6",
        },
        Tag::BlockQuote(_) => "blockquote",
        Tag::CodeBlock(_) => "pre",
        Tag::List(Some(_)) => "ol",
        Tag::List(None) => "ul",
        Tag::Item => "li",
        Tag::Emphasis => "em",
        Tag::Strong => "strong",
        Tag::Strikethrough => "del",
        Tag::Link { .. } => "a",
        Tag::Image { .. } => "img",
        Tag::Table(_) => "table",
        Tag::TableHead => "thead",
        Tag::TableRow => "tr",
        Tag::TableCell => "td",
        _ => "span",
    }
}
