//! Markdown to HTML conversion.
//!
//! Uses pulldown-cmark directly, with two event-stream rewrites on top of
//! the stock conversion: every heading gets a slugified `id` anchor, and a
//! paragraph containing only `[TOC]` is replaced with a nested list of
//! links to those headings. Tables and fenced code blocks are enabled as
//! markup conventions.

use pulldown_cmark::{html::push_html, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use std::collections::HashMap;

/// A heading collected while rewriting the event stream, used to build
/// the table of contents.
struct TocEntry {
    level: u32,
    title: String,
    slug: String,
}

/// Convert Markdown to an HTML fragment.
pub fn render_markdown(content: &str) -> String {
    let parser = Parser::new_ext(content, Options::ENABLE_TABLES);

    let (events, headings) = inject_heading_ids(parser);
    let events = expand_toc_markers(events, &headings);

    let mut html = String::with_capacity(content.len() * 2);
    push_html(&mut html, events.into_iter());
    html
}

/// Slugify heading text for use as an HTML id attribute.
///
/// Lowercases, replaces non-alphanumeric runs with hyphens, strips
/// leading/trailing hyphens.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut prev_hyphen = true; // suppress leading hyphen
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

fn heading_number(level: HeadingLevel) -> u32 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Walk the event stream and inject `id` attributes on headings.
///
/// For each heading, the text inside it is collected to build a slug, and
/// the `Start`/`End` events are replaced with raw `<hN id="slug">` HTML.
/// Duplicate slugs get a `-N` suffix so every id stays unique within the
/// document. Returns the rewritten events plus the collected headings in
/// document order.
fn inject_heading_ids(parser: Parser<'_>) -> (Vec<Event<'_>>, Vec<TocEntry>) {
    let mut events: Vec<Event<'_>> = Vec::new();
    let mut headings: Vec<TocEntry> = Vec::new();
    let mut seen_slugs: HashMap<String, usize> = HashMap::new();
    let mut in_heading: Option<HeadingLevel> = None;
    let mut heading_text = String::new();
    let mut heading_events: Vec<Event<'_>> = Vec::new();

    for event in parser {
        match &event {
            Event::Start(Tag::Heading { level, .. }) => {
                in_heading = Some(*level);
                heading_text.clear();
                heading_events.clear();
            }
            Event::End(TagEnd::Heading(level)) if in_heading == Some(*level) => {
                let slug = unique_slug(&slugify(&heading_text), &mut seen_slugs);
                let level = heading_number(*level);

                events.push(Event::Html(format!("<h{} id=\"{}\">", level, slug).into()));
                events.append(&mut heading_events);
                events.push(Event::Html(format!("</h{}>", level).into()));

                headings.push(TocEntry { level, title: heading_text.clone(), slug });
                in_heading = None;
            }
            Event::Text(text) if in_heading.is_some() => {
                heading_text.push_str(text);
                heading_events.push(event);
            }
            Event::Code(code) if in_heading.is_some() => {
                heading_text.push_str(code);
                heading_events.push(event);
            }
            _ if in_heading.is_some() => {
                heading_events.push(event);
            }
            _ => {
                events.push(event);
            }
        }
    }

    (events, headings)
}

// An empty slug (all-symbol heading) still needs an id to link to.
fn unique_slug(base: &str, seen: &mut HashMap<String, usize>) -> String {
    let base = if base.is_empty() { "section" } else { base };
    let count = seen.entry(base.to_string()).or_insert(0);
    *count += 1;
    if *count == 1 {
        base.to_string()
    } else {
        format!("{}-{}", base, *count - 1)
    }
}

/// Replace every paragraph whose entire text is `[TOC]` with a table of
/// contents built from the document's headings.
///
/// pulldown-cmark splits the unresolved `[TOC]` reference into several
/// text events, so paragraph contents are buffered and compared as a
/// whole.
fn expand_toc_markers<'a>(events: Vec<Event<'a>>, headings: &[TocEntry]) -> Vec<Event<'a>> {
    let mut rewritten: Vec<Event<'a>> = Vec::new();
    let mut paragraph: Vec<Event<'a>> = Vec::new();
    let mut paragraph_text = String::new();
    let mut in_paragraph = false;

    for event in events {
        match &event {
            Event::Start(Tag::Paragraph) => {
                in_paragraph = true;
                paragraph.clear();
                paragraph_text.clear();
                paragraph.push(event);
            }
            Event::End(TagEnd::Paragraph) if in_paragraph => {
                if paragraph_text.trim() == "[TOC]" {
                    rewritten.push(Event::Html(toc_html(headings).into()));
                    paragraph.clear();
                } else {
                    rewritten.append(&mut paragraph);
                    rewritten.push(event);
                }
                in_paragraph = false;
            }
            Event::Text(text) if in_paragraph => {
                paragraph_text.push_str(text);
                paragraph.push(event);
            }
            _ if in_paragraph => {
                paragraph.push(event);
            }
            _ => {
                rewritten.push(event);
            }
        }
    }

    rewritten
}

/// Render the collected headings as a nested link list.
///
/// Levels may skip or go back up arbitrarily; the stack tracks the open
/// sublists so the emitted HTML always balances.
fn toc_html(headings: &[TocEntry]) -> String {
    if headings.is_empty() {
        return "<div class=\"toc\"></div>".to_string();
    }

    let mut html = String::from("<div class=\"toc\">\n");
    let mut open: Vec<u32> = Vec::new();

    for entry in headings {
        match open.last().copied() {
            None => {
                html.push_str("<ul>\n");
                open.push(entry.level);
            }
            Some(top) if entry.level > top => {
                html.push_str("<ul>\n");
                open.push(entry.level);
            }
            Some(_) => {
                html.push_str("</li>\n");
                while open.len() > 1 && open.last().copied().is_some_and(|top| top > entry.level)
                {
                    open.pop();
                    html.push_str("</ul>\n</li>\n");
                }
                if let Some(top) = open.last_mut() {
                    *top = (*top).min(entry.level);
                }
            }
        }
        html.push_str(&format!(
            "<li><a href=\"#{}\">{}</a>",
            entry.slug,
            escape_text(&entry.title)
        ));
    }

    html.push_str("</li>\n");
    while open.len() > 1 {
        open.pop();
        html.push_str("</ul>\n</li>\n");
    }
    html.push_str("</ul>\n</div>");
    html
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
