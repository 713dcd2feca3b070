use super::{
    cursor::Cursor,
    kinds::{BlockRef, CodeSpan, Embed, MarkdownLink, PageRef, Tag},
    types::{InlineLink, InlineLinkKind},
};

/// Scans block text for references, in document order.
///
/// Code spans are checked first and suppress everything inside them, so
/// `` `[[not a link]]` `` yields nothing. Page references are consumed whole,
/// which keeps a `#` inside `[[...]]` from being read as a tag.
pub fn parse_links(s: &str) -> Vec<InlineLink> {
    let mut cur = Cursor::new(s);
    let mut out = vec![];

    while !cur.eof() {
        if try_skip_code_span(&mut cur) {
            continue;
        }
        if let Some(link) = try_parse_embed(&mut cur)
            .or_else(|| try_parse_tag(&mut cur))
            .or_else(|| try_parse_page_ref(&mut cur))
            .or_else(|| try_parse_block_ref(&mut cur))
            .or_else(|| try_parse_markdown_link(&mut cur))
        {
            out.push(link);
            continue;
        }
        cur.bump();
    }

    out
}

/// Steps over a closed code span. Leaves the cursor alone otherwise.
fn try_skip_code_span(cur: &mut Cursor<'_>) -> bool {
    if cur.peek() != Some(CodeSpan::TICK) {
        return false;
    }

    let saved = cur.clone();
    cur.bump(); // `
    while !cur.eof() && cur.peek() != Some(CodeSpan::TICK) {
        cur.bump();
    }

    if cur.peek() != Some(CodeSpan::TICK) {
        // Not closed, restore cursor
        *cur = saved;
        return false;
    }
    cur.bump(); // closing `
    true
}

/// Reads a `open ... close` pair on a single line and returns the inner text.
fn delimited<'a>(cur: &mut Cursor<'a>, open: &[u8], close: &[u8]) -> Option<&'a str> {
    if !cur.starts_with(open) {
        return None;
    }

    let saved = cur.clone();
    cur.bump_n(open.len());
    let inner_start = cur.i;

    if !cur.seek_on_line(close) || cur.i == inner_start {
        *cur = saved;
        return None;
    }
    let inner = cur.slice(inner_start, cur.i);
    cur.bump_n(close.len());
    Some(inner)
}

fn try_parse_page_ref(cur: &mut Cursor<'_>) -> Option<InlineLink> {
    let start = cur.i;
    let name = delimited(cur, PageRef::OPEN, PageRef::CLOSE)?;

    Some(InlineLink {
        kind: InlineLinkKind::Page,
        target: name.to_string(),
        label: name.to_string(),
        raw: cur.slice(start, cur.i).to_string(),
        embed: false,
    })
}

fn try_parse_block_ref(cur: &mut Cursor<'_>) -> Option<InlineLink> {
    let saved = cur.clone();
    let start = cur.i;
    let id = delimited(cur, BlockRef::OPEN, BlockRef::CLOSE)?;

    if id.chars().any(char::is_whitespace) {
        *cur = saved;
        return None;
    }

    Some(InlineLink {
        kind: InlineLinkKind::Block,
        target: id.to_string(),
        label: id.to_string(),
        raw: cur.slice(start, cur.i).to_string(),
        embed: false,
    })
}

/// `#word` or `#[[Multi Word]]`, only at the start of text or after whitespace.
fn try_parse_tag(cur: &mut Cursor<'_>) -> Option<InlineLink> {
    if cur.peek() != Some(Tag::HASH) {
        return None;
    }
    if cur.prev_char().is_some_and(|c| !c.is_whitespace()) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.i;
    cur.bump(); // #

    if let Some(page) = try_parse_page_ref(cur) {
        return Some(InlineLink {
            kind: InlineLinkKind::Tag,
            raw: cur.slice(start, cur.i).to_string(),
            ..page
        });
    }

    let Some(len) = Tag::name_len(cur.rest()) else {
        *cur = saved;
        return None;
    };
    let name = cur.slice(cur.i, cur.i + len);
    cur.bump_n(len);

    Some(InlineLink {
        kind: InlineLinkKind::Tag,
        target: name.to_string(),
        label: name.to_string(),
        raw: cur.slice(start, cur.i).to_string(),
        embed: false,
    })
}

/// `{{embed [[Page]]}}` or `{{embed ((uuid))}}`.
fn try_parse_embed(cur: &mut Cursor<'_>) -> Option<InlineLink> {
    if !cur.starts_with(Embed::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.i;
    cur.bump_n(Embed::OPEN.len());
    while cur.peek() == Some(b' ') {
        cur.bump();
    }

    let Some(inner) = try_parse_page_ref(cur).or_else(|| try_parse_block_ref(cur)) else {
        *cur = saved;
        return None;
    };

    while cur.peek() == Some(b' ') {
        cur.bump();
    }
    if !cur.starts_with(Embed::CLOSE) {
        *cur = saved;
        return None;
    }
    cur.bump_n(Embed::CLOSE.len());

    Some(InlineLink {
        raw: cur.slice(start, cur.i).to_string(),
        embed: true,
        ..inner
    })
}

/// `[label](url)` and `![label](url)`.
///
/// The url may itself be a page or block reference, Logseq's way of giving a
/// reference custom text: `[label]([[Page]])`, `[label](((uuid)))`.
fn try_parse_markdown_link(cur: &mut Cursor<'_>) -> Option<InlineLink> {
    let saved = cur.clone();
    let start = cur.i;

    let embed = cur.peek() == Some(MarkdownLink::BANG);
    if embed {
        cur.bump();
    }
    if cur.peek() != Some(MarkdownLink::LABEL_OPEN) || cur.starts_with(PageRef::OPEN) {
        *cur = saved;
        return None;
    }
    cur.bump(); // [
    let label_start = cur.i;
    if !cur.seek_on_line(&[MarkdownLink::LABEL_CLOSE]) {
        *cur = saved;
        return None;
    }
    let label = cur.slice(label_start, cur.i).to_string();
    cur.bump(); // ]

    if cur.peek() != Some(MarkdownLink::URL_OPEN) {
        *cur = saved;
        return None;
    }
    cur.bump(); // (

    let reference = try_parse_page_ref(cur).or_else(|| try_parse_block_ref(cur));
    let (kind, target) = match reference {
        Some(inner) => (inner.kind, inner.target),
        None => {
            let url_start = cur.i;
            if !cur.seek_on_line(&[MarkdownLink::URL_CLOSE]) || cur.i == url_start {
                *cur = saved;
                return None;
            }
            let url = cur.slice(url_start, cur.i);
            match MarkdownLink::asset_path(url) {
                Some(path) => (InlineLinkKind::Asset, path.to_string()),
                None => (InlineLinkKind::Resource, url.to_string()),
            }
        }
    };

    if cur.peek() != Some(MarkdownLink::URL_CLOSE) {
        *cur = saved;
        return None;
    }
    cur.bump(); // )

    Some(InlineLink {
        kind,
        target,
        label,
        raw: cur.slice(start, cur.i).to_string(),
        embed,
    })
}
