//! HTML status page.
//!
//! The page is a single self-contained document built from a [`Board`]. It
//! reloads itself through a `<meta http-equiv="refresh">` tag; the server
//! never pushes.

use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset, NaiveDateTime};

use crate::config::PageSettings;
use crate::data::{Board, Entry, GroupView};

/// Shown when no report has been received.
pub const AWAITING_MESSAGE: &str = "The first status report has not been received yet.";

const STYLE: &str = r#"
body{font-family:system-ui,-apple-system,"Segoe UI",sans-serif;background:#0c0f1a;color:#e5e7eb;margin:0}
.container{max-width:48rem;margin:0 auto;padding:2rem 1rem}
header{text-align:center;margin-bottom:2rem}
h1{font-size:2.75rem;font-weight:900;margin:0;color:#67e8f9}
.subtitle{color:#9ca3af;margin-top:.5rem}
.card{background:rgba(23,27,41,.6);border:1px solid rgba(255,255,255,.08);border-radius:1.25rem;padding:1.5rem;margin-bottom:2rem}
.banner{display:flex;align-items:center;justify-content:center;gap:1rem}
.banner h2{margin:0;font-size:1.75rem}
.icon{display:inline-flex;width:2.25rem;height:2.25rem;align-items:center;justify-content:center;border-radius:9999px;font-weight:700}
section h3{font-size:1.2rem;margin:1.25rem .5rem .75rem}
.entry{display:flex;align-items:center;justify-content:space-between;padding:1rem;border-radius:.75rem;border:1px solid;margin-bottom:.75rem;background:rgba(0,0,0,.1);color:inherit;text-decoration:none}
a.entry:hover{background:rgba(0,0,0,.2)}
.name{display:flex;align-items:center;gap:1rem;font-weight:600}
.status{display:flex;align-items:center;gap:.5rem;font-weight:500}
.dot{width:8px;height:8px;border-radius:9999px}
.empty{text-align:center;padding:2rem 0;color:#9ca3af}
.empty small{color:#6b7280}
footer{text-align:center;color:#6b7280;font-size:.875rem}
.cyan{color:#67e8f9;border-color:rgba(103,232,249,.2)} .cyan .dot,.dot.cyan{background:#22d3ee} .cyan .icon{background:rgba(103,232,249,.1)}
.red{color:#f87171;border-color:rgba(248,113,113,.2)} .red .dot,.dot.red{background:#ef4444} .red .icon{background:rgba(248,113,113,.1)}
.amber{color:#fbbf24;border-color:rgba(251,191,36,.2)} .amber .dot,.dot.amber{background:#fbbf24} .amber .icon{background:rgba(251,191,36,.1)}
.blue{color:#60a5fa;border-color:rgba(96,165,250,.2)} .blue .dot,.dot.blue{background:#60a5fa} .blue .icon{background:rgba(96,165,250,.1)}
.gray{color:#9ca3af;border-color:rgba(156,163,175,.2)} .gray .dot,.dot.gray{background:#6b7280} .gray .icon{background:rgba(156,163,175,.1)}
"#;

/// Render the complete page for a board.
pub fn render_page(board: &Board, page: &PageSettings, offset: FixedOffset) -> String {
    let title = escape_html(&page.title);
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    let _ = writeln!(
        html,
        "<meta http-equiv=\"refresh\" content=\"{}\">",
        page.refresh_secs
    );
    let _ = writeln!(html, "<title>{title}</title>");
    let _ = writeln!(html, "<style>{STYLE}</style>");
    html.push_str("</head>\n<body>\n<div class=\"container\">\n");

    let _ = writeln!(
        html,
        "<header><h1>{title}</h1><p class=\"subtitle\">A live overview of our service status.</p></header>"
    );

    render_banner(&mut html, board);

    html.push_str("<div class=\"card\">\n");
    if board.is_awaiting_data() {
        let _ = writeln!(
            html,
            "<div class=\"empty\"><p>{AWAITING_MESSAGE}</p><small>This page will update automatically.</small></div>"
        );
    }
    for group in board.groups.iter().filter(|g| !g.entries.is_empty()) {
        render_group(&mut html, group);
    }
    html.push_str("</div>\n");

    let last_updated = format_last_updated(board.last_updated_utc.as_deref(), offset);
    let _ = writeln!(
        html,
        "<footer><p>Last updated: {}</p><p>This page automatically refreshes every {} seconds.</p></footer>",
        escape_html(&last_updated),
        page.refresh_secs
    );

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn render_banner(html: &mut String, board: &Board) {
    let tone = board.overall.styled_as().tone().as_str();
    let _ = writeln!(
        html,
        "<div class=\"card banner {tone}\"><span class=\"icon\">{}</span><h2>{}</h2></div>",
        board.overall.icon().glyph(),
        escape_html(board.headline)
    );
}

fn render_group(html: &mut String, group: &GroupView) {
    html.push_str("<section>\n");
    let _ = writeln!(html, "<h3>{}</h3>", escape_html(group.title));
    for entry in &group.entries {
        render_entry(html, entry);
    }
    html.push_str("</section>\n");
}

fn render_entry(html: &mut String, entry: &Entry) {
    let tone = entry.severity.tone().as_str();
    let (open, close) = match &entry.url {
        Some(url) => (
            format!(
                "<a class=\"entry {tone}\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">",
                escape_html(url)
            ),
            "</a>",
        ),
        None => (format!("<div class=\"entry {tone}\">"), "</div>"),
    };

    let _ = writeln!(
        html,
        "{open}<span class=\"name\"><span class=\"icon\">{}</span><span>{}</span></span>\
         <span class=\"status\"><span class=\"dot\"></span>{}</span>{close}",
        entry.icon.glyph(),
        escape_html(&entry.name),
        escape_html(&entry.status),
    );
}

/// Human-readable report time.
///
/// `Never` when no timestamp was reported, `Invalid Date` when it cannot be
/// parsed. Timestamps without an offset are taken as UTC. The result ends
/// with the display zone: `UTC`, or the offset such as `+01:00`.
pub fn format_last_updated(last_updated_utc: Option<&str>, offset: FixedOffset) -> String {
    let Some(raw) = last_updated_utc.map(str::trim).filter(|s| !s.is_empty()) else {
        return "Never".to_string();
    };

    match parse_timestamp(raw) {
        Some(ts) => ts
            .with_timezone(&offset)
            .format("%B %-d, %Y, %-I:%M:%S %p ")
            .to_string()
            + &zone_label(offset),
        None => "Invalid Date".to_string(),
    }
}

fn zone_label(offset: FixedOffset) -> String {
    if offset.local_minus_utc() == 0 {
        "UTC".to_string()
    } else {
        offset.to_string()
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts);
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Escape text for use in HTML content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
