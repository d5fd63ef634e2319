//! HTML page for the gallery view.

use gallery_core::models::GalleryView;
use std::fmt::Write;

const STYLE: &str = "body{font-family:sans-serif;margin:2rem}\
.day{margin-bottom:2rem}.day h2 small{color:#888;font-weight:normal}\
.thumbs img{max-height:160px;margin:4px}\
textarea{width:100%;max-width:40rem}";

const SCRIPT: &str = "async function saveComment(date){\
const text=document.getElementById('comment-'+date).value;\
const res=await fetch('/comment',{method:'POST',headers:{'Content-Type':'application/json'},\
body:JSON.stringify({date:date,text:text})});\
const body=await res.json();\
document.getElementById('status-'+date).textContent=body.success?'saved':(body.error||'error');}";

pub fn render_gallery(view: &GalleryView) -> String {
    let title = escape_html(&view.title);
    let mut html = String::with_capacity(4096);
    // Writing into a String cannot fail.
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>{STYLE}</style>\n<script>{SCRIPT}</script>\n</head>\n<body>\n<h1>{title}</h1>\n"
    );

    if view.photos.is_empty() {
        html.push_str("<p>No photos.</p>\n");
    }

    for (date, unit) in view.photos.iter() {
        let date_html = escape_html(date);
        let comment = view.comments.get(date).map(String::as_str).unwrap_or("");
        let _ = write!(
            html,
            "<section class=\"day\">\n<h2>{date_html} <small>week {}</small></h2>\n<div class=\"thumbs\">\n",
            unit.week
        );
        for file in &unit.files {
            let _ = writeln!(
                html,
                "<a href=\"/photos/{href}\"><img src=\"/photos/{href}\" alt=\"{alt}\" loading=\"lazy\"></a>",
                href = encode_path_segment(file),
                alt = escape_html(file),
            );
        }
        let _ = write!(
            html,
            "</div>\n<textarea id=\"comment-{date_html}\" rows=\"2\">{}</textarea>\n\
             <button onclick=\"saveComment('{date_html}')\">Save</button> \
             <span id=\"status-{date_html}\"></span>\n</section>\n",
            escape_html(comment)
        );
    }

    html.push_str("</body>\n</html>\n");
    html
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
pub fn encode_path_segment(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            out.push(b as char);
        } else {
            let _ = write!(out, "%{b:02X}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_core::models::{DateMap, DayUnit};
    use storage::Comments;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html("<b>\"Tom & Jerry's\"</b>"),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#x27;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn encodes_spaces_and_unicode() {
        assert_eq!(encode_path_segment("my cat.jpg"), "my%20cat.jpg");
        assert_eq!(encode_path_segment("ü.png"), "%C3%BC.png");
        assert_eq!(encode_path_segment("a#b?.gif"), "a%23b%3F.gif");
    }

    #[test]
    fn page_lists_days_weeks_and_comments() {
        let mut photos = DateMap::new();
        photos.insert(
            "2024-01-01".to_string(),
            DayUnit {
                files: vec!["new year.jpg".to_string()],
                week: 1,
            },
        );
        let mut comments = Comments::new();
        comments.insert("2024-01-01".to_string(), "<fireworks>".to_string());
        let view = GalleryView {
            photos,
            comments,
            title: "All Photos".to_string(),
        };

        let html = render_gallery(&view);
        assert!(html.contains("<title>All Photos</title>"));
        assert!(html.contains("2024-01-01 <small>week 1</small>"));
        assert!(html.contains("src=\"/photos/new%20year.jpg\""));
        assert!(html.contains("&lt;fireworks&gt;</textarea>"));
        assert!(!html.contains("No photos."));
    }

    #[test]
    fn empty_view_says_so() {
        let view = GalleryView {
            photos: DateMap::new(),
            comments: Comments::new(),
            title: "Photos of 2024-05".to_string(),
        };
        let html = render_gallery(&view);
        assert!(html.contains("<h1>Photos of 2024-05</h1>"));
        assert!(html.contains("No photos."));
    }
}
