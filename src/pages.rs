//! Server-rendered HTML for the handful of pages the dashboard has.
//!
//! The UI is deliberately plain; these pages exist to exercise the auth
//! gate and the upload flow, not to be a frontend.

use crate::flash::Flash;
use crate::models::matches::{FaceMatch, TimelineMatch};

const STYLE: &str = r#"
body { font-family: sans-serif; max-width: 640px; margin: 2rem auto; color: #222; }
h1 { font-size: 1.4rem; }
form { margin: 1rem 0; }
input, button { padding: 0.4rem; margin: 0.2rem 0; }
table { border-collapse: collapse; width: 100%; margin-top: 1rem; }
th, td { border: 1px solid #ccc; padding: 0.4rem 0.6rem; text-align: left; }
nav { margin-bottom: 1.5rem; color: #666; }
img.query { max-width: 200px; display: block; margin: 1rem 0; }
.flash { padding: 0.6rem 0.8rem; border-radius: 4px; margin-bottom: 1rem; }
.flash.success { background: #e6f4e6; }
.flash.info { background: #e6eef4; }
.flash.warning { background: #f4efe0; }
.flash.danger { background: #f4e0e0; }
"#;

/// Escapes a string for interpolation into HTML text or attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

fn layout(title: &str, flash: Option<&Flash>, body: &str) -> String {
    let flash_html = match flash {
        Some(f) => format!(
            r#"<div class="flash {}">{}</div>"#,
            f.level,
            escape(&f.message)
        ),
        None => String::new(),
    };

    format!(
        r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>{title} · Sketchy</title>
<style>{STYLE}</style>
</head>
<body>
{flash_html}
{body}
</body>
</html>"#
    )
}

/// The login form.
pub fn login_page(flash: Option<&Flash>) -> String {
    layout(
        "Log in",
        flash,
        r#"<h1>Sketchy · Log in</h1>
<form action="/login" method="post">
  <label>Username <input type="text" name="username" required></label><br>
  <label>Password <input type="password" name="password" required></label><br>
  <button type="submit">Log in</button>
</form>
<p>No account? <a href="/register">Register</a></p>"#,
    )
}

/// The registration form.
pub fn register_page(flash: Option<&Flash>) -> String {
    layout(
        "Register",
        flash,
        r#"<h1>Sketchy · Register</h1>
<form action="/register" method="post">
  <label>Username <input type="text" name="username" required></label><br>
  <label>Password <input type="password" name="password" required></label><br>
  <label>Confirm password <input type="password" name="confirm_password" required></label><br>
  <button type="submit">Create account</button>
</form>
<p>Already registered? <a href="/login">Log in</a></p>"#,
    )
}

/// The main dashboard: upload a query face, then a video to scan.
pub fn dashboard_page(username: &str, flash: Option<&Flash>) -> String {
    let body = format!(
        r#"<nav>Signed in as <strong>{}</strong> · <a href="/logout">Log out</a></nav>
<h1>Sketchy</h1>
<section>
  <h2>Step 1: search by sketch or photo</h2>
  <form action="/search-image" method="post" enctype="multipart/form-data">
    <input type="file" name="query_image" accept=".jpg,.jpeg,.png">
    <button type="submit">Search</button>
  </form>
</section>
<section>
  <h2>Step 2: scan CCTV / video footage</h2>
  <form action="/search-video" method="post" enctype="multipart/form-data">
    <input type="file" name="video_file" accept=".mp4,.avi,.mov,.mkv">
    <button type="submit">Scan</button>
  </form>
</section>"#,
        escape(username)
    );

    layout("Dashboard", flash, &body)
}

/// Match results for an uploaded query face.
pub fn image_results_page(query_image_url: &str, results: &[FaceMatch]) -> String {
    let rows: String = results
        .iter()
        .map(|m| {
            format!(
                r#"<tr class="match-row"><td>{}</td><td>{:.2}</td><td>{}</td></tr>"#,
                escape(m.label),
                m.score,
                escape(m.source)
            )
        })
        .collect();

    let body = format!(
        r#"<nav><a href="/">Back to dashboard</a></nav>
<h1>Query results</h1>
<img class="query" src="{}" alt="query face">
<table>
  <tr><th>Label</th><th>Distance</th><th>Source</th></tr>
  {rows}
</table>"#,
        escape(query_image_url)
    );

    layout("Image results", None, &body)
}

/// Timeline results for an uploaded video.
pub fn video_results_page(video_name: &str, matches: &[TimelineMatch]) -> String {
    let rows: String = matches
        .iter()
        .map(|m| {
            format!(
                r#"<tr class="match-row"><td>{}</td><td>{}</td><td>{:.2}</td></tr>"#,
                escape(m.time),
                escape(m.label),
                m.score
            )
        })
        .collect();

    let body = format!(
        r#"<nav><a href="/">Back to dashboard</a></nav>
<h1>Scan results for {}</h1>
<table>
  <tr><th>Time</th><th>Label</th><th>Distance</th></tr>
  {rows}
</table>"#,
        escape(video_name)
    );

    layout("Video results", None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_html_metacharacters() {
        assert_eq!(
            escape(r#"<img src="x" onerror='y'> & more"#),
            "&lt;img src=&quot;x&quot; onerror=&#x27;y&#x27;&gt; &amp; more"
        );
    }

    #[test]
    fn dashboard_escapes_username() {
        let html = dashboard_page("<script>", None);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn results_pages_render_one_row_per_match() {
        let html = image_results_page("/static/uploads/images/q.jpg", crate::services::search::image_matches());
        assert_eq!(html.matches("match-row").count(), 3);

        let html = video_results_page("cam.mp4", crate::services::search::video_matches());
        assert_eq!(html.matches("match-row").count(), 3);
    }
}
