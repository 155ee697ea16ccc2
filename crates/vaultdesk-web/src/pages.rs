//! HTML rendering of console screens.

use axum::http::StatusCode;
use vaultdesk_console::{CreateView, DetailView, ListView, Screen, secret_path};

/// Render whichever screen the navigator has mounted.
pub fn render(screen: &Screen) -> String {
    match screen {
        Screen::List(view) => render_list(view),
        Screen::Create(view) => render_create(view),
        Screen::Detail(view) => render_detail(view),
    }
}

fn layout(title: &str, content: &str) -> String {
    LAYOUT_HTML
        .replace("<!-- TITLE -->", &html_escape(title))
        .replace("<!-- CONTENT -->", content)
}

fn error_banner(error: Option<&str>) -> String {
    error
        .map(|e| format!(r#"<div class="error">{}</div>"#, html_escape(e)))
        .unwrap_or_default()
}

pub fn render_list(view: &ListView) -> String {
    let secrets = view.filtered();

    let body = match view.empty_state() {
        Some(empty) => {
            let create = if empty.offers_create() {
                r#"<p><a href="/secrets/new">Create your first secret</a></p>"#
            } else {
                ""
            };
            format!(
                r#"<div class="empty"><p>{}</p>{}</div>"#,
                empty.message(),
                create
            )
        }
        None => {
            let mut rows = String::new();
            for secret in secrets {
                let description = secret
                    .description()
                    .map(|d| format!(r#"<p class="description">{}</p>"#, html_escape(d)))
                    .unwrap_or_default();
                rows.push_str(&format!(
                    r#"<li><a href="{}"><span class="name">{}</span>{}</a></li>"#,
                    html_escape(&ListView::detail_href(secret)),
                    html_escape(&secret.name),
                    description,
                ));
            }
            format!(r#"<ul class="secrets">{}</ul>"#, rows)
        }
    };

    let content = LIST_HTML
        .replace("<!-- SEARCH -->", &html_escape(view.search_term()))
        .replace("<!-- SECRETS -->", &body);
    layout("Secrets", &content)
}

pub fn render_create(view: &CreateView) -> String {
    let form = view.form();
    let content = CREATE_HTML
        .replace("<!-- ERROR -->", &error_banner(view.error()))
        .replace("<!-- NAME -->", &html_escape(&form.name))
        .replace("<!-- VALUE -->", &html_escape(&form.value))
        .replace("<!-- DESCRIPTION -->", &html_escape(&form.description));
    layout("Create New Secret", &content)
}

pub fn render_detail(view: &DetailView) -> String {
    let secret = view.secret();
    let path = html_escape(&secret_path(&secret.name));

    let body = if view.is_editing() {
        DETAIL_EDIT_HTML
            .replace("<!-- PATH -->", &path)
            .replace("<!-- DRAFT -->", &html_escape(view.draft()))
    } else {
        DETAIL_VIEW_HTML
            .replace("<!-- PATH -->", &path)
            .replace("<!-- VALUE -->", &html_escape(secret.value_or_empty()))
    };

    let content = DETAIL_HTML
        .replace("<!-- NAME -->", &html_escape(&secret.name))
        .replace("<!-- ERROR -->", &error_banner(view.error()))
        .replace("<!-- BODY -->", &body);
    layout(&secret.name, &content)
}

pub fn render_error(status: StatusCode, message: &str) -> String {
    let content = ERROR_HTML
        .replace("<!-- STATUS -->", status.as_str())
        .replace("<!-- MESSAGE -->", &html_escape(message));
    layout(status.canonical_reason().unwrap_or("Error"), &content)
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// =============================================================================
// Templates
// =============================================================================

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Vaultdesk - <!-- TITLE --></title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            max-width: 1000px;
            margin: 0 auto;
            padding: 2rem;
            background: #0a0a0a;
            color: #e0e0e0;
        }
        nav { display: flex; justify-content: space-between; align-items: center; }
        nav .brand { color: #88c0d0; font-size: 1.5rem; font-weight: bold; text-decoration: none; }
        h1 { color: #88c0d0; }
        a { color: #81a1c1; }
        .header { display: flex; justify-content: space-between; align-items: center; }
        .error {
            background: #bf616a;
            color: #fff;
            padding: 0.75rem 1rem;
            border-radius: 4px;
            margin: 1rem 0;
        }
        .empty { text-align: center; padding: 3rem 0; color: #888; }
        ul.secrets { list-style: none; padding: 0; background: #2e3440; border-radius: 4px; }
        ul.secrets li { border-bottom: 1px solid #3b4252; }
        ul.secrets li a { display: block; padding: 1rem 1.5rem; color: #e0e0e0; text-decoration: none; }
        ul.secrets li a:hover { background: #3b4252; }
        .name { font-weight: 600; }
        .description { color: #888; font-size: 0.9rem; margin: 0.25rem 0 0; }
        .form-group { margin: 1.5rem 0; }
        .form-group label { display: block; margin-bottom: 0.5rem; color: #88c0d0; }
        input[type="text"], input[type="search"], input[type="password"], textarea {
            width: 100%;
            padding: 0.75rem;
            background: #2e3440;
            border: 1px solid #4c566a;
            border-radius: 4px;
            color: #e0e0e0;
            font-size: 1rem;
            box-sizing: border-box;
        }
        textarea { min-height: 150px; font-family: monospace; resize: vertical; }
        pre {
            background: #2e3440;
            padding: 1rem;
            border-radius: 4px;
            white-space: pre-wrap;
            word-break: break-all;
        }
        .btn { padding: 0.6rem 1.2rem; border: none; border-radius: 4px; cursor: pointer; font-size: 1rem; text-decoration: none; display: inline-block; }
        .btn-primary { background: #5e81ac; color: #fff; }
        .btn-primary:hover { background: #81a1c1; }
        .btn-primary:disabled { background: #4c566a; cursor: wait; }
        .btn-cancel { background: #4c566a; color: #fff; margin-left: 0.5rem; }
    </style>
</head>
<body>
    <nav>
        <a href="/" class="brand">Vaultdesk</a>
        <a href="/secrets/new" class="btn btn-primary">New Secret</a>
    </nav>
    <main>
        <!-- CONTENT -->
    </main>
</body>
</html>"#;

const LIST_HTML: &str = r#"<form action="/" method="get" class="form-group">
        <input type="search" name="q" value="<!-- SEARCH -->" placeholder="Search secrets..." autofocus>
    </form>
    <!-- SECRETS -->"#;

const CREATE_HTML: &str = r#"<div class="header">
        <h1>Create New Secret</h1>
        <a href="/">Back to list</a>
    </div>
    <!-- ERROR -->
    <form action="/secrets/new" method="post" onsubmit="this.querySelector('button[type=submit]').disabled = true">
        <div class="form-group">
            <label for="name">Secret Name</label>
            <input type="text" id="name" name="name" required value="<!-- NAME -->" placeholder="my-app/api-key">
        </div>
        <div class="form-group">
            <label for="value">Secret Value</label>
            <textarea id="value" name="value" required><!-- VALUE --></textarea>
        </div>
        <div class="form-group">
            <label for="description">Description (optional)</label>
            <input type="text" id="description" name="description" value="<!-- DESCRIPTION -->">
        </div>
        <button type="submit" class="btn btn-primary">Create Secret</button>
    </form>"#;

const DETAIL_HTML: &str = r#"<div class="header">
        <h1><!-- NAME --></h1>
        <a href="/">Back to list</a>
    </div>
    <!-- ERROR -->
    <!-- BODY -->"#;

const DETAIL_VIEW_HTML: &str = r#"<div class="form-group">
        <label>Secret Value</label>
        <pre id="secret-value"><!-- VALUE --></pre>
        <button type="button" class="btn btn-cancel" onclick="navigator.clipboard.writeText(document.getElementById('secret-value').textContent).catch(function () {})">Copy</button>
    </div>
    <a href="<!-- PATH -->?edit=1" class="btn btn-primary">Edit Secret</a>"#;

const DETAIL_EDIT_HTML: &str = r#"<form action="<!-- PATH -->" method="post" onsubmit="this.querySelector('button[type=submit]').disabled = true">
        <div class="form-group">
            <label for="value">Secret Value</label>
            <textarea id="value" name="value" rows="6" required><!-- DRAFT --></textarea>
        </div>
        <button type="submit" class="btn btn-primary">Save Changes</button>
        <a href="<!-- PATH -->" class="btn btn-cancel">Cancel</a>
    </form>"#;

const ERROR_HTML: &str = r#"<div class="empty">
        <h1><!-- STATUS --></h1>
        <p><!-- MESSAGE --></p>
        <p><a href="/">Back to list</a></p>
    </div>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use vaultdesk_api::Secret;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_list_links_use_encoded_paths() {
        let view = ListView::new(vec![Secret::new("team/db key", "v")]);
        let html = render_list(&view);
        assert!(html.contains(r#"href="/secrets/team%2Fdb%20key""#));
        assert!(html.contains("team/db key"));
    }

    #[test]
    fn test_empty_list_offers_create() {
        let html = render_list(&ListView::new(vec![]));
        assert!(html.contains("No secrets found."));
        assert!(html.contains("Create your first secret"));
    }

    #[test]
    fn test_no_matches_hides_create_prompt() {
        let mut view = ListView::new(vec![Secret::new("db", "v")]);
        view.set_search_term("zzz");
        let html = render_list(&view);
        assert!(html.contains("No secrets found matching your search."));
        assert!(!html.contains("Create your first secret"));
        assert!(html.contains(r#"value="zzz""#));
    }

    #[test]
    fn test_detail_escapes_value() {
        let view = DetailView::new(Secret::new("db", "<script>"));
        let html = render_detail(&view);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<pre id=\"secret-value\"><script>"));
        assert!(html.contains("Edit Secret"));
    }
}
