//! Backend globals embedded in static HTML pages
//!
//! At deploy time the backend URL and anonymous key are written into each
//! page as `window.SUPABASE_URL` / `window.SUPABASE_ANON_KEY` so they exist
//! before any controller starts. This module renders that script, inserts it
//! and reads the values back.

use std::sync::OnceLock;

use regex::Regex;

/// Name of the URL global; its presence marks a page as already injected
pub const URL_GLOBAL: &str = "window.SUPABASE_URL";
/// Name of the anonymous key global
pub const ANON_KEY_GLOBAL: &str = "window.SUPABASE_ANON_KEY";

/// Values exposed to the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageGlobals {
    pub url: String,
    pub anon_key: String,
}

/// Result of injecting globals into one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Injection {
    /// Page rewritten with the globals script
    Injected(String),
    /// Page already defines the globals; left untouched
    AlreadyPresent,
    /// Page has no `</head>`; left untouched
    NoHead,
}

/// Render the `<script>` block defining the globals
pub fn render_globals_script(globals: &PageGlobals) -> String {
    format!(
        "\n<script>\n  {} = '{}';\n  {} = '{}';\n</script>\n",
        URL_GLOBAL,
        escape_js_string(&globals.url),
        ANON_KEY_GLOBAL,
        escape_js_string(&globals.anon_key),
    )
}

/// Insert the globals script right before the first `</head>`
pub fn inject_globals(html: &str, globals: &PageGlobals) -> Injection {
    if html.contains(URL_GLOBAL) {
        return Injection::AlreadyPresent;
    }

    static HEAD_CLOSE: OnceLock<Regex> = OnceLock::new();
    let head_close = HEAD_CLOSE
        .get_or_init(|| Regex::new(r"(?i)</head\s*>").expect("Failed to compile </head> regex"))
        .find(html);

    match head_close {
        Some(m) => {
            let script = render_globals_script(globals);
            let mut out = String::with_capacity(html.len() + script.len());
            out.push_str(&html[..m.start()]);
            out.push_str(&script);
            out.push_str(&html[m.start()..]);
            Injection::Injected(out)
        }
        None => Injection::NoHead,
    }
}

/// Read the globals back out of an injected page
pub fn read_globals(html: &str) -> Option<PageGlobals> {
    static URL_REGEX: OnceLock<Regex> = OnceLock::new();
    static KEY_REGEX: OnceLock<Regex> = OnceLock::new();

    let url_regex = URL_REGEX.get_or_init(|| {
        Regex::new(r"window\.SUPABASE_URL\s*=\s*'((?:[^'\\]|\\.)*)'")
            .expect("Failed to compile URL global regex")
    });
    let key_regex = KEY_REGEX.get_or_init(|| {
        Regex::new(r"window\.SUPABASE_ANON_KEY\s*=\s*'((?:[^'\\]|\\.)*)'")
            .expect("Failed to compile anon key global regex")
    });

    let url = url_regex.captures(html)?.get(1)?.as_str();
    let anon_key = key_regex.captures(html)?.get(1)?.as_str();

    Some(PageGlobals {
        url: unescape_js_string(url),
        anon_key: unescape_js_string(anon_key),
    })
}

/// Escape a value for a single-quoted JS string inside a `<script>` block
fn escape_js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '<' => out.push_str("\\x3C"),
            _ => out.push(ch),
        }
    }
    out
}

fn unescape_js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('x') => {
                let hex: String = chars.by_ref().take(2).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('x');
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
