//! Auto-submit page posting a signed request to the bank's payment URL.

use crate::checksum::Fields;

/// Escape the five HTML-significant characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// HTML document with one hidden input per field and a script that submits
/// it to `action` on load.
pub fn render_autosubmit_form(action: &str, fields: &Fields) -> String {
    let inputs: String = fields
        .iter()
        .map(|(k, v)| {
            format!(
                "      <input type=\"hidden\" name=\"{}\" value=\"{}\">\n",
                escape_html(k),
                escape_html(v)
            )
        })
        .collect();
    format!(
        "<!DOCTYPE html>\n<html>\n  <body>\n    <form id=\"rmaForm\" method=\"POST\" action=\"{}\">\n{}    </form>\n    <script>document.getElementById('rmaForm').submit();</script>\n  </body>\n</html>\n",
        escape_html(action),
        inputs
    )
}
