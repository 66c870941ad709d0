use vidtrack_core::Catalog;

const HOME_TEMPLATE: &str = include_str!("../static/index.html");
const VIDEOS_PLACEHOLDER: &str = "__VIDEOS_JSON__";

/// Render the home page with the catalog embedded as a script literal
pub fn render_home(catalog: &Catalog) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(catalog)?;
    Ok(HOME_TEMPLATE.replacen(VIDEOS_PLACEHOLDER, &escape_for_script(&json), 1))
}

/// Make a JSON document safe to embed inside a `<script>` element.
///
/// The escapes are valid inside JSON strings, which is the only place these
/// characters can appear in serializer output.
fn escape_for_script(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out
}
