//! HTML templates for the web interface.

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Base HTML template.
pub fn base_template(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - logopress</title>
</head>
<body>
    {}
</body>
</html>"#,
        html_escape(title),
        content
    )
}

/// Render the generated-image listing: one link per domain, pointing at
/// the image endpoint.
pub fn images_list(domains: &[String]) -> String {
    let mut items = String::new();

    for domain in domains {
        items.push_str(&format!(
            "        <li><a href=\"/images/{}\">{}</a></li>\n",
            urlencoding::encode(domain),
            html_escape(domain)
        ));
    }

    format!(
        r#"<h2>Generated Images:</h2>
    <ul>
{}    </ul>"#,
        items
    )
}
