use scraper::{Html, Node};

/// Reduce an HTML snippet to its plain text.
///
/// `<script>` and `<style>` bodies are dropped entirely, entities are decoded
/// by the HTML parser and the result is trimmed.
pub fn strip_all_tags(text: &str) -> String {
    if !text.contains('<') && !text.contains('&') {
        return text.trim().to_string();
    }

    let fragment = Html::parse_fragment(text);
    let mut plain = String::with_capacity(text.len());

    for node in fragment.root_element().descendants() {
        let Node::Text(content) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| match ancestor.value() {
            Node::Element(element) => matches!(element.name(), "script" | "style"),
            _ => false,
        });
        if !hidden {
            plain.push_str(&content.text);
        }
    }

    plain.trim().to_string()
}
