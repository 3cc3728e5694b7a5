/// Escapes text for embedding in markup/SVG content and attribute values.
pub(crate) fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_metacharacters() {
        assert_eq!(escape_xml(r#"a < b && c > "d'""#), "a &lt; b &amp;&amp; c &gt; &quot;d&apos;&quot;");
        assert_eq!(escape_xml("plain"), "plain");
    }
}
