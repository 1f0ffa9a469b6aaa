use easel_core::EaselError;

/// Standalone layout shell. One slot; the fragment passes through
/// verbatim so wrapped and unwrapped renders stay byte-identical inside.
const SINGLE_LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Easel</title>
</head>
<body class="environment">
  <div class="screen">{{ slot }}</div>
</body>
</html>
"#;

/// Wrap a rendered fragment in the single-slot standalone document.
pub fn wrap_standalone(fragment: &str) -> Result<String, EaselError> {
    let env = minijinja::Environment::new();
    env.render_str(SINGLE_LAYOUT, minijinja::context! { slot => fragment })
        .map_err(|e| EaselError::TemplateExecution(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_is_embedded_verbatim() {
        let wrapped = wrap_standalone("<p>hello & <b>world</b></p>").unwrap();
        assert!(wrapped.contains(r#"<div class="screen"><p>hello & <b>world</b></p></div>"#));
        assert!(wrapped.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn empty_fragment_still_produces_a_document() {
        let wrapped = wrap_standalone("").unwrap();
        assert!(wrapped.contains(r#"<div class="screen"></div>"#));
    }
}
