use crate::api::{CompositionSpec, EmbedAssets};
use crate::error::{ExplorerError, ExplorerResult};

/// Element id the chart is embedded into. Fixed so repeated renders of the
/// same spec produce identical markup.
pub const EMBED_ELEMENT_ID: &str = "vis";

const CHART_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <style>
    .chart-error { color: #b00020; font-family: sans-serif; }
  </style>
@@SCRIPTS@@
</head>
<body>
  <div id="@@ELEMENT_ID@@"></div>
  <script type="text/javascript">
    (function (vegaEmbed) {
      var spec = @@SPEC@@;
      var embedOpt = {"mode": "vega-lite", "actions": false};
      var el = document.getElementById("@@ELEMENT_ID@@");
      function showError(error) {
        el.innerHTML = '<div class="chart-error" role="alert"><p>JavaScript Error: '
          + String(error.message).replace(/[&<>"]/g, function (c) {
              return {"&": "&amp;", "<": "&lt;", ">": "&gt;", "\"": "&quot;"}[c];
            })
          + '</p></div>';
        throw error;
      }
      vegaEmbed(el, spec, embedOpt).catch(showError);
    })(vegaEmbed);
  </script>
</body>
</html>
"#;

const ERROR_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <style>
    body { margin: 0; display: flex; align-items: center; justify-content: center; height: 100vh; }
    .chart-error { color: #b00020; border: 1px solid #b00020; padding: 12px 16px; font-family: sans-serif; }
  </style>
</head>
<body>
  <div class="chart-error" role="alert">
    <strong>Chart unavailable</strong>
    <p>@@MESSAGE@@</p>
  </div>
</body>
</html>
"#;

/// Lowers a composition into a standalone HTML document.
///
/// Rendering and the brush/filter interaction run entirely client-side via
/// `vega-embed`; no further server round trip is needed.
pub fn render_chart_document(spec: &CompositionSpec, assets: &EmbedAssets) -> ExplorerResult<String> {
    let spec_json = serde_json::to_string(spec).map_err(|e| {
        ExplorerError::Serialization(format!("failed to serialize chart spec: {e}"))
    })?;

    let scripts = assets
        .script_urls()
        .iter()
        .map(|url| {
            format!(
                "  <script type=\"text/javascript\" src=\"{}\"></script>",
                escape_html(url)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    Ok(CHART_TEMPLATE
        .replace("@@SCRIPTS@@", &scripts)
        .replace("@@ELEMENT_ID@@", EMBED_ELEMENT_ID)
        .replace("@@SPEC@@", &escape_script_json(&spec_json)))
}

/// Visible error indicator shown in place of a chart.
#[must_use]
pub fn error_document(message: &str) -> String {
    ERROR_TEMPLATE.replace("@@MESSAGE@@", &escape_html(message))
}

/// Escapes text for HTML element content and double-quoted attributes.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Makes JSON safe to inline inside a `<script>` element.
fn escape_script_json(json: &str) -> String {
    json.replace("</", "<\\/")
        .replace("<!--", "<\\!--")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}
