use std::fmt::Write as _;

use crate::layout::{Dropdown, PageLayout};

use super::escape_html;

const PAGE_SCRIPT: &str = r#"
(function () {
  var surface = document.getElementById("@@SURFACE_ID@@");
  var applied = 0;
  function escapeText(text) {
    return String(text).replace(/[&<>"]/g, function (c) {
      return {"&": "&amp;", "<": "&lt;", ">": "&gt;", "\"": "&quot;"}[c];
    });
  }
  function pushChange(axis, key) {
    fetch("@@SELECTION_ENDPOINT@@", {
      method: "POST",
      headers: {"content-type": "application/json"},
      body: JSON.stringify({axis: axis, key: key})
    }).then(function (response) {
      var header = response.headers.get("x-render-generation");
      return response.text().then(function (body) {
        if (header !== null) {
          var generation = Number(header);
          if (generation < applied) {
            return;
          }
          applied = generation;
        }
        surface.srcdoc = body;
      });
    }).catch(function (error) {
      surface.srcdoc = '<p class="chart-error" role="alert">' + escapeText(error) + '</p>';
    });
  }
  var selects = document.querySelectorAll("select[data-axis]");
  for (var i = 0; i < selects.length; i++) {
    (function (select) {
      select.addEventListener("change", function () {
        pushChange(select.getAttribute("data-axis"), select.value);
      });
    })(selects[i]);
  }
})();
"#;

/// Lowers the page layout to HTML.
#[must_use]
pub fn render_page(layout: &PageLayout) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "  <title>{}</title>", escape_html(&layout.title));
    html.push_str("</head>\n<body>\n");
    html.push_str(
        "  <div style=\"display: flex; justify-content: center; align-items: flex-start;\">\n    <div>\n",
    );
    for dropdown in layout.dropdowns() {
        render_dropdown(&mut html, dropdown);
    }
    html.push_str("    </div>\n");

    let surface = &layout.surface;
    let _ = writeln!(
        html,
        "    <iframe id=\"{}\" src=\"{}\" width=\"{}\" height=\"{}\" sandbox=\"{}\" style=\"border-width: 0px;\"></iframe>",
        surface.id, surface.initial_src, surface.width, surface.height, surface.sandbox
    );
    html.push_str("  </div>\n  <script type=\"text/javascript\">");
    html.push_str(
        &PAGE_SCRIPT
            .replace("@@SURFACE_ID@@", surface.id)
            .replace("@@SELECTION_ENDPOINT@@", layout.selection_endpoint),
    );
    html.push_str("  </script>\n</body>\n</html>\n");
    html
}

fn render_dropdown(html: &mut String, dropdown: &Dropdown) {
    html.push_str(
        "      <div style=\"width: 250px; margin-right: auto; margin-left: auto; text-align: center;\">\n",
    );
    let _ = writeln!(
        html,
        "        <label for=\"{}\">{}</label>",
        dropdown.id, dropdown.label
    );
    let _ = writeln!(
        html,
        "        <select id=\"{}\" name=\"{}\" data-axis=\"{}\">",
        dropdown.id,
        dropdown.id,
        dropdown.axis.as_str()
    );
    if dropdown.value.is_none() {
        html.push_str("          <option value=\"\" disabled selected>Choose a column</option>\n");
    }
    for option in &dropdown.options {
        let selected = if dropdown.value.as_deref() == Some(option.value.as_str()) {
            " selected"
        } else {
            ""
        };
        let _ = writeln!(
            html,
            "          <option value=\"{}\"{selected}>{}</option>",
            escape_html(&option.value),
            escape_html(&option.label)
        );
    }
    html.push_str("        </select>\n      </div>\n");
}
