//! HTML page rendering
//!
//! Pages are built with plain string formatting. Every piece of text that
//! did not come from a compile-time constant goes through [`escape_html`].

use crate::calculator::{format_number, Calculation};
use crate::error::CalcError;
use crate::locale::{Labels, Locale};

/// Escape text for embedding in HTML element content or quoted attributes
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Everything the result page shows
#[derive(Debug)]
pub struct ResultPage<'a> {
    pub locale: Locale,
    pub outcome: &'a Result<Calculation, CalcError>,
    pub previous_access: Option<&'a str>,
    pub current_access: &'a str,
    pub raw_a: Option<&'a str>,
    pub raw_b: Option<&'a str>,
    pub raw_op: Option<&'a str>,
}

fn page_head(labels: &Labels, title: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="{lang}">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{title}</title>
    <script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4"></script>
  </head>
  <body class="bg-neutral-950 text-neutral-100 antialiased">
    <div class="min-h-screen flex flex-col">
      <header class="border-b border-neutral-800">
        <div class="max-w-4xl mx-auto px-6 h-20 flex items-center justify-between">
          <div>
            <p class="font-semibold text-lg leading-none">{heading}</p>
            <p class="text-xs text-neutral-400">{subheading}</p>
          </div>
          <a href="/" class="text-sm text-neutral-300 hover:underline">{back}</a>
        </div>
      </header>
      <main class="flex-1">
        <div class="max-w-4xl mx-auto px-6 py-10">
          <div class="rounded-3xl border border-neutral-800 bg-neutral-900/30 p-6 shadow-sm">
"#,
        lang = labels.lang,
        title = escape_html(title),
        heading = escape_html(labels.heading),
        subheading = escape_html(labels.subheading),
        back = escape_html(labels.back),
    )
}

fn page_tail() -> &'static str {
    r#"          </div>
        </div>
      </main>
      <footer class="border-t border-neutral-800">
        <div class="max-w-4xl mx-auto px-6 py-6 text-sm text-neutral-500">Calculatrice</div>
      </footer>
    </div>
  </body>
</html>
"#
}

/// Render the result page for one calculation request
pub fn render_result_page(page: &ResultPage<'_>) -> String {
    let labels = page.locale.labels();
    let mut html = page_head(labels, labels.result_title);

    match page.outcome {
        Ok(calc) => html.push_str(&format!(
            r#"            <div class="rounded-2xl border border-neutral-800 bg-neutral-950/40 p-4">
              <p class="text-sm text-neutral-400">{label}</p>
              <p class="text-2xl font-semibold mt-1">{a} {symbol} {b} = <span class="text-neutral-50">{result}</span></p>
            </div>
"#,
            label = escape_html(labels.calculation),
            a = escape_html(&format_number(calc.a)),
            symbol = escape_html(calc.op.symbol()),
            b = escape_html(&format_number(calc.b)),
            result = escape_html(&format_number(calc.result)),
        )),
        Err(err) => html.push_str(&format!(
            r#"            <div class="rounded-2xl border border-red-900/60 bg-red-950/40 p-4">
              <p class="font-semibold text-red-200">{label}</p>
              <p class="text-sm text-red-200/80 mt-1">{message}</p>
            </div>
"#,
            label = escape_html(labels.error),
            message = escape_html(&page.locale.error_message(err)),
        )),
    }

    html.push_str(&format!(
        r#"            <p class="mt-3 text-xs text-neutral-500">{label}: a = <code>{a}</code>, op = <code>{op}</code>, b = <code>{b}</code></p>
"#,
        label = escape_html(labels.submitted),
        a = escape_html(page.raw_a.unwrap_or("")),
        op = escape_html(page.raw_op.unwrap_or("")),
        b = escape_html(page.raw_b.unwrap_or("")),
    ));

    let previous = match page.previous_access {
        Some(previous) => escape_html(previous),
        None => format!(
            r#"<span class="text-neutral-500">{}</span>"#,
            escape_html(labels.first_visit)
        ),
    };

    html.push_str(&format!(
        r#"            <div class="mt-6 grid gap-3 sm:grid-cols-2">
              <div class="rounded-2xl border border-neutral-800 bg-neutral-950/40 p-4">
                <p class="text-sm text-neutral-400">{previous_label}</p>
                <p class="mt-1" id="previous-access">{previous}</p>
              </div>
              <div class="rounded-2xl border border-neutral-800 bg-neutral-950/40 p-4">
                <p class="text-sm text-neutral-400">{current_label}</p>
                <p class="mt-1" id="current-access">{current}</p>
              </div>
            </div>
            <div class="mt-6 flex gap-3 justify-center items-center">
              <a href="/" class="rounded-2xl border border-neutral-800 bg-neutral-100 px-5 py-3 text-sm font-semibold text-neutral-950 hover:bg-white transition">{again}</a>
            </div>
"#,
        previous_label = escape_html(labels.previous_access),
        current_label = escape_html(labels.current_access),
        current = escape_html(page.current_access),
        again = escape_html(labels.new_calculation),
    ));

    html.push_str(page_tail());
    html
}

/// Render the calculator form
pub fn render_index_page(locale: Locale) -> String {
    let labels = locale.labels();
    let mut html = page_head(labels, labels.index_title);

    let options = [
        ("add", labels.op_add),
        ("sub", labels.op_sub),
        ("mul", labels.op_mul),
        ("div", labels.op_div),
    ]
    .iter()
    .map(|(code, label)| format!(r#"<option value="{}">{}</option>"#, code, escape_html(label)))
    .collect::<Vec<_>>()
    .join("");

    html.push_str(&format!(
        r#"            <form method="post" action="/calculatrice" class="grid gap-4">
              <label class="grid gap-1 text-sm text-neutral-400">{first}
                <input name="a" inputmode="decimal" required class="rounded-xl bg-neutral-950 border border-neutral-800 px-3 py-2 text-neutral-100" />
              </label>
              <label class="grid gap-1 text-sm text-neutral-400">{operation}
                <select name="op" class="rounded-xl bg-neutral-950 border border-neutral-800 px-3 py-2 text-neutral-100">{options}</select>
              </label>
              <label class="grid gap-1 text-sm text-neutral-400">{second}
                <input name="b" inputmode="decimal" required class="rounded-xl bg-neutral-950 border border-neutral-800 px-3 py-2 text-neutral-100" />
              </label>
              <button type="submit" class="rounded-2xl bg-neutral-100 px-5 py-3 text-sm font-semibold text-neutral-950 hover:bg-white transition">{submit}</button>
            </form>
"#,
        first = escape_html(labels.first_operand),
        operation = escape_html(labels.operation),
        second = escape_html(labels.second_operand),
        submit = escape_html(labels.submit),
    ));

    html.push_str(page_tail());
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::calculate;

    fn render(
        outcome: &Result<Calculation, CalcError>,
        previous: Option<&str>,
        locale: Locale,
    ) -> String {
        render_result_page(&ResultPage {
            locale,
            outcome,
            previous_access: previous,
            current_access: "2026-03-01 09:30:00",
            raw_a: Some("6"),
            raw_b: Some("3"),
            raw_op: Some("div"),
        })
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_success_page() {
        let outcome = calculate(Some("6"), Some("3"), Some("div"));
        let html = render(&outcome, Some("2026-03-01 09:00:00"), Locale::En);

        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("6 ÷ 3 = <span class=\"text-neutral-50\">2</span>"));
        assert!(html.contains("2026-03-01 09:00:00"));
        assert!(html.contains("2026-03-01 09:30:00"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_error_page_first_visit() {
        let outcome = Err(CalcError::DivisionByZero);
        let html = render(&outcome, None, Locale::En);

        assert!(html.contains("Division by zero."));
        assert!(html.contains("(None — first visit)"));
    }

    #[test]
    fn test_french_page() {
        let outcome = Err(CalcError::DivisionByZero);
        let html = render(&outcome, None, Locale::Fr);

        assert!(html.contains(r#"<html lang="fr">"#));
        assert!(html.contains("Division par zéro."));
        assert!(html.contains("première visite"));
    }

    #[test]
    fn test_raw_inputs_are_escaped() {
        let outcome = calculate(Some("<script>"), Some("1"), Some("add"));
        let html = render_result_page(&ResultPage {
            locale: Locale::En,
            outcome: &outcome,
            previous_access: Some("<b>old</b>"),
            current_access: "now",
            raw_a: Some("<script>"),
            raw_b: Some("1"),
            raw_op: Some("add\"'"),
        });

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;old&lt;/b&gt;"));
        assert!(html.contains("add&quot;&#39;"));
        assert!(html.contains("Invalid input: please enter valid numbers."));
    }

    #[test]
    fn test_index_page_has_form() {
        let html = render_index_page(Locale::En);
        assert!(html.contains(r#"action="/calculatrice""#));
        for name in ["name=\"a\"", "name=\"b\"", "name=\"op\""] {
            assert!(html.contains(name));
        }
        for code in ["add", "sub", "mul", "div"] {
            assert!(html.contains(&format!("value=\"{}\"", code)));
        }
    }
}
