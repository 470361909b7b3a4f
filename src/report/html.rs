//! DC-013: Self-contained HTML comparison page.

use super::{report_file_name, write_atomic, ComparisonReport, ReportCard, ReportSink};
use crate::core::types::ReportFormat;
use std::path::{Path, PathBuf};

const STYLE: &str = "\
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background: #f4f7f6; padding: 40px; color: #333; }
h1 { text-align: center; color: #2c3e50; margin-bottom: 10px; }
.subtitle { text-align: center; color: #7f8c8d; margin-bottom: 40px; }
.container { display: flex; flex-wrap: wrap; justify-content: center; gap: 30px; }
.card { background: #fff; width: 320px; padding: 25px; border: 1px solid #ddd; border-radius: 15px; box-shadow: 0 10px 20px rgba(0,0,0,0.08); position: relative; display: flex; flex-direction: column; justify-content: space-between; }
.card.winner { border: 4px solid #27ae60; background: #f0fff4; }
.badge { position: absolute; top: -15px; right: -10px; background: #27ae60; color: white; padding: 8px 15px; border-radius: 20px; font-weight: bold; font-size: 0.9em; }
h3 { font-size: 1.1em; height: 50px; overflow: hidden; }
.price { font-size: 2.8em; font-weight: 800; color: #2c3e50; margin: 15px 0; text-align: center; }
.ing-list { font-size: 0.85em; color: #666; margin-bottom: 20px; }
ul { padding-left: 20px; }
.btn { display: block; text-align: center; background: #3498db; color: white; text-decoration: none; padding: 12px; border-radius: 8px; font-weight: bold; }
.footer { text-align: center; margin-top: 50px; font-size: 0.8em; color: #aaa; }
";

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn render_card(card: &ReportCard, currency: &str) -> String {
    let class = if card.winner { "card winner" } else { "card" };
    let mut out = format!("<div class=\"{}\">\n", class);
    if card.winner {
        out.push_str("<div class=\"badge\">MEILLEUR PRIX</div>\n");
    }
    out.push_str(&format!("<h3>{}</h3>\n", escape(&card.name)));
    out.push_str(&format!(
        "<div class=\"price\">{} {}</div>\n",
        card.total, currency
    ));
    out.push_str("<div class=\"ing-list\"><strong>Ingrédients clés :</strong><ul>");
    for item in &card.items {
        out.push_str(&format!("<li>{}</li>", escape(&item.name)));
    }
    if card.truncated {
        out.push_str("<li>...</li>");
    }
    out.push_str("</ul></div>\n");
    out.push_str(&format!(
        "<a href=\"{}\" target=\"_blank\" class=\"btn\">Voir la recette</a>\n",
        escape(&card.url)
    ));
    out.push_str("</div>\n");
    out
}

/// Render a full HTML page for a report.
pub fn render(report: &ComparisonReport) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!(
        "<title>Comparateur {}</title>\n",
        escape(&report.dish)
    ));
    out.push_str(&format!("<style>\n{}</style>\n", STYLE));
    out.push_str("</head>\n<body>\n<h1>COMPARATEUR DE PRIX</h1>\n");
    out.push_str(&format!(
        "<div class=\"subtitle\">Analyse pour : <strong>{}</strong> à <strong>{}</strong></div>\n",
        escape(&report.dish.to_uppercase()),
        escape(&report.city.to_uppercase())
    ));
    if let Some(winner) = report.winner() {
        out.push_str(&format!(
            "<div class=\"subtitle\">Le moins cher : <strong>{}</strong> ({} {})</div>\n",
            escape(&winner.name),
            winner.total,
            report.currency
        ));
    }
    out.push_str("<div class=\"container\">\n");
    for card in &report.cards {
        out.push_str(&render_card(card, report.currency));
    }
    out.push_str("</div>\n");
    out.push_str(&format!(
        "<div class=\"footer\">Généré par dishcost {} - prix estimés à partir du coût de la vie \
         local</div>\n",
        env!("CARGO_PKG_VERSION")
    ));
    out.push_str("</body>\n</html>\n");
    out
}

/// Writes `comparatif_<dish>.html` into a directory.
pub struct HtmlReportSink {
    output_dir: PathBuf,
}

impl HtmlReportSink {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }
}

impl ReportSink for HtmlReportSink {
    fn write(&self, report: &ComparisonReport) -> Result<PathBuf, String> {
        let path = self
            .output_dir
            .join(report_file_name(&report.dish, ReportFormat::Html));
        write_atomic(&path, &render(report))?;
        Ok(path)
    }
}
