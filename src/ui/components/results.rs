use ansi_to_tui::IntoText;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::billing::{FuelResult, TariffResult, TariffTable, Utility};
use crate::i18n::Texts;
use crate::report;

/// Results panel: metrics plus the coloured usage bar
pub struct ResultsComponent;

impl ResultsComponent {
    /// Build the text shown for a slab result; `error` is shown above the zeroed metrics
    pub fn tariff_text(
        result: &TariffResult,
        error: Option<&str>,
        table: &TariffTable,
        texts: &Texts,
        bar_width: usize,
    ) -> Text<'static> {
        let mut ansi = report::render_metrics(&result.comparison(), texts);
        ansi.push_str(&format!(
            "  {}: {:.1} {}\n",
            texts.usage_label(table.utility),
            result.total_usage,
            table.utility.unit()
        ));
        ansi.push_str(&report::render_usage_bar(
            &result.allocation,
            table,
            texts,
            bar_width,
            true,
        ));

        let mut text = ansi_text(ansi);
        if let Some(error) = error {
            text.lines.insert(
                0,
                Line::styled(format!("⚠ {}", error), Style::default().fg(Color::Red)),
            );
        }
        text
    }

    /// Fuel metrics, or nothing when no litres were entered
    pub fn fuel_text(result: &FuelResult, texts: &Texts) -> Text<'static> {
        if !result.comparison().has_baseline() {
            return Text::default();
        }

        let mut ansi = report::render_metrics(&result.comparison(), texts);
        ansi.push_str(&format!(
            "  {}: {:.3} {}\n",
            texts.liters_used,
            result.total_liters,
            Utility::Fuel.unit()
        ));
        ansi_text(ansi)
    }

    pub fn render(f: &mut Frame, area: Rect, text: Text<'static>) {
        let paragraph = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}

fn ansi_text(ansi: String) -> Text<'static> {
    match ansi.into_text() {
        Ok(text) => text,
        Err(_) => Text::raw(ansi),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::calculator::calculate;
    use crate::billing::{aggregate_fuel, FuelPriceTable, InputMode};
    use crate::i18n::Language;

    fn plain(text: &Text) -> String {
        text.lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_tariff_text_strips_escapes() {
        let table = TariffTable::water();
        let result = calculate(InputMode::Bill(5.0), &table.slabs).unwrap();
        let text = ResultsComponent::tariff_text(
            &result,
            None,
            &table,
            Language::English.texts(),
            20,
        );
        let content = plain(&text);

        assert!(content.contains("Previous bill: 5.000 BHD"));
        assert!(content.contains("Cubic meters used: 101.5 m³"));
        assert!(!content.contains('\x1b'));
    }

    #[test]
    fn test_error_line_comes_first() {
        let table = TariffTable::electricity();
        let text = ResultsComponent::tariff_text(
            &TariffResult::empty(3),
            Some("Usage is undefined for slab 3"),
            &table,
            Language::English.texts(),
            20,
        );
        assert!(plain(&text).starts_with("⚠ Usage is undefined"));
    }

    #[test]
    fn test_fuel_text_empty_without_liters() {
        let result = aggregate_fuel(&FuelPriceTable::builtin(), &[]).unwrap();
        let text = ResultsComponent::fuel_text(&result, Language::English.texts());
        assert!(text.lines.is_empty());
    }
}
