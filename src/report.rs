use ansi_term::{Colour, Style};

use crate::billing::{
    CostComparison, FuelResult, TariffResult, TariffTable, UsageAllocation, Utility,
};
use crate::i18n::{Language, Texts};

const BAR_CHAR: &str = "█";

/// Parse "#rrggbb" into a terminal colour
pub fn parse_hex_color(hex: &str) -> Option<Colour> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Colour::RGB(r, g, b))
}

/// Split `width` cells across slabs in proportion to their usage.
///
/// Uses largest remainders so the cells always add up to `width` when there is any usage.
pub fn segment_widths(allocation: &UsageAllocation, width: usize) -> Vec<usize> {
    let total = allocation.total();
    if total <= 0.0 || width == 0 {
        return vec![0; allocation.len()];
    }

    let exact: Vec<f64> = allocation
        .iter()
        .map(|usage| usage / total * width as f64)
        .collect();
    let mut cells: Vec<usize> = exact.iter().map(|e| e.floor() as usize).collect();

    let assigned: usize = cells.iter().sum();
    let mut order: Vec<usize> = (0..exact.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
    });

    for &i in order.iter().take(width.saturating_sub(assigned)) {
        cells[i] += 1;
    }

    cells
}

/// Old/new/difference block shared by slab and fuel results
pub fn render_metrics(comparison: &CostComparison, texts: &Texts) -> String {
    format!(
        "{}\n  {}: {:.3} {}\n  {}: {:.3} {}\n  {}: {:.3} {}\n  {}: {:.1}\n",
        texts.results,
        texts.old_bill,
        comparison.old_cost,
        texts.currency,
        texts.new_bill,
        comparison.new_cost,
        texts.currency,
        texts.difference,
        comparison.difference,
        texts.currency,
        texts.increase,
        comparison.percent_change
    )
}

/// Horizontal stacked bar of per-slab usage followed by a legend
pub fn render_usage_bar(
    allocation: &UsageAllocation,
    table: &TariffTable,
    texts: &Texts,
    width: usize,
    color: bool,
) -> String {
    let unit = table.utility.unit();
    let widths = segment_widths(allocation, width);

    let mut bar = String::new();
    for (i, cells) in widths.iter().enumerate() {
        let segment = BAR_CHAR.repeat(*cells);
        bar.push_str(&paint(&segment, table.color_for(i), color));
    }

    let mut out = format!("  {}: {}\n", texts.usage_axis, bar);
    out.push_str(&format!("  {}:\n", texts.slab_legend));
    for (i, usage) in allocation.iter().enumerate() {
        out.push_str(&format!(
            "    {} {}: {:.3} {}\n",
            paint("■", table.color_for(i), color),
            texts.slab_name(i),
            usage,
            unit
        ));
    }
    out
}

/// Full terminal report for an electricity or water result
pub fn render_tariff_report(
    result: &TariffResult,
    table: &TariffTable,
    texts: &Texts,
    width: usize,
    color: bool,
) -> String {
    let mut out = String::new();
    out.push_str(&heading(texts.utility_title(table.utility), color));
    out.push_str(&render_metrics(&result.comparison(), texts));
    out.push_str(&format!(
        "  {}: {:.1} {}\n",
        texts.usage_label(table.utility),
        result.total_usage,
        table.utility.unit()
    ));
    out.push_str(&render_usage_bar(
        &result.allocation,
        table,
        texts,
        width,
        color,
    ));
    out
}

/// Terminal report for fuel; `None` when nothing was bought at the old prices
pub fn render_fuel_report(result: &FuelResult, language: Language, color: bool) -> Option<String> {
    let texts = language.texts();
    let comparison = result.comparison();
    if !comparison.has_baseline() {
        return None;
    }

    let mut out = String::new();
    out.push_str(&heading(texts.fuel, color));
    out.push_str(&render_metrics(&comparison, texts));
    out.push_str(&format!(
        "  {}: {:.3} {}\n",
        texts.liters_used,
        result.total_liters,
        Utility::Fuel.unit()
    ));
    for line in &result.lines {
        out.push_str(&format!(
            "    {}: {:.3} {} → {:.3} / {:.3} {}\n",
            line.display_name(language),
            line.liters,
            texts.liters_input,
            line.old_cost,
            line.new_cost,
            texts.currency
        ));
    }
    Some(out)
}

fn heading(text: &str, color: bool) -> String {
    if color {
        format!("{}\n", Style::new().bold().paint(text))
    } else {
        format!("{}\n", text)
    }
}

fn paint(text: &str, hex: &str, color: bool) -> String {
    if !color || text.is_empty() {
        return text.to_string();
    }
    match parse_hex_color(hex) {
        Some(colour) => colour.paint(text).to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::calculator::calculate;
    use crate::billing::{aggregate_fuel, FuelPriceTable, InputMode};

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#27ae60"), Some(Colour::RGB(0x27, 0xae, 0x60)));
        assert_eq!(parse_hex_color("e74c3c"), Some(Colour::RGB(0xe7, 0x4c, 0x3c)));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
        // six bytes, but not six characters
        assert_eq!(parse_hex_color("€€"), None);
        assert_eq!(parse_hex_color("#ab€c"), None);
    }

    #[test]
    fn test_bar_with_non_ascii_colour() {
        let mut table = TariffTable::electricity();
        table.colors = vec!["€€".to_string()];
        let allocation = UsageAllocation::new(vec![3000.0, 0.0, 0.0]);
        let bar = render_usage_bar(&allocation, &table, Language::English.texts(), 10, true);
        assert_eq!(bar.matches(BAR_CHAR).count(), 10);
        assert!(!bar.contains("\x1b[38"));
    }

    #[test]
    fn test_segment_widths() {
        let allocation = UsageAllocation::new(vec![3000.0, 2000.0, 1000.0]);
        assert_eq!(segment_widths(&allocation, 60), vec![30, 20, 10]);

        let allocation = UsageAllocation::new(vec![1.0, 1.0, 1.0]);
        assert_eq!(segment_widths(&allocation, 10).iter().sum::<usize>(), 10);

        let allocation = UsageAllocation::zeroed(3);
        assert_eq!(segment_widths(&allocation, 10), vec![0, 0, 0]);
    }

    #[test]
    fn test_tariff_report_contents() {
        let table = TariffTable::electricity();
        let result = calculate(InputMode::Usage(6000.0), &table.slabs).unwrap();
        let report = render_tariff_report(
            &result,
            &table,
            Language::English.texts(),
            30,
            false,
        );

        assert!(report.contains("Previous bill: 43.000 BHD"));
        assert!(report.contains("Current bill: 59.000 BHD"));
        assert!(report.contains("Difference: 16.000 BHD\n"));
        assert!(report.contains("Increase %: 37.2\n"));
        assert!(report.contains("Units consumed: 6000.0 kWh"));
        assert!(report.contains("Third slab: 1000.000 kWh"));
        assert_eq!(report.matches(BAR_CHAR).count(), 30);
    }

    #[test]
    fn test_colored_bar_has_escape_codes() {
        let table = TariffTable::water();
        let allocation = UsageAllocation::new(vec![60.0, 40.0, 0.0]);
        let bar = render_usage_bar(&allocation, &table, Language::Arabic.texts(), 10, true);
        assert!(bar.contains("\x1b["));
        assert!(bar.contains("الشريحة الأولى"));
    }

    #[test]
    fn test_fuel_report_requires_baseline() {
        let prices = FuelPriceTable::builtin();

        let empty = aggregate_fuel(&prices, &[("Diesel".to_string(), 0.0)]).unwrap();
        assert!(render_fuel_report(&empty, Language::English, false).is_none());

        let result = aggregate_fuel(&prices, &[("Jayyid 91".to_string(), 10.0)]).unwrap();
        let report = render_fuel_report(&result, Language::English, false).unwrap();
        assert!(report.contains("Previous bill: 1.400 BHD"));
        assert!(report.contains("Difference: 0.800 BHD\n"));
        assert!(report.contains("Increase %: 57.1\n"));
        assert!(report.contains("Liters used: 10.000 liters"));
    }
}
