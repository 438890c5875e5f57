use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Text,
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::billing::calculator::calculate;
use crate::billing::{aggregate_fuel, FuelPriceTable, FuelResult, InputMode, TariffResult, Utility};
use crate::config::Config;
use crate::i18n::{Language, Texts};
use crate::ui::components::input_form::{InputField, InputFormComponent};
use crate::ui::components::results::ResultsComponent;

const TABS: [Utility; 3] = [Utility::Electricity, Utility::Water, Utility::Fuel];

/// State of the interactive calculator
pub struct App {
    config: Config,
    fuel_prices: FuelPriceTable,
    language: Language,
    tab: usize,
    electricity: InputFormComponent,
    water: InputFormComponent,
    fuel: InputFormComponent,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let fuel_prices = FuelPriceTable::get_with_fallback(config.fuel_prices.as_deref());
        let language = config.language;
        let texts = language.texts();

        let slab_form = |usage_unit: &str| {
            InputFormComponent::new(vec![
                InputField::new(texts.bill_input),
                InputField::new(format!("{} ({})", texts.usage_input, usage_unit)),
            ])
        };
        let electricity = slab_form(Utility::Electricity.unit());
        let water = slab_form(Utility::Water.unit());
        let fuel = InputFormComponent::new(
            fuel_labels(&fuel_prices, language)
                .into_iter()
                .map(InputField::new)
                .collect(),
        );

        Self {
            config,
            fuel_prices,
            language,
            tab: 0,
            electricity,
            water,
            fuel,
            should_quit: false,
        }
    }

    pub fn utility(&self) -> Utility {
        TABS[self.tab]
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn texts(&self) -> &'static Texts {
        self.language.texts()
    }

    fn form_mut(&mut self) -> &mut InputFormComponent {
        match self.utility() {
            Utility::Electricity => &mut self.electricity,
            Utility::Water => &mut self.water,
            Utility::Fuel => &mut self.fuel,
        }
    }

    fn form(&self) -> &InputFormComponent {
        match self.utility() {
            Utility::Electricity => &self.electricity,
            Utility::Water => &self.water,
            Utility::Fuel => &self.fuel,
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up => self.form_mut().move_selection(-1),
            KeyCode::Down => self.form_mut().move_selection(1),
            KeyCode::Right | KeyCode::Tab => self.tab = (self.tab + 1) % TABS.len(),
            KeyCode::Left | KeyCode::BackTab => self.tab = (self.tab + TABS.len() - 1) % TABS.len(),
            KeyCode::Char('l') | KeyCode::Char('L') => self.toggle_language(),
            KeyCode::Backspace => {
                if let Some(field) = self.form_mut().current_mut() {
                    field.pop();
                }
            }
            KeyCode::Delete => {
                if let Some(field) = self.form_mut().current_mut() {
                    field.clear();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.form_mut().current_mut() {
                    field.push(c);
                }
            }
            _ => {}
        }
    }

    fn toggle_language(&mut self) {
        self.language = self.language.toggle();
        let texts = self.texts();

        for (form, unit) in [
            (&mut self.electricity, Utility::Electricity.unit()),
            (&mut self.water, Utility::Water.unit()),
        ] {
            form.relabel([
                texts.bill_input.to_string(),
                format!("{} ({})", texts.usage_input, unit),
            ]);
        }
        self.fuel.relabel(fuel_labels(&self.fuel_prices, self.language));
    }

    /// Recompute the slab result for the active electricity/water form.
    ///
    /// A failed calculation gives a zeroed result and the error message.
    pub fn tariff_result(&self) -> Option<(TariffResult, Option<String>)> {
        let table = self.config.table_for(self.utility())?;
        let form = self.form();
        let bill = form.fields.first().map(InputField::amount).unwrap_or(0.0);
        let usage = form.fields.get(1).map(InputField::amount).unwrap_or(0.0);

        let outcome = match calculate(InputMode::from_form(bill, usage), &table.slabs) {
            Ok(result) => (result, None),
            Err(e) => (TariffResult::empty(table.slabs.len()), Some(e.to_string())),
        };
        Some(outcome)
    }

    pub fn fuel_result(&self) -> FuelResult {
        let purchases: Vec<(String, f64)> = self
            .fuel_prices
            .fuels
            .iter()
            .zip(&self.fuel.fields)
            .map(|(fuel, field)| (fuel.name.clone(), field.amount()))
            .collect();

        aggregate_fuel(&self.fuel_prices, &purchases).unwrap_or_else(|_| FuelResult::empty())
    }

    pub fn render(&self, f: &mut Frame) {
        let texts = self.texts();
        let form_height = self.form().fields.len() as u16 + 5;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),           // Tabs
                Constraint::Length(form_height), // Inputs
                Constraint::Min(6),              // Results
            ])
            .split(f.area());

        let titles: Vec<String> = TABS
            .iter()
            .map(|utility| texts.utility_title(*utility).to_string())
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.tab)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(texts.title),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(tabs, chunks[0]);

        self.form()
            .render(f, chunks[1], texts.utility_title(self.utility()));

        let bar_width = (chunks[2].width.saturating_sub(12) as usize)
            .min(self.config.bar_width as usize);
        let text = match self.utility() {
            Utility::Fuel => ResultsComponent::fuel_text(&self.fuel_result(), texts),
            utility => match (self.tariff_result(), self.config.table_for(utility)) {
                (Some((result, error)), Some(table)) => ResultsComponent::tariff_text(
                    &result,
                    error.as_deref(),
                    table,
                    texts,
                    bar_width,
                ),
                _ => Text::default(),
            },
        };

        if text.lines.is_empty() {
            f.render_widget(
                Paragraph::new("").block(Block::default().borders(Borders::ALL)),
                chunks[2],
            );
        } else {
            ResultsComponent::render(f, chunks[2], text);
        }
    }
}

fn fuel_labels(prices: &FuelPriceTable, language: Language) -> Vec<String> {
    let texts = language.texts();
    prices
        .fuels
        .iter()
        .map(|fuel| format!("{} ({})", fuel.display_name(language), texts.liters_input))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn test_bill_mode_from_form() {
        let mut app = App::new(Config::default());
        app.handle_key(KeyCode::Right); // water
        type_text(&mut app, "5");

        let (result, error) = app.tariff_result().unwrap();
        assert!(error.is_none());
        assert!((result.total_usage - 101.5).abs() < 1e-9);
    }

    #[test]
    fn test_usage_wins_over_bill() {
        let mut app = App::new(Config::default());
        type_text(&mut app, "5");
        app.handle_key(KeyCode::Down);
        type_text(&mut app, "6000");

        let (result, _) = app.tariff_result().unwrap();
        assert_eq!(result.total_usage, 6000.0);
        assert!((result.new_cost - 59.0).abs() < 1e-9);
    }

    #[test]
    fn test_tab_navigation_wraps() {
        let mut app = App::new(Config::default());
        assert_eq!(app.utility(), Utility::Electricity);
        app.handle_key(KeyCode::Left);
        assert_eq!(app.utility(), Utility::Fuel);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.utility(), Utility::Electricity);
        assert!(app.tariff_result().is_some());
    }

    #[test]
    fn test_fuel_entry() {
        let mut app = App::new(Config::default());
        app.handle_key(KeyCode::Left);
        type_text(&mut app, "10");

        let result = app.fuel_result();
        assert!((result.old_cost - 1.4).abs() < 1e-9);
        assert!((result.new_cost - 2.2).abs() < 1e-9);
    }

    #[test]
    fn test_language_toggle_and_quit() {
        let mut app = App::new(Config::default());
        let start = app.language();
        app.handle_key(KeyCode::Char('L'));
        assert_eq!(app.language(), start.toggle());
        assert!(!app.should_quit);
        app.handle_key(KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_fuel_labels_follow_language() {
        let mut app = App::new(Config {
            language: Language::English,
            ..Config::default()
        });
        assert!(app.fuel.fields[3].label.starts_with("Diesel"));

        app.handle_key(KeyCode::Char('l'));
        assert_eq!(app.fuel.fields[3].label, "ديزل (لتر)");
        assert_eq!(app.fuel.fields[0].label, "جيد 91 (لتر)");

        // lookups still use the ASCII names
        app.handle_key(KeyCode::Left);
        type_text(&mut app, "10");
        assert!((app.fuel_result().old_cost - 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_render_smoke() {
        let mut app = App::new(Config::default());
        app.handle_key(KeyCode::Down);
        type_text(&mut app, "4500");

        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
    }
}
