use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// One editable numeric field
#[derive(Debug, Clone, PartialEq)]
pub struct InputField {
    pub label: String,
    pub value: String,
}

impl InputField {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
        }
    }

    /// Append a digit or a single decimal point; anything else is ignored
    pub fn push(&mut self, c: char) -> bool {
        if c.is_ascii_digit() || (c == '.' && !self.value.contains('.')) {
            self.value.push(c);
            true
        } else {
            false
        }
    }

    pub fn pop(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Empty and "." read as zero
    pub fn amount(&self) -> f64 {
        if self.value.is_empty() || self.value == "." {
            return 0.0;
        }
        self.value.parse().unwrap_or(0.0)
    }
}

/// Vertical list of numeric fields with a selection cursor
pub struct InputFormComponent {
    selected_field: usize,
    pub fields: Vec<InputField>,
}

impl InputFormComponent {
    pub fn new(fields: Vec<InputField>) -> Self {
        Self {
            selected_field: 0,
            fields,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected_field
    }

    pub fn move_selection(&mut self, delta: i32) {
        if self.fields.is_empty() {
            return;
        }

        let new_selection = (self.selected_field as i32 + delta)
            .max(0)
            .min((self.fields.len() - 1) as i32) as usize;
        self.selected_field = new_selection;
    }

    pub fn current_mut(&mut self) -> Option<&mut InputField> {
        self.fields.get_mut(self.selected_field)
    }

    /// Replace labels (after a language switch) without touching values
    pub fn relabel<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (field, label) in self.fields.iter_mut().zip(labels) {
            field.label = label.into();
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, title: &str) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title.to_string())
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        f.render_widget(block, area);

        // Split into fields and help areas
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Fields
                Constraint::Length(2), // Help text
            ])
            .split(inner);

        let items: Vec<ListItem> = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let is_selected = i == self.selected_field;
                let value = if field.value.is_empty() {
                    "0"
                } else {
                    field.value.as_str()
                };

                let line = if is_selected {
                    format!("▶ {}: {}▏", field.label, value)
                } else {
                    format!("  {}: {}", field.label, value)
                };

                if is_selected {
                    ListItem::new(line).style(Style::default().fg(Color::Cyan))
                } else {
                    ListItem::new(line)
                }
            })
            .collect();

        f.render_widget(List::new(items), chunks[0]);

        let help_text = "↑/↓: Field  0-9 .: Edit  ←/→ Tab: Utility  L: Language  Esc: Quit";
        let help = Paragraph::new(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::TOP));
        f.render_widget(help, chunks[1]);
    }
}
