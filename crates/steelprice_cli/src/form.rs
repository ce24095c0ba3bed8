//! Interactive estimator form.
//!
//! Holds the form state (grade name, category, one text field per element),
//! recomputes the estimate after every edit and renders it with ratatui.
//! Key handling is independent of the terminal so it can be tested directly.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use steelprice_core::{
    display_grade_name, format, parse_percent, Composition, PriceCalculator, PriceEstimate,
    PriceSheet, PricingResult, IRON_LABEL,
};

/// Increment applied by `+` / `-`.
const STEP: f64 = 0.1;
const INPUT_COLUMNS: usize = 3;

/// Which input has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    GradeName,
    Category,
    Element(usize),
}

/// Application state for the estimator form
pub struct FormApp<'a> {
    sheet: &'a PriceSheet,
    grade_name: String,
    category_index: usize,
    inputs: Vec<String>,
    focus: usize,
    estimate: Option<PriceEstimate>,
    error_message: Option<String>,
}

impl<'a> FormApp<'a> {
    pub fn new(sheet: &'a PriceSheet) -> Self {
        let mut app = Self {
            sheet,
            grade_name: String::new(),
            category_index: 0,
            inputs: vec![String::new(); sheet.elements().len()],
            focus: 0,
            estimate: None,
            error_message: None,
        };
        app.recompute();
        app
    }

    pub fn focused(&self) -> Field {
        match self.focus {
            0 => Field::GradeName,
            1 => Field::Category,
            n => Field::Element(n - 2),
        }
    }

    pub fn estimate(&self) -> Option<&PriceEstimate> {
        self.estimate.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn set_grade_name(&mut self, name: impl Into<String>) {
        self.grade_name = name.into();
    }

    pub fn select_category(&mut self, selector: &str) -> PricingResult<()> {
        let sheet = self.sheet;
        let category = sheet.category(selector)?;
        self.category_index = sheet
            .categories()
            .iter()
            .position(|c| c.name == category.name)
            .unwrap_or(0);
        self.recompute();
        Ok(())
    }

    /// Current percentage of an element field; blank or partial input counts as 0.
    pub fn percent(&self, index: usize) -> f64 {
        self.inputs
            .get(index)
            .and_then(|text| parse_percent(text).ok())
            .unwrap_or(0.0)
    }

    fn field_count(&self) -> usize {
        self.inputs.len() + 2
    }

    /// Handle keyboard input; returns true when the form should close.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::BackTab => {
                self.focus = (self.focus + self.field_count() - 1) % self.field_count()
            }
            KeyCode::Down | KeyCode::Tab | KeyCode::Enter => {
                self.focus = (self.focus + 1) % self.field_count()
            }
            _ => match self.focused() {
                Field::GradeName => self.edit_name(key.code),
                Field::Category => return self.edit_category(key.code),
                Field::Element(index) => return self.edit_element(index, key.code),
            },
        }
        false
    }

    fn edit_name(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.grade_name.push(c),
            KeyCode::Backspace => {
                self.grade_name.pop();
            }
            _ => {}
        }
    }

    fn edit_category(&mut self, code: KeyCode) -> bool {
        let count = self.sheet.categories().len();
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Left => self.category_index = (self.category_index + count - 1) % count,
            KeyCode::Right | KeyCode::Char(' ') => {
                self.category_index = (self.category_index + 1) % count
            }
            KeyCode::Char(c) => {
                if let Some(n) = c.to_digit(10) {
                    if (1..=count).contains(&(n as usize)) {
                        self.category_index = n as usize - 1;
                    }
                }
            }
            _ => return false,
        }
        self.recompute();
        false
    }

    fn edit_element(&mut self, index: usize, code: KeyCode) -> bool {
        let current = self.percent(index);
        let updated = match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('+') | KeyCode::Right => Some(step(current, STEP)),
            KeyCode::Char('-') | KeyCode::Left => Some(step(current, -STEP)),
            KeyCode::Backspace => {
                let mut text = self.inputs[index].clone();
                text.pop();
                Some(text)
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                let candidate = format!("{}{}", self.inputs[index], c);
                accept_typed(&candidate).then_some(candidate)
            }
            _ => None,
        };

        if let Some(text) = updated {
            self.inputs[index] = text;
            self.recompute();
        }
        false
    }

    /// Recompute the estimate from the current inputs.
    fn recompute(&mut self) {
        let composition: Composition = self
            .sheet
            .elements()
            .iter()
            .enumerate()
            .map(|(i, element)| (element.label(), self.percent(i)))
            .collect();

        let band = self.sheet.categories()[self.category_index].band;
        match PriceCalculator::new(self.sheet).compute(&composition, &band) {
            Ok(estimate) => {
                self.estimate = Some(estimate);
                self.error_message = None;
            }
            Err(_) => {
                self.estimate = None;
                self.error_message = Some(format!(
                    "⚠️  Total percentage is {}! (Must be ≤ 100)",
                    format::percent(composition.total_percent())
                ));
            }
        }
    }

    /// Render the UI
    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(12),   // Body
                Constraint::Length(3), // Footer
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.input_height()), // Inputs
                Constraint::Min(8),                      // Results
            ])
            .split(chunks[1]);

        self.render_inputs(f, body[0]);
        self.render_results(f, body[1]);
        self.render_footer(f, chunks[2]);
    }

    fn input_height(&self) -> u16 {
        let rows = self.inputs.len().div_ceil(INPUT_COLUMNS);
        // name + category + blank + element rows + borders
        u16::try_from(rows + 5).unwrap_or(u16::MAX)
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let as_of = self.sheet.as_of().unwrap_or("n/a");
        let title = vec![
            Line::from(vec![
                Span::styled(
                    "🏭 Steel Retail Price Estimator",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  |  Prices as of: "),
                Span::styled(as_of.to_string(), Style::default().fg(Color::Green)),
            ]),
            Line::from(Span::styled(
                "Raw material cost and estimated retail price range",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let paragraph = Paragraph::new(title).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_inputs(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Chemical Composition (%)");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(inner);

        let category = &self.sheet.categories()[self.category_index];
        let header = vec![
            Line::from(vec![
                Span::raw("Steel grade name: "),
                Span::styled(
                    if self.grade_name.is_empty() {
                        "e.g. 1.2714".to_string()
                    } else {
                        self.grade_name.clone()
                    },
                    self.field_style(Field::GradeName, self.grade_name.is_empty()),
                ),
            ]),
            Line::from(vec![
                Span::raw("Category:         "),
                Span::styled(
                    format!(
                        "◀ {}. {} ▶",
                        self.category_index + 1,
                        category.name
                    ),
                    self.field_style(Field::Category, false),
                ),
            ]),
        ];
        f.render_widget(Paragraph::new(header), rows[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); INPUT_COLUMNS])
            .split(rows[1]);

        for (col, column_area) in columns.iter().enumerate() {
            let lines: Vec<Line> = self
                .sheet
                .elements()
                .iter()
                .enumerate()
                .filter(|(i, _)| i % INPUT_COLUMNS == col)
                .map(|(i, element)| {
                    let text = &self.inputs[i];
                    let shown = if text.is_empty() {
                        "0.00".to_string()
                    } else {
                        text.clone()
                    };
                    Line::from(vec![
                        Span::raw(format!("{:<17}", element.label())),
                        Span::styled(
                            format!("[{:>6}]", shown),
                            self.field_style(Field::Element(i), text.is_empty()),
                        ),
                    ])
                })
                .collect();
            f.render_widget(Paragraph::new(lines), *column_area);
        }
    }

    fn field_style(&self, field: Field, placeholder: bool) -> Style {
        let style = if placeholder {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        if self.focused() == field {
            style.fg(Color::Black).bg(Color::Yellow)
        } else {
            style
        }
    }

    fn render_results(&self, f: &mut Frame, area: Rect) {
        let estimate = match self.estimate() {
            Some(estimate) => estimate,
            None => {
                let message = self.error_message().unwrap_or_default().to_string();
                let paragraph = Paragraph::new(Line::from(Span::styled(
                    message,
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )))
                .block(Block::default().borders(Borders::ALL).title("Results"));
                f.render_widget(paragraph, area);
                return;
            }
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(6)])
            .split(area);

        self.render_summary(f, rows[0], estimate);

        let charts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[1]);

        self.render_chart(f, charts[0], estimate);
        self.render_breakdown(f, charts[1], estimate);
    }

    fn render_summary(&self, f: &mut Frame, area: Rect, estimate: &PriceEstimate) {
        let c = self.sheet.currency();
        let label = Style::default().fg(Color::Cyan);
        let lines = vec![
            Line::from(vec![
                Span::styled("Iron Balance: ", label),
                Span::raw(format::percent(estimate.iron_percent)),
                Span::raw("  |  "),
                Span::styled("Raw Melt Cost: ", label),
                Span::raw(format!("{} /kg", format::money(c, estimate.raw_cost_per_kg))),
                Span::raw("  |  "),
                Span::styled("Multiplier: ", label),
                Span::raw(estimate.band.to_string()),
            ]),
            Line::from(vec![
                Span::styled("💰 Estimated Retail Price: ", label),
                Span::styled(
                    format!(
                        "{} — {} / kg",
                        format::money(c, estimate.retail_min_per_kg),
                        format::money(c, estimate.retail_max_per_kg)
                    ),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                format!(
                    "Per Tonne: {} - {}",
                    format::money_whole(c, estimate.retail_min_per_tonne()),
                    format::money_whole(c, estimate.retail_max_per_tonne())
                ),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let title = format!("Results for: {}", display_grade_name(&self.grade_name));
        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(paragraph, area);
    }

    fn render_chart(&self, f: &mut Frame, area: Rect, estimate: &PriceEstimate) {
        let c = self.sheet.currency();
        let bars: Vec<Bar> = estimate
            .breakdown
            .iter()
            .map(|item| {
                Bar::default()
                    .value(bar_value(item.cost_per_kg))
                    .label(Line::from(self.short_label(&item.element)))
                    .text_value(format::money(c, item.cost_per_kg))
                    .style(Style::default().fg(if item.element == IRON_LABEL {
                        Color::Gray
                    } else {
                        Color::Cyan
                    }))
            })
            .collect();

        let chart = BarChart::default()
            .block(Block::default().borders(Borders::ALL).title("Cost Drivers"))
            .data(BarGroup::default().bars(&bars))
            .bar_width(6)
            .bar_gap(1);
        f.render_widget(chart, area);
    }

    fn render_breakdown(&self, f: &mut Frame, area: Rect, estimate: &PriceEstimate) {
        let header = Row::new(["Element", "%", "Cost /kg"].map(|h| {
            Cell::from(h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        }));

        let rows: Vec<Row> = estimate
            .breakdown
            .iter()
            .map(|item| {
                Row::new(vec![
                    Cell::from(item.element.clone()),
                    Cell::from(format::percent(item.percent)),
                    Cell::from(format!("{:.4}", item.cost_per_kg)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(50),
                Constraint::Percentage(22),
                Constraint::Percentage(28),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Detailed Cost Breakdown"),
        );
        f.render_widget(table, area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let help = Line::from(Span::styled(
            "↑/↓ move | ←/→ change category or step 0.1 | +/- step | type digits | Esc quit",
            Style::default().fg(Color::DarkGray),
        ));
        let paragraph = Paragraph::new(help).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    /// Chart label: the chemical symbol, "Fe" for iron.
    fn short_label(&self, label: &str) -> String {
        if label == IRON_LABEL {
            return "Fe".to_string();
        }
        self.sheet
            .element(label)
            .ok()
            .and_then(|e| e.symbol.clone())
            .unwrap_or_else(|| label.chars().take(6).collect())
    }
}

/// Step a value by `delta`, clamped to 0–100, formatted with two decimals.
fn step(current: f64, delta: f64) -> String {
    format!("{:.2}", (current + delta).clamp(0.0, 100.0))
}

/// Typed input is kept while it is a partial or complete number in 0–100.
fn accept_typed(candidate: &str) -> bool {
    if candidate == "." {
        return true;
    }
    if candidate.matches('.').count() > 1 {
        return false;
    }
    candidate
        .parse::<f64>()
        .is_ok_and(|value| (0.0..=100.0).contains(&value))
}

/// Bars are integer-valued, so costs are charted in thousandths.
fn bar_value(cost_per_kg: f64) -> u64 {
    (cost_per_kg * 1000.0).round().max(0.0) as u64
}
