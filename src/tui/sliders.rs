use crate::pipeline::ParamField;
use crate::shared::SliderState;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Gauge, Paragraph};
use ratatui::Frame;

const LABEL_WIDTH: u16 = 22;

pub fn draw_sliders(frame: &mut Frame, area: Rect, sliders: &[SliderState], selected: ParamField) {
    let row_constraints = vec![Constraint::Length(2); sliders.len()];
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(row_constraints)
        .split(area);

    for (slider, row_area) in sliders.iter().zip(rows.iter()) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(LABEL_WIDTH), Constraint::Min(10)])
            .split(*row_area);

        let is_selected = slider.field == selected;
        let label_style = if is_selected {
            Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let cursor = if is_selected { ">" } else { " " };
        let label = Paragraph::new(format!(
            "{} {:<13}{:>5.2}",
            cursor,
            slider.field.label(),
            slider.value
        ))
        .style(label_style);
        frame.render_widget(label, cols[0]);

        let gauge_color = if is_selected { Color::Cyan } else { Color::DarkGray };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(gauge_color).bg(Color::Black))
            .ratio(slider.ratio())
            .label(format!("{:.1}..{:.1}", slider.min, slider.max));
        let gauge_area = Rect { height: cols[1].height.min(1), ..cols[1] };
        frame.render_widget(gauge, gauge_area);
    }
}
