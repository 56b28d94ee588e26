use crate::haptics::DeviceState;
use crate::shared::DisplayState;
use super::mode::TuiState;
use super::sliders::draw_sliders;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

const HELP: &str = "up/down select  left/right adjust  home/end min/max  1-0 preset  space play  i info  r retry  q quit";

pub fn render(frame: &mut Frame, area: Rect, state: &DisplayState, ts: &TuiState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(5), // catalog list
            Constraint::Length(12), // sliders
            Constraint::Length(3), // play/status row
            Constraint::Length(1), // key help
        ])
        .split(area);

    draw_title(frame, sections[0]);
    draw_catalog(frame, sections[1], state);
    let slider_block = Block::default().borders(Borders::ALL).title(" Parameters ");
    let slider_area = slider_block.inner(sections[2]);
    frame.render_widget(slider_block, sections[2]);
    draw_sliders(frame, slider_area, &state.sliders, ts.selected);
    draw_status(frame, sections[3], state);
    frame.render_widget(
        Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray)),
        sections[4],
    );

    if ts.info_open {
        draw_info(frame, area, ts);
    }
}

fn draw_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        "Haptic Playground",
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, area);
}

fn draw_catalog(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let items: Vec<ListItem> = state
        .catalog
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let key = if i == 9 { 0 } else { i + 1 };
            let style = if state.selected_preset == Some(i) {
                Style::default().fg(Color::Black).bg(Color::LightBlue)
            } else {
                Style::default()
            };
            ListItem::new(format!("{key}  {name}")).style(style)
        })
        .collect();
    let title = format!(" {} ", state.catalog_title);
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

fn draw_status(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let (symbol, color) = match state.device_state {
        DeviceState::Ready => ("[ > play ]", Color::Blue),
        DeviceState::Playing => ("[ ~~~~~~ ]", Color::LightBlue),
        DeviceState::Uninitialized => ("[ ...... ]", Color::DarkGray),
        DeviceState::Failed => ("[ !! r  ]", Color::Red),
    };
    let line = Line::from(vec![
        Span::styled(symbol, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(state.device_state.to_string(), Style::default().fg(color)),
        Span::raw("  "),
        Span::raw(state.status.as_str()),
    ]);
    let status = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

// alert-style box over the middle of the screen
fn draw_info(frame: &mut Frame, area: Rect, ts: &TuiState) {
    let field = ts.selected;
    let popup = centered(area, 50, 7);
    frame.render_widget(Clear, popup);
    let body = Paragraph::new(field.description())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", field.label()))
                .title_bottom(" i to close "),
        );
    frame.render_widget(body, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::haptics::test_fixture::FakeEngine;
    use crate::haptics::HapticDevice;
    use crate::middle::Controller;
    use crate::pipeline::{Catalog, ParamField};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen_text(state: &DisplayState, ts: &TuiState) -> String {
        let mut term = Terminal::new(TestBackend::new(100, 32)).unwrap();
        term.draw(|frame| render(frame, frame.area(), state, ts)).unwrap();
        let buffer = term.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn display_state(semantic: bool) -> DisplayState {
        let (engine, _remote) = FakeEngine::new();
        let controller = Controller::new(HapticDevice::new(engine, None), Catalog::detect(semantic));
        controller.display_state()
    }

    #[test]
    fn renders_title_presets_and_sliders() {
        let text = screen_text(&display_state(false), &TuiState::default());
        assert!(text.contains("Haptic Playground"));
        assert!(text.contains("Soft Pulse"));
        assert!(text.contains("Long Vibration"));
        assert!(text.contains("Release Time"));
        assert!(text.contains("1.00"));
        assert!(text.contains("ready"));
    }

    #[test]
    fn renders_the_semantic_catalog_when_available() {
        let text = screen_text(&display_state(true), &TuiState::default());
        assert!(text.contains("Feedback"));
        assert!(text.contains("Level Change"));
        assert!(!text.contains("Soft Pulse"));
    }

    #[test]
    fn info_popover_shows_the_description() {
        let mut ts = TuiState::default();
        ts.selected = ParamField::AttackTime;
        ts.info_open = true;
        let text = screen_text(&display_state(false), &ts);
        assert!(text.contains("Attack Time"));
        assert!(text.contains("haptic pattern's"));
    }

    #[test]
    fn tiny_terminals_do_not_panic() {
        let mut term = Terminal::new(TestBackend::new(10, 4)).unwrap();
        let mut ts = TuiState::default();
        ts.info_open = true;
        let state = display_state(false);
        term.draw(|frame| render(frame, frame.area(), &state, &ts)).unwrap();
    }
}
