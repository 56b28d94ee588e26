use std::time::Duration;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crate::shared::InputEvent;
use super::mode::TuiState;

// poll for input from tui, tracks cursor/popover state in tuistate,
// resolves keys to semantic input events for the controller
pub fn poll_input(timeout: Duration, ts: &mut TuiState) -> anyhow::Result<Vec<InputEvent>> {
    if !event::poll(timeout)? {
        return Ok(vec![]);
    }

    if let Event::Key(key) = event::read()? {
        if key.kind != KeyEventKind::Press {
            return Ok(vec![]);
        }
        return Ok(handle_key(key.code, ts));
    }
    Ok(vec![])
}

fn handle_key(code: KeyCode, ts: &mut TuiState) -> Vec<InputEvent> {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => vec![InputEvent::Quit],
        KeyCode::Char(' ') | KeyCode::Enter => vec![InputEvent::PlayPress],
        KeyCode::Char('r') => vec![InputEvent::Prepare],

        // slider cursor, the popover follows it
        KeyCode::Up => { ts.selected = ts.selected.prev(); vec![] }
        KeyCode::Down => { ts.selected = ts.selected.next(); vec![] }
        KeyCode::Char('i') => { ts.info_open = !ts.info_open; vec![] }

        KeyCode::Left | KeyCode::Char('-') => resolve_nudge(-1.0, ts),
        KeyCode::Right | KeyCode::Char('=') => resolve_nudge(1.0, ts),
        KeyCode::Home => resolve_jump(true, ts),
        KeyCode::End => resolve_jump(false, ts),

        // catalog entries 1-10
        KeyCode::Char(c @ '0'..='9') => vec![InputEvent::SelectPreset(char_to_preset(c))],

        _ => vec![],
    }
}

fn resolve_nudge(direction: f32, ts: &TuiState) -> Vec<InputEvent> {
    let field = ts.selected;
    vec![InputEvent::AdjustParam(field, direction * ts.step_for(field))]
}

fn resolve_jump(to_min: bool, ts: &TuiState) -> Vec<InputEvent> {
    let range = ts.selected.range();
    let value = if to_min { *range.start() } else { *range.end() };
    vec![InputEvent::SetParam(ts.selected, value)]
}

// '1' is the first entry, '0' the tenth
fn char_to_preset(c: char) -> u8 {
    match c {
        '0' => 9,
        _ => c as u8 - b'1',
    }
}
