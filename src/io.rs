use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;

use crate::events::AppEvent;
use crate::events::CameraEvent;
use crate::events::EngineEvent;
use crate::events::Event;

/// Converts a crossterm event into a texlife event
pub fn convert_event(event: CrossTermEvent) -> Option<Event> {
    match event {
        CrossTermEvent::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            convert_key(key_event)
        }
        CrossTermEvent::Resize(cols, rows) => Some(Event::AppEvent(AppEvent::CameraEvent(
            CameraEvent::Resize { cols, rows },
        ))),
        _ => None,
    }
}

fn convert_key(key_event: KeyEvent) -> Option<Event> {
    let camera = |event| Some(Event::AppEvent(AppEvent::CameraEvent(event)));

    match key_event {
        KeyEvent {
            code: KeyCode::Esc | KeyCode::Char('q'),
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(Event::AppEvent(AppEvent::Exit)),
        KeyEvent {
            code: KeyCode::Char('r'),
            ..
        } => Some(Event::EngineEvent(EngineEvent::Reseed)),
        KeyEvent {
            code: KeyCode::Char('h') | KeyCode::Left,
            ..
        } => camera(CameraEvent::MoveLeft),
        KeyEvent {
            code: KeyCode::Char('j') | KeyCode::Down,
            ..
        } => camera(CameraEvent::MoveDown),
        KeyEvent {
            code: KeyCode::Char('k') | KeyCode::Up,
            ..
        } => camera(CameraEvent::MoveUp),
        KeyEvent {
            code: KeyCode::Char('l') | KeyCode::Right,
            ..
        } => camera(CameraEvent::MoveRight),
        KeyEvent {
            code: KeyCode::Char('0'),
            ..
        } => camera(CameraEvent::ResetView),
        _ => None,
    }
}
