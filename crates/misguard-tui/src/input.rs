use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

use crate::action::Action;
use crate::app::InputMode;

/// Map a crossterm terminal event to a TUI action, respecting input mode.
pub fn map_event(event: &Event, input_mode: &InputMode) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            // Ctrl+C always quits regardless of mode
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Action::Quit;
            }

            match input_mode {
                InputMode::Normal => map_key_normal(key),
                InputMode::TextInput => map_key_text_input(key),
                InputMode::MultilineInput => map_key_multiline_input(key),
            }
        }
        // Bracketed paste arrives as one event, so embedded newlines never
        // reach the normal-mode key map.
        Event::Paste(text) => match input_mode {
            InputMode::Normal => Action::None,
            _ => Action::Paste(text.clone()),
        },
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(w, h) => Action::Resize(*w, *h),
        _ => Action::None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::ScrollResultsDown,
        MouseEventKind::ScrollUp => Action::ScrollResultsUp,
        _ => Action::None,
    }
}

fn map_key_normal(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => Action::NextPage,
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => Action::PrevPage,
        KeyCode::Char(c @ '1'..='5') => Action::GoToPage(c as usize - '1' as usize),
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Enter => Action::Activate,
        KeyCode::Esc => Action::NavigateBack,
        KeyCode::Char('t') => Action::ToggleTheme,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char('b') => Action::OpenBackendConfig,
        KeyCode::Char('x') => Action::DismissNotification,
        KeyCode::Char('X') => Action::DismissAllNotifications,
        KeyCode::Char('s') => Action::Submit,
        KeyCode::Char('e') => Action::LoadExample,
        KeyCode::Char('c') => Action::ClearForm,
        KeyCode::Char('m') => Action::ToggleMode,
        KeyCode::Char('d') => Action::WatchDemo,
        KeyCode::PageDown | KeyCode::Char('J') => Action::ScrollResultsDown,
        KeyCode::PageUp | KeyCode::Char('K') => Action::ScrollResultsUp,
        _ => Action::None,
    }
}

fn map_key_text_input(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::CancelInput,
        KeyCode::Enter => Action::ConfirmInput,
        KeyCode::Char(c) => Action::TextInput(c),
        KeyCode::Backspace => Action::Backspace,
        _ => Action::None,
    }
}

/// Long-form fields: Enter inserts a line break, Esc or Tab finishes.
fn map_key_multiline_input(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Tab => Action::ConfirmInput,
        KeyCode::Enter => Action::TextInput('\n'),
        KeyCode::Char(c) => Action::TextInput(c),
        KeyCode::Backspace => Action::Backspace,
        _ => Action::None,
    }
}
