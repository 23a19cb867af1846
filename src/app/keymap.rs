use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::types::{App, EditAction, RowMove, SelectorEvent};

/// Translates a key press into a selector event. Keys without a binding
/// map to `None`.
pub fn map_key(app: &App, key: KeyEvent) -> Option<SelectorEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if app.show_help {
        return map_help_key(key);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    let event = match key.code {
        KeyCode::Esc => SelectorEvent::Cancel,
        KeyCode::F(1) => SelectorEvent::ToggleHelp,
        KeyCode::Tab => SelectorEvent::NextField,
        KeyCode::BackTab => SelectorEvent::PrevField,
        KeyCode::Enter if app.can_pick() => SelectorEvent::PickRow,
        KeyCode::Enter => SelectorEvent::Confirm,

        KeyCode::Up => SelectorEvent::MoveRow(RowMove::Up),
        KeyCode::Down => SelectorEvent::MoveRow(RowMove::Down),
        KeyCode::PageUp => SelectorEvent::MoveRow(RowMove::PageUp),
        KeyCode::PageDown => SelectorEvent::MoveRow(RowMove::PageDown),
        KeyCode::Home if ctrl => SelectorEvent::MoveRow(RowMove::First),
        KeyCode::End if ctrl => SelectorEvent::MoveRow(RowMove::Last),

        KeyCode::Left => SelectorEvent::Edit(EditAction::Left),
        KeyCode::Right => SelectorEvent::Edit(EditAction::Right),
        KeyCode::Home => SelectorEvent::Edit(EditAction::Home),
        KeyCode::End => SelectorEvent::Edit(EditAction::End),
        KeyCode::Backspace => SelectorEvent::Edit(EditAction::Backspace),
        KeyCode::Delete => SelectorEvent::Edit(EditAction::Delete),

        KeyCode::Char(c) if ctrl => match c {
            'c' => SelectorEvent::Cancel,
            's' => SelectorEvent::Confirm,
            'p' => SelectorEvent::MoveRow(RowMove::Up),
            'n' => SelectorEvent::MoveRow(RowMove::Down),
            'a' => SelectorEvent::Edit(EditAction::Home),
            'e' => SelectorEvent::Edit(EditAction::End),
            'u' => SelectorEvent::Edit(EditAction::ClearLine),
            'w' => SelectorEvent::Edit(EditAction::DeleteWord),
            _ => return None,
        },
        KeyCode::Char(_) if alt => return None,
        KeyCode::Char(c) => SelectorEvent::Edit(EditAction::Insert(c)),
        _ => return None,
    };
    Some(event)
}

fn map_help_key(key: KeyEvent) -> Option<SelectorEvent> {
    match key.code {
        KeyCode::F(1) | KeyCode::Esc | KeyCode::Char('q') => Some(SelectorEvent::ToggleHelp),
        KeyCode::Up | KeyCode::Char('k') => Some(SelectorEvent::ScrollHelp(-1)),
        KeyCode::Down | KeyCode::Char('j') => Some(SelectorEvent::ScrollHelp(1)),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(SelectorEvent::Cancel)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::types::SelectorDefaults;
    use crate::hosts::Catalog;
    use crate::models::{HostRecord, Source};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app_with_hosts() -> App {
        let catalog = Catalog::build(vec![HostRecord::new("web", Source::ConfigFile)]);
        App::new(catalog, SelectorDefaults::default())
    }

    #[test]
    fn enter_picks_on_host_fields_and_confirms_elsewhere() {
        let app = app_with_hosts();
        assert_eq!(map_key(&app, key(KeyCode::Enter)), Some(SelectorEvent::PickRow));

        let app = app
            .update(SelectorEvent::NextField)
            .update(SelectorEvent::NextField);
        assert_eq!(map_key(&app, key(KeyCode::Enter)), Some(SelectorEvent::Confirm));

        let empty = App::new(Catalog::default(), SelectorDefaults::default());
        assert_eq!(map_key(&empty, key(KeyCode::Enter)), Some(SelectorEvent::Confirm));
    }

    #[test]
    fn control_bindings() {
        let app = app_with_hosts();
        assert_eq!(map_key(&app, ctrl('c')), Some(SelectorEvent::Cancel));
        assert_eq!(map_key(&app, ctrl('s')), Some(SelectorEvent::Confirm));
        assert_eq!(
            map_key(&app, ctrl('u')),
            Some(SelectorEvent::Edit(EditAction::ClearLine))
        );
        assert_eq!(map_key(&app, ctrl('z')), None);
        assert_eq!(
            map_key(&app, KeyEvent::new(KeyCode::Home, KeyModifiers::CONTROL)),
            Some(SelectorEvent::MoveRow(RowMove::First))
        );
    }

    #[test]
    fn plain_chars_insert_and_releases_are_ignored() {
        let app = app_with_hosts();
        assert_eq!(
            map_key(&app, key(KeyCode::Char('x'))),
            Some(SelectorEvent::Edit(EditAction::Insert('x')))
        );
        let mut release = key(KeyCode::Char('x'));
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(&app, release), None);
    }

    #[test]
    fn help_popup_captures_keys() {
        let app = app_with_hosts().update(SelectorEvent::ToggleHelp);
        assert_eq!(map_key(&app, key(KeyCode::Char('j'))), Some(SelectorEvent::ScrollHelp(1)));
        assert_eq!(map_key(&app, key(KeyCode::Esc)), Some(SelectorEvent::ToggleHelp));
        assert_eq!(map_key(&app, key(KeyCode::Enter)), None);
    }
}
