use ratatui::widgets::TableState;

use crate::app::types::{
    App, EditAction, FieldId, Outcome, RowMove, Selection, SelectorDefaults, SelectorEvent,
    TextField, ViewLayout,
};
use crate::hosts::Catalog;
use crate::models::{HostRecord, Source};

/// Two rows of bordered fields, status bar and footer.
const CHROME_HEIGHT: u16 = 3 + 3 + 1 + 1;
const DEFAULT_SIZE: (u16, u16) = (80, 24);

impl ViewLayout {
    pub fn new(width: u16, height: u16) -> Self {
        // borders and highlight symbol
        let inner = width.saturating_sub(4);
        let alias = inner * 30 / 100;
        let user = inner * 15 / 100;
        let hostname = inner * 30 / 100;
        let port = inner * 8 / 100;
        let source = inner.saturating_sub(alias + user + hostname + port);

        Self {
            width,
            height,
            field_width: (width / 2).saturating_sub(2),
            columns: [alias, user, hostname, port, source],
            // table borders and header
            table_rows: height.saturating_sub(CHROME_HEIGHT + 3),
        }
    }
}

impl App {
    pub fn new(catalog: Catalog, defaults: SelectorDefaults) -> Self {
        let fields = [
            TextField::new(defaults.target),
            TextField::new(defaults.proxy_jump),
            TextField::new(defaults.options),
            TextField::new(defaults.command),
        ];
        let mut app = Self {
            catalog,
            fields,
            focus: FieldId::Target,
            filter_query: String::new(),
            filtered: Vec::new(),
            table_state: TableState::default(),
            layout: ViewLayout::new(DEFAULT_SIZE.0, DEFAULT_SIZE.1),
            status_message: None,
            show_help: false,
            help_scroll: 0,
            quitting: false,
            result: None,
        };
        app.filtered = app.catalog.filter("");
        app.refilter();
        app.sync_table_state();
        app
    }

    /// Consumes one event and returns the next state.
    pub fn update(mut self, event: SelectorEvent) -> Self {
        self.handle(event);
        self
    }

    pub fn handle(&mut self, event: SelectorEvent) {
        if self.quitting {
            return;
        }
        if !matches!(event, SelectorEvent::Resize { .. }) {
            self.status_message = None;
        }

        match event {
            SelectorEvent::NextField => self.cycle_focus(1),
            SelectorEvent::PrevField => self.cycle_focus(FieldId::ALL.len() - 1),
            SelectorEvent::Edit(action) => self.edit(action),
            SelectorEvent::MoveRow(movement) => self.move_row(movement),
            SelectorEvent::PickRow => self.pick_row(),
            SelectorEvent::Confirm => self.confirm(),
            SelectorEvent::Cancel => {
                tracing::info!("Selector cancelled");
                self.quitting = true;
                self.result = None;
            }
            SelectorEvent::Resize { width, height } => {
                self.layout = ViewLayout::new(width, height);
            }
            SelectorEvent::ToggleHelp => {
                self.show_help = !self.show_help;
                self.help_scroll = 0;
            }
            SelectorEvent::ScrollHelp(delta) => {
                self.help_scroll = self.help_scroll.saturating_add_signed(delta);
            }
        }
    }

    /// `None` while the selector is still running.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.quitting {
            return None;
        }
        Some(match &self.result {
            Some(selection) => Outcome::Confirmed(selection.clone()),
            None => Outcome::Cancelled,
        })
    }

    pub fn focus(&self) -> FieldId {
        self.focus
    }

    pub fn field(&self, id: FieldId) -> &TextField {
        &self.fields[id.index()]
    }

    pub fn filtered_hosts(&self) -> impl Iterator<Item = &HostRecord> + '_ {
        self.filtered.iter().filter_map(|&i| self.catalog.get(i))
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn selected_row(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    pub fn highlighted_host(&self) -> Option<&HostRecord> {
        self.filtered
            .get(self.selected_row())
            .and_then(|&i| self.catalog.get(i))
    }

    /// Row pick is only meaningful on a host field with something to pick.
    pub fn can_pick(&self) -> bool {
        self.focus.filters() && !self.filtered.is_empty()
    }

    fn cycle_focus(&mut self, step: usize) {
        self.focus = FieldId::from_index(self.focus.index() + step);
        tracing::debug!("Focus moved to {:?}", self.focus);
        self.refilter();
    }

    fn edit(&mut self, action: EditAction) {
        let changed = self.fields[self.focus.index()].apply(action);
        if changed && self.focus.filters() {
            self.refilter();
        }
    }

    /// Re-derives the table from the focused host field. Other fields
    /// leave the current view untouched.
    fn refilter(&mut self) {
        if !self.focus.filters() {
            return;
        }
        let query = self.fields[self.focus.index()].value().to_string();
        if query == self.filter_query && !self.filtered.is_empty() {
            return;
        }
        let changed = query != self.filter_query;
        self.filtered = self.catalog.filter(&query);
        self.filter_query = query;
        if changed || self.selected_row() >= self.filtered.len() {
            self.table_state.select(Some(0));
        }
        self.sync_table_state();
    }

    fn sync_table_state(&mut self) {
        if self.filtered.is_empty() {
            self.table_state.select(None);
        } else if self.table_state.selected().is_none() {
            self.table_state.select(Some(0));
        }
    }

    fn move_row(&mut self, movement: RowMove) {
        let total = self.filtered.len();
        if total == 0 {
            return;
        }
        let current = self.selected_row();
        let page = usize::from(self.layout.table_rows.max(1));
        let next = match movement {
            RowMove::Up => (current + total - 1) % total,
            RowMove::Down => (current + 1) % total,
            RowMove::PageUp => current.saturating_sub(page),
            RowMove::PageDown => (current + page).min(total - 1),
            RowMove::First => 0,
            RowMove::Last => total - 1,
        };
        self.table_state.select(Some(next));
    }

    fn pick_row(&mut self) {
        if !self.can_pick() {
            return;
        }
        let Some(record) = self.highlighted_host().cloned() else {
            return;
        };

        let field = self.focus;
        let at_alias = self.fields[field.index()].value() == record.alias;
        let value = match record.source() {
            Source::ConfigFile if at_alias => {
                if field == FieldId::Target {
                    if let Some(jump) = record.proxy_jump.as_deref().filter(|j| !j.is_empty()) {
                        self.fields[FieldId::JumpHost.index()].set(jump);
                    }
                }
                record.connection_string()
            }
            Source::ConfigFile => record.alias.clone(),
            Source::HostsFile | Source::KnownHosts => record.connection_string(),
        };

        tracing::debug!("Picked {} into {:?}: {}", record.alias, field, value);
        self.fields[field.index()].set(value);
        self.refilter();
        self.highlight_alias(&record.alias);
    }

    /// Keeps the picked host under the cursor so a second pick expands it.
    fn highlight_alias(&mut self, alias: &str) {
        let field_text = self.fields[self.focus.index()].value();
        if field_text != alias {
            return;
        }
        if let Some(row) = self
            .filtered
            .iter()
            .position(|&i| self.catalog.get(i).is_some_and(|r| r.alias == alias))
        {
            self.table_state.select(Some(row));
        }
    }

    fn confirm(&mut self) {
        let target = self.field(FieldId::Target).value().trim().to_string();
        if target.is_empty() {
            self.status_message = Some("Pick or type a target first".to_string());
            return;
        }

        let selection = Selection {
            target,
            proxy_jump: self.field(FieldId::JumpHost).value().trim().to_string(),
            options: tokenize(self.field(FieldId::Options).value()),
            command: tokenize(self.field(FieldId::Command).value()),
        };
        tracing::info!("Selector confirmed: {:?}", selection);
        self.result = Some(selection);
        self.quitting = true;
    }
}

fn tokenize(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}
