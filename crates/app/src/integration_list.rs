//! Added-integrations list
//!
//! Stacked rows for the integrations the user has attached. Each row shows
//! the link (or "URL not recognized" for errored ones), an "In Progress"
//! tag while resolving, and opens its update menu from a dots button, or
//! from the link itself when the row is in the error state.

use linkdock_core::AddedIntegration;
use linkdock_host::{ElementId, Rect, Stage};
use linkdock_ui::button::{Button, ButtonIcon};
use log::info;

use crate::update_menu::{UpdateAction, UpdateMenu};

const ROW_WIDTH: f32 = 360.0;
const ROW_HEIGHT: f32 = 40.0;
const LINK_WIDTH: f32 = 300.0;
const DOTS_SIZE: f32 = 24.0;

/// One row of the list
pub struct ListItem {
    record: AddedIntegration,
    row: ElementId,
    link_element: ElementId,
    dots: Option<Button>,
    menu: UpdateMenu,
}

impl ListItem {
    fn new(stage: &Stage, parent: ElementId, origin: (f32, f32), record: AddedIntegration) -> Self {
        let (x, y) = origin;
        let row = stage.insert(Some(parent), Rect::new(x, y, ROW_WIDTH, ROW_HEIGHT));
        let link_element = stage.insert(Some(row), Rect::new(x, y, LINK_WIDTH, ROW_HEIGHT));

        // Errored rows have no dots button; their link opens the menu
        let dots = (!record.has_error()).then(|| {
            Button::new(
                stage,
                Some(row),
                Rect::new(x + ROW_WIDTH - DOTS_SIZE, y + 8.0, DOTS_SIZE, DOTS_SIZE),
            )
            .with_icon(ButtonIcon::Dots)
        });

        let anchor = dots
            .as_ref()
            .map_or(link_element, |button| button.element());
        let label = record
            .integration
            .title
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();

        Self {
            menu: UpdateMenu::new(stage, anchor, label),
            record,
            row,
            link_element,
            dots,
        }
    }

    pub fn record(&self) -> &AddedIntegration {
        &self.record
    }

    pub fn link_element(&self) -> ElementId {
        self.link_element
    }

    pub fn menu(&self) -> &UpdateMenu {
        &self.menu
    }

    /// Text shown for the link
    pub fn display_text(&self) -> String {
        if self.record.has_error() {
            return "URL not recognized".to_string();
        }
        self.record
            .resolved_title
            .clone()
            .unwrap_or_else(|| self.record.link.to_string())
    }

    /// Whether the row shows the "In Progress" tag
    pub fn shows_progress_tag(&self) -> bool {
        self.record.is_resolving()
    }

    /// Record the metadata the backend resolved the link to
    pub fn resolve(&mut self, title: impl Into<String>, subtitle: impl Into<String>) {
        self.record.mark_resolved(title, subtitle);
    }

    /// Open or close the row's update menu from its trigger: the dots
    /// button normally, the link itself for errored rows
    pub fn toggle_menu(&mut self, stage: &Stage) {
        if let Some(dots) = &self.dots {
            if !dots.press() {
                return;
            }
        }
        self.menu.toggle(stage);
    }

    /// Pick the update action owning `element`, if any
    pub fn select_menu_at(&mut self, stage: &Stage, element: ElementId) -> Option<UpdateAction> {
        self.menu.select_at(stage, element)
    }

    fn update(&mut self, stage: &Stage) {
        self.menu.update(stage);
    }

    fn unmount(self, stage: &Stage) {
        self.menu.unmount(stage);
        stage.remove(self.row);
    }
}

/// The list of added integrations
pub struct IntegrationList {
    container: ElementId,
    origin: (f32, f32),
    items: Vec<ListItem>,
}

impl IntegrationList {
    /// Mount an empty list at `origin` within `parent`
    pub fn new(stage: &Stage, parent: Option<ElementId>, origin: (f32, f32)) -> Self {
        let (x, y) = origin;
        let container = stage.insert(parent, Rect::new(x, y, ROW_WIDTH, 0.0));
        Self {
            container,
            origin,
            items: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn item_mut(&mut self, index: usize) -> Option<&mut ListItem> {
        self.items.get_mut(index)
    }

    pub fn items_mut(&mut self) -> impl Iterator<Item = &mut ListItem> {
        self.items.iter_mut()
    }

    /// Append a record as a new row
    pub fn push(&mut self, stage: &Stage, record: AddedIntegration) {
        let (x, y) = self.origin;
        let row_y = y + self.items.len() as f32 * ROW_HEIGHT;
        self.items
            .push(ListItem::new(stage, self.container, (x, row_y), record));
        self.resize_container(stage);
    }

    /// Apply an update action to a row.
    ///
    /// Delete unmounts the row and returns its record; Change URL only
    /// logs, the actual re-entry flow is out of scope here.
    pub fn apply_action(
        &mut self,
        stage: &Stage,
        index: usize,
        action: UpdateAction,
    ) -> Option<AddedIntegration> {
        match action {
            UpdateAction::Delete => {
                if index >= self.items.len() {
                    return None;
                }
                let item = self.items.remove(index);
                let record = item.record.clone();
                item.unmount(stage);
                info!("deleted integration {}", record.id);
                self.restack(stage);
                Some(record)
            }
            UpdateAction::ChangeUrl => {
                let record = self.items.get(index)?.record();
                info!("change URL requested for integration {}", record.id);
                None
            }
        }
    }

    /// Drain every row's menu
    pub fn update(&mut self, stage: &Stage) {
        for item in &mut self.items {
            item.update(stage);
        }
    }

    fn restack(&mut self, stage: &Stage) {
        let (x, y) = self.origin;
        for (index, item) in self.items.iter().enumerate() {
            stage.move_to(
                item.row,
                linkdock_host::Point::new(x, y + index as f32 * ROW_HEIGHT),
            );
        }
        self.resize_container(stage);
    }

    fn resize_container(&self, stage: &Stage) {
        let (x, y) = self.origin;
        stage.set_rect(
            self.container,
            Rect::new(x, y, ROW_WIDTH, self.items.len() as f32 * ROW_HEIGHT),
        );
    }
}
