//! Scripted in-memory session for engine tests.
//!
//! Elements are registered by id against locator keys; clicks are recorded
//! in order and may trigger DOM effects (attach/detach/mutate), which is
//! enough to script the asynchronous screens the engine drives.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use utclub_engine::locator::Locator;
use utclub_engine::selectors;
use utclub_engine::session::{Session, SessionError};
use utclub_engine::wait::WaitPolicy;

/// Tight budgets so timeout paths stay fast under test.
pub fn test_waits() -> WaitPolicy {
    WaitPolicy {
        timeout: Duration::from_millis(40),
        slow: Duration::from_millis(80),
        poll: Duration::from_millis(2),
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockElement {
    pub text: String,
    pub class: String,
    pub interactable: bool,
    children: HashMap<String, Vec<String>>,
}

impl MockElement {
    pub fn new() -> Self {
        Self {
            interactable: true,
            ..Self::default()
        }
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.class = class.to_string();
        self
    }

    pub fn inert(mut self) -> Self {
        self.interactable = false;
        self
    }

    pub fn child(mut self, locator: &Locator, id: &str) -> Self {
        self.children
            .entry(locator.to_string())
            .or_default()
            .push(id.to_string());
        self
    }
}

/// A DOM mutation applied when a given element is clicked.
#[derive(Debug, Clone)]
pub enum Effect {
    Attach { locator: String, id: String },
    Detach { locator: String, id: String },
    SetText { id: String, text: String },
    SetClass { id: String, class: String },
}

impl Effect {
    pub fn attach(locator: &Locator, id: &str) -> Self {
        Effect::Attach {
            locator: locator.to_string(),
            id: id.to_string(),
        }
    }

    pub fn detach(locator: &Locator, id: &str) -> Self {
        Effect::Detach {
            locator: locator.to_string(),
            id: id.to_string(),
        }
    }

    pub fn set_text(id: &str, text: &str) -> Self {
        Effect::SetText {
            id: id.to_string(),
            text: text.to_string(),
        }
    }

    pub fn set_class(id: &str, class: &str) -> Self {
        Effect::SetClass {
            id: id.to_string(),
            class: class.to_string(),
        }
    }
}

#[derive(Default)]
struct Dom {
    elements: HashMap<String, MockElement>,
    matches: HashMap<String, Vec<String>>,
    effects: HashMap<String, Vec<Effect>>,
    clicks: Vec<String>,
    screenshots: usize,
}

impl Dom {
    fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::Attach { locator, id } => {
                let ids = self.matches.entry(locator.clone()).or_default();
                if !ids.contains(id) {
                    ids.push(id.clone());
                }
            }
            Effect::Detach { locator, id } => {
                if let Some(ids) = self.matches.get_mut(locator) {
                    ids.retain(|existing| existing != id);
                }
            }
            Effect::SetText { id, text } => {
                if let Some(element) = self.elements.get_mut(id) {
                    element.text = text.clone();
                }
            }
            Effect::SetClass { id, class } => {
                if let Some(element) = self.elements.get_mut(id) {
                    element.class = class.clone();
                }
            }
        }
    }
}

#[derive(Default)]
pub struct MockSession {
    dom: Mutex<Dom>,
}

impl MockSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element without making it findable at top level
    /// (children are reached through their parent).
    pub fn insert(&self, id: &str, element: MockElement) {
        let mut dom = self.dom.lock().unwrap();
        dom.elements.insert(id.to_string(), element);
    }

    /// Register an element and make it match a top-level locator.
    pub fn attach(&self, locator: &Locator, id: &str, element: MockElement) {
        let mut dom = self.dom.lock().unwrap();
        dom.elements.insert(id.to_string(), element);
        dom.matches
            .entry(locator.to_string())
            .or_default()
            .push(id.to_string());
    }

    pub fn on_click(&self, id: &str, effect: Effect) {
        let mut dom = self.dom.lock().unwrap();
        dom.effects.entry(id.to_string()).or_default().push(effect);
    }

    pub fn clicks(&self) -> Vec<String> {
        self.dom.lock().unwrap().clicks.clone()
    }

    pub fn click_count(&self, id: &str) -> usize {
        self.dom
            .lock()
            .unwrap()
            .clicks
            .iter()
            .filter(|c| c.as_str() == id)
            .count()
    }

    pub fn first_click_index(&self, id: &str) -> Option<usize> {
        self.dom
            .lock()
            .unwrap()
            .clicks
            .iter()
            .position(|c| c.as_str() == id)
    }

    pub fn screenshot_count(&self) -> usize {
        self.dom.lock().unwrap().screenshots
    }
}

#[async_trait]
impl Session for MockSession {
    type Element = String;

    async fn find(&self, locator: &Locator) -> Result<Option<String>, SessionError> {
        let dom = self.dom.lock().unwrap();
        Ok(dom
            .matches
            .get(&locator.to_string())
            .and_then(|ids| ids.first().cloned()))
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<String>, SessionError> {
        let dom = self.dom.lock().unwrap();
        Ok(dom
            .matches
            .get(&locator.to_string())
            .cloned()
            .unwrap_or_default())
    }

    async fn find_within(
        &self,
        scope: &String,
        locator: &Locator,
    ) -> Result<Option<String>, SessionError> {
        let dom = self.dom.lock().unwrap();
        let element = dom.elements.get(scope).ok_or(SessionError::Stale)?;
        Ok(element
            .children
            .get(&locator.to_string())
            .and_then(|ids| ids.first().cloned()))
    }

    async fn find_all_within(
        &self,
        scope: &String,
        locator: &Locator,
    ) -> Result<Vec<String>, SessionError> {
        let dom = self.dom.lock().unwrap();
        let element = dom.elements.get(scope).ok_or(SessionError::Stale)?;
        Ok(element
            .children
            .get(&locator.to_string())
            .cloned()
            .unwrap_or_default())
    }

    async fn click(&self, element: &String) -> Result<(), SessionError> {
        let mut dom = self.dom.lock().unwrap();
        dom.clicks.push(element.clone());
        let effects = dom.effects.get(element).cloned().unwrap_or_default();
        for effect in &effects {
            dom.apply(effect);
        }
        Ok(())
    }

    async fn is_interactable(&self, element: &String) -> Result<bool, SessionError> {
        let dom = self.dom.lock().unwrap();
        Ok(dom
            .elements
            .get(element)
            .map(|e| e.interactable)
            .unwrap_or(false))
    }

    async fn text(&self, element: &String) -> Result<String, SessionError> {
        let dom = self.dom.lock().unwrap();
        dom.elements
            .get(element)
            .map(|e| e.text.clone())
            .ok_or(SessionError::Stale)
    }

    async fn attribute(
        &self,
        element: &String,
        name: &str,
    ) -> Result<Option<String>, SessionError> {
        let dom = self.dom.lock().unwrap();
        let found = dom.elements.get(element).ok_or(SessionError::Stale)?;
        Ok(match name {
            "class" => Some(found.class.clone()),
            _ => None,
        })
    }

    async fn scroll_into_view(&self, _element: &String) -> Result<(), SessionError> {
        Ok(())
    }

    async fn scroll_by(&self, _element: &String, _delta_y: i64) -> Result<(), SessionError> {
        Ok(())
    }

    async fn scroll_to_top(&self, _element: &String) -> Result<(), SessionError> {
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, SessionError> {
        let mut dom = self.dom.lock().unwrap();
        dom.screenshots += 1;
        Ok(vec![0x89, b'P', b'N', b'G'])
    }
}

// Seed helpers shared by the lifecycle and store tests.

/// Persistent navigation bar plus both section tabs and the upgrades menu.
pub fn seed_navigation(mock: &MockSession) {
    mock.attach(&selectors::TAB_BAR, "tab-bar", MockElement::new());
    mock.attach(&selectors::TAB_CHALLENGES, "tab-sbc", MockElement::new());
    mock.attach(&selectors::TAB_STORE, "tab-store", MockElement::new());
    mock.attach(&selectors::MENU_CONTAINER, "menu", MockElement::new());
    mock.attach(
        &selectors::UPGRADES_MENU_ITEM,
        "upgrades-item",
        MockElement::new(),
    );
}

/// Challenge hub with one named tile and its start button.
pub fn seed_challenge_hub(
    mock: &MockSession,
    name: &str,
    tile_class: &str,
    repeat_label: Option<&str>,
) {
    mock.attach(&selectors::CHALLENGE_GRID, "grid", MockElement::new());
    mock.attach(&selectors::CHALLENGE_LIST, "list", MockElement::new());

    let mut tile = MockElement::new()
        .class(tile_class)
        .child(&selectors::TILE_HEADER, "tile-header");
    if repeat_label.is_some() {
        tile = tile.child(&selectors::REPEAT_LABEL, "repeat-label");
    }
    mock.attach(&selectors::challenge_tile(name), "tile", tile);
    mock.insert("tile-header", MockElement::new().text(name));
    if let Some(label) = repeat_label {
        mock.insert("repeat-label", MockElement::new().text(label));
    }
    mock.attach(&selectors::START_CHALLENGE, "start-btn", MockElement::new());
}

/// Squad panel with the delegated builder and its filter dropdowns.
pub fn seed_delegated_builder(mock: &MockSession, quality_label: &str) {
    mock.attach(&selectors::SQUAD_PANEL, "squad-panel", MockElement::new());
    mock.attach(
        &selectors::USE_SQUAD_BUILDER,
        "builder-btn",
        MockElement::new(),
    );
    seed_sort_and_quality(mock, quality_label);
    mock.attach(&selectors::BUILD_BUTTON, "build-btn", MockElement::new());
}

pub fn seed_sort_and_quality(mock: &MockSession, quality_label: &str) {
    mock.attach(&selectors::SORT_DROPDOWN, "sort-dd", MockElement::new());
    mock.attach(
        &selectors::dropdown_option("Lowest Quick Sell"),
        "sort-opt",
        MockElement::new(),
    );
    mock.attach(&selectors::QUALITY_DROPDOWN, "quality-dd", MockElement::new());
    mock.attach(
        &selectors::inline_option(quality_label),
        "quality-opt",
        MockElement::new(),
    );
}

/// Requirements checklist plus submit and claim buttons. When
/// `all_complete` is false the second requirement is left incomplete.
pub fn seed_submission(mock: &MockSession, all_complete: bool) {
    let checklist = MockElement::new()
        .child(&selectors::CHECKLIST_ITEM, "req-1")
        .child(&selectors::CHECKLIST_ITEM, "req-2");
    mock.attach(&selectors::REQUIREMENTS_CHECKLIST, "checklist", checklist);
    mock.insert("req-1", MockElement::new().class("complete"));
    let second = if all_complete {
        MockElement::new().class("complete")
    } else {
        MockElement::new().text("Exactly 11 players in the squad")
    };
    mock.insert("req-2", second);
    mock.attach(&selectors::SUBMIT_BUTTON, "submit-btn", MockElement::new());
    mock.attach(&selectors::CLAIM_REWARDS, "claim-btn", MockElement::new());
}
