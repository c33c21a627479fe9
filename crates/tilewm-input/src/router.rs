// ABOUTME: Routes key events to hotkey actions.
// ABOUTME: First binding in iteration order wins; one event fires at most one action.

use tilewm_core::{HotkeyAction, KeybindingConfig};

use crate::combo::{HotkeyError, KeyCombo, KeyEvent};

type ActionCallback = Box<dyn FnMut(HotkeyAction, &KeyEvent)>;

/// Outcome of offering an event to the router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A binding matched; the host should suppress default handling and propagation
    Handled(HotkeyAction),
    Ignored,
}

impl Dispatch {
    pub fn is_handled(&self) -> bool {
        matches!(self, Dispatch::Handled(_))
    }
}

/// Maps key combinations to actions.
///
/// Starts disabled, like a listener that has not been attached yet; call
/// [`HotkeyRouter::enable`] before feeding events.
pub struct HotkeyRouter {
    bindings: Vec<(HotkeyAction, KeyCombo)>,
    callback: Option<ActionCallback>,
    enabled: bool,
}

impl HotkeyRouter {
    /// Router with the default bindings
    pub fn new() -> Result<Self, HotkeyError> {
        Self::from_config(&KeybindingConfig::default())
    }

    /// Router with the configured bindings; unbound actions are skipped
    pub fn from_config(config: &KeybindingConfig) -> Result<Self, HotkeyError> {
        let bindings = config
            .bindings()
            .into_iter()
            .map(|(action, combo)| KeyCombo::parse(combo).map(|combo| (action, combo)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::with_bindings(bindings))
    }

    fn with_bindings(bindings: Vec<(HotkeyAction, KeyCombo)>) -> Self {
        let router = Self {
            bindings,
            callback: None,
            enabled: false,
        };
        for (first, second) in router.conflicts() {
            tracing::warn!(
                "Hotkey {} is bound to both {} and {}; {} wins",
                router.hotkey(first).map(ToString::to_string).unwrap_or_default(),
                first,
                second,
                first
            );
        }
        router
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Register the callback invoked for each matched event, replacing any previous one
    pub fn on_action(&mut self, callback: impl FnMut(HotkeyAction, &KeyEvent) + 'static) {
        self.callback = Some(Box::new(callback));
    }

    /// Rebind `action`. An existing binding keeps its position in iteration order;
    /// a new one goes last.
    pub fn set_hotkey(&mut self, action: HotkeyAction, combo: &str) -> Result<(), HotkeyError> {
        let combo = KeyCombo::parse(combo)?;
        match self.bindings.iter_mut().find(|(bound, _)| *bound == action) {
            Some((_, existing)) => *existing = combo,
            None => self.bindings.push((action, combo)),
        }
        Ok(())
    }

    pub fn hotkey(&self, action: HotkeyAction) -> Option<&KeyCombo> {
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == action)
            .map(|(_, combo)| combo)
    }

    /// Pairs of actions sharing a combination, earlier (winning) action first
    pub fn conflicts(&self) -> Vec<(HotkeyAction, HotkeyAction)> {
        let mut result = Vec::new();
        for (i, (first, first_combo)) in self.bindings.iter().enumerate() {
            for (second, second_combo) in &self.bindings[i + 1..] {
                if first_combo == second_combo {
                    result.push((*first, *second));
                }
            }
        }
        result
    }

    /// Offer an event; the first matching binding fires the callback once
    pub fn handle(&mut self, event: &KeyEvent) -> Dispatch {
        if !self.enabled {
            return Dispatch::Ignored;
        }

        let Some(action) = self
            .bindings
            .iter()
            .find(|(_, combo)| combo.matches(event))
            .map(|(action, _)| *action)
        else {
            return Dispatch::Ignored;
        };

        tracing::debug!("Key {:?} triggered {}", event.key, action);
        if let Some(callback) = self.callback.as_mut() {
            callback(action, event);
        }
        Dispatch::Handled(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Modifiers;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn enabled_router() -> HotkeyRouter {
        let mut router = HotkeyRouter::new().unwrap();
        router.enable();
        router
    }

    fn shift(key: &str) -> KeyEvent {
        KeyEvent::new(key, Modifiers::shift())
    }

    #[test]
    fn default_bindings_route_actions() {
        let mut router = enabled_router();
        assert_eq!(router.handle(&shift("W")), Dispatch::Handled(HotkeyAction::Close));
        assert_eq!(router.handle(&shift("Tab")), Dispatch::Handled(HotkeyAction::FocusNext));

        let shift_alt = Modifiers {
            alt: true,
            ..Modifiers::shift()
        };
        assert_eq!(
            router.handle(&KeyEvent::new("Enter", shift_alt)),
            Dispatch::Handled(HotkeyAction::SplitVertical)
        );
        assert_eq!(
            router.handle(&KeyEvent::new("Enter", Modifiers::NONE)),
            Dispatch::Ignored
        );
    }

    #[test]
    fn shared_combo_fires_first_binding_once() {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let mut router = enabled_router();
        let sink = Rc::clone(&fired);
        router.on_action(move |action, _| sink.borrow_mut().push(action));

        assert_eq!(router.handle(&shift("Enter")), Dispatch::Handled(HotkeyAction::FocusPrev));
        assert_eq!(*fired.borrow(), vec![HotkeyAction::FocusPrev]);
    }

    #[test]
    fn default_conflict_is_reported() {
        let router = HotkeyRouter::new().unwrap();
        assert_eq!(
            router.conflicts(),
            vec![(HotkeyAction::FocusPrev, HotkeyAction::SplitHorizontal)]
        );
    }

    #[test]
    fn disabled_router_ignores_events() {
        let fired = Rc::new(RefCell::new(0));
        let mut router = HotkeyRouter::new().unwrap();
        let sink = Rc::clone(&fired);
        router.on_action(move |_, _| *sink.borrow_mut() += 1);

        assert!(!router.is_enabled());
        assert_eq!(router.handle(&shift("W")), Dispatch::Ignored);

        router.enable();
        assert!(router.handle(&shift("W")).is_handled());
        router.disable();
        assert!(!router.handle(&shift("W")).is_handled());
        assert_eq!(*fired.borrow(), 1);
    }

    #[test]
    fn set_hotkey_rebinds_in_place() {
        let mut router = enabled_router();
        router
            .set_hotkey(HotkeyAction::SplitHorizontal, "Ctrl+Shift+H")
            .unwrap();

        assert!(router.conflicts().is_empty());
        assert_eq!(
            router.hotkey(HotkeyAction::SplitHorizontal).map(ToString::to_string),
            Some("ctrl+shift+h".to_string())
        );
        let event = KeyEvent::new(
            "h",
            Modifiers {
                ctrl: true,
                ..Modifiers::shift()
            },
        );
        assert_eq!(router.handle(&event), Dispatch::Handled(HotkeyAction::SplitHorizontal));
        assert!(router.set_hotkey(HotkeyAction::Close, "Ctrl").is_err());
    }

    #[test]
    fn every_action_has_a_default_binding() {
        let router = HotkeyRouter::new().unwrap();
        for action in HotkeyAction::all() {
            assert_eq!(
                router.hotkey(*action),
                Some(&KeyCombo::parse(action.default_combo()).unwrap()),
                "{action}"
            );
        }
    }

    #[test]
    fn empty_config_binding_falls_back_to_default() {
        let mut config = KeybindingConfig::default();
        config.set(HotkeyAction::Close, "");
        let mut router = HotkeyRouter::from_config(&config).unwrap();
        router.enable();

        assert!(router.hotkey(HotkeyAction::Close).is_some());
        assert_eq!(router.handle(&shift("W")), Dispatch::Handled(HotkeyAction::Close));
    }

    #[test]
    fn from_config_skips_unbound_and_rejects_invalid() {
        let mut config = KeybindingConfig::default();
        config.set(HotkeyAction::FocusPrev, "none");
        let router = HotkeyRouter::from_config(&config).unwrap();
        assert_eq!(router.hotkey(HotkeyAction::FocusPrev), None);
        assert!(router.conflicts().is_empty());

        config.set(HotkeyAction::Close, "Shift+A+B");
        assert!(matches!(
            HotkeyRouter::from_config(&config),
            Err(HotkeyError::InvalidCombo { .. })
        ));
    }
}
