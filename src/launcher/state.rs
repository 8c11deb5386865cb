//! Launcher selection state
//!
//! Kept apart from drawing so the click/dialog flow can be tested without a
//! window.

use physlab_core::{SimulationDescriptor, UnitKey};

/// Modal dialog currently covering the unit grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Description of a unit with Run and Cancel
    Describe(UnitKey),
    /// A failed dispatch with Dismiss
    Error(String),
}

#[derive(Debug, Default)]
pub struct LauncherState {
    active_tab: usize,
    dialog: Option<Dialog>,
    selection: Option<UnitKey>,
}

impl LauncherState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_tab(&self) -> usize {
        self.active_tab
    }

    pub fn select_tab(&mut self, index: usize) {
        self.active_tab = index;
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    /// A unit button was pressed
    ///
    /// Units with a description ask first, the rest are selected at once.
    pub fn click(&mut self, descriptor: &SimulationDescriptor) {
        if self.dialog.is_some() {
            return;
        }
        if descriptor.has_description() {
            self.dialog = Some(Dialog::Describe(descriptor.key().clone()));
        } else {
            self.selection = Some(descriptor.key().clone());
        }
    }

    /// Run from the description dialog
    pub fn confirm(&mut self) {
        if let Some(Dialog::Describe(key)) = &self.dialog {
            self.selection = Some(key.clone());
            self.dialog = None;
        }
    }

    /// Cancel or Dismiss, whichever dialog is open
    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn report_error(&mut self, message: impl Into<String>) {
        self.selection = None;
        self.dialog = Some(Dialog::Error(message.into()));
    }

    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }

    pub fn take_selection(&mut self) -> Option<UnitKey> {
        self.selection.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn described() -> SimulationDescriptor {
        SimulationDescriptor::new(
            UnitKey::new("Kinematics", "projectile"),
            Some("Launch projectiles".to_string()),
            None,
        )
    }

    fn undescribed() -> SimulationDescriptor {
        SimulationDescriptor::new(UnitKey::new("fluids", "smoke_plume"), None, None)
    }

    #[test]
    fn test_undescribed_unit_runs_immediately() {
        let mut state = LauncherState::new();
        state.click(&undescribed());
        assert!(state.dialog().is_none());
        assert_eq!(state.take_selection(), Some(UnitKey::new("fluids", "smoke_plume")));
        assert_eq!(state.take_selection(), None);
    }

    #[test]
    fn test_described_unit_asks_first() {
        let mut state = LauncherState::new();
        state.click(&described());
        assert!(!state.has_selection());
        assert_eq!(
            state.dialog(),
            Some(&Dialog::Describe(UnitKey::new("Kinematics", "projectile")))
        );

        state.confirm();
        assert!(state.dialog().is_none());
        assert_eq!(state.take_selection(), Some(UnitKey::new("Kinematics", "projectile")));
    }

    #[test]
    fn test_cancel_selects_nothing() {
        let mut state = LauncherState::new();
        state.click(&described());
        state.close_dialog();
        assert!(state.dialog().is_none());
        assert!(state.take_selection().is_none());
    }

    #[test]
    fn test_clicks_ignored_behind_dialog() {
        let mut state = LauncherState::new();
        state.report_error("Unknown unit");
        state.click(&undescribed());
        assert!(!state.has_selection());

        state.close_dialog();
        state.click(&undescribed());
        assert!(state.has_selection());
    }

    #[test]
    fn test_confirm_on_error_dialog_does_nothing() {
        let mut state = LauncherState::new();
        state.report_error("boom");
        state.confirm();
        assert!(!state.has_selection());
        assert_eq!(state.dialog(), Some(&Dialog::Error("boom".to_string())));
    }

    #[test]
    fn test_tab_survives_error() {
        let mut state = LauncherState::new();
        state.select_tab(3);
        state.report_error("boom");
        assert_eq!(state.active_tab(), 3);
    }
}
