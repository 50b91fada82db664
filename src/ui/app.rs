//! Dashboard state: active tab, per-list selection, latest snapshot, and
//! the dispatch path from a keypress to a worker command.

use crate::core::domain::model::{GuestAction, GuestKind, GuestSummary, PollSnapshot};
use crate::ui::worker::{Command, Event};
use crossterm::event::KeyCode;

/// The four fixed tabs of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    VirtualMachines,
    Containers,
    Exit,
}

impl Tab {
    pub const ALL: [Tab; 4] = [
        Tab::Overview,
        Tab::VirtualMachines,
        Tab::Containers,
        Tab::Exit,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::VirtualMachines => "VMs",
            Tab::Containers => "CTs",
            Tab::Exit => "Exit",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|tab| tab == self).unwrap_or(0)
    }

    /// The guest kind a tab manages, if any.
    fn kind(&self) -> Option<GuestKind> {
        match self {
            Tab::VirtualMachines => Some(GuestKind::Vm),
            Tab::Containers => Some(GuestKind::Container),
            _ => None,
        }
    }
}

/// State of the dashboard between redraws.
///
/// Purely reactive: the snapshot only changes when the worker publishes one,
/// and the selection carries the guest id as row metadata, so dispatch never
/// parses rendered text.
pub struct App {
    pub tab: Tab,
    /// `None` until the first poll tick lands ("Connecting...").
    pub snapshot: Option<PollSnapshot>,
    pub vm_selected: Option<usize>,
    pub ct_selected: Option<usize>,
    /// Non-blocking notice, e.g. "select a VM first".
    pub warning: Option<String>,
    /// Short confirmation after an accepted action.
    pub status: Option<String>,
    /// Blocking modal; any key dismisses it.
    pub error_dialog: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            tab: Tab::Overview,
            snapshot: None,
            vm_selected: None,
            ct_selected: None,
            warning: None,
            status: None,
            error_dialog: None,
            should_quit: false,
        }
    }

    /// The guest rows for a kind out of the current snapshot.
    pub fn guests(&self, kind: GuestKind) -> &[GuestSummary] {
        match &self.snapshot {
            Some(PollSnapshot::Connected {
                vms, containers, ..
            }) => match kind {
                GuestKind::Vm => vms,
                GuestKind::Container => containers,
            },
            _ => &[],
        }
    }

    pub fn selected_index(&self, kind: GuestKind) -> Option<usize> {
        match kind {
            GuestKind::Vm => self.vm_selected,
            GuestKind::Container => self.ct_selected,
        }
    }

    /// The selected guest of the active tab, if the tab manages guests and
    /// exactly one row is selected.
    pub fn selected_guest(&self) -> Option<&GuestSummary> {
        let kind = self.tab.kind()?;
        let index = self.selected_index(kind)?;
        self.guests(kind).get(index)
    }

    /// Handles one keypress; returns a command for the worker if the key
    /// triggered one.
    pub fn on_key(&mut self, key: KeyCode) -> Option<Command> {
        // A blocking error dialog swallows the next key.
        if self.error_dialog.is_some() {
            self.error_dialog = None;
            return None;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Tab | KeyCode::Right => {
                self.switch_tab(1);
                None
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.switch_tab(-1);
                None
            }
            KeyCode::Char(c @ '1'..='4') => {
                self.set_tab(Tab::ALL[(c as usize) - ('1' as usize)]);
                None
            }
            KeyCode::Down => {
                self.move_selection(1);
                None
            }
            KeyCode::Up => {
                self.move_selection(-1);
                None
            }
            KeyCode::Char('s') => self.dispatch(GuestAction::Start),
            KeyCode::Char('x') => self.dispatch(GuestAction::Stop),
            KeyCode::Char('r') => self.dispatch(GuestAction::Reboot),
            KeyCode::Char('h') => self.dispatch(GuestAction::Shutdown),
            _ => None,
        }
    }

    /// Maps an action plus the current selection to a worker command, or
    /// warns when nothing is selected. No selection means no API call.
    pub fn dispatch(&mut self, action: GuestAction) -> Option<Command> {
        let kind = self.tab.kind()?;
        match self.selected_guest().map(|guest| guest.id) {
            Some(vmid) => {
                self.warning = None;
                Some(Command::Act { kind, vmid, action })
            }
            None => {
                self.warning = Some(format!("Select a {} first.", kind));
                None
            }
        }
    }

    /// Folds a worker event into the state.
    pub fn apply_event(&mut self, event: Event) {
        match event {
            Event::Snapshot(snapshot) => {
                self.snapshot = Some(snapshot);
                // The confirmation refers to pre-action state; drop it once
                // fresh data is on display.
                self.status = None;
                self.clamp_selections();
            }
            Event::ActionDone { kind, vmid, action } => {
                self.status = Some(format!("{} sent to {} {}", action, kind, vmid));
            }
            Event::ActionFailed {
                kind,
                vmid,
                action,
                detail,
            } => {
                self.error_dialog = Some(format!("{} {} {} failed: {}", kind, vmid, action, detail));
            }
        }
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.warning = None;
        if tab == Tab::Exit {
            self.should_quit = true;
        }
    }

    fn switch_tab(&mut self, step: isize) {
        let count = Tab::ALL.len() as isize;
        let next = (self.tab.index() as isize + step).rem_euclid(count);
        self.set_tab(Tab::ALL[next as usize]);
    }

    fn move_selection(&mut self, step: isize) {
        let Some(kind) = self.tab.kind() else {
            return;
        };
        let len = self.guests(kind).len();
        if len == 0 {
            return;
        }
        let current = self.selected_index(kind);
        let next = match current {
            None => {
                if step >= 0 {
                    0
                } else {
                    len - 1
                }
            }
            Some(index) => (index as isize + step).clamp(0, len as isize - 1) as usize,
        };
        self.warning = None;
        match kind {
            GuestKind::Vm => self.vm_selected = Some(next),
            GuestKind::Container => self.ct_selected = Some(next),
        }
    }

    /// A new snapshot may have shorter lists; keep indexes in bounds and
    /// drop selection entirely when a list is empty.
    fn clamp_selections(&mut self) {
        let vm_len = self.guests(GuestKind::Vm).len();
        let ct_len = self.guests(GuestKind::Container).len();
        self.vm_selected = clamp_index(self.vm_selected, vm_len);
        self.ct_selected = clamp_index(self.ct_selected, ct_len);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_index(selected: Option<usize>, len: usize) -> Option<usize> {
    match selected {
        Some(_) if len == 0 => None,
        Some(index) => Some(index.min(len - 1)),
        None => None,
    }
}
