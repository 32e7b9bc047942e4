//! Player slots: who sits where and who controls them

use serde::{Deserialize, Serialize};

use crate::core::types::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerType {
    Human,
    Ai,
    /// Seat exists but nobody plays it; no family is placed
    Empty,
}

/// Configuration for one seat at game start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub id: PlayerId,
    pub name: String,
    pub controller: ControllerType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSlot {
    pub index: usize,
    pub player: Option<PlayerId>,
    pub controller: ControllerType,
}

/// Tracks the fixed set of seats and which player occupies each
#[derive(Debug, Default)]
pub struct SlotRegistry {
    slots: Vec<PlayerSlot>,
    viewing_player: Option<PlayerId>,
}

impl SlotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to `count` empty seats
    pub fn initialize(&mut self, count: usize) {
        self.slots = (0..count)
            .map(|index| PlayerSlot {
                index,
                player: None,
                controller: ControllerType::Empty,
            })
            .collect();
        self.viewing_player = None;
    }

    /// Seat a player in the first free slot
    pub fn assign(&mut self, player: PlayerId, controller: ControllerType) -> bool {
        match self.slots.iter_mut().find(|s| s.player.is_none()) {
            Some(slot) => {
                slot.player = Some(player);
                slot.controller = controller;
                true
            }
            None => {
                tracing::warn!(player = %player, "no free slot to assign");
                false
            }
        }
    }

    /// Slots holding a playing (human or AI) participant
    pub fn active_slots(&self) -> Vec<&PlayerSlot> {
        self.slots
            .iter()
            .filter(|s| s.player.is_some() && s.controller != ControllerType::Empty)
            .collect()
    }

    pub fn controller_of(&self, player: PlayerId) -> Option<ControllerType> {
        self.slots
            .iter()
            .find(|s| s.player == Some(player))
            .map(|s| s.controller)
    }

    pub fn is_ai(&self, player: PlayerId) -> bool {
        self.controller_of(player) == Some(ControllerType::Ai)
    }

    pub fn is_human(&self, player: PlayerId) -> bool {
        self.controller_of(player) == Some(ControllerType::Human)
    }

    pub fn ai_players(&self) -> Vec<PlayerId> {
        self.slots
            .iter()
            .filter(|s| s.controller == ControllerType::Ai)
            .filter_map(|s| s.player)
            .collect()
    }

    pub fn set_viewing_player(&mut self, player: PlayerId) {
        self.viewing_player = Some(player);
    }

    /// The player whose perspective the presentation layer renders
    pub fn viewing_player(&self) -> Option<PlayerId> {
        self.viewing_player
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_fill_in_order() {
        let mut registry = SlotRegistry::new();
        registry.initialize(4);

        assert!(registry.assign(PlayerId(1), ControllerType::Human));
        assert!(registry.assign(PlayerId(2), ControllerType::Ai));
        assert!(registry.assign(PlayerId(3), ControllerType::Ai));

        assert_eq!(registry.active_slots().len(), 3);
        assert!(registry.is_human(PlayerId(1)));
        assert!(registry.is_ai(PlayerId(2)));
        assert_eq!(registry.ai_players(), vec![PlayerId(2), PlayerId(3)]);
    }

    #[test]
    fn test_empty_seats_are_not_active() {
        let mut registry = SlotRegistry::new();
        registry.initialize(2);
        registry.assign(PlayerId(1), ControllerType::Human);
        registry.assign(PlayerId(4), ControllerType::Empty);

        assert_eq!(registry.active_slots().len(), 1);
        assert!(!registry.is_ai(PlayerId(4)));
    }

    #[test]
    fn test_assign_fails_when_full() {
        let mut registry = SlotRegistry::new();
        registry.initialize(1);
        assert!(registry.assign(PlayerId(1), ControllerType::Human));
        assert!(!registry.assign(PlayerId(2), ControllerType::Ai));
    }
}
