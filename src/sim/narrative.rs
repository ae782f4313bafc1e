//! One-shot narrative latches
//!
//! Reveal milestones, the damage ladder, and per-trash sighting records are
//! all monotonic one-way flips: initialized at session start, never reset,
//! and guarded so a callback can fire at most once even though the reveal
//! percentage is recomputed from scratch every tick.

/// Artifact damage ladder. Strictly forward: there is no repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DamageLadder {
    #[default]
    Intact,
    /// First qualifying hit: warning.
    Chipped,
    /// Second hit: harsher warning.
    Cracked,
    /// Third hit: terminal for this session.
    Broken,
}

/// What a registered hit amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Still recoverable; the level is 1 (chipped) or 2 (cracked).
    Warned(u8),
    Broke,
}

impl DamageLadder {
    /// Advance by one qualifying hit. Hits after breakage are silent no-ops.
    pub fn register_hit(&mut self) -> Option<DamageOutcome> {
        match self {
            DamageLadder::Intact => {
                *self = DamageLadder::Chipped;
                Some(DamageOutcome::Warned(1))
            }
            DamageLadder::Chipped => {
                *self = DamageLadder::Cracked;
                Some(DamageOutcome::Warned(2))
            }
            DamageLadder::Cracked => {
                *self = DamageLadder::Broken;
                Some(DamageOutcome::Broke)
            }
            DamageLadder::Broken => None,
        }
    }

    pub fn is_damaged(&self) -> bool {
        *self != DamageLadder::Intact
    }

    pub fn is_broken(&self) -> bool {
        *self == DamageLadder::Broken
    }
}

/// Which reveal milestones a percentage update crossed for the first time.
/// Both can fire on the same tick; the hint always precedes discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevealCrossing {
    pub hint: bool,
    pub discovery: bool,
}

/// Narrative text owed to a trash item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrashMessage {
    FirstSight,
    Worthless,
}

impl TrashMessage {
    pub fn text(&self) -> &'static str {
        match self {
            TrashMessage::FirstSight => "what is that..?",
            TrashMessage::Worthless => "worthless...",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct TrashReveal {
    first: bool,
    half: bool,
}

/// The session's latch table.
#[derive(Debug, Clone)]
pub struct NarrativeState {
    crossed_hint: bool,
    crossed_discovery: bool,
    pub damage: DamageLadder,
    trash: Vec<TrashReveal>,
}

impl NarrativeState {
    pub fn new(trash_count: usize) -> Self {
        Self {
            crossed_hint: false,
            crossed_discovery: false,
            damage: DamageLadder::default(),
            trash: vec![TrashReveal::default(); trash_count],
        }
    }

    /// Trash identity changes when the grid is rebuilt on resize; the
    /// per-item records start over. Milestone and damage latches survive.
    pub fn reset_trash(&mut self, trash_count: usize) {
        self.trash = vec![TrashReveal::default(); trash_count];
    }

    /// Latch reveal milestones against the freshly computed percentage.
    pub fn note_reveal(&mut self, pct: f32, hint_pct: f32, discovery_pct: f32) -> RevealCrossing {
        let mut crossing = RevealCrossing::default();
        if !self.crossed_hint && pct >= hint_pct {
            self.crossed_hint = true;
            crossing.hint = true;
        }
        if !self.crossed_discovery && pct >= discovery_pct {
            self.crossed_discovery = true;
            crossing.discovery = true;
        }
        crossing
    }

    /// A trash cell was just uncovered; `item_pct` is that item's current
    /// reveal percentage. Returns the message owed, if any remains.
    pub fn note_trash_cell(&mut self, index: usize, item_pct: f32) -> Option<TrashMessage> {
        let record = self.trash.get_mut(index)?;
        if !record.first {
            record.first = true;
            return Some(TrashMessage::FirstSight);
        }
        if !record.half && item_pct >= 50.0 {
            record.half = true;
            return Some(TrashMessage::Worthless);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_ladder_walks_once() {
        let mut ladder = DamageLadder::default();
        assert!(!ladder.is_damaged());
        assert_eq!(ladder.register_hit(), Some(DamageOutcome::Warned(1)));
        assert!(ladder.is_damaged() && !ladder.is_broken());
        assert_eq!(ladder.register_hit(), Some(DamageOutcome::Warned(2)));
        assert_eq!(ladder.register_hit(), Some(DamageOutcome::Broke));
        assert!(ladder.is_broken());
        // Fourth and later strikes are silent.
        assert_eq!(ladder.register_hit(), None);
        assert_eq!(ladder.register_hit(), None);
    }

    #[test]
    fn reveal_latches_fire_once() {
        let mut n = NarrativeState::new(0);
        assert_eq!(n.note_reveal(50.0, 70.0, 95.0), RevealCrossing::default());
        let c = n.note_reveal(72.0, 70.0, 95.0);
        assert!(c.hint && !c.discovery);
        // Percentage holding above the threshold re-fires nothing.
        assert_eq!(n.note_reveal(80.0, 70.0, 95.0), RevealCrossing::default());
        let c = n.note_reveal(100.0, 70.0, 95.0);
        assert!(!c.hint && c.discovery);
        assert_eq!(n.note_reveal(100.0, 70.0, 95.0), RevealCrossing::default());
    }

    #[test]
    fn both_milestones_can_cross_in_one_tick() {
        let mut n = NarrativeState::new(0);
        let c = n.note_reveal(100.0, 70.0, 95.0);
        assert!(c.hint && c.discovery);
    }

    #[test]
    fn trash_messages_fire_once_per_item() {
        let mut n = NarrativeState::new(2);
        assert_eq!(n.note_trash_cell(0, 5.0), Some(TrashMessage::FirstSight));
        assert_eq!(n.note_trash_cell(0, 20.0), None);
        assert_eq!(n.note_trash_cell(0, 55.0), Some(TrashMessage::Worthless));
        assert_eq!(n.note_trash_cell(0, 90.0), None);
        // Independent record per item.
        assert_eq!(n.note_trash_cell(1, 60.0), Some(TrashMessage::FirstSight));
        assert_eq!(n.note_trash_cell(1, 60.0), Some(TrashMessage::Worthless));
        // Out-of-range index is a quiet no-op.
        assert_eq!(n.note_trash_cell(9, 60.0), None);
    }
}
