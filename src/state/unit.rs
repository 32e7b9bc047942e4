//! Unit records: mobsters, their ranks, skills and pay tables

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{MissionId, PlayerId, UnitId};

/// Crew slots per capo; family capacity is `MAX_CREW_SIZE * capo count`
pub const MAX_CREW_SIZE: usize = 4;

/// Experience needed to gain a level
pub const XP_PER_LEVEL: u32 = 100;

/// Rank ladder within a family
///
/// Associates are the unaffiliated hiring pool; Underboss and Consigliere
/// are terminal ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Associate,
    Soldier,
    Capo,
    Underboss,
    Consigliere,
}

impl Rank {
    /// Rank reached by a promotion
    ///
    /// Soldier -> Capo -> Underboss; every other input falls through to
    /// Soldier. The fallback is unreachable from the command path because
    /// promote validation rejects terminal ranks, but the table is kept
    /// exactly as observed in play.
    pub fn promoted(self) -> Rank {
        match self {
            Rank::Soldier => Rank::Capo,
            Rank::Capo => Rank::Underboss,
            _ => Rank::Soldier,
        }
    }

    /// True for ranks that cannot be promoted further
    pub fn is_terminal(self) -> bool {
        matches!(self, Rank::Underboss | Rank::Consigliere)
    }

    /// Salary deducted per income cycle
    pub fn salary(self) -> i64 {
        match self {
            Rank::Associate => 0,
            Rank::Soldier => 500,
            Rank::Capo => 2_000,
            Rank::Underboss => 10_000,
            Rank::Consigliere => 10_000,
        }
    }

    /// Money the AI budgets for hiring a unit of this rank
    pub fn hiring_cost(self) -> i64 {
        match self {
            Rank::Associate => 5_000,
            Rank::Soldier => 8_000,
            Rank::Capo => 15_000,
            Rank::Consigliere => 25_000,
            Rank::Underboss => 50_000,
        }
    }
}

/// The four core attributes every unit is scored on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    /// Physical force, combat, protection, intimidation
    Muscle,
    /// Intelligence, planning, business acumen
    Brains,
    /// Survival skills, awareness, practical knowledge
    Cunning,
    /// Charisma, respect, ability to command others
    Influence,
}

impl Attribute {
    pub const ALL: [Attribute; 4] = [
        Attribute::Muscle,
        Attribute::Brains,
        Attribute::Cunning,
        Attribute::Influence,
    ];
}

/// Per-attribute skill scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skills {
    pub muscle: u32,
    pub brains: u32,
    pub cunning: u32,
    pub influence: u32,
}

impl Skills {
    pub fn get(&self, attr: Attribute) -> u32 {
        match attr {
            Attribute::Muscle => self.muscle,
            Attribute::Brains => self.brains,
            Attribute::Cunning => self.cunning,
            Attribute::Influence => self.influence,
        }
    }

    pub fn add(&mut self, attr: Attribute, amount: u32) {
        match attr {
            Attribute::Muscle => self.muscle += amount,
            Attribute::Brains => self.brains += amount,
            Attribute::Cunning => self.cunning += amount,
            Attribute::Influence => self.influence += amount,
        }
    }

    pub fn total(&self) -> u32 {
        self.muscle + self.brains + self.cunning + self.influence
    }
}

impl std::ops::Add for Skills {
    type Output = Skills;
    fn add(self, rhs: Skills) -> Skills {
        Skills {
            muscle: self.muscle + rhs.muscle,
            brains: self.brains + rhs.brains,
            cunning: self.cunning + rhs.cunning,
            influence: self.influence + rhs.influence,
        }
    }
}

/// Which attributes are still hidden from the player
///
/// Associates join with all four attributes masked; completed missions
/// reveal them one at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeMask {
    pub muscle: bool,
    pub brains: bool,
    pub cunning: bool,
    pub influence: bool,
}

impl AttributeMask {
    pub fn all_hidden() -> Self {
        Self {
            muscle: true,
            brains: true,
            cunning: true,
            influence: true,
        }
    }

    pub fn all_visible() -> Self {
        Self::default()
    }

    pub fn is_hidden(&self, attr: Attribute) -> bool {
        match attr {
            Attribute::Muscle => self.muscle,
            Attribute::Brains => self.brains,
            Attribute::Cunning => self.cunning,
            Attribute::Influence => self.influence,
        }
    }

    pub fn reveal(&mut self, attr: Attribute) {
        match attr {
            Attribute::Muscle => self.muscle = false,
            Attribute::Brains => self.brains = false,
            Attribute::Cunning => self.cunning = false,
            Attribute::Influence => self.influence = false,
        }
    }

    pub fn has_hidden(&self) -> bool {
        self.muscle || self.brains || self.cunning || self.influence
    }

    /// Reveal one random still-hidden attribute, if any remain
    pub fn reveal_random<R: Rng>(&mut self, rng: &mut R) {
        let hidden: Vec<Attribute> = Attribute::ALL
            .iter()
            .copied()
            .filter(|a| self.is_hidden(*a))
            .collect();
        if hidden.is_empty() {
            return;
        }
        let pick = hidden[rng.gen_range(0..hidden.len())];
        self.reveal(pick);
    }
}

/// What a unit is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitStatus {
    Idle,
    /// Away on a launched mission
    Mission,
    /// Managing a territory
    Territory,
    /// Capturing a territory
    Expand,
    /// Locked up; unavailable until released
    Prison,
}

/// A single mobster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    /// None for the unaffiliated associate pool
    pub owner: Option<PlayerId>,
    pub name: String,
    pub nickname: Option<String>,
    pub rank: Rank,
    pub skills: Skills,
    pub mask: AttributeMask,
    pub experience: u32,
    pub level: u32,
    /// 0-100; hitting 0 triggers defection
    pub loyalty: i32,
    pub heat: u32,
    /// Percentage share of mission rewards
    pub cut: u32,
    pub status: UnitStatus,
    /// Missions this unit has been sent on
    pub missions: Vec<MissionId>,
    /// Crew slots, present only while the unit holds Capo rank
    pub crew: Option<[Option<UnitId>; MAX_CREW_SIZE]>,
    /// Back-reference to the capo whose crew this unit is in
    pub captain: Option<UnitId>,
}

impl Unit {
    /// Reward share for a rank/level combination
    pub fn cut_for(rank: Rank, level: u32) -> u32 {
        let base = match rank {
            Rank::Associate => 10,
            Rank::Soldier => 15,
            Rank::Capo => 20,
            Rank::Underboss => 40,
            Rank::Consigliere => 40,
        };
        base + level * 2
    }

    /// Income multiplier a unit provides when managing a territory
    pub fn manager_multiplier(&self) -> f64 {
        (100 + self.skills.brains + self.skills.influence) as f64 / 100.0
    }
}

const FIRST_NAMES: &[&str] = &[
    "Mikey", "Jimmy", "Tony", "Luka", "Enzo", "Furio", "Vito", "John", "Carmine", "Dickie",
    "Paulie", "Vinny", "Salvatore", "Tommy", "Frankie", "Francesco",
];

const LAST_NAMES: &[&str] = &[
    "Aprile", "Soprano", "Palmisi", "Lupertazi", "Brazi", "Corleone", "Moltisanti", "Rossi",
    "Bianchi", "Romano", "Moretti", "DeLuca", "Lucchesi", "Russo", "Ricci", "Cusamano", "DeCoco",
    "Margharetti", "Gorlami", "Dimeo",
];

/// Generate a fresh unit of the given rank and level
///
/// Skills roll 1-10 per attribute; associates join with every attribute
/// masked. Capos get an empty crew.
pub fn generate_unit<R: Rng>(rng: &mut R, rank: Rank, level: u32) -> Unit {
    let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
    let hidden = rank == Rank::Associate;
    Unit {
        id: UnitId::new(),
        owner: None,
        name: format!("{first} {last}"),
        nickname: None,
        rank,
        skills: Skills {
            muscle: rng.gen_range(1..=10),
            brains: rng.gen_range(1..=10),
            cunning: rng.gen_range(1..=10),
            influence: rng.gen_range(1..=10),
        },
        mask: if hidden {
            AttributeMask::all_hidden()
        } else {
            AttributeMask::all_visible()
        },
        experience: 0,
        level,
        loyalty: 50,
        heat: 50,
        cut: Unit::cut_for(rank, level),
        status: UnitStatus::Idle,
        missions: Vec::new(),
        crew: if rank == Rank::Capo {
            Some(Default::default())
        } else {
            None
        },
        captain: None,
    }
}
