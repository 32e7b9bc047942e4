//! Territory and region records

use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, RegionId, TerritoryId, UnitId};

/// Which edges of a territory lie on a region boundary
///
/// Computed once after world generation from region adjacency; used by the
/// presentation layer to draw region outlines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Borders {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

/// State of an in-progress capture
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureState {
    pub in_progress: bool,
    /// 0-100; reaching 100 transfers ownership
    pub progress: f64,
    /// Player that started the capture
    pub initiator: Option<PlayerId>,
    /// Unit doing the capturing; must stay in Expand status
    pub capturing_unit: Option<UnitId>,
}

impl CaptureState {
    /// Reset to the no-capture state
    pub fn clear(&mut self) {
        *self = CaptureState::default();
    }
}

/// One cell of the map grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Territory {
    pub id: TerritoryId,
    pub name: String,
    pub owner: Option<PlayerId>,
    pub region: RegionId,
    /// Income generated per income cycle before multipliers
    pub income: i64,
    pub capture: CaptureState,
    /// Unit overseeing the territory, if any
    pub manager: Option<UnitId>,
    pub borders: Borders,
}

/// A contiguous group of territories granting a control bonus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    pub territory_ids: Vec<TerritoryId>,
    /// Display color, `hsl(...)` string
    pub color: String,
    /// Income bonus percent granted at majority control
    pub income_bonus: u32,
    /// Ordinal of the region within the generated set
    pub kind: u8,
}

/// Regional ownership share (percent) needed to earn the control bonus
pub const REGION_CONTROL_THRESHOLD: f64 = 51.0;
