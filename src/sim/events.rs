//! Notifications emitted by the simulation
//!
//! The simulation never talks to audio or rendering directly. It queues
//! events; the front end drains them once per frame.

/// Named audio cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CueKind {
    /// Ingredient dropped into the bowl
    Pop,
    /// Order served
    Ok,
    /// Order served while on a combo
    Combo,
    /// Bowl matched no order
    Wrong,
    /// An order ran out of time
    Expire,
    /// Level target reached
    LevelUp,
    /// Undo / UI click
    Click,
}

impl CueKind {
    pub const ALL: [CueKind; 7] = [
        CueKind::Pop,
        CueKind::Ok,
        CueKind::Combo,
        CueKind::Wrong,
        CueKind::Expire,
        CueKind::LevelUp,
        CueKind::Click,
    ];

    /// Short name (matches the asset/cue naming used in logs)
    pub fn name(&self) -> &'static str {
        match self {
            CueKind::Pop => "pop",
            CueKind::Ok => "ok",
            CueKind::Combo => "combo",
            CueKind::Wrong => "wrong",
            CueKind::Expire => "expire",
            CueKind::LevelUp => "lvl",
            CueKind::Click => "click",
        }
    }
}

/// Mascot reaction requested by gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Happy,
    Sad,
}

/// Something the front end may want to react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Cue(CueKind),
    Mascot(Mood),
    /// Entered the level-complete interstitial for `level`
    LevelCleared { level: u8 },
    /// Started playing `level`
    LevelStarted { level: u8 },
    /// The run ended
    GameOver { win: bool, score: u64 },
}
