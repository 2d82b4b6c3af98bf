use std::fmt;

use serde::{Deserialize, Serialize};

/// Smallest accepted selection edge, in screen pixels
pub const MIN_SELECTION_PX: i32 = 5;

/// Identifier of one watch session. Increases with every `start`.
pub type SessionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoxError {
    #[error("region {width}x{height} is smaller than {min}px on one side", min = MIN_SELECTION_PX)]
    TooSmall { width: i32, height: i32 },

    #[error("region ({x1}, {y1}, {x2}, {y2}) is too large")]
    TooLarge { x1: i32, y1: i32, x2: i32, y2: i32 },
}

/// Normalized screen rectangle: `x1 < x2`, `y1 < y2`, both edges at least
/// [`MIN_SELECTION_PX`] long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[i32; 4]", into = "[i32; 4]")]
pub struct BoundingBox {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
}

impl BoundingBox {
    /// Build a box from two opposite corners in any order
    pub fn from_corners(a: (i32, i32), b: (i32, i32)) -> Result<Self, BoxError> {
        Self::new(a.0, a.1, b.0, b.1)
    }

    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Result<Self, BoxError> {
        let (left, right) = (x1.min(x2), x1.max(x2));
        let (top, bottom) = (y1.min(y2), y1.max(y2));

        let (Some(width), Some(height)) = (right.checked_sub(left), bottom.checked_sub(top))
        else {
            return Err(BoxError::TooLarge { x1, y1, x2, y2 });
        };
        if width < MIN_SELECTION_PX || height < MIN_SELECTION_PX {
            return Err(BoxError::TooSmall { width, height });
        }

        Ok(Self {
            x1: left,
            y1: top,
            x2: right,
            y2: bottom,
        })
    }

    pub fn x1(&self) -> i32 {
        self.x1
    }

    pub fn y1(&self) -> i32 {
        self.y1
    }

    pub fn x2(&self) -> i32 {
        self.x2
    }

    pub fn y2(&self) -> i32 {
        self.y2
    }

    pub fn width(&self) -> u32 {
        self.x2.abs_diff(self.x1)
    }

    pub fn height(&self) -> u32 {
        self.y2.abs_diff(self.y1)
    }

    pub fn as_array(&self) -> [i32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}

impl TryFrom<[i32; 4]> for BoundingBox {
    type Error = BoxError;

    fn try_from(value: [i32; 4]) -> Result<Self, Self::Error> {
        let [x1, y1, x2, y2] = value;
        Self::new(x1, y1, x2, y2)
    }
}

impl From<BoundingBox> for [i32; 4] {
    fn from(value: BoundingBox) -> Self {
        value.as_array()
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

/// Saved pair of regions for one-click watch reuse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub watch_bbox: BoundingBox,
    pub overlay_bbox: BoundingBox,
}

/// What a finished region selection is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPurpose {
    SingleCapture,
    WatchRegion,
    OverlayRegion { watch: BoundingBox },
}

/// Writing system the recognized text is expected to be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceScript {
    /// Basic ASCII letters only; accented letters count as foreign
    #[default]
    Latin,
    Cyrillic,
    Greek,
    /// Kana and CJK ideographs
    Japanese,
    Hangul,
    Han,
    Thai,
    Arabic,
}

impl SourceScript {
    pub fn contains(&self, c: char) -> bool {
        match self {
            SourceScript::Latin => c.is_ascii_alphabetic(),
            SourceScript::Cyrillic => matches!(c, '\u{0400}'..='\u{052F}'),
            SourceScript::Greek => matches!(c, '\u{0370}'..='\u{03FF}' | '\u{1F00}'..='\u{1FFF}'),
            SourceScript::Japanese => {
                matches!(c, '\u{3040}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}' | '\u{FF66}'..='\u{FF9F}')
                    || is_han(c)
            }
            SourceScript::Hangul => {
                matches!(c, '\u{1100}'..='\u{11FF}' | '\u{3130}'..='\u{318F}' | '\u{AC00}'..='\u{D7AF}')
            }
            SourceScript::Han => is_han(c),
            SourceScript::Thai => matches!(c, '\u{0E00}'..='\u{0E7F}'),
            SourceScript::Arabic => {
                matches!(c, '\u{0600}'..='\u{06FF}' | '\u{0750}'..='\u{077F}' | '\u{FB50}'..='\u{FDFF}' | '\u{FE70}'..='\u{FEFF}')
            }
        }
    }
}

fn is_han(c: char) -> bool {
    matches!(c, '\u{3400}'..='\u{4DBF}' | '\u{4E00}'..='\u{9FFF}' | '\u{F900}'..='\u{FAFF}' | '\u{20000}'..='\u{2EBEF}')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeyAction {
    SingleCapture,
    StartWatch,
    StopWatch,
}

/// Requests sent to the backend. The backend task is the only writer of
/// session state; everything else goes through this queue.
#[derive(Debug, Clone)]
pub enum AppCommand {
    Hotkey(HotkeyAction),
    SingleCapture(BoundingBox),
    /// Two-step selection: watched region, then overlay region
    BeginWatchWorkflow,
    StartWatch {
        region: BoundingBox,
        overlay: Option<BoundingBox>,
        /// Persist the pair once both regions are known
        remember: bool,
    },
    StartFromSaved,
    StopWatch,
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Owned values posted from the backend to the UI thread
#[derive(Debug, Clone, PartialEq)]
pub enum UiMessage {
    BackendReady,
    /// Last message of the backend: its watch session is stopped
    BackendStopped,
    WatchStarted {
        session: SessionId,
        region: BoundingBox,
        overlay: Option<BoundingBox>,
    },
    WatchStopped {
        session: SessionId,
    },
    OriginalText {
        session: Option<SessionId>,
        text: String,
    },
    Translation {
        session: Option<SessionId>,
        text: String,
        scroll_to_end: bool,
    },
    OverlayOpen {
        session: SessionId,
        region: BoundingBox,
    },
    OverlayText {
        session: SessionId,
        text: String,
    },
    BeginSelection(SelectionPurpose),
    SavedPositions(Option<PositionRecord>),
    Status(String),
    Notice {
        level: NoticeLevel,
        title: String,
        message: String,
    },
}

impl UiMessage {
    /// Session that produced this message, if it belongs to one
    pub fn session(&self) -> Option<SessionId> {
        match self {
            UiMessage::OriginalText { session, .. } | UiMessage::Translation { session, .. } => {
                *session
            }
            UiMessage::OverlayOpen { session, .. } | UiMessage::OverlayText { session, .. } => {
                Some(*session)
            }
            _ => None,
        }
    }
}
