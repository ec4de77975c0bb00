use thiserror::Error;

/// Reasons an event cannot take part in a day layout.
///
/// `index` is the event's position in the slice handed to the layout engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("event #{index} `{title}` has malformed time `{time}`, expected HH:MM")]
    MalformedTime {
        index: usize,
        title: String,
        time: String,
    },

    #[error("event #{index} `{title}` has negative duration {duration}")]
    InvalidDuration {
        index: usize,
        title: String,
        duration: i64,
    },
}

impl LayoutError {
    pub fn index(&self) -> usize {
        match self {
            Self::MalformedTime { index, .. } | Self::InvalidDuration { index, .. } => *index,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::MalformedTime { title, .. } | Self::InvalidDuration { title, .. } => title,
        }
    }
}
