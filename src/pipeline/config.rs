// Configuration for the lexer → parser pipeline

/// Tokens buffered between the lexer thread and the parser before the lexer blocks
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// How the lexer and the parser are scheduled relative to each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    /// Lex the whole input into a buffer, then parse the buffer
    Eager,
    /// Lex on a separate thread into a bounded channel the parser drains
    #[default]
    Streamed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    pub schedule: Schedule,
    /// Bound of the token channel in [`Schedule::Streamed`] mode.  `0` makes
    /// every send a rendezvous with the parser.
    pub channel_capacity: usize,
}

impl PipelineConfig {
    pub fn eager() -> Self {
        Self {
            schedule: Schedule::Eager,
            ..Self::default()
        }
    }

    pub fn streamed(channel_capacity: usize) -> Self {
        Self {
            schedule: Schedule::Streamed,
            channel_capacity,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            schedule: Schedule::default(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}
