use std::fmt::{self, Display, Formatter};

///Lifecycle of a buffer shared between a producer group and a consumer group.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BufferState {
    Active,
    ShuttingDown,
    Drained,
}

impl Display for BufferState {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            BufferState::Active => "active",
            BufferState::ShuttingDown => "shutting down",
            BufferState::Drained => "drained",
        };
        write!(f, "{}", name)
    }
}
