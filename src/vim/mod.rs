pub mod mode;

pub use mode::{VimCommand, VimMode, VimState};
