mod public;
mod secured;

pub use public::{health, info, status};
pub use secured::whoami;
