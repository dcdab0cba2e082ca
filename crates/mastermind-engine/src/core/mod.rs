pub use self::{code::*, config::*, feedback::Feedback, observation::*};

pub(crate) mod code;
pub(crate) mod config;
pub mod feedback;
pub(crate) mod observation;
