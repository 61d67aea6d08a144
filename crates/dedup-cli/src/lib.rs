pub mod logging;
pub mod pipeline;
