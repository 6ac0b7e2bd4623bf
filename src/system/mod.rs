pub mod collector;
pub mod snapshot;
pub mod source;
pub mod top_process;
