pub mod fork;
pub mod job;
pub mod redirect;
pub mod signal;
pub mod wait;

pub use job::JobTable;
pub use redirect::RedirectPlan;
pub use signal::ForegroundDefault;
