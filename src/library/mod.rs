pub mod logger;
pub mod periodic_task;
