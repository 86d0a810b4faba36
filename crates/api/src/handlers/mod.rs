pub mod auth;
pub mod leads;
pub mod notify_function;
pub mod share;
