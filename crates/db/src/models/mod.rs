pub mod lead;
pub mod staff_user;
