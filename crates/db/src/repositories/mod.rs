pub mod lead_repo;
pub mod staff_user_repo;

pub use lead_repo::LeadRepo;
pub use staff_user_repo::StaffUserRepo;
