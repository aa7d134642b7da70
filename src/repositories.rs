pub mod complaint_repository;
pub mod user_repository;

pub use complaint_repository::{ComplaintRepository, NewComplaint, SeaOrmComplaintRepository};
pub use user_repository::{NewUser, SeaOrmUserRepository, UserRepository};
