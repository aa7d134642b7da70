pub mod complaints;
pub mod health;
pub mod users;
