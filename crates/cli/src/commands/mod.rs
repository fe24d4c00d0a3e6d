pub mod context;
pub mod doctor;
pub mod serve;
