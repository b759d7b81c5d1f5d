// Repository layer for database operations

pub mod company;
pub mod job;
pub mod queries;

pub use company::CompanyRepository;
pub use job::JobRepository;
