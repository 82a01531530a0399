pub mod in_memory;
pub mod user;

pub use in_memory::InMemoryUserRepository;
pub use user::PostgresUserRepository;
