pub mod postgres;

pub use postgres::PgAuthRepository;
