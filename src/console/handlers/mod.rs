pub mod health;
pub use self::health::health;

pub mod pages;
