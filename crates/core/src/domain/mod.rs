pub mod intent;
pub mod message;
