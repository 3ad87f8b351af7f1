mod unprocessable_entity;

pub use unprocessable_entity::*;
