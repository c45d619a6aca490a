//! Entity <-> wire record mappers

mod engagement;
mod item;
