//! Infrastructure implementations for DivergenceResolver

mod interactive;

pub use interactive::InteractiveResolver;
