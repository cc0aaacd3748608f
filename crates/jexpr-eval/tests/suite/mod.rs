mod fixture;

mod completion;
mod constructors;
mod evaluation;
mod hierarchy;
mod literals;
mod operators;
mod providers;
