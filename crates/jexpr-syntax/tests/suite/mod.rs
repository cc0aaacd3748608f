mod caret;
mod literals;
mod operators;
