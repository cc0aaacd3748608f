mod minimal_jdk;
mod store;
mod subtyping;
mod type_match;
mod values;
