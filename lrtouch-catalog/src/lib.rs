pub mod catalog;

pub use catalog::{label, Atom, ImageCatalog};
