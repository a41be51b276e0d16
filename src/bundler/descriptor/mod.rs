//! Build descriptor structures.
//!
//! The build descriptor is the single input of the bundling pipeline. It is
//! a TOML file declaring the entry script, module search paths, data
//! mappings, forced module includes, output-binary settings, and the
//! package metadata used in the bundle manifest.

mod arch;
mod builder;
mod core;
mod data;
mod entry;
mod modules;
mod output;
mod package;

// Re-export all public types
pub use arch::Arch;
pub use builder::DescriptorBuilder;
pub use core::Descriptor;
pub use data::DataMapping;
pub use entry::EntrySettings;
pub use modules::ModuleSettings;
pub use output::OutputSettings;
pub use package::PackageSettings;
