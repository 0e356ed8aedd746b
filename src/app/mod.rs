pub mod controller;
pub mod prebuilt;
pub mod resolver;
pub mod stages;

pub use controller::AdvisorController;
pub use prebuilt::PrebuiltFinder;
pub use resolver::CompatibilityResolver;
