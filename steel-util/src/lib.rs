pub mod math;
pub mod resource_location;

pub use resource_location::{DEFAULT_NAMESPACE, strip_default_namespace};
